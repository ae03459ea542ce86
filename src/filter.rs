use crate::encoding::url_encode;
use crate::rewriter::Rewriter;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

const DEFAULT_FRONT_CONTROLLER: &str = "server";
const FEED_ELEMENTS: [&str; 2] = ["link", "guid"];

static FORM: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<form\b[^>]*>(.*?)</form>").unwrap());
static HIDDEN_INPUT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"<input[^>]*?type="hidden"[^>]*?/>"#).unwrap());
static NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r#"name="(.*?)""#).unwrap());
static VALUE: Lazy<Regex> = Lazy::new(|| Regex::new(r#"value="(.*?)""#).unwrap());
static FORM_ACTION: Lazy<Regex> = Lazy::new(|| Regex::new(r#"action="[^#].*?""#).unwrap());
static QUERY_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"[?&](.*?)=").unwrap());

/// Rewrites canonical front-controller URLs found in HTML: `href` and
/// `value` attributes, `<link>`/`<guid>` feed elements, and forms driven by
/// hidden inputs.
#[derive(Debug, Clone)]
pub struct Filter {
    rewriter: Rewriter,
    front_controller: String,
    attributes: Option<Regex>,
    elements: Vec<Regex>,
}

struct HiddenInput<'h> {
    name: &'h str,
    value: &'h str,
    html: &'h str,
}

impl Filter {
    pub fn new(rewriter: Rewriter) -> Self {
        Self::with_front_controller(rewriter, DEFAULT_FRONT_CONTROLLER)
    }

    /// `name` is the script name without `.php`, e.g. `"server"`.
    pub fn with_front_controller(rewriter: Rewriter, name: &str) -> Self {
        let escaped = regex::escape(name);
        let attributes =
            Regex::new(&format!(r#"(?i)(href|value)="([^"]*{}[^"]*)""#, escaped)).ok();
        let elements = FEED_ELEMENTS
            .iter()
            .filter_map(|elem| {
                Regex::new(&format!(r"(?i)(<{0}>)({1}.*?)(</{0}>)", elem, escaped)).ok()
            })
            .collect();
        Self {
            rewriter,
            front_controller: name.to_owned(),
            attributes,
            elements,
        }
    }

    pub fn front_controller(&self) -> &str {
        &self.front_controller
    }

    pub fn rewriter(&self) -> &Rewriter {
        &self.rewriter
    }

    pub fn process(&self, html: &str) -> String {
        let mut html = html.to_owned();

        if let Some(attributes) = &self.attributes {
            html = attributes
                .replace_all(&html, |caps: &Captures<'_>| {
                    let url = &caps[2];
                    let rewritten = self.rewriter.rewrite(url, false);
                    if rewritten != url {
                        format!(r#"{}="{}""#, &caps[1], rewritten)
                    } else {
                        caps[0].to_owned()
                    }
                })
                .into_owned();
        }

        for element in &self.elements {
            html = element
                .replace_all(&html, |caps: &Captures<'_>| {
                    format!(
                        "{}{}{}",
                        &caps[1],
                        self.rewriter.rewrite(&caps[2], true),
                        &caps[3]
                    )
                })
                .into_owned();
        }

        FORM.replace_all(&html, |caps: &Captures<'_>| self.replace_form(&caps[0]))
            .into_owned()
    }

    fn replace_form(&self, form: &str) -> String {
        let inputs = hidden_inputs(form);
        let url = self.url_from_inputs(&inputs);

        let info = match self.rewriter.rewrite_info(&url) {
            Some(info) => info,
            None => return form.to_owned(),
        };

        let action = format!(r#"action="{}{}""#, info.web_root(), info.path());
        let mut form = FORM_ACTION
            .replace_all(form, regex::NoExpand(&action))
            .into_owned();

        let kept: Vec<&str> = QUERY_NAME
            .captures_iter(info.query())
            .filter_map(|c| c.get(1))
            .map(|m| m.as_str())
            .collect();
        for input in &inputs {
            if !kept.contains(&url_encode(input.name).as_str()) {
                form = form.replace(input.html, "");
            }
        }

        if let Some(method) = info.specification().method() {
            let hidden = format!(
                r#"<input type="hidden" name="__method" value="{}" /></form>"#,
                method
            );
            form = form.replace("</form>", &hidden);
        }

        form
    }

    fn url_from_inputs(&self, inputs: &[HiddenInput<'_>]) -> String {
        let mut url = format!("{}.php", self.front_controller);
        for (i, input) in inputs.iter().enumerate() {
            url.push(if i == 0 { '?' } else { '&' });
            url.push_str(&url_encode(input.name));
            url.push('=');
            url.push_str(&url_encode(input.value));
        }
        url
    }
}

/// Hidden inputs with both a name and a value; a repeated name replaces the
/// earlier input in place.
fn hidden_inputs(form: &str) -> Vec<HiddenInput<'_>> {
    let mut inputs: Vec<HiddenInput<'_>> = Vec::new();
    for m in HIDDEN_INPUT.find_iter(form) {
        let html = m.as_str();
        let name = NAME.captures(html).and_then(|c| c.get(1));
        let value = VALUE.captures(html).and_then(|c| c.get(1));
        let (name, value) = match (name, value) {
            (Some(n), Some(v)) => (n.as_str(), v.as_str()),
            _ => continue,
        };
        let input = HiddenInput { name, value, html };
        match inputs.iter_mut().find(|i| i.name == name) {
            Some(slot) => *slot = input,
            None => inputs.push(input),
        }
    }
    inputs
}
