mod query;

use crate::config::Config;
use crate::specification::{self, Specification};
use crate::table::RouteTable;
use crate::types::TypeTable;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use regex::Regex;

const ACTION: &str = "action";
const ACTION_TYPE: &str = "word";
const VALUE: &str = r"[a-z0-9%,\-.+]+";

/// Turns canonical `script?controller=...&action=...` URLs into route URLs.
///
/// A route is chosen structurally: its controller must be named in the
/// query, every parameter it declares must be present with a value of the
/// right type (or equal to its default), and a non-`index` action must
/// agree. Declaration order breaks ties.
#[derive(Debug, Clone)]
pub struct Rewriter {
    table: Arc<RouteTable>,
    candidates: Vec<Option<Candidate>>,
    validators: HashMap<String, Option<Regex>>,
    extension: Option<String>,
    domain: Option<String>,
    web_root: String,
}

#[derive(Debug, Clone)]
struct Candidate {
    controller: Regex,
    required: Vec<Required>,
}

#[derive(Debug, Clone)]
struct Required {
    name: String,
    type_name: String,
    default: Option<String>,
    value: Regex,
}

/// The pieces of a rewritten URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteInfo<'r> {
    domain: String,
    web_root: &'r str,
    path: String,
    query: String,
    specification: &'r Specification,
}

impl<'r> RewriteInfo<'r> {
    /// `http://` followed by the configured domain.
    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn web_root(&self) -> &'r str {
        self.web_root
    }

    /// The route path, without a leading slash.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Leftover `?query` and `#fragment`, possibly empty.
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn specification(&self) -> &'r Specification {
        self.specification
    }

    pub fn to_url(&self, include_domain: bool) -> String {
        format!(
            "{}{}{}{}",
            if include_domain { self.domain.as_str() } else { "" },
            self.web_root,
            self.path,
            self.query
        )
    }
}

impl fmt::Display for RewriteInfo<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.web_root, self.path, self.query)
    }
}

impl Required {
    fn new(name: &str, type_name: &str, default: Option<&str>) -> Option<Self> {
        let value = Regex::new(&format!(r"(?i)[?&;]{}=({})", regex::escape(name), VALUE)).ok()?;
        Some(Self {
            name: name.to_owned(),
            type_name: type_name.to_owned(),
            default: default.map(str::to_owned),
            value,
        })
    }
}

impl Candidate {
    fn new(spec: &Specification) -> Option<Self> {
        let controller = Regex::new(&format!(
            r"(?i)[?&]controller={}(?:&|#|$)",
            regex::escape(spec.controller())
        ))
        .ok()?;

        let types: Vec<&str> = spec.placeholders().collect();
        let mut required = spec
            .parameters()
            .iter()
            .enumerate()
            .map(|(i, p)| Required::new(p.name(), types.get(i).copied().unwrap_or(""), p.default()))
            .collect::<Option<Vec<_>>>()?;

        if !spec.has_default_action() {
            match required.iter_mut().find(|r| r.name == ACTION) {
                Some(r) => r.type_name = ACTION_TYPE.to_owned(),
                None => required.push(Required::new(ACTION, ACTION_TYPE, None)?),
            }
        }

        Some(Self {
            controller,
            required,
        })
    }
}

impl Rewriter {
    pub fn new(table: impl Into<Arc<RouteTable>>) -> Self {
        let table = table.into();
        let candidates = table
            .specifications()
            .iter()
            .map(Candidate::new)
            .collect();
        let validators = compile_validators(table.types());
        Self {
            table,
            candidates,
            validators,
            extension: None,
            domain: None,
            web_root: "/".to_owned(),
        }
    }

    pub fn from_config(table: impl Into<Arc<RouteTable>>, config: &Config) -> Self {
        let mut rewriter = Self::new(table).with_web_root(config.site_web_root());
        if let Some(ext) = config.extension() {
            rewriter = rewriter.with_extension(ext);
        }
        if let Some(domain) = config.site_domain() {
            rewriter = rewriter.with_domain(domain);
        }
        rewriter
    }

    /// Appends `.extension` to rewritten paths.
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = Some(extension.into()).filter(|e| !e.is_empty());
        self
    }

    /// Absolute URLs on other domains are left alone.
    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into()).filter(|d| !d.is_empty());
        self
    }

    /// Prefix of every rewritten path, `/` by default.
    pub fn with_web_root(mut self, web_root: impl Into<String>) -> Self {
        self.web_root = web_root.into();
        self
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// Rewrites `url`, or returns it unchanged when no route fits or it
    /// points at another domain.
    pub fn rewrite(&self, url: &str, include_domain: bool) -> String {
        if self.domain_mismatch(url) {
            tracing::trace!(url, "not rewriting url on a foreign domain");
            return url.to_owned();
        }
        match self.rewrite_info(url) {
            Some(info) => info.to_url(include_domain),
            None => url.to_owned(),
        }
    }

    /// Finds the route for a canonical URL and splits the result into its
    /// parts. Does not look at the domain.
    pub fn rewrite_info<'r>(&'r self, url: &str) -> Option<RewriteInfo<'r>> {
        let specs = self.table.specifications();
        for (spec, candidate) in specs.iter().zip(&self.candidates) {
            let candidate = match candidate {
                Some(c) if c.controller.is_match(url) => c,
                _ => continue,
            };
            let matched = match self.matched_params(spec, candidate, url) {
                Some(m) => m,
                None => continue,
            };
            let path = match self.build_path(spec, &matched) {
                Some(p) => p,
                None => continue,
            };

            tracing::trace!(url, route = spec.pattern(), "url rewritten");
            return Some(RewriteInfo {
                domain: format!("http://{}", self.domain.as_deref().unwrap_or_default()),
                web_root: &self.web_root,
                path,
                query: query::residual(url, spec, &matched),
                specification: spec,
            });
        }
        None
    }

    fn domain_mismatch(&self, url: &str) -> bool {
        match &self.domain {
            Some(domain) if url.starts_with("http") => !url.contains(&format!("://{}", domain)),
            _ => false,
        }
    }

    fn matched_params<'c, 'u>(
        &self,
        spec: &Specification,
        candidate: &'c Candidate,
        url: &'u str,
    ) -> Option<Vec<(&'c str, &'u str)>> {
        let mut matched = Vec::with_capacity(candidate.required.len());

        for req in &candidate.required {
            let value = req.value.captures(url)?.get(1)?.as_str();
            if !self.param_matches(&req.type_name, value, req.default.as_deref()) {
                return None;
            }
            matched.push((req.name.as_str(), value));
        }

        if !spec.has_default_action() {
            if let Some(&(_, action)) = matched.iter().find(|&&(name, _)| name == ACTION) {
                if action != spec.action() {
                    return None;
                }
            }
        }

        Some(matched)
    }

    /// A declared default must be met exactly. Unknown types only pass with a
    /// default.
    fn param_matches(&self, type_name: &str, value: &str, default: Option<&str>) -> bool {
        if let Some(d) = default {
            if d != value {
                return false;
            }
        }
        match self.validators.get(type_name) {
            Some(Some(re)) => re.is_match(value),
            Some(None) => false,
            None => default.is_some(),
        }
    }

    fn build_path(&self, spec: &Specification, matched: &[(&str, &str)]) -> Option<String> {
        let route = spec.pattern();
        let mut path = String::with_capacity(route.len() + 16);
        let mut last = 0;

        for (i, (token, _)) in specification::placeholders(route).enumerate() {
            let name = spec.parameters().get(i)?.name();
            let &(_, value) = matched.iter().find(|&&(n, _)| n == name)?;
            path.push_str(&route[last..token.start]);
            path.push_str(value);
            last = token.end;
        }
        path.push_str(&route[last..]);

        if path.starts_with('/') {
            path.remove(0);
        }
        if let Some(ext) = &self.extension {
            path.push('.');
            path.push_str(ext);
        }
        Some(path)
    }
}

fn compile_validators(types: &TypeTable) -> HashMap<String, Option<Regex>> {
    types
        .iter()
        .map(|(name, fragment)| {
            let re = match Regex::new(&format!("^(?:{})$", fragment)) {
                Ok(re) => Some(re),
                Err(e) => {
                    tracing::warn!(placeholder = name, error = %e, "type does not compile");
                    None
                }
            };
            (name.to_owned(), re)
        })
        .collect()
}
