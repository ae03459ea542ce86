mod params;
mod pattern;

pub use self::params::Params;

use crate::config::Config;
use crate::encoding::url_decode;
use crate::request::Request;
use crate::specification::Specification;
use crate::table::RouteTable;

use std::borrow::Cow;
use std::sync::Arc;

use http::Method;
use regex::Regex;

const FRONT_CONTROLLER: &str = "/index.php";

/// Matches request paths against a route table, first declared route wins.
#[derive(Debug, Clone)]
pub struct Router {
    table: Arc<RouteTable>,
    patterns: Vec<Option<Regex>>,
    extension: Option<String>,
    web_root: String,
}

/// The route a path resolved to and the values it carried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match<'r> {
    specification: &'r Specification,
    params: Params<'r>,
}

impl<'r> Match<'r> {
    pub fn specification(&self) -> &'r Specification {
        self.specification
    }

    pub fn controller(&self) -> &'r str {
        self.specification.controller()
    }

    /// The action of the route; a parameter named `action` takes precedence.
    pub fn action(&self) -> &str {
        self.params
            .get("action")
            .filter(|a| !a.is_empty())
            .unwrap_or_else(|| self.specification.action())
    }

    pub fn params(&self) -> &Params<'r> {
        &self.params
    }

    /// Writes `controller`, `action` and every parameter into `request`.
    ///
    /// An `action` already present on the request beats the route's action,
    /// but not a parameter named `action`.
    pub fn apply<R: Request + ?Sized>(&self, request: &mut R) {
        request.set_value("controller", self.specification.controller().to_owned());
        let action = request.value_or("action", self.specification.action());
        request.set_value("action", action);
        for (name, value) in self.params.iter() {
            request.set_value(name, value.to_owned());
        }
    }
}

impl Router {
    pub fn new(table: impl Into<Arc<RouteTable>>) -> Self {
        let table = table.into();
        let patterns = table
            .specifications()
            .iter()
            .map(|spec| pattern::compile(spec, table.types()))
            .collect();
        Self {
            table,
            patterns,
            extension: None,
            web_root: "/".to_owned(),
        }
    }

    pub fn from_config(table: impl Into<Arc<RouteTable>>, config: &Config) -> Self {
        let router = Self::new(table).with_web_root(config.site_web_root());
        match config.extension() {
            Some(ext) => router.with_extension(ext),
            None => router,
        }
    }

    /// Strips `.extension` from incoming paths.
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        let extension = extension.into();
        self.extension = Some(extension).filter(|e| !e.is_empty());
        self
    }

    /// Strips this prefix from incoming paths, `/` by default.
    pub fn with_web_root(mut self, web_root: impl Into<String>) -> Self {
        self.web_root = web_root.into();
        self
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    pub fn find<'r>(&'r self, method: &Method, path: &str) -> Option<Match<'r>> {
        let path = self.normalize(path);

        let specs = self.table.specifications();
        for (spec, re) in specs.iter().zip(&self.patterns) {
            if !spec.accepts(method) {
                continue;
            }
            let caps = match re.as_ref().and_then(|re| re.captures(&path)) {
                Some(caps) => caps,
                None => continue,
            };

            let mut params = Params::new();
            for (i, param) in spec.parameters().iter().enumerate() {
                let value = match caps.name(&pattern::group_name(i)) {
                    Some(m) if !m.as_str().is_empty() => url_decode(m.as_str()),
                    _ => param.default().unwrap_or_default().to_owned(),
                };
                params.buf.push((param.name(), value));
            }

            tracing::trace!(%method, %path, route = spec.pattern(), "route matched");
            return Some(Match {
                specification: spec,
                params,
            });
        }

        tracing::trace!(%method, %path, "no route matched");
        None
    }

    /// Routes `path` and writes the result into `request`.
    /// The request is left untouched when nothing matches.
    pub fn process<R: Request + ?Sized>(&self, request: &mut R, path: &str) -> Option<&Specification> {
        let m = self.find(request.method(), path)?;
        m.apply(request);
        Some(m.specification())
    }

    fn normalize<'p>(&self, path: &'p str) -> Cow<'p, str> {
        let mut path: Cow<'p, str> = if path == FRONT_CONTROLLER {
            Cow::Borrowed("/")
        } else {
            Cow::Borrowed(path)
        };

        if !self.web_root.is_empty() {
            if let Some(rest) = path.strip_prefix(self.web_root.as_str()) {
                path = if rest.starts_with('/') {
                    Cow::Owned(rest.to_owned())
                } else {
                    Cow::Owned(format!("/{}", rest))
                };
            }
        }

        if let Some(ext) = &self.extension {
            let stripped = path
                .strip_suffix(ext.as_str())
                .and_then(|p| p.strip_suffix('.'))
                .map(str::to_owned);
            if let Some(p) = stripped {
                path = Cow::Owned(p);
            }
        }

        path
    }
}
