use http::Method;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

pub const DEFAULT_ACTION: &str = "index";

static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| Regex::new(r":(\w+)").unwrap());

pub(crate) type ParameterList = SmallVec<[Parameter; 4]>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    name: String,
    default: Option<String>,
}

impl Parameter {
    /// An empty default is the same as no default.
    pub fn new(name: impl Into<String>, default: Option<String>) -> Self {
        Self {
            name: name.into(),
            default: default.filter(|d| !d.is_empty()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn default(&self) -> Option<&str> {
        self.default.as_deref()
    }
}

/// One route: a pattern with typed placeholders mapped onto a controller,
/// an action and an ordered parameter list.
///
/// The i-th placeholder of the pattern binds the i-th parameter. Parameters
/// past the last placeholder only ever carry their default.
/// Placeholders past the last parameter match but bind nothing, and such a
/// route is never produced by the rewriter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Specification {
    pattern: String,
    controller: String,
    action: String,
    parameters: ParameterList,
    #[serde(with = "method_serde")]
    method: Option<Method>,
}

impl Specification {
    pub fn new(
        pattern: impl Into<String>,
        controller: impl Into<String>,
        action: impl Into<String>,
        parameters: impl IntoIterator<Item = Parameter>,
        method: Option<Method>,
    ) -> Self {
        let action = action.into();
        Self {
            pattern: pattern.into(),
            controller: controller.into(),
            action: if action.is_empty() {
                DEFAULT_ACTION.to_owned()
            } else {
                action
            },
            parameters: parameters.into_iter().collect(),
            method,
        }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn controller(&self) -> &str {
        &self.controller
    }

    pub fn action(&self) -> &str {
        &self.action
    }

    pub fn has_default_action(&self) -> bool {
        self.action == DEFAULT_ACTION
    }

    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    pub fn parameter(&self, name: &str) -> Option<&Parameter> {
        self.parameters.iter().find(|p| p.name == name)
    }

    /// `None` accepts every method.
    pub fn method(&self) -> Option<&Method> {
        self.method.as_ref()
    }

    pub fn accepts(&self, method: &Method) -> bool {
        self.method.as_ref().map_or(true, |m| m == method)
    }

    /// Type names of the placeholders in the pattern, in order.
    pub fn placeholders(&self) -> impl Iterator<Item = &str> {
        placeholders(&self.pattern).map(|(_, name)| name)
    }
}

/// Yields `(token_range, type_name)` for every `:name` token.
pub(crate) fn placeholders(pattern: &str) -> impl Iterator<Item = (std::ops::Range<usize>, &str)> {
    PLACEHOLDER.captures_iter(pattern).filter_map(|caps| {
        let token = caps.get(0)?;
        let name = caps.get(1)?;
        Some((token.range(), name.as_str()))
    })
}

mod method_serde {
    use http::Method;
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(method: &Option<Method>, s: S) -> Result<S::Ok, S::Error> {
        method.as_ref().map(Method::as_str).serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Method>, D::Error> {
        let raw: Option<String> = Option::deserialize(d)?;
        raw.map(|m| Method::from_bytes(m.as_bytes()).map_err(D::Error::custom))
            .transpose()
    }
}
