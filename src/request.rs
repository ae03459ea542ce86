use crate::strmap::StrMap;

use http::Method;

/// Where the router writes what it matched.
///
/// `value` sees whatever the request already carries (query parameters,
/// earlier matches), so an explicit `action` survives routing.
pub trait Request {
    fn method(&self) -> &Method;

    fn value(&self, name: &str) -> Option<String>;

    fn set_value(&mut self, name: &str, value: String);

    fn value_or(&self, name: &str, default: &str) -> String {
        self.value(name).unwrap_or_else(|| default.to_owned())
    }
}

impl<R: Request + ?Sized> Request for &mut R {
    fn method(&self) -> &Method {
        (**self).method()
    }

    fn value(&self, name: &str) -> Option<String> {
        (**self).value(name)
    }

    fn set_value(&mut self, name: &str, value: String) {
        (**self).set_value(name, value)
    }
}

/// A request that is nothing but a method and a parameter bag.
#[derive(Debug, Clone)]
pub struct MemoryRequest {
    method: Method,
    values: StrMap<String>,
}

impl Default for MemoryRequest {
    fn default() -> Self {
        Self::new(Method::GET)
    }
}

impl MemoryRequest {
    pub fn new(method: Method) -> Self {
        Self {
            method,
            values: StrMap::new(),
        }
    }

    pub fn with_value(mut self, name: &str, value: impl Into<String>) -> Self {
        self.values.insert(name, value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.find(name).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k, v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Request for MemoryRequest {
    fn method(&self) -> &Method {
        &self.method
    }

    fn value(&self, name: &str) -> Option<String> {
        self.get(name).map(str::to_owned)
    }

    fn set_value(&mut self, name: &str, value: String) {
        self.values.insert(name, value);
    }
}
