#![forbid(unsafe_code)]

use crate::encoding::url_decode;
use crate::request::Request;
use crate::strmap::StrMap;

use http::Method;

/// Parameters the router attached to an [`http::Request`].
#[derive(Debug, Clone, Default)]
pub struct RouteParams {
    values: StrMap<String>,
}

impl RouteParams {
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

/// Route values live in the [`RouteParams`] extension; lookups fall back to
/// the query string of the request URI.
impl<B> Request for http::Request<B> {
    fn method(&self) -> &Method {
        http::Request::method(self)
    }

    fn value(&self, name: &str) -> Option<String> {
        if let Some(v) = self.extensions().get::<RouteParams>().and_then(|p| p.get(name)) {
            return Some(v.to_owned());
        }
        self.uri()
            .query()?
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .find(|&(k, _)| url_decode(k) == name)
            .map(|(_, v)| url_decode(v))
    }

    fn set_value(&mut self, name: &str, value: String) {
        let mut params = self
            .extensions_mut()
            .remove::<RouteParams>()
            .unwrap_or_default();
        params.values.insert(name, value);
        self.extensions_mut().insert(params);
    }
}
