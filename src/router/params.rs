use std::ops::Deref;
use std::str::FromStr;

use smallvec::SmallVec;

/// Parameter values of a match, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params<'a> {
    pub(super) buf: SmallVec<[(&'a str, String); 8]>,
}

impl Params<'_> {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.buf
            .iter()
            .find_map(|(k, v)| if name == *k { Some(v.as_str()) } else { None })
    }

    pub fn parse<T: FromStr>(&self, name: &str) -> Option<Result<T, T::Err>> {
        self.get(name).map(T::from_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.buf.iter().map(|(k, v)| (*k, v.as_str()))
    }
}

impl<'a> Deref for Params<'a> {
    type Target = [(&'a str, String)];
    fn deref(&self) -> &Self::Target {
        &self.buf
    }
}

impl Params<'_> {
    pub(super) fn new() -> Self {
        Self {
            buf: SmallVec::new(),
        }
    }
}
