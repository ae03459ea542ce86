use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub const NUM: &str = r"\d+";
pub const WORD: &str = r"\w+";
pub const ANY: &str = r"[^/]+";
pub const FILE: &str = r"[^/]+\.\w+";

/// Placeholder name to regex fragment.
///
/// Fragments are stored bare; the router wraps each one in its own capture
/// group and the rewriter anchors it with `^(?:...)$`, so a fragment may carry
/// groups of its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeTable {
    types: BTreeMap<String, String>,
}

impl Default for TypeTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl TypeTable {
    /// `num`, `word`, `any` and `file`.
    pub fn builtin() -> Self {
        let types = [("num", NUM), ("word", WORD), ("any", ANY), ("file", FILE)]
            .iter()
            .map(|&(k, v)| (k.to_owned(), v.to_owned()))
            .collect();
        Self { types }
    }

    pub fn empty() -> Self {
        Self {
            types: BTreeMap::new(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.types.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Later declarations win.
    pub fn insert(&mut self, name: impl Into<String>, fragment: impl Into<String>) -> &mut Self {
        self.types.insert(name.into(), fragment.into());
        self
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.types.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
