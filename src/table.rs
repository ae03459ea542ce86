use crate::parser::StandardParser;
use crate::specification::Specification;
use crate::types::TypeTable;

use serde::{Deserialize, Serialize};

/// Parsed routes in priority order plus the placeholder types they use.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteTable {
    specifications: Vec<Specification>,
    types: TypeTable,
}

impl RouteTable {
    /// An empty table with the built-in types.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_parts(specifications: Vec<Specification>, types: TypeTable) -> Self {
        Self {
            specifications,
            types,
        }
    }

    /// Builds a table from single route lines with the built-in types.
    /// Lines that do not parse are skipped.
    pub fn from_lines<'a>(lines: impl IntoIterator<Item = &'a str>) -> Self {
        let mut table = Self::new();
        for line in lines {
            table.push_line(line);
        }
        table
    }

    pub fn push(&mut self, specification: Specification) -> &mut Self {
        self.specifications.push(specification);
        self
    }

    pub fn push_line(&mut self, line: &str) -> &mut Self {
        if let Some(spec) = StandardParser::new().parse_spec(line) {
            self.specifications.push(spec);
        }
        self
    }

    pub fn with_types(mut self, types: TypeTable) -> Self {
        self.types = types;
        self
    }

    pub fn specifications(&self) -> &[Specification] {
        &self.specifications
    }

    pub fn types(&self) -> &TypeTable {
        &self.types
    }

    pub fn types_mut(&mut self) -> &mut TypeTable {
        &mut self.types
    }

    pub fn len(&self) -> usize {
        self.specifications.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specifications.is_empty()
    }

    pub fn into_parts(self) -> (Vec<Specification>, TypeTable) {
        (self.specifications, self.types)
    }
}

#[macro_export]
macro_rules! route_table {
    {@entry $table:ident, $method:ident $pattern:literal, $target:literal} => {
        $table.push_line(concat!(stringify!($method), " ", $pattern, " = ", $target))
    };
    {@entry $table:ident, $pattern:literal, $target:literal} => {
        $table.push_line(concat!($pattern, " = ", $target))
    };

    {$($($method:ident)? $pattern:literal => $target:literal),* $(,)?} => {{
        let mut __table = $crate::RouteTable::new();
        $($crate::route_table!(@entry __table, $($method)? $pattern, $target);)*
        __table
    }};
}
