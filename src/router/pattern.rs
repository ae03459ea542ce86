use crate::specification::{self, Specification};
use crate::types::TypeTable;

use regex::Regex;

const SLASH: char = '/';

/// Capture group name for the i-th placeholder.
pub(super) fn group_name(i: usize) -> String {
    format!("p{}", i)
}

/// Compiles the match expression of a route.
///
/// Literal text is escaped, every `:type` becomes a named group around the
/// type's fragment. `None` when a placeholder has no type or a fragment does
/// not compile, which leaves the route unmatchable.
pub(super) fn compile(spec: &Specification, types: &TypeTable) -> Option<Regex> {
    let route = spec.pattern();
    let mut expr = String::with_capacity(route.len() * 2 + 16);
    expr.push('^');
    if !route.starts_with(SLASH) {
        expr.push(SLASH);
    }

    let mut last = 0;
    for (i, (token, name)) in specification::placeholders(route).enumerate() {
        let fragment = match types.get(name) {
            Some(f) => f,
            None => {
                tracing::warn!(route, placeholder = name, "unknown placeholder type");
                return None;
            }
        };
        expr.push_str(&regex::escape(&route[last..token.start]));
        expr.push_str(&format!("(?P<{}>{})", group_name(i), fragment));
        last = token.end;
    }
    expr.push_str(&regex::escape(&route[last..]));
    expr.push_str(r"/?(?:\?|&|$)");

    match Regex::new(&expr) {
        Ok(re) => Some(re),
        Err(e) => {
            tracing::warn!(route, error = %e, "route does not compile");
            None
        }
    }
}
