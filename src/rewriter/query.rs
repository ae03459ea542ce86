use crate::specification::Specification;

/// Query string and fragment left over once a route absorbed its parameters.
///
/// Pairs whose name was matched, `controller`, empty values and an `action`
/// equal to the route's own action are dropped; everything else is kept in
/// order. The fragment is kept as is.
pub(super) fn residual(url: &str, spec: &Specification, matched: &[(&str, &str)]) -> String {
    let query = match url.split_once('?') {
        Some((_, q)) if !q.is_empty() => q,
        _ => return String::new(),
    };

    let (query, fragment) = match query.split_once('#') {
        Some((q, f)) => (q, f),
        None => (query, ""),
    };
    let query = html_escape::decode_html_entities(query);

    let mut out = String::new();
    for (name, value) in query.split('&').filter_map(|pair| pair.split_once('=')) {
        if value.is_empty() || name == "controller" || matched.iter().any(|&(m, _)| m == name) {
            continue;
        }
        if name == "action" && value == spec.action() {
            continue;
        }
        out.push(if out.is_empty() { '?' } else { '&' });
        out.push_str(name);
        out.push('=');
        out.push_str(value);
    }

    if !fragment.is_empty() {
        out.push('#');
        out.push_str(fragment);
    }

    out
}
