//! Path template resolution.
//!
//! A full path is the map host, resource host, and endpoint template
//! concatenated, with `{key}` placeholders substituted from the parameter
//! map and unconsumed parameters appended as a query string.
use crate::core::request::RequestParams;

/// Resolve a templated path against named parameters.
///
/// Substitution is per-key: for each parameter in insertion order, the first
/// occurrence of its `{key}` placeholder is replaced (raw, not encoded) and
/// the parameter is consumed. The remaining parameters become the query
/// string: keys verbatim, values percent-encoded, insertion order kept.
/// A placeholder with no matching parameter stays literal; that is a caller
/// error and is not detected here.
pub fn build_full_path(
    map_host: &str,
    resource_host: &str,
    template: &str,
    params: Option<&RequestParams>,
) -> String {
    let mut full_path = format!("{map_host}{resource_host}{template}");
    let Some(params) = params else {
        return full_path;
    };

    let mut leftovers: Vec<(&str, &str)> = Vec::new();
    for (key, value) in params.iter() {
        let placeholder = format!("{{{key}}}");
        if full_path.contains(&placeholder) {
            full_path = full_path.replacen(&placeholder, value, 1);
        } else {
            leftovers.push((key, value));
        }
    }

    for (index, (key, value)) in leftovers.iter().enumerate() {
        let separator = if index == 0 { '?' } else { '&' };
        let encoded = urlencoding::encode(value);
        full_path.push(separator);
        full_path.push_str(key);
        full_path.push('=');
        full_path.push_str(&encoded);
    }

    full_path
}
