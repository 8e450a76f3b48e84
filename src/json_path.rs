//! Dotted path extraction into JSON documents
//!
//! A path such as `repository.releases.nodes.0.tag.name` walks object keys
//! and array indexes, one component per dot.
use serde_json::Value;

/// Walk `path` inside `value`
pub fn get_value<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    if path.is_empty() {
        return Some(value);
    }
    path.split('.').try_fold(value, |current, component| match current {
        Value::Object(map) => map.get(component),
        Value::Array(items) => component
            .parse::<usize>()
            .ok()
            .and_then(|idx| items.get(idx)),
        _ => None,
    })
}

/// Extract the value at `path` from a JSON text, as a string
///
/// Strings are returned unquoted, numbers and booleans as their JSON text,
/// objects and arrays as compact JSON. Missing values, `null` and
/// unparseable input give an empty string.
pub fn get(json: &str, path: &str) -> String {
    let document: Value = match serde_json::from_str(json) {
        Ok(document) => document,
        Err(e) => {
            log::debug!("Unable to parse JSON for path '{path}': {e}");
            return String::new();
        }
    };
    get_value(&document, path).map(stringify).unwrap_or_default()
}

/// Render a value the way callers expect a scalar
fn stringify(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(_) | Value::Number(_) | Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}
