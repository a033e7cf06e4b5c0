//! Flattening of nested JSON objects into separator-joined keys.

use serde_json::{Map, Value};

/// Flatten nested objects: `{"a": {"b": 1}}` becomes `{"a/b": 1}` with `sep = "/"`.
///
/// Arrays and scalars are kept as leaf values.
pub fn flatten_object(object: &Map<String, Value>, sep: &str) -> Map<String, Value> {
    let mut out = Map::new();
    flatten_into(object, None, sep, &mut out);
    out
}

/// Flatten under an explicit key prefix
pub fn flatten_object_under(object: &Map<String, Value>, parent: &str, sep: &str) -> Map<String, Value> {
    let mut out = Map::new();
    flatten_into(object, Some(parent), sep, &mut out);
    out
}

fn flatten_into(object: &Map<String, Value>, parent: Option<&str>, sep: &str, out: &mut Map<String, Value>) {
    for (key, value) in object {
        let full = match parent {
            Some(parent) => format!("{}{}{}", parent, sep, key),
            None => key.clone(),
        };
        match value {
            Value::Object(inner) => flatten_into(inner, Some(&full), sep, out),
            leaf => {
                out.insert(full, leaf.clone());
            }
        }
    }
}
