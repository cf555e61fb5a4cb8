//! Flattening JSON values into `key=value` pairs.
//!
//! Used for both query strings and form-encoded bodies.

use serde_json::{Map, Value};
use url::form_urlencoded;

/// Flattens entries into string pairs.
///
/// Scalars become one pair each, arrays become one pair per element under
/// the same key, `null` is skipped and nested objects are sent as JSON text.
pub fn query_pairs<'a, I>(entries: I) -> Vec<(String, String)>
where
    I: IntoIterator<Item = (&'a String, &'a Value)>,
{
    let mut pairs = Vec::new();
    for (key, value) in entries {
        match value {
            Value::Array(items) => {
                pairs.extend(items.iter().filter_map(|item| scalar(item).map(|v| (key.clone(), v))));
            }
            other => {
                if let Some(v) = scalar(other) {
                    pairs.push((key.clone(), v));
                }
            }
        }
    }
    pairs
}

/// Serializes query inputs into a `?`-prefixed query string, visiting keys
/// in `order`. Returns an empty string when nothing is sent.
///
/// ## Examples
///
/// ```rust
/// use api::call::query_string;
/// use serde_json::json;
///
/// let inputs = json!({ "tag": ["a", "b"], "q": "x y" });
/// let inputs = inputs.as_object().unwrap();
/// assert_eq!(query_string(inputs, &["q", "tag"]), "?q=x+y&tag=a&tag=b");
/// ```
pub fn query_string<S: AsRef<str>>(inputs: &Map<String, Value>, order: &[S]) -> String {
    let pairs = query_pairs(
        order
            .iter()
            .filter_map(|key| inputs.get_key_value(key.as_ref())),
    );
    if pairs.is_empty() {
        return String::new();
    }

    let encoded = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs)
        .finish();
    format!("?{encoded}")
}

fn scalar(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        other => Some(other.to_string()),
    }
}
