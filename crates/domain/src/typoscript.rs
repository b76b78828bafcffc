//! Lookup helpers for TypoScript-shaped configuration trees.
//!
//! Configuration arrays follow the TYPO3 convention: a node `phrase` may carry
//! a scalar value under `phrase` and its children under `phrase.`. Plain nested
//! objects (without the trailing dot) are accepted as children too, which keeps
//! JSON and TOML configuration files readable.

use serde_json::{Map, Value};

/// Returns the child object stored under `key.` (or `key` when it is an object).
#[must_use]
pub fn child<'a>(node: &'a Map<String, Value>, key: &str) -> Option<&'a Map<String, Value>> {
    if let Some(Value::Object(children)) = node.get(&format!("{key}.")) {
        return Some(children);
    }
    match node.get(key) {
        Some(Value::Object(children)) => Some(children),
        _ => None,
    }
}

/// Returns the scalar value stored under `key`, ignoring child objects.
#[must_use]
pub fn scalar<'a>(node: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    match node.get(key) {
        Some(Value::Object(_)) | None => None,
        Some(value) => Some(value),
    }
}

/// Walks a dotted path and returns the value stored at its end.
///
/// The last segment resolves to the scalar first and falls back to the child
/// object, so `search.faceting` yields `1` while `search.faceting.facets`
/// yields the facets object.
#[must_use]
pub fn value_by_path<'a>(root: &'a Map<String, Value>, path: &str) -> Option<&'a Value> {
    let segments: Vec<&str> = path
        .split('.')
        .filter(|segment| !segment.is_empty())
        .collect();
    let (last, parents) = segments.split_last()?;

    let mut node = root;
    for segment in parents {
        node = child(node, segment)?;
    }

    node.get(*last)
        .or_else(|| node.get(&format!("{last}.")))
}

/// Walks a dotted path and returns the object stored at its end.
#[must_use]
pub fn object_by_path<'a>(
    root: &'a Map<String, Value>,
    path: &str,
) -> Option<&'a Map<String, Value>> {
    let mut node = root;
    for segment in path.split('.').filter(|segment| !segment.is_empty()) {
        node = child(node, segment)?;
    }
    Some(node)
}

/// Converts a scalar to its string form (`true` becomes `1`, `false` becomes `0`).
#[must_use]
pub fn as_string(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(true) => Some("1".to_owned()),
        Value::Bool(false) => Some("0".to_owned()),
        _ => None,
    }
}

/// Loose truthiness: empty strings, `"0"`, `0`, `false`, null and empty
/// containers are false, everything else is true.
#[must_use]
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|number| number != 0.0),
        Value::String(text) => !text.is_empty() && text != "0",
        Value::Array(items) => !items.is_empty(),
        Value::Object(entries) => !entries.is_empty(),
    }
}

/// Strict enablement: only `1`, `"1"` and `true` count as enabled.
#[must_use]
pub fn is_strictly_enabled(value: &Value) -> bool {
    match value {
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_i64() == Some(1),
        Value::String(text) => text == "1",
        _ => false,
    }
}

/// Integer conversion following leading-digit semantics (`"10px"` is `10`).
#[must_use]
pub fn as_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().map(truncate_float)),
        Value::Bool(flag) => Some(i64::from(*flag)),
        Value::String(text) => leading_integer(text.trim()),
        _ => None,
    }
}

/// Float conversion for numeric scalars and numeric strings.
#[must_use]
pub fn as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Splits on `delimiter`, trims every part and drops empty parts.
#[must_use]
pub fn trim_explode(input: &str, delimiter: char) -> Vec<String> {
    input
        .split(delimiter)
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Returns the keys of a TypoScript object without the trailing dot, in order,
/// without duplicates (`week` and `week.` collapse into one entry).
#[must_use]
pub fn child_names(node: &Map<String, Value>) -> Vec<String> {
    let mut names: Vec<String> = Vec::with_capacity(node.len());
    for key in node.keys() {
        let name = key.strip_suffix('.').unwrap_or(key);
        if !names.iter().any(|existing| existing == name) {
            names.push(name.to_owned());
        }
    }
    names
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "configuration integers are truncated like the CMS does"
)]
fn truncate_float(value: f64) -> i64 {
    value as i64
}

fn leading_integer(text: &str) -> Option<i64> {
    let mut end = 0;
    for (index, ch) in text.char_indices() {
        let is_sign = index == 0 && (ch == '-' || ch == '+');
        if !(is_sign || ch.is_ascii_digit()) {
            break;
        }
        end = index + ch.len_utf8();
    }
    text.get(..end).and_then(|digits| digits.parse::<i64>().ok())
}
