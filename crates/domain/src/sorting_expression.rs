//! Facet sort clause mapping.

use serde_json::Value;

/// Prefix marking a metric-based JSON facet sort.
pub const METRICS_PREFIX: &str = "metrics_";

/// Maps a configured sort mode to a Solr facet sort clause.
#[derive(Debug, Clone, Copy, Default)]
pub struct SortingExpression;

impl SortingExpression {
    /// Returns `count`, `index` or an empty string when no mode is configured.
    #[must_use]
    pub fn for_facet(sort_mode: &Value) -> String {
        if is_unset(sort_mode) {
            return String::new();
        }
        let by_count = match sort_mode {
            Value::Bool(flag) => *flag,
            Value::Number(number) => number.as_i64() == Some(1),
            Value::String(text) => matches!(text.as_str(), "count" | "1" | "true"),
            _ => false,
        };
        if by_count { "count" } else { "index" }.to_owned()
    }

    /// Sort clause for the JSON facet API, with an optional `asc`/`desc` suffix.
    #[must_use]
    pub fn for_json_facet(sort_mode: &Value, direction: &str) -> String {
        let base = match sort_mode {
            Value::String(text) if text.starts_with(METRICS_PREFIX) => text.clone(),
            other => Self::for_facet(other),
        };
        let direction = direction.trim().to_ascii_lowercase();
        if matches!(direction.as_str(), "asc" | "desc") {
            format!("{base} {direction}")
        } else {
            base
        }
    }
}

fn is_unset(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(text) => text.is_empty(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn count_modes_map_to_count() {
        for mode in [json!("count"), json!(1), json!("1"), json!(true), json!("true")] {
            assert_eq!(SortingExpression::for_facet(&mode), "count", "mode {mode}");
        }
    }

    #[test]
    fn other_modes_map_to_index() {
        for mode in [json!("anything_else"), json!("alpha"), json!(0), json!(false)] {
            assert_eq!(SortingExpression::for_facet(&mode), "index", "mode {mode}");
        }
    }

    #[test]
    fn unset_mode_yields_empty_clause() {
        assert_eq!(SortingExpression::for_facet(&Value::Null), "");
        assert_eq!(SortingExpression::for_facet(&json!("")), "");
    }

    #[test]
    fn metric_modes_are_used_verbatim() {
        assert_eq!(
            SortingExpression::for_json_facet(&json!("metrics_sum(price)"), "DESC"),
            "metrics_sum(price) desc"
        );
        assert_eq!(
            SortingExpression::for_json_facet(&json!("count"), "asc"),
            "count asc"
        );
    }

    #[test]
    fn unknown_directions_are_dropped() {
        assert_eq!(
            SortingExpression::for_json_facet(&json!("index"), "sideways"),
            "index"
        );
        assert_eq!(SortingExpression::for_json_facet(&json!("alpha"), ""), "index");
    }
}
