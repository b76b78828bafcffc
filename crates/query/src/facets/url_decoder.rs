//! Active URL values to Solr filter expressions.

use chrono::NaiveDateTime;
use regex::Regex;
use solr_search_domain::{FacetConfiguration, FacetKind};
use std::sync::LazyLock;

/// URL format of date range bounds (`202401310000`).
pub const DATE_RANGE_URL_FORMAT: &str = "%Y%m%d%H%M";

const SOLR_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

static NUMERIC_RANGE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"^(-?\d+(?:\.\d+)?)-(-?\d+(?:\.\d+)?)$").ok()
});

/// Decode an active URL `value` of `facet` into the filter expression that
/// follows `<field>:`. Malformed values yield `None`.
#[must_use]
pub fn decode_url_value(facet: &FacetConfiguration, value: &str) -> Option<String> {
    match &facet.kind {
        FacetKind::Options { .. } => Some(quoted(value)),
        FacetKind::Hierarchy => decode_hierarchy(value),
        FacetKind::QueryGroup { groups } => groups
            .iter()
            .find(|group| group.name == value)
            .map(|group| group.query.clone()),
        FacetKind::DateRange { .. } => decode_date_range(value),
        FacetKind::NumericRange { .. } => decode_numeric_range(value),
    }
}

/// `"value"` with backslashes and quotes escaped.
#[must_use]
pub fn quoted(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len() + 2);
    escaped.push('"');
    for character in value.chars() {
        if matches!(character, '"' | '\\') {
            escaped.push('\\');
        }
        escaped.push(character);
    }
    escaped.push('"');
    escaped
}

/// `/News/Sports/` becomes `"1-/News/Sports/"` (depth prefixed).
fn decode_hierarchy(value: &str) -> Option<String> {
    let path = value.trim();
    let segments = path.trim_matches('/').split('/').filter(|segment| !segment.is_empty()).count();
    if segments == 0 {
        return None;
    }
    let path = if path.ends_with('/') {
        path.to_owned()
    } else {
        format!("{path}/")
    };
    let path = if path.starts_with('/') {
        path
    } else {
        format!("/{path}")
    };
    Some(quoted(&format!("{}-{path}", segments - 1)))
}

/// `YYYYMMDDHHMM-YYYYMMDDHHMM` becomes `[start TO end]`, the end extended to
/// the last second of its minute.
fn decode_date_range(value: &str) -> Option<String> {
    let (start, end) = value.trim().split_once('-')?;
    let start = NaiveDateTime::parse_from_str(start, DATE_RANGE_URL_FORMAT).ok()?;
    let end = NaiveDateTime::parse_from_str(&format!("{end}59"), &format!("{DATE_RANGE_URL_FORMAT}%S")).ok()?;
    Some(format!(
        "[{} TO {}]",
        start.format(SOLR_DATE_FORMAT),
        end.format(SOLR_DATE_FORMAT)
    ))
}

/// `min-max` becomes `[min TO max]`; negative bounds are allowed.
fn decode_numeric_range(value: &str) -> Option<String> {
    let captures = NUMERIC_RANGE.as_ref()?.captures(value.trim())?;
    let start = captures.get(1)?.as_str();
    let end = captures.get(2)?.as_str();
    Some(format!("[{start} TO {end}]"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};
    use solr_search_domain::FacetType;
    use std::error::Error;

    fn facet(node: Value, facet_type: FacetType) -> Result<FacetConfiguration, Box<dyn Error>> {
        let Value::Object(node) = node else {
            return Err("fixture is not an object".into());
        };
        Ok(FacetConfiguration::from_node("facet", &node, facet_type)?)
    }

    fn options() -> Result<FacetConfiguration, Box<dyn Error>> {
        facet(json!({ "field": "type" }), FacetType::Options)
    }

    #[test]
    fn options_values_are_quoted_and_escaped() -> Result<(), Box<dyn Error>> {
        assert_eq!(
            decode_url_value(&options()?, r#"say "hi"\now"#).as_deref(),
            Some(r#""say \"hi\"\\now""#)
        );
        Ok(())
    }

    #[test]
    fn hierarchy_values_get_depth_prefix() -> Result<(), Box<dyn Error>> {
        let hierarchy = facet(json!({ "field": "category" }), FacetType::Hierarchy)?;
        assert_eq!(
            decode_url_value(&hierarchy, "/News/Sports/").as_deref(),
            Some("\"1-/News/Sports/\"")
        );
        assert_eq!(decode_url_value(&hierarchy, "News").as_deref(), Some("\"0-/News/\""));
        assert_eq!(decode_url_value(&hierarchy, "/"), None);
        Ok(())
    }

    #[test]
    fn query_group_values_map_to_configured_query() -> Result<(), Box<dyn Error>> {
        let group = facet(
            json!({ "field": "created", "queryGroup.": { "week.": { "query": "[NOW/DAY-7DAYS TO *]" } } }),
            FacetType::QueryGroup,
        )?;
        assert_eq!(
            decode_url_value(&group, "week").as_deref(),
            Some("[NOW/DAY-7DAYS TO *]")
        );
        assert_eq!(decode_url_value(&group, "month"), None);
        Ok(())
    }

    #[test]
    fn date_ranges_become_iso_windows() -> Result<(), Box<dyn Error>> {
        let dates = facet(json!({ "field": "created" }), FacetType::DateRange)?;
        assert_eq!(
            decode_url_value(&dates, "202401010000-202401312359").as_deref(),
            Some("[2024-01-01T00:00:00Z TO 2024-01-31T23:59:59Z]")
        );
        assert_eq!(decode_url_value(&dates, "yesterday-today"), None);
        assert_eq!(decode_url_value(&dates, "202401010000"), None);
        Ok(())
    }

    #[test]
    fn numeric_ranges_accept_negative_bounds() -> Result<(), Box<dyn Error>> {
        let numbers = facet(json!({ "field": "price" }), FacetType::NumericRange)?;
        assert_eq!(decode_url_value(&numbers, "-10-20.5").as_deref(), Some("[-10 TO 20.5]"));
        assert_eq!(decode_url_value(&numbers, "10-"), None);
        Ok(())
    }
}
