//! Field collapsing (`{!collapse}` filter plus optional `expand`).

use crate::builder::ParameterBuilder;
use solr_search_config::TypoScriptConfiguration;
use solr_search_domain::QueryParameters;

/// Named filter query carrying the collapse expression.
pub const COLLAPSE_FILTER_NAME: &str = "fieldCollapsing";
/// Default `search.variants.variantField`.
pub const DEFAULT_VARIANT_FIELD: &str = "variantId";
/// Default `search.variants.limit`.
pub const DEFAULT_EXPAND_ROWS: i64 = 10;

/// Collapse documents sharing a field value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldCollapsing {
    enabled: bool,
    field: String,
    expand: bool,
    expand_rows: i64,
}

impl Default for FieldCollapsing {
    fn default() -> Self {
        Self {
            enabled: false,
            field: DEFAULT_VARIANT_FIELD.to_owned(),
            expand: false,
            expand_rows: DEFAULT_EXPAND_ROWS,
        }
    }
}

impl FieldCollapsing {
    /// Collapse on `field`.
    #[must_use]
    pub fn new(field: &str) -> Self {
        Self {
            enabled: true,
            field: field.to_owned(),
            ..Self::default()
        }
    }

    /// Also expand collapsed groups with up to `rows` documents.
    #[must_use]
    pub const fn with_expand(mut self, rows: i64) -> Self {
        self.expand = true;
        self.expand_rows = rows;
        self
    }

    /// Read `search.variants`.
    #[must_use]
    pub fn from_configuration(configuration: &TypoScriptConfiguration) -> Self {
        if !configuration.bool_by_path("search.variants", false) {
            return Self::default();
        }
        let field = configuration
            .non_empty_string_by_path("search.variants.variantField")
            .unwrap_or_else(|| DEFAULT_VARIANT_FIELD.to_owned());
        let collapsing = Self::new(&field);
        if configuration.bool_by_path("search.variants.expand", false) {
            collapsing.with_expand(configuration.int_by_path("search.variants.limit", DEFAULT_EXPAND_ROWS))
        } else {
            collapsing
        }
    }
}

impl ParameterBuilder for FieldCollapsing {
    fn name(&self) -> &'static str {
        "fieldCollapsing"
    }

    fn build(&self, parameters: &mut QueryParameters) {
        if !self.enabled {
            parameters.remove_filter(COLLAPSE_FILTER_NAME);
            parameters.remove("expand");
            parameters.remove("expand.rows");
            return;
        }
        parameters.add_filter(
            COLLAPSE_FILTER_NAME,
            format!("{{!collapse field={}}}", self.field),
        );
        if self.expand {
            parameters
                .set("expand", true)
                .set("expand.rows", self.expand_rows);
        } else {
            parameters.remove("expand");
            parameters.remove("expand.rows");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn collapse_filter_uses_local_params_syntax() {
        let configuration = TypoScriptConfiguration::from_value(json!({
            "search.": { "variants": 1, "variants.": { "expand": 1, "limit": 3 } }
        }));
        let mut parameters = QueryParameters::new();
        FieldCollapsing::from_configuration(&configuration).build(&mut parameters);

        assert_eq!(
            parameters.filter(COLLAPSE_FILTER_NAME),
            Some("{!collapse field=variantId}")
        );
        assert_eq!(parameters.get_str("expand"), Some("true"));
        assert_eq!(parameters.get_str("expand.rows"), Some("3"));
    }

    #[test]
    fn disabled_collapsing_removes_filter_and_expand() {
        let mut parameters = QueryParameters::new();
        FieldCollapsing::new("sku").with_expand(5).build(&mut parameters);
        FieldCollapsing::default().build(&mut parameters);

        assert_eq!(parameters.filter(COLLAPSE_FILTER_NAME), None);
        assert!(!parameters.contains("expand"));
        assert!(!parameters.contains("expand.rows"));
    }
}
