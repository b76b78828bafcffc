//! Filter queries for the active facet values of a request.

use super::url_decoder::decode_url_value;
use crate::builder::ParameterBuilder;
use solr_search_domain::{FacetConfiguration, FacetOperator, QueryParameters, SearchRequest};
use tracing::{debug, warn};

/// Prefix of the named filter queries owned by [`FacetFilters`].
pub const FACET_FILTER_PREFIX: &str = "facet:";

/// One combined filter per active facet, named `facet:<facetName>`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FacetFilters {
    filters: Vec<(String, String)>,
}

impl FacetFilters {
    /// Build the filters for the active facets of `request`.
    ///
    /// Values of one facet are combined with its operator and tagged with the
    /// facet field when options are kept on selection. Unconfigured facet
    /// names and undecodable values are skipped.
    #[must_use]
    pub fn from_request(
        facets: &[FacetConfiguration],
        request: &SearchRequest,
        keep_all_facets_on_selection: bool,
    ) -> Self {
        let mut filters = Vec::new();
        for name in request.active_facet_names() {
            let Some(facet) = facets.iter().find(|facet| facet.name == name) else {
                debug!(facet = %name, "ignoring active value of unconfigured facet");
                continue;
            };
            let parts: Vec<String> = request
                .active_facet_values_by_name(&name)
                .iter()
                .filter_map(|value| {
                    let decoded = decode_url_value(facet, value);
                    if decoded.is_none() {
                        warn!(facet = %name, value = %value, "skipping malformed facet value");
                    }
                    decoded.map(|expression| format!("{}:{expression}", facet.field))
                })
                .collect();
            if parts.is_empty() {
                continue;
            }

            let separator = match facet.settings.operator {
                FacetOperator::And => " AND ",
                FacetOperator::Or => " OR ",
            };
            let tag = if keep_all_facets_on_selection || facet.settings.keep_all_options_on_selection {
                format!("{{!tag={}}}", facet.field)
            } else {
                String::new()
            };
            filters.push((
                format!("{FACET_FILTER_PREFIX}{name}"),
                format!("{tag}({})", parts.join(separator)),
            ));
        }
        Self { filters }
    }

    /// Named filters in request order.
    #[must_use]
    pub fn filters(&self) -> &[(String, String)] {
        &self.filters
    }
}

impl ParameterBuilder for FacetFilters {
    fn name(&self) -> &'static str {
        "facetFilters"
    }

    fn build(&self, parameters: &mut QueryParameters) {
        parameters.remove_filters_where(|name| name.starts_with(FACET_FILTER_PREFIX));
        for (name, query) in &self.filters {
            parameters.add_filter(name.as_str(), query.as_str());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};
    use solr_search_domain::{FacetType, ParameterStyle};
    use std::error::Error;

    fn facet(name: &str, node: Value, facet_type: FacetType) -> Result<FacetConfiguration, Box<dyn Error>> {
        let Value::Object(node) = node else {
            return Err("fixture is not an object".into());
        };
        Ok(FacetConfiguration::from_node(name, &node, facet_type)?)
    }

    fn request(filter: Value) -> SearchRequest {
        SearchRequest::from_value(
            json!({ "tx_solr": { "filter": filter } }),
            "tx_solr",
            ParameterStyle::Index,
        )
    }

    #[test]
    fn values_combine_with_facet_operator() -> Result<(), Box<dyn Error>> {
        let facets = vec![
            facet("type", json!({ "field": "type", "operator": "OR", "keepAllOptionsOnSelection": 1 }), FacetType::Options)?,
            facet("price", json!({ "field": "price_f" }), FacetType::NumericRange)?,
        ];
        let filters = FacetFilters::from_request(
            &facets,
            &request(json!(["type:pages", "type:news", "price:0-10", "unknown:x"])),
            false,
        );

        assert_eq!(
            filters.filters(),
            &[
                (
                    "facet:type".to_owned(),
                    "{!tag=type}(type:\"pages\" OR type:\"news\")".to_owned()
                ),
                ("facet:price".to_owned(), "(price_f:[0 TO 10])".to_owned()),
            ]
        );
        Ok(())
    }

    #[test]
    fn malformed_values_are_skipped() -> Result<(), Box<dyn Error>> {
        let facets = vec![facet("created", json!({ "field": "created" }), FacetType::DateRange)?];
        let filters = FacetFilters::from_request(&facets, &request(json!(["created:soon"])), true);
        assert!(filters.filters().is_empty());
        Ok(())
    }

    #[test]
    fn rebuilding_replaces_previous_facet_filters() -> Result<(), Box<dyn Error>> {
        let facets = vec![facet("type", json!({ "field": "type" }), FacetType::Options)?];
        let mut parameters = QueryParameters::new();
        parameters.add_filter("facet:color", "(color:\"red\")");
        parameters.add_filter("site", "siteHash:abc");

        FacetFilters::from_request(&facets, &request(json!(["type:pages"])), false)
            .build(&mut parameters);

        assert_eq!(parameters.filter("facet:color"), None);
        assert_eq!(parameters.filter("site"), Some("siteHash:abc"));
        assert_eq!(parameters.filter("facet:type"), Some("(type:\"pages\")"));
        Ok(())
    }
}
