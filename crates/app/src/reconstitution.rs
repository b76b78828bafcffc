//! Result set reconstitution: raw Solr response to view-model.

use crate::facets::{ParseContext, parse_facet};
use serde_json::Value;
use solr_search_config::TypoScriptConfiguration;
use solr_search_domain::typoscript::as_string;
use solr_search_domain::{
    FacetCollection, FacetRegistry, RequirementError, RequirementsService, ResultSorting,
    SearchRequest, SearchResultSet, SpellingSuggestion,
};
use solr_search_query::RELEVANCE_FIELD;
use solr_search_shared::Result;
use std::sync::Arc;
use tracing::debug;

/// Fills a [`SearchResultSet`] from its raw response.
#[derive(Debug, Clone)]
pub struct ResultSetReconstitutionProcessor {
    registry: Arc<FacetRegistry>,
}

impl ResultSetReconstitutionProcessor {
    /// Processor resolving facet types through `registry`.
    #[must_use]
    pub const fn new(registry: Arc<FacetRegistry>) -> Self {
        Self { registry }
    }

    /// Parse counts, documents, spelling suggestions, sortings and facets.
    ///
    /// Facet requirements are evaluated against every parsed facet before
    /// empty facets are dropped, so a facet may require one declared after
    /// it, or one that is dropped afterwards for having no items. A
    /// requirement naming an unconfigured facet fails the whole pass.
    pub fn process(
        &self,
        mut result_set: SearchResultSet,
        configuration: &TypoScriptConfiguration,
    ) -> Result<SearchResultSet> {
        let response = &result_set.response;
        let request = &result_set.used_search_request;

        let num_found = response
            .pointer("/response/numFound")
            .and_then(Value::as_u64)
            .unwrap_or(0);
        let max_score = response.pointer("/response/maxScore").and_then(Value::as_f64);
        let documents = response
            .pointer("/response/docs")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();
        let spelling_suggestions = spelling_suggestions(response);
        let sortings = result_sortings(configuration, request);
        let page = request.page().unwrap_or(1);
        let results_per_page = request
            .results_per_page()
            .unwrap_or_else(|| configuration.search_results_per_page());
        let facets = if configuration.search_faceting() {
            self.reconcile_facets(configuration, response, request)?
        } else {
            FacetCollection::new()
        };

        result_set.num_found = num_found;
        result_set.max_score = max_score;
        result_set.documents = documents;
        result_set.spelling_suggestions = spelling_suggestions;
        result_set.sortings = sortings;
        result_set.page = page;
        result_set.results_per_page = results_per_page;
        result_set.facets = facets;
        Ok(result_set)
    }

    fn reconcile_facets(
        &self,
        configuration: &TypoScriptConfiguration,
        response: &Value,
        request: &SearchRequest,
    ) -> Result<FacetCollection> {
        let context = ParseContext::new(
            response,
            request,
            configuration.search_faceting_minimum_count(),
        );
        let mut facets = FacetCollection::new();
        for facet in configuration.search_faceting_facet_configurations(&self.registry)? {
            facets.add(parse_facet(facet, &context));
        }

        let outcomes = facets
            .iter()
            .map(|facet| {
                RequirementsService::all_requirements_met(facet, &facets)
                    .map(|met| (facet.name().to_owned(), met))
            })
            .collect::<std::result::Result<Vec<_>, RequirementError>>()?;
        for (name, met) in outcomes {
            if let Some(facet) = facets.get_mut(&name) {
                facet.set_all_requirements_met(met);
            }
        }

        let show_empty_facets = configuration.search_faceting_show_empty_facets();
        let parsed = facets.len();
        facets.retain(|facet| {
            show_empty_facets
                || facet.configuration().settings.show_even_when_empty
                || facet.is_available()
        });
        debug!(parsed, kept = facets.len(), "facets reconciled");
        Ok(facets)
    }
}

/// Collations of `spellcheck.collations`, flat (`["collation", {...}]`) or
/// as a map, with or without extended results.
fn spelling_suggestions(response: &Value) -> Vec<SpellingSuggestion> {
    let entries: Vec<&Value> = match response.pointer("/spellcheck/collations") {
        Some(Value::Array(entries)) => entries
            .iter()
            .filter(|entry| entry.as_str() != Some("collation"))
            .collect(),
        Some(Value::Object(entries)) => entries.values().collect(),
        _ => Vec::new(),
    };
    entries
        .into_iter()
        .filter_map(|entry| match entry {
            Value::String(query) => Some(SpellingSuggestion {
                suggestion: query.clone(),
                num_found: 0,
            }),
            Value::Object(collation) => Some(SpellingSuggestion {
                suggestion: collation.get("collationQuery").and_then(as_string)?,
                num_found: collation.get("hits").and_then(Value::as_u64).unwrap_or(0),
            }),
            _ => None,
        })
        .collect()
}

/// Configured sorting options with the active one marked.
fn result_sortings(configuration: &TypoScriptConfiguration, request: &SearchRequest) -> Vec<ResultSorting> {
    if !configuration.search_sorting() {
        return Vec::new();
    }
    let active = request.sorting_name();
    configuration
        .search_sorting_options()
        .into_iter()
        .map(|option| {
            let selected = active.as_deref() == Some(option.name.as_str());
            let direction = if selected {
                request.sorting_direction().unwrap_or(option.default_direction)
            } else {
                option.default_direction
            };
            ResultSorting {
                is_reset_option: option.field == RELEVANCE_FIELD,
                name: option.name,
                field: option.field,
                label: option.label,
                direction,
                selected,
            }
        })
        .collect()
}
