//! Search use case: build parameters, query Solr, reconcile the response.

use crate::reconstitution::ResultSetReconstitutionProcessor;
use serde_json::Value;
use solr_search_config::TypoScriptConfiguration;
use solr_search_domain::{FacetRegistry, SearchRequest, SearchResultSet};
use solr_search_ports::{LogFields, LoggerPort, SolrSearchPort, log_fields};
use solr_search_query::QueryBuilder;
use solr_search_shared::Result;
use std::sync::Arc;
use std::time::Instant;

/// Dependencies required by search.
#[derive(Clone)]
pub struct SearchDeps {
    /// Effective search configuration.
    pub configuration: Arc<TypoScriptConfiguration>,
    /// Facet type registry shared by query building and reconciliation.
    pub registry: Arc<FacetRegistry>,
    /// Solr backend.
    pub solr: Arc<dyn SolrSearchPort>,
    /// Optional logger.
    pub logger: Option<Arc<dyn LoggerPort>>,
}

/// Run one search for `request`.
///
/// Without a query the search only runs when `search.initializeWithEmptyQuery`
/// is set; a blank query also runs with `search.query.allowEmptyQuery`.
/// Otherwise the returned result set has `has_searched == false`.
pub fn search(deps: &SearchDeps, request: SearchRequest) -> Result<SearchResultSet> {
    let started_at = Instant::now();
    let fields = log_fields_start(&request);
    if let Some(logger) = deps.logger.as_ref() {
        logger.info("search.start", "Search started", Some(fields.clone()));
    }

    match run_search(deps, request, started_at) {
        Ok(result_set) => Ok(result_set),
        Err(error) => {
            if let Some(logger) = deps.logger.as_ref() {
                let mut fields = fields;
                fields.insert("durationMs".into(), Value::from(duration_ms(started_at)));
                logger.error("search.failed", "Search failed", &error, Some(fields));
            }
            Err(error)
        },
    }
}

fn run_search(deps: &SearchDeps, request: SearchRequest, started_at: Instant) -> Result<SearchResultSet> {
    let configuration = deps.configuration.as_ref();
    if !should_search(configuration, &request) {
        let mut result_set = SearchResultSet::new(request, Value::Null);
        result_set.has_searched = false;
        log_completed(deps, &result_set, started_at);
        return Ok(result_set);
    }

    let mut result_set = execute(deps, request)?;
    if should_auto_correct(configuration, &result_set) {
        if let Some(corrected) = auto_correct(deps, &result_set)? {
            result_set = corrected;
        }
    }

    log_reconciled(deps, &result_set);
    log_completed(deps, &result_set, started_at);
    Ok(result_set)
}

fn should_search(configuration: &TypoScriptConfiguration, request: &SearchRequest) -> bool {
    if configuration.search_initialize_with_empty_query() {
        return true;
    }
    match request.raw_user_query() {
        None => false,
        Some(query) if query.trim().is_empty() => configuration.search_query_allow_empty_query(),
        Some(_) => true,
    }
}

fn execute(deps: &SearchDeps, request: SearchRequest) -> Result<SearchResultSet> {
    let builder = QueryBuilder::new(Arc::clone(&deps.configuration), Arc::clone(&deps.registry));
    let parameters = builder.build(&request)?;
    if let Some(logger) = deps.logger.as_ref() {
        logger.debug(
            "search.parameters",
            "Query parameters built",
            Some(log_fields([
                ("backend", Value::from(&*deps.solr.backend().id)),
                ("parameters", Value::from(parameters.to_pairs().len())),
            ])),
        );
    }
    let response = deps.solr.search(&parameters)?;
    ResultSetReconstitutionProcessor::new(Arc::clone(&deps.registry))
        .process(SearchResultSet::new(request, response), &deps.configuration)
}

/// `search.spellchecking.searchUsingSpellCheckerSuggestion` with no hits and
/// at least one suggestion.
fn should_auto_correct(configuration: &TypoScriptConfiguration, result_set: &SearchResultSet) -> bool {
    configuration.bool_by_path("search.spellchecking", false)
        && configuration.bool_by_path("search.spellchecking.searchUsingSpellCheckerSuggestion", false)
        && result_set.num_found == 0
        && result_set.has_spelling_suggestions()
}

/// Search again with the first suggestion; `None` when it changes nothing.
fn auto_correct(deps: &SearchDeps, result_set: &SearchResultSet) -> Result<Option<SearchResultSet>> {
    let initial_query = result_set.used_search_request.raw_user_query().unwrap_or_default();
    let Some(suggestion) = result_set
        .spelling_suggestions
        .first()
        .map(|suggestion| suggestion.suggestion.clone())
        .filter(|suggestion| *suggestion != initial_query)
    else {
        return Ok(None);
    };

    let mut request = result_set.used_search_request.clone();
    request.set_raw_query_string(&suggestion);
    let mut corrected = execute(deps, request)?;
    corrected.is_auto_corrected = true;
    corrected.initial_query = Some(initial_query);
    corrected.corrected_query = Some(suggestion);
    Ok(Some(corrected))
}

fn log_reconciled(deps: &SearchDeps, result_set: &SearchResultSet) {
    if let Some(logger) = deps.logger.as_ref() {
        logger.debug(
            "facets.reconciled",
            "Facets reconciled",
            Some(log_fields([
                ("facets", result_set.facets.len()),
                ("used", result_set.facets.used().len()),
                ("available", result_set.facets.available().len()),
            ])),
        );
    }
}

fn log_completed(deps: &SearchDeps, result_set: &SearchResultSet, started_at: Instant) {
    if let Some(logger) = deps.logger.as_ref() {
        let mut fields = log_fields_start(&result_set.used_search_request);
        fields.insert("hasSearched".into(), Value::from(result_set.has_searched));
        fields.insert("numFound".into(), Value::from(result_set.num_found));
        fields.insert("autoCorrected".into(), Value::from(result_set.is_auto_corrected));
        fields.insert("durationMs".into(), Value::from(duration_ms(started_at)));
        logger.info("search.completed", "Search completed", Some(fields));
    }
}

fn log_fields_start(request: &SearchRequest) -> LogFields {
    log_fields([
        (
            "queryLength",
            Value::from(request.raw_user_query().map_or(0, |query| query.len())),
        ),
        ("activeFacets", Value::from(request.active_facet_count())),
        ("page", Value::from(request.page().unwrap_or(1))),
    ])
}

fn duration_ms(started_at: Instant) -> u64 {
    u64::try_from(started_at.elapsed().as_millis()).unwrap_or(u64::MAX)
}
