//! Reconciled search result view-model.

use crate::facet::FacetCollection;
use crate::search_request::SearchRequest;
use crate::sorting::ResultSorting;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Spellchecker collation offered to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpellingSuggestion {
    /// Suggested query.
    pub suggestion: String,
    /// Hits the suggested query would return.
    pub num_found: u64,
}

/// Outcome of one search, filled by the reconstitution processor.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResultSet {
    /// Request the search was run for.
    #[serde(skip)]
    pub used_search_request: SearchRequest,
    /// Raw response.
    #[serde(skip)]
    pub response: Value,
    /// Whether a search was executed.
    pub has_searched: bool,
    /// Whether the query was replaced by a spelling suggestion.
    pub is_auto_corrected: bool,
    /// Query before auto correction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_query: Option<String>,
    /// Query after auto correction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub corrected_query: Option<String>,
    /// Total hits.
    pub num_found: u64,
    /// Highest score, when scores were requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_score: Option<f64>,
    /// Page that was requested.
    pub page: u32,
    /// Results per page that were requested.
    pub results_per_page: u32,
    /// Result documents.
    pub documents: Vec<Value>,
    /// Reconciled facets.
    pub facets: FacetCollection,
    /// Sorting options.
    pub sortings: Vec<ResultSorting>,
    /// Spelling suggestions.
    pub spelling_suggestions: Vec<SpellingSuggestion>,
}

impl SearchResultSet {
    /// Create a result set for `request` and its raw `response`.
    #[must_use]
    pub fn new(request: SearchRequest, response: Value) -> Self {
        Self {
            used_search_request: request,
            response,
            has_searched: true,
            page: 1,
            ..Self::default()
        }
    }

    /// True when spelling suggestions are available.
    #[must_use]
    pub fn has_spelling_suggestions(&self) -> bool {
        !self.spelling_suggestions.is_empty()
    }

    /// Active sorting option, if any.
    #[must_use]
    pub fn selected_sorting(&self) -> Option<&ResultSorting> {
        self.sortings.iter().find(|sorting| sorting.selected)
    }

    /// Number of pages for the configured page size.
    #[must_use]
    pub fn page_count(&self) -> u64 {
        if self.results_per_page == 0 {
            return 0;
        }
        self.num_found.div_ceil(u64::from(self.results_per_page))
    }
}
