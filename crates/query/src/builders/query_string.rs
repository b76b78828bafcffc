//! User query (`q`) and paging (`start`, `rows`).

use crate::builder::ParameterBuilder;
use solr_search_config::TypoScriptConfiguration;
use solr_search_domain::{QueryParameters, SearchRequest};

/// Query matching every document.
pub const MATCH_ALL_QUERY: &str = "*:*";

/// The user query; an empty query matches everything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryString {
    query: String,
}

impl QueryString {
    /// Trimmed user query.
    #[must_use]
    pub fn new(query: &str) -> Self {
        Self {
            query: query.trim().to_owned(),
        }
    }

    /// Query of `request`.
    #[must_use]
    pub fn from_request(request: &SearchRequest) -> Self {
        Self::new(&request.raw_user_query().unwrap_or_default())
    }
}

impl ParameterBuilder for QueryString {
    fn name(&self) -> &'static str {
        "queryString"
    }

    fn build(&self, parameters: &mut QueryParameters) {
        if self.query.is_empty() {
            parameters.set("q", MATCH_ALL_QUERY);
        } else {
            parameters.set("q", self.query.as_str());
        }
    }
}

/// Result window of one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paging {
    start: u64,
    rows: u32,
}

impl Paging {
    /// Window of 1-based `page` with `rows` results; page `0` is page `1`.
    #[must_use]
    pub fn new(page: u32, rows: u32) -> Self {
        Self {
            start: u64::from(page.max(1) - 1) * u64::from(rows),
            rows,
        }
    }

    /// Page and page size of `request`, defaulting to the configured size.
    #[must_use]
    pub fn from_request(configuration: &TypoScriptConfiguration, request: &SearchRequest) -> Self {
        let rows = request
            .results_per_page()
            .filter(|rows| *rows > 0)
            .unwrap_or_else(|| configuration.search_results_per_page());
        Self::new(request.page().unwrap_or(1), rows)
    }
}

impl ParameterBuilder for Paging {
    fn name(&self) -> &'static str {
        "paging"
    }

    fn build(&self, parameters: &mut QueryParameters) {
        parameters
            .set("start", self.start.to_string())
            .set("rows", self.rows);
    }
}
