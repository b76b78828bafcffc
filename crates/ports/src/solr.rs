//! Solr backend boundary contract.

use solr_search_domain::QueryParameters;
use solr_search_shared::Result;
use serde_json::Value;

/// Backend descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolrBackendInfo {
    /// Stable backend identifier (`recorded`, `in-memory`).
    pub id: Box<str>,
    /// Human-readable backend name.
    pub name: Box<str>,
}

/// Executes a built query against a Solr core.
///
/// Implementations return the raw `wt=json` response body; reconciling it
/// into facets and results happens in the application layer.
pub trait SolrSearchPort: Send + Sync {
    /// Backend descriptor.
    fn backend(&self) -> &SolrBackendInfo;

    /// Run a select request with `parameters`.
    fn search(&self, parameters: &QueryParameters) -> Result<Value>;
}
