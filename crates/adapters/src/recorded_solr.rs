//! Solr backend answering from a recorded response file.
//!
//! Used by the CLI to reconcile captured responses offline. Every request
//! receives the same response; the parameters are logged at debug level.

use serde_json::Value;
use solr_search_ports::{QueryParameters, SolrBackendInfo, SolrSearchPort};
use solr_search_shared::{ErrorCode, ErrorEnvelope, Result};
use std::path::Path;
use tracing::debug;

/// Backend serving one recorded Solr JSON response.
#[derive(Debug, Clone)]
pub struct RecordedSolr {
    info: SolrBackendInfo,
    response: Value,
}

impl RecordedSolr {
    /// Backend serving `response`.
    #[must_use]
    pub fn new(response: Value) -> Self {
        Self {
            info: SolrBackendInfo {
                id: "recorded".into(),
                name: "Recorded response".into(),
            },
            response,
        }
    }

    /// Parse a recorded response; it must be a JSON object.
    pub fn from_json(input: &str) -> Result<Self> {
        let response: Value = serde_json::from_str(input).map_err(|error| {
            ErrorEnvelope::expected(invalid_response(), format!("invalid Solr response: {error}"))
        })?;
        if !response.is_object() {
            return Err(ErrorEnvelope::expected(
                invalid_response(),
                "Solr response must be a JSON object",
            ));
        }
        Ok(Self::new(response))
    }

    /// Read and parse a recorded response file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let with_path = |error: ErrorEnvelope| error.with_metadata("path", path.display().to_string());
        let text = std::fs::read_to_string(path)
            .map_err(ErrorEnvelope::from)
            .map_err(with_path)?;
        Self::from_json(&text).map_err(with_path)
    }
}

fn invalid_response() -> ErrorCode {
    ErrorCode::new("solr", "invalid_response")
}

impl SolrSearchPort for RecordedSolr {
    fn backend(&self) -> &SolrBackendInfo {
        &self.info
    }

    fn search(&self, parameters: &QueryParameters) -> Result<Value> {
        debug!(parameters = parameters.to_pairs().len(), "serving recorded response");
        Ok(self.response.clone())
    }
}
