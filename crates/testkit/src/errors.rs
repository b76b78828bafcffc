//! Test fixtures for shared error codes and envelopes.

use solr_search_shared::{ErrorClass, ErrorCode, ErrorEnvelope};

/// Error codes raised across the workspace.
pub fn common_error_codes() -> Vec<ErrorCode> {
    vec![
        ErrorCode::new("config", "unsupported_format"),
        ErrorCode::new("config", "parse"),
        ErrorCode::new("query", "invalid_argument"),
        ErrorCode::new("facet", "missing_field"),
        ErrorCode::new("facet", "unknown_requirement_facet"),
        ErrorCode::io(),
        ErrorCode::internal(),
    ]
}

/// A retriable backend failure, as a transport adapter would report it.
pub fn backend_unavailable_error() -> ErrorEnvelope {
    ErrorEnvelope::unexpected(
        ErrorCode::new("solr", "unavailable"),
        "solr core is not reachable",
        ErrorClass::Retriable,
    )
}

/// An invalid argument error fixture.
pub fn invalid_argument_error() -> ErrorEnvelope {
    ErrorEnvelope::expected(ErrorCode::invalid_argument(), "invalid argument")
}
