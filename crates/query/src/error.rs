//! Query building errors.

use solr_search_shared::{ErrorCode, ErrorEnvelope};
use std::fmt;

/// Invalid builder arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// Operator other than `AND`/`OR`.
    InvalidOperator {
        /// Rejected literal.
        value: String,
    },
    /// Sort direction other than `asc`/`desc`.
    InvalidSortDirection {
        /// Rejected literal.
        value: String,
    },
    /// A structured `json.facet` could not be encoded.
    JsonFacetEncoding {
        /// Encoder message.
        message: String,
    },
}

impl QueryError {
    fn error_code(&self) -> ErrorCode {
        match self {
            Self::InvalidOperator { .. } | Self::InvalidSortDirection { .. } => {
                ErrorCode::new("query", "invalid_argument")
            },
            Self::JsonFacetEncoding { .. } => ErrorCode::new("query", "json_facet_encoding"),
        }
    }
}

impl fmt::Display for QueryError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidOperator { value } => {
                write!(formatter, "invalid query operator `{value}`; expected AND or OR")
            },
            Self::InvalidSortDirection { value } => {
                write!(formatter, "invalid sort direction `{value}`; expected asc or desc")
            },
            Self::JsonFacetEncoding { message } => {
                write!(formatter, "failed to encode json.facet: {message}")
            },
        }
    }
}

impl std::error::Error for QueryError {}

impl From<QueryError> for ErrorEnvelope {
    fn from(error: QueryError) -> Self {
        let envelope = Self::expected(error.error_code(), error.to_string());
        match error {
            QueryError::InvalidOperator { value } => envelope
                .with_metadata("argument", "operator")
                .with_metadata("value", value),
            QueryError::InvalidSortDirection { value } => envelope
                .with_metadata("argument", "sortDirection")
                .with_metadata("value", value),
            QueryError::JsonFacetEncoding { .. } => envelope.with_metadata("parameter", "json.facet"),
        }
    }
}
