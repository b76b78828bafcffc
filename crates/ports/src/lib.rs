//! # solr-search-ports
//!
//! Port traits for the solr-search hexagonal architecture.
//!
//! This crate defines the interfaces between the application layer and its
//! infrastructure: structured logging and the Solr backend. It depends only
//! on `domain` and `shared`.

/// Returns the ports crate version.
#[must_use]
pub const fn ports_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

pub mod logger;
pub mod solr;

pub use logger::*;
pub use solr::*;

// Domain types used in port signatures, so adapters need not depend on
// `solr-search-domain` directly.
pub use solr_search_domain::{ParameterValue, QueryParameters};
