//! # solr-search-app
//!
//! Application layer: facet response parsers, the result set
//! reconstitution processor and the search use case.
//!
//! Depends on `domain`, `config`, `query`, `ports` and `shared`; talks to
//! Solr and the logger only through port traits.

/// Per facet type response parsers.
pub mod facets;
/// Raw response to result set view-model.
pub mod reconstitution;
/// Search use case.
pub mod search;

pub use facets::{ParseContext, parse_facet};
pub use reconstitution::ResultSetReconstitutionProcessor;
pub use search::{SearchDeps, search};

/// Returns the app crate version.
#[must_use]
pub const fn app_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
