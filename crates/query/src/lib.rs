//! # solr-search-query
//!
//! Solr parameter builders and the [`QueryBuilder`] pipeline.
//!
//! Every builder implements [`ParameterBuilder`] and owns a set of
//! parameters: enabled builders set them, disabled ones remove them.
//! Facet types contribute their own query parameters and decode active URL
//! values into filter queries (see [`facets`]).

/// Parameter builder contract.
pub mod builder;
/// Concrete builders.
pub mod builders;
/// Query building errors.
pub mod error;
/// Facet query builders and URL value decoders.
pub mod facets;
/// Ordered builder pipeline.
pub mod query_builder;

pub use builder::ParameterBuilder;
pub use builders::{
    DebugQuery, Elevation, Faceting, FieldCollapsing, FieldList, FieldListBuilder, FieldListKind,
    Filters, Grouping, Highlighting, JSON_FACET_PARAMETER, Operator, Paging, QueryString,
    ReturnFields, Slops, Sorting, Sortings, Spellchecking,
};
pub use builders::sorting::RELEVANCE_FIELD;
pub use error::QueryError;
pub use facets::{FACET_FILTER_PREFIX, FacetFilters, FacetParameters, FacetQueryContext, decode_url_value};
pub use query_builder::QueryBuilder;

/// Returns the query crate version.
#[must_use]
pub const fn query_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
