//! # solr-search-domain
//!
//! Domain model for building Solr searches and reconciling their facets.
//!
//! - **Parameters** - `QueryParameters`, `ParameterValue`
//! - **Facets** - `Facet`, `FacetItem`, collections, configuration and registry
//! - **Requirements** - `RequirementsService` gating facet visibility
//! - **Request** - `SearchRequest`, `UrlFacetContainer`
//! - **Results** - `SearchResultSet`, `ResultSorting`, `SortingExpression`
//!
//! ## Dependency Rules
//!
//! - Depends only on `shared` crate
//! - No infrastructure or adapter dependencies
//! - Pure domain logic with no I/O

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub use solr_search_shared::shared_crate_version;

// =============================================================================
// DOMAIN MODULES
// =============================================================================

pub mod facet;
pub mod params;
pub mod requirements;
pub mod result_set;
pub mod search_request;
pub mod sorting;
pub mod sorting_expression;
pub mod typoscript;
pub mod url_facet_container;

pub use facet::{
    DEFAULT_GROUP_NAME, Facet, FacetCollection, FacetConfiguration, FacetConfigurationError,
    FacetItem, FacetItemCollection, FacetItemDetail, FacetKind, FacetOperator, FacetRegistry,
    FacetRegistryBuilder, FacetSettings, FacetType, QueryGroupDefinition, RangeSettings,
    Requirement,
};
pub use params::{ParameterValue, QueryParameters};
pub use requirements::{ANY_SELECTED, NONE_SELECTED, RequirementError, RequirementsService};
pub use result_set::{SearchResultSet, SpellingSuggestion};
pub use search_request::{DEFAULT_ARGUMENTS_NAMESPACE, SearchRequest};
pub use sorting::{ResultSorting, SortDirection};
pub use sorting_expression::SortingExpression;
pub use url_facet_container::{ParameterStyle, UrlFacetContainer};

/// Returns the domain crate version.
#[must_use]
pub const fn domain_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
