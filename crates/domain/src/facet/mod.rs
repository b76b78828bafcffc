//! Facet model: configuration, items, collections and the type registry.

pub mod collection;
pub mod config;
#[expect(
    clippy::module_inception,
    reason = "the facet entity lives next to its collections"
)]
pub mod facet;
pub mod item;
pub mod item_collection;
pub mod registry;

pub use collection::FacetCollection;
pub use config::{
    DEFAULT_GROUP_NAME, FacetConfiguration, FacetConfigurationError, FacetKind, FacetOperator,
    FacetSettings, FacetType, QueryGroupDefinition, RangeSettings, Requirement,
};
pub use facet::Facet;
pub use item::{FacetItem, FacetItemDetail};
pub use item_collection::FacetItemCollection;
pub use registry::{FacetRegistry, FacetRegistryBuilder};
