//! Facet type registry.
//!
//! Maps configured type names to the closed set of [`FacetType`]s. The
//! registry is built once and shared read-only; extra names are registered
//! on the builder before construction.

use crate::facet::config::{FacetConfigurationError, FacetType};
use std::collections::BTreeMap;

/// Immutable mapping from type names to facet types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacetRegistry {
    aliases: BTreeMap<String, FacetType>,
    default_type: FacetType,
}

impl Default for FacetRegistry {
    fn default() -> Self {
        Self {
            aliases: BTreeMap::new(),
            default_type: FacetType::Options,
        }
    }
}

impl FacetRegistry {
    /// Start a registry builder.
    #[must_use]
    pub fn builder() -> FacetRegistryBuilder {
        FacetRegistryBuilder::default()
    }

    /// Resolve a configured type name. Missing or unknown names fall back to
    /// the default type.
    #[must_use]
    pub fn resolve(&self, type_name: Option<&str>) -> FacetType {
        let Some(type_name) = type_name.map(str::trim).filter(|name| !name.is_empty()) else {
            return self.default_type;
        };
        FacetType::parse(type_name)
            .or_else(|| self.aliases.get(type_name).copied())
            .unwrap_or(self.default_type)
    }

    /// Returns true when `type_name` is built in or registered.
    #[must_use]
    pub fn is_known(&self, type_name: &str) -> bool {
        FacetType::parse(type_name).is_some() || self.aliases.contains_key(type_name)
    }

    /// Fallback type.
    #[must_use]
    pub const fn default_type(&self) -> FacetType {
        self.default_type
    }

    /// Registered aliases in name order.
    pub fn aliases(&self) -> impl Iterator<Item = (&str, FacetType)> {
        self.aliases.iter().map(|(name, kind)| (name.as_str(), *kind))
    }
}

/// Builder for [`FacetRegistry`].
#[derive(Debug, Clone, Default)]
pub struct FacetRegistryBuilder {
    registry: FacetRegistry,
}

impl FacetRegistryBuilder {
    /// Register `name` as an alias of `facet_type`. Built-in names cannot be
    /// re-registered.
    pub fn register(
        mut self,
        name: impl Into<String>,
        facet_type: FacetType,
    ) -> Result<Self, FacetConfigurationError> {
        let name = name.into();
        if FacetType::parse(&name).is_some() {
            return Err(FacetConfigurationError::ReservedTypeName { name });
        }
        self.registry.aliases.insert(name, facet_type);
        Ok(self)
    }

    /// Change the fallback type.
    #[must_use]
    pub fn default_type(mut self, facet_type: FacetType) -> Self {
        self.registry.default_type = facet_type;
        self
    }

    /// Finish the registry.
    #[must_use]
    pub fn build(self) -> FacetRegistry {
        self.registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn unknown_and_missing_types_resolve_to_options() {
        let registry = FacetRegistry::default();
        assert_eq!(registry.resolve(None), FacetType::Options);
        assert_eq!(registry.resolve(Some("")), FacetType::Options);
        assert_eq!(registry.resolve(Some("tagCloud")), FacetType::Options);
        assert_eq!(registry.resolve(Some("dateRange")), FacetType::DateRange);
    }

    #[test]
    fn aliases_resolve_to_their_types() -> Result<(), Box<dyn Error>> {
        let registry = FacetRegistry::builder()
            .register("tree", FacetType::Hierarchy)?
            .default_type(FacetType::QueryGroup)
            .build();

        assert_eq!(registry.resolve(Some("tree")), FacetType::Hierarchy);
        assert_eq!(registry.resolve(Some("unknown")), FacetType::QueryGroup);
        assert!(registry.is_known("tree"));
        assert!(!registry.is_known("unknown"));
        Ok(())
    }

    #[test]
    fn built_in_names_are_reserved() {
        let result = FacetRegistry::builder().register("options", FacetType::Hierarchy);
        assert!(matches!(
            result,
            Err(FacetConfigurationError::ReservedTypeName { name }) if name == "options"
        ));
    }

    #[test]
    fn registry_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<std::sync::Arc<FacetRegistry>>();
    }
}
