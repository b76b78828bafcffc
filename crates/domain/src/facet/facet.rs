//! Facet entity produced by one reconciliation pass.

use crate::facet::config::{FacetConfiguration, FacetType};
use crate::facet::item_collection::FacetItemCollection;
use serde::ser::{Serialize, SerializeStruct, Serializer};

/// A facet with its reconciled items.
#[derive(Debug, Clone, PartialEq)]
pub struct Facet {
    configuration: FacetConfiguration,
    items: FacetItemCollection,
    all_requirements_met: bool,
}

impl Facet {
    /// Create a facet with its items. Requirements count as met until evaluated.
    #[must_use]
    pub fn new(configuration: FacetConfiguration, items: FacetItemCollection) -> Self {
        Self {
            configuration,
            items,
            all_requirements_met: true,
        }
    }

    /// Facet name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.configuration.name
    }

    /// Solr field.
    #[must_use]
    pub fn field(&self) -> &str {
        &self.configuration.field
    }

    /// Display label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.configuration.label
    }

    /// Resolved type.
    #[must_use]
    pub const fn facet_type(&self) -> FacetType {
        self.configuration.facet_type()
    }

    /// Full configuration.
    #[must_use]
    pub const fn configuration(&self) -> &FacetConfiguration {
        &self.configuration
    }

    /// Reconciled items.
    #[must_use]
    pub const fn items(&self) -> &FacetItemCollection {
        &self.items
    }

    /// Values of the selected items.
    #[must_use]
    pub fn selected_values(&self) -> Vec<String> {
        self.items.selected_values()
    }

    /// True when at least one item is selected.
    #[must_use]
    pub fn is_used(&self) -> bool {
        !self.selected_values().is_empty()
    }

    /// True when the facet has items.
    #[must_use]
    pub fn is_available(&self) -> bool {
        !self.items.is_empty()
    }

    /// Outcome of the last requirements evaluation.
    #[must_use]
    pub const fn all_requirements_met(&self) -> bool {
        self.all_requirements_met
    }

    /// Record the requirements evaluation outcome.
    pub fn set_all_requirements_met(&mut self, met: bool) {
        self.all_requirements_met = met;
    }
}

impl Serialize for Facet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Facet", 9)?;
        state.serialize_field("name", self.name())?;
        state.serialize_field("field", self.field())?;
        state.serialize_field("label", self.label())?;
        state.serialize_field("type", &self.facet_type())?;
        state.serialize_field("groupName", &self.configuration.settings.group_name)?;
        state.serialize_field("isUsed", &self.is_used())?;
        state.serialize_field("isAvailable", &self.is_available())?;
        state.serialize_field("allRequirementsMet", &self.all_requirements_met)?;
        state.serialize_field("items", &self.items)?;
        state.end()
    }
}
