//! Ordered facet collection keyed by facet name.

use crate::facet::facet::Facet;
use serde::Serialize;

/// Facets in configuration order, keyed by unique name.
///
/// Every filter returns a new collection; the source is never modified.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FacetCollection {
    facets: Vec<Facet>,
}

impl FacetCollection {
    /// Create an empty collection.
    #[must_use]
    pub const fn new() -> Self {
        Self { facets: Vec::new() }
    }

    /// Add a facet, replacing an existing facet with the same name in place.
    pub fn add(&mut self, facet: Facet) {
        if let Some(existing) = self
            .facets
            .iter_mut()
            .find(|existing| existing.name() == facet.name())
        {
            *existing = facet;
        } else {
            self.facets.push(facet);
        }
    }

    /// Returns the facet named `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Facet> {
        self.facets.iter().find(|facet| facet.name() == name)
    }

    /// Returns the mutable facet named `name`.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Facet> {
        self.facets.iter_mut().find(|facet| facet.name() == name)
    }

    /// Returns the facet at `position` (0-based, insertion order).
    #[must_use]
    pub fn by_position(&self, position: usize) -> Option<&Facet> {
        self.facets.get(position)
    }

    /// Copy holding only the facet named `name`.
    #[must_use]
    pub fn by_name(&self, name: &str) -> Self {
        self.filtered(|facet| facet.name() == name)
    }

    /// Copy holding the facets of rendering group `group_name`.
    #[must_use]
    pub fn by_group_name(&self, group_name: &str) -> Self {
        self.filtered(|facet| facet.configuration().settings.group_name == group_name)
    }

    /// Copy holding the used facets that count toward used facets.
    #[must_use]
    pub fn used(&self) -> Self {
        self.filtered(|facet| {
            facet.is_used() && facet.configuration().settings.include_in_used_facets
        })
    }

    /// Copy holding the available facets whose requirements are met.
    #[must_use]
    pub fn available(&self) -> Self {
        self.filtered(|facet| {
            facet.is_available()
                && facet.configuration().settings.include_in_available_facets
                && facet.all_requirements_met()
        })
    }

    /// Copy holding the facets matching `predicate`.
    #[must_use]
    pub fn filtered(&self, predicate: impl Fn(&Facet) -> bool) -> Self {
        Self {
            facets: self
                .facets
                .iter()
                .filter(|facet| predicate(facet))
                .cloned()
                .collect(),
        }
    }

    /// Keep only the facets matching `predicate`.
    pub fn retain(&mut self, predicate: impl Fn(&Facet) -> bool) {
        self.facets.retain(|facet| predicate(facet));
    }

    /// Facet names in order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.facets.iter().map(Facet::name).collect()
    }

    /// Number of facets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.facets.len()
    }

    /// Returns true when the collection is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.facets.is_empty()
    }

    /// Iterate facets in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Facet> {
        self.facets.iter()
    }

    /// Iterate facets mutably in order.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Facet> {
        self.facets.iter_mut()
    }
}

impl<'a> IntoIterator for &'a FacetCollection {
    type Item = &'a Facet;
    type IntoIter = std::slice::Iter<'a, Facet>;

    fn into_iter(self) -> Self::IntoIter {
        self.facets.iter()
    }
}

impl FromIterator<Facet> for FacetCollection {
    fn from_iter<I: IntoIterator<Item = Facet>>(iter: I) -> Self {
        let mut collection = Self::new();
        for facet in iter {
            collection.add(facet);
        }
        collection
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facet::config::{FacetConfiguration, FacetType};
    use crate::facet::item::FacetItem;
    use crate::facet::item_collection::FacetItemCollection;
    use serde_json::{Value, json};
    use std::error::Error;

    fn facet(name: &str, node: Value, items: &[(&str, bool)]) -> Result<Facet, Box<dyn Error>> {
        let Value::Object(node) = node else {
            return Err("fixture is not an object".into());
        };
        let configuration = FacetConfiguration::from_node(name, &node, FacetType::Options)?;
        let items: FacetItemCollection = items
            .iter()
            .map(|(value, selected)| FacetItem::option(name, *value, *value, 1, *selected))
            .collect();
        Ok(Facet::new(configuration, items))
    }

    fn collection() -> Result<FacetCollection, Box<dyn Error>> {
        Ok([
            facet("type", json!({ "field": "type" }), &[("pages", true), ("news", false)])?,
            facet(
                "color",
                json!({ "field": "color", "groupName": "style", "includeInUsedFacets": 0 }),
                &[("red", true)],
            )?,
            facet("size", json!({ "field": "size", "groupName": "style" }), &[])?,
        ]
        .into_iter()
        .collect())
    }

    #[test]
    fn positions_follow_insertion_order() -> Result<(), Box<dyn Error>> {
        let facets = collection()?;
        assert_eq!(facets.by_position(1).map(Facet::name), Some("color"));
        assert!(facets.by_position(3).is_none());
        Ok(())
    }

    #[test]
    fn used_respects_include_flag() -> Result<(), Box<dyn Error>> {
        let facets = collection()?;
        assert_eq!(facets.used().names(), vec!["type"]);
        Ok(())
    }

    #[test]
    fn available_requires_items_and_met_requirements() -> Result<(), Box<dyn Error>> {
        let mut facets = collection()?;
        assert_eq!(facets.available().names(), vec!["type", "color"]);

        if let Some(color) = facets.get_mut("color") {
            color.set_all_requirements_met(false);
        }
        assert_eq!(facets.available().names(), vec!["type"]);
        Ok(())
    }

    #[test]
    fn filtered_copies_leave_source_untouched() -> Result<(), Box<dyn Error>> {
        let facets = collection()?;
        let mut style = facets.by_group_name("style");
        style.retain(|facet| facet.name() == "size");

        assert_eq!(style.names(), vec!["size"]);
        assert_eq!(facets.len(), 3);
        assert_eq!(facets.by_name("type").len(), 1);
        Ok(())
    }
}
