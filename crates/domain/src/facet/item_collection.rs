//! Ordered, value-keyed item collection.

use crate::facet::item::FacetItem;
use serde::{Deserialize, Serialize};

/// Items keyed by value, in insertion order.
///
/// Re-adding an existing value replaces the item in place. Filtering and
/// reordering return new collections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FacetItemCollection {
    items: Vec<FacetItem>,
}

impl FacetItemCollection {
    /// Create an empty collection.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Add an item, replacing an existing item with the same value.
    pub fn add(&mut self, item: FacetItem) {
        if let Some(existing) = self.items.iter_mut().find(|existing| existing.value == item.value) {
            *existing = item;
        } else {
            self.items.push(item);
        }
    }

    /// Returns the item stored for `value`.
    #[must_use]
    pub fn get(&self, value: &str) -> Option<&FacetItem> {
        self.items.iter().find(|item| item.value == value)
    }

    /// Returns the mutable item stored for `value`.
    pub fn get_mut(&mut self, value: &str) -> Option<&mut FacetItem> {
        self.items.iter_mut().find(|item| item.value == value)
    }

    /// Returns true when an item is stored for `value`.
    #[must_use]
    pub fn contains(&self, value: &str) -> bool {
        self.get(value).is_some()
    }

    /// Returns the item at `position` (0-based).
    #[must_use]
    pub fn by_position(&self, position: usize) -> Option<&FacetItem> {
        self.items.get(position)
    }

    /// Number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true when the collection has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate items in order.
    pub fn iter(&self) -> std::slice::Iter<'_, FacetItem> {
        self.items.iter()
    }

    /// Iterate items mutably in order.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, FacetItem> {
        self.items.iter_mut()
    }

    /// Item values in order.
    #[must_use]
    pub fn values(&self) -> Vec<&str> {
        self.items.iter().map(|item| item.value.as_str()).collect()
    }

    /// Copy with only the selected items.
    #[must_use]
    pub fn selected(&self) -> Self {
        self.filtered(|item| item.selected)
    }

    /// Values of all selected items, hierarchy children included (depth first).
    #[must_use]
    pub fn selected_values(&self) -> Vec<String> {
        let mut values = Vec::new();
        for item in &self.items {
            if item.selected {
                values.push(item.value.clone());
            }
            if let Some(children) = item.children() {
                values.extend(children.selected_values());
            }
        }
        values
    }

    /// Copy with only the items matching `predicate`.
    #[must_use]
    pub fn filtered(&self, predicate: impl Fn(&FacetItem) -> bool) -> Self {
        Self {
            items: self.items.iter().filter(|item| predicate(item)).cloned().collect(),
        }
    }

    /// Copy without the items whose value is listed in `excluded`.
    #[must_use]
    pub fn without_values(&self, excluded: &[String]) -> Self {
        self.filtered(|item| !excluded.iter().any(|value| *value == item.value))
    }

    /// Copy with the listed values first (in `order` order), then the
    /// remaining items in their original relative order. Values listed
    /// more than once keep their first position.
    #[must_use]
    pub fn manual_sorted_copy(&self, order: &[String]) -> Self {
        order
            .iter()
            .filter_map(|value| self.get(value))
            .chain(self.items.iter().filter(|item| !order.contains(&item.value)))
            .cloned()
            .collect()
    }

    /// Copy in reverse order.
    #[must_use]
    pub fn reversed_order_copy(&self) -> Self {
        Self {
            items: self.items.iter().rev().cloned().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a FacetItemCollection {
    type Item = &'a FacetItem;
    type IntoIter = std::slice::Iter<'a, FacetItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl FromIterator<FacetItem> for FacetItemCollection {
    fn from_iter<I: IntoIterator<Item = FacetItem>>(iter: I) -> Self {
        let mut collection = Self::new();
        for item in iter {
            collection.add(item);
        }
        collection
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facet::item::FacetItemDetail;

    fn options() -> FacetItemCollection {
        [
            FacetItem::option("type", "Page", "page", 5, false),
            FacetItem::option("type", "Event", "event", 3, true),
            FacetItem::option("type", "Misc", "misc", 1, false),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn manual_sort_appends_unlisted_items() {
        let sorted = options().manual_sorted_copy(&["event".to_owned(), "page".to_owned()]);
        assert_eq!(sorted.values(), vec!["event", "page", "misc"]);

        let sorted = options().manual_sorted_copy(&["page".to_owned(), "event".to_owned()]);
        assert_eq!(sorted.values(), vec!["page", "event", "misc"]);
    }

    #[test]
    fn manual_sort_ignores_unknown_values() {
        let sorted = options().manual_sorted_copy(&["video".to_owned(), "misc".to_owned()]);
        assert_eq!(sorted.values(), vec!["misc", "page", "event"]);
    }

    #[test]
    fn manual_sort_keeps_repeated_values_once() {
        let sorted = options().manual_sorted_copy(&[
            "page".to_owned(),
            "event".to_owned(),
            "page".to_owned(),
        ]);
        assert_eq!(sorted.len(), 3);
        assert_eq!(sorted.values(), vec!["page", "event", "misc"]);
    }

    #[test]
    fn reversed_copy_keeps_keys_and_source() {
        let source = options();
        let reversed = source.reversed_order_copy();

        assert_eq!(reversed.values(), vec!["misc", "event", "page"]);
        assert_eq!(reversed.get("event").map(|item| item.count), Some(3));
        assert_eq!(source.values(), vec!["page", "event", "misc"]);
    }

    #[test]
    fn adding_existing_value_replaces_in_place() {
        let mut collection = options();
        collection.add(FacetItem::option("type", "Page", "page", 9, true));

        assert_eq!(collection.len(), 3);
        assert_eq!(collection.by_position(0).map(|item| item.count), Some(9));
    }

    #[test]
    fn selected_values_walk_children() {
        let mut children = FacetItemCollection::new();
        children.add(
            FacetItem::option("pages", "Sub", "/1/2/", 1, true).with_detail(FacetItemDetail::Node {
                depth: 1,
                path: "/1/2/".to_owned(),
                parent: Some("/1/".to_owned()),
                children: FacetItemCollection::new(),
            }),
        );
        let root = FacetItem::option("pages", "Root", "/1/", 4, false).with_detail(
            FacetItemDetail::Node {
                depth: 0,
                path: "/1/".to_owned(),
                parent: None,
                children,
            },
        );
        let collection: FacetItemCollection = std::iter::once(root).collect();

        assert_eq!(collection.selected_values(), vec!["/1/2/"]);
        assert!(collection.selected().is_empty());
    }

    #[test]
    fn exclusion_drops_listed_values() {
        let filtered = options().without_values(&["misc".to_owned()]);
        assert_eq!(filtered.values(), vec!["page", "event"]);
    }
}
