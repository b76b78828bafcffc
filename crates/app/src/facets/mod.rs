//! Per facet type response parsers.
//!
//! Each [`FacetKind`] maps, by exhaustive match, to the parser turning its
//! section of the Solr response into a [`Facet`]. Parsers share
//! [`reconcile_items`] so every type treats active values, exclusion and
//! ordering the same way.

mod hierarchy;
mod options;
mod query_group;
mod range;

use serde_json::Value;
use solr_search_domain::typoscript::as_string;
use solr_search_domain::{Facet, FacetConfiguration, FacetItem, FacetItemCollection, FacetKind, SearchRequest};

/// Inputs every parser reads.
#[derive(Debug, Clone, Copy)]
pub struct ParseContext<'a> {
    /// Raw Solr response.
    pub response: &'a Value,
    /// Request the response answers.
    pub request: &'a SearchRequest,
    /// Global `search.faceting.minimumCount`.
    pub minimum_count: i64,
}

impl<'a> ParseContext<'a> {
    /// Context for `response` to `request`.
    #[must_use]
    pub const fn new(response: &'a Value, request: &'a SearchRequest, minimum_count: i64) -> Self {
        Self {
            response,
            request,
            minimum_count,
        }
    }

    /// Active URL values of `facet`.
    #[must_use]
    pub fn active_values(&self, facet: &FacetConfiguration) -> Vec<String> {
        self.request.active_facet_values_by_name(&facet.name)
    }

    /// `facet_counts.<section>.<key>` of the response.
    #[must_use]
    pub fn facet_counts(&self, section: &str, key: &str) -> Option<&'a Value> {
        self.response.get("facet_counts")?.get(section)?.get(key)
    }
}

/// Parse the response section of `configuration` into a facet.
#[must_use]
pub fn parse_facet(configuration: FacetConfiguration, context: &ParseContext<'_>) -> Facet {
    let items = match &configuration.kind {
        FacetKind::Options { .. } => options::parse(&configuration, context),
        FacetKind::Hierarchy => hierarchy::parse(&configuration, context),
        FacetKind::QueryGroup { groups } => query_group::parse(&configuration, groups, context),
        FacetKind::DateRange { range } => range::parse_date(&configuration, range, context),
        FacetKind::NumericRange { range } => range::parse_numeric(&configuration, range, context),
    };
    Facet::new(configuration, items)
}

/// Add active values missing from `items` (count 0), then arrange them
/// with [`arrange_items`].
pub(crate) fn reconcile_items(
    mut items: FacetItemCollection,
    facet: &FacetConfiguration,
    active: &[String],
    missing_item: impl Fn(&str) -> FacetItem,
) -> FacetItemCollection {
    for value in active {
        if !items.contains(value) {
            items.add(missing_item(value));
        }
    }
    arrange_items(&items, facet, active)
}

/// Apply exclusion, manual sort order and reverse order, in that order,
/// and mark the items whose value is active.
pub(crate) fn arrange_items(
    items: &FacetItemCollection,
    facet: &FacetConfiguration,
    active: &[String],
) -> FacetItemCollection {
    let settings = &facet.settings;
    let mut items = items.without_values(&settings.exclude_values);
    if !settings.manual_sort_order.is_empty() {
        items = items.manual_sorted_copy(&settings.manual_sort_order);
    }
    if settings.reverse_order {
        items = items.reversed_order_copy();
    }
    for item in items.iter_mut() {
        item.selected = active.contains(&item.value);
    }
    items
}

/// `(value, count)` pairs of a Solr named list, either flat
/// (`["a", 3, "b", 1]`) or a map (`{"a": 3, "b": 1}`).
pub(crate) fn named_counts(list: &Value) -> Vec<(String, u64)> {
    match list {
        Value::Array(entries) => entries
            .chunks(2)
            .filter_map(|pair| match pair {
                [value, count] => Some((as_string(value)?, count.as_u64()?)),
                _ => None,
            })
            .collect(),
        Value::Object(entries) => entries
            .iter()
            .filter_map(|(value, count)| Some((value.clone(), count.as_u64()?)))
            .collect(),
        _ => Vec::new(),
    }
}
