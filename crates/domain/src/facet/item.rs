//! Facet items (options, hierarchy nodes, query groups and ranges).

use crate::facet::item_collection::FacetItemCollection;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Kind-specific item detail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum FacetItemDetail {
    /// Plain field value.
    Option,
    /// Hierarchy node.
    Node {
        /// Depth of the node, `0` for roots.
        depth: u32,
        /// Full node path (`/1/5/`).
        path: String,
        /// Path of the parent node, if any.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        parent: Option<String>,
        /// Child nodes.
        children: FacetItemCollection,
    },
    /// Query group entry.
    QueryGroup {
        /// Configured Solr query.
        query: String,
    },
    /// Range window with its bucket counts.
    Range {
        /// Window start.
        start: String,
        /// Window end.
        end: String,
        /// Bucket gap.
        gap: String,
        /// Bucket start → count, in response order.
        counts: Vec<(String, u64)>,
    },
}

/// One option of a facet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacetItem {
    /// Name of the owning facet.
    pub facet_name: String,
    /// Display label.
    pub label: String,
    /// Value used in the URL.
    pub value: String,
    /// Document count.
    pub count: u64,
    /// Whether the value is active in the search request.
    pub selected: bool,
    /// JSON facet metrics.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metrics: BTreeMap<String, f64>,
    /// Kind detail.
    pub detail: FacetItemDetail,
}

impl FacetItem {
    /// Build a plain option item.
    pub fn option(
        facet_name: impl Into<String>,
        label: impl Into<String>,
        value: impl Into<String>,
        count: u64,
        selected: bool,
    ) -> Self {
        Self {
            facet_name: facet_name.into(),
            label: label.into(),
            value: value.into(),
            count,
            selected,
            metrics: BTreeMap::new(),
            detail: FacetItemDetail::Option,
        }
    }

    /// Attach metrics.
    #[must_use]
    pub fn with_metrics(mut self, metrics: BTreeMap<String, f64>) -> Self {
        self.metrics = metrics;
        self
    }

    /// Replace the detail.
    #[must_use]
    pub fn with_detail(mut self, detail: FacetItemDetail) -> Self {
        self.detail = detail;
        self
    }

    /// Child nodes of a hierarchy node.
    #[must_use]
    pub const fn children(&self) -> Option<&FacetItemCollection> {
        match &self.detail {
            FacetItemDetail::Node { children, .. } => Some(children),
            _ => None,
        }
    }

    /// Mutable child nodes of a hierarchy node.
    pub fn children_mut(&mut self) -> Option<&mut FacetItemCollection> {
        match &mut self.detail {
            FacetItemDetail::Node { children, .. } => Some(children),
            _ => None,
        }
    }
}
