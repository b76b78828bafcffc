//! Hierarchy facets from `"<depth>-/<a>/<b>/"` field values.

use super::{ParseContext, arrange_items, named_counts};
use solr_search_domain::{FacetConfiguration, FacetItem, FacetItemCollection, FacetItemDetail};

struct Node {
    depth: u32,
    path: String,
    count: u64,
}

pub(super) fn parse(facet: &FacetConfiguration, context: &ParseContext<'_>) -> FacetItemCollection {
    let active: Vec<String> = context
        .active_values(facet)
        .iter()
        .filter_map(|value| normalize_path(value))
        .collect();

    let mut nodes: Vec<Node> = context
        .facet_counts("facet_fields", &facet.field)
        .map(named_counts)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|(raw, count)| {
            let (depth, path) = raw.split_once('-')?;
            Some(Node {
                depth: depth.parse().ok()?,
                path: normalize_path(path)?,
                count,
            })
        })
        .collect();
    for path in &active {
        if !nodes.iter().any(|node| node.path == *path) {
            nodes.push(Node {
                depth: depth_of(path),
                path: path.clone(),
                count: 0,
            });
        }
    }
    // Parents before children; response order within a depth.
    nodes.sort_by_key(|node| node.depth);

    let mut roots = FacetItemCollection::new();
    for node in nodes {
        let parent = parent_path(&node.path);
        let item = node_item(facet, node, parent.clone());
        match parent.as_deref().and_then(|parent| find_node(&mut roots, parent)) {
            Some(parent) => {
                if let Some(children) = parent.children_mut() {
                    children.add(item);
                }
            },
            None => roots.add(item),
        }
    }
    arrange_tree(&roots, facet, &active)
}

fn node_item(facet: &FacetConfiguration, node: Node, parent: Option<String>) -> FacetItem {
    let label = node
        .path
        .trim_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or_default()
        .to_owned();
    FacetItem::option(&facet.name, label, &node.path, node.count, false).with_detail(
        FacetItemDetail::Node {
            depth: node.depth,
            path: node.path.clone(),
            parent,
            children: FacetItemCollection::new(),
        },
    )
}

fn arrange_tree(
    items: &FacetItemCollection,
    facet: &FacetConfiguration,
    active: &[String],
) -> FacetItemCollection {
    let mut arranged = arrange_items(items, facet, active);
    for item in arranged.iter_mut() {
        if let Some(children) = item.children_mut() {
            *children = arrange_tree(children, facet, active);
        }
    }
    arranged
}

fn find_node<'a>(items: &'a mut FacetItemCollection, path: &str) -> Option<&'a mut FacetItem> {
    for item in items.iter_mut() {
        if item.value == path {
            return Some(item);
        }
        if path.starts_with(item.value.as_str()) {
            return item.children_mut().and_then(|children| find_node(children, path));
        }
    }
    None
}

/// `News/Sports` becomes `/News/Sports/`; an empty path is `None`.
fn normalize_path(value: &str) -> Option<String> {
    let segments: Vec<&str> = value
        .trim()
        .split('/')
        .filter(|segment| !segment.is_empty())
        .collect();
    if segments.is_empty() {
        return None;
    }
    Some(format!("/{}/", segments.join("/")))
}

fn depth_of(path: &str) -> u32 {
    let segments = path.trim_matches('/').split('/').count();
    u32::try_from(segments.saturating_sub(1)).unwrap_or(u32::MAX)
}

fn parent_path(path: &str) -> Option<String> {
    let trimmed = path.trim_matches('/');
    let (parent, _) = trimmed.rsplit_once('/')?;
    Some(format!("/{parent}/"))
}
