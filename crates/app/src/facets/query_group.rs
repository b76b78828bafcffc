//! Query group facets from `facet_queries`.

use super::{ParseContext, named_counts, reconcile_items};
use solr_search_domain::{
    FacetConfiguration, FacetItem, FacetItemCollection, FacetItemDetail, QueryGroupDefinition,
};

pub(super) fn parse(
    facet: &FacetConfiguration,
    groups: &[QueryGroupDefinition],
    context: &ParseContext<'_>,
) -> FacetItemCollection {
    let active = context.active_values(facet);
    let counts = context
        .response
        .get("facet_counts")
        .and_then(|counts| counts.get("facet_queries"))
        .map(named_counts)
        .unwrap_or_default();
    let minimum_count = facet.settings.minimum_count.unwrap_or(context.minimum_count);

    let mut items = FacetItemCollection::new();
    for group in groups {
        let key = format!("{}:{}", facet.field, group.query);
        let Some(count) = counts
            .iter()
            .find(|(query, _)| without_local_parameters(query) == key)
            .map(|(_, count)| *count)
        else {
            continue;
        };
        let below_minimum = i64::try_from(count).unwrap_or(i64::MAX) < minimum_count;
        if below_minimum && !active.contains(&group.name) {
            continue;
        }
        items.add(group_item(facet, group, count));
    }

    reconcile_items(items, facet, &active, |value| {
        groups
            .iter()
            .find(|group| group.name == value)
            .map_or_else(
                || FacetItem::option(&facet.name, value, value, 0, true),
                |group| group_item(facet, group, 0),
            )
    })
}

fn group_item(facet: &FacetConfiguration, group: &QueryGroupDefinition, count: u64) -> FacetItem {
    let label = group.label.clone().unwrap_or_else(|| group.name.clone());
    FacetItem::option(&facet.name, label, &group.name, count, false).with_detail(
        FacetItemDetail::QueryGroup {
            query: group.query.clone(),
        },
    )
}

/// `{!ex=type}created:[* TO NOW]` becomes `created:[* TO NOW]`.
fn without_local_parameters(query: &str) -> &str {
    query
        .strip_prefix("{!")
        .and_then(|rest| rest.split_once('}'))
        .map_or(query, |(_, query)| query)
}
