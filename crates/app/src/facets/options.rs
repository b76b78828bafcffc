//! Options facets from JSON facet buckets or `facet_fields`.

use super::{ParseContext, named_counts, reconcile_items};
use serde_json::{Map, Value};
use solr_search_domain::typoscript::{as_f64, as_string};
use solr_search_domain::{FacetConfiguration, FacetItem, FacetItemCollection};
use std::collections::BTreeMap;

const METRICS_PREFIX: &str = "metrics_";

pub(super) fn parse(facet: &FacetConfiguration, context: &ParseContext<'_>) -> FacetItemCollection {
    let mut items = FacetItemCollection::new();
    if let Some(buckets) = json_buckets(facet, context) {
        for bucket in buckets.iter().filter_map(Value::as_object) {
            let Some(value) = bucket.get("val").and_then(as_string) else {
                continue;
            };
            let count = bucket.get("count").and_then(Value::as_u64).unwrap_or(0);
            items.add(
                FacetItem::option(&facet.name, &value, &value, count, false)
                    .with_metrics(bucket_metrics(bucket)),
            );
        }
    } else if let Some(list) = context.facet_counts("facet_fields", &facet.field) {
        for (value, count) in named_counts(list) {
            items.add(FacetItem::option(&facet.name, &value, &value, count, false));
        }
    }

    reconcile_items(items, facet, &context.active_values(facet), |value| {
        FacetItem::option(&facet.name, value, value, 0, true)
    })
}

fn json_buckets<'a>(facet: &FacetConfiguration, context: &ParseContext<'a>) -> Option<&'a Vec<Value>> {
    context
        .response
        .get("facets")?
        .get(&facet.name)?
        .get("buckets")?
        .as_array()
}

fn bucket_metrics(bucket: &Map<String, Value>) -> BTreeMap<String, f64> {
    bucket
        .iter()
        .filter_map(|(key, value)| {
            let name = key.strip_prefix(METRICS_PREFIX)?;
            Some((name.to_owned(), as_f64(value)?))
        })
        .collect()
}
