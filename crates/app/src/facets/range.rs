//! Date and numeric range facets from `facet_ranges`.

use super::{ParseContext, named_counts, reconcile_items};
use chrono::DateTime;
use serde_json::Value;
use solr_search_domain::typoscript::as_string;
use solr_search_domain::{FacetConfiguration, FacetItem, FacetItemCollection, FacetItemDetail, RangeSettings};

/// URL format of date range bounds.
const DATE_URL_FORMAT: &str = "%Y%m%d%H%M";

pub(super) fn parse_date(
    facet: &FacetConfiguration,
    range: &RangeSettings,
    context: &ParseContext<'_>,
) -> FacetItemCollection {
    parse(facet, range, context, date_bound)
}

pub(super) fn parse_numeric(
    facet: &FacetConfiguration,
    range: &RangeSettings,
    context: &ParseContext<'_>,
) -> FacetItemCollection {
    parse(facet, range, context, numeric_bound)
}

/// One item for the whole window: the active value, or the response window
/// when nothing is selected. Its count is the sum of the bucket counts.
fn parse(
    facet: &FacetConfiguration,
    range: &RangeSettings,
    context: &ParseContext<'_>,
    url_bound: fn(&str) -> Option<String>,
) -> FacetItemCollection {
    let active = context.active_values(facet);
    let section = context.facet_counts("facet_ranges", &facet.field);
    let read = |key: &str, fallback: &str| {
        section
            .and_then(|section| section.get(key))
            .and_then(as_string)
            .unwrap_or_else(|| fallback.to_owned())
    };
    let (start, end, gap) = (read("start", &range.start), read("end", &range.end), read("gap", &range.gap));
    let counts = section
        .and_then(|section| section.get("counts"))
        .map(named_counts)
        .unwrap_or_default();

    let value = match active.first() {
        Some(value) => Some(value.clone()),
        None if section.is_some() => url_bound(&start)
            .zip(url_bound(&end))
            .map(|(start, end)| format!("{start}-{end}")),
        None => None,
    };

    let mut items = FacetItemCollection::new();
    if let Some(value) = value {
        let count = counts.iter().map(|(_, count)| count).sum();
        items.add(
            FacetItem::option(&facet.name, &value, &value, count, false).with_detail(
                FacetItemDetail::Range {
                    start,
                    end,
                    gap,
                    counts,
                },
            ),
        );
    }
    reconcile_items(items, facet, &active, |value| {
        FacetItem::option(&facet.name, value, value, 0, true)
    })
}

/// `2024-01-01T00:00:00Z` becomes `202401010000`.
fn date_bound(value: &str) -> Option<String> {
    DateTime::parse_from_rfc3339(value.trim())
        .ok()
        .map(|date| date.format(DATE_URL_FORMAT).to_string())
}

/// `10.0` becomes `10`; fractional bounds are kept.
fn numeric_bound(value: &str) -> Option<String> {
    value.trim().parse::<f64>().ok().map(|bound| bound.to_string())
}
