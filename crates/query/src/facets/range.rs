use super::{FacetParameters, FacetQueryContext};
use solr_search_domain::{FacetConfiguration, RangeSettings};

/// `facet.range` plus the window as `f.<field>.facet.range.*`.
pub(super) fn build(
    facet: &FacetConfiguration,
    range: &RangeSettings,
    context: &FacetQueryContext,
) -> FacetParameters {
    let mut parameters = FacetParameters::default();
    parameters
        .ranges
        .push(format!("{}{}", context.exclude_tag(facet), facet.field));
    parameters.per_field(&facet.field, "range.start", &range.start);
    parameters.per_field(&facet.field, "range.end", &range.end);
    parameters.per_field(&facet.field, "range.gap", &range.gap);
    parameters
}
