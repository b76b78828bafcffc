use super::{FacetParameters, FacetQueryContext};
use solr_search_domain::{FacetConfiguration, QueryGroupDefinition};

/// One `facet.query` per configured group, `<field>:<query>`.
pub(super) fn build(
    facet: &FacetConfiguration,
    groups: &[QueryGroupDefinition],
    context: &FacetQueryContext,
) -> FacetParameters {
    let tag = context.exclude_tag(facet);
    FacetParameters {
        queries: groups
            .iter()
            .map(|group| format!("{tag}{}:{}", facet.field, group.query))
            .collect(),
        ..FacetParameters::default()
    }
}
