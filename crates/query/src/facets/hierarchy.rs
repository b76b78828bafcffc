use super::{FacetParameters, FacetQueryContext, options};
use solr_search_domain::FacetConfiguration;

pub(super) fn build(facet: &FacetConfiguration, context: &FacetQueryContext) -> FacetParameters {
    let mut parameters = FacetParameters::default();
    parameters
        .fields
        .push(format!("{}{}", context.exclude_tag(facet), facet.field));
    options::add_field_settings(&mut parameters, facet);
    parameters
}
