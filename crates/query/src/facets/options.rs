use super::{FacetParameters, FacetQueryContext};
use serde_json::{Map, Value, json};
use solr_search_domain::{FacetConfiguration, SortingExpression};
use std::collections::BTreeMap;

/// Options facets with metrics use the JSON facet API; all others are
/// plain `facet.field` entries with per-field settings.
pub(super) fn build(
    facet: &FacetConfiguration,
    metrics: &BTreeMap<String, String>,
    context: &FacetQueryContext,
) -> FacetParameters {
    let mut parameters = FacetParameters::default();
    if metrics.is_empty() {
        parameters
            .fields
            .push(format!("{}{}", context.exclude_tag(facet), facet.field));
        add_field_settings(&mut parameters, facet);
        return parameters;
    }

    let mut definition = Map::new();
    definition.insert("type".to_owned(), json!("terms"));
    definition.insert("field".to_owned(), json!(facet.field));
    definition.insert("limit".to_owned(), json!(context.limit_of(facet)));
    definition.insert("mincount".to_owned(), json!(context.minimum_count_of(facet)));
    let sort = SortingExpression::for_json_facet(
        &facet.settings.sort_by,
        facet.settings.sort_direction.as_deref().unwrap_or_default(),
    );
    if !sort.is_empty() {
        definition.insert("sort".to_owned(), Value::String(sort));
    }
    let nested: Map<String, Value> = metrics
        .iter()
        .map(|(name, expression)| (format!("metrics_{name}"), Value::String(expression.clone())))
        .collect();
    definition.insert("facet".to_owned(), Value::Object(nested));
    if let Some(fields) = context.exclude_fields(facet) {
        definition.insert("domain".to_owned(), json!({ "excludeTags": fields }));
    }
    parameters
        .json_facets
        .insert(facet.name.clone(), Value::Object(definition));
    parameters
}

/// `f.<field>.facet.sort|limit|mincount` for field facets.
pub(super) fn add_field_settings(parameters: &mut FacetParameters, facet: &FacetConfiguration) {
    let sort = SortingExpression::for_facet(&facet.settings.sort_by);
    if !sort.is_empty() {
        parameters.per_field(&facet.field, "sort", sort);
    }
    if let Some(limit) = facet.settings.facet_limit {
        parameters.per_field(&facet.field, "limit", limit);
    }
    if let Some(minimum_count) = facet.settings.minimum_count {
        parameters.per_field(&facet.field, "mincount", minimum_count);
    }
}
