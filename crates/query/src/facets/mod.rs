//! Per facet type query contributions and URL decoding.
//!
//! Each [`FacetKind`] maps, by exhaustive match, to the parameters it adds
//! to a faceted query and to the decoder turning an active URL value into a
//! Solr filter expression.

pub mod filters;
mod hierarchy;
mod options;
mod query_group;
mod range;
pub mod url_decoder;

use serde_json::{Map, Value};
use solr_search_config::TypoScriptConfiguration;
use solr_search_domain::{FacetConfiguration, FacetKind};

pub use filters::{FACET_FILTER_PREFIX, FacetFilters};
pub use url_decoder::decode_url_value;

/// Global faceting settings shared by every facet query builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacetQueryContext {
    /// Global minimum count.
    pub minimum_count: i64,
    /// Global option limit.
    pub limit: i64,
    /// `search.faceting.keepAllFacetsOnSelection`
    pub keep_all_facets_on_selection: bool,
    /// Fields of every configured facet, in order, without duplicates.
    pub all_fields: Vec<String>,
}

impl FacetQueryContext {
    /// Read the global settings and collect the fields of `facets`.
    #[must_use]
    pub fn new(configuration: &TypoScriptConfiguration, facets: &[FacetConfiguration]) -> Self {
        let mut all_fields: Vec<String> = Vec::with_capacity(facets.len());
        for facet in facets {
            if !all_fields.contains(&facet.field) {
                all_fields.push(facet.field.clone());
            }
        }
        Self {
            minimum_count: configuration.search_faceting_minimum_count(),
            limit: configuration.search_faceting_limit(),
            keep_all_facets_on_selection: configuration.search_faceting_keep_all_facets_on_selection(),
            all_fields,
        }
    }

    /// Fields whose filters are excluded while counting `facet`, if any.
    #[must_use]
    pub fn exclude_fields(&self, facet: &FacetConfiguration) -> Option<String> {
        if self.keep_all_facets_on_selection {
            Some(self.all_fields.join(","))
        } else if facet.settings.keep_all_options_on_selection {
            Some(facet.field.clone())
        } else {
            None
        }
    }

    /// `{!ex=...}` prefix for `facet`, or an empty string.
    #[must_use]
    pub fn exclude_tag(&self, facet: &FacetConfiguration) -> String {
        self.exclude_fields(facet)
            .map(|fields| format!("{{!ex={fields}}}"))
            .unwrap_or_default()
    }

    /// Effective option limit of `facet`.
    #[must_use]
    pub fn limit_of(&self, facet: &FacetConfiguration) -> i64 {
        facet.settings.facet_limit.unwrap_or(self.limit)
    }

    /// Effective minimum count of `facet`.
    #[must_use]
    pub fn minimum_count_of(&self, facet: &FacetConfiguration) -> i64 {
        facet.settings.minimum_count.unwrap_or(self.minimum_count)
    }
}

/// Parameters contributed by facets, merged by the faceting builder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FacetParameters {
    /// `facet.field` entries.
    pub fields: Vec<String>,
    /// `facet.query` entries.
    pub queries: Vec<String>,
    /// `facet.range` entries.
    pub ranges: Vec<String>,
    /// Per-field parameters (`f.<field>.facet.*`).
    pub per_field: Vec<(String, String)>,
    /// JSON facet definitions keyed by facet name.
    pub json_facets: Map<String, Value>,
}

impl FacetParameters {
    /// Merge `other` into `self`; repeated entries are kept once.
    pub fn merge(&mut self, other: Self) {
        extend_unique(&mut self.fields, other.fields);
        extend_unique(&mut self.queries, other.queries);
        extend_unique(&mut self.ranges, other.ranges);
        for (name, value) in other.per_field {
            match self.per_field.iter_mut().find(|(existing, _)| *existing == name) {
                Some(entry) => entry.1 = value,
                None => self.per_field.push((name, value)),
            }
        }
        self.json_facets.extend(other.json_facets);
    }

    fn per_field(&mut self, field: &str, parameter: &str, value: impl ToString) {
        self.per_field
            .push((format!("f.{field}.facet.{parameter}"), value.to_string()));
    }
}

fn extend_unique(target: &mut Vec<String>, values: Vec<String>) {
    for value in values {
        if !target.contains(&value) {
            target.push(value);
        }
    }
}

/// Parameters `facet` contributes to the query.
#[must_use]
pub fn facet_parameters(facet: &FacetConfiguration, context: &FacetQueryContext) -> FacetParameters {
    match &facet.kind {
        FacetKind::Options { metrics } => options::build(facet, metrics, context),
        FacetKind::Hierarchy => hierarchy::build(facet, context),
        FacetKind::QueryGroup { groups } => query_group::build(facet, groups, context),
        FacetKind::DateRange { range } | FacetKind::NumericRange { range } => {
            range::build(facet, range, context)
        },
    }
}

/// Parameters of all `facets`, merged in order.
#[must_use]
pub fn all_facet_parameters(
    facets: &[FacetConfiguration],
    context: &FacetQueryContext,
) -> FacetParameters {
    let mut merged = FacetParameters::default();
    for facet in facets {
        merged.merge(facet_parameters(facet, context));
    }
    merged
}
