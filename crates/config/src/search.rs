//! Typed accessors for the `search` configuration.

use crate::configuration::TypoScriptConfiguration;
use serde_json::{Map, Value};
use solr_search_domain::typoscript::{as_string, child, child_names, scalar};
use solr_search_domain::{
    DEFAULT_ARGUMENTS_NAMESPACE, FacetConfiguration, FacetConfigurationError, FacetRegistry,
    ParameterStyle, SortDirection,
};

/// Default facet minimum count.
pub const DEFAULT_FACET_MINIMUM_COUNT: i64 = 1;
/// Default facet option limit.
pub const DEFAULT_FACET_LIMIT: i64 = 10;
/// Default page size.
pub const DEFAULT_RESULTS_PER_PAGE: u32 = 10;

/// A configured result sorting option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortingOptionConfiguration {
    /// Option name used in the URL.
    pub name: String,
    /// Solr field to sort on (`relevance` for score ordering).
    pub field: String,
    /// Display label.
    pub label: String,
    /// Direction applied when the URL does not carry one.
    pub default_direction: SortDirection,
}

impl TypoScriptConfiguration {
    /// URL argument namespace (`view.pluginNamespace`).
    #[must_use]
    pub fn plugin_namespace(&self) -> String {
        self.non_empty_string_by_path("view.pluginNamespace")
            .unwrap_or_else(|| DEFAULT_ARGUMENTS_NAMESPACE.to_owned())
    }

    /// `search.faceting`
    #[must_use]
    pub fn search_faceting(&self) -> bool {
        self.bool_by_path("search.faceting", false)
    }

    /// `search.faceting.minimumCount`
    #[must_use]
    pub fn search_faceting_minimum_count(&self) -> i64 {
        self.int_by_path("search.faceting.minimumCount", DEFAULT_FACET_MINIMUM_COUNT)
    }

    /// `search.faceting.limit`
    #[must_use]
    pub fn search_faceting_limit(&self) -> i64 {
        self.int_by_path("search.faceting.limit", DEFAULT_FACET_LIMIT)
    }

    /// `search.faceting.sortBy` as configured (`Null` when unset).
    #[must_use]
    pub fn search_faceting_sort_by(&self) -> Value {
        self.value_by_path("search.faceting.sortBy")
            .filter(|value| !value.is_object())
            .cloned()
            .unwrap_or(Value::Null)
    }

    /// `search.faceting.showEmptyFacets`
    #[must_use]
    pub fn search_faceting_show_empty_facets(&self) -> bool {
        self.bool_by_path("search.faceting.showEmptyFacets", false)
    }

    /// `search.faceting.keepAllFacetsOnSelection`
    #[must_use]
    pub fn search_faceting_keep_all_facets_on_selection(&self) -> bool {
        self.bool_by_path("search.faceting.keepAllFacetsOnSelection", false)
    }

    /// `search.faceting.urlParameterStyle`
    #[must_use]
    pub fn search_faceting_url_parameter_style(&self) -> ParameterStyle {
        self.non_empty_string_by_path("search.faceting.urlParameterStyle")
            .map_or(ParameterStyle::Index, |style| ParameterStyle::parse(&style))
    }

    /// `search.faceting.urlParameterSort`
    #[must_use]
    pub fn search_faceting_url_parameter_sort(&self) -> bool {
        self.bool_by_path("search.faceting.urlParameterSort", false)
    }

    /// Configured facet names in order.
    #[must_use]
    pub fn search_faceting_facet_names(&self) -> Vec<String> {
        self.object_by_path("search.faceting.facets")
            .map(child_names)
            .unwrap_or_default()
            .into_iter()
            .filter(|name| self.search_faceting_facet(name).is_some())
            .collect()
    }

    /// Configuration node of facet `name`.
    #[must_use]
    pub fn search_faceting_facet(&self, name: &str) -> Option<&Map<String, Value>> {
        self.object_by_path("search.faceting.facets")
            .and_then(|facets| child(facets, name))
    }

    /// Configured type name of facet `name`.
    #[must_use]
    pub fn search_faceting_facet_type(&self, name: &str) -> Option<String> {
        self.search_faceting_facet(name)
            .and_then(|facet| scalar(facet, "type"))
            .and_then(as_string)
    }

    /// Resolved configurations of all facets, in configured order.
    pub fn search_faceting_facet_configurations(
        &self,
        registry: &FacetRegistry,
    ) -> Result<Vec<FacetConfiguration>, FacetConfigurationError> {
        self.search_faceting_facet_names()
            .into_iter()
            .filter_map(|name| {
                let node = self.search_faceting_facet(&name)?;
                let facet_type = registry.resolve(scalar(node, "type").and_then(as_string).as_deref());
                Some(FacetConfiguration::from_node(&name, node, facet_type))
            })
            .collect()
    }

    /// `search.faceting.additionalParameters` (raw, structured values kept).
    #[must_use]
    pub fn search_faceting_additional_parameters(&self) -> Map<String, Value> {
        self.object_by_path("search.faceting.additionalParameters")
            .cloned()
            .unwrap_or_default()
    }

    /// `search.query.filter.*` as named filter queries. Keys starting with
    /// `__` are reserved and skipped.
    #[must_use]
    pub fn search_query_filters(&self) -> Vec<(String, String)> {
        let Some(filters) = self.object_by_path("search.query.filter") else {
            return Vec::new();
        };
        filters
            .iter()
            .filter(|(name, _)| !name.starts_with("__"))
            .filter_map(|(name, query)| {
                as_string(query)
                    .filter(|query| !query.trim().is_empty())
                    .map(|query| (name.clone(), query))
            })
            .collect()
    }

    /// `search.query.allowEmptyQuery`
    #[must_use]
    pub fn search_query_allow_empty_query(&self) -> bool {
        self.bool_by_path("search.query.allowEmptyQuery", false)
    }

    /// `search.initializeWithEmptyQuery`
    #[must_use]
    pub fn search_initialize_with_empty_query(&self) -> bool {
        self.bool_by_path("search.initializeWithEmptyQuery", false)
    }

    /// `search.results.resultsPerPage`
    #[must_use]
    pub fn search_results_per_page(&self) -> u32 {
        u32::try_from(self.int_by_path(
            "search.results.resultsPerPage",
            i64::from(DEFAULT_RESULTS_PER_PAGE),
        ))
        .ok()
        .filter(|count| *count > 0)
        .unwrap_or(DEFAULT_RESULTS_PER_PAGE)
    }

    /// `search.sorting`
    #[must_use]
    pub fn search_sorting(&self) -> bool {
        self.bool_by_path("search.sorting", false)
    }

    /// `search.sorting.defaultOrder`
    #[must_use]
    pub fn search_sorting_default_order(&self) -> SortDirection {
        self.non_empty_string_by_path("search.sorting.defaultOrder")
            .and_then(|order| SortDirection::parse(&order))
            .unwrap_or_default()
    }

    /// `search.sorting.options.*` in order. Options without field are skipped.
    #[must_use]
    pub fn search_sorting_options(&self) -> Vec<SortingOptionConfiguration> {
        let Some(options) = self.object_by_path("search.sorting.options") else {
            return Vec::new();
        };
        let fallback = self.search_sorting_default_order();
        child_names(options)
            .into_iter()
            .filter_map(|name| {
                let option = child(options, &name)?;
                let field = scalar(option, "field")
                    .and_then(as_string)
                    .filter(|field| !field.trim().is_empty())?;
                let label = scalar(option, "label")
                    .and_then(as_string)
                    .unwrap_or_else(|| name.clone());
                let default_direction = scalar(option, "defaultOrder")
                    .and_then(as_string)
                    .and_then(|order| SortDirection::parse(&order))
                    .unwrap_or(fallback);
                Some(SortingOptionConfiguration {
                    name,
                    field: field.trim().to_owned(),
                    label,
                    default_direction,
                })
            })
            .collect()
    }

    /// Sorting option named `name`.
    #[must_use]
    pub fn search_sorting_option(&self, name: &str) -> Option<SortingOptionConfiguration> {
        self.search_sorting_options()
            .into_iter()
            .find(|option| option.name == name)
    }
}
