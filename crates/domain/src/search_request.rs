//! Search state carried in the URL arguments of one request.

use crate::sorting::SortDirection;
use crate::typoscript::as_i64;
use crate::url_facet_container::{ParameterStyle, UrlFacetContainer};
use serde_json::{Map, Value};

/// Default argument namespace.
pub const DEFAULT_ARGUMENTS_NAMESPACE: &str = "tx_solr";

const QUERY_KEY: &str = "q";
const FILTER_KEY: &str = "filter";
const SORT_KEY: &str = "sort";
const PAGE_KEY: &str = "page";
const RESULTS_PER_PAGE_KEY: &str = "resultsPerPage";
const GROUP_PAGE_KEY: &str = "groupPage";

/// Wraps the URL arguments of one search request.
///
/// Active facets are kept in a [`UrlFacetContainer`] and written back on
/// [`SearchRequest::as_arguments`]. Every mutation marks the request as
/// changed; [`SearchRequest::reset`] restores the arguments it was created with.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    namespace: String,
    style: ParameterStyle,
    arguments: Map<String, Value>,
    persisted: Map<String, Value>,
    facets: UrlFacetContainer,
    additional_filters: Vec<(String, String)>,
    state_changed: bool,
}

impl Default for SearchRequest {
    fn default() -> Self {
        Self::new(Map::new(), DEFAULT_ARGUMENTS_NAMESPACE, ParameterStyle::Index)
    }
}

impl SearchRequest {
    /// Create a request from the full URL argument tree.
    #[must_use]
    pub fn new(arguments: Map<String, Value>, namespace: &str, style: ParameterStyle) -> Self {
        let namespace = if namespace.trim().is_empty() {
            DEFAULT_ARGUMENTS_NAMESPACE.to_owned()
        } else {
            namespace.trim().to_owned()
        };
        let mut request = Self {
            namespace,
            style,
            arguments: Map::new(),
            persisted: arguments.clone(),
            facets: UrlFacetContainer::new(style),
            additional_filters: Vec::new(),
            state_changed: false,
        };
        request.load(arguments);
        request
    }

    /// Create a request from a JSON value; anything but an object is empty.
    #[must_use]
    pub fn from_value(arguments: Value, namespace: &str, style: ParameterStyle) -> Self {
        match arguments {
            Value::Object(arguments) => Self::new(arguments, namespace, style),
            _ => Self::new(Map::new(), namespace, style),
        }
    }

    fn load(&mut self, mut arguments: Map<String, Value>) {
        let mut filter = None;
        if let Some(Value::Object(plugin)) = arguments.get_mut(&self.namespace) {
            let kept: Map<String, Value> = std::mem::take(plugin)
                .into_iter()
                .filter_map(|(key, value)| {
                    if key == FILTER_KEY {
                        filter = Some(value);
                        None
                    } else {
                        Some((key, value))
                    }
                })
                .collect();
            *plugin = kept;
        }
        self.facets = UrlFacetContainer::from_value(filter.as_ref(), self.style);
        self.arguments = arguments;
    }

    /// Argument namespace.
    #[must_use]
    pub fn arguments_namespace(&self) -> &str {
        &self.namespace
    }

    /// True when the request was modified since creation or the last reset.
    #[must_use]
    pub const fn state_changed(&self) -> bool {
        self.state_changed
    }

    /// Restore the arguments the request was created with.
    pub fn reset(&mut self) {
        let persisted = self.persisted.clone();
        self.load(persisted);
        self.additional_filters.clear();
        self.state_changed = false;
    }

    fn plugin_argument(&self, key: &str) -> Option<&Value> {
        self.arguments
            .get(&self.namespace)
            .and_then(Value::as_object)
            .and_then(|plugin| plugin.get(key))
    }

    fn plugin_arguments_mut(&mut self) -> Option<&mut Map<String, Value>> {
        self.state_changed = true;
        let slot = self
            .arguments
            .entry(self.namespace.clone())
            .or_insert_with(|| Value::Object(Map::new()));
        if !slot.is_object() {
            *slot = Value::Object(Map::new());
        }
        slot.as_object_mut()
    }

    fn set_plugin_argument(&mut self, key: &str, value: Value) {
        if let Some(plugin) = self.plugin_arguments_mut() {
            plugin.insert(key.to_owned(), value);
        }
    }

    fn remove_plugin_argument(&mut self, key: &str) {
        if let Some(plugin) = self.plugin_arguments_mut() {
            let kept: Map<String, Value> = std::mem::take(plugin)
                .into_iter()
                .filter(|(name, _)| name != key)
                .collect();
            *plugin = kept;
        }
    }

    // ---------------------------------------------------------------------
    // Query string
    // ---------------------------------------------------------------------

    /// Raw user query, `None` when absent.
    #[must_use]
    pub fn raw_user_query(&self) -> Option<String> {
        match self.plugin_argument(QUERY_KEY)? {
            Value::String(query) => Some(query.clone()),
            Value::Number(number) => Some(number.to_string()),
            _ => None,
        }
    }

    /// True when the query is absent or empty.
    #[must_use]
    pub fn raw_user_query_is_empty(&self) -> bool {
        self.raw_user_query().is_none_or(|query| query.is_empty())
    }

    /// Set the raw user query.
    pub fn set_raw_query_string(&mut self, query: &str) {
        self.set_plugin_argument(QUERY_KEY, Value::String(query.to_owned()));
    }

    // ---------------------------------------------------------------------
    // Active facets
    // ---------------------------------------------------------------------

    /// Active facet container.
    #[must_use]
    pub const fn facets(&self) -> &UrlFacetContainer {
        &self.facets
    }

    /// Raw `"name:value"` entries.
    #[must_use]
    pub fn active_facets(&self) -> Vec<String> {
        self.facets.active_facets()
    }

    /// Distinct active facet names.
    #[must_use]
    pub fn active_facet_names(&self) -> Vec<String> {
        self.facets.active_facet_names()
    }

    /// Active values of facet `facet_name`.
    #[must_use]
    pub fn active_facet_values_by_name(&self, facet_name: &str) -> Vec<String> {
        self.facets.active_facet_values_by_name(facet_name)
    }

    /// Number of active facet values.
    #[must_use]
    pub fn active_facet_count(&self) -> usize {
        self.facets.count()
    }

    /// True when `facet_name:facet_value` is active.
    #[must_use]
    pub fn has_facet_value(&self, facet_name: &str, facet_value: &str) -> bool {
        self.facets.has_facet_value(facet_name, facet_value)
    }

    /// Activate a facet value.
    pub fn add_facet_value(&mut self, facet_name: &str, facet_value: &str) -> &mut Self {
        self.facets.add_facet_value(facet_name, facet_value);
        self.state_changed = true;
        self
    }

    /// Deactivate a facet value.
    pub fn remove_facet_value(&mut self, facet_name: &str, facet_value: &str) -> &mut Self {
        self.facets.remove_facet_value(facet_name, facet_value);
        self.state_changed = true;
        self
    }

    /// Deactivate every value of facet `facet_name`.
    pub fn remove_all_facet_values_by_name(&mut self, facet_name: &str) -> &mut Self {
        self.facets.remove_all_facet_values_by_name(facet_name);
        self.state_changed = true;
        self
    }

    /// Deactivate every facet value.
    pub fn remove_all_facets(&mut self) -> &mut Self {
        self.facets.remove_all_facets();
        self.state_changed = true;
        self
    }

    // ---------------------------------------------------------------------
    // Sorting
    // ---------------------------------------------------------------------

    /// Raw sorting (`"<name> <direction>"`).
    #[must_use]
    pub fn sorting(&self) -> Option<String> {
        self.plugin_argument(SORT_KEY)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|sorting| !sorting.is_empty())
            .map(str::to_owned)
    }

    /// True when a sorting is active.
    #[must_use]
    pub fn has_sorting(&self) -> bool {
        self.sorting().is_some()
    }

    /// Name part of the active sorting.
    #[must_use]
    pub fn sorting_name(&self) -> Option<String> {
        let sorting = self.sorting()?;
        sorting.split_whitespace().next().map(str::to_owned)
    }

    /// Direction part of the active sorting, `None` when not given or invalid.
    #[must_use]
    pub fn sorting_direction(&self) -> Option<SortDirection> {
        let sorting = self.sorting()?;
        sorting.split_whitespace().nth(1).and_then(SortDirection::parse)
    }

    /// Activate sorting option `name`.
    pub fn set_sorting(&mut self, name: &str, direction: SortDirection) -> &mut Self {
        self.set_plugin_argument(SORT_KEY, Value::String(format!("{name} {direction}")));
        self
    }

    /// Drop the active sorting.
    pub fn remove_sorting(&mut self) -> &mut Self {
        self.remove_plugin_argument(SORT_KEY);
        self
    }

    // ---------------------------------------------------------------------
    // Paging
    // ---------------------------------------------------------------------

    /// Requested page (1-based), `None` when absent or invalid.
    #[must_use]
    pub fn page(&self) -> Option<u32> {
        self.plugin_argument(PAGE_KEY)
            .and_then(as_i64)
            .and_then(|page| u32::try_from(page).ok())
            .filter(|page| *page > 0)
    }

    /// Set the page.
    pub fn set_page(&mut self, page: u32) -> &mut Self {
        self.set_plugin_argument(PAGE_KEY, Value::from(page));
        self
    }

    /// Drop the page.
    pub fn remove_page(&mut self) -> &mut Self {
        self.remove_plugin_argument(PAGE_KEY);
        self
    }

    /// Requested results per page, `None` when absent or invalid.
    #[must_use]
    pub fn results_per_page(&self) -> Option<u32> {
        self.plugin_argument(RESULTS_PER_PAGE_KEY)
            .and_then(as_i64)
            .and_then(|count| u32::try_from(count).ok())
            .filter(|count| *count > 0)
    }

    /// Set the results per page.
    pub fn set_results_per_page(&mut self, results_per_page: u32) -> &mut Self {
        self.set_plugin_argument(RESULTS_PER_PAGE_KEY, Value::from(results_per_page));
        self
    }

    /// Page of the items inside group `group_name` / `group_item_value`, default 1.
    #[must_use]
    pub fn group_item_page(&self, group_name: &str, group_item_value: &str) -> u32 {
        let key = group_item_key(group_item_value);
        self.plugin_argument(GROUP_PAGE_KEY)
            .and_then(|pages| pages.get(group_name))
            .and_then(|pages| pages.get(&key))
            .and_then(as_i64)
            .and_then(|page| u32::try_from(page).ok())
            .filter(|page| *page > 0)
            .unwrap_or(1)
    }

    /// Set the page of the items inside a group.
    pub fn set_group_item_page(
        &mut self,
        group_name: &str,
        group_item_value: &str,
        page: u32,
    ) -> &mut Self {
        let key = group_item_key(group_item_value);
        let Some(plugin) = self.plugin_arguments_mut() else {
            return self;
        };
        let pages = plugin
            .entry(GROUP_PAGE_KEY.to_owned())
            .or_insert_with(|| Value::Object(Map::new()));
        if !pages.is_object() {
            *pages = Value::Object(Map::new());
        }
        if let Value::Object(pages) = pages {
            let group = pages
                .entry(group_name.to_owned())
                .or_insert_with(|| Value::Object(Map::new()));
            if !group.is_object() {
                *group = Value::Object(Map::new());
            }
            if let Value::Object(group) = group {
                group.insert(key, Value::from(page));
            }
        }
        self
    }

    // ---------------------------------------------------------------------
    // Additional filters
    // ---------------------------------------------------------------------

    /// Named filter queries added by the application, in order.
    #[must_use]
    pub fn additional_filters(&self) -> &[(String, String)] {
        &self.additional_filters
    }

    /// Add (or replace) a named filter query.
    pub fn add_additional_filter(&mut self, name: &str, query: &str) -> &mut Self {
        if let Some(entry) = self.additional_filters.iter_mut().find(|(key, _)| key == name) {
            entry.1 = query.to_owned();
        } else {
            self.additional_filters.push((name.to_owned(), query.to_owned()));
        }
        self.state_changed = true;
        self
    }

    /// Full argument tree with the active facets written back.
    #[must_use]
    pub fn as_arguments(&self) -> Value {
        let mut arguments = self.arguments.clone();
        if !self.facets.is_empty() {
            let slot = arguments
                .entry(self.namespace.clone())
                .or_insert_with(|| Value::Object(Map::new()));
            if let Value::Object(plugin) = slot {
                plugin.insert(FILTER_KEY.to_owned(), self.facets.to_value());
            }
        }
        Value::Object(arguments)
    }
}

fn group_item_key(group_item_value: &str) -> String {
    group_item_value
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect()
}
