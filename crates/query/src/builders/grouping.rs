//! Result grouping (`group*`).

use crate::builder::ParameterBuilder;
use solr_search_config::TypoScriptConfiguration;
use solr_search_domain::QueryParameters;
use solr_search_domain::typoscript::{as_string, child, child_names, scalar};

/// Default `search.grouping.numberOfGroups`.
pub const DEFAULT_NUMBER_OF_GROUPS: u32 = 5;
/// Default `search.grouping.numberOfResultsPerGroup`.
pub const DEFAULT_RESULTS_PER_GROUP: u32 = 1;

/// Field and query grouping.
///
/// When enabled, `rows` is the number of groups, not the page size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grouping {
    enabled: bool,
    fields: Vec<String>,
    sortings: Vec<String>,
    queries: Vec<String>,
    number_of_groups: u32,
    results_per_group: u32,
}

impl Default for Grouping {
    fn default() -> Self {
        Self {
            enabled: false,
            fields: Vec::new(),
            sortings: Vec::new(),
            queries: Vec::new(),
            number_of_groups: DEFAULT_NUMBER_OF_GROUPS,
            results_per_group: DEFAULT_RESULTS_PER_GROUP,
        }
    }
}

impl Grouping {
    /// Enabled grouping without groups.
    #[must_use]
    pub fn enabled(number_of_groups: u32, results_per_group: u32) -> Self {
        Self {
            enabled: true,
            number_of_groups,
            results_per_group,
            ..Self::default()
        }
    }

    /// Group by `field`.
    #[must_use]
    pub fn with_field(mut self, field: &str) -> Self {
        self.fields.push(field.to_owned());
        self
    }

    /// Add a group query.
    #[must_use]
    pub fn with_query(mut self, query: &str) -> Self {
        self.queries.push(query.to_owned());
        self
    }

    /// Add a within-group sorting.
    #[must_use]
    pub fn with_sorting(mut self, sorting: &str) -> Self {
        self.sortings.push(sorting.to_owned());
        self
    }

    /// Read `search.grouping` and its groups.
    #[must_use]
    pub fn from_configuration(configuration: &TypoScriptConfiguration) -> Self {
        if !configuration.bool_by_path("search.grouping", false) {
            return Self::default();
        }
        let count = |path: &str, default: u32| {
            u32::try_from(configuration.int_by_path(path, i64::from(default)))
                .ok()
                .filter(|count| *count > 0)
                .unwrap_or(default)
        };
        let mut grouping = Self::enabled(
            count("search.grouping.numberOfGroups", DEFAULT_NUMBER_OF_GROUPS),
            count(
                "search.grouping.numberOfResultsPerGroup",
                DEFAULT_RESULTS_PER_GROUP,
            ),
        );

        let Some(groups) = configuration.object_by_path("search.grouping.groups") else {
            return grouping;
        };
        for name in child_names(groups) {
            let Some(group) = child(groups, &name) else {
                continue;
            };
            if let Some(field) = text(group, "field") {
                grouping.fields.push(field);
            }
            if let Some(sorting) = text(group, "sortBy") {
                grouping.sortings.push(sorting);
            }
            if let Some(queries) = child(group, "queries") {
                grouping
                    .queries
                    .extend(queries.values().filter_map(as_string).filter(|query| !query.is_empty()));
            }
        }
        grouping
    }

    /// Returns true when grouping parameters are set.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }
}

fn text(node: &serde_json::Map<String, serde_json::Value>, key: &str) -> Option<String> {
    scalar(node, key)
        .and_then(as_string)
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

fn is_group_parameter(name: &str) -> bool {
    name == "group" || name.starts_with("group.")
}

impl ParameterBuilder for Grouping {
    fn name(&self) -> &'static str {
        "grouping"
    }

    fn build(&self, parameters: &mut QueryParameters) {
        parameters.remove_where(is_group_parameter);
        if !self.enabled {
            return;
        }
        parameters
            .set("group", true)
            .set("group.format", "grouped")
            .set("group.ngroups", true)
            .set("group.limit", self.results_per_group)
            .set("rows", self.number_of_groups);
        if !self.fields.is_empty() {
            parameters.set("group.field", self.fields.clone());
        }
        if !self.queries.is_empty() {
            parameters.set("group.query", self.queries.clone());
        }
        if !self.sortings.is_empty() {
            parameters.set("group.sort", self.sortings.clone());
        }
    }
}
