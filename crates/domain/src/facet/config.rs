//! Facet configuration and the kind-specific payloads.

use crate::typoscript::{
    as_i64, as_string, child, child_names, is_strictly_enabled, is_truthy, scalar, trim_explode,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use solr_search_shared::{ErrorCode, ErrorEnvelope};
use std::collections::BTreeMap;
use std::fmt;

/// Group a facet belongs to when none is configured.
pub const DEFAULT_GROUP_NAME: &str = "main";

/// Built-in facet types.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FacetType {
    /// Field value options (`options`).
    #[default]
    #[serde(rename = "options")]
    Options,
    /// Path hierarchy (`hierarchy`).
    #[serde(rename = "hierarchy")]
    Hierarchy,
    /// Configured facet queries (`queryGroup`).
    #[serde(rename = "queryGroup")]
    QueryGroup,
    /// Date window (`dateRange`).
    #[serde(rename = "dateRange")]
    DateRange,
    /// Numeric window (`numericRange`).
    #[serde(rename = "numericRange")]
    NumericRange,
}

impl FacetType {
    /// All built-in types.
    pub const ALL: [Self; 5] = [
        Self::Options,
        Self::Hierarchy,
        Self::QueryGroup,
        Self::DateRange,
        Self::NumericRange,
    ];

    /// Returns the configuration type string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Options => "options",
            Self::Hierarchy => "hierarchy",
            Self::QueryGroup => "queryGroup",
            Self::DateRange => "dateRange",
            Self::NumericRange => "numericRange",
        }
    }

    /// Parse a built-in type string.
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == input)
    }
}

impl fmt::Display for FacetType {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// How multiple active values of one facet combine into a filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FacetOperator {
    /// All values must match.
    #[default]
    And,
    /// Any value may match.
    Or,
}

impl FacetOperator {
    /// Lenient parse: anything but `OR` (case-insensitive) is `AND`.
    #[must_use]
    pub fn parse(input: &str) -> Self {
        if input.trim().eq_ignore_ascii_case("or") {
            Self::Or
        } else {
            Self::And
        }
    }

    /// Returns the Solr boolean operator.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
        }
    }
}

/// Visibility precondition on another facet's selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirement {
    /// Requirement name (configuration key).
    pub name: String,
    /// Name of the facet whose selection is inspected.
    pub facet: String,
    /// Accepted values, sentinels or glob patterns.
    pub values: Vec<String>,
    /// Invert the outcome.
    pub negate: bool,
}

/// One entry of a query group facet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryGroupDefinition {
    /// Group name, used as the URL value.
    pub name: String,
    /// Solr query expression for the field.
    pub query: String,
    /// Optional display label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Range window of date and numeric range facets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeSettings {
    /// Window start.
    pub start: String,
    /// Window end.
    pub end: String,
    /// Bucket gap.
    pub gap: String,
}

impl RangeSettings {
    fn date_defaults() -> Self {
        Self {
            start: "NOW/DAY-1YEAR".to_owned(),
            end: "NOW/DAY+1YEAR".to_owned(),
            gap: "+1DAY".to_owned(),
        }
    }

    fn numeric_defaults() -> Self {
        Self {
            start: "0".to_owned(),
            end: "100".to_owned(),
            gap: "1".to_owned(),
        }
    }

    fn from_node(node: Option<&Map<String, Value>>, defaults: Self) -> Self {
        let Some(node) = node else {
            return defaults;
        };
        let read = |key: &str, fallback: String| {
            scalar(node, key)
                .and_then(as_string)
                .filter(|value| !value.is_empty())
                .unwrap_or(fallback)
        };
        Self {
            start: read("start", defaults.start),
            end: read("end", defaults.end),
            gap: read("gap", defaults.gap),
        }
    }
}

/// Kind-specific facet payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum FacetKind {
    /// Options facet with optional JSON facet metrics (`name => expression`).
    Options {
        /// Metric expressions keyed by metric name.
        metrics: BTreeMap<String, String>,
    },
    /// Hierarchy facet.
    Hierarchy,
    /// Query group facet.
    QueryGroup {
        /// Configured groups in order.
        groups: Vec<QueryGroupDefinition>,
    },
    /// Date range facet.
    DateRange {
        /// Configured window.
        range: RangeSettings,
    },
    /// Numeric range facet.
    NumericRange {
        /// Configured window.
        range: RangeSettings,
    },
}

impl FacetKind {
    /// Returns the facet type this payload belongs to.
    #[must_use]
    pub const fn facet_type(&self) -> FacetType {
        match self {
            Self::Options { .. } => FacetType::Options,
            Self::Hierarchy => FacetType::Hierarchy,
            Self::QueryGroup { .. } => FacetType::QueryGroup,
            Self::DateRange { .. } => FacetType::DateRange,
            Self::NumericRange { .. } => FacetType::NumericRange,
        }
    }
}

/// Settings shared by every facet type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacetSettings {
    /// Raw sort mode (`count`, `index`, `metrics_*`, `1`, ...).
    pub sort_by: Value,
    /// Raw sort direction.
    pub sort_direction: Option<String>,
    /// Values listed first, in this order.
    pub manual_sort_order: Vec<String>,
    /// Reverse the item order.
    pub reverse_order: bool,
    /// Values never shown.
    pub exclude_values: Vec<String>,
    /// Keep the facet even without items.
    pub show_even_when_empty: bool,
    /// Count toward used facets.
    pub include_in_used_facets: bool,
    /// Count toward available facets.
    pub include_in_available_facets: bool,
    /// Exclude this facet's own filter while counting its options.
    pub keep_all_options_on_selection: bool,
    /// Combination of multiple active values.
    pub operator: FacetOperator,
    /// Per-facet option limit.
    pub facet_limit: Option<i64>,
    /// Per-facet minimum count.
    pub minimum_count: Option<i64>,
    /// Rendering group.
    pub group_name: String,
}

impl Default for FacetSettings {
    fn default() -> Self {
        Self {
            sort_by: Value::Null,
            sort_direction: None,
            manual_sort_order: Vec::new(),
            reverse_order: false,
            exclude_values: Vec::new(),
            show_even_when_empty: false,
            include_in_used_facets: true,
            include_in_available_facets: true,
            keep_all_options_on_selection: false,
            operator: FacetOperator::And,
            facet_limit: None,
            minimum_count: None,
            group_name: DEFAULT_GROUP_NAME.to_owned(),
        }
    }
}

impl FacetSettings {
    fn from_node(node: &Map<String, Value>) -> Self {
        let defaults = Self::default();
        let text = |key: &str| scalar(node, key).and_then(as_string);
        let list = |key: &str| {
            text(key)
                .map(|value| trim_explode(&value, ','))
                .unwrap_or_default()
        };
        let flag = |key: &str, fallback: bool| scalar(node, key).map_or(fallback, is_truthy);

        Self {
            sort_by: scalar(node, "sortBy").cloned().unwrap_or(Value::Null),
            sort_direction: text("sortDirection").filter(|value| !value.is_empty()),
            manual_sort_order: list("manualSortOrder"),
            reverse_order: scalar(node, "reverseOrder").is_some_and(is_strictly_enabled),
            exclude_values: list("excludeValues"),
            show_even_when_empty: flag("showEvenWhenEmpty", false),
            include_in_used_facets: flag("includeInUsedFacets", true),
            include_in_available_facets: flag("includeInAvailableFacets", true),
            keep_all_options_on_selection: flag("keepAllOptionsOnSelection", false),
            operator: text("operator").map_or(defaults.operator, |value| FacetOperator::parse(&value)),
            facet_limit: scalar(node, "facetLimit").and_then(as_i64),
            minimum_count: scalar(node, "minimumCount").and_then(as_i64),
            group_name: text("groupName")
                .filter(|value| !value.is_empty())
                .unwrap_or(defaults.group_name),
        }
    }
}

/// Invalid facet configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FacetConfigurationError {
    /// A facet has no `field`.
    MissingField {
        /// Facet name.
        facet: String,
    },
    /// A requirement does not name a target facet.
    InvalidRequirement {
        /// Facet name.
        facet: String,
        /// Requirement name.
        requirement: String,
    },
    /// A query group entry has no `query`.
    InvalidQueryGroup {
        /// Facet name.
        facet: String,
        /// Group name.
        group: String,
    },
    /// A registry alias shadows a built-in type.
    ReservedTypeName {
        /// Alias that was rejected.
        name: String,
    },
}

impl FacetConfigurationError {
    fn error_code(&self) -> ErrorCode {
        match self {
            Self::MissingField { .. } => ErrorCode::new("facet", "missing_field"),
            Self::InvalidRequirement { .. } => ErrorCode::new("facet", "invalid_requirement"),
            Self::InvalidQueryGroup { .. } => ErrorCode::new("facet", "invalid_query_group"),
            Self::ReservedTypeName { .. } => ErrorCode::new("facet", "reserved_type_name"),
        }
    }
}

impl fmt::Display for FacetConfigurationError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField { facet } => {
                write!(formatter, "facet `{facet}` has no field configured")
            },
            Self::InvalidRequirement { facet, requirement } => write!(
                formatter,
                "requirement `{requirement}` of facet `{facet}` names no facet"
            ),
            Self::InvalidQueryGroup { facet, group } => write!(
                formatter,
                "query group `{group}` of facet `{facet}` has no query"
            ),
            Self::ReservedTypeName { name } => {
                write!(formatter, "facet type name `{name}` is reserved")
            },
        }
    }
}

impl std::error::Error for FacetConfigurationError {}

impl From<FacetConfigurationError> for ErrorEnvelope {
    fn from(error: FacetConfigurationError) -> Self {
        let envelope = Self::expected(error.error_code(), error.to_string());
        match error {
            FacetConfigurationError::MissingField { facet } => {
                envelope.with_metadata("facet", facet)
            },
            FacetConfigurationError::InvalidRequirement { facet, requirement } => envelope
                .with_metadata("facet", facet)
                .with_metadata("requirement", requirement),
            FacetConfigurationError::InvalidQueryGroup { facet, group } => envelope
                .with_metadata("facet", facet)
                .with_metadata("group", group),
            FacetConfigurationError::ReservedTypeName { name } => {
                envelope.with_metadata("name", name)
            },
        }
    }
}

/// Resolved configuration of one facet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacetConfiguration {
    /// Facet name (unique within a search).
    pub name: String,
    /// Solr field.
    pub field: String,
    /// Display label.
    pub label: String,
    /// Shared settings.
    pub settings: FacetSettings,
    /// Visibility requirements.
    pub requirements: Vec<Requirement>,
    /// Kind payload (carries the resolved type).
    pub kind: FacetKind,
    /// Raw configuration sub-tree.
    #[serde(skip)]
    pub raw: Map<String, Value>,
}

impl FacetConfiguration {
    /// Build the configuration of facet `name` from its TypoScript node.
    pub fn from_node(
        name: &str,
        node: &Map<String, Value>,
        facet_type: FacetType,
    ) -> Result<Self, FacetConfigurationError> {
        let field = scalar(node, "field")
            .and_then(as_string)
            .filter(|field| !field.trim().is_empty())
            .ok_or_else(|| FacetConfigurationError::MissingField {
                facet: name.to_owned(),
            })?;
        let label = scalar(node, "label")
            .and_then(as_string)
            .unwrap_or_else(|| name.to_owned());

        Ok(Self {
            name: name.to_owned(),
            field: field.trim().to_owned(),
            label,
            settings: FacetSettings::from_node(node),
            requirements: parse_requirements(name, node)?,
            kind: parse_kind(name, node, facet_type)?,
            raw: node.clone(),
        })
    }

    /// Returns the resolved facet type.
    #[must_use]
    pub const fn facet_type(&self) -> FacetType {
        self.kind.facet_type()
    }
}

fn parse_requirements(
    facet: &str,
    node: &Map<String, Value>,
) -> Result<Vec<Requirement>, FacetConfigurationError> {
    let Some(requirements) = child(node, "requirements") else {
        return Ok(Vec::new());
    };

    let mut parsed = Vec::new();
    for name in child_names(requirements) {
        let Some(entry) = child(requirements, &name) else {
            continue;
        };
        let target = scalar(entry, "facet")
            .and_then(as_string)
            .map(|target| target.trim().to_owned())
            .filter(|target| !target.is_empty())
            .ok_or_else(|| FacetConfigurationError::InvalidRequirement {
                facet: facet.to_owned(),
                requirement: name.clone(),
            })?;
        let values = scalar(entry, "values")
            .and_then(as_string)
            .map(|values| trim_explode(&values, ','))
            .unwrap_or_default();
        parsed.push(Requirement {
            name,
            facet: target,
            values,
            negate: scalar(entry, "negate").is_some_and(is_truthy),
        });
    }
    Ok(parsed)
}

fn parse_kind(
    facet: &str,
    node: &Map<String, Value>,
    facet_type: FacetType,
) -> Result<FacetKind, FacetConfigurationError> {
    Ok(match facet_type {
        FacetType::Options => {
            let metrics = child(node, "metrics")
                .map(|metrics| {
                    metrics
                        .iter()
                        .filter_map(|(name, expression)| {
                            as_string(expression).map(|expression| (name.clone(), expression))
                        })
                        .collect()
                })
                .unwrap_or_default();
            FacetKind::Options { metrics }
        },
        FacetType::Hierarchy => FacetKind::Hierarchy,
        FacetType::QueryGroup => FacetKind::QueryGroup {
            groups: parse_query_groups(facet, node)?,
        },
        FacetType::DateRange => FacetKind::DateRange {
            range: RangeSettings::from_node(child(node, "dateRange"), RangeSettings::date_defaults()),
        },
        FacetType::NumericRange => FacetKind::NumericRange {
            range: RangeSettings::from_node(
                child(node, "numericRange"),
                RangeSettings::numeric_defaults(),
            ),
        },
    })
}

fn parse_query_groups(
    facet: &str,
    node: &Map<String, Value>,
) -> Result<Vec<QueryGroupDefinition>, FacetConfigurationError> {
    let Some(groups) = child(node, "queryGroup") else {
        return Ok(Vec::new());
    };

    let mut parsed = Vec::new();
    for name in child_names(groups) {
        let Some(entry) = child(groups, &name) else {
            continue;
        };
        let query = scalar(entry, "query")
            .and_then(as_string)
            .filter(|query| !query.trim().is_empty())
            .ok_or_else(|| FacetConfigurationError::InvalidQueryGroup {
                facet: facet.to_owned(),
                group: name.clone(),
            })?;
        parsed.push(QueryGroupDefinition {
            label: scalar(entry, "label").and_then(as_string),
            name,
            query,
        });
    }
    Ok(parsed)
}
