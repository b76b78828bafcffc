//! Result sorting (`sort`).

use crate::builder::ParameterBuilder;
use crate::error::QueryError;
use solr_search_config::TypoScriptConfiguration;
use solr_search_domain::{QueryParameters, SearchRequest, SortDirection};
use tracing::debug;

const PARAMETER: &str = "sort";

/// Field name standing for relevance ranking.
pub const RELEVANCE_FIELD: &str = "relevance";

/// A single `field direction` clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sorting {
    field: String,
    direction: SortDirection,
    enabled: bool,
}

impl Sorting {
    /// Create a sorting from a field and a direction literal.
    pub fn new(field: &str, direction: &str) -> Result<Self, QueryError> {
        let direction =
            SortDirection::parse(direction).ok_or_else(|| QueryError::InvalidSortDirection {
                value: direction.to_owned(),
            })?;
        Ok(Self::with_direction(field, direction))
    }

    /// Create a sorting from a typed direction.
    #[must_use]
    pub fn with_direction(field: &str, direction: SortDirection) -> Self {
        Self {
            field: field.trim().to_owned(),
            direction,
            enabled: true,
        }
    }

    /// A sorting that removes `sort`.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            field: String::new(),
            direction: SortDirection::Asc,
            enabled: false,
        }
    }

    /// Parse `"field direction"`; the direction defaults to `asc`.
    pub fn parse(clause: &str) -> Result<Self, QueryError> {
        let mut parts = clause.split_whitespace();
        let field = parts.next().unwrap_or_default();
        match parts.next() {
            Some(direction) => Self::new(field, direction),
            None => Ok(Self::with_direction(field, SortDirection::Asc)),
        }
    }

    /// Rendered clause; empty for relevance or when disabled.
    #[must_use]
    pub fn clause(&self) -> String {
        if !self.enabled || self.field.is_empty() || self.field == RELEVANCE_FIELD {
            return String::new();
        }
        format!("{} {}", self.field, self.direction)
    }
}

impl ParameterBuilder for Sorting {
    fn name(&self) -> &'static str {
        "sorting"
    }

    fn build(&self, parameters: &mut QueryParameters) {
        apply_clause(parameters, self.clause());
    }
}

/// Comma separated list of sortings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sortings {
    sortings: Vec<Sorting>,
}

impl Sortings {
    /// Create from individual sortings.
    #[must_use]
    pub const fn new(sortings: Vec<Sorting>) -> Self {
        Self { sortings }
    }

    /// Parse `"title asc, created desc"`.
    pub fn parse(input: &str) -> Result<Self, QueryError> {
        input
            .split(',')
            .map(str::trim)
            .filter(|clause| !clause.is_empty())
            .map(Sorting::parse)
            .collect::<Result<Vec<_>, _>>()
            .map(Self::new)
    }

    /// Resolve the sorting for `request`.
    ///
    /// The request names a configured sorting option (`title desc`), which
    /// maps to the option's Solr field. Without one, `search.query.sortBy`
    /// applies.
    pub fn from_request(
        configuration: &TypoScriptConfiguration,
        request: &SearchRequest,
    ) -> Result<Self, QueryError> {
        if configuration.search_sorting() {
            if let Some(name) = request.sorting_name() {
                let Some(option) = configuration.search_sorting_option(&name) else {
                    debug!(option = %name, "ignoring unknown sorting option");
                    return Ok(Self::default());
                };
                let direction = request
                    .sorting_direction()
                    .unwrap_or(option.default_direction);
                return Ok(Self::new(vec![Sorting::with_direction(&option.field, direction)]));
            }
        }
        configuration
            .non_empty_string_by_path("search.query.sortBy")
            .map_or_else(|| Ok(Self::default()), |sort_by| Self::parse(&sort_by))
    }

    /// Rendered clause list.
    #[must_use]
    pub fn clause(&self) -> String {
        self.sortings
            .iter()
            .map(Sorting::clause)
            .filter(|clause| !clause.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl ParameterBuilder for Sortings {
    fn name(&self) -> &'static str {
        "sortings"
    }

    fn build(&self, parameters: &mut QueryParameters) {
        apply_clause(parameters, self.clause());
    }
}

fn apply_clause(parameters: &mut QueryParameters, clause: String) {
    if clause.is_empty() {
        parameters.remove(PARAMETER);
    } else {
        parameters.set(PARAMETER, clause);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use solr_search_domain::ParameterStyle;
    use std::error::Error;

    #[test]
    fn relevance_collapses_to_no_sort() -> Result<(), Box<dyn Error>> {
        let mut parameters = QueryParameters::new();
        parameters.set("sort", "title asc");
        Sorting::new("relevance", "desc")?.build(&mut parameters);
        assert!(!parameters.contains("sort"));
        Ok(())
    }

    #[test]
    fn invalid_direction_is_rejected() {
        assert_eq!(
            Sorting::new("title", "up"),
            Err(QueryError::InvalidSortDirection {
                value: "up".to_owned()
            })
        );
    }

    #[test]
    fn sortings_join_clauses() -> Result<(), Box<dyn Error>> {
        let sortings = Sortings::parse("title asc, relevance desc, created DESC")?;
        assert_eq!(sortings.clause(), "title asc, created desc");
        Ok(())
    }

    #[test]
    fn request_sorting_resolves_configured_field() -> Result<(), Box<dyn Error>> {
        let configuration = TypoScriptConfiguration::from_value(json!({
            "search.": {
                "sorting": 1,
                "sorting.": { "options.": { "title.": { "field": "sortTitle" } } },
                "query.": { "sortBy": "created desc" }
            }
        }));
        let request = SearchRequest::from_value(
            json!({ "tx_solr": { "sort": "title desc" } }),
            "tx_solr",
            ParameterStyle::Index,
        );
        let sortings = Sortings::from_request(&configuration, &request)?;
        assert_eq!(sortings.clause(), "sortTitle desc");

        let sortings = Sortings::from_request(&configuration, &SearchRequest::default())?;
        assert_eq!(sortings.clause(), "created desc");
        Ok(())
    }
}
