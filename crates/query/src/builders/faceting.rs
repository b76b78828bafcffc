//! Faceting (`facet*`, `f.*.facet.*`, `json.facet`).

use crate::builder::ParameterBuilder;
use crate::error::QueryError;
use crate::facets::{FacetParameters, FacetQueryContext, all_facet_parameters};
use serde_json::{Map, Value};
use solr_search_config::TypoScriptConfiguration;
use solr_search_domain::typoscript::as_string;
use solr_search_domain::{FacetConfiguration, ParameterValue, QueryParameters, SortingExpression};

/// Name of the JSON facet API parameter.
pub const JSON_FACET_PARAMETER: &str = "json.facet";

/// Faceting settings plus the merged contributions of all facets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Faceting {
    enabled: bool,
    minimum_count: i64,
    limit: i64,
    sort: String,
    facets: FacetParameters,
    additional: Vec<(String, ParameterValue)>,
}

impl Faceting {
    /// Faceting that removes every facet parameter.
    #[must_use]
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Enabled faceting with global settings and no facets.
    #[must_use]
    pub fn new(minimum_count: i64, limit: i64, sort: &str) -> Self {
        Self {
            enabled: true,
            minimum_count,
            limit,
            sort: sort.to_owned(),
            ..Self::default()
        }
    }

    /// Read `search.faceting` and collect the parameters of `facets`.
    pub fn from_configuration(
        configuration: &TypoScriptConfiguration,
        facets: &[FacetConfiguration],
    ) -> Result<Self, QueryError> {
        if !configuration.search_faceting() {
            return Ok(Self::disabled());
        }
        let context = FacetQueryContext::new(configuration, facets);
        let mut faceting = Self::new(
            context.minimum_count,
            context.limit,
            &SortingExpression::for_facet(&configuration.search_faceting_sort_by()),
        );
        faceting.facets = all_facet_parameters(facets, &context);
        faceting.set_additional_parameters(&configuration.search_faceting_additional_parameters())?;
        Ok(faceting)
    }

    /// Replace the additional raw parameters and encode `json.facet`.
    ///
    /// TypoScript child nodes are joined into dotted names (`facet.` +
    /// `range.other` gives `facet.range.other`). A structured `json.facet`
    /// is merged with the facet definitions and JSON encoded; a scalar one
    /// replaces them. Everything else passes through.
    pub fn set_additional_parameters(&mut self, parameters: &Map<String, Value>) -> Result<(), QueryError> {
        let mut flattened = Vec::new();
        flatten_parameters(parameters, "", &mut flattened);

        self.additional.clear();
        let mut json_facets = self.facets.json_facets.clone();
        let mut raw_json_facet = None;
        for (name, value) in flattened {
            if name == JSON_FACET_PARAMETER {
                match value {
                    Value::Object(definitions) => json_facets.extend(definitions),
                    other => raw_json_facet = as_string(&other),
                }
                continue;
            }
            let value = match value {
                Value::Array(values) => {
                    ParameterValue::Multi(values.iter().filter_map(as_string).collect())
                },
                other => match as_string(&other) {
                    Some(value) => ParameterValue::Single(value),
                    None => continue,
                },
            };
            self.additional.push((name, value));
        }

        let encoded = match raw_json_facet {
            Some(raw) => Some(raw),
            None if json_facets.is_empty() => None,
            None => Some(serde_json::to_string(&Value::Object(json_facets)).map_err(|error| {
                QueryError::JsonFacetEncoding {
                    message: error.to_string(),
                }
            })?),
        };
        if let Some(encoded) = encoded {
            self.additional
                .push((JSON_FACET_PARAMETER.to_owned(), ParameterValue::Single(encoded)));
        }
        Ok(())
    }

    /// Returns true when facet parameters are set.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Contributions of the configured facets.
    #[must_use]
    pub const fn facet_parameters(&self) -> &FacetParameters {
        &self.facets
    }
}

fn flatten_parameters(node: &Map<String, Value>, prefix: &str, output: &mut Vec<(String, Value)>) {
    for (key, value) in node {
        let (name, is_node) = match key.strip_suffix('.') {
            Some(name) if value.is_object() => (name, true),
            _ => (key.as_str(), false),
        };
        let name = if prefix.is_empty() {
            name.to_owned()
        } else {
            format!("{prefix}.{name}")
        };
        match value {
            Value::Object(children) if is_node && name != JSON_FACET_PARAMETER => {
                flatten_parameters(children, &name, output);
            },
            _ => output.push((name, value.clone())),
        }
    }
}

/// `facet`, `facet.*`, `f.<field>.facet.*` and `json.facet`.
fn is_faceting_parameter(name: &str) -> bool {
    name == "facet"
        || name.starts_with("facet.")
        || name == JSON_FACET_PARAMETER
        || (name.starts_with("f.") && name.contains(".facet."))
}

impl ParameterBuilder for Faceting {
    fn name(&self) -> &'static str {
        "faceting"
    }

    fn build(&self, parameters: &mut QueryParameters) {
        parameters.remove_where(is_faceting_parameter);
        if !self.enabled {
            return;
        }

        parameters
            .set("facet", true)
            .set("facet.mincount", self.minimum_count)
            .set("facet.limit", self.limit);
        if !self.sort.is_empty() {
            parameters.set("facet.sort", self.sort.as_str());
        }
        if !self.facets.fields.is_empty() {
            parameters.set("facet.field", self.facets.fields.clone());
        }
        if !self.facets.queries.is_empty() {
            parameters.set("facet.query", self.facets.queries.clone());
        }
        if !self.facets.ranges.is_empty() {
            parameters.set("facet.range", self.facets.ranges.clone());
        }
        for (name, value) in &self.facets.per_field {
            parameters.set(name.as_str(), value.as_str());
        }
        for (name, value) in &self.additional {
            parameters.set(name.as_str(), value.clone());
        }
    }
}
