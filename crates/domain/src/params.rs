//! Solr request parameter map shared by query builders and transports.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Name under which named filter queries are rendered.
pub const FILTER_QUERY_PARAMETER: &str = "fq";
/// Name under which return fields are rendered.
pub const RETURN_FIELDS_PARAMETER: &str = "fl";

/// A single Solr parameter value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParameterValue {
    /// Scalar parameter (`q.op=AND`).
    Single(String),
    /// Repeated parameter (`facet.field=a&facet.field=b`).
    Multi(Vec<String>),
}

impl ParameterValue {
    /// Returns the scalar value, if this is a single parameter.
    #[must_use]
    pub fn as_single(&self) -> Option<&str> {
        match self {
            Self::Single(value) => Some(value),
            Self::Multi(_) => None,
        }
    }

    /// Returns all values, a scalar being a one-element list.
    #[must_use]
    pub fn values(&self) -> Vec<&str> {
        match self {
            Self::Single(value) => vec![value.as_str()],
            Self::Multi(values) => values.iter().map(String::as_str).collect(),
        }
    }
}

impl fmt::Display for ParameterValue {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single(value) => formatter.write_str(value),
            Self::Multi(values) => formatter.write_str(&values.join(",")),
        }
    }
}

impl From<&str> for ParameterValue {
    fn from(value: &str) -> Self {
        Self::Single(value.to_owned())
    }
}

impl From<String> for ParameterValue {
    fn from(value: String) -> Self {
        Self::Single(value)
    }
}

impl From<bool> for ParameterValue {
    fn from(value: bool) -> Self {
        Self::Single(if value { "true" } else { "false" }.to_owned())
    }
}

impl From<u32> for ParameterValue {
    fn from(value: u32) -> Self {
        Self::Single(value.to_string())
    }
}

impl From<i64> for ParameterValue {
    fn from(value: i64) -> Self {
        Self::Single(value.to_string())
    }
}

impl From<Vec<String>> for ParameterValue {
    fn from(values: Vec<String>) -> Self {
        Self::Multi(values)
    }
}

/// Mutable query-building context passed through the builder pipeline.
///
/// Holds plain parameters, named filter queries and the return-field list.
/// Builders own a subset of names and either set or remove them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryParameters {
    params: BTreeMap<String, ParameterValue>,
    filters: Vec<(String, String)>,
    fields: Vec<String>,
}

impl QueryParameters {
    /// Create an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set (or replace) a parameter.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<ParameterValue>) -> &mut Self {
        self.params.insert(name.into(), value.into());
        self
    }

    /// Remove a parameter, returning its previous value.
    pub fn remove(&mut self, name: &str) -> Option<ParameterValue> {
        self.params.remove(name)
    }

    /// Remove every parameter whose name matches `predicate`.
    pub fn remove_where(&mut self, predicate: impl Fn(&str) -> bool) {
        self.params.retain(|name, _| !predicate(name));
    }

    /// Append a value to a repeated parameter (a scalar is promoted).
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        let value = value.into();
        let name = name.into();
        let merged = match self.params.remove(&name) {
            None => ParameterValue::Multi(vec![value]),
            Some(ParameterValue::Single(existing)) => ParameterValue::Multi(vec![existing, value]),
            Some(ParameterValue::Multi(mut existing)) => {
                existing.push(value);
                ParameterValue::Multi(existing)
            },
        };
        self.params.insert(name, merged);
        self
    }

    /// Returns a parameter value.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ParameterValue> {
        self.params.get(name)
    }

    /// Returns a scalar parameter value.
    #[must_use]
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.params.get(name).and_then(ParameterValue::as_single)
    }

    /// Returns true when the parameter is present.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.params.contains_key(name)
    }

    /// Add (or replace in place) a named filter query.
    pub fn add_filter(&mut self, name: impl Into<String>, query: impl Into<String>) -> &mut Self {
        let name = name.into();
        let query = query.into();
        if let Some(entry) = self.filters.iter_mut().find(|(key, _)| *key == name) {
            entry.1 = query;
        } else {
            self.filters.push((name, query));
        }
        self
    }

    /// Remove a named filter query.
    pub fn remove_filter(&mut self, name: &str) -> Option<String> {
        let position = self.filters.iter().position(|(key, _)| key == name)?;
        Some(self.filters.remove(position).1)
    }

    /// Remove every named filter whose name matches `predicate`.
    pub fn remove_filters_where(&mut self, predicate: impl Fn(&str) -> bool) {
        self.filters.retain(|(name, _)| !predicate(name));
    }

    /// Returns a named filter query.
    #[must_use]
    pub fn filter(&self, name: &str) -> Option<&str> {
        self.filters
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, query)| query.as_str())
    }

    /// Iterate named filter queries in insertion order.
    pub fn filters(&self) -> impl Iterator<Item = (&str, &str)> {
        self.filters
            .iter()
            .map(|(name, query)| (name.as_str(), query.as_str()))
    }

    /// Replace the return-field list.
    pub fn set_fields(&mut self, fields: Vec<String>) -> &mut Self {
        self.fields = fields;
        self
    }

    /// Append a return field unless already present.
    pub fn add_field(&mut self, field: impl Into<String>) -> &mut Self {
        let field = field.into();
        if !self.fields.contains(&field) {
            self.fields.push(field);
        }
        self
    }

    /// Remove a return field.
    pub fn remove_field(&mut self, field: &str) -> &mut Self {
        self.fields.retain(|existing| existing != field);
        self
    }

    /// Returns the return-field list.
    #[must_use]
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Render the final associative parameter map (`fq` and `fl` included).
    #[must_use]
    pub fn to_map(&self) -> BTreeMap<String, ParameterValue> {
        let mut map = self.params.clone();
        if !self.filters.is_empty() {
            let queries = self
                .filters
                .iter()
                .map(|(_, query)| query.clone())
                .collect();
            map.insert(
                FILTER_QUERY_PARAMETER.to_owned(),
                ParameterValue::Multi(queries),
            );
        }
        if !self.fields.is_empty() {
            map.insert(
                RETURN_FIELDS_PARAMETER.to_owned(),
                ParameterValue::Single(self.fields.join(",")),
            );
        }
        map
    }

    /// Render name/value pairs with repeated parameters expanded, for transports.
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        for (name, value) in self.to_map() {
            match value {
                ParameterValue::Single(value) => pairs.push((name, value)),
                ParameterValue::Multi(values) => {
                    pairs.extend(values.into_iter().map(|value| (name.clone(), value)));
                },
            }
        }
        pairs
    }
}
