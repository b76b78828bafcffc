//! Return field list (`fl`).

use crate::builder::ParameterBuilder;
use solr_search_config::TypoScriptConfiguration;
use solr_search_domain::QueryParameters;
use solr_search_domain::typoscript::trim_explode;

/// Default `search.query.returnFields`.
pub const DEFAULT_RETURN_FIELDS: &str = "*, score";

const WILDCARD: &str = "*";

/// Fields returned with each document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReturnFields {
    fields: Vec<String>,
}

impl ReturnFields {
    /// Create from a field list (kept as given).
    #[must_use]
    pub const fn new(fields: Vec<String>) -> Self {
        Self { fields }
    }

    /// Parse a comma separated list.
    #[must_use]
    pub fn from_string(input: &str) -> Self {
        Self::new(trim_explode(input, ','))
    }

    /// Read `search.query.returnFields`.
    #[must_use]
    pub fn from_configuration(configuration: &TypoScriptConfiguration) -> Self {
        Self::from_string(&configuration.string_by_path("search.query.returnFields", DEFAULT_RETURN_FIELDS))
    }

    /// Add a field. Any plain field drops the `*` wildcard; computed fields
    /// (`name:[transformer]`) keep it.
    pub fn add(&mut self, field: &str) -> &mut Self {
        if !(field.contains('[') || field.contains(']')) {
            self.fields.retain(|existing| existing != WILDCARD);
        }
        self.fields.push(field.to_owned());
        self
    }

    /// Remove every occurrence of `field`.
    pub fn remove(&mut self, field: &str) -> &mut Self {
        self.fields.retain(|existing| existing != field);
        self
    }

    /// Fields without duplicates, first occurrence wins.
    #[must_use]
    pub fn values(&self) -> Vec<String> {
        let mut values: Vec<String> = Vec::with_capacity(self.fields.len());
        for field in &self.fields {
            if !values.contains(field) {
                values.push(field.clone());
            }
        }
        values
    }
}

impl ParameterBuilder for ReturnFields {
    fn name(&self) -> &'static str {
        "returnFields"
    }

    fn build(&self, parameters: &mut QueryParameters) {
        parameters.set_fields(self.values());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_field_replaces_wildcard() {
        let mut fields = ReturnFields::from_string("*, score");
        fields.add("title");
        assert_eq!(fields.values(), vec!["score", "title"]);
    }

    #[test]
    fn computed_field_keeps_wildcard() {
        let mut fields = ReturnFields::from_string("*");
        fields.add("isElevated:[elevated]");
        assert_eq!(fields.values(), vec!["*", "isElevated:[elevated]"]);
    }

    #[test]
    fn values_deduplicate_in_first_position() {
        let mut fields = ReturnFields::from_string("id, title, id, url");
        fields.remove("url");
        assert_eq!(fields.values(), vec!["id", "title"]);

        let mut parameters = QueryParameters::new();
        fields.build(&mut parameters);
        assert_eq!(parameters.fields(), &["id".to_owned(), "title".to_owned()]);
    }

    #[test]
    fn empty_list_removes_fl() {
        let mut parameters = QueryParameters::new();
        parameters.set_fields(vec!["id".to_owned()]);
        ReturnFields::from_string(" , ").build(&mut parameters);
        assert!(!parameters.to_map().contains_key("fl"));
    }
}
