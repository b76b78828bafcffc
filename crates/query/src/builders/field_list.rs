//! Boosted field lists (`qf`, `pf`, `pf2`, `pf3`).

use crate::builder::ParameterBuilder;
use solr_search_config::TypoScriptConfiguration;
use solr_search_domain::QueryParameters;

/// Default `search.query.queryFields`.
pub const DEFAULT_QUERY_FIELDS: &str = "content^40.0, title^5.0, keywords^2.0, tagsH1^5.0, tagsH2H3^3.0, tagsH4H5H6^2.0, tagsInline^1.0";

const DEFAULT_BOOST: f64 = 1.0;

/// Ordered field to boost mapping.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldList {
    fields: Vec<(String, f64)>,
}

impl FieldList {
    /// Parse `"field^boost,field2^boost2"`. Entries are trimmed, empty
    /// entries dropped, and a missing or invalid boost is `1.0`.
    #[must_use]
    pub fn parse(input: &str, delimiter: char) -> Self {
        let mut list = Self::default();
        for entry in input.split(delimiter).map(str::trim).filter(|entry| !entry.is_empty()) {
            let (field, boost) = match entry.split_once('^') {
                Some((field, boost)) => (
                    field.trim(),
                    boost.trim().parse::<f64>().unwrap_or(DEFAULT_BOOST),
                ),
                None => (entry, DEFAULT_BOOST),
            };
            if !field.is_empty() {
                list.add(field, boost);
            }
        }
        list
    }

    /// Add a field; re-adding replaces the boost in place.
    pub fn add(&mut self, field: &str, boost: f64) -> &mut Self {
        match self.fields.iter_mut().find(|(existing, _)| existing == field) {
            Some(entry) => entry.1 = boost,
            None => self.fields.push((field.to_owned(), boost)),
        }
        self
    }

    /// Boost of `field`.
    #[must_use]
    pub fn boost(&self, field: &str) -> Option<f64> {
        self.fields
            .iter()
            .find(|(existing, _)| existing == field)
            .map(|(_, boost)| *boost)
    }

    /// Fields with boosts, in order.
    #[must_use]
    pub fn fields(&self) -> &[(String, f64)] {
        &self.fields
    }

    /// Returns true when no field is listed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Render as `field^boost` entries joined by `delimiter`. A boost of
    /// `1.0` is omitted.
    #[must_use]
    pub fn render(&self, delimiter: char) -> String {
        let mut rendered = String::new();
        for (field, boost) in &self.fields {
            if !rendered.is_empty() {
                rendered.push(delimiter);
            }
            rendered.push_str(field);
            if (*boost - DEFAULT_BOOST).abs() > f64::EPSILON {
                rendered.push_str(&format!("^{boost:.1}"));
            }
        }
        rendered
    }
}

/// Which Solr field list a builder owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldListKind {
    /// `qf`
    QueryFields,
    /// `pf`
    PhraseFields,
    /// `pf2`
    BigramPhraseFields,
    /// `pf3`
    TrigramPhraseFields,
}

impl FieldListKind {
    /// Solr parameter name.
    #[must_use]
    pub const fn parameter(self) -> &'static str {
        match self {
            Self::QueryFields => "qf",
            Self::PhraseFields => "pf",
            Self::BigramPhraseFields => "pf2",
            Self::TrigramPhraseFields => "pf3",
        }
    }

    const fn feature_path(self) -> Option<&'static str> {
        match self {
            Self::QueryFields => None,
            Self::PhraseFields => Some("search.query.phrase"),
            Self::BigramPhraseFields => Some("search.query.bigramPhrase"),
            Self::TrigramPhraseFields => Some("search.query.trigramPhrase"),
        }
    }
}

/// Builder for one boosted field list parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldListBuilder {
    kind: FieldListKind,
    fields: FieldList,
    enabled: bool,
}

impl FieldListBuilder {
    /// Create an enabled builder.
    #[must_use]
    pub const fn new(kind: FieldListKind, fields: FieldList) -> Self {
        Self {
            kind,
            fields,
            enabled: true,
        }
    }

    /// Create a builder that removes its parameter.
    #[must_use]
    pub fn disabled(kind: FieldListKind) -> Self {
        Self {
            kind,
            fields: FieldList::default(),
            enabled: false,
        }
    }

    /// Read the list of `kind` from configuration.
    ///
    /// Phrase lists are enabled only when their feature flag is exactly `1`.
    #[must_use]
    pub fn from_configuration(kind: FieldListKind, configuration: &TypoScriptConfiguration) -> Self {
        let Some(feature) = kind.feature_path() else {
            let fields = configuration.string_by_path("search.query.queryFields", DEFAULT_QUERY_FIELDS);
            return Self::new(kind, FieldList::parse(&fields, ','));
        };
        if !configuration.strictly_enabled(feature) {
            return Self::disabled(kind);
        }
        let fields = configuration.string_by_path(&format!("{feature}.fields"), "");
        Self::new(kind, FieldList::parse(&fields, ','))
    }

    /// The configured list.
    #[must_use]
    pub const fn fields(&self) -> &FieldList {
        &self.fields
    }

    /// Returns true when the builder sets its parameter.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl ParameterBuilder for FieldListBuilder {
    fn name(&self) -> &'static str {
        self.kind.parameter()
    }

    fn build(&self, parameters: &mut QueryParameters) {
        let parameter = self.kind.parameter();
        if !self.enabled || self.fields.is_empty() {
            parameters.remove(parameter);
            return;
        }
        parameters.set(parameter, self.fields.render(' '));
    }
}
