//! Active facet values as carried in the URL.
//!
//! Each active facet is a `"<facetName>:<facetValue>"` string. The `index`
//! style stores them as an ordered list, the `assoc` style as an ordered map
//! from the string to `1`. Both styles behave identically for callers.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Separator between facet name and value. Only the first one counts.
pub const FACET_VALUE_SEPARATOR: char = ':';

/// Physical URL encoding of the active facets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterStyle {
    /// `filter[0]=type:pages`
    #[default]
    Index,
    /// `filter[type:pages]=1`
    Assoc,
}

impl ParameterStyle {
    /// Lenient parse: `assoc` (case-insensitive) or index.
    #[must_use]
    pub fn parse(input: &str) -> Self {
        if input.trim().eq_ignore_ascii_case("assoc") {
            Self::Assoc
        } else {
            Self::Index
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Storage {
    Index(Vec<String>),
    Assoc(Map<String, Value>),
}

/// Codec over the active facet values of one request.
#[derive(Debug, Clone, PartialEq)]
pub struct UrlFacetContainer {
    storage: Storage,
    sort_output: bool,
}

impl Default for UrlFacetContainer {
    fn default() -> Self {
        Self::new(ParameterStyle::Index)
    }
}

impl UrlFacetContainer {
    /// Create an empty container.
    #[must_use]
    pub fn new(style: ParameterStyle) -> Self {
        let storage = match style {
            ParameterStyle::Index => Storage::Index(Vec::new()),
            ParameterStyle::Assoc => Storage::Assoc(Map::new()),
        };
        Self {
            storage,
            sort_output: false,
        }
    }

    /// Decode the `filter` argument. Lists and maps are both accepted and
    /// normalized to `style`; non-string entries are ignored.
    #[must_use]
    pub fn from_value(value: Option<&Value>, style: ParameterStyle) -> Self {
        let mut container = Self::new(style);
        let entries: Vec<String> = match value {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|item| item.as_str().map(str::to_owned))
                .collect(),
            Some(Value::Object(entries)) => entries.keys().cloned().collect(),
            Some(Value::String(single)) if !single.is_empty() => vec![single.clone()],
            _ => Vec::new(),
        };
        for entry in entries {
            container.insert(entry);
        }
        container
    }

    /// Encoding style.
    #[must_use]
    pub const fn style(&self) -> ParameterStyle {
        match self.storage {
            Storage::Index(_) => ParameterStyle::Index,
            Storage::Assoc(_) => ParameterStyle::Assoc,
        }
    }

    /// Emit entries sorted in [`Self::to_value`].
    #[must_use]
    pub fn with_sorted_output(mut self, sort_output: bool) -> Self {
        self.sort_output = sort_output;
        self
    }

    /// Raw `"name:value"` entries in insertion order.
    #[must_use]
    pub fn active_facets(&self) -> Vec<String> {
        match &self.storage {
            Storage::Index(entries) => entries.clone(),
            Storage::Assoc(entries) => entries.keys().cloned().collect(),
        }
    }

    /// Number of active facet values.
    #[must_use]
    pub fn count(&self) -> usize {
        match &self.storage {
            Storage::Index(entries) => entries.len(),
            Storage::Assoc(entries) => entries.len(),
        }
    }

    /// Returns true when no facet value is active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Distinct facet names in first-seen order.
    #[must_use]
    pub fn active_facet_names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for entry in self.active_facets() {
            let (name, _) = split_entry(&entry);
            if !names.iter().any(|existing| existing == name) {
                names.push(name.to_owned());
            }
        }
        names
    }

    /// Active values of facet `facet_name` in order.
    #[must_use]
    pub fn active_facet_values_by_name(&self, facet_name: &str) -> Vec<String> {
        self.active_facets()
            .iter()
            .map(|entry| split_entry(entry))
            .filter(|(name, _)| *name == facet_name)
            .map(|(_, value)| value.to_owned())
            .collect()
    }

    /// Returns true when `facet_name:facet_value` is active.
    #[must_use]
    pub fn has_facet_value(&self, facet_name: &str, facet_value: &str) -> bool {
        let entry = join_entry(facet_name, facet_value);
        match &self.storage {
            Storage::Index(entries) => entries.contains(&entry),
            Storage::Assoc(entries) => entries.contains_key(&entry),
        }
    }

    /// Activate a facet value. Already active values are kept once.
    pub fn add_facet_value(&mut self, facet_name: &str, facet_value: &str) {
        self.insert(join_entry(facet_name, facet_value));
    }

    /// Deactivate a facet value.
    pub fn remove_facet_value(&mut self, facet_name: &str, facet_value: &str) {
        let entry = join_entry(facet_name, facet_value);
        self.retain(|candidate| candidate != entry);
    }

    /// Deactivate every value of facet `facet_name`.
    pub fn remove_all_facet_values_by_name(&mut self, facet_name: &str) {
        self.retain(|candidate| split_entry(candidate).0 != facet_name);
    }

    /// Deactivate everything.
    pub fn remove_all_facets(&mut self) {
        self.retain(|_| false);
    }

    /// Encode back to the URL argument shape.
    #[must_use]
    pub fn to_value(&self) -> Value {
        let mut entries = self.active_facets();
        if self.sort_output {
            entries.sort();
        }
        match self.storage {
            Storage::Index(_) => Value::Array(entries.into_iter().map(Value::String).collect()),
            Storage::Assoc(_) => Value::Object(
                entries
                    .into_iter()
                    .map(|entry| (entry, Value::from(1)))
                    .collect(),
            ),
        }
    }

    fn insert(&mut self, entry: String) {
        match &mut self.storage {
            Storage::Index(entries) => {
                if !entries.contains(&entry) {
                    entries.push(entry);
                }
            },
            Storage::Assoc(entries) => {
                entries.entry(entry).or_insert_with(|| Value::from(1));
            },
        }
    }

    fn retain(&mut self, keep: impl Fn(&str) -> bool) {
        match &mut self.storage {
            Storage::Index(entries) => entries.retain(|entry| keep(entry)),
            Storage::Assoc(entries) => {
                // Rebuilt instead of `Map::remove`, which does not keep order.
                let kept: Map<String, Value> = std::mem::take(entries)
                    .into_iter()
                    .filter(|(entry, _)| keep(entry))
                    .collect();
                *entries = kept;
            },
        }
    }
}

/// Split an entry on the first separator. An entry without separator yields
/// the whole entry as name and an empty value.
#[must_use]
pub fn split_entry(entry: &str) -> (&str, &str) {
    entry
        .split_once(FACET_VALUE_SEPARATOR)
        .unwrap_or((entry, ""))
}

fn join_entry(facet_name: &str, facet_value: &str) -> String {
    format!("{facet_name}{FACET_VALUE_SEPARATOR}{facet_value}")
}
