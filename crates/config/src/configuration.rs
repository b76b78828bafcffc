//! Read-only configuration tree with dotted-path lookups.

use serde::Serialize;
use serde_json::{Map, Value};
use solr_search_domain::typoscript::{
    as_i64, as_string, is_strictly_enabled, is_truthy, object_by_path, value_by_path,
};

/// Search configuration (the `plugin.tx_solr` subtree).
///
/// Paths are dotted (`search.faceting.minimumCount`) and resolve against
/// both the TYPO3 array form (`"faceting."`) and plain nested objects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TypoScriptConfiguration {
    root: Map<String, Value>,
}

impl TypoScriptConfiguration {
    /// Wrap a configuration tree. A full setup tree is narrowed to its
    /// `plugin.tx_solr` subtree.
    #[must_use]
    pub fn new(root: Map<String, Value>) -> Self {
        match object_by_path(&root, "plugin.tx_solr") {
            Some(plugin) => Self {
                root: plugin.clone(),
            },
            None => Self { root },
        }
    }

    /// Build from a JSON value; anything but an object is empty.
    #[must_use]
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(root) => Self::new(root),
            _ => Self::default(),
        }
    }

    /// The underlying tree.
    #[must_use]
    pub const fn as_map(&self) -> &Map<String, Value> {
        &self.root
    }

    /// Value at `path`, scalar preferred over children.
    #[must_use]
    pub fn value_by_path(&self, path: &str) -> Option<&Value> {
        value_by_path(&self.root, path)
    }

    /// Object at `path`.
    #[must_use]
    pub fn object_by_path(&self, path: &str) -> Option<&Map<String, Value>> {
        object_by_path(&self.root, path)
    }

    /// String at `path`, or `default` when missing.
    #[must_use]
    pub fn string_by_path(&self, path: &str, default: &str) -> String {
        self.value_by_path(path)
            .and_then(as_string)
            .unwrap_or_else(|| default.to_owned())
    }

    /// Non-empty string at `path`.
    #[must_use]
    pub fn non_empty_string_by_path(&self, path: &str) -> Option<String> {
        self.value_by_path(path)
            .and_then(as_string)
            .filter(|value| !value.trim().is_empty())
    }

    /// Loose boolean at `path`, or `default` when missing.
    #[must_use]
    pub fn bool_by_path(&self, path: &str, default: bool) -> bool {
        self.value_by_path(path)
            .filter(|value| !value.is_object())
            .map_or(default, is_truthy)
    }

    /// True only when `path` holds `1`, `"1"` or `true`.
    #[must_use]
    pub fn strictly_enabled(&self, path: &str) -> bool {
        self.value_by_path(path).is_some_and(is_strictly_enabled)
    }

    /// Integer at `path`, or `default` when missing or not numeric.
    #[must_use]
    pub fn int_by_path(&self, path: &str, default: i64) -> i64 {
        self.value_by_path(path).and_then(as_i64).unwrap_or(default)
    }

    /// Integer at `path` when set to a non-empty value (an explicit `0` counts).
    #[must_use]
    pub fn optional_int_by_path(&self, path: &str) -> Option<i64> {
        self.value_by_path(path)
            .filter(|value| !matches!(value, Value::String(text) if text.trim().is_empty()))
            .and_then(as_i64)
    }

    /// Merge `overrides` recursively on top of this configuration.
    #[must_use]
    pub fn merged_with(mut self, overrides: &Map<String, Value>) -> Self {
        merge_into(&mut self.root, overrides);
        self
    }
}

/// Recursive merge: objects merge key by key, everything else replaces.
pub fn merge_into(target: &mut Map<String, Value>, overrides: &Map<String, Value>) {
    for (key, value) in overrides {
        match (target.get_mut(key), value) {
            (Some(Value::Object(existing)), Value::Object(incoming)) => {
                merge_into(existing, incoming);
            },
            _ => {
                target.insert(key.clone(), value.clone());
            },
        }
    }
}
