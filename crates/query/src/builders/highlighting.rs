//! Result highlighting (`hl*`).

use crate::builder::ParameterBuilder;
use solr_search_config::TypoScriptConfiguration;
use solr_search_domain::QueryParameters;

/// Default `search.results.resultsHighlighting.fragmentSize`.
pub const DEFAULT_FRAGMENT_SIZE: i64 = 200;

/// Smallest fragment size supported by the fast vector highlighter.
pub const FAST_VECTOR_MINIMUM_FRAGMENT_SIZE: i64 = 18;

/// Highlighting settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Highlighting {
    enabled: bool,
    fragment_size: i64,
    highlight_fields: String,
    prefix: String,
    postfix: String,
}

impl Default for Highlighting {
    fn default() -> Self {
        Self {
            enabled: false,
            fragment_size: DEFAULT_FRAGMENT_SIZE,
            highlight_fields: String::new(),
            prefix: String::new(),
            postfix: String::new(),
        }
    }
}

impl Highlighting {
    /// Enabled highlighting.
    #[must_use]
    pub fn new(fragment_size: i64, highlight_fields: &str, prefix: &str, postfix: &str) -> Self {
        Self {
            enabled: true,
            fragment_size,
            highlight_fields: highlight_fields.trim().to_owned(),
            prefix: prefix.to_owned(),
            postfix: postfix.to_owned(),
        }
    }

    /// Read `search.results.resultsHighlighting`; `wrap` is `pre|post`.
    #[must_use]
    pub fn from_configuration(configuration: &TypoScriptConfiguration) -> Self {
        const PATH: &str = "search.results.resultsHighlighting";
        if !configuration.bool_by_path(PATH, false) {
            return Self::default();
        }
        let wrap = configuration.string_by_path(&format!("{PATH}.wrap"), "");
        let (prefix, postfix) = wrap.split_once('|').unwrap_or(("", ""));
        Self::new(
            configuration.int_by_path(&format!("{PATH}.fragmentSize"), DEFAULT_FRAGMENT_SIZE),
            &configuration.string_by_path(&format!("{PATH}.highlightFields"), ""),
            prefix,
            postfix,
        )
    }

    /// True when the fast vector highlighter is used.
    #[must_use]
    pub const fn uses_fast_vector_highlighter(&self) -> bool {
        self.fragment_size >= FAST_VECTOR_MINIMUM_FRAGMENT_SIZE
    }

    /// Returns true when highlighting parameters are set.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }
}

fn is_highlighting_parameter(name: &str) -> bool {
    name == "hl" || name.starts_with("hl.")
}

impl ParameterBuilder for Highlighting {
    fn name(&self) -> &'static str {
        "highlighting"
    }

    fn build(&self, parameters: &mut QueryParameters) {
        parameters.remove_where(is_highlighting_parameter);
        if !self.enabled {
            return;
        }

        parameters
            .set("hl", true)
            .set("hl.fragsize", self.fragment_size);
        if !self.highlight_fields.is_empty() {
            parameters.set("hl.fl", self.highlight_fields.as_str());
        }
        if self.uses_fast_vector_highlighter() {
            parameters.set("hl.useFastVectorHighlighter", true);
            if !self.prefix.is_empty() {
                parameters.set("hl.tag.pre", self.prefix.as_str());
            }
            if !self.postfix.is_empty() {
                parameters.set("hl.tag.post", self.postfix.as_str());
            }
        }
        if !self.prefix.is_empty() && !self.postfix.is_empty() {
            parameters
                .set("hl.simple.pre", self.prefix.as_str())
                .set("hl.simple.post", self.postfix.as_str());
        }
    }
}
