//! Spellchecking (`spellcheck*`).

use crate::builder::ParameterBuilder;
use solr_search_config::TypoScriptConfiguration;
use solr_search_domain::QueryParameters;

/// Spellcheck collation settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Spellchecking {
    enabled: bool,
    max_collation_tries: i64,
}

impl Spellchecking {
    /// Enabled spellchecking; tries of `0` leave Solr's default.
    #[must_use]
    pub const fn new(max_collation_tries: i64) -> Self {
        Self {
            enabled: true,
            max_collation_tries,
        }
    }

    /// Read `search.spellchecking`.
    #[must_use]
    pub fn from_configuration(configuration: &TypoScriptConfiguration) -> Self {
        if !configuration.bool_by_path("search.spellchecking", false) {
            return Self::default();
        }
        Self::new(configuration.int_by_path("search.spellchecking.numberOfSuggestionsToTry", 0))
    }
}

fn is_spellcheck_parameter(name: &str) -> bool {
    name == "spellcheck" || name.starts_with("spellcheck.")
}

impl ParameterBuilder for Spellchecking {
    fn name(&self) -> &'static str {
        "spellchecking"
    }

    fn build(&self, parameters: &mut QueryParameters) {
        parameters.remove_where(is_spellcheck_parameter);
        if !self.enabled {
            return;
        }
        parameters
            .set("spellcheck", true)
            .set("spellcheck.collate", true);
        if self.max_collation_tries > 0 {
            parameters.set("spellcheck.maxCollationTries", self.max_collation_tries);
        }
    }
}
