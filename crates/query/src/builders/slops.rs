//! Phrase slops (`qs`, `ps`, `ps2`, `ps3`).

use crate::builder::ParameterBuilder;
use solr_search_config::TypoScriptConfiguration;
use solr_search_domain::QueryParameters;

/// Word distance tolerances. Unset slops are removed, never sent as `0`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Slops {
    /// `qs`
    pub query_slop: Option<i64>,
    /// `ps`
    pub phrase_slop: Option<i64>,
    /// `ps2`
    pub bigram_phrase_slop: Option<i64>,
    /// `ps3`
    pub trigram_phrase_slop: Option<i64>,
}

impl Slops {
    /// Read slops. `qs` and `ps` are only taken while `search.query.phrase`
    /// is exactly `1`; `ps2`/`ps3` follow their own phrase features.
    #[must_use]
    pub fn from_configuration(configuration: &TypoScriptConfiguration) -> Self {
        let gated = |feature: &str, slop: &str| {
            if configuration.strictly_enabled(feature) {
                configuration.optional_int_by_path(slop)
            } else {
                None
            }
        };
        Self {
            query_slop: gated("search.query.phrase", "search.query.phrase.querySlop"),
            phrase_slop: gated("search.query.phrase", "search.query.phrase.slop"),
            bigram_phrase_slop: gated(
                "search.query.bigramPhrase",
                "search.query.bigramPhrase.slop",
            ),
            trigram_phrase_slop: gated(
                "search.query.trigramPhrase",
                "search.query.trigramPhrase.slop",
            ),
        }
    }

    fn entries(&self) -> [(&'static str, Option<i64>); 4] {
        [
            ("qs", self.query_slop),
            ("ps", self.phrase_slop),
            ("ps2", self.bigram_phrase_slop),
            ("ps3", self.trigram_phrase_slop),
        ]
    }
}

impl ParameterBuilder for Slops {
    fn name(&self) -> &'static str {
        "slops"
    }

    fn build(&self, parameters: &mut QueryParameters) {
        for (parameter, slop) in self.entries() {
            match slop {
                Some(slop) => {
                    parameters.set(parameter, slop);
                },
                None => {
                    parameters.remove(parameter);
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn slops_require_enabled_phrase_features() {
        let configuration = TypoScriptConfiguration::from_value(json!({
            "search.": { "query.": {
                "phrase": "1",
                "phrase.": { "slop": "0", "querySlop": "" },
                "bigramPhrase": "true",
                "bigramPhrase.": { "slop": "4" },
                "trigramPhrase": 1,
                "trigramPhrase.": { "slop": 5 }
            } }
        }));
        let slops = Slops::from_configuration(&configuration);
        assert_eq!(
            slops,
            Slops {
                query_slop: None,
                phrase_slop: Some(0),
                bigram_phrase_slop: None,
                trigram_phrase_slop: Some(5),
            }
        );
    }

    #[test]
    fn unset_slops_are_removed() {
        let mut parameters = QueryParameters::new();
        parameters.set("qs", "3").set("ps2", "2");
        Slops {
            phrase_slop: Some(1),
            ..Slops::default()
        }
        .build(&mut parameters);

        assert_eq!(parameters.get_str("ps"), Some("1"));
        assert!(!parameters.contains("qs"));
        assert!(!parameters.contains("ps2"));
    }
}
