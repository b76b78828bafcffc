use crate::builder::ParameterBuilder;
use solr_search_config::TypoScriptConfiguration;
use solr_search_domain::QueryParameters;

/// `debugQuery`/`echoParams`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DebugQuery {
    enabled: bool,
}

impl DebugQuery {
    /// Debug output on or off.
    #[must_use]
    pub const fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Read `enableDebugMode`.
    #[must_use]
    pub fn from_configuration(configuration: &TypoScriptConfiguration) -> Self {
        Self::new(configuration.bool_by_path("enableDebugMode", false))
    }
}

impl ParameterBuilder for DebugQuery {
    fn name(&self) -> &'static str {
        "debug"
    }

    fn build(&self, parameters: &mut QueryParameters) {
        if self.enabled {
            parameters.set("debugQuery", true).set("echoParams", "all");
        } else {
            parameters.remove("debugQuery");
            parameters.remove("echoParams");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggles_debug_parameters() {
        let mut parameters = QueryParameters::new();
        DebugQuery::new(true).build(&mut parameters);
        assert_eq!(parameters.get_str("echoParams"), Some("all"));

        DebugQuery::new(false).build(&mut parameters);
        assert!(!parameters.contains("debugQuery"));
        assert!(!parameters.contains("echoParams"));
    }
}
