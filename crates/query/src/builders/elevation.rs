//! Query elevation.

use crate::builder::ParameterBuilder;
use solr_search_config::TypoScriptConfiguration;
use solr_search_domain::QueryParameters;

/// Return field marking elevated documents.
pub const ELEVATED_FIELD: &str = "isElevated:[elevated]";

/// Elevation switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Elevation {
    enabled: bool,
    force: bool,
    mark_elevated_results: bool,
}

impl Elevation {
    /// Enabled elevation.
    #[must_use]
    pub const fn new(force: bool, mark_elevated_results: bool) -> Self {
        Self {
            enabled: true,
            force,
            mark_elevated_results,
        }
    }

    /// Read `search.elevation`.
    #[must_use]
    pub fn from_configuration(configuration: &TypoScriptConfiguration) -> Self {
        if !configuration.bool_by_path("search.elevation", false) {
            return Self::default();
        }
        Self::new(
            configuration.bool_by_path("search.elevation.forceElevation", false),
            configuration.bool_by_path("search.elevation.markElevatedResults", false),
        )
    }
}

impl ParameterBuilder for Elevation {
    fn name(&self) -> &'static str {
        "elevation"
    }

    fn build(&self, parameters: &mut QueryParameters) {
        if !self.enabled {
            parameters.remove("enableElevation");
            parameters.remove("forceElevation");
            parameters.remove_field(ELEVATED_FIELD);
            return;
        }
        parameters
            .set("enableElevation", true)
            .set("forceElevation", self.force);
        if self.mark_elevated_results {
            parameters.add_field(ELEVATED_FIELD);
        } else {
            parameters.remove_field(ELEVATED_FIELD);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enabled_elevation_marks_results() {
        let mut parameters = QueryParameters::new();
        parameters.set_fields(vec!["*".to_owned(), "score".to_owned()]);
        Elevation::new(false, true).build(&mut parameters);

        assert_eq!(parameters.get_str("enableElevation"), Some("true"));
        assert_eq!(parameters.get_str("forceElevation"), Some("false"));
        assert_eq!(parameters.fields().last().map(String::as_str), Some(ELEVATED_FIELD));
    }

    #[test]
    fn disabled_elevation_removes_parameters_and_field() {
        let mut parameters = QueryParameters::new();
        Elevation::new(true, true).build(&mut parameters);
        Elevation::default().build(&mut parameters);

        assert!(!parameters.contains("enableElevation"));
        assert!(!parameters.contains("forceElevation"));
        assert!(parameters.fields().is_empty());
    }
}
