//! CLI command handlers.

pub mod config;
pub mod params;
pub mod reconcile;

pub use config::run_config;
pub use params::run_params;
pub use reconcile::run_reconcile;

use serde_json::Value;
use solr_search_config::{TypoScriptConfiguration, load_configuration_from_path};
use solr_search_domain::SearchRequest;
use solr_search_shared::{ErrorCode, ErrorEnvelope, Result};
use std::path::Path;

/// Configuration and request inputs shared by the commands.
pub struct CommandInput<'a> {
    pub config_path: &'a Path,
    pub overrides_json: Option<&'a str>,
    pub args_json: Option<&'a str>,
    pub args_file: Option<&'a Path>,
}

impl CommandInput<'_> {
    /// Load the effective configuration.
    pub fn configuration(&self) -> Result<TypoScriptConfiguration> {
        load_configuration_from_path(Some(self.config_path), self.overrides_json)
    }

    /// Build the request from the URL arguments (empty when none are given).
    pub fn request(&self, configuration: &TypoScriptConfiguration) -> Result<SearchRequest> {
        let arguments = match (self.args_json, self.args_file) {
            (Some(input), _) => parse_arguments(input, "--args")?,
            (None, Some(path)) => {
                let input = std::fs::read_to_string(path)
                    .map_err(ErrorEnvelope::from)
                    .map_err(|error| error.with_metadata("path", path.display().to_string()))?;
                parse_arguments(&input, "--args-file")?
            },
            (None, None) => Value::Object(serde_json::Map::new()),
        };
        Ok(SearchRequest::from_value(
            arguments,
            &configuration.plugin_namespace(),
            configuration.search_faceting_url_parameter_style(),
        ))
    }
}

fn parse_arguments(input: &str, source: &str) -> Result<Value> {
    let value: Value = serde_json::from_str(input).map_err(|error| {
        ErrorEnvelope::expected(
            ErrorCode::invalid_argument(),
            format!("URL arguments are not valid JSON: {error}"),
        )
        .with_metadata("source", source)
    })?;
    if value.is_object() {
        Ok(value)
    } else {
        Err(ErrorEnvelope::expected(
            ErrorCode::invalid_argument(),
            "URL arguments must be a JSON object",
        )
        .with_metadata("source", source))
    }
}
