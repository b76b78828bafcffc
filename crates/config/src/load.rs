//! Config loading helpers (file + overrides).
//!
//! The loader is responsible for deterministic merge order and surfacing
//! user-facing errors as typed `ErrorEnvelope`s.

use crate::configuration::{TypoScriptConfiguration, merge_into};
use crate::error::ConfigError;
use crate::typoscript_parser::parse_typoscript;
use serde_json::{Map, Value};
use solr_search_shared::{ErrorClass, ErrorCode, ErrorEnvelope};
use std::path::Path;
use tracing::debug;

/// Supported configuration formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// TypoScript text.
    TypoScript,
    /// JSON document.
    Json,
    /// TOML document.
    Toml,
}

impl ConfigFormat {
    /// Detect the format from a file extension (JSON when there is none).
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let extension = path
            .extension()
            .and_then(|value| value.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            None | Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            Some("typoscript" | "ts" | "tsconfig" | "txt") => Ok(Self::TypoScript),
            Some(other) => Err(ConfigError::UnsupportedFormat {
                extension: other.to_owned(),
            }),
        }
    }
}

/// Load configuration from in-memory sources.
///
/// Precedence (highest wins):
/// - overrides JSON (partial tree)
/// - config document
/// - defaults (empty tree; accessors carry the defaults)
pub fn load_configuration_from_sources(
    config: Option<(&str, ConfigFormat)>,
    overrides_json: Option<&str>,
) -> Result<TypoScriptConfiguration, ErrorEnvelope> {
    let mut root = match config {
        None => Map::new(),
        Some((input, format)) => parse_document(input, format)?,
    };

    if let Some(input) = overrides_json {
        let overrides = parse_overrides_json(input)?;
        debug!(keys = overrides.len(), "applying configuration overrides");
        merge_overrides(&mut root, &overrides);
    }

    Ok(TypoScriptConfiguration::new(root))
}

/// Load configuration from an optional file path.
pub fn load_configuration_from_path(
    config_path: Option<&Path>,
    overrides_json: Option<&str>,
) -> Result<TypoScriptConfiguration, ErrorEnvelope> {
    let Some(path) = config_path else {
        return load_configuration_from_sources(None, overrides_json);
    };

    let format = ConfigFormat::from_path(path)?;
    let text = read_config_file(path)?;
    debug!(path = %path.display(), ?format, "loading configuration");
    load_configuration_from_sources(Some((&text, format)), overrides_json)
}

/// Serialize the configuration as deterministic pretty JSON (with trailing newline).
pub fn to_pretty_json(configuration: &TypoScriptConfiguration) -> Result<String, ErrorEnvelope> {
    let mut output = serde_json::to_string_pretty(configuration).map_err(|error| {
        ErrorEnvelope::unexpected(
            ErrorCode::internal(),
            format!("failed to serialize config: {error}"),
            ErrorClass::NonRetriable,
        )
    })?;
    output.push('\n');
    Ok(output)
}

/// Parse a document in the given format into a configuration tree.
pub fn parse_document(input: &str, format: ConfigFormat) -> Result<Map<String, Value>, ConfigError> {
    match format {
        ConfigFormat::TypoScript => parse_typoscript(input),
        ConfigFormat::Json => {
            let value: Value =
                serde_json::from_str(input).map_err(|error| ConfigError::InvalidJson {
                    source: "config",
                    message: error.to_string(),
                })?;
            into_object(value, "config")
        },
        ConfigFormat::Toml => {
            let value: Value = toml::from_str(input).map_err(|error| ConfigError::InvalidToml {
                message: error.to_string(),
            })?;
            into_object(value, "config")
        },
    }
}

fn parse_overrides_json(input: &str) -> Result<Map<String, Value>, ConfigError> {
    let value: Value = serde_json::from_str(input).map_err(|error| ConfigError::InvalidJson {
        source: "overrides",
        message: error.to_string(),
    })?;
    into_object(value, "overrides")
}

fn into_object(value: Value, source: &'static str) -> Result<Map<String, Value>, ConfigError> {
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(ConfigError::NotAnObject { source }),
    }
}

fn merge_overrides(root: &mut Map<String, Value>, overrides: &Map<String, Value>) {
    // Overrides address the plugin subtree when the document is a full setup.
    let plugin = root
        .get_mut("plugin.")
        .and_then(Value::as_object_mut)
        .and_then(|plugin| plugin.get_mut("tx_solr."))
        .and_then(Value::as_object_mut);
    match plugin {
        Some(plugin) if !overrides.contains_key("plugin.") => merge_into(plugin, overrides),
        _ => merge_into(root, overrides),
    }
}

fn read_config_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|error| ConfigError::FileRead {
        path: path.to_string_lossy().to_string(),
        kind: error.kind(),
        message: error.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn override_precedence_is_deterministic() -> Result<(), Box<dyn Error>> {
        let config = r"
plugin.tx_solr.search {
    faceting = 1
    faceting.limit = 10
}
";
        let overrides = r#"{ "search.": { "faceting.": { "limit": "25" } } }"#;

        let configuration = load_configuration_from_sources(
            Some((config, ConfigFormat::TypoScript)),
            Some(overrides),
        )?;
        assert_eq!(configuration.search_faceting_limit(), 25);
        assert!(configuration.search_faceting());
        Ok(())
    }

    #[test]
    fn missing_config_uses_defaults() -> Result<(), Box<dyn Error>> {
        let configuration = load_configuration_from_sources(None, None)?;
        assert!(!configuration.search_faceting());
        assert_eq!(configuration.search_faceting_minimum_count(), 1);
        Ok(())
    }

    #[test]
    fn toml_documents_are_accepted() -> Result<(), Box<dyn Error>> {
        let config = r#"
[search]
faceting = 1

[search.faceting]
limit = 15
"#;
        let configuration =
            load_configuration_from_sources(Some((config, ConfigFormat::Toml)), None);
        // `faceting` cannot be both a scalar and a table in TOML; the TYPO3 form is used instead.
        assert!(configuration.is_err());

        let config = r#"
[search]
faceting = 1

[search."faceting."]
limit = 15
"#;
        let configuration =
            load_configuration_from_sources(Some((config, ConfigFormat::Toml)), None)?;
        assert!(configuration.search_faceting());
        assert_eq!(configuration.search_faceting_limit(), 15);
        Ok(())
    }

    #[test]
    fn invalid_overrides_fail_with_source_metadata() -> Result<(), Box<dyn Error>> {
        let result = load_configuration_from_sources(None, Some("[1, 2]"));
        let Err(error) = result else {
            return Err("expected an error".into());
        };
        assert_eq!(error.code, ErrorCode::new("config", "not_an_object"));
        assert_eq!(error.metadata.get("source").map(String::as_str), Some("overrides"));
        Ok(())
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let result = ConfigFormat::from_path(Path::new("setup.yaml"));
        assert_eq!(
            result,
            Err(ConfigError::UnsupportedFormat {
                extension: "yaml".to_owned()
            })
        );
        assert_eq!(
            ConfigFormat::from_path(Path::new("setup.typoscript")),
            Ok(ConfigFormat::TypoScript)
        );
    }

    #[test]
    fn missing_file_maps_to_not_found_code() -> Result<(), Box<dyn Error>> {
        let result = load_configuration_from_path(Some(Path::new("/nonexistent/setup.json")), None);
        let Err(error) = result else {
            return Err("expected an error".into());
        };
        assert_eq!(error.code, ErrorCode::new("config", "config_file_not_found"));
        assert!(error.metadata.contains_key("path"));
        Ok(())
    }
}
