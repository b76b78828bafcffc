//! Configuration loading errors.

use solr_search_shared::{ErrorCode, ErrorEnvelope};
use std::fmt;

/// Failures while reading, parsing or merging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The configuration file could not be read.
    FileRead {
        /// File path.
        path: String,
        /// I/O error kind.
        kind: std::io::ErrorKind,
        /// I/O error message.
        message: String,
    },
    /// The file extension does not map to a known format.
    UnsupportedFormat {
        /// Offending extension.
        extension: String,
    },
    /// JSON input failed to parse.
    InvalidJson {
        /// `config` or `overrides`.
        source: &'static str,
        /// Parser message.
        message: String,
    },
    /// TOML input failed to parse.
    InvalidToml {
        /// Parser message.
        message: String,
    },
    /// TypoScript input failed to parse.
    InvalidTypoScript {
        /// 1-based line number.
        line: usize,
        /// Parser message.
        message: String,
    },
    /// The document root is not an object.
    NotAnObject {
        /// `config` or `overrides`.
        source: &'static str,
    },
}

impl ConfigError {
    fn error_code(&self) -> ErrorCode {
        match self {
            Self::FileRead { kind, .. } => match kind {
                std::io::ErrorKind::NotFound => ErrorCode::new("config", "config_file_not_found"),
                std::io::ErrorKind::PermissionDenied => {
                    ErrorCode::new("config", "config_file_permission_denied")
                },
                _ => ErrorCode::new("config", "config_file_io"),
            },
            Self::UnsupportedFormat { .. } => ErrorCode::new("config", "unsupported_format"),
            Self::InvalidJson { .. } => ErrorCode::new("config", "invalid_json"),
            Self::InvalidToml { .. } => ErrorCode::new("config", "invalid_toml"),
            Self::InvalidTypoScript { .. } => ErrorCode::new("config", "invalid_typoscript"),
            Self::NotAnObject { .. } => ErrorCode::new("config", "not_an_object"),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FileRead { message, .. } => {
                write!(formatter, "failed to read config file: {message}")
            },
            Self::UnsupportedFormat { .. } => formatter.write_str(
                "unsupported config format; use .typoscript, .ts, .json or .toml",
            ),
            Self::InvalidJson { source, message } => {
                write!(formatter, "invalid {source} JSON: {message}")
            },
            Self::InvalidToml { message } => write!(formatter, "invalid config TOML: {message}"),
            Self::InvalidTypoScript { line, message } => {
                write!(formatter, "invalid TypoScript at line {line}: {message}")
            },
            Self::NotAnObject { source } => write!(formatter, "{source} root must be an object"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<ConfigError> for ErrorEnvelope {
    fn from(error: ConfigError) -> Self {
        let envelope = Self::expected(error.error_code(), error.to_string());
        match error {
            ConfigError::FileRead { path, .. } => envelope.with_metadata("path", path),
            ConfigError::UnsupportedFormat { extension } => {
                envelope.with_metadata("extension", extension)
            },
            ConfigError::InvalidJson { source, .. } | ConfigError::NotAnObject { source } => {
                envelope.with_metadata("source", source)
            },
            ConfigError::InvalidToml { .. } => envelope.with_metadata("source", "config"),
            ConfigError::InvalidTypoScript { line, .. } => envelope
                .with_metadata("source", "config")
                .with_metadata("line", line.to_string()),
        }
    }
}
