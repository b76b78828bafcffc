//! Fixture files under `crates/testkit/fixtures`.

use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use std::{fmt, fs};

/// TypoScript setup of the sample search page.
pub const SEARCH_TYPOSCRIPT: &str = "config/search.typoscript";
/// JSON variant of a reduced setup.
pub const SEARCH_JSON: &str = "config/search.json";
/// TOML variant of a reduced setup.
pub const SEARCH_TOML: &str = "config/search.toml";
/// URL arguments selecting two content types on page 2.
pub const TYPE_PAGES_ARGUMENTS: &str = "requests/type-pages.args.json";
/// Recorded Solr response for the sample search page.
pub const SEARCH_RESPONSE: &str = "responses/search.response.json";

/// Errors raised while loading fixtures.
#[derive(Debug)]
pub enum FixtureError {
    /// Fixture file does not exist.
    MissingFixture {
        /// Path that could not be found.
        path: PathBuf,
    },
    /// Fixture file could not be read.
    FixtureRead {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// Fixture file could not be parsed.
    FixtureParse {
        /// Path that failed to parse.
        path: PathBuf,
        /// Underlying JSON error.
        source: serde_json::Error,
    },
}

impl fmt::Display for FixtureError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingFixture { path } => {
                write!(formatter, "missing fixture: {}", path.display())
            },
            Self::FixtureRead { path, source } => {
                write!(formatter, "failed to read fixture {}: {source}", path.display())
            },
            Self::FixtureParse { path, source } => {
                write!(formatter, "failed to parse fixture {}: {source}", path.display())
            },
        }
    }
}

impl std::error::Error for FixtureError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::FixtureRead { source, .. } => Some(source),
            Self::FixtureParse { source, .. } => Some(source),
            Self::MissingFixture { .. } => None,
        }
    }
}

/// Directory holding every fixture.
pub fn fixture_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures")
}

/// Absolute path of `relative_path` below [`fixture_root`].
pub fn fixture_path(relative_path: &str) -> PathBuf {
    fixture_root().join(relative_path)
}

/// Contents of a fixture file.
pub fn read_fixture(relative_path: &str) -> Result<String, FixtureError> {
    let path = fixture_path(relative_path);
    match fs::read_to_string(&path) {
        Ok(contents) => Ok(contents),
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
            Err(FixtureError::MissingFixture { path })
        },
        Err(error) => Err(FixtureError::FixtureRead {
            path,
            source: error,
        }),
    }
}

/// Deserialize a JSON fixture.
pub fn load_json_fixture<T: DeserializeOwned>(relative_path: &str) -> Result<T, FixtureError> {
    let contents = read_fixture(relative_path)?;
    serde_json::from_str(&contents).map_err(|error| FixtureError::FixtureParse {
        path: fixture_path(relative_path),
        source: error,
    })
}
