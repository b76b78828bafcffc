//! # solr-search-config
//!
//! TypoScript configuration loading, parsing and typed accessors.
//! This crate depends on `domain` and `shared` only.

/// Read-only configuration tree with dotted-path lookups.
pub mod configuration;
/// Configuration loading errors.
pub mod error;
/// Config loading helpers (file + overrides).
pub mod load;
/// Typed accessors for the `search` configuration.
pub mod search;
/// TypoScript text parser.
pub mod typoscript_parser;

pub use configuration::{TypoScriptConfiguration, merge_into};
pub use error::ConfigError;
pub use load::{
    ConfigFormat, load_configuration_from_path, load_configuration_from_sources, parse_document,
    to_pretty_json,
};
pub use search::{
    DEFAULT_FACET_LIMIT, DEFAULT_FACET_MINIMUM_COUNT, DEFAULT_RESULTS_PER_PAGE,
    SortingOptionConfiguration,
};
pub use typoscript_parser::parse_typoscript;

/// Returns the config crate version.
#[must_use]
pub const fn config_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;
    use solr_search_domain::domain_crate_version;
    use solr_search_shared::shared_crate_version;

    #[test]
    fn config_crate_compiles() {
        let version = config_crate_version();
        assert!(!version.is_empty());
    }

    #[test]
    fn config_can_use_domain_and_shared() {
        let domain_version = domain_crate_version();
        let shared_version = shared_crate_version();

        assert!(!domain_version.is_empty());
        assert!(!shared_version.is_empty());
    }
}
