//! Tracing subscriber for the CLI.
//!
//! Directives come from `SOLR_SEARCH_LOG`, then `RUST_LOG`, then the
//! `--verbose`/`--quiet` flags (default `warn`). Output goes to stderr.

use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

/// Project specific filter variable.
pub const LOG_ENV: &str = "SOLR_SEARCH_LOG";

/// Verbosity derived from CLI flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
}

impl Verbosity {
    #[must_use]
    pub const fn from_flags(verbose: bool, quiet: bool) -> Self {
        if verbose {
            Self::Verbose
        } else if quiet {
            Self::Quiet
        } else {
            Self::Normal
        }
    }

    #[must_use]
    pub const fn default_level(self) -> Level {
        match self {
            Self::Quiet => Level::ERROR,
            Self::Normal => Level::WARN,
            Self::Verbose => Level::DEBUG,
        }
    }
}

/// Install the global subscriber; a second call is a no-op.
pub fn init_subscriber(verbosity: Verbosity) {
    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(true)
        .without_time()
        .compact();
    let _ = tracing_subscriber::registry()
        .with(build_env_filter(verbosity))
        .with(layer)
        .try_init();
}

fn build_env_filter(verbosity: Verbosity) -> EnvFilter {
    [LOG_ENV, "RUST_LOG"]
        .into_iter()
        .filter_map(|variable| std::env::var(variable).ok())
        .find_map(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(verbosity.default_level().as_str().to_ascii_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_wins_over_quiet() {
        assert_eq!(Verbosity::from_flags(true, true), Verbosity::Verbose);
        assert_eq!(Verbosity::from_flags(false, true).default_level(), Level::ERROR);
        assert_eq!(Verbosity::from_flags(false, false).default_level(), Level::WARN);
    }
}
