//! Result sorting options offered to the search page.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Sort direction of a result sorting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending order.
    #[default]
    Asc,
    /// Descending order.
    Desc,
}

impl SortDirection {
    /// Parse `asc`/`desc` (case-insensitive).
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }

    /// Returns the opposite direction.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    /// Returns the Solr token.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// One configured result sorting option (`search.sorting.options.<name>`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultSorting {
    /// Option name as used in the URL (`sort=<name> <direction>`).
    pub name: String,
    /// Solr field the option sorts on.
    pub field: String,
    /// Display label.
    pub label: String,
    /// Direction currently applied (or the default direction).
    pub direction: SortDirection,
    /// Whether this option is the active sorting.
    pub selected: bool,
    /// Whether selecting this option resets to relevance ordering.
    pub is_reset_option: bool,
}

impl ResultSorting {
    /// Direction a link toggling this option would switch to.
    #[must_use]
    pub const fn opposite_direction(&self) -> SortDirection {
        self.direction.opposite()
    }
}
