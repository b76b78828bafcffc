//! Concrete parameter builders.

/// `debugQuery`/`echoParams`.
pub mod debug;
pub mod elevation;
pub mod faceting;
pub mod field_collapsing;
pub mod field_list;
pub mod filters;
pub mod grouping;
pub mod highlighting;
pub mod operator;
pub mod query_string;
pub mod return_fields;
pub mod slops;
pub mod sorting;
pub mod spellchecking;

pub use debug::DebugQuery;
pub use elevation::Elevation;
pub use faceting::{Faceting, JSON_FACET_PARAMETER};
pub use field_collapsing::FieldCollapsing;
pub use field_list::{FieldList, FieldListBuilder, FieldListKind};
pub use filters::Filters;
pub use grouping::Grouping;
pub use highlighting::Highlighting;
pub use operator::Operator;
pub use query_string::{Paging, QueryString};
pub use return_fields::ReturnFields;
pub use slops::Slops;
pub use sorting::{Sorting, Sortings};
pub use spellchecking::Spellchecking;
