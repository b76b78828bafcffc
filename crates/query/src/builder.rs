//! Parameter builder contract.

use solr_search_domain::QueryParameters;

/// A single query knob applied to the shared parameter context.
///
/// Implementations either set the parameters they own or, when disabled,
/// remove them. Disabled is a normal state, never an error.
pub trait ParameterBuilder {
    /// Short name used in pipeline diagnostics.
    fn name(&self) -> &'static str;

    /// Apply this builder to `parameters`.
    fn build(&self, parameters: &mut QueryParameters);
}
