//! Configured and request-scoped filter queries (`fq`).

use crate::builder::ParameterBuilder;
use solr_search_config::TypoScriptConfiguration;
use solr_search_domain::{QueryParameters, SearchRequest};

/// Named filter queries added to every search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filters {
    filters: Vec<(String, String)>,
}

impl Filters {
    /// Configured `search.query.filter.*` followed by the additional
    /// filters of `request`.
    #[must_use]
    pub fn from_request(configuration: &TypoScriptConfiguration, request: &SearchRequest) -> Self {
        let mut filters = configuration.search_query_filters();
        filters.extend(request.additional_filters().iter().cloned());
        Self { filters }
    }

    /// Named filters in order.
    #[must_use]
    pub fn filters(&self) -> &[(String, String)] {
        &self.filters
    }
}

impl ParameterBuilder for Filters {
    fn name(&self) -> &'static str {
        "filters"
    }

    fn build(&self, parameters: &mut QueryParameters) {
        for (name, query) in &self.filters {
            parameters.add_filter(name.as_str(), query.as_str());
        }
    }
}
