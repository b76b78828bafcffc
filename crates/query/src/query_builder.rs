//! Ordered parameter builder pipeline for one search request.

use crate::builder::ParameterBuilder;
use crate::builders::{
    DebugQuery, Elevation, Faceting, FieldCollapsing, FieldListBuilder, FieldListKind, Filters,
    Grouping, Highlighting, Operator, Paging, QueryString, ReturnFields, Slops, Sortings,
    Spellchecking,
};
use crate::facets::FacetFilters;
use solr_search_config::TypoScriptConfiguration;
use solr_search_domain::{FacetConfiguration, FacetRegistry, QueryParameters, SearchRequest};
use solr_search_shared::ErrorEnvelope;
use std::sync::Arc;
use tracing::debug;

/// Builds the Solr parameters of a [`SearchRequest`] from the configuration.
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    configuration: Arc<TypoScriptConfiguration>,
    registry: Arc<FacetRegistry>,
}

impl QueryBuilder {
    /// Builder over `configuration`, resolving facet types via `registry`.
    #[must_use]
    pub const fn new(configuration: Arc<TypoScriptConfiguration>, registry: Arc<FacetRegistry>) -> Self {
        Self {
            configuration,
            registry,
        }
    }

    /// Configuration the builder reads.
    #[must_use]
    pub fn configuration(&self) -> &TypoScriptConfiguration {
        &self.configuration
    }

    /// Resolved facet configurations, in configured order.
    pub fn facet_configurations(&self) -> Result<Vec<FacetConfiguration>, ErrorEnvelope> {
        Ok(self
            .configuration
            .search_faceting_facet_configurations(&self.registry)?)
    }

    /// Build the parameters for `request`.
    ///
    /// Builders run in a fixed order on one parameter set, so later ones
    /// may override earlier output (grouping replaces `rows`).
    pub fn build(&self, request: &SearchRequest) -> Result<QueryParameters, ErrorEnvelope> {
        let facets = self.facet_configurations()?;
        let mut parameters = QueryParameters::new();
        for builder in self.pipeline(request, &facets)? {
            builder.build(&mut parameters);
            debug!(builder = builder.name(), "applied parameter builder");
        }
        debug!(
            parameters = parameters.to_pairs().len(),
            filters = parameters.filters().count(),
            "query parameters built"
        );
        Ok(parameters)
    }

    fn pipeline(
        &self,
        request: &SearchRequest,
        facets: &[FacetConfiguration],
    ) -> Result<Vec<Box<dyn ParameterBuilder>>, ErrorEnvelope> {
        let configuration = self.configuration.as_ref();
        let keep_all_facets_on_selection = configuration.search_faceting_keep_all_facets_on_selection();
        let mut pipeline: Vec<Box<dyn ParameterBuilder>> = vec![
            Box::new(QueryString::from_request(request)),
            Box::new(Paging::from_request(configuration, request)),
            Box::new(ReturnFields::from_configuration(configuration)),
        ];
        for kind in [
            FieldListKind::QueryFields,
            FieldListKind::PhraseFields,
            FieldListKind::BigramPhraseFields,
            FieldListKind::TrigramPhraseFields,
        ] {
            pipeline.push(Box::new(FieldListBuilder::from_configuration(kind, configuration)));
        }
        pipeline.push(Box::new(Slops::from_configuration(configuration)));
        pipeline.push(Box::new(Operator::from_configuration(configuration)?));
        pipeline.push(Box::new(Sortings::from_request(configuration, request)?));
        pipeline.push(Box::new(Filters::from_request(configuration, request)));

        let faceting = Faceting::from_configuration(configuration, facets)?;
        if faceting.is_enabled() {
            pipeline.push(Box::new(FacetFilters::from_request(
                facets,
                request,
                keep_all_facets_on_selection,
            )));
        }
        pipeline.push(Box::new(faceting));

        pipeline.push(Box::new(Highlighting::from_configuration(configuration)));
        pipeline.push(Box::new(Spellchecking::from_configuration(configuration)));
        pipeline.push(Box::new(Grouping::from_configuration(configuration)));
        pipeline.push(Box::new(FieldCollapsing::from_configuration(configuration)));
        pipeline.push(Box::new(Elevation::from_configuration(configuration)));
        pipeline.push(Box::new(DebugQuery::from_configuration(configuration)));
        Ok(pipeline)
    }
}
