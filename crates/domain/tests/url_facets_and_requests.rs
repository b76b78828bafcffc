//! Integration coverage for URL facet encodings and search requests.

use proptest::prelude::*;
use serde_json::json;
use solr_search_domain::{
    ParameterStyle, SearchRequest, SortDirection, UrlFacetContainer, DEFAULT_ARGUMENTS_NAMESPACE,
};
use std::error::Error;

#[derive(Debug, Clone)]
enum Operation {
    Add(String, String),
    Remove(String, String),
    RemoveAllByName(String),
}

fn facet_name() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["type", "color", "created", "url"]).prop_map(str::to_owned)
}

fn facet_value() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["pages", "news", "red", "a:b", "", "http://example.org"])
        .prop_map(str::to_owned)
}

fn operation() -> impl Strategy<Value = Operation> {
    prop_oneof![
        4 => (facet_name(), facet_value()).prop_map(|(name, value)| Operation::Add(name, value)),
        2 => (facet_name(), facet_value()).prop_map(|(name, value)| Operation::Remove(name, value)),
        1 => facet_name().prop_map(Operation::RemoveAllByName),
    ]
}

fn apply(container: &mut UrlFacetContainer, operation: &Operation) {
    match operation {
        Operation::Add(name, value) => container.add_facet_value(name, value),
        Operation::Remove(name, value) => container.remove_facet_value(name, value),
        Operation::RemoveAllByName(name) => container.remove_all_facet_values_by_name(name),
    }
}

proptest! {
    #[test]
    fn index_and_assoc_styles_behave_identically(operations in prop::collection::vec(operation(), 0..24)) {
        let mut index = UrlFacetContainer::new(ParameterStyle::Index);
        let mut assoc = UrlFacetContainer::new(ParameterStyle::Assoc);
        for operation in &operations {
            apply(&mut index, operation);
            apply(&mut assoc, operation);
        }

        prop_assert_eq!(index.count(), assoc.count());
        prop_assert_eq!(index.active_facets(), assoc.active_facets());
        prop_assert_eq!(index.active_facet_names(), assoc.active_facet_names());
        for name in index.active_facet_names() {
            prop_assert_eq!(
                index.active_facet_values_by_name(&name),
                assoc.active_facet_values_by_name(&name)
            );
        }
        for operation in &operations {
            if let Operation::Add(name, value) = operation {
                prop_assert_eq!(index.has_facet_value(name, value), assoc.has_facet_value(name, value));
            }
        }
    }

    #[test]
    fn encoded_values_decode_to_the_same_facets(operations in prop::collection::vec(operation(), 0..16)) {
        for style in [ParameterStyle::Index, ParameterStyle::Assoc] {
            let mut container = UrlFacetContainer::new(style);
            for operation in &operations {
                apply(&mut container, operation);
            }
            let decoded = UrlFacetContainer::from_value(Some(&container.to_value()), style);
            prop_assert_eq!(decoded.active_facets(), container.active_facets());
        }
    }
}

#[test]
fn request_writes_facets_back_in_its_style() -> Result<(), Box<dyn Error>> {
    let mut request = SearchRequest::from_value(
        json!({ "tx_solr": { "q": "solr", "filter": { "type:pages": 1 } } }),
        DEFAULT_ARGUMENTS_NAMESPACE,
        ParameterStyle::Assoc,
    );
    request
        .add_facet_value("color", "red")
        .set_sorting("title", SortDirection::Desc)
        .set_results_per_page(50);

    assert_eq!(
        request.as_arguments(),
        json!({
            "tx_solr": {
                "q": "solr",
                "sort": "title desc",
                "resultsPerPage": 50,
                "filter": { "type:pages": 1, "color:red": 1 }
            }
        })
    );
    Ok(())
}

#[test]
fn removing_values_keeps_remaining_order() {
    let mut request = SearchRequest::from_value(
        json!({ "tx_solr": { "filter": ["type:pages", "color:red", "type:news", "size:xl"] } }),
        DEFAULT_ARGUMENTS_NAMESPACE,
        ParameterStyle::Index,
    );
    request.remove_facet_value("color", "red");

    assert_eq!(request.active_facets(), vec!["type:pages", "type:news", "size:xl"]);
    assert_eq!(request.active_facet_values_by_name("type"), vec!["pages", "news"]);
    assert!(request.state_changed());
}
