//! Integration tests reconciling the recorded response of the sample page.

use serde_json::Value;
use solr_search_app::ResultSetReconstitutionProcessor;
use solr_search_config::{ConfigFormat, TypoScriptConfiguration, load_configuration_from_sources};
use solr_search_domain::{
    Facet, FacetItemDetail, FacetRegistry, ParameterStyle, SearchRequest, SearchResultSet,
};
use solr_search_testkit::fixtures::{
    SEARCH_RESPONSE, SEARCH_TYPOSCRIPT, TYPE_PAGES_ARGUMENTS, load_json_fixture, read_fixture,
};
use std::error::Error;
use std::sync::Arc;

type TestResult<T = ()> = Result<T, Box<dyn Error>>;

fn typoscript(text: &str) -> TestResult<TypoScriptConfiguration> {
    Ok(load_configuration_from_sources(
        Some((text, ConfigFormat::TypoScript)),
        None,
    )?)
}

fn reconcile(
    configuration: &TypoScriptConfiguration,
    arguments: Value,
    response: Value,
) -> TestResult<SearchResultSet> {
    let request = SearchRequest::from_value(
        arguments,
        &configuration.plugin_namespace(),
        ParameterStyle::Index,
    );
    Ok(ResultSetReconstitutionProcessor::new(Arc::new(FacetRegistry::default()))
        .process(SearchResultSet::new(request, response), configuration)?)
}

fn fixture_result_set() -> TestResult<SearchResultSet> {
    let configuration = typoscript(&read_fixture(SEARCH_TYPOSCRIPT)?)?;
    reconcile(
        &configuration,
        load_json_fixture(TYPE_PAGES_ARGUMENTS)?,
        load_json_fixture(SEARCH_RESPONSE)?,
    )
}

fn facet<'a>(result_set: &'a SearchResultSet, name: &str) -> TestResult<&'a Facet> {
    result_set
        .facets
        .get(name)
        .ok_or_else(|| format!("facet {name} missing").into())
}

#[test]
fn fixture_response_reconciles_every_facet_type() -> TestResult {
    let result_set = fixture_result_set()?;

    assert_eq!(result_set.num_found, 12);
    assert_eq!(result_set.page, 2);
    assert_eq!(result_set.documents.len(), 2);
    assert_eq!(
        result_set.facets.names(),
        vec!["type", "author", "category", "age", "created", "price", "color"]
    );

    let category = facet(&result_set, "category")?;
    assert_eq!(category.items().values(), vec!["/News/", "/Events/"]);
    let news = category.items().get("/News/").ok_or("news node missing")?;
    assert_eq!(news.label, "News");
    assert_eq!(
        news.children().map(|children| children.values()),
        Some(vec!["/News/Sports/", "/News/Culture/"])
    );

    let age = facet(&result_set, "age")?;
    let labels: Vec<(&str, u64)> = age
        .items()
        .iter()
        .map(|item| (item.label.as_str(), item.count))
        .collect();
    assert_eq!(labels, vec![("Last week", 3), ("Older", 9)]);

    let created = facet(&result_set, "created")?;
    let window = created.items().by_position(0).ok_or("created window missing")?;
    assert_eq!(window.value, "202401010000-202401030000");
    assert_eq!(window.count, 5);
    assert!(matches!(&window.detail, FacetItemDetail::Range { gap, .. } if gap == "+1DAY"));

    let price = facet(&result_set, "price")?;
    assert_eq!(price.items().values(), vec!["0-100"]);
    Ok(())
}

#[test]
fn manual_sort_order_puts_listed_values_first() -> TestResult {
    let result_set = fixture_result_set()?;
    let facet = facet(&result_set, "type")?;

    assert_eq!(
        facet.items().values(),
        vec!["pages", "tx_news_domain_model_news", "event"]
    );
    assert_eq!(
        facet.selected_values(),
        vec!["pages".to_owned(), "tx_news_domain_model_news".to_owned()]
    );
    assert!(facet.is_used());
    Ok(())
}

#[test]
fn json_facet_metrics_are_parsed_without_prefix() -> TestResult {
    let result_set = fixture_result_set()?;
    let author = facet(&result_set, "author")?;

    assert!(author.all_requirements_met());
    let jane = author.items().get("Jane").ok_or("Jane missing")?;
    assert_eq!(jane.count, 4);
    assert_eq!(jane.metrics.get("downloads"), Some(&37.0));
    Ok(())
}

#[test]
fn show_even_when_empty_keeps_an_empty_facet() -> TestResult {
    let result_set = fixture_result_set()?;

    let color = facet(&result_set, "color")?;
    assert!(color.items().is_empty());
    assert!(!color.is_available());
    assert!(result_set.facets.get("size").is_none());
    assert!(result_set.facets.available().get("color").is_none());
    Ok(())
}

const EMPTY_COLOR_FACET: &str = "plugin.tx_solr.search.faceting = 1
plugin.tx_solr.search.faceting.facets {
    type.field = type
    color.field = color_stringM
}";

fn type_counts() -> TestResult<Value> {
    Ok(serde_json::from_str(
        r#"{ "facet_counts": { "facet_fields": { "type": ["news", 5, "pages", 1] } } }"#,
    )?)
}

#[test]
fn empty_facets_are_dropped_by_default() -> TestResult {
    let configuration = typoscript(EMPTY_COLOR_FACET)?;
    let result_set = reconcile(&configuration, serde_json::json!({}), type_counts()?)?;

    assert_eq!(result_set.facets.names(), vec!["type"]);
    Ok(())
}

#[test]
fn show_empty_facets_keeps_every_empty_facet() -> TestResult {
    let configuration = typoscript(&format!(
        "{EMPTY_COLOR_FACET}\nplugin.tx_solr.search.faceting.showEmptyFacets = 1"
    ))?;
    let result_set = reconcile(&configuration, serde_json::json!({}), type_counts()?)?;

    assert_eq!(result_set.facets.names(), vec!["type", "color"]);
    let color = facet(&result_set, "color")?;
    assert!(color.items().is_empty());
    assert!(!color.is_available());
    assert!(result_set.facets.available().get("color").is_none());
    Ok(())
}

#[test]
fn requirements_may_target_a_facet_dropped_for_being_empty() -> TestResult {
    let configuration = typoscript(&format!(
        "{EMPTY_COLOR_FACET}
plugin.tx_solr.search.faceting.facets.type.requirements.noColor {{
    facet = color
    values = __none
}}"
    ))?;
    let result_set = reconcile(&configuration, serde_json::json!({}), type_counts()?)?;

    assert_eq!(result_set.facets.names(), vec!["type"]);
    assert!(facet(&result_set, "type")?.all_requirements_met());
    Ok(())
}

#[test]
fn facets_on_the_same_field_are_independent() -> TestResult {
    let configuration = typoscript(
        "plugin.tx_solr.search.faceting = 1
plugin.tx_solr.search.faceting.facets {
    all.field = type
    some {
        field = type
        excludeValues = event
        reverseOrder = 1
    }
}",
    )?;
    let response: Value = serde_json::from_str(
        r#"{ "facet_counts": { "facet_fields": { "type": ["news", 5, "event", 3, "pages", 1] } } }"#,
    )?;
    let result_set = reconcile(
        &configuration,
        serde_json::json!({ "tx_solr": { "filter": ["all:news"] } }),
        response,
    )?;

    let all = facet(&result_set, "all")?;
    assert_eq!(all.items().values(), vec!["news", "event", "pages"]);
    assert_eq!(all.selected_values(), vec!["news".to_owned()]);

    let some = facet(&result_set, "some")?;
    assert_eq!(some.items().values(), vec!["pages", "news"]);
    assert!(some.selected_values().is_empty());
    Ok(())
}

#[test]
fn selected_value_missing_from_response_is_kept() -> TestResult {
    let configuration = typoscript(
        "plugin.tx_solr.search.faceting = 1
plugin.tx_solr.search.faceting.facets.type.field = type",
    )?;
    let response: Value = serde_json::from_str(
        r#"{ "facet_counts": { "facet_fields": { "type": ["news", 5] } } }"#,
    )?;
    let result_set = reconcile(
        &configuration,
        serde_json::json!({ "tx_solr": { "filter": ["type:archive"] } }),
        response,
    )?;

    let facet = facet(&result_set, "type")?;
    let archive = facet.items().get("archive").ok_or("archive missing")?;
    assert_eq!(archive.count, 0);
    assert!(archive.selected);
    assert_eq!(facet.items().len(), 2);
    Ok(())
}

#[test]
fn requirements_may_reference_later_facets() -> TestResult {
    let configuration = typoscript(
        "plugin.tx_solr.search.faceting = 1
plugin.tx_solr.search.faceting.facets {
    author {
        field = author
        requirements.newsOnly {
            facet = type
            values = news
        }
    }
    type.field = type
}",
    )?;
    let response: Value = serde_json::from_str(
        r#"{ "facet_counts": { "facet_fields": {
            "author": ["Jane", 2],
            "type": ["news", 5, "pages", 1]
        } } }"#,
    )?;

    let unselected = reconcile(&configuration, serde_json::json!({}), response.clone())?;
    assert!(!facet(&unselected, "author")?.all_requirements_met());
    assert!(unselected.facets.available().get("author").is_none());

    let selected = reconcile(
        &configuration,
        serde_json::json!({ "tx_solr": { "filter": ["type:news"] } }),
        response,
    )?;
    assert!(facet(&selected, "author")?.all_requirements_met());
    assert!(selected.facets.available().get("author").is_some());
    Ok(())
}
