//! Builds the parameters of the testkit request against the testkit setup.

use serde_json::Value;
use solr_search_config::{TypoScriptConfiguration, load_configuration_from_path};
use solr_search_domain::{FacetRegistry, ParameterStyle, ParameterValue, QueryParameters, SearchRequest};
use solr_search_query::QueryBuilder;
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

fn fixture_path(relative: &str) -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .map_or_else(|| manifest_dir.to_path_buf(), Path::to_path_buf)
        .join("testkit")
        .join("fixtures")
        .join(relative)
}

fn configuration() -> Result<TypoScriptConfiguration, Box<dyn Error>> {
    Ok(load_configuration_from_path(
        Some(&fixture_path("config/search.typoscript")),
        None,
    )?)
}

fn request(configuration: &TypoScriptConfiguration) -> Result<SearchRequest, Box<dyn Error>> {
    let arguments: Value =
        serde_json::from_str(&fs::read_to_string(fixture_path("requests/type-pages.args.json"))?)?;
    Ok(SearchRequest::from_value(
        arguments,
        &configuration.plugin_namespace(),
        ParameterStyle::Index,
    ))
}

fn build() -> Result<QueryParameters, Box<dyn Error>> {
    let configuration = configuration()?;
    let request = request(&configuration)?;
    let builder = QueryBuilder::new(Arc::new(configuration), Arc::new(FacetRegistry::default()));
    Ok(builder.build(&request)?)
}

fn values<'a>(parameters: &'a QueryParameters, name: &str) -> Vec<&'a str> {
    parameters.get(name).map(ParameterValue::values).unwrap_or_default()
}

#[test]
fn query_paging_and_field_lists() -> Result<(), Box<dyn Error>> {
    let parameters = build()?;

    assert_eq!(parameters.get_str("q"), Some("solr"));
    assert_eq!(parameters.get_str("start"), Some("10"));
    assert_eq!(parameters.get_str("rows"), Some("10"));
    assert_eq!(parameters.get_str("qf"), Some("content^40.0 title^5.0 keywords^2.0"));
    assert_eq!(parameters.get_str("pf"), Some("content^10.0 title^10.0"));
    assert_eq!(parameters.get_str("qs"), Some("1"));
    assert_eq!(parameters.get_str("ps"), Some("2"));
    assert!(!parameters.contains("pf2"));
    assert!(!parameters.contains("ps2"));
    assert_eq!(parameters.fields(), &["*".to_owned(), "score".to_owned()]);
    Ok(())
}

#[test]
fn request_sorting_maps_to_option_field() -> Result<(), Box<dyn Error>> {
    let parameters = build()?;
    assert_eq!(parameters.get_str("sort"), Some("sortTitle desc"));
    Ok(())
}

#[test]
fn configured_and_facet_filters_are_named() -> Result<(), Box<dyn Error>> {
    let parameters = build()?;

    assert_eq!(
        parameters.filter("pageSections"),
        Some("type:pages OR type:tx_news_domain_model_news")
    );
    assert_eq!(parameters.filter("__pageSections"), None);
    assert_eq!(
        parameters.filter("facet:type"),
        Some("(type:\"pages\" AND type:\"tx_news_domain_model_news\")")
    );
    Ok(())
}

#[test]
fn every_facet_type_contributes() -> Result<(), Box<dyn Error>> {
    let parameters = build()?;

    assert_eq!(parameters.get_str("facet"), Some("true"));
    assert_eq!(parameters.get_str("facet.sort"), Some("count"));
    assert_eq!(
        values(&parameters, "facet.field"),
        vec!["type", "categoryPaths_stringM", "color_stringS", "size_stringS"]
    );
    let json_facet: Value = serde_json::from_str(
        parameters.get_str("json.facet").ok_or("json.facet missing")?,
    )?;
    assert_eq!(json_facet["author"]["field"], "author");
    assert_eq!(json_facet["author"]["sort"], "metrics_downloads desc");
    assert_eq!(json_facet["author"]["facet"]["metrics_downloads"], "sum(downloads_intS)");
    assert_eq!(
        values(&parameters, "facet.query"),
        vec!["created:[NOW/DAY-7DAYS TO *]", "created:[* TO NOW/DAY-7DAYS]"]
    );
    assert_eq!(values(&parameters, "facet.range"), vec!["created", "price_floatS"]);
    assert_eq!(parameters.get_str("f.price_floatS.facet.range.gap"), Some("10"));
    Ok(())
}

#[test]
fn highlighting_and_spellchecking() -> Result<(), Box<dyn Error>> {
    let parameters = build()?;

    assert_eq!(parameters.get_str("hl"), Some("true"));
    assert_eq!(parameters.get_str("hl.fl"), Some("content"));
    assert_eq!(parameters.get_str("hl.useFastVectorHighlighter"), Some("true"));
    assert_eq!(parameters.get_str("hl.tag.pre"), Some("<span class=\"highlight\">"));
    assert_eq!(parameters.get_str("hl.tag.post"), Some("</span>"));
    assert_eq!(parameters.get_str("spellcheck"), Some("true"));
    assert_eq!(parameters.get_str("spellcheck.maxCollationTries"), Some("3"));
    assert!(!parameters.contains("debugQuery"));
    Ok(())
}
