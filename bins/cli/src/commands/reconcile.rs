//! Reconcile command handler: run the search use case against a recorded
//! Solr response.

use super::CommandInput;
use crate::CliOutput;
use crate::error::{CliError, ExitCode};
use crate::format::{OutputMode, pretty_json};
use crate::format_error_output;
use solr_search_adapters::{JsonLogger, RecordedSolr, StderrLogSink};
use solr_search_app::{SearchDeps, search};
use solr_search_domain::{FacetItem, FacetItemCollection, FacetRegistry, SearchResultSet};
use solr_search_ports::{LogLevel, LoggerPort};
use solr_search_shared::Result;
use std::fmt::Write;
use std::path::Path;
use std::sync::Arc;

/// Reconcile `response_path` for the request and print the result set.
pub fn run_reconcile(
    mode: OutputMode,
    input: &CommandInput<'_>,
    response_path: &Path,
) -> Result<CliOutput, CliError> {
    let result_set = match reconcile(mode, input, response_path) {
        Ok(result_set) => result_set,
        Err(error) => return Ok(format_error_output(mode, &error)),
    };

    let stdout = if mode.is_json() {
        pretty_json(&serde_json::json!({
            "status": "ok",
            "result": result_set,
        }))?
    } else {
        format_result_text(&result_set)
    };

    Ok(CliOutput {
        stdout,
        stderr: String::new(),
        exit_code: ExitCode::Ok,
    })
}

fn reconcile(mode: OutputMode, input: &CommandInput<'_>, response_path: &Path) -> Result<SearchResultSet> {
    let configuration = input.configuration()?;
    let request = input.request(&configuration)?;
    let solr = RecordedSolr::from_path(response_path)?;

    let logger = mode.log_events.then(|| -> Arc<dyn LoggerPort> {
        let level = if mode.verbose { LogLevel::Debug } else { LogLevel::Info };
        Arc::new(JsonLogger::new(Arc::new(StderrLogSink)).with_min_level(level))
    });
    let deps = SearchDeps {
        configuration: Arc::new(configuration),
        registry: Arc::new(FacetRegistry::default()),
        solr: Arc::new(solr),
        logger,
    };
    search(&deps, request)
}

fn format_result_text(result_set: &SearchResultSet) -> String {
    let mut out = String::from("status: ok\n");
    let _ = writeln!(out, "searched: {}", result_set.has_searched);
    if !result_set.has_searched {
        return out;
    }
    let _ = writeln!(out, "numFound: {}", result_set.num_found);
    let _ = writeln!(out, "page: {}/{}", result_set.page, result_set.page_count());
    if let (Some(initial), Some(corrected)) = (&result_set.initial_query, &result_set.corrected_query) {
        let _ = writeln!(out, "corrected: {initial} -> {corrected}");
    }
    if let Some(sorting) = result_set.selected_sorting() {
        let _ = writeln!(out, "sorting: {} {}", sorting.name, sorting.direction);
    }
    let _ = writeln!(out, "facets: {}", result_set.facets.len());

    for facet in result_set.facets.iter() {
        let mut flags = Vec::new();
        if facet.is_used() {
            flags.push("used");
        }
        if !facet.all_requirements_met() {
            flags.push("requirements unmet");
        }
        let _ = write!(out, "{} ({})", facet.name(), facet.label());
        if !flags.is_empty() {
            let _ = write!(out, " [{}]", flags.join(", "));
        }
        out.push('\n');
        write_items(&mut out, facet.items(), 1);
    }
    out
}

fn write_items(out: &mut String, items: &FacetItemCollection, depth: usize) {
    for item in items.iter() {
        write_item(out, item, depth);
        if let Some(children) = item.children() {
            write_items(out, children, depth + 1);
        }
    }
}

fn write_item(out: &mut String, item: &FacetItem, depth: usize) {
    let marker = if item.selected { '*' } else { '-' };
    let _ = writeln!(
        out,
        "{:indent$}{marker} {} ({})",
        "",
        item.label,
        item.count,
        indent = depth * 2
    );
}
