//! Params command handler.

use super::CommandInput;
use crate::CliOutput;
use crate::error::{CliError, ExitCode};
use crate::format::{OutputMode, pretty_json};
use crate::format_error_output;
use solr_search_domain::{FacetRegistry, QueryParameters};
use solr_search_query::QueryBuilder;
use solr_search_shared::Result;
use std::sync::Arc;

/// Print the Solr parameters built for the request.
pub fn run_params(mode: OutputMode, input: &CommandInput<'_>) -> Result<CliOutput, CliError> {
    let parameters = match build(input) {
        Ok(parameters) => parameters,
        Err(error) => return Ok(format_error_output(mode, &error)),
    };

    let stdout = if mode.is_json() {
        pretty_json(&serde_json::json!({
            "status": "ok",
            "parameters": parameters.to_map(),
        }))?
    } else {
        format_params_text(&parameters)
    };

    Ok(CliOutput {
        stdout,
        stderr: String::new(),
        exit_code: ExitCode::Ok,
    })
}

fn build(input: &CommandInput<'_>) -> Result<QueryParameters> {
    let configuration = input.configuration()?;
    let request = input.request(&configuration)?;
    QueryBuilder::new(Arc::new(configuration), Arc::new(FacetRegistry::default())).build(&request)
}

/// One `name=value` line per value, repeated parameters on several lines.
fn format_params_text(parameters: &QueryParameters) -> String {
    let mut out = String::new();
    for (name, value) in parameters.to_pairs() {
        out.push_str(&name);
        out.push('=');
        out.push_str(&value);
        out.push('\n');
    }
    out
}
