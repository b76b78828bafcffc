//! Config command handler.

use super::CommandInput;
use crate::CliOutput;
use crate::error::{CliError, ExitCode};
use crate::format::{OutputMode, pretty_json};
use crate::format_error_output;
use solr_search_config::to_pretty_json;

/// Print the effective configuration.
pub fn run_config(mode: OutputMode, input: &CommandInput<'_>) -> Result<CliOutput, CliError> {
    let configuration = match input.configuration() {
        Ok(configuration) => configuration,
        Err(error) => return Ok(format_error_output(mode, &error)),
    };

    let stdout = if mode.is_json() {
        pretty_json(&serde_json::json!({
            "status": "ok",
            "config": configuration,
        }))?
    } else {
        match to_pretty_json(&configuration) {
            Ok(output) => output,
            Err(error) => return Ok(format_error_output(mode, &error)),
        }
    };

    Ok(CliOutput {
        stdout,
        stderr: String::new(),
        exit_code: ExitCode::Ok,
    })
}
