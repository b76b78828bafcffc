//! CLI binary entrypoint.

mod commands;
mod error;
mod format;
mod tracing_setup;

use clap::{Args, Parser, Subcommand};
use commands::{CommandInput, run_config, run_params, run_reconcile};
use error::{CliError, ExitCode};
use format::{OutputArgs, OutputMode};
use solr_search_shared::ErrorEnvelope;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_setup::{Verbosity, init_subscriber};

#[derive(Debug, Parser)]
#[command(
    name = "solr-search",
    version,
    about = "Build Solr search parameters and reconcile facet responses",
    long_about = None
)]
struct Cli {
    #[command(flatten)]
    output: OutputArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the effective configuration tree.
    Config {
        #[command(flatten)]
        config: ConfigArgs,
    },
    /// Print the Solr parameters built for a request.
    Params {
        #[command(flatten)]
        config: ConfigArgs,
        #[command(flatten)]
        request: RequestArgs,
    },
    /// Reconcile a recorded Solr response into facets and results.
    Reconcile {
        #[command(flatten)]
        config: ConfigArgs,
        #[command(flatten)]
        request: RequestArgs,
        /// Recorded Solr JSON response.
        #[arg(long)]
        response: PathBuf,
    },
}

#[derive(Debug, Args)]
struct ConfigArgs {
    /// Configuration file (TypoScript, JSON or TOML).
    #[arg(long)]
    config: PathBuf,
    /// JSON tree merged over the configuration.
    #[arg(long)]
    overrides_json: Option<String>,
}

#[derive(Debug, Args)]
struct RequestArgs {
    /// URL arguments as JSON (`{"tx_solr": {"q": "..."}}`).
    #[arg(long)]
    args: Option<String>,
    /// File holding the URL arguments as JSON.
    #[arg(long, conflicts_with = "args")]
    args_file: Option<PathBuf>,
}

pub(crate) struct CliOutput {
    stdout: String,
    stderr: String,
    exit_code: ExitCode,
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    init_subscriber(Verbosity::from_flags(cli.output.verbose, cli.output.quiet));
    let mode = OutputMode::from_args(&cli.output);

    match run(&cli.command, mode) {
        Ok(output) => match write_output(&output) {
            Ok(()) => std::process::ExitCode::from(output.exit_code.as_u8()),
            Err(error) => exit_with_error(&error),
        },
        Err(error) => exit_with_error(&error),
    }
}

fn exit_with_error(error: &CliError) -> std::process::ExitCode {
    let _ = writeln!(io::stderr(), "error: {error}");
    std::process::ExitCode::from(error.exit_code().as_u8())
}

fn run(command: &Commands, mode: OutputMode) -> Result<CliOutput, CliError> {
    match command {
        Commands::Config { config } => run_config(mode, &command_input(config, None)),
        Commands::Params { config, request } => {
            run_params(mode, &command_input(config, Some(request)))
        },
        Commands::Reconcile {
            config,
            request,
            response,
        } => run_reconcile(mode, &command_input(config, Some(request)), response),
    }
}

fn command_input<'a>(config: &'a ConfigArgs, request: Option<&'a RequestArgs>) -> CommandInput<'a> {
    CommandInput {
        config_path: &config.config,
        overrides_json: config.overrides_json.as_deref(),
        args_json: request.and_then(|request| request.args.as_deref()),
        args_file: request.and_then(|request| request.args_file.as_deref()),
    }
}

/// Render `error` on stdout (JSON) or stderr (text).
pub(crate) fn format_error_output(mode: OutputMode, error: &ErrorEnvelope) -> CliOutput {
    let exit_code = ExitCode::for_envelope(error);
    if mode.is_json() {
        let payload = serde_json::json!({
            "status": "error",
            "error": error,
        });
        let stdout = format::pretty_json(&payload).unwrap_or_else(|_| {
            "{\"status\":\"error\",\"error\":{\"message\":\"internal error\"}}\n".to_owned()
        });
        CliOutput {
            stdout,
            stderr: String::new(),
            exit_code,
        }
    } else {
        CliOutput {
            stdout: String::new(),
            stderr: format_error_text(error),
            exit_code,
        }
    }
}

fn format_error_text(error: &ErrorEnvelope) -> String {
    let mut out = format!("error: {error}\n");
    for (key, value) in &error.metadata {
        out.push_str("  ");
        out.push_str(key);
        out.push_str(": ");
        out.push_str(value);
        out.push('\n');
    }
    out
}

fn write_output(output: &CliOutput) -> Result<(), CliError> {
    let mut stdout = io::stdout();
    stdout.write_all(output.stdout.as_bytes())?;

    if !output.stderr.is_empty() {
        let mut stderr = io::stderr();
        stderr.write_all(output.stderr.as_bytes())?;
        stderr.flush()?;
    }

    Ok(())
}
