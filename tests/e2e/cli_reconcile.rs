//! Reconcile command E2E tests.

use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn fixture_path(relative: &str) -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .and_then(Path::parent)
        .map_or_else(|| manifest_dir.to_path_buf(), Path::to_path_buf)
        .join("crates/testkit/fixtures")
        .join(relative)
}

fn reconcile(extra: &[&str]) -> io::Result<Output> {
    Command::new(env!("CARGO_BIN_EXE_solr-search"))
        .arg("reconcile")
        .arg("--config")
        .arg(fixture_path("config/search.typoscript"))
        .arg("--response")
        .arg(fixture_path("responses/search.response.json"))
        .arg("--args-file")
        .arg(fixture_path("requests/type-pages.args.json"))
        .args(extra)
        .output()
}

#[test]
fn json_output_contains_reconciled_facets() -> io::Result<()> {
    let output = reconcile(&["--json"])?;
    assert!(output.status.success());

    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).map_err(io::Error::other)?;
    let result = &value["result"];
    assert_eq!(result["hasSearched"], true);
    assert_eq!(result["numFound"], 12);

    let names: Vec<&str> = result["facets"]
        .as_array()
        .map(|facets| facets.iter().filter_map(|facet| facet["name"].as_str()).collect())
        .unwrap_or_default();
    assert_eq!(names, vec!["type", "author", "category", "age", "created", "price", "color"]);
    assert_eq!(result["facets"][0]["isUsed"], true);
    Ok(())
}

#[test]
fn text_output_marks_selected_options() -> io::Result<()> {
    let output = reconcile(&[])?;
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("status: ok\nsearched: true\nnumFound: 12\n"));
    assert!(stdout.contains("type (Content Type) [used]\n"));
    assert!(stdout.contains("  * pages (2)\n"));
    assert!(stdout.contains("  - event (3)\n"));
    assert!(stdout.contains("    - Sports (4)\n"));
    Ok(())
}

#[test]
fn log_events_are_written_as_json_lines() -> io::Result<()> {
    let output = reconcile(&["--json", "--log-events"])?;
    assert!(output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    let events: Vec<String> = stderr
        .lines()
        .filter_map(|line| serde_json::from_str::<serde_json::Value>(line).ok())
        .filter_map(|event| event["event"].as_str().map(str::to_owned))
        .collect();
    assert_eq!(events, vec!["search.start", "search.completed"]);
    Ok(())
}

#[test]
fn missing_response_file_is_an_io_error() -> io::Result<()> {
    let output = Command::new(env!("CARGO_BIN_EXE_solr-search"))
        .args(["--json", "reconcile", "--config"])
        .arg(fixture_path("config/search.typoscript"))
        .args(["--response", "/nonexistent/response.json"])
        .output()?;
    assert_eq!(output.status.code(), Some(3));

    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).map_err(io::Error::other)?;
    assert_eq!(value["error"]["metadata"]["path"], "/nonexistent/response.json");
    Ok(())
}
