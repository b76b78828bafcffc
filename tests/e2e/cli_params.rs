//! Params command E2E tests.

use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

fn fixture_path(relative: &str) -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .and_then(Path::parent)
        .map_or_else(|| manifest_dir.to_path_buf(), Path::to_path_buf)
        .join("crates/testkit/fixtures")
        .join(relative)
}

fn params(extra: &[&str]) -> io::Result<std::process::Output> {
    Command::new(env!("CARGO_BIN_EXE_solr-search"))
        .arg("params")
        .arg("--config")
        .arg(fixture_path("config/search.typoscript"))
        .args(extra)
        .output()
}

#[test]
fn text_output_lists_one_parameter_per_line() -> io::Result<()> {
    let args = fixture_path("requests/type-pages.args.json")
        .to_string_lossy()
        .into_owned();
    let output = params(&["--args-file", args.as_str()])?;
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert!(lines.contains(&"q=solr"));
    assert!(lines.contains(&"start=10"));
    assert!(lines.contains(&"facet.field=type"));
    assert!(lines.contains(&"facet.field=size_stringS"));
    Ok(())
}

#[test]
fn json_output_maps_repeated_parameters_to_arrays() -> io::Result<()> {
    let output = params(&["--json", "--args", r#"{"tx_solr":{"q":"typo3","sort":"created asc"}}"#])?;
    assert!(output.status.success());

    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).map_err(io::Error::other)?;
    let parameters = &value["parameters"];
    assert_eq!(parameters["q"], "typo3");
    assert_eq!(parameters["sort"], "created asc");
    assert!(parameters["facet.field"].is_array());
    Ok(())
}

#[test]
fn empty_arguments_fall_back_to_match_all() -> io::Result<()> {
    let output = params(&["--json"])?;
    assert!(output.status.success());

    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).map_err(io::Error::other)?;
    assert_eq!(value["parameters"]["q"], "*:*");
    assert_eq!(value["parameters"]["start"], "0");
    Ok(())
}
