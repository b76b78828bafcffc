//! Config command E2E tests.

use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

fn workspace_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .and_then(Path::parent)
        .map_or_else(|| manifest_dir.to_path_buf(), Path::to_path_buf)
}

fn fixture_path(relative: &str) -> PathBuf {
    workspace_root()
        .join("crates")
        .join("testkit")
        .join("fixtures")
        .join(relative)
}

#[test]
fn config_formats_narrow_to_the_plugin_tree() -> io::Result<()> {
    for fixture in ["config/search.typoscript", "config/search.json", "config/search.toml"] {
        let output = Command::new(env!("CARGO_BIN_EXE_solr-search"))
            .args(["--json", "config", "--config"])
            .arg(fixture_path(fixture))
            .output()?;
        assert!(output.status.success(), "config failed for {fixture}");

        let value: serde_json::Value =
            serde_json::from_slice(&output.stdout).map_err(io::Error::other)?;
        assert_eq!(value["status"], "ok");
        let config = &value["config"];
        assert!(
            config.get("search.").or_else(|| config.get("search")).is_some(),
            "search tree missing for {fixture}"
        );
    }
    Ok(())
}

#[test]
fn overrides_merge_over_the_file() -> io::Result<()> {
    let output = Command::new(env!("CARGO_BIN_EXE_solr-search"))
        .args(["--json", "config", "--config"])
        .arg(fixture_path("config/search.json"))
        .args(["--overrides-json", r#"{"search.":{"faceting":"0"}}"#])
        .output()?;
    assert!(output.status.success());

    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).map_err(io::Error::other)?;
    assert_eq!(value["config"]["search."]["faceting"], "0");
    Ok(())
}

#[test]
fn unsupported_extension_is_invalid_input() -> io::Result<()> {
    let output = Command::new(env!("CARGO_BIN_EXE_solr-search"))
        .args(["--json", "config", "--config", "setup.yaml"])
        .output()?;
    assert_eq!(output.status.code(), Some(2));

    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).map_err(io::Error::other)?;
    assert_eq!(value["status"], "error");
    assert_eq!(value["error"]["code"]["namespace"], "config");
    Ok(())
}
