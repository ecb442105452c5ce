// SPDX-FileCopyrightText: 2026 OmniPA Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end tests for the `omnipa` binary.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use serde_json::Value;

const CONFIG: &str = r#"
[log]
level = "warn"

[routing]
fast_model = "small-model"
capable_model = "large-model"
"#;

fn omnipa(config: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_omnipa"))
        .arg("--config")
        .arg(config)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run omnipa binary")
}

fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

#[test]
fn route_prints_selection_json() {
    let dir = tempfile::tempdir().unwrap();
    let config = write(dir.path(), "omnipa.toml", CONFIG);
    let request = write(
        dir.path(),
        "request.json",
        r#"{"messages":[{"role":"user","content":"Book a hotel in Kyoto for May"}]}"#,
    );

    let output = omnipa(&config, &["route", "--input", request.to_str().unwrap()]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let value: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["tier"], "capable");
    assert_eq!(value["model"], "large-model");
    assert_eq!(value["intent"], "travel_planning");
    assert_eq!(value["config"]["max_tokens"], 2048);
}

#[test]
fn strict_route_fails_on_invalid_request() {
    let dir = tempfile::tempdir().unwrap();
    let config = write(dir.path(), "omnipa.toml", CONFIG);
    let request = write(dir.path(), "request.json", r#"{"messages":[{"role":"robot","content":"hi"}]}"#);

    let output = omnipa(&config, &["route", "--input", request.to_str().unwrap()]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn lenient_route_prints_caller_default() {
    let dir = tempfile::tempdir().unwrap();
    let config = write(dir.path(), "omnipa.toml", CONFIG);
    let request = write(dir.path(), "request.json", "{not json");

    let output = omnipa(
        &config,
        &["route", "--lenient", "--input", request.to_str().unwrap()],
    );
    assert!(output.status.success());

    let value: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["tier"], "capable");
    assert_eq!(value["model"], "large-model");
    assert_eq!(value["confidence"], 0.0);
    assert_eq!(value["config"]["max_tokens"], 2048);
}

#[test]
fn classify_prints_intent() {
    let dir = tempfile::tempdir().unwrap();
    let config = write(dir.path(), "omnipa.toml", CONFIG);

    let output = omnipa(&config, &["classify", "I feel stressed today"]);
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "mood_logging\n");
}

#[test]
fn invalid_config_exits_non_zero() {
    let dir = tempfile::tempdir().unwrap();
    let config = write(dir.path(), "omnipa.toml", "[routing]\nfast_modle = \"x\"\n");

    let output = omnipa(&config, &["classify", "hello"]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}
