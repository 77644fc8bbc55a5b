//! Integration tests for the `rmcover` binary.
//!
//! Argument parsing, config handling and exit codes run without any
//! network; the cover commands run against a wiremock device bridge.
#![allow(clippy::unwrap_used)]

use std::io::Write;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use tempfile::NamedTempFile;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `rmcover` binary with env isolation.
fn rmcover_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("rmcover");
    cmd.env("HOME", "/tmp/rmcover-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/rmcover-cli-test-nonexistent")
        .env_remove("RMCOVER_CONFIG")
        .env_remove("RMCOVER_OUTPUT")
        .env_remove("RUST_LOG");
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

fn write_config(bridge_url: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
ip_address = "192.168.1.50"
mac = "34:EA:34:00:00:01"
timeout = 2
send_retries = 1
auth_retries = 0
bridge_url = "{bridge_url}"

[covers.garage]
friendly_name = "Garage Door"
command_open = "JgBQAA=="
command_close = "JgBRAA=="
command_stop = "JgBSAA=="
trigger_time = 0

[covers.gate]
command_open = "JgBTAA=="
"#
    )
    .unwrap();
    file
}

async fn mount_bridge(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/api/device/auth"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": "t" })))
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/device/send"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .mount(server)
        .await;
}

/// Run a prepared command off the async runtime so the mock bridge keeps serving.
async fn run_blocking(mut cmd: assert_cmd::Command) -> std::process::Output {
    tokio::task::spawn_blocking(move || cmd.output().unwrap())
        .await
        .unwrap()
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = rmcover_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    rmcover_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("garage")
            .and(predicate::str::contains("covers"))
            .and(predicate::str::contains("close")),
    );
}

#[test]
fn test_version_flag() {
    rmcover_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("rmcover"));
}

#[test]
fn test_completions_zsh() {
    rmcover_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

#[test]
fn test_invalid_output_format() {
    let output = rmcover_cmd().args(["-o", "yaml", "covers"]).output().unwrap();
    assert_eq!(output.status.code(), Some(2));
}

// ── Config handling ─────────────────────────────────────────────────

#[test]
fn test_config_path_honours_flag() {
    rmcover_cmd()
        .args(["--config", "/etc/rmcover/garage.toml", "config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("/etc/rmcover/garage.toml"));
}

#[test]
fn test_missing_config_is_reported() {
    let output = rmcover_cmd()
        .args(["--config", "/tmp/rmcover-cli-test-nonexistent/none.toml", "covers"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let text = combined_output(&output);
    assert!(
        text.contains("Configuration file not found"),
        "Expected missing config error:\n{text}"
    );
}

#[test]
fn test_invalid_config_exits_with_usage_code() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "ip_address = \"10.0.0.2\"\nmac = \"nope\"\n[covers.garage]\n").unwrap();

    let output = rmcover_cmd()
        .arg("--config")
        .arg(file.path())
        .arg("covers")
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("mac"));
}

#[test]
fn test_covers_plain_lists_ids_in_order() {
    let file = write_config("http://127.0.0.1:9");

    rmcover_cmd()
        .arg("--config")
        .arg(file.path())
        .args(["-o", "plain", "covers"])
        .assert()
        .success()
        .stdout("garage\ngate\n");
}

#[test]
fn test_covers_json() {
    let file = write_config("http://127.0.0.1:9");

    let output = rmcover_cmd()
        .arg("--config")
        .arg(file.path())
        .args(["-o", "json", "covers"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let covers: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(covers[0]["name"], "Garage Door");
    assert_eq!(covers[0]["device_class"], "garage");
    assert_eq!(covers[0]["commands"], json!(["open", "close", "stop"]));
    assert_eq!(covers[1]["name"], "gate");
    assert_eq!(covers[1]["commands"], json!(["open"]));
}

#[test]
fn test_config_show_renders_toml() {
    let file = write_config("http://127.0.0.1:9");

    rmcover_cmd()
        .arg("--config")
        .arg(file.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("ip_address = \"192.168.1.50\"")
                .and(predicate::str::contains("[covers.garage]")),
        );
}

// ── Cover commands ──────────────────────────────────────────────────

#[test]
fn test_unknown_cover_is_not_found() {
    let file = write_config("http://127.0.0.1:9");

    let output = rmcover_cmd()
        .arg("--config")
        .arg(file.path())
        .args(["open", "shed"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(4));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_open_sends_packet_through_bridge() {
    let server = MockServer::start().await;
    mount_bridge(&server).await;
    let file = write_config(&server.uri());

    let mut cmd = rmcover_cmd();
    cmd.arg("--config")
        .arg(file.path())
        .args(["-o", "json", "open", "garage"]);
    let output = run_blocking(cmd).await;

    assert!(output.status.success(), "{}", combined_output(&output));
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["outcome"], "sent");
    assert_eq!(report["state"], "open");

    let requests = server.received_requests().await.unwrap();
    let sends: Vec<_> = requests
        .iter()
        .filter(|r| r.url.path() == "/api/device/send")
        .collect();
    assert_eq!(sends.len(), 1);
    let body: serde_json::Value = serde_json::from_slice(&sends[0].body).unwrap();
    assert_eq!(body["packet"], "JgBQAA==");
    assert_eq!(body["mac"], "34:ea:34:00:00:01");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_close_without_known_state_is_skipped() {
    let server = MockServer::start().await;
    mount_bridge(&server).await;
    let file = write_config(&server.uri());

    let mut cmd = rmcover_cmd();
    cmd.arg("--config")
        .arg(file.path())
        .args(["-o", "plain", "close", "garage"]);
    let output = run_blocking(cmd).await;

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "skipped\n");
    assert!(String::from_utf8_lossy(&output.stderr).contains("--assume-open"));

    let requests = server.received_requests().await.unwrap();
    assert!(requests.iter().all(|r| r.url.path() != "/api/device/send"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_close_assume_open_sends_close_then_stop() {
    let server = MockServer::start().await;
    mount_bridge(&server).await;
    let file = write_config(&server.uri());

    let mut cmd = rmcover_cmd();
    cmd.arg("--config")
        .arg(file.path())
        .args(["-o", "plain", "close", "garage", "--assume-open"]);
    let output = run_blocking(cmd).await;

    assert!(output.status.success(), "{}", combined_output(&output));
    assert_eq!(String::from_utf8_lossy(&output.stdout), "sent\n");

    let packets: Vec<String> = server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .filter(|r| r.url.path() == "/api/device/send")
        .map(|r| {
            let body: serde_json::Value = serde_json::from_slice(&r.body).unwrap();
            body["packet"].as_str().unwrap().to_owned()
        })
        .collect();
    assert_eq!(packets, vec!["JgBRAA==", "JgBSAA=="]);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_rejected_packet_exits_with_connection_code() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/device/auth"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": "t" })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/device/send"))
        .and(body_partial_json(json!({ "packet": "JgBSAA==" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": false })))
        .mount(&server)
        .await;
    let file = write_config(&server.uri());

    let mut cmd = rmcover_cmd();
    cmd.arg("--config").arg(file.path()).args(["stop", "garage"]);
    let output = run_blocking(cmd).await;

    assert_eq!(output.status.code(), Some(7));
    assert!(combined_output(&output).contains("not delivered"));

    // One resend after a fresh login, then give up.
    let sends = server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .filter(|r| r.url.path() == "/api/device/send")
        .count();
    assert_eq!(sends, 2);
}
