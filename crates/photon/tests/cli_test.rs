//! Integration tests for the `photon` CLI binary.
//!
//! Argument parsing, help output, completions, config handling and exit
//! codes, plus one-shot commands against a wiremock router.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

const XML_DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>";

/// Build a [`Command`] for the `photon` binary with env isolation.
///
/// Clears `PHOTON_*` variables and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn photon_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("photon");
    cmd.env("HOME", "/tmp/photon-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/photon-cli-test-nonexistent")
        .env_remove("RUST_LOG")
        .env_remove("PHOTON_CONFIG")
        .env_remove("PHOTON_PASSWORD")
        .env_remove("PHOTON_ROUTER__URL")
        .env_remove("PHOTON_ROUTER__USERNAME")
        .env_remove("PHOTON_ROUTER__PASSWORD");
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

/// Mount a home page with cookie `SID=abc` and tokens `[t1, t2]`.
async fn mount_home(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/html/home.html"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Set-Cookie", "SID=abc; path=/")
                .set_body_string(
                    r#"<meta name="csrf_token" content="t1"><meta name="csrf_token" content="t2">"#,
                ),
        )
        .mount(server)
        .await;
}

fn xml(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_string(format!("{XML_DECLARATION}{body}"))
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = photon_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    photon_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("uplink")
            .and(predicate::str::contains("run"))
            .and(predicate::str::contains("status"))
            .and(predicate::str::contains("connect")),
    );
}

#[test]
fn test_version_flag() {
    photon_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("photon"));
}

#[test]
fn test_invalid_subcommand() {
    photon_cmd()
        .arg("reboot")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

#[test]
fn test_invalid_log_format() {
    photon_cmd()
        .args(["--log-format", "xml", "status"])
        .assert()
        .code(2);
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    photon_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("photon"));
}

#[test]
fn test_completions_zsh() {
    photon_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

// ── Config ──────────────────────────────────────────────────────────

#[test]
fn test_config_path_honours_flag() {
    photon_cmd()
        .args(["--config", "/tmp/photon-elsewhere/config.toml", "config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("/tmp/photon-elsewhere/config.toml"));
}

#[test]
fn test_config_show_masks_password() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("config.toml");
    std::fs::write(
        &file,
        "[router]\nurl = \"http://192.168.8.1\"\npassword = \"hunter2\"\n\n[monitor]\ndial_timeout_ms = 5000\n",
    )
    .unwrap();

    photon_cmd()
        .arg("--config")
        .arg(&file)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("http://192.168.8.1")
                .and(predicate::str::contains("********"))
                .and(predicate::str::contains("dial_timeout_ms = 5000"))
                .and(predicate::str::contains("hunter2").not()),
        );
}

#[test]
fn test_config_show_applies_flag_overrides() {
    let output = photon_cmd()
        .args(["--router", "http://10.0.0.1", "--username", "owner", "-o", "json"])
        .args(["config", "show"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["router"]["url"], "http://10.0.0.1");
    assert_eq!(value["router"]["username"], "owner");
}

#[test]
fn test_malformed_config_is_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("config.toml");
    std::fs::write(&file, "[router\nurl = ").unwrap();

    photon_cmd()
        .arg("--config")
        .arg(&file)
        .args(["config", "show"])
        .assert()
        .code(2);
}

// ── Router-bound commands ───────────────────────────────────────────

#[test]
fn test_status_without_router_url() {
    let output = photon_cmd()
        .env("PHOTON_PASSWORD", "admin")
        .arg("status")
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    let text = combined_output(&output);
    assert!(
        text.contains("No router URL configured"),
        "Expected missing URL error:\n{text}"
    );
}

#[test]
fn test_hash_prints_login_digest() {
    photon_cmd()
        .env("PHOTON_PASSWORD", "admin")
        .args(["hash", "--token", "t2"])
        .assert()
        .success()
        .stdout(predicate::str::diff(
            "NGI4NTdkZmJhNDhiMTJmMjA0ODJlZDRmODU1YTliMWNkNjRlZWFlMmFhNDBhNTNiNGM3YTc4ODNmYjAwOWNhMg==\n",
        ));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_status_reports_router_state() {
    let server = MockServer::start().await;
    mount_home(&server).await;
    Mock::given(method("GET"))
        .and(path("/api/monitoring/status"))
        .respond_with(xml(
            "<response><ConnectionStatus>901</ConnectionStatus></response>",
        ))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/user/state-login"))
        .respond_with(xml("<response><State>0</State></response>"))
        .mount(&server)
        .await;

    let output = photon_cmd()
        .env("PHOTON_PASSWORD", "admin")
        .args(["--router", &server.uri(), "-o", "json", "status"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", combined_output(&output));

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["connection_status"], "connected");
    assert_eq!(value["code"], 901);
    assert_eq!(value["logged_in"], true);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_login_rejected_exits_with_auth_code() {
    let server = MockServer::start().await;
    mount_home(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/user/login"))
        .respond_with(xml("<error><code>108006</code><message></message></error>"))
        .mount(&server)
        .await;

    let output = photon_cmd()
        .env("PHOTON_PASSWORD", "wrong")
        .args(["--router", &server.uri(), "login"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(3));
    let text = combined_output(&output);
    assert!(text.contains("Login failed"), "Expected login failure:\n{text}");
}
