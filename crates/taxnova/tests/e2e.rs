// SPDX-FileCopyrightText: 2026 TaxNova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end tests for the `taxnova` binary.
//!
//! Each test writes its own config into a temp directory and runs the binary
//! with a cleared environment, so host API keys and `RUST_LOG` never leak in.
//! Provider endpoints are wiremock servers.

use std::path::Path;
use std::process::Output;

use tempfile::TempDir;
use tokio::process::Command;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn run(dir: &Path, config: &str, args: &[&str]) -> Output {
    let config_path = dir.join("taxnova.toml");
    std::fs::write(&config_path, config).unwrap();

    Command::new(env!("CARGO_BIN_EXE_taxnova"))
        .arg("--config")
        .arg(&config_path)
        .args(args)
        .env_clear()
        .env("HOME", dir)
        .current_dir(dir)
        .output()
        .await
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

/// Only the OpenAI family, pointed at `base_url`.
fn openai_only(base_url: &str) -> String {
    format!(
        r#"
[llm]
provider = "openai"
fallback_chain = []
timeout_secs = 5

[providers.openai]
api_key = "sk-test-key"
base_url = "{base_url}"
"#
    )
}

// ---- Direct commands ----

#[tokio::test]
async fn calc_prints_totals() {
    let dir = TempDir::new().unwrap();
    let output = run(dir.path(), "", &["calc", "1000000"]).await;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("Tax Calculation Results"));
    assert!(out.contains("**Total Tax:** Rs. 10,000"));
}

#[tokio::test]
async fn calc_rejects_negative_income() {
    let dir = TempDir::new().unwrap();
    let output = run(dir.path(), "", &["calc", "-5000"]).await;

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("error"));
}

#[tokio::test]
async fn slabs_prints_reference_table() {
    let dir = TempDir::new().unwrap();
    let output = run(dir.path(), "", &["slabs"]).await;

    assert!(output.status.success());
    assert!(stdout(&output).contains("Tax Year 2024-25"));
}

// ---- Routing through the binary ----

#[tokio::test]
async fn ask_answers_rates_without_providers() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let output = run(
        dir.path(),
        &openai_only(&server.uri()),
        &["ask", "--verbose", "what are the current tax rates?"],
    )
    .await;

    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("Tax Rates Information"));
    assert!(out.contains("source: structured"));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn ask_uses_provider_for_open_questions() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "choices": [{"message": {"role": "assistant", "content": "Section 149 covers salary withholding."}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let output = run(
        dir.path(),
        &openai_only(&server.uri()),
        &["ask", "-v", "explain", "the", "FBR", "appeal", "procedure"],
    )
    .await;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("Section 149 covers salary withholding."));
    assert!(out.contains("source: provider:openai"));
}

#[tokio::test]
async fn ask_falls_back_offline_when_provider_fails() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let output = run(
        dir.path(),
        &openai_only(&server.uri()),
        &["ask", "--verbose", "how does the tax appeal process work"],
    )
    .await;

    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("offline mode"));
    assert!(out.contains("source: fallback"));
    assert!(out.contains("error: api_unavailable"));
}

#[tokio::test]
async fn ask_rejects_short_queries() {
    let dir = TempDir::new().unwrap();
    let output = run(dir.path(), "", &["ask", "--verbose", "ab"]).await;

    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("error: query_too_short"));
}

#[tokio::test]
async fn interaction_log_gets_one_line_per_ask() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let log_path = dir.path().join("logs").join("interactions.jsonl");
    let config = format!(
        "{}\n[log]\ninteraction_log = \"{}\"\n",
        openai_only(&server.uri()),
        log_path.display()
    );

    let output = run(dir.path(), &config, &["ask", "when is the filing deadline"]).await;
    assert!(output.status.success());

    let content = std::fs::read_to_string(&log_path).unwrap();
    let lines: Vec<serde_json::Value> = content
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["user_input"], "when is the filing deadline");
    assert_eq!(lines[0]["response_source"], "structured");
    assert!(lines[0]["error_kind"].is_null());
}

// ---- Configuration failures ----

#[tokio::test]
async fn unknown_config_key_exits_with_diagnostic() {
    let dir = TempDir::new().unwrap();
    let output = run(dir.path(), "[llm]\nprovder = \"openai\"\n", &["slabs"]).await;

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("unknown configuration key"));
    assert!(stdout(&output).is_empty());
}

#[tokio::test]
async fn invalid_temperature_exits_with_validation_error() {
    let dir = TempDir::new().unwrap();
    let output = run(dir.path(), "[llm]\ntemperature = 3.5\n", &["slabs"]).await;

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("validation error"));
}
