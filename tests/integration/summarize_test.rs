//! `castsum summarize` against a mock Ollama server

use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::helpers::{castsum, closed_port, fixture_path, ndjson};

fn stream_body() -> String {
    ndjson(&[
        json!({"model": "m", "thinking": "They listed files ", "done": false}),
        json!({"model": "m", "thinking": "then deployed.", "done": false}),
        json!({"model": "m", "response": "The user ran ", "done": false}),
        json!({"model": "m", "response": "a deploy script.", "done": false}),
        json!({"model": "m", "response": "", "done": true, "eval_count": 2}),
    ])
}

async fn mock_generate(server: &MockServer, think: bool) {
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .and(body_partial_json(json!({
            "model": "test-model",
            "stream": true,
            "think": think,
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "application/x-ndjson")
                .set_body_string(stream_body()),
        )
        .expect(1)
        .mount(server)
        .await;
}

fn port_of(server: &MockServer) -> String {
    server.address().port().to_string()
}

#[tokio::test]
async fn quiet_prints_only_the_summary() {
    let server = MockServer::start().await;
    mock_generate(&server, true).await;
    let temp = TempDir::new().unwrap();

    castsum(&temp)
        .arg("summarize")
        .arg(fixture_path("shell_session.cast"))
        .args(["--model", "test-model", "--host", "127.0.0.1", "--port"])
        .arg(port_of(&server))
        .arg("--quiet")
        .assert()
        .success()
        .stdout("The user ran a deploy script.\n");
}

#[tokio::test]
async fn streams_thinking_and_summary_sections() {
    let server = MockServer::start().await;
    mock_generate(&server, true).await;
    let temp = TempDir::new().unwrap();

    castsum(&temp)
        .arg("summarize")
        .arg(fixture_path("shell_session.cast"))
        .args(["-m", "test-model", "--host", "127.0.0.1", "--port"])
        .arg(port_of(&server))
        .assert()
        .success()
        .stdout(predicate::str::contains("Processing asciinema file:"))
        .stdout(predicate::str::contains("Session: shell_session.cast"))
        .stdout(predicate::str::contains("THINKING:\n----------------------------------------\nThey listed files then deployed."))
        .stdout(predicate::str::contains("SUMMARY:\n----------------------------------------\nThe user ran a deploy script."))
        .stdout(predicate::str::contains("[Completed - 2 response tokens received]"))
        .stdout(predicate::str::contains("[Thinking tokens: 32 characters]"))
        .stdout(predicate::str::ends_with("\nSummary complete!\n"));
}

#[tokio::test]
async fn disable_thinking_is_sent_to_the_server() {
    let server = MockServer::start().await;
    mock_generate(&server, false).await;
    let temp = TempDir::new().unwrap();

    castsum(&temp)
        .arg("summarize")
        .arg(fixture_path("shell_session.cast"))
        .args(["-m", "test-model", "--host", "127.0.0.1", "--disable-thinking", "-q", "--port"])
        .arg(port_of(&server))
        .assert()
        .success();
}

#[tokio::test]
async fn model_and_server_can_come_from_config() {
    let server = MockServer::start().await;
    mock_generate(&server, true).await;
    let temp = TempDir::new().unwrap();
    std::fs::write(
        temp.path().join("config.toml"),
        format!(
            "[ollama]\nhost = \"127.0.0.1\"\nport = {}\nmodel = \"test-model\"\n",
            server.address().port()
        ),
    )
    .unwrap();

    castsum(&temp)
        .arg("summarize")
        .arg(fixture_path("shell_session.cast"))
        .arg("--quiet")
        .assert()
        .success()
        .stdout("The user ran a deploy script.\n");
}

#[tokio::test]
async fn output_file_holds_session_info_and_summary() {
    let server = MockServer::start().await;
    mock_generate(&server, true).await;
    let temp = TempDir::new().unwrap();
    let out = temp.path().join("summary.txt");

    castsum(&temp)
        .arg("summarize")
        .arg(fixture_path("shell_session.cast"))
        .args(["-m", "test-model", "--host", "127.0.0.1", "-q", "--port"])
        .arg(port_of(&server))
        .arg("--output")
        .arg(&out)
        .assert()
        .success();

    let written = std::fs::read_to_string(&out).unwrap();
    assert!(written.starts_with("Session: shell_session.cast\nDuration: 3.5 seconds"));
    assert!(written.ends_with("\n\nThe user ran a deploy script.\n"));
}

#[tokio::test]
async fn server_error_status_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(404).set_body_string("model 'nope' not found"))
        .mount(&server)
        .await;
    let temp = TempDir::new().unwrap();

    castsum(&temp)
        .arg("summarize")
        .arg(fixture_path("shell_session.cast"))
        .args(["-m", "nope", "--host", "127.0.0.1", "-q", "--port"])
        .arg(port_of(&server))
        .assert()
        .failure()
        .stderr(predicate::str::contains("404"))
        .stderr(predicate::str::contains("model 'nope' not found"));
}

#[tokio::test]
async fn noise_only_recording_never_reaches_the_server() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let temp = TempDir::new().unwrap();

    castsum(&temp)
        .arg("summarize")
        .arg(fixture_path("noise_only.cast"))
        .args(["-m", "test-model", "--host", "127.0.0.1", "-q", "--port"])
        .arg(port_of(&server))
        .assert()
        .failure()
        .stderr(predicate::str::contains("No meaningful output found in the session"));
}

#[test]
fn missing_model_is_an_error() {
    let temp = TempDir::new().unwrap();
    castsum(&temp)
        .arg("summarize")
        .arg(fixture_path("shell_session.cast"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("No model specified"));
}

#[test]
fn unreachable_server_is_reported() {
    let temp = TempDir::new().unwrap();
    castsum(&temp)
        .arg("summarize")
        .arg(fixture_path("shell_session.cast"))
        .args(["-m", "test-model", "--host", "127.0.0.1", "-q", "--port"])
        .arg(closed_port().to_string())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Could not connect to Ollama server"));
}
