/*
[INPUT]:  Built binary, YAML fixtures under demos/, mock dashboard server
[OUTPUT]: Test results for CLI startup and one-shot subcommands
[POS]:    Integration tests - binary entry point
[UPDATE]: When changing CLI flags or subcommands
*/

use std::path::PathBuf;
use std::process::Command;

use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const BINARY: &str = env!("CARGO_BIN_EXE_supplychain-live-dashboard");

fn demo_config(name: &str) -> String {
    format!("{}/demos/{name}", env!("CARGO_MANIFEST_DIR"))
}

/// Config pointing every endpoint at the mock server, with live updates off.
fn write_mock_config(server: &MockServer, name: &str) -> PathBuf {
    let yaml = format!(
        "live:\n  enabled: false\nhttp:\n  base_url: {}/\nrefresh_interval_secs: 0\n",
        server.uri()
    );
    let path = std::env::temp_dir().join(format!("{}-{name}.yaml", std::process::id()));
    std::fs::write(&path, yaml).expect("write temp config");
    path
}

#[test]
fn cli_mode_with_config_and_dry_run_works() {
    let output = Command::new(BINARY)
        .arg("--config")
        .arg(demo_config("dashboard.yaml"))
        .arg("--dry-run")
        .env("RUST_LOG", "error")
        .output()
        .expect("Failed to start supplychain-live-dashboard binary");

    assert!(
        output.status.success(),
        "Process exited with non-zero status: {}\nStdout: {}\nStderr: {}",
        output.status,
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
}

#[test]
fn dry_run_rejects_invalid_config() {
    let output = Command::new(BINARY)
        .arg("--config")
        .arg(demo_config("invalid_live_url.yaml"))
        .arg("--dry-run")
        .output()
        .expect("Failed to start supplychain-live-dashboard binary");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("validate config"), "stderr: {stderr}");
}

#[test]
fn missing_config_file_fails() {
    let output = Command::new(BINARY)
        .arg("--config")
        .arg(demo_config("does_not_exist.yaml"))
        .arg("--dry-run")
        .output()
        .expect("Failed to start supplychain-live-dashboard binary");

    assert!(!output.status.success());
}

#[tokio::test]
async fn search_subcommand_prints_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products/"))
        .and(query_param("search", "bolt"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<tr>BOLT-M8</tr>"))
        .expect(1)
        .mount(&server)
        .await;
    let config = write_mock_config(&server, "search");

    let output = tokio::process::Command::new(BINARY)
        .arg("--config")
        .arg(&config)
        .arg("--log-level")
        .arg("error")
        .args(["search", "--target", "products", "--query", "bolt"])
        .output()
        .await
        .expect("Failed to start supplychain-live-dashboard binary");
    let _ = std::fs::remove_file(&config);

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("<tr>BOLT-M8</tr>"), "stdout: {stdout}");
}

#[tokio::test]
async fn tracking_subcommand_surfaces_api_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/orders/42/tracking/"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_raw(r#"{"error": "Order not found"}"#, "application/json"),
        )
        .expect(1)
        .mount(&server)
        .await;
    let config = write_mock_config(&server, "tracking");

    let output = tokio::process::Command::new(BINARY)
        .arg("--config")
        .arg(&config)
        .args(["tracking", "--order", "42"])
        .output()
        .await
        .expect("Failed to start supplychain-live-dashboard binary");
    let _ = std::fs::remove_file(&config);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Order not found"), "stderr: {stderr}");
}

#[tokio::test]
async fn watch_exits_when_nothing_is_enabled() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/dashboard/stats/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(r#"{"total_orders": 3, "pending_orders": 1}"#, "application/json"),
        )
        .expect(1)
        .mount(&server)
        .await;
    let config = write_mock_config(&server, "watch");

    let output = tokio::process::Command::new(BINARY)
        .arg("--config")
        .arg(&config)
        .arg("--log-level")
        .arg("error")
        .arg("watch")
        .output()
        .await
        .expect("Failed to start supplychain-live-dashboard binary");
    let _ = std::fs::remove_file(&config);

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("orders=3 pending=1"), "stdout: {stdout}");
}

#[tokio::test]
async fn filter_subcommand_debounces_stdin() {
    use std::process::Stdio;
    use tokio::io::AsyncWriteExt;

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/inventory/"))
        .and(query_param("stock_status", "low_stock"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<tr>BOLT-M8 low</tr>"))
        .expect(1)
        .mount(&server)
        .await;
    let config = write_mock_config(&server, "filter");

    let mut child = tokio::process::Command::new(BINARY)
        .arg("--config")
        .arg(&config)
        .arg("--log-level")
        .arg("error")
        .args(["filter", "--target", "inventory", "--debounce-ms", "100"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to start supplychain-live-dashboard binary");

    let mut stdin = child.stdin.take().expect("child stdin");
    stdin
        .write_all(b"low\nlow_st\nlow_stock\n")
        .await
        .expect("write stdin");
    drop(stdin);

    let output = child.wait_with_output().await.expect("wait for binary");
    let _ = std::fs::remove_file(&config);

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("<tr>BOLT-M8 low</tr>"), "stdout: {stdout}");
}
