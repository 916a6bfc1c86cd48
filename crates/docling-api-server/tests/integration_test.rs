//! Integration tests for the conversion API server
//!
//! These tests start the server, send real requests against localhost, and
//! verify the response contracts end to end, including the queue worker.

use docling_api_server::{queue, ApiState, QueueConfig};
use std::io::Write;
use std::time::Duration;
use tokio::time::sleep;

fn test_state(dir: &tempfile::TempDir) -> ApiState {
    let config = QueueConfig::new(
        dir.path().join("document_queue"),
        dir.path().join("document_processed"),
    )
    .with_scan_interval(Duration::from_millis(100));
    config.ensure_dirs().expect("Failed to create queue dirs");
    ApiState::with_config(config)
}

async fn start_test_server(addr: &'static str, state: ApiState) -> tokio::task::JoinHandle<()> {
    let handle = tokio::spawn(async move {
        docling_api_server::start_server(addr, state)
            .await
            .expect("Failed to start server");
    });
    sleep(Duration::from_millis(300)).await;
    handle
}

#[tokio::test]
async fn test_health_endpoint() {
    let dir = tempfile::tempdir().unwrap();
    let server_handle = start_test_server("127.0.0.1:18200", test_state(&dir)).await;

    let client = reqwest::Client::new();
    let response = client
        .get("http://127.0.0.1:18200/health")
        .send()
        .await
        .expect("Failed to send health check request");

    assert_eq!(response.status(), 200);

    let json: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());

    server_handle.abort();
}

#[tokio::test]
async fn test_convert_local_file_markdown() {
    let dir = tempfile::tempdir().unwrap();
    let server_handle = start_test_server("127.0.0.1:18201", test_state(&dir)).await;

    let mut file = tempfile::Builder::new().suffix(".html").tempfile().unwrap();
    file.write_all(b"<h1>Report</h1><p>Body text.</p>").unwrap();

    let client = reqwest::Client::new();
    let response = client
        .post("http://127.0.0.1:18201/convert")
        .query(&[("url", file.path().to_str().unwrap())])
        .send()
        .await
        .expect("Failed to send convert request");

    assert_eq!(response.status(), 200);

    let json: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(json["content"], "# Report\n\nBody text.\n");

    server_handle.abort();
}

#[tokio::test]
async fn test_convert_local_file_json_output() {
    let dir = tempfile::tempdir().unwrap();
    let server_handle = start_test_server("127.0.0.1:18202", test_state(&dir)).await;

    let mut file = tempfile::Builder::new().suffix(".md").tempfile().unwrap();
    file.write_all(b"# Title\n\nSome text.\n").unwrap();

    let client = reqwest::Client::new();
    let response = client
        .post("http://127.0.0.1:18202/convert")
        .query(&[
            ("url", file.path().to_str().unwrap()),
            ("output_format", "json"),
        ])
        .send()
        .await
        .expect("Failed to send convert request");

    assert_eq!(response.status(), 200);

    let json: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    let content = &json["content"];
    assert_eq!(content["format"], "MD");
    assert_eq!(content["metadata"]["title"], "Title");
    assert!(content["markdown"].as_str().unwrap().starts_with("# Title"));

    server_handle.abort();
}

#[tokio::test]
async fn test_convert_output_format_query_is_case_insensitive() {
    let dir = tempfile::tempdir().unwrap();
    let server_handle = start_test_server("127.0.0.1:18207", test_state(&dir)).await;

    let mut file = tempfile::Builder::new().suffix(".md").tempfile().unwrap();
    file.write_all(b"# Title\n").unwrap();

    let client = reqwest::Client::new();
    let response = client
        .post("http://127.0.0.1:18207/convert")
        .query(&[
            ("url", file.path().to_str().unwrap()),
            ("output_format", "JSON"),
        ])
        .send()
        .await
        .expect("Failed to send convert request");

    assert_eq!(response.status(), 200);

    let json: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(json["content"]["format"], "MD");

    server_handle.abort();
}

#[tokio::test]
async fn test_convert_missing_file_returns_500_error_body() {
    let dir = tempfile::tempdir().unwrap();
    let server_handle = start_test_server("127.0.0.1:18203", test_state(&dir)).await;

    let client = reqwest::Client::new();
    let response = client
        .post("http://127.0.0.1:18203/convert")
        .query(&[("url", "/nonexistent/file.html")])
        .send()
        .await
        .expect("Failed to send convert request");

    assert_eq!(response.status(), 500);

    let json: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert!(json["error"].as_str().unwrap().contains("does not exist"));

    server_handle.abort();
}

#[tokio::test]
async fn test_convert_unknown_format_returns_500_error_body() {
    let dir = tempfile::tempdir().unwrap();
    let server_handle = start_test_server("127.0.0.1:18204", test_state(&dir)).await;

    let mut file = tempfile::Builder::new().suffix(".xyz").tempfile().unwrap();
    file.write_all(b"data").unwrap();

    let client = reqwest::Client::new();
    let response = client
        .post("http://127.0.0.1:18204/convert")
        .query(&[("url", file.path().to_str().unwrap())])
        .send()
        .await
        .expect("Failed to send convert request");

    assert_eq!(response.status(), 500);

    let json: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert!(json["error"].as_str().unwrap().contains("Cannot detect format"));

    server_handle.abort();
}

#[tokio::test]
async fn test_queue_submission_processed_by_worker() {
    let dir = tempfile::tempdir().unwrap();
    let state = test_state(&dir);
    let processed_dir = state.config.processed_dir.clone();
    queue::spawn_worker(state.clone());
    let server_handle = start_test_server("127.0.0.1:18205", state).await;

    let mut file = tempfile::Builder::new().suffix(".html").tempfile().unwrap();
    file.write_all(b"<h2>Queued</h2>").unwrap();

    let client = reqwest::Client::new();
    let response = client
        .post("http://127.0.0.1:18205/queue")
        .query(&[("url", file.path().to_str().unwrap())])
        .send()
        .await
        .expect("Failed to send queue request");

    assert_eq!(response.status(), 202);

    let json: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(json["status"], "queued");
    let job_id = json["job_id"].as_str().unwrap().to_string();

    // Poll job status until completed or timeout
    let mut completed = false;
    for _attempt in 0..50 {
        sleep(Duration::from_millis(100)).await;

        let status_resp = client
            .get(format!("http://127.0.0.1:18205/queue/{job_id}"))
            .send()
            .await
            .expect("Failed to get job status");
        assert_eq!(status_resp.status(), 200);

        let status_json: serde_json::Value =
            status_resp.json().await.expect("Failed to parse status JSON");
        if status_json["status"] == "completed" {
            completed = true;
            assert!(status_json["output_path"].is_string());
            break;
        } else if status_json["status"] == "failed" {
            panic!("Queue job failed: {status_json:?}");
        }
    }

    assert!(completed, "Queue job did not complete within timeout");

    // Output landed in the processed directory
    let outputs: Vec<_> = std::fs::read_dir(&processed_dir)
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect();
    assert_eq!(outputs.len(), 1);
    assert_eq!(
        std::fs::read_to_string(&outputs[0]).unwrap(),
        "## Queued\n"
    );

    server_handle.abort();
}

#[tokio::test]
async fn test_job_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let server_handle = start_test_server("127.0.0.1:18206", test_state(&dir)).await;

    let client = reqwest::Client::new();
    let response = client
        .get("http://127.0.0.1:18206/queue/00000000-0000-0000-0000-000000000000")
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);

    let json: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert!(json["error"].as_str().unwrap().contains("Job not found"));

    server_handle.abort();
}
