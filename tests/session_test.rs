//! CLIワークフローの結合テスト
//!
//! ループバックのスタブサーバを解析エンドポイントとして使う

use std::path::{Path, PathBuf};

use interior_style::client::UploadClient;
use interior_style::error::InteriorStyleError;
use interior_style::session::{run_analyze, SessionOptions};
use interior_style_common::{ResultView, WorkflowState};
use tempfile::{tempdir, TempDir};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

const BOHEMIAN: &str = r##"{"style_title":"Bohemian","style_description":"Eclectic mix","colors":[{"hex":"#A52A2A","name":"Brown"},{"hex":"#DEB887","name":"Tan"}]}"##;

fn options() -> SessionOptions {
    SessionOptions {
        assume_yes: true,
        progress: false,
        ..Default::default()
    }
}

/// 1リクエストだけ受けて固定レスポンスを返すスタブ。受信したリクエストを返す
async fn spawn_stub(status: u16, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let request = read_request(&mut socket).await;

        let response = format!(
            "HTTP/1.1 {} Stub\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
        request
    });

    (format!("http://{}", addr), handle)
}

async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
    let mut buffer = Vec::new();
    let mut chunk = [0u8; 4096];

    loop {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buffer.extend_from_slice(&chunk[..n]);

        let Some(header_end) = find(&buffer, b"\r\n\r\n") else {
            continue;
        };
        let headers = String::from_utf8_lossy(&buffer[..header_end]).to_ascii_lowercase();
        let content_length = headers
            .lines()
            .find_map(|line| line.strip_prefix("content-length:"))
            .and_then(|v| v.trim().parse::<usize>().ok())
            .unwrap_or(0);
        if buffer.len() >= header_end + 4 + content_length {
            break;
        }
    }

    String::from_utf8_lossy(&buffer).to_string()
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

fn write_png(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    image::RgbImage::new(8, 6).save(&path).unwrap();
    path
}

fn fixture() -> (TempDir, PathBuf) {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = write_png(dir.path(), "room.png");
    (dir, path)
}

#[tokio::test]
async fn test_success_renders_palette_in_order() {
    let (_dir, image) = fixture();
    let (endpoint, server) = spawn_stub(200, BOHEMIAN).await;
    let client = UploadClient::new(&endpoint, 10).unwrap();

    let report = run_analyze(&[image], &client, &options()).await.unwrap();

    assert_eq!(report.state, WorkflowState::ResultShown);
    assert_eq!(report.preview_size, Some((8, 6)));
    assert!(report.alerts.is_empty());
    match report.result {
        Some(ResultView::Style { title, description, palette }) => {
            assert_eq!(title, "Bohemian");
            assert_eq!(description, "Eclectic mix");
            let names: Vec<&str> = palette.iter().map(|p| p.name.as_str()).collect();
            assert_eq!(names, vec!["Brown", "Tan"]);
        }
        other => panic!("unexpected result: {:?}", other),
    }

    let request = server.await.unwrap();
    assert!(request.starts_with("POST /upload "));
    assert!(request.contains("name=\"file\""));
    assert!(request.contains("filename=\"room.png\""));
    assert!(request.to_ascii_lowercase().contains("content-type: image/png"));
}

#[tokio::test]
async fn test_http_500_is_error_shown() {
    let (_dir, image) = fixture();
    let (endpoint, server) = spawn_stub(500, r#"{"detail":"Error processing image"}"#).await;
    let client = UploadClient::new(&endpoint, 10).unwrap();

    let report = run_analyze(&[image], &client, &options()).await.unwrap();
    server.await.unwrap();

    assert_eq!(report.state, WorkflowState::ErrorShown);
    assert!(report.result.is_none());
    assert_eq!(report.alerts.len(), 1);
    assert!(report.alerts[0].contains("500"));
    assert!(report.alerts[0].contains("Error processing image"));

    let err = report.into_result().unwrap_err();
    assert!(matches!(err, InteriorStyleError::AnalysisFailed(_)));
}

#[tokio::test]
async fn test_error_payload_is_inline() {
    let (_dir, image) = fixture();
    let (endpoint, server) = spawn_stub(
        200,
        r#"{"style_title":"Error: too dark","style_description":"Image too dark to analyze"}"#,
    )
    .await;
    let client = UploadClient::new(&endpoint, 10).unwrap();

    let report = run_analyze(&[image], &client, &options()).await.unwrap();
    server.await.unwrap();

    assert_eq!(report.state, WorkflowState::ErrorShown);
    assert!(report.alerts.is_empty());
    assert_eq!(
        report.result,
        Some(ResultView::ErrorMessage("Image too dark to analyze".to_string()))
    );
}

#[tokio::test]
async fn test_colors_omitted() {
    let (_dir, image) = fixture();
    let (endpoint, server) = spawn_stub(
        200,
        r#"{"success":true,"style_title":"Minimal","style_description":"Clean","filename":"x.png"}"#,
    )
    .await;
    let client = UploadClient::new(&endpoint, 10).unwrap();

    let report = run_analyze(&[image], &client, &options()).await.unwrap();
    server.await.unwrap();

    assert_eq!(report.state, WorkflowState::ResultShown);
    let result = report.result.expect("result should be shown");
    assert!(result.palette().is_empty());
    assert_eq!(
        report.analysis.and_then(|a| a.filename),
        Some("x.png".to_string())
    );
}

#[tokio::test]
async fn test_non_image_never_submits() {
    let dir = tempdir().unwrap();
    let notes = dir.path().join("notes.txt");
    std::fs::write(&notes, "not an image").unwrap();

    // 到達しないアドレス。送信されればテストが失敗する
    let client = UploadClient::new("http://127.0.0.1:9", 1).unwrap();
    let report = run_analyze(&[notes], &client, &options()).await.unwrap();

    assert_eq!(report.state, WorkflowState::Idle);
    assert!(!report.submitted);
    assert_eq!(report.alerts, vec!["Please select an image file".to_string()]);

    let err = report.into_result().unwrap_err();
    assert!(matches!(err, InteriorStyleError::Rejected(_)));
}

#[tokio::test]
async fn test_only_first_file_is_used() {
    let dir = tempdir().unwrap();
    let first = write_png(dir.path(), "first.png");
    let second = write_png(dir.path(), "second.png");
    let (endpoint, server) = spawn_stub(200, BOHEMIAN).await;
    let client = UploadClient::new(&endpoint, 10).unwrap();

    run_analyze(&[first, second], &client, &options()).await.unwrap();

    let request = server.await.unwrap();
    assert!(request.contains("filename=\"first.png\""));
    assert!(!request.contains("second.png"));
}

#[tokio::test]
async fn test_transport_failure_is_error_shown() {
    let (_dir, image) = fixture();

    // 一度バインドして閉じたポートには接続できない
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = UploadClient::new(&format!("http://{}", addr), 5).unwrap();
    let report = run_analyze(&[image], &client, &options()).await.unwrap();

    assert!(report.submitted);
    assert_eq!(report.state, WorkflowState::ErrorShown);
    assert_eq!(report.alerts.len(), 1);
    assert!(report.alerts[0].starts_with("Error: "));
}

#[tokio::test]
async fn test_missing_file() {
    let client = UploadClient::new("http://127.0.0.1:9", 1).unwrap();
    let err = run_analyze(&[PathBuf::from("/nonexistent/room.jpg")], &client, &options())
        .await
        .unwrap_err();
    assert!(matches!(err, InteriorStyleError::FileNotFound(_)));
}

#[tokio::test]
async fn test_missing_trailing_path_is_ignored() {
    let (_dir, image) = fixture();
    let (endpoint, server) = spawn_stub(200, BOHEMIAN).await;
    let client = UploadClient::new(&endpoint, 10).unwrap();

    let paths = [image, PathBuf::from("/nonexistent/ignored.jpg")];
    let report = run_analyze(&paths, &client, &options()).await.unwrap();

    assert_eq!(report.state, WorkflowState::ResultShown);
    let request = server.await.unwrap();
    assert!(request.contains("filename=\"room.png\""));
}

/// --json の標準出力はJSONだけになる
#[tokio::test]
async fn test_json_output_is_parseable() {
    let (dir, image) = fixture();
    let (endpoint, server) = spawn_stub(200, BOHEMIAN).await;

    let output = tokio::process::Command::new(env!("CARGO_BIN_EXE_interior-style"))
        .arg("analyze")
        .arg(&image)
        .args(["--json", "-y", "--endpoint", &endpoint])
        .env("XDG_CONFIG_HOME", dir.path())
        .env("HOME", dir.path())
        .env_remove("INTERIOR_STYLE_ENDPOINT")
        .env_remove("RUST_LOG")
        .output()
        .await
        .expect("failed to run binary");
    server.await.unwrap();

    assert!(output.status.success());
    let json: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be a JSON document");
    assert_eq!(json["style_title"], "Bohemian");
    assert_eq!(json["colors"][1]["name"], "Tan");

    // 進捗は標準エラーに出る
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("プレビュー"));
}
