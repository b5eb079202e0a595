use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;

use transcribe_uploader::controller::SubmitOutcome;
use transcribe_uploader::{
    ConfigBuilder, HttpTranscriptionClient, SelectedFile, TerminalView, TranscriptionBackend,
    UploadController, UploadError,
};

#[derive(Debug, Clone)]
struct ReceivedPart {
    field: String,
    file_name: String,
    content_type: String,
    data: Vec<u8>,
}

type Received = Arc<Mutex<Vec<ReceivedPart>>>;

async fn spawn_server(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

async fn transcribe_handler(
    State(received): State<Received>,
    mut multipart: Multipart,
) -> Json<serde_json::Value> {
    let mut results = Vec::new();

    while let Some(field) = multipart.next_field().await.unwrap() {
        let field_name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().unwrap_or_default().to_string();
        let data = field.bytes().await.unwrap().to_vec();

        let stem = file_name.rsplit_once('.').map(|(s, _)| s).unwrap_or(&file_name).to_string();
        if data.is_empty() {
            results.push(json!({
                "status": "error",
                "filename": file_name,
                "message": "Failed to extract audio from video"
            }));
        } else {
            results.push(json!({
                "status": "success",
                "filename": file_name,
                "language": "en",
                "transcript": "Today we drill the guard pass",
                "with_timestamps": format!("{}_with_timestamps.txt", stem),
                "without_timestamps": format!("{}_transcript.txt", stem),
                "srt_file": format!("{}.srt", stem),
            }));
        }

        received.lock().unwrap().push(ReceivedPart {
            field: field_name,
            file_name,
            content_type,
            data,
        });
    }

    Json(json!({ "results": results }))
}

async fn mock_server() -> (String, Received) {
    let received: Received = Arc::new(Mutex::new(Vec::new()));
    let app = Router::new()
        .route("/transcribe", post(transcribe_handler))
        .route(
            "/download/:id",
            get(|Path(id): Path<String>| async move {
                if id.starts_with("missing") {
                    Err(StatusCode::NOT_FOUND)
                } else {
                    Ok(format!("contents of {}", id))
                }
            }),
        )
        .with_state(received.clone());

    (spawn_server(app).await, received)
}

#[tokio::test]
async fn test_upload_sends_every_file_under_shared_field() {
    let (base_url, received) = mock_server().await;
    let temp_dir = TempDir::new().unwrap();
    let on_disk = temp_dir.path().join("armbar.mkv");
    tokio::fs::write(&on_disk, b"matroska bytes").await.unwrap();

    let config = ConfigBuilder::new().with_server(base_url).build();
    let client = HttpTranscriptionClient::new(config.server).unwrap();

    let files = vec![
        SelectedFile::from_bytes("intro.mp4", "video/mp4", b"mp4 bytes".to_vec()),
        SelectedFile::from_path(&on_disk).await.unwrap(),
        SelectedFile::from_bytes("raw.flv", "", b"flv".to_vec()),
    ];

    let response = client.transcribe(&files).await.unwrap();
    assert_eq!(response.results.len(), 3);
    assert_eq!(response.results[1].filename(), "armbar.mkv");
    assert_eq!(response.results[1].artifacts().len(), 3);

    let parts = received.lock().unwrap().clone();
    assert_eq!(parts.len(), 3);
    assert!(parts.iter().all(|p| p.field == "files[]"));
    assert_eq!(parts[0].file_name, "intro.mp4");
    assert_eq!(parts[0].content_type, "video/mp4");
    assert_eq!(parts[1].content_type, "video/x-matroska");
    assert_eq!(parts[1].data, b"matroska bytes");
    assert_eq!(parts[2].content_type, "application/octet-stream");
}

#[tokio::test]
async fn test_server_error_status_is_a_failure() {
    let app = Router::new().route(
        "/transcribe",
        post(|| async { (StatusCode::BAD_REQUEST, Json(json!({ "error": "No files uploaded" }))) }),
    );
    let base_url = spawn_server(app).await;

    let config = ConfigBuilder::new().with_server(base_url).build();
    let client = HttpTranscriptionClient::new(config.server).unwrap();

    let err = client
        .transcribe(&[SelectedFile::from_bytes("a.mp4", "video/mp4", vec![1])])
        .await
        .unwrap_err();
    assert!(matches!(err, UploadError::TranscriptionFailed { status: 400 }));
}

#[tokio::test]
async fn test_malformed_body_is_a_decode_error() {
    let app = Router::new().route("/transcribe", post(|| async { "<html>oops</html>" }));
    let base_url = spawn_server(app).await;

    let config = ConfigBuilder::new().with_server(base_url).build();
    let client = HttpTranscriptionClient::new(config.server).unwrap();

    let err = client
        .transcribe(&[SelectedFile::from_bytes("a.mp4", "video/mp4", vec![1])])
        .await
        .unwrap_err();
    assert!(matches!(err, UploadError::Decode(_)));
}

#[tokio::test]
async fn test_download_writes_artifact() {
    let (base_url, _) = mock_server().await;
    let temp_dir = TempDir::new().unwrap();
    let dest_dir = temp_dir.path().join("transcripts");

    let config = ConfigBuilder::new().with_server(base_url).build();
    let client = HttpTranscriptionClient::new(config.server).unwrap();

    let path = client.download("my talk.srt", &dest_dir).await.unwrap();
    assert_eq!(path, dest_dir.join("my talk.srt"));
    let contents = tokio::fs::read_to_string(&path).await.unwrap();
    assert_eq!(contents, "contents of my talk.srt");

    let err = client.download("missing.txt", &dest_dir).await.unwrap_err();
    assert!(matches!(err, UploadError::DownloadFailed { status: 404, .. }));
}

#[tokio::test]
async fn test_controller_end_to_end() {
    let (base_url, received) = mock_server().await;

    let config = ConfigBuilder::new()
        .with_server(base_url)
        .with_completion_delay(Duration::from_millis(10))
        .build();
    let client = HttpTranscriptionClient::new(config.server.clone()).unwrap();
    let mut controller = UploadController::new(&config, client, TerminalView::new());

    controller.add_files(vec![
        SelectedFile::from_bytes("sweep.webm", "video/webm", b"webm".to_vec()),
        SelectedFile::from_bytes("readme.txt", "text/plain", b"skip me".to_vec()),
        SelectedFile::from_bytes("empty.mp4", "video/mp4", Vec::new()),
    ]);

    let outcome = controller.submit().await.unwrap();
    assert_eq!(outcome, SubmitOutcome::Completed { results: 2 });
    assert_eq!(received.lock().unwrap().len(), 2);
    assert!(controller.selection().is_empty());

    let view = controller.results_view();
    assert_eq!(view.entries[0].links().len(), 3);
    assert!(view.entries[1].links().is_empty());
}
