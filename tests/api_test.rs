use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tokio::sync::mpsc;
use tower::ServiceExt;
use uuid::Uuid;

use klaksvik::application::ports::{
    AudioFetcher, FetchError, TempoShiftError, TempoShifter, TranscriptionEngine,
    TranscriptionError,
};
use klaksvik::application::services::{TranscriptionJobMessage, TranscriptionPipeline};
use klaksvik::domain::{JobStatus, StagedAudio};
use klaksvik::presentation::{AppState, create_router};

const TEST_TEMPO_FACTOR: f64 = 0.8;

fn scratch_artifact(label: &str) -> StagedAudio {
    let path: PathBuf =
        std::env::temp_dir().join(format!("klaksvik_api_test_{}_{}.ogg", label, Uuid::new_v4()));
    StagedAudio::new(path, "ogg")
}

struct MockFetcher;

#[async_trait]
impl AudioFetcher for MockFetcher {
    async fn fetch(&self, _url: &str) -> Result<StagedAudio, FetchError> {
        Ok(scratch_artifact("fetched"))
    }
}

struct DownloadFailingFetcher;

#[async_trait]
impl AudioFetcher for DownloadFailingFetcher {
    async fn fetch(&self, _url: &str) -> Result<StagedAudio, FetchError> {
        Err(FetchError::DownloadFailed("status 404 Not Found".to_string()))
    }
}

struct NonAudioFetcher;

#[async_trait]
impl AudioFetcher for NonAudioFetcher {
    async fn fetch(&self, _url: &str) -> Result<StagedAudio, FetchError> {
        Err(FetchError::UnsupportedMedia("text/html".to_string()))
    }
}

struct MockShifter;

#[async_trait]
impl TempoShifter for MockShifter {
    async fn shift(
        &self,
        _input: &StagedAudio,
        _factor: f64,
    ) -> Result<StagedAudio, TempoShiftError> {
        Ok(scratch_artifact("slowed"))
    }
}

struct MockEngine;

#[async_trait]
impl TranscriptionEngine for MockEngine {
    async fn transcribe(&self, _audio: &StagedAudio) -> Result<String, TranscriptionError> {
        Ok("hello world".to_string())
    }
}

struct FailingEngine;

#[async_trait]
impl TranscriptionEngine for FailingEngine {
    async fn transcribe(&self, _audio: &StagedAudio) -> Result<String, TranscriptionError> {
        Err(TranscriptionError::TranscriptionFailed(
            "model exploded".to_string(),
        ))
    }
}

fn create_test_app<F>(
    fetcher: F,
    engine: Arc<dyn TranscriptionEngine>,
) -> (
    axum::Router,
    mpsc::Receiver<TranscriptionJobMessage>,
)
where
    F: AudioFetcher + 'static,
{
    let pipeline = Arc::new(TranscriptionPipeline::new(
        Arc::new(fetcher),
        Arc::new(MockShifter),
        engine,
        TEST_TEMPO_FACTOR,
    ));

    let (job_sender, job_receiver) = mpsc::channel(8);

    let state = AppState {
        pipeline,
        job_sender,
    };

    (create_router(state), job_receiver)
}

async fn response_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn given_running_server_when_health_check_then_reports_up() {
    let (app, _rx) = create_test_app(MockFetcher, Arc::new(MockEngine));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    assert_eq!(json["status"], "up");
}

#[tokio::test]
async fn given_valid_source_when_sync_transcription_then_returns_transcript_and_time() {
    let (app, _rx) = create_test_app(MockFetcher, Arc::new(MockEngine));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/audio")
                .header("content-type", "application/json")
                .body(Body::from(
                    r#"{"audio_url": "http://example.com/speech.ogg"}"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    assert_eq!(json["transcription"], "hello world");
    assert!(json["processing_time"].as_f64().unwrap() >= 0.0);
}

#[tokio::test]
async fn given_unreachable_source_when_sync_transcription_then_returns_download_error() {
    let (app, _rx) = create_test_app(DownloadFailingFetcher, Arc::new(MockEngine));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/audio")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"audio_url": "http://example.com/missing"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = response_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("download"));
}

#[tokio::test]
async fn given_non_audio_source_when_sync_transcription_then_returns_unsupported_media_error() {
    let (app, _rx) = create_test_app(NonAudioFetcher, Arc::new(MockEngine));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/audio")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"audio_url": "http://example.com/page"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = response_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("audio file"));
}

#[tokio::test]
async fn given_failing_engine_when_sync_transcription_then_returns_server_error() {
    let (app, _rx) = create_test_app(MockFetcher, Arc::new(FailingEngine));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/audio")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"audio_url": "http://example.com/a.ogg"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = response_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("transcription"));
}

#[tokio::test]
async fn given_valid_async_request_when_submitting_then_acknowledges_and_enqueues_job() {
    let (app, mut rx) = create_test_app(MockFetcher, Arc::new(MockEngine));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/audio/async")
                .header("content-type", "application/json")
                .body(Body::from(
                    r#"{"audio_url": "http://example.com/speech.ogg", "webhook_url": "http://example.com/hook"}"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::ACCEPTED);
    let json = response_json(response).await;
    assert_eq!(json["status"], "processing");

    let msg = rx.recv().await.unwrap();
    assert_eq!(msg.job.source_url, "http://example.com/speech.ogg");
    assert_eq!(msg.job.callback_url, "http://example.com/hook");
    assert_eq!(msg.job.status, JobStatus::Accepted);
}

#[tokio::test]
async fn given_empty_body_when_sync_transcription_then_returns_bad_request() {
    let (app, _rx) = create_test_app(MockFetcher, Arc::new(MockEngine));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/audio")
                .header("content-type", "application/json")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn given_missing_webhook_url_when_async_transcription_then_rejects_request() {
    let (app, _rx) = create_test_app(MockFetcher, Arc::new(MockEngine));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/audio/async")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"audio_url": "http://example.com/a.ogg"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}
