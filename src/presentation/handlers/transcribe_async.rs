use std::time::Instant;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};

use crate::application::ports::{AudioFetcher, TempoShifter};
use crate::application::services::TranscriptionJobMessage;
use crate::domain::Job;
use crate::presentation::state::AppState;

#[derive(Deserialize)]
pub struct AsyncAudioRequestBody {
    pub audio_url: String,
    pub webhook_url: String,
}

#[derive(Serialize)]
pub struct AcceptedResponse {
    pub status: String,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Fire-and-forget transcription: acknowledges acceptance immediately and
/// hands the job to the background worker. The terminal result goes to the
/// caller's webhook, never to this connection.
#[tracing::instrument(skip_all)]
pub async fn transcribe_async_handler<F, S>(
    State(state): State<AppState<F, S>>,
    Json(body): Json<AsyncAudioRequestBody>,
) -> impl IntoResponse
where
    F: AudioFetcher + 'static,
    S: TempoShifter + 'static,
{
    let job = Job::new(body.audio_url, body.webhook_url);
    let job_id = job.id;

    let msg = TranscriptionJobMessage {
        job,
        accepted_at: Instant::now(),
    };

    if let Err(e) = state.job_sender.send(msg).await {
        tracing::error!(error = %e, "Failed to enqueue transcription job");
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ErrorResponse {
                error: "transcription worker unavailable".to_string(),
            }),
        )
            .into_response();
    }

    tracing::info!(job_id = %job_id.as_uuid(), "Transcription job enqueued");

    (
        StatusCode::ACCEPTED,
        Json(AcceptedResponse {
            status: "processing".to_string(),
        }),
    )
        .into_response()
}
