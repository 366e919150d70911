use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};

use crate::application::ports::{AudioFetcher, TempoShifter};
use crate::presentation::state::AppState;

#[derive(Deserialize)]
pub struct AudioRequestBody {
    pub audio_url: String,
}

#[derive(Serialize)]
pub struct TranscriptionResponse {
    pub transcription: String,
    pub processing_time: f64,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Synchronous transcription: the caller's connection stays open for the full
/// duration of all three pipeline stages.
#[tracing::instrument(skip_all)]
pub async fn transcribe_handler<F, S>(
    State(state): State<AppState<F, S>>,
    Json(body): Json<AudioRequestBody>,
) -> impl IntoResponse
where
    F: AudioFetcher + 'static,
    S: TempoShifter + 'static,
{
    match state.pipeline.run(&body.audio_url).await {
        Ok(output) => (
            StatusCode::OK,
            Json(TranscriptionResponse {
                transcription: output.transcript,
                processing_time: output.elapsed_seconds,
            }),
        )
            .into_response(),
        Err(e) => {
            let status = if e.is_client_fault() {
                StatusCode::BAD_REQUEST
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            };
            tracing::warn!(error = %e, "Synchronous transcription failed");
            (
                status,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}
