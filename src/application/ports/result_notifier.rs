use async_trait::async_trait;
use serde::Serialize;

/// Terminal result of an asynchronous job, in the exact wire shape delivered
/// to the callback address.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum JobOutcome {
    Success {
        transcription: String,
        processing_time: f64,
    },
    Error {
        error: String,
    },
}

/// Delivers a job's terminal result out-of-band. Best-effort: callers make
/// exactly one delivery attempt and never retry.
#[async_trait]
pub trait ResultNotifier: Send + Sync {
    async fn deliver(&self, callback_url: &str, outcome: &JobOutcome) -> Result<(), NotifyError>;
}

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("callback request failed: {0}")]
    RequestFailed(String),
    #[error("callback rejected with status {0}")]
    RejectedStatus(u16),
}
