use async_trait::async_trait;

use crate::domain::StagedAudio;

#[async_trait]
pub trait TranscriptionEngine: Send + Sync {
    /// Runs speech recognition over a staged artifact and returns the
    /// recognized text with surrounding whitespace trimmed.
    async fn transcribe(&self, audio: &StagedAudio) -> Result<String, TranscriptionError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TranscriptionError {
    #[error("audio decoding failed: {0}")]
    DecodingFailed(String),
    #[error("transcription failed: {0}")]
    TranscriptionFailed(String),
    #[error("model loading failed: {0}")]
    ModelLoadFailed(String),
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
}
