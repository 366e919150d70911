use async_trait::async_trait;

use crate::domain::StagedAudio;

/// Retrieves a remote audio resource and stages it locally.
///
/// A single retrieval attempt is definitive; implementations must not retry.
#[async_trait]
pub trait AudioFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<StagedAudio, FetchError>;
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("failed to download audio: {0}")]
    DownloadFailed(String),
    #[error("url does not point to an audio file: {0}")]
    UnsupportedMedia(String),
    #[error("failed to stage audio: {0}")]
    StagingFailed(String),
}
