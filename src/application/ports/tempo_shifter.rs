use async_trait::async_trait;

use crate::domain::StagedAudio;

/// Re-times an audio artifact by a multiplicative tempo factor without
/// altering pitch, writing a new staged file. The input artifact is left in
/// place; cleanup belongs to the caller.
#[async_trait]
pub trait TempoShifter: Send + Sync {
    async fn shift(
        &self,
        input: &StagedAudio,
        factor: f64,
    ) -> Result<StagedAudio, TempoShiftError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TempoShiftError {
    #[error("transcoder could not be invoked: {0}")]
    InvocationFailed(String),
    #[error("transcoder failed: {0}")]
    ProcessFailed(String),
}
