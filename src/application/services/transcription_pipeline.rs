use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use crate::application::ports::{
    AudioFetcher, FetchError, TempoShiftError, TempoShifter, TranscriptionEngine,
    TranscriptionError,
};

/// The end-to-end transcription pipeline: fetch the remote audio, slow it
/// down by the configured tempo factor, run speech recognition over the
/// result. Stages run strictly in sequence; each stage's output is required
/// input to the next. The first failing stage aborts the rest.
///
/// Both invocation modes (synchronous handler, background worker) go through
/// `run`, so pipeline behavior is identical regardless of how a job arrives.
pub struct TranscriptionPipeline<F, S>
where
    F: AudioFetcher,
    S: TempoShifter,
{
    fetcher: Arc<F>,
    tempo_shifter: Arc<S>,
    engine: Arc<dyn TranscriptionEngine>,
    tempo_factor: f64,
}

/// Successful pipeline outcome. `elapsed_seconds` spans pipeline entry to
/// transcript availability, covering all three stages.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub transcript: String,
    pub elapsed_seconds: f64,
}

impl<F, S> TranscriptionPipeline<F, S>
where
    F: AudioFetcher,
    S: TempoShifter,
{
    pub fn new(
        fetcher: Arc<F>,
        tempo_shifter: Arc<S>,
        engine: Arc<dyn TranscriptionEngine>,
        tempo_factor: f64,
    ) -> Self {
        Self {
            fetcher,
            tempo_shifter,
            engine,
            tempo_factor,
        }
    }

    pub async fn run(&self, source_url: &str) -> Result<PipelineOutput, PipelineError> {
        let started = Instant::now();

        let mut staged: Vec<PathBuf> = Vec::with_capacity(2);
        let result = self.execute(source_url, &mut staged).await;

        // Advisory cleanup: staged artifacts end their life with the job,
        // success or not. A leftover file is never an error.
        for path in staged {
            if let Err(e) = tokio::fs::remove_file(&path).await {
                tracing::warn!(
                    error = %e,
                    path = %path.display(),
                    "Failed to remove staged audio artifact"
                );
            }
        }

        let transcript = result?;
        let elapsed_seconds = started.elapsed().as_secs_f64();

        tracing::info!(
            chars = transcript.len(),
            elapsed_seconds,
            "Transcription pipeline completed"
        );

        Ok(PipelineOutput {
            transcript,
            elapsed_seconds,
        })
    }

    async fn execute(
        &self,
        source_url: &str,
        staged: &mut Vec<PathBuf>,
    ) -> Result<String, PipelineError> {
        let fetched = self.fetcher.fetch(source_url).await?;
        staged.push(fetched.path().to_path_buf());
        tracing::debug!(path = %fetched.path().display(), "Audio fetched and staged");

        let slowed = self.tempo_shifter.shift(&fetched, self.tempo_factor).await?;
        staged.push(slowed.path().to_path_buf());
        tracing::debug!(
            factor = self.tempo_factor,
            path = %slowed.path().display(),
            "Audio tempo shifted"
        );

        let transcript = self.engine.transcribe(&slowed).await?;

        Ok(transcript)
    }
}

/// A pipeline failure is always attributable to exactly one stage.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("{0}")]
    Fetch(#[from] FetchError),
    #[error("tempo shift: {0}")]
    TempoShift(#[from] TempoShiftError),
    #[error("transcription: {0}")]
    Transcription(#[from] TranscriptionError),
}

impl PipelineError {
    /// Fetch failures are the caller's fault (bad or unreachable URL); the
    /// later stages failing is on us.
    pub fn is_client_fault(&self) -> bool {
        matches!(self, PipelineError::Fetch(_))
    }
}
