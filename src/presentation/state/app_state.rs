use std::sync::Arc;

use tokio::sync::mpsc;

use crate::application::ports::{AudioFetcher, TempoShifter};
use crate::application::services::{TranscriptionJobMessage, TranscriptionPipeline};

pub struct AppState<F, S>
where
    F: AudioFetcher,
    S: TempoShifter,
{
    pub pipeline: Arc<TranscriptionPipeline<F, S>>,
    pub job_sender: mpsc::Sender<TranscriptionJobMessage>,
}

impl<F, S> Clone for AppState<F, S>
where
    F: AudioFetcher,
    S: TempoShifter,
{
    fn clone(&self) -> Self {
        Self {
            pipeline: Arc::clone(&self.pipeline),
            job_sender: self.job_sender.clone(),
        }
    }
}
