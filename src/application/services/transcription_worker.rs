use std::sync::Arc;
use std::time::Instant;

use tokio::sync::mpsc;
use tracing::Instrument;

use crate::application::ports::{AudioFetcher, JobOutcome, ResultNotifier, TempoShifter};
use crate::application::services::TranscriptionPipeline;
use crate::domain::{Job, JobStatus};

/// Handed off at accept time. `accepted_at` anchors the reported
/// `processing_time`, which covers queue wait as well as the pipeline itself.
pub struct TranscriptionJobMessage {
    pub job: Job,
    pub accepted_at: Instant,
}

/// Drains the job channel and runs each accepted job on its own task, so jobs
/// proceed concurrently and complete in any order. Every job ends with exactly
/// one webhook delivery attempt, success or failure alike; a failed delivery
/// is logged and dropped.
pub struct TranscriptionWorker<F, S>
where
    F: AudioFetcher,
    S: TempoShifter,
{
    receiver: mpsc::Receiver<TranscriptionJobMessage>,
    pipeline: Arc<TranscriptionPipeline<F, S>>,
    notifier: Arc<dyn ResultNotifier>,
}

impl<F, S> TranscriptionWorker<F, S>
where
    F: AudioFetcher + 'static,
    S: TempoShifter + 'static,
{
    pub fn new(
        receiver: mpsc::Receiver<TranscriptionJobMessage>,
        pipeline: Arc<TranscriptionPipeline<F, S>>,
        notifier: Arc<dyn ResultNotifier>,
    ) -> Self {
        Self {
            receiver,
            pipeline,
            notifier,
        }
    }

    pub async fn run(mut self) {
        tracing::info!("Transcription worker started");
        while let Some(msg) = self.receiver.recv().await {
            let pipeline = Arc::clone(&self.pipeline);
            let notifier = Arc::clone(&self.notifier);

            let span = tracing::info_span!(
                "transcription_job",
                job_id = %msg.job.id.as_uuid(),
                source_url = %msg.job.source_url,
            );

            tokio::spawn(process_job(pipeline, notifier, msg).instrument(span));
        }
        tracing::info!("Transcription worker stopped: channel closed");
    }
}

async fn process_job<F, S>(
    pipeline: Arc<TranscriptionPipeline<F, S>>,
    notifier: Arc<dyn ResultNotifier>,
    msg: TranscriptionJobMessage,
) where
    F: AudioFetcher,
    S: TempoShifter,
{
    let mut job = msg.job;

    job.advance(JobStatus::Running);
    tracing::debug!(status = %job.status, "Job status transition");

    let outcome = match pipeline.run(&job.source_url).await {
        Ok(output) => {
            job.advance(JobStatus::Completed);
            JobOutcome::Success {
                transcription: output.transcript,
                processing_time: msg.accepted_at.elapsed().as_secs_f64(),
            }
        }
        Err(e) => {
            let message = e.to_string();
            tracing::error!(error = %message, "Transcription job failed");
            job.fail(message.clone());
            JobOutcome::Error { error: message }
        }
    };
    tracing::debug!(status = %job.status, "Job status transition");

    if let Err(e) = notifier.deliver(&job.callback_url, &outcome).await {
        // Fire-and-forget: the originating connection is long gone, so the
        // result is dropped here. One attempt, no retry.
        tracing::warn!(
            error = %e,
            callback_url = %job.callback_url,
            "Webhook delivery failed; job result dropped"
        );
    }
}
