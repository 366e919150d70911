mod transcription_pipeline;
mod transcription_worker;

pub use transcription_pipeline::{PipelineError, PipelineOutput, TranscriptionPipeline};
pub use transcription_worker::{TranscriptionJobMessage, TranscriptionWorker};
