mod job;
mod job_id;
mod job_status;
mod staged_audio;
mod staging_token;

pub use job::Job;
pub use job_id::JobId;
pub use job_status::JobStatus;
pub use staged_audio::StagedAudio;
pub use staging_token::StagingToken;
