use chrono::{DateTime, Utc};

use super::{JobId, JobStatus};

/// One asynchronous transcription job: the request data handed off at accept
/// time plus the job's lifecycle state. Dropped once the callback delivery
/// attempt has completed.
#[derive(Debug, Clone)]
pub struct Job {
    pub id: JobId,
    pub source_url: String,
    pub callback_url: String,
    pub status: JobStatus,
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Job {
    pub fn new(source_url: String, callback_url: String) -> Self {
        let now = Utc::now();
        Self {
            id: JobId::new(),
            source_url,
            callback_url,
            status: JobStatus::Accepted,
            error_message: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn advance(&mut self, status: JobStatus) {
        self.status = status;
        self.updated_at = Utc::now();
    }

    pub fn fail(&mut self, error_message: String) {
        self.error_message = Some(error_message);
        self.advance(JobStatus::Failed);
    }
}
