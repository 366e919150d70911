use std::process::Stdio;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::process::Command;

use crate::application::ports::{TempoShiftError, TempoShifter};
use crate::domain::{StagedAudio, StagingToken};
use crate::infrastructure::staging::StagingArea;

/// Changes audio tempo by shelling out to ffmpeg's `atempo` filter, which
/// re-times without pitch shifting. `-vn` drops any video stream so the
/// output is audio only.
pub struct FfmpegTempoShifter {
    staging: Arc<StagingArea>,
    binary: String,
}

impl FfmpegTempoShifter {
    pub fn new(staging: Arc<StagingArea>) -> Self {
        Self::with_binary(staging, "ffmpeg")
    }

    pub fn with_binary(staging: Arc<StagingArea>, binary: impl Into<String>) -> Self {
        Self {
            staging,
            binary: binary.into(),
        }
    }
}

#[async_trait]
impl TempoShifter for FfmpegTempoShifter {
    async fn shift(
        &self,
        input: &StagedAudio,
        factor: f64,
    ) -> Result<StagedAudio, TempoShiftError> {
        let token = StagingToken::mint();
        let output_path = self
            .staging
            .path_for("slow_audio", &token, input.media_subtype());

        let output = Command::new(&self.binary)
            .arg("-i")
            .arg(input.path())
            .arg("-filter:a")
            .arg(format!("atempo={}", factor))
            .arg("-vn")
            .arg(&output_path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| TempoShiftError::InvocationFailed(e.to_string()))?;

        if !output.status.success() {
            let diagnostics = String::from_utf8_lossy(&output.stderr);
            return Err(TempoShiftError::ProcessFailed(
                diagnostics.trim().to_string(),
            ));
        }

        tracing::debug!(
            factor,
            input = %input.path().display(),
            output = %output_path.display(),
            "ffmpeg tempo shift completed"
        );

        Ok(StagedAudio::new(output_path, input.media_subtype()))
    }
}
