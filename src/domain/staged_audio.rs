use std::path::{Path, PathBuf};

/// A staged audio payload produced by one pipeline stage and consumed by the
/// next: a concrete file at a unique, process-local location plus the media
/// subtype detected from transfer metadata (`ogg` for `audio/ogg`, and so on).
///
/// Artifacts are ephemeral. They live for at most one job and cleanup after
/// the job ends is advisory, never a correctness requirement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedAudio {
    path: PathBuf,
    media_subtype: String,
}

impl StagedAudio {
    pub fn new(path: PathBuf, media_subtype: impl Into<String>) -> Self {
        Self {
            path,
            media_subtype: media_subtype.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn media_subtype(&self) -> &str {
        &self.media_subtype
    }

    pub fn into_path(self) -> PathBuf {
        self.path
    }
}
