use std::io;
use std::path::{Path, PathBuf};

use crate::domain::StagingToken;

/// Ephemeral on-disk staging for in-flight audio artifacts.
///
/// Every artifact lands under one base directory at
/// `<base>/<label>_<token>.<extension>`. Tokens are unique per artifact, so
/// concurrent jobs never collide on a staging location. The external
/// transcoder needs real filesystem paths, which is why staging is plain
/// local disk rather than an object-store abstraction.
pub struct StagingArea {
    base: PathBuf,
}

impl StagingArea {
    pub fn new(base: PathBuf) -> io::Result<Self> {
        std::fs::create_dir_all(&base)?;
        Ok(Self { base })
    }

    pub fn path_for(&self, label: &str, token: &StagingToken, extension: &str) -> PathBuf {
        self.base.join(format!("{}_{}.{}", label, token, extension))
    }

    pub async fn write(&self, path: &Path, data: &[u8]) -> io::Result<()> {
        tokio::fs::write(path, data).await
    }

    pub fn base(&self) -> &Path {
        &self.base
    }
}
