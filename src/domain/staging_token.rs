use std::fmt;

use chrono::Utc;
use uuid::Uuid;

/// On-disk identity of a staged artifact.
///
/// Invariant: tokens minted by concurrent jobs are always distinct, so no two
/// jobs ever share a staging location. The microsecond timestamp keeps names
/// sortable by creation time; the UUID discriminator rules out collisions
/// within the same microsecond.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StagingToken(String);

impl StagingToken {
    pub fn mint() -> Self {
        Self(format!(
            "{}_{}",
            Utc::now().timestamp_micros(),
            Uuid::new_v4().simple()
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StagingToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
