use serde::Serialize;
use thiserror::Error;

use super::progress::LoadPhase;

/// Fatal outcome of a load. No aggregate is produced.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Source is not a readable ZIP archive
    #[error("Failed to load package: {0}")]
    ArchiveOpen(String),
    /// A panic escaped entry processing or assembly
    #[error("Failed to load package: internal error while {phase}: {message}")]
    Defect { phase: LoadPhase, message: String },
    #[error("Loading was cancelled")]
    Cancelled,
    #[error("A package is already being loaded")]
    AlreadyLoading,
}

pub type LoadResult<T> = Result<T, LoadError>;

/// Why an entry was left out of the aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkipReason {
    #[error("unreadable: {message}")]
    Read { message: String },
    #[error("malformed JSON: {message}")]
    Decode { message: String },
    #[error("{size} bytes is not under the {limit} byte limit")]
    TooLarge { size: u64, limit: u64 },
}

/// An entry the load tolerated instead of failing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedEntry {
    /// Entry name as stored in the archive
    pub path: String,
    pub reason: SkipReason,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_user_facing() {
        let err = LoadError::ArchiveOpen("Not a valid ZIP file".into());
        assert_eq!(err.to_string(), "Failed to load package: Not a valid ZIP file");

        let err = LoadError::Defect {
            phase: LoadPhase::Assembling,
            message: "boom".into(),
        };
        assert_eq!(
            err.to_string(),
            "Failed to load package: internal error while assembling: boom"
        );

        let skip = SkipReason::TooLarge { size: 10, limit: 5 };
        assert_eq!(skip.to_string(), "10 bytes is not under the 5 byte limit");
    }
}
