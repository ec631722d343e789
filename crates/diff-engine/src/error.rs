use thiserror::Error;

/// The engine's error taxonomy (spec §7). Only the three terminal kinds ever
/// propagate out of [`crate::compare`] as an `Err`; `MalformedClassFile` and
/// recoverable `ResourceError` conditions are downgraded to warning strings
/// inside a successfully-returned `ComparisonResult`.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("malformed archive: {0}")]
    MalformedArchive(String),

    #[error("no class files found in archive")]
    NoClassFiles,

    #[error("internal invariant violated: {0}")]
    InternalInvariantViolation(String),
}

impl From<jarlint_archive::ArchiveError> for EngineError {
    fn from(err: jarlint_archive::ArchiveError) -> Self {
        match err {
            jarlint_archive::ArchiveError::MalformedArchive(msg) => EngineError::MalformedArchive(msg),
        }
    }
}
