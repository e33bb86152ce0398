//! Error types for the diff crate.

/// Errors that can occur while rendering diff output.
///
/// Classification itself never fails: missing baselines and unknown
/// components are skipped, not reported as errors.
#[derive(Debug, thiserror::Error)]
pub enum DiffError {
    /// Serialization or deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience alias for diff results.
pub type DiffResult<T> = Result<T, DiffError>;
