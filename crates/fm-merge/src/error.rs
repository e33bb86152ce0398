//! Error types for the merge crate.

/// Errors that can occur during merge operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum MergeError {
    /// The component has no unique field groups and cannot be merged
    /// record by record.
    #[error("component '{0}' is not a record table: no unique field groups")]
    NotRecordTable(String),
}

/// Convenience alias for merge results.
pub type MergeResult<T> = Result<T, MergeError>;
