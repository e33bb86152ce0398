//! Merge engine for factmerge.
//!
//! Folds the record tables that several probes reported for one component
//! into a single canonical table. Sources are applied in ascending quality,
//! so on a conflicting field the most trusted source that reported it wins.
//! The persisted baseline seeds the result and survives wherever no probe
//! refreshed it.

pub mod error;
pub mod fields;
pub mod merger;

pub use error::{MergeError, MergeResult};
pub use fields::{merge_fields, merge_fields_into};
pub use merger::{MergeStats, Merger};
