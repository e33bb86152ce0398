//! Diff engine for factmerge.
//!
//! Compares the canonical (merged) facts for a device against the persisted
//! baseline and produces a read-only change report per component. Nothing
//! here applies the report; persisting is the caller's decision.
//!
//! # Key Types
//!
//! - [`DiffEngine`]: Classifies components and dispatches to the comparisons
//! - [`DiffReport`] / [`DiffEntry`] / [`FieldDiff`]: Report structure
//! - [`compare_records`]: Field-by-field comparison of two matched records
//! - [`diff_table`]: Two-pass baseline/merged reconciliation

pub mod compare;
pub mod engine;
pub mod error;
pub mod report;
pub mod table;
pub mod values;

pub use compare::{compare_records, RecordComparison};
pub use engine::DiffEngine;
pub use error::{DiffError, DiffResult};
pub use report::{reports_to_json, DiffEntry, DiffMeta, DiffReport, FieldDiff, ReportKind, Status};
pub use table::diff_table;
pub use values::{compare_lists, compare_strings, sanitize_model_name};
