//! Scan reconciliation for factmerge.
//!
//! The composition root: takes the per-component, per-source facts for one
//! device, merges every record-table component into a `"merged"` source,
//! and diffs the result against the `"database"` baseline.
//!
//! ```
//! use fm_scan::{Reconciler, ReconConfig};
//!
//! let reconciler = Reconciler::new(ReconConfig::default())?;
//! let outcome = reconciler.reconcile(&Default::default())?;
//! assert!(outcome.diff.is_empty());
//! # Ok::<(), fm_scan::ScanError>(())
//! ```

pub mod error;
pub mod input;
pub mod reconciler;
pub mod sort;

pub use error::{ScanError, ScanResult};
pub use input::ScanInput;
pub use reconciler::{Reconciler, ScanOutcome};
pub use sort::sort_results;

// Re-export key types
pub use fm_config::ReconConfig;
pub use fm_diff::{DiffReport, Status};
pub use fm_rank::QualityTable;
pub use fm_types::{BySource, DeviceFacts, Facts, Record, Value};
