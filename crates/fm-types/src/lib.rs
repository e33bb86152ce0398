//! Foundation types for factmerge.
//!
//! Every other factmerge crate depends on `fm-types`. The types here describe
//! already-flattened facts about one device: scalar field values, records
//! (one component instance as reported by one source), and the per-source
//! payload maps that the merger and diff engine consume.
//!
//! # Key Types
//!
//! - [`Value`]: Scalar field value (text, integer, or absent)
//! - [`Record`]: Field name to value mapping for one component instance
//! - [`FieldGroup`]: Ordered tuple of fields that jointly identify a record
//! - [`Facts`]: What one source reported for one component
//! - [`ComponentKind`]: Static classification of a component
//! - [`DATABASE_SOURCE`] / [`MERGED_SOURCE`]: Reserved source names

pub mod component;
pub mod error;
pub mod facts;
pub mod record;
pub mod value;

pub use component::{groups, ComponentKind, FieldGroup};
pub use error::TypeError;
pub use facts::{is_reserved_source, BySource, DeviceFacts, Facts, DATABASE_SOURCE, MERGED_SOURCE};
pub use record::Record;
pub use value::Value;
