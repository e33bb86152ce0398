//! Quality ranking for factmerge.
//!
//! Scores how trustworthy a probe is for a given component and orders
//! sources so that the merger applies the most trusted one last.
//!
//! # Key Types
//!
//! - [`QualityTable`]: Layered lookup: configured scores, then probe-announced
//!   scores, then a fixed default
//! - [`RankedSource`]: A source paired with its quality
//! - [`best_source`]: The single most trusted source for a component

pub mod quality;
pub mod select;

pub use quality::{QualityTable, RankedSource};
pub use select::best_source;
