//! Configuration for factmerge.
//!
//! Holds the static tables the merger and diff engine are parameterised by:
//! per-probe quality scores, the component catalogue (kind and unique field
//! groups per component), and the field sets ignored during comparison.
//! Configuration is injected explicitly; the built-in defaults are only
//! reached through [`ReconConfig::default`].

pub mod defaults;
pub mod error;
pub mod recon;

pub use error::{ConfigError, ConfigResult};
pub use recon::{ComponentConfig, QualityScores, ReconConfig};
