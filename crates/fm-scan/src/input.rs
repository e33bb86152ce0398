//! On-disk shape of one device's scan results.

use fm_config::QualityScores;
use fm_types::DeviceFacts;
use serde::{Deserialize, Serialize};

use crate::error::ScanResult;

/// Facts for one device as handed over by the flattening step.
///
/// Probes that failed upstream must already be absent from `facts`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanInput {
    /// `component -> source -> facts`, including the `"database"` baseline.
    pub facts: DeviceFacts,
    /// Per-component priorities the probes announced in their own results.
    #[serde(default, skip_serializing_if = "QualityScores::is_empty")]
    pub external_priorities: QualityScores,
    /// Whether the scanned address is a management address.
    #[serde(default)]
    pub is_management: bool,
}

impl ScanInput {
    /// Wrap bare facts.
    pub fn new(facts: DeviceFacts) -> Self {
        Self {
            facts,
            ..Default::default()
        }
    }

    /// Parse a JSON document.
    ///
    /// Accepts either the full `{"facts": ..., "external_priorities": ...}`
    /// envelope or a bare `component -> source -> facts` map. The envelope is
    /// tried first; a document that only fits the bare shape (for instance
    /// one with a component named `facts`) is read as bare facts.
    pub fn from_json(text: &str) -> ScanResult<Self> {
        let value: serde_json::Value = serde_json::from_str(text)?;
        let envelope = match value.get("facts") {
            Some(facts) if facts.is_object() => Some(serde_json::from_value::<Self>(value.clone())),
            _ => None,
        };
        match envelope {
            Some(Ok(input)) => Ok(input),
            Some(Err(envelope_err)) => serde_json::from_value(value)
                .map(Self::new)
                .map_err(|_| envelope_err.into()),
            None => Ok(Self::new(serde_json::from_value(value)?)),
        }
    }
}
