use fm_config::{QualityScores, ReconConfig};
use serde::Serialize;

/// A source paired with its quality for one component.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RankedSource {
    pub source: String,
    pub quality: i32,
}

/// Trust scores for (source, component) pairs.
///
/// Lookup order: the configured table, then scores the probes announced in
/// their own results, then `default_quality`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QualityTable {
    configured: QualityScores,
    external: QualityScores,
    default_quality: i32,
}

impl QualityTable {
    /// Create a table from configured scores and a default.
    pub fn new(configured: QualityScores, default_quality: i32) -> Self {
        Self {
            configured,
            external: QualityScores::new(),
            default_quality,
        }
    }

    /// Build the table described by `config`.
    pub fn from_config(config: &ReconConfig) -> Self {
        Self::new(config.quality.clone(), config.default_quality)
    }

    /// Layer probe-announced scores beneath the configured ones.
    pub fn with_external(mut self, external: QualityScores) -> Self {
        self.external = external;
        self
    }

    /// The quality returned when no entry exists.
    pub fn default_quality(&self) -> i32 {
        self.default_quality
    }

    /// The locally configured score, ignoring announced ones.
    pub fn configured_quality(&self, source: &str, component: &str) -> Option<i32> {
        lookup(&self.configured, source, component)
    }

    /// The score a probe announced for itself, ignoring configuration.
    pub fn announced_quality(&self, source: &str, component: &str) -> Option<i32> {
        lookup(&self.external, source, component)
    }

    /// The explicitly configured or announced score, without the default.
    pub fn explicit_quality(&self, source: &str, component: &str) -> Option<i32> {
        lookup(&self.configured, source, component)
            .or_else(|| lookup(&self.external, source, component))
    }

    /// The trust score of `source` reporting on `component`. Never fails.
    pub fn quality(&self, source: &str, component: &str) -> i32 {
        self.explicit_quality(source, component).unwrap_or_else(|| {
            tracing::debug!(source, component, "no quality configured; using default");
            self.default_quality
        })
    }

    /// Rank `sources` for `component` in ascending quality.
    ///
    /// Ties keep their input order. Lowest trust comes first so that a
    /// caller applying sources in order lets the most trusted one win.
    pub fn rank_sources<S: AsRef<str>>(&self, sources: &[S], component: &str) -> Vec<RankedSource> {
        let mut ranked: Vec<RankedSource> = sources
            .iter()
            .map(|s| RankedSource {
                source: s.as_ref().to_string(),
                quality: self.quality(s.as_ref(), component),
            })
            .collect();
        // `sort_by_key` is stable.
        ranked.sort_by_key(|r| r.quality);
        ranked
    }
}

fn lookup(scores: &QualityScores, source: &str, component: &str) -> Option<i32> {
    scores.get(source)?.get(component).copied()
}
