use std::collections::BTreeMap;

use fm_config::{QualityScores, ReconConfig};
use fm_diff::{DiffEngine, DiffReport};
use fm_merge::{MergeStats, Merger};
use fm_rank::{best_source, QualityTable};
use fm_types::{DeviceFacts, Facts, MERGED_SOURCE};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::ScanResult;
use crate::input::ScanInput;

/// Everything one reconciliation pass produced.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ScanOutcome {
    /// The input facts with a `"merged"` source added to every record table.
    pub merged: DeviceFacts,
    /// Per-component diff against the baseline; empty when nothing was comparable.
    pub diff: BTreeMap<String, DiffReport>,
    /// Merge counters per record-table component.
    pub stats: BTreeMap<String, MergeStats>,
}

impl ScanOutcome {
    /// Components whose report is not equal.
    pub fn changed_components(&self) -> impl Iterator<Item = &str> {
        self.diff
            .iter()
            .filter(|(_, report)| !report.is_equal)
            .map(|(name, _)| name.as_str())
    }

    /// Returns `true` if every reported component is equal.
    pub fn is_equal(&self) -> bool {
        self.diff.values().all(|report| report.is_equal)
    }
}

/// Merges and diffs the facts of one device.
///
/// Holds nothing but configuration, so one instance can serve any number of
/// devices.
#[derive(Clone, Debug)]
pub struct Reconciler {
    config: ReconConfig,
    merger: Merger,
    engine: DiffEngine,
}

impl Reconciler {
    /// Build a reconciler from a validated configuration.
    pub fn new(config: ReconConfig) -> ScanResult<Self> {
        config.validate()?;
        let merger = Merger::new(QualityTable::from_config(&config));
        let engine = DiffEngine::new(config.clone());
        Ok(Self {
            config,
            merger,
            engine,
        })
    }

    /// Layer probe-announced priorities beneath the configured ones.
    pub fn with_external(mut self, external: QualityScores) -> Self {
        let quality = self.merger.quality().clone().with_external(external);
        self.merger = Merger::new(quality);
        self
    }

    pub fn config(&self) -> &ReconConfig {
        &self.config
    }

    pub fn quality(&self) -> &QualityTable {
        self.merger.quality()
    }

    /// Merge every record-table component and store it under `"merged"`.
    ///
    /// `facts` is left untouched; the result is a copy.
    pub fn merge_device(&self, facts: &DeviceFacts) -> ScanResult<DeviceFacts> {
        self.merge_device_with_stats(facts).map(|(merged, _)| merged)
    }

    fn merge_device_with_stats(
        &self,
        facts: &DeviceFacts,
    ) -> ScanResult<(DeviceFacts, BTreeMap<String, MergeStats>)> {
        let mut merged = facts.clone();
        let mut all_stats = BTreeMap::new();
        for component in self.config.record_tables() {
            let Some(by_source) = merged.get_mut(component) else {
                continue;
            };
            let (records, stats) = self.merger.merge_with_stats(
                component,
                by_source,
                self.config.unique_fields(component),
            )?;
            debug!(
                component,
                records = records.len(),
                matched = stats.matched,
                appended = stats.appended,
                "component merged"
            );
            by_source.insert(MERGED_SOURCE.to_string(), Facts::Table(records));
            all_stats.insert(component.to_string(), stats);
        }
        Ok((merged, all_stats))
    }

    /// Merge, then diff against the baseline.
    pub fn reconcile(&self, facts: &DeviceFacts) -> ScanResult<ScanOutcome> {
        let (merged, stats) = self.merge_device_with_stats(facts)?;
        let diff = self.engine.diff(&merged);
        let outcome = ScanOutcome { merged, diff, stats };
        info!(
            components = outcome.diff.len(),
            changed = outcome.changed_components().count(),
            "device reconciled"
        );
        Ok(outcome)
    }

    /// Reconcile a parsed input, honouring its announced priorities.
    pub fn reconcile_input(&self, input: &ScanInput) -> ScanResult<ScanOutcome> {
        if input.external_priorities.is_empty() {
            return self.reconcile(&input.facts);
        }
        self.clone()
            .with_external(input.external_priorities.clone())
            .reconcile(&input.facts)
    }

    /// Pick each component's payload from its most trusted source.
    ///
    /// Components whose chosen source is absent (no probe scored and no
    /// baseline exists) are left out.
    pub fn select(&self, facts: &DeviceFacts, is_management: bool) -> BTreeMap<String, Facts> {
        facts
            .iter()
            .filter_map(|(component, by_source)| {
                let sources: Vec<&str> = by_source.keys().map(String::as_str).collect();
                let chosen = best_source(self.quality(), component, sources.as_slice(), is_management);
                match by_source.get(chosen) {
                    Some(payload) => Some((component.clone(), payload.clone())),
                    None => {
                        debug!(component = %component, source = chosen, "chosen source absent; skipping");
                        None
                    }
                }
            })
            .collect()
    }
}
