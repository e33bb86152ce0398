use std::collections::BTreeMap;

use fm_config::ReconConfig;
use fm_types::{BySource, ComponentKind, DeviceFacts, Facts, DATABASE_SOURCE, MERGED_SOURCE};
use tracing::{debug, warn};

use crate::report::{DiffReport, ReportKind};
use crate::table::diff_table;
use crate::values::{compare_lists, compare_strings, sanitize_model_name};

/// Component whose values may carry `(device type)` annotations.
const MODEL_NAME: &str = "model_name";
/// Component whose placeholder value is reported under `meta.no_value`.
const TYPE: &str = "type";
const UNKNOWN_TYPE: &str = "unknown";

/// Compares baseline facts against the fresh merge, component by component.
#[derive(Clone, Debug)]
pub struct DiffEngine {
    config: ReconConfig,
    proposed_source: String,
}

impl DiffEngine {
    /// Create an engine that compares `"database"` against `"merged"`.
    pub fn new(config: ReconConfig) -> Self {
        Self {
            config,
            proposed_source: MERGED_SOURCE.to_string(),
        }
    }

    /// Compare record tables against `source` instead of `"merged"`.
    pub fn with_proposed_source(mut self, source: impl Into<String>) -> Self {
        self.proposed_source = source.into();
        self
    }

    pub fn config(&self) -> &ReconConfig {
        &self.config
    }

    /// Diff every component of one device.
    ///
    /// Components without a baseline, components excluded by configuration,
    /// and components whose kind cannot be determined are left out of the
    /// result. An empty map means there is nothing to report.
    pub fn diff(&self, facts: &DeviceFacts) -> BTreeMap<String, DiffReport> {
        facts
            .iter()
            .filter_map(|(component, by_source)| {
                self.diff_component(component, by_source)
                    .map(|report| (component.clone(), report))
            })
            .collect()
    }

    /// Diff a single component, or `None` when it is skipped.
    pub fn diff_component(&self, component: &str, by_source: &BySource) -> Option<DiffReport> {
        if self.config.is_diff_excluded(component) {
            debug!(component, "excluded from diff");
            return None;
        }
        let Some(baseline) = by_source.get(DATABASE_SOURCE) else {
            debug!(component, "no baseline; incomplete data");
            return None;
        };
        let kind = self.classify(component, baseline)?;
        let report = match kind {
            ComponentKind::FlatList => self.diff_lists(component, by_source),
            ComponentKind::Scalar => self.diff_strings(component, by_source),
            ComponentKind::RecordTable => self.diff_records(component, by_source, baseline)?,
        };
        debug!(component, kind = %kind, is_equal = report.is_equal, "component diffed");
        Some(report)
    }

    /// The configured kind, or one inferred from the baseline payload for
    /// components missing from the catalogue.
    fn classify(&self, component: &str, baseline: &Facts) -> Option<ComponentKind> {
        if let Some(kind) = self.config.kind_of(component) {
            return Some(kind);
        }
        match baseline {
            Facts::Scalar(_) => Some(ComponentKind::Scalar),
            Facts::List(_) => Some(ComponentKind::FlatList),
            Facts::Table(rows) if rows.is_empty() => Some(ComponentKind::FlatList),
            Facts::Table(_) => {
                debug!(component, "table without unique fields; skipping");
                None
            }
        }
    }

    fn diff_lists(&self, component: &str, by_source: &BySource) -> DiffReport {
        let lists: Vec<&[fm_types::Value]> = by_source
            .iter()
            .filter_map(|(source, facts)| {
                let list = facts.as_list();
                if list.is_none() {
                    warn!(component, source = %source, shape = facts.shape(), "expected a list; ignoring source");
                }
                list
            })
            .collect();
        DiffReport::values(ReportKind::Lists, compare_lists(lists), Vec::new())
    }

    fn diff_strings(&self, component: &str, by_source: &BySource) -> DiffReport {
        let mut values: Vec<String> = by_source
            .iter()
            .filter_map(|(source, facts)| {
                let value = facts.as_scalar();
                if value.is_none() {
                    warn!(component, source = %source, shape = facts.shape(), "expected a scalar; ignoring source");
                }
                value.map(|v| v.as_text())
            })
            .collect();

        let mut no_value = Vec::new();
        if component == MODEL_NAME {
            values = values
                .iter()
                .map(|v| sanitize_model_name(v, &self.config.device_types))
                .collect();
        } else if component == TYPE
            && !values.is_empty()
            && values.iter().all(|v| v.trim() == UNKNOWN_TYPE)
        {
            no_value.push(component.to_string());
        }

        DiffReport::values(
            ReportKind::Strings,
            compare_strings(values.iter().map(String::as_str)),
            no_value,
        )
    }

    fn diff_records(&self, component: &str, by_source: &BySource, baseline: &Facts) -> Option<DiffReport> {
        let Some(database) = baseline.as_table() else {
            warn!(component, shape = baseline.shape(), "baseline is not a table; skipping");
            return None;
        };
        let merged = match by_source.get(&self.proposed_source) {
            Some(facts) => match facts.as_table() {
                Some(rows) => rows,
                None => {
                    warn!(component, shape = facts.shape(), "proposed facts are not a table; skipping");
                    return None;
                }
            },
            None => {
                debug!(component, proposed = %self.proposed_source, "no proposed table; every baseline row is removed");
                &[]
            }
        };
        Some(diff_table(
            database,
            merged,
            self.config.unique_fields(component),
            &self.config.ignored_lookup_fields,
            &self.config.ignored_compare_fields,
        ))
    }
}
