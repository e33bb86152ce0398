//! Diff report structure.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use fm_types::{ComponentKind, Record};
use serde::{Serialize, Serializer};

use crate::error::DiffResult;

/// Classification of a row or a field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Status {
    /// Present on both sides with equal values.
    Unchanged,
    /// Present on both sides with different values.
    Changed,
    /// Only on the merged (right) side.
    Added,
    /// Only on the baseline (left) side.
    Removed,
}

impl Status {
    /// The one-character marker used in reports: `""`, `"?"`, `"+"`, `"-"`.
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Unchanged => "",
            Self::Changed => "?",
            Self::Added => "+",
            Self::Removed => "-",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl Serialize for Status {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.symbol())
    }
}

/// How a component was compared.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    Strings,
    Lists,
    Dicts,
}

impl ReportKind {
    /// The `type` label of a serialized report.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Strings => "strings",
            Self::Lists => "lists",
            Self::Dicts => "dicts",
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<ComponentKind> for ReportKind {
    fn from(kind: ComponentKind) -> Self {
        match kind {
            ComponentKind::Scalar => Self::Strings,
            ComponentKind::FlatList => Self::Lists,
            ComponentKind::RecordTable => Self::Dicts,
        }
    }
}

/// One field of a matched row pair.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FieldDiff {
    pub status: Status,
    pub left_value: String,
    pub right_value: String,
}

/// One row of a record-table report.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DiffEntry {
    pub status: Status,
    /// The baseline row for matched and removed rows, the merged row for
    /// added rows.
    pub items: Record,
    /// Per-field comparison; only for matched rows.
    pub dict_diff: Option<BTreeMap<String, FieldDiff>>,
}

/// Counters and rendering hints.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct DiffMeta {
    /// Components whose only reported value is a placeholder.
    pub no_value: Vec<String>,
    pub add_items_count: usize,
    pub remove_items_count: usize,
    pub change_items_count: usize,
    /// Union of field names seen, minus ignored fields.
    pub headers: BTreeSet<String>,
}

/// The comparison result for one component.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DiffReport {
    pub is_equal: bool,
    #[serde(rename = "type")]
    pub kind: ReportKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff: Option<Vec<DiffEntry>>,
    pub meta: DiffMeta,
}

impl DiffReport {
    /// A report for a scalar or flat-list comparison.
    pub fn values(kind: ReportKind, is_equal: bool, no_value: Vec<String>) -> Self {
        Self {
            is_equal,
            kind,
            diff: None,
            meta: DiffMeta {
                no_value,
                ..Default::default()
            },
        }
    }

    /// Rows of a record-table report; empty for other kinds.
    pub fn entries(&self) -> &[DiffEntry] {
        self.diff.as_deref().unwrap_or(&[])
    }

    /// Number of rows with `status`.
    pub fn count(&self, status: Status) -> usize {
        self.entries().iter().filter(|e| e.status == status).count()
    }

    /// Total changed rows: added, removed, and changed.
    pub fn change_total(&self) -> usize {
        self.meta.add_items_count + self.meta.remove_items_count + self.meta.change_items_count
    }
}

/// Render a set of component reports as pretty JSON.
pub fn reports_to_json(reports: &BTreeMap<String, DiffReport>) -> DiffResult<String> {
    Ok(serde_json::to_string_pretty(reports)?)
}
