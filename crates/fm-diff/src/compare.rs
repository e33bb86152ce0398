//! Field-by-field comparison of two records.

use std::collections::{BTreeMap, BTreeSet};

use fm_types::Record;

use crate::report::{FieldDiff, Status};

/// The outcome of comparing a baseline record with a merged record.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RecordComparison {
    /// `true` iff every compared field is [`Status::Unchanged`].
    pub matched: bool,
    pub fields: BTreeMap<String, FieldDiff>,
    /// Field names that took part in the comparison.
    pub keys: BTreeSet<String>,
}

/// Compare `left` (baseline) with `right` (merged) over the union of their
/// field names, minus `ignored`.
///
/// Values compare as trimmed text, and an empty value counts as absent:
/// a value only on the left is `-`, only on the right is `+`, different on
/// both sides is `?`, equal (or empty on both sides) is unchanged.
pub fn compare_records(left: &Record, right: &Record, ignored: &BTreeSet<String>) -> RecordComparison {
    let keys: BTreeSet<String> = left
        .fields()
        .chain(right.fields())
        .filter(|field| !ignored.contains(*field))
        .map(str::to_string)
        .collect();

    let mut matched = true;
    let mut fields = BTreeMap::new();
    for key in &keys {
        let left_value = left.text(key).unwrap_or_default();
        let right_value = right.text(key).unwrap_or_default();
        let status = match (left_value.is_empty(), right_value.is_empty()) {
            (false, true) => Status::Removed,
            (true, false) => Status::Added,
            _ if left_value == right_value => Status::Unchanged,
            _ => Status::Changed,
        };
        if status != Status::Unchanged {
            matched = false;
        }
        fields.insert(
            key.clone(),
            FieldDiff {
                status,
                left_value,
                right_value,
            },
        );
    }

    RecordComparison {
        matched,
        fields,
        keys,
    }
}
