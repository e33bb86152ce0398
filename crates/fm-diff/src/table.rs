//! Record-table diff: baseline rows against merged rows.

use std::collections::BTreeSet;

use fm_match::{find_unconsumed_match, partial_lookup};
use fm_types::{FieldGroup, Record};

use crate::compare::compare_records;
use crate::report::{DiffEntry, DiffMeta, DiffReport, ReportKind, Status};

/// Field always left out of report headers.
const INDEX_FIELD: &str = "index";

/// Reconcile `database` rows with `merged` rows in two passes.
///
/// 1. Each baseline row tries the unique field groups in order. A group
///    yields a lookup from its non-ignored, non-empty fields; the first
///    lookup that hits an unconsumed merged row pairs the two, and both are
///    consumed. A paired row is unchanged or changed (`?`) depending on
///    [`compare_records`]; an unpaired baseline row is removed (`-`).
/// 2. Every merged row left unconsumed is added (`+`).
///
/// The component is equal iff nothing was added, removed, or changed.
pub fn diff_table(
    database: &[Record],
    merged: &[Record],
    unique_fields: &[FieldGroup],
    ignored_lookup: &BTreeSet<String>,
    ignored_compare: &BTreeSet<String>,
) -> DiffReport {
    let mut entries = Vec::with_capacity(database.len().max(merged.len()));
    let mut meta = DiffMeta::default();
    let mut merged_consumed = vec![false; merged.len()];

    for row in database {
        let paired = unique_fields.iter().find_map(|group| {
            let lookup = partial_lookup(row, group, ignored_lookup);
            if lookup.is_empty() {
                return None;
            }
            find_unconsumed_match(merged, &lookup, &merged_consumed)
        });

        match paired {
            Some(index) => {
                merged_consumed[index] = true;
                let comparison = compare_records(row, &merged[index], ignored_compare);
                let status = if comparison.matched {
                    Status::Unchanged
                } else {
                    meta.change_items_count += 1;
                    Status::Changed
                };
                meta.headers.extend(comparison.keys);
                entries.push(DiffEntry {
                    status,
                    items: row.clone(),
                    dict_diff: Some(comparison.fields),
                });
            }
            None => {
                meta.remove_items_count += 1;
                meta.headers.extend(row.fields().map(str::to_string));
                entries.push(DiffEntry {
                    status: Status::Removed,
                    items: row.clone(),
                    dict_diff: None,
                });
            }
        }
    }

    for (row, consumed) in merged.iter().zip(&merged_consumed) {
        if *consumed {
            continue;
        }
        meta.add_items_count += 1;
        meta.headers.extend(row.fields().map(str::to_string));
        entries.push(DiffEntry {
            status: Status::Added,
            items: row.clone(),
            dict_diff: None,
        });
    }

    meta.headers
        .retain(|h| !ignored_compare.contains(h) && h != INDEX_FIELD);

    DiffReport {
        is_equal: meta.add_items_count == 0
            && meta.remove_items_count == 0
            && meta.change_items_count == 0,
        kind: ReportKind::Dicts,
        diff: Some(entries),
        meta,
    }
}
