//! Identity keys derived from unique field groups.

use std::collections::BTreeSet;

use fm_types::{FieldGroup, Record};

use crate::lookup::Lookup;

/// The first group whose every field is present and non-empty in `record`.
pub fn identity_group<'g>(record: &Record, groups: &'g [FieldGroup]) -> Option<&'g FieldGroup> {
    groups.iter().find(|group| group.is_satisfied_by(record))
}

/// The lookup for `record`'s identity group, or `None` if no group is fully
/// satisfied and the record is unmatchable.
pub fn identity_lookup(record: &Record, groups: &[FieldGroup]) -> Option<Lookup> {
    let group = identity_group(record, groups)?;
    Some(
        group
            .fields()
            .iter()
            .filter_map(|field| record.text(field).map(|value| (field.clone(), value)))
            .collect(),
    )
}

/// A lookup from the non-ignored, non-empty fields of one group.
///
/// Unlike [`identity_lookup`] the group need not be fully satisfied; the
/// result may be empty, which callers treat as "no key from this group".
pub fn partial_lookup(record: &Record, group: &FieldGroup, ignored: &BTreeSet<String>) -> Lookup {
    group
        .fields()
        .iter()
        .filter(|field| !ignored.contains(*field))
        .filter_map(|field| {
            record
                .text(field)
                .filter(|value| !value.is_empty())
                .map(|value| (field.clone(), value))
        })
        .collect()
}
