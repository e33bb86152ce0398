//! Field-level overwrite rule.

use fm_types::Record;

/// Merge `incoming` over `existing`, last writer wins per field.
///
/// Every field of `incoming` replaces the same field of `existing`, empty
/// values included. Fields only in `existing` are kept unchanged.
pub fn merge_fields(existing: &Record, incoming: &Record) -> Record {
    let mut merged = existing.clone();
    merge_fields_into(&mut merged, incoming);
    merged
}

/// In-place form of [`merge_fields`].
pub fn merge_fields_into(existing: &mut Record, incoming: &Record) {
    for (field, value) in incoming {
        existing.insert(field.clone(), value.clone());
    }
}

#[cfg(test)]
mod tests {
    use fm_types::{record, Value};

    use super::*;

    #[test]
    fn incoming_overwrites_shared_fields() {
        let merged = merge_fields(
            &record! { "sn" => "a", "size" => 1 },
            &record! { "size" => 2 },
        );
        assert_eq!(merged, record! { "sn" => "a", "size" => 2 });
    }

    #[test]
    fn existing_only_fields_survive() {
        let merged = merge_fields(&record! { "param_db" => "only_db" }, &record! { "x" => "y" });
        assert_eq!(merged, record! { "param_db" => "only_db", "x" => "y" });
    }

    #[test]
    fn empty_incoming_still_overwrites() {
        let merged = merge_fields(&record! { "label" => "old" }, &record! { "label" => Value::Null });
        assert_eq!(merged.get("label"), Some(&Value::Null));
    }

    #[test]
    fn inputs_untouched() {
        let existing = record! { "a" => 1 };
        let incoming = record! { "a" => 2 };
        let _ = merge_fields(&existing, &incoming);
        assert_eq!(existing, record! { "a" => 1 });
    }
}
