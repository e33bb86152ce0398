use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::record::Record;
use crate::value::Value;

/// Source name reserved for the persisted baseline.
pub const DATABASE_SOURCE: &str = "database";

/// Source name reserved for the merger's canonical output.
pub const MERGED_SOURCE: &str = "merged";

/// Returns `true` for the two reserved source names.
pub fn is_reserved_source(source: &str) -> bool {
    source == DATABASE_SOURCE || source == MERGED_SOURCE
}

/// What one source reported for one component.
///
/// Deserialized untagged: an array of objects is a table, an array of
/// scalars is a list, anything else is a scalar. An empty array is an empty
/// table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Facts {
    /// Records requiring identity matching (`memory`, `disks`).
    Table(Vec<Record>),
    /// Unordered primitive values (`mac_addresses`).
    List(Vec<Value>),
    /// A single value (`model_name`, `type`).
    Scalar(Value),
}

impl Facts {
    /// Short name of the payload shape, used in errors and logs.
    pub fn shape(&self) -> &'static str {
        match self {
            Self::Table(_) => "table",
            Self::List(_) => "list",
            Self::Scalar(_) => "scalar",
        }
    }

    /// Borrow the records of a table payload.
    pub fn as_table(&self) -> Option<&[Record]> {
        match self {
            Self::Table(rows) => Some(rows),
            _ => None,
        }
    }

    /// Borrow the values of a list payload.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(values) => Some(values),
            // An empty table is indistinguishable from an empty list on the wire.
            Self::Table(rows) if rows.is_empty() => Some(&[]),
            _ => None,
        }
    }

    /// Borrow the value of a scalar payload.
    pub fn as_scalar(&self) -> Option<&Value> {
        match self {
            Self::Scalar(value) => Some(value),
            _ => None,
        }
    }
}

impl From<Vec<Record>> for Facts {
    fn from(rows: Vec<Record>) -> Self {
        Self::Table(rows)
    }
}

impl From<Value> for Facts {
    fn from(value: Value) -> Self {
        Self::Scalar(value)
    }
}

/// Per-source payloads for one component: `source name -> facts`.
pub type BySource = BTreeMap<String, Facts>;

/// All components for one device: `component name -> source name -> facts`.
pub type DeviceFacts = BTreeMap<String, BySource>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record;

    #[test]
    fn reserved_names() {
        assert!(is_reserved_source("database"));
        assert!(is_reserved_source("merged"));
        assert!(!is_reserved_source("puppet"));
    }

    #[test]
    fn shape_detection_from_json() {
        let by: BySource = serde_json::from_str(
            r#"{
                "table": [{"serial_number": "sn1"}],
                "list": ["aa:bb", "cc:dd"],
                "scalar": "Dell R610",
                "empty": []
            }"#,
        )
        .unwrap();
        assert_eq!(by["table"], Facts::Table(vec![record! { "serial_number" => "sn1" }]));
        assert_eq!(by["list"].shape(), "list");
        assert_eq!(by["scalar"], Facts::Scalar(Value::from("Dell R610")));
        assert_eq!(by["empty"], Facts::Table(vec![]));
        assert_eq!(by["empty"].as_list(), Some(&[][..]));
    }
}
