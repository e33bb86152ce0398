//! Display ordering of record tables.

use std::cmp::Ordering;

use fm_config::ReconConfig;
use fm_types::{DeviceFacts, Facts, Record, Value};

/// Field never used as a sort key; it is the same for every row of a device.
const DEVICE_FIELD: &str = "device";

/// Sort every record table in `facts` by its unique-field values.
///
/// Keys are the fields of all unique field groups in declaration order,
/// minus `device`. Integers compare by number, other values as trimmed
/// text, and missing values first. The sort is stable, so rows
/// with equal keys keep their relative order. Tables of components that are
/// not catalogued as record tables are left alone.
pub fn sort_results(facts: &mut DeviceFacts, config: &ReconConfig) {
    for (component, by_source) in facts.iter_mut() {
        let keys = sort_keys(config, component);
        if keys.is_empty() {
            continue;
        }
        for payload in by_source.values_mut() {
            if let Facts::Table(rows) = payload {
                rows.sort_by(|a, b| compare_by(&keys, a, b));
            }
        }
    }
}

fn sort_keys<'c>(config: &'c ReconConfig, component: &str) -> Vec<&'c str> {
    let mut keys: Vec<&str> = Vec::new();
    for group in config.unique_fields(component) {
        for field in group.fields() {
            if field != DEVICE_FIELD && !keys.contains(&field.as_str()) {
                keys.push(field.as_str());
            }
        }
    }
    keys
}

const MISSING: Value = Value::Null;

fn compare_by(keys: &[&str], a: &Record, b: &Record) -> Ordering {
    keys.iter()
        .map(|key| {
            let left = a.get(key).unwrap_or(&MISSING);
            left.display_cmp(b.get(key).unwrap_or(&MISSING))
        })
        .find(|ordering| ordering.is_ne())
        .unwrap_or(Ordering::Equal)
}
