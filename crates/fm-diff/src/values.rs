//! Scalar and flat-list comparisons.

use std::collections::BTreeSet;

use fm_types::Value;

/// `true` iff every value renders to the same trimmed text.
/// Vacuously `true` for zero or one value.
pub fn compare_strings<'a, I>(values: I) -> bool
where
    I: IntoIterator<Item = &'a str>,
{
    let mut iter = values.into_iter().map(str::trim);
    let Some(first) = iter.next() else {
        return true;
    };
    iter.all(|v| v == first)
}

/// `true` iff every list, compared as a set of trimmed values, equals every
/// other. Order and duplicates are irrelevant.
pub fn compare_lists<'a, I>(lists: I) -> bool
where
    I: IntoIterator<Item = &'a [Value]>,
{
    let mut sets = lists
        .into_iter()
        .map(|list| list.iter().map(Value::trimmed).collect::<BTreeSet<String>>());
    let Some(first) = sets.next() else {
        return true;
    };
    sets.all(|set| set == first)
}

/// Strip `(device type)` annotations from a model name.
///
/// `"Dell PowerEdge R610 (rack server)"` becomes `"Dell PowerEdge R610"`
/// when `"rack server"` is a known device type.
pub fn sanitize_model_name<S: AsRef<str>>(value: &str, device_types: &[S]) -> String {
    let mut out = value.to_string();
    for device_type in device_types {
        let annotation = format!("({})", device_type.as_ref());
        if out.contains(&annotation) {
            out = out.replace(&annotation, "").trim().to_string();
        }
    }
    out
}
