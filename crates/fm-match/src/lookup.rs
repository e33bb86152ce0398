use std::collections::BTreeMap;
use std::fmt;

use fm_types::Record;

/// Field values a candidate record must carry to match.
///
/// Values are stored trimmed. A candidate matches when, for every field in
/// the lookup, its own trimmed value is textually equal; a field missing
/// from the candidate is a non-match.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Lookup(BTreeMap<String, String>);

impl Lookup {
    /// Create an empty lookup. An empty lookup matches every record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Require `field` to equal `value` (trimmed).
    pub fn insert(&mut self, field: impl Into<String>, value: impl AsRef<str>) {
        self.0.insert(field.into(), value.as_ref().trim().to_string());
    }

    /// Builder form of [`Lookup::insert`].
    pub fn with(mut self, field: impl Into<String>, value: impl AsRef<str>) -> Self {
        self.insert(field, value);
        self
    }

    /// Returns `true` if `record` satisfies every entry.
    pub fn matches(&self, record: &Record) -> bool {
        self.0
            .iter()
            .all(|(field, value)| record.text(field).as_deref() == Some(value.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: AsRef<str>> FromIterator<(K, V)> for Lookup {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut lookup = Self::new();
        for (k, v) in iter {
            lookup.insert(k, v);
        }
        lookup
    }
}

impl fmt::Display for Lookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|(k, v)| format!("{k}={v}")).collect();
        write!(f, "{{{}}}", parts.join(", "))
    }
}
