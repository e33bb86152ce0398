use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;
use crate::record::Record;

/// Static classification of a component, decided once by configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentKind {
    /// One value per source (`model_name`, `type`).
    Scalar,
    /// Unordered list of primitive values per source (`mac_addresses`).
    FlatList,
    /// List of records per source, matched by identity (`memory`, `disks`).
    RecordTable,
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar => write!(f, "scalar"),
            Self::FlatList => write!(f, "flat_list"),
            Self::RecordTable => write!(f, "record_table"),
        }
    }
}

impl FromStr for ComponentKind {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scalar" => Ok(Self::Scalar),
            "flat_list" => Ok(Self::FlatList),
            "record_table" => Ok(Self::RecordTable),
            other => Err(TypeError::UnknownKind(other.to_string())),
        }
    }
}

/// An ordered tuple of field names whose joint value identifies a record.
///
/// Serialized as a plain array of field names.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct FieldGroup(Vec<String>);

impl FieldGroup {
    /// Create a group from field names. At least one field is required.
    pub fn new<I, S>(fields: I) -> Result<Self, TypeError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let fields: Vec<String> = fields.into_iter().map(Into::into).collect();
        if fields.is_empty() {
            return Err(TypeError::EmptyFieldGroup);
        }
        Ok(Self(fields))
    }

    /// The field names in configured order.
    pub fn fields(&self) -> &[String] {
        &self.0
    }

    /// Returns `true` if every field of the group is present and non-empty
    /// in `record`.
    pub fn is_satisfied_by(&self, record: &Record) -> bool {
        self.0.iter().all(|field| record.has_value(field))
    }
}

impl TryFrom<Vec<String>> for FieldGroup {
    type Error = TypeError;

    fn try_from(fields: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(fields)
    }
}

impl From<FieldGroup> for Vec<String> {
    fn from(group: FieldGroup) -> Self {
        group.0
    }
}

impl fmt::Display for FieldGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.0.join(", "))
    }
}

/// Build a list of [`FieldGroup`]s from nested string slices.
///
/// Intended for literals; empty inner slices are skipped.
pub fn groups(literal: &[&[&str]]) -> Vec<FieldGroup> {
    literal.iter()
        .filter_map(|g| FieldGroup::new(g.iter().copied()).ok())
        .collect()
}
