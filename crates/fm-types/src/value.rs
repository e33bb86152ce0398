use std::cmp::Ordering;
use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

/// A scalar field value as reported by a source.
///
/// Nested structures never appear at this layer; device trees are flattened
/// upstream. Comparisons throughout factmerge go through [`Value::trimmed`],
/// so `Int(4)` and `Text(" 4 ")` are the same value once rendered.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Absent or explicitly null.
    #[default]
    Null,
    /// Integer value.
    Int(i64),
    /// Free-form text.
    Text(String),
}

impl Value {
    /// Render the value as text. `Null` renders as the empty string.
    pub fn as_text(&self) -> String {
        match self {
            Self::Null => String::new(),
            Self::Int(n) => n.to_string(),
            Self::Text(s) => s.clone(),
        }
    }

    /// Render the value as text with surrounding whitespace removed.
    pub fn trimmed(&self) -> String {
        match self {
            Self::Text(s) => s.trim().to_string(),
            other => other.as_text(),
        }
    }

    /// Returns `true` for `Null` and for whitespace-only text.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Int(_) => false,
            Self::Text(s) => s.trim().is_empty(),
        }
    }

    /// Returns `true` if this value is `Null`.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Display ordering: `Null` first, integers by number, anything else by
    /// trimmed text.
    pub fn display_cmp(&self, other: &Value) -> Ordering {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => a.cmp(b),
            _ if self.is_null() || other.is_null() => other.is_null().cmp(&self.is_null()),
            _ => self.trimmed().cmp(&other.trimmed()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Int(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

/// Probes emit loosely typed JSON; booleans and floats are kept as text so a
/// single odd field never rejects a whole fact file.
impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ValueVisitor;

        impl<'de> Visitor<'de> for ValueVisitor {
            type Value = Value;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a string, number, boolean, or null")
            }

            fn visit_unit<E: de::Error>(self) -> Result<Value, E> {
                Ok(Value::Null)
            }

            fn visit_none<E: de::Error>(self) -> Result<Value, E> {
                Ok(Value::Null)
            }

            fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<Value, D::Error> {
                Value::deserialize(d)
            }

            fn visit_bool<E: de::Error>(self, b: bool) -> Result<Value, E> {
                Ok(Value::Text(b.to_string()))
            }

            fn visit_i64<E: de::Error>(self, n: i64) -> Result<Value, E> {
                Ok(Value::Int(n))
            }

            fn visit_u64<E: de::Error>(self, n: u64) -> Result<Value, E> {
                Ok(i64::try_from(n).map_or_else(|_| Value::Text(n.to_string()), Value::Int))
            }

            fn visit_f64<E: de::Error>(self, n: f64) -> Result<Value, E> {
                Ok(Value::Text(n.to_string()))
            }

            fn visit_str<E: de::Error>(self, s: &str) -> Result<Value, E> {
                Ok(Value::Text(s.to_string()))
            }

            fn visit_string<E: de::Error>(self, s: String) -> Result<Value, E> {
                Ok(Value::Text(s))
            }
        }

        deserializer.deserialize_any(ValueVisitor)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn null_renders_empty() {
        assert_eq!(Value::Null.as_text(), "");
        assert!(Value::Null.is_empty());
    }

    #[test]
    fn whitespace_text_is_empty() {
        assert!(Value::from("   ").is_empty());
        assert!(!Value::from(" x ").is_empty());
    }

    #[test]
    fn int_and_text_trim_to_same() {
        assert_eq!(Value::Int(4).trimmed(), Value::from(" 4 ").trimmed());
    }

    #[test]
    fn zero_is_not_empty() {
        assert!(!Value::Int(0).is_empty());
    }

    #[test]
    fn deserializes_untagged() {
        let v: Vec<Value> = serde_json::from_str(r#"["a", 7, null]"#).unwrap();
        assert_eq!(v, vec![Value::from("a"), Value::Int(7), Value::Null]);
    }

    #[test]
    fn serializes_untagged() {
        let json = serde_json::to_string(&vec![Value::from("a"), Value::Int(7), Value::Null]).unwrap();
        assert_eq!(json, r#"["a",7,null]"#);
    }

    #[test]
    fn loose_json_kept_as_text() {
        let v: Vec<Value> = serde_json::from_str("[true, 2.5, 18446744073709551615]").unwrap();
        assert_eq!(
            v,
            vec![
                Value::from("true"),
                Value::from("2.5"),
                Value::from("18446744073709551615"),
            ]
        );
    }

    #[test]
    fn display_order_is_numeric_for_integers() {
        assert_eq!(Value::from(2).display_cmp(&Value::from(10)), Ordering::Less);
        assert_eq!(Value::from("10").display_cmp(&Value::from("2")), Ordering::Less);
        assert_eq!(Value::Null.display_cmp(&Value::from(-5)), Ordering::Less);
        assert_eq!(Value::from("a").display_cmp(&Value::Null), Ordering::Greater);
        assert_eq!(Value::Null.display_cmp(&Value::Null), Ordering::Equal);
        assert_eq!(Value::from(" b").display_cmp(&Value::from("b")), Ordering::Equal);
    }

    #[test]
    fn option_conversion() {
        assert_eq!(Value::from(None::<&str>), Value::Null);
        assert_eq!(Value::from(Some("x")), Value::from("x"));
    }

    proptest! {
        #[test]
        fn json_round_trip_preserves_text(n in any::<i64>(), s in "[ a-z0-9]{0,12}") {
            let values = vec![Value::from(n), Value::from(s.as_str()), Value::Null];
            let json = serde_json::to_string(&values).unwrap();
            let back: Vec<Value> = serde_json::from_str(&json).unwrap();
            prop_assert_eq!(back.iter().map(Value::as_text).collect::<Vec<_>>(),
                values.iter().map(Value::as_text).collect::<Vec<_>>());
        }
    }
}
