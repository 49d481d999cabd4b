//! Cell value type shared by every table in the pipeline.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A single spreadsheet cell.
///
/// `Null` is the universal "absent" marker. It is kept distinct from zero and
/// from the empty string all the way to the formatter, which is the only stage
/// allowed to replace it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

// ============================================================================
// Type checking
// ============================================================================

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "NULL",
            Value::Bool(_) => "BOOLEAN",
            Value::Int(_) => "INTEGER",
            Value::Float(_) => "FLOAT",
            Value::String(_) => "STRING",
        }
    }

    pub fn is_null(&self) -> bool { matches!(self, Value::Null) }
    pub fn is_numeric(&self) -> bool { matches!(self, Value::Int(_) | Value::Float(_)) }
    pub fn is_string(&self) -> bool { matches!(self, Value::String(_)) }

    /// True for text that is not empty. Used to count declared SICs.
    pub fn is_text(&self) -> bool {
        matches!(self, Value::String(s) if !s.is_empty())
    }

    /// Absent, or text that trimmed down to nothing. Neither can name an
    /// entity.
    pub fn is_blank(&self) -> bool {
        match self {
            Value::Null => true,
            Value::String(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Explicitly declared non-relationship: `false`, numeric zero or the
    /// text `"false"`.
    pub fn is_falsy_sentinel(&self) -> bool {
        match self {
            Value::Bool(b) => !*b,
            Value::Int(i) => *i == 0,
            Value::Float(f) => *f == 0.0,
            Value::String(s) => s == "false",
            Value::Null => false,
        }
    }

    /// Attempt to extract as f64
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Attempt to extract as &str
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Hashable identity used by group-by, join and dedup.
    ///
    /// Integral floats collapse onto the matching integer so `1` and `1.0`
    /// land in the same group.
    pub fn key(&self) -> ValueKey {
        match self {
            Value::Null => ValueKey::Null,
            Value::Bool(b) => ValueKey::Bool(*b),
            Value::Int(i) => ValueKey::Int(*i),
            Value::Float(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => ValueKey::Int(*f as i64),
            Value::Float(f) => ValueKey::Float(f.to_bits()),
            Value::String(s) => ValueKey::String(s.clone()),
        }
    }
}

/// See [`Value::key`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ValueKey {
    Null,
    Bool(bool),
    Int(i64),
    Float(u64),
    String(String),
}

// ============================================================================
// Conversions (From impls)
// ============================================================================

impl From<bool> for Value { fn from(v: bool) -> Self { Value::Bool(v) } }
impl From<i32> for Value { fn from(v: i32) -> Self { Value::Int(v as i64) } }
impl From<i64> for Value { fn from(v: i64) -> Self { Value::Int(v) } }
impl From<f64> for Value { fn from(v: f64) -> Self { Value::Float(v) } }
impl From<String> for Value { fn from(v: String) -> Self { Value::String(v) } }
impl From<&str> for Value { fn from(v: &str) -> Self { Value::String(v.to_owned()) } }
impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self { v.map(Into::into).unwrap_or(Value::Null) }
}

// ============================================================================
// Display
// ============================================================================

/// Plain rendering, used when a value becomes part of a synthesized name.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::String(s) => f.write_str(s),
        }
    }
}

// ============================================================================
// Comparison
// ============================================================================

impl Value {
    /// Total order used to sort group-by output.
    ///
    /// Null sorts first, then booleans, numbers, and text. Numbers compare
    /// across `Int`/`Float`.
    pub fn sort_cmp(&self, other: &Value) -> Ordering {
        fn rank(v: &Value) -> u8 {
            match v {
                Value::Null => 0,
                Value::Bool(_) => 1,
                Value::Int(_) | Value::Float(_) => 2,
                Value::String(_) => 3,
            }
        }
        match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
            (Value::String(a), Value::String(b)) => a.cmp(b),
            (a, b) if a.is_numeric() && b.is_numeric() => {
                let (x, y) = (a.as_float().unwrap_or_default(), b.as_float().unwrap_or_default());
                x.total_cmp(&y)
            }
            (a, b) => rank(a).cmp(&rank(b)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_from() {
        assert_eq!(Value::from("hello"), Value::String("hello".into()));
        assert_eq!(Value::from(42), Value::Int(42));
        assert_eq!(Value::from(3.5), Value::Float(3.5));
        assert_eq!(Value::from(true), Value::Bool(true));
        assert_eq!(Value::from(None::<&str>), Value::Null);
    }

    #[test]
    fn test_falsy_sentinels() {
        assert!(Value::Bool(false).is_falsy_sentinel());
        assert!(Value::Int(0).is_falsy_sentinel());
        assert!(Value::Float(0.0).is_falsy_sentinel());
        assert!(Value::from("false").is_falsy_sentinel());
        assert!(!Value::Null.is_falsy_sentinel());
        assert!(!Value::from("False Bay").is_falsy_sentinel());
        assert!(!Value::Int(3).is_falsy_sentinel());
    }

    #[test]
    fn test_blank_values() {
        assert!(Value::Null.is_blank());
        assert!(Value::from("").is_blank());
        assert!(Value::from("   ").is_blank());
        assert!(!Value::from("ISR").is_blank());
        assert!(!Value::Int(0).is_blank());
    }

    #[test]
    fn test_integral_float_shares_key_with_int() {
        assert_eq!(Value::Float(2.0).key(), Value::Int(2).key());
        assert_ne!(Value::Float(2.5).key(), Value::Int(2).key());
    }

    #[test]
    fn test_sort_order() {
        assert_eq!(Value::Null.sort_cmp(&Value::from("a")), Ordering::Less);
        assert_eq!(Value::Int(1).sort_cmp(&Value::Float(1.5)), Ordering::Less);
        assert_eq!(Value::from("b").sort_cmp(&Value::from("a")), Ordering::Greater);
    }

    #[test]
    fn test_untagged_json() {
        let json = serde_json::to_string(&vec![Value::Null, Value::Int(1), Value::from("x")]).unwrap();
        assert_eq!(json, r#"[null,1,"x"]"#);
    }
}
