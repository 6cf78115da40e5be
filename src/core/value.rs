//! Argument values for formatting calls.
//!
//! Callers hand the engine an ordered slice of [`Value`]s. Formatters inspect
//! the variant to decide how to render; everything else goes through the
//! generic `Display` conversion.

use std::fmt;

use chrono::{DateTime, NaiveDateTime, TimeZone};

/// Layout used when a time value is rendered without a formatter.
pub const DEFAULT_TIME_LAYOUT: &str = "%Y-%m-%d %H:%M:%S";

/// A single formatting argument.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Absence of a value
    #[default]
    Null,
    /// Boolean
    Bool(bool),
    /// Signed integer
    Int(i64),
    /// Unsigned integer that does not fit in `i64`
    UInt(u64),
    /// Floating-point number
    Float(f64),
    /// String
    Str(String),
    /// Wall-clock date and time
    Time(NaiveDateTime),
}

impl Value {
    /// Get the name of this value's type.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::UInt(_) => "uint",
            Value::Float(_) => "float",
            Value::Str(_) => "str",
            Value::Time(_) => "time",
        }
    }

    /// Integer view of this value, if it is integral.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            Value::UInt(u) => i64::try_from(*u).ok(),
            Value::Bool(b) => Some(i64::from(*b)),
            _ => None,
        }
    }

    /// Floating-point view of this value, if it is numeric.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::UInt(u) => Some(*u as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Whether this value is an integer of either signedness.
    pub fn is_integer(&self) -> bool {
        matches!(self, Value::Int(_) | Value::UInt(_))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::UInt(u) => write!(f, "{}", u),
            Value::Float(v) => write!(f, "{}", v),
            Value::Str(s) => f.write_str(s),
            Value::Time(t) => write!(f, "{}", t.format(DEFAULT_TIME_LAYOUT)),
        }
    }
}

// ============================================================================
// Conversions
// ============================================================================

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl From<&String> for Value {
    fn from(value: &String) -> Self {
        Value::Str(value.clone())
    }
}

impl From<char> for Value {
    fn from(value: char) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

macro_rules! impl_from_int {
    ($($ty:ty),*) => {
        $(impl From<$ty> for Value {
            fn from(value: $ty) -> Self {
                Value::Int(i64::from(value))
            }
        })*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        i64::try_from(value)
            .map(Value::Int)
            .unwrap_or(Value::UInt(value))
    }
}

impl From<usize> for Value {
    fn from(value: usize) -> Self {
        Value::from(value as u64)
    }
}

impl From<isize> for Value {
    fn from(value: isize) -> Self {
        Value::Int(value as i64)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float(f64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(value: NaiveDateTime) -> Self {
        Value::Time(value)
    }
}

/// Zoned times keep their local wall-clock reading.
impl<Tz: TimeZone> From<DateTime<Tz>> for Value {
    fn from(value: DateTime<Tz>) -> Self {
        Value::Time(value.naive_local())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Value::Null)
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else if let Some(u) = n.as_u64() {
                    Value::UInt(u)
                } else {
                    Value::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => Value::Str(s),
            // Compound JSON has no dedicated variant; keep its text form
            other => Value::Str(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_display() {
        assert_eq!(Value::from("hi").to_string(), "hi");
        assert_eq!(Value::from(42).to_string(), "42");
        assert_eq!(Value::from(3.1415926).to_string(), "3.1415926");
        assert_eq!(Value::from(true).to_string(), "true");
        assert_eq!(Value::Null.to_string(), "null");
    }

    #[test]
    fn test_time_display() {
        let t = NaiveDate::from_ymd_opt(2024, 2, 29)
            .unwrap()
            .and_hms_opt(13, 5, 9)
            .unwrap();
        assert_eq!(Value::from(t).to_string(), "2024-02-29 13:05:09");
    }

    #[test]
    fn test_large_unsigned() {
        assert_eq!(Value::from(5u64), Value::Int(5));
        assert_eq!(Value::from(u64::MAX), Value::UInt(u64::MAX));
        assert_eq!(Value::from(u64::MAX).as_i64(), None);
    }

    #[test]
    fn test_option() {
        assert_eq!(Value::from(None::<i32>), Value::Null);
        assert_eq!(Value::from(Some("x")), Value::Str("x".into()));
    }

    #[test]
    fn test_from_json() {
        let v: serde_json::Value = serde_json::json!({"a": 1});
        assert_eq!(Value::from(v), Value::Str("{\"a\":1}".into()));
        assert_eq!(Value::from(serde_json::json!(2.5)), Value::Float(2.5));
        assert_eq!(Value::from(serde_json::json!(-7)), Value::Int(-7));
        assert_eq!(Value::from(serde_json::json!("s")), Value::Str("s".into()));
    }
}
