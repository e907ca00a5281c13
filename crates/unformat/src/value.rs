//! Typed values recovered from matched text.

use jiff::civil::DateTime;
use jiff::tz::Offset;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    String(String),
    /// A calendar timestamp. `offset` is only set when the date/time
    /// template carried a `%z` directive.
    DateTime {
        datetime: DateTime,
        offset: Option<Offset>,
    },
}

impl Value {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the value as a float, widening integers.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(n) => Some(*n),
            Value::Int(n) => Some(*n as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_datetime(&self) -> Option<DateTime> {
        match self {
            Value::DateTime { datetime, .. } => Some(*datetime),
            _ => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::DateTime { .. } => "datetime",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(n) => write!(f, "{n:?}"),
            Value::String(s) => f.write_str(s),
            Value::DateTime {
                datetime,
                offset: None,
            } => write!(f, "{datetime}"),
            Value::DateTime {
                datetime,
                offset: Some(offset),
            } => {
                let seconds = offset.seconds();
                let sign = if seconds < 0 { '-' } else { '+' };
                let seconds = seconds.abs();
                write!(
                    f,
                    "{datetime}{sign}{:02}:{:02}",
                    seconds / 3600,
                    seconds / 60 % 60
                )
            }
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::date;

    #[test]
    fn test_accessors() {
        assert_eq!(Value::Int(42).as_int(), Some(42));
        assert_eq!(Value::Int(42).as_float(), Some(42.0));
        assert_eq!(Value::Float(1.5).as_int(), None);
        assert_eq!(Value::from("abc").as_str(), Some("abc"));
        assert_eq!(Value::Int(1).as_str(), None);
    }

    #[test]
    fn test_type_name() {
        assert_eq!(Value::Int(1).type_name(), "int");
        assert_eq!(Value::Float(1.0).type_name(), "float");
        assert_eq!(Value::from("x").type_name(), "string");
        let dt = Value::DateTime {
            datetime: date(2021, 3, 4).at(4, 3, 2, 0),
            offset: None,
        };
        assert_eq!(dt.type_name(), "datetime");
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::Int(-7).to_string(), "-7");
        assert_eq!(Value::Float(3.0).to_string(), "3.0");
        assert_eq!(Value::from("hi").to_string(), "hi");
        let dt = Value::DateTime {
            datetime: date(2021, 3, 4).at(4, 3, 2, 0),
            offset: None,
        };
        assert_eq!(dt.to_string(), "2021-03-04T04:03:02");
    }

    #[test]
    fn test_display_with_offset() {
        let dt = Value::DateTime {
            datetime: date(2021, 3, 4).at(4, 3, 2, 0),
            offset: Some(Offset::constant(2)),
        };
        assert_eq!(dt.to_string(), "2021-03-04T04:03:02+02:00");
    }
}
