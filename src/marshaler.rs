//! Typed value extraction for a single flag.

use crate::cursor::ArgumentCursor;
use crate::error::{ArgsError, ErrorKind};
use serde::{Serialize, Serializer};
use std::fmt;

/// The value type a schema element declares, keyed by its format suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// `""` - present or absent, consumes no token
    Boolean,
    /// `"*"`
    String,
    /// `"#"`
    Integer,
    /// `"##"`
    Double,
    /// `"[*]"` - consumes exactly one token, like `String`
    StringArray,
}

impl ValueKind {
    /// Map a format suffix to its value kind by exact match.
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        match suffix {
            "" => Some(ValueKind::Boolean),
            "*" => Some(ValueKind::String),
            "#" => Some(ValueKind::Integer),
            "##" => Some(ValueKind::Double),
            "[*]" => Some(ValueKind::StringArray),
            _ => None,
        }
    }

    pub fn suffix(self) -> &'static str {
        match self {
            ValueKind::Boolean => "",
            ValueKind::String => "*",
            ValueKind::Integer => "#",
            ValueKind::Double => "##",
            ValueKind::StringArray => "[*]",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ValueKind::Boolean => "boolean",
            ValueKind::String => "string",
            ValueKind::Integer => "integer",
            ValueKind::Double => "double",
            ValueKind::StringArray => "string-array",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A marshaled value, detached from its marshaler.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Boolean(bool),
    String(String),
    Integer(i32),
    Double(#[serde(serialize_with = "serialize_double")] f64),
    StringArray(Vec<String>),
}

/// JSON has no literal for `inf` or `NaN`; those are written as strings.
fn serialize_double<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    if value.is_finite() {
        serializer.serialize_f64(*value)
    } else {
        serializer.serialize_str(&value.to_string())
    }
}

/// Holds the value for one flag and knows how to pull it from the cursor.
///
/// A fresh marshaler holds the zero value of its kind until `set` succeeds.
#[derive(Debug, Clone, PartialEq)]
pub enum Marshaler {
    Boolean(bool),
    String(String),
    Integer(i32),
    Double(f64),
    StringArray(Vec<String>),
}

impl Marshaler {
    pub fn new(kind: ValueKind) -> Self {
        match kind {
            ValueKind::Boolean => Marshaler::Boolean(false),
            ValueKind::String => Marshaler::String(String::new()),
            ValueKind::Integer => Marshaler::Integer(0),
            ValueKind::Double => Marshaler::Double(0.0),
            ValueKind::StringArray => Marshaler::StringArray(Vec::new()),
        }
    }

    /// Consume the tokens this kind needs from `cursor` and store the value.
    ///
    /// Errors carry no flag; the caller attaches it.
    pub fn set(&mut self, cursor: &mut ArgumentCursor<'_>) -> Result<(), ArgsError> {
        match self {
            Marshaler::Boolean(value) => {
                *value = true;
            }
            Marshaler::String(value) => {
                let token = cursor
                    .next_token()
                    .ok_or_else(|| ArgsError::new(ErrorKind::MissingString))?;
                *value = token.to_string();
            }
            Marshaler::Integer(value) => {
                let token = cursor
                    .next_token()
                    .ok_or_else(|| ArgsError::new(ErrorKind::MissingInteger))?;
                *value = token
                    .parse()
                    .map_err(|_| ArgsError::with_parameter(ErrorKind::InvalidInteger, token))?;
            }
            Marshaler::Double(value) => {
                let token = cursor
                    .next_token()
                    .ok_or_else(|| ArgsError::new(ErrorKind::MissingDouble))?;
                *value = token
                    .parse()
                    .map_err(|_| ArgsError::with_parameter(ErrorKind::InvalidDouble, token))?;
            }
            Marshaler::StringArray(values) => {
                let token = cursor
                    .next_token()
                    .ok_or_else(|| ArgsError::new(ErrorKind::MissingString))?;
                *values = vec![token.to_string()];
            }
        }
        Ok(())
    }

    pub fn as_bool(&self) -> bool {
        match self {
            Marshaler::Boolean(value) => *value,
            _ => false,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Marshaler::String(value) => value,
            _ => "",
        }
    }

    pub fn as_int(&self) -> i32 {
        match self {
            Marshaler::Integer(value) => *value,
            _ => 0,
        }
    }

    pub fn as_double(&self) -> f64 {
        match self {
            Marshaler::Double(value) => *value,
            _ => 0.0,
        }
    }

    pub fn as_string_array(&self) -> &[String] {
        match self {
            Marshaler::StringArray(values) => values,
            _ => &[],
        }
    }

    pub fn value(&self) -> Value {
        match self {
            Marshaler::Boolean(value) => Value::Boolean(*value),
            Marshaler::String(value) => Value::String(value.clone()),
            Marshaler::Integer(value) => Value::Integer(*value),
            Marshaler::Double(value) => Value::Double(*value),
            Marshaler::StringArray(values) => Value::StringArray(values.clone()),
        }
    }
}
