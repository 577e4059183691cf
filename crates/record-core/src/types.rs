//! Column type tags and type inference.

use crate::error::RecordError;
use crate::values::Value;
use std::fmt;

/// Canonical column type tag.
///
/// Every value kind maps to exactly one tag. Tags carry their own rendering
/// (`TINYINT`, `INT`, `FLOAT`, `VARCHAR(255)`); dialect crates decide how a
/// tag is spelled in DDL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnType {
    /// Booleans, stored as 0/1
    TinyInt,

    /// 32-bit signed integers
    Int,

    /// Single precision floating point
    Float,

    /// Text up to [`ColumnType::VARCHAR_LENGTH`] characters
    VarChar,
}

impl ColumnType {
    /// Length used for text columns.
    pub const VARCHAR_LENGTH: u16 = 255;

    /// Infer the column type for a field value.
    ///
    /// Booleans are checked first so that they never widen to `INT`.
    /// Integers outside the signed 32-bit range, and floats that are not
    /// finite in single precision, have no column that can hold them and are
    /// rejected, as is `Null`, which must be dropped before inference.
    pub fn infer(field: &str, value: &Value) -> Result<Self, RecordError> {
        let unsupported = |kind: &str| RecordError::UnsupportedType {
            field: field.to_string(),
            kind: kind.to_string(),
        };

        match value {
            Value::Bool(_) => Ok(Self::TinyInt),
            Value::Int(i) => {
                if i32::try_from(*i).is_ok() {
                    Ok(Self::Int)
                } else {
                    Err(unsupported("integer outside the INT range"))
                }
            }
            Value::Float(f) => {
                if !f.is_finite() {
                    Err(unsupported("non-finite float"))
                } else if (*f as f32).is_infinite() {
                    Err(unsupported("float outside the FLOAT range"))
                } else {
                    Ok(Self::Float)
                }
            }
            Value::Text(_) => Ok(Self::VarChar),
            Value::Null => Err(unsupported("null")),
        }
    }

    /// Canonical tag as written in DDL.
    pub fn tag(&self) -> String {
        match self {
            Self::TinyInt => "TINYINT".to_string(),
            Self::Int => "INT".to_string(),
            Self::Float => "FLOAT".to_string(),
            Self::VarChar => format!("VARCHAR({})", Self::VARCHAR_LENGTH),
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tag())
    }
}
