//! JSON conversion for records.
//!
//! JSON objects are the natural shape of "a mapping of results" coming from
//! outside the process (CLI arguments, files, other services). Arrays and
//! nested objects have no column type and are rejected.

use crate::error::RecordError;
use crate::values::{Record, Value};
use serde_json::{Map, Number, Value as JsonValue};

fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

impl Value {
    /// Convert a JSON value for the given field.
    pub fn from_json(field: &str, value: &JsonValue) -> Result<Self, RecordError> {
        match value {
            JsonValue::Null => Ok(Self::Null),
            JsonValue::Bool(b) => Ok(Self::Bool(*b)),
            JsonValue::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(Self::Int(i))
                } else if let Some(f) = n.as_f64() {
                    // u64 values beyond i64 land here too and are kept as floats
                    Ok(Self::Float(f))
                } else {
                    Err(RecordError::UnsupportedType {
                        field: field.to_string(),
                        kind: format!("number {n}"),
                    })
                }
            }
            JsonValue::String(s) => Ok(Self::Text(s.clone())),
            other => Err(RecordError::UnsupportedType {
                field: field.to_string(),
                kind: json_kind(other).to_string(),
            }),
        }
    }

    /// Render this value as JSON. Non-finite floats render as null.
    pub fn to_json(&self) -> JsonValue {
        match self {
            Self::Bool(b) => JsonValue::Bool(*b),
            Self::Int(i) => JsonValue::Number((*i).into()),
            Self::Float(f) => Number::from_f64(*f)
                .map(JsonValue::Number)
                .unwrap_or(JsonValue::Null),
            Self::Text(s) => JsonValue::String(s.clone()),
            Self::Null => JsonValue::Null,
        }
    }
}

impl Record {
    /// Build a record from a JSON object, keeping its key order.
    pub fn from_json_object(object: &Map<String, JsonValue>) -> Result<Self, RecordError> {
        let mut record = Record::new();
        for (name, value) in object {
            record.push(name.clone(), Value::from_json(name, value)?)?;
        }
        Ok(record)
    }

    /// Build a record from any JSON value, which must be an object.
    pub fn from_json(value: &JsonValue) -> Result<Self, RecordError> {
        match value {
            JsonValue::Object(object) => Self::from_json_object(object),
            other => Err(RecordError::NotAnObject(json_kind(other).to_string())),
        }
    }

    /// Render this record as a JSON object.
    pub fn to_json(&self) -> JsonValue {
        let mut object = Map::with_capacity(self.len());
        for (name, value) in self.iter() {
            object.insert(name.to_string(), value.to_json());
        }
        JsonValue::Object(object)
    }
}
