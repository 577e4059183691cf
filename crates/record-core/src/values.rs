//! Value and record representations.
//!
//! A [`Record`] is what a caller hands to the synchronizer: an ordered list of
//! uniquely named fields, each carrying a [`Value`]. Records are built
//! explicitly by the caller, either field by field or from a JSON object
//! (see [`crate::json`]).

use crate::error::RecordError;
use std::collections::HashSet;

/// A single field value.
///
/// The union is closed: supporting a new kind means adding a variant here,
/// an inference rule in [`crate::ColumnType::infer`], a DDL mapping and a
/// parameter conversion in the MySQL type crate.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Boolean value
    Bool(bool),

    /// Signed integer
    Int(i64),

    /// Floating point number
    Float(f64),

    /// Text value
    Text(String),

    /// Absent value. Null fields are dropped before a record is persisted.
    Null,
}

impl Value {
    /// Check if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Human readable name of the value kind, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Bool(_) => "boolean",
            Self::Int(_) => "integer",
            Self::Float(_) => "float",
            Self::Text(_) => "text",
            Self::Null => "null",
        }
    }

    /// Try to get this value as a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get this value as an i64.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Try to get this value as an f64.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Try to get this value as a string reference.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Self::Int(i as i64)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<f32> for Value {
    fn from(f: f32) -> Self {
        Self::Float(f as f64)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Self::Float(f)
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

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => Self::Null,
        }
    }
}

/// Ordered sequence of uniquely named fields to be stored as one row.
///
/// Field names are case-sensitive, non-empty and unique. Order is preserved
/// and determines the order of added columns and of the INSERT column list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: Vec<(String, Value)>,
}

impl Record {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start building a record.
    pub fn builder() -> RecordBuilder {
        RecordBuilder::default()
    }

    /// Append a field, rejecting empty and duplicate names.
    pub fn push(
        &mut self,
        name: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<(), RecordError> {
        let name = name.into();
        if name.is_empty() {
            return Err(RecordError::EmptyFieldName);
        }
        if self.contains(&name) {
            return Err(RecordError::DuplicateField(name));
        }
        self.fields.push((name, value.into()));
        Ok(())
    }

    /// Check whether a field with this exact name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.fields.iter().any(|(n, _)| n == name)
    }

    /// Get a field value by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// Number of fields, nulls included.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate over `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Field names in insertion order.
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|(n, _)| n.as_str()).collect()
    }

    /// Return a copy of this record without its null fields.
    pub fn without_nulls(self) -> Self {
        Self {
            fields: self
                .fields
                .into_iter()
                .filter(|(_, v)| !v.is_null())
                .collect(),
        }
    }

    /// Consume the record, returning its fields.
    pub fn into_fields(self) -> Vec<(String, Value)> {
        self.fields
    }
}

/// Builder for [`Record`].
///
/// Validation is deferred to [`RecordBuilder::build`], so the first empty or
/// duplicate name is reported there.
#[derive(Debug, Default)]
pub struct RecordBuilder {
    fields: Vec<(String, Value)>,
}

impl RecordBuilder {
    /// Add a field to the record.
    pub fn field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    /// Build the record.
    pub fn build(self) -> Result<Record, RecordError> {
        let mut seen = HashSet::with_capacity(self.fields.len());
        for (name, _) in &self.fields {
            if name.is_empty() {
                return Err(RecordError::EmptyFieldName);
            }
            if !seen.insert(name.as_str()) {
                return Err(RecordError::DuplicateField(name.clone()));
            }
        }
        Ok(Record {
            fields: self.fields,
        })
    }
}
