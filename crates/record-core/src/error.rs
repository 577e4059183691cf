//! Error types for record construction and type inference.

/// Error type for record operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RecordError {
    /// A field was given an empty name
    #[error("Field names must not be empty")]
    EmptyFieldName,

    /// The same field name was supplied twice
    #[error("Duplicate field name '{0}'")]
    DuplicateField(String),

    /// A value kind has no column type mapping
    #[error("Field '{field}' has unsupported type: {kind}")]
    UnsupportedType { field: String, kind: String },

    /// A JSON document was expected to be an object
    #[error("Expected a JSON object, found {0}")]
    NotAnObject(String),
}
