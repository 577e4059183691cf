//! Building a [`Record`] from command-line field arguments.

use record_core::{Record, RecordError, Value};

/// Error type for field argument parsing.
#[derive(Debug, thiserror::Error)]
pub enum FieldError {
    /// Argument is not of the form NAME=VALUE
    #[error("Invalid field '{0}': expected NAME=VALUE")]
    MissingEquals(String),

    /// `--json` argument is not valid JSON
    #[error("Invalid JSON record: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error(transparent)]
    Record(#[from] RecordError),
}

/// Split `NAME=VALUE` at the first `=`.
pub fn split_assignment(arg: &str) -> Result<(&str, &str), FieldError> {
    arg.split_once('=')
        .ok_or_else(|| FieldError::MissingEquals(arg.to_string()))
}

/// Interpret a bare command-line value.
///
/// `null`, `true` and `false` are keywords, then integers, then finite
/// floats; anything else is text.
pub fn parse_value(raw: &str) -> Value {
    match raw {
        "null" => Value::Null,
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        _ => {
            if let Ok(i) = raw.parse::<i64>() {
                Value::Int(i)
            } else if let Some(f) = raw.parse::<f64>().ok().filter(|f| f.is_finite()) {
                Value::Float(f)
            } else {
                Value::Text(raw.to_string())
            }
        }
    }
}

/// Assemble a record: fields of the `--json` object first, then each
/// `--field`, then each `--text`.
pub fn build_record(
    json: Option<&str>,
    fields: &[String],
    texts: &[String],
) -> Result<Record, FieldError> {
    let mut record = match json {
        Some(doc) => Record::from_json(&serde_json::from_str(doc)?)?,
        None => Record::new(),
    };

    for arg in fields {
        let (name, raw) = split_assignment(arg)?;
        record.push(name, parse_value(raw))?;
    }
    for arg in texts {
        let (name, raw) = split_assignment(arg)?;
        record.push(name, raw)?;
    }

    Ok(record)
}
