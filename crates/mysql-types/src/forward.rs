//! Forward conversion: Value → MySQLValue
//!
//! Every record value reaches MySQL as a bound parameter through this
//! conversion, whatever its kind.

use mysql_async::Value;

/// MySQL value wrapper for type-safe conversions.
#[derive(Debug, Clone, PartialEq)]
pub struct MySQLValue(pub Value);

impl MySQLValue {
    /// Get the inner mysql_async::Value.
    pub fn into_inner(self) -> Value {
        self.0
    }

    /// Get a reference to the inner value.
    pub fn as_inner(&self) -> &Value {
        &self.0
    }
}

impl From<record_core::Value> for MySQLValue {
    fn from(value: record_core::Value) -> Self {
        match value {
            // Boolean - TINYINT column holds 0/1
            record_core::Value::Bool(b) => MySQLValue(Value::Int(if b { 1 } else { 0 })),
            record_core::Value::Int(i) => MySQLValue(Value::Int(i)),
            // FLOAT column is single precision
            record_core::Value::Float(f) => MySQLValue(Value::Float(f as f32)),
            record_core::Value::Text(s) => MySQLValue(Value::Bytes(s.into_bytes())),
            record_core::Value::Null => MySQLValue(Value::NULL),
        }
    }
}

impl From<&record_core::Value> for MySQLValue {
    fn from(value: &record_core::Value) -> Self {
        value.clone().into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bool_conversion() {
        let v: MySQLValue = record_core::Value::Bool(true).into();
        assert_eq!(v.into_inner(), Value::Int(1));

        let v: MySQLValue = record_core::Value::Bool(false).into();
        assert_eq!(v.into_inner(), Value::Int(0));
    }

    #[test]
    fn test_numeric_conversion() {
        let v: MySQLValue = record_core::Value::Int(-42).into();
        assert_eq!(v.into_inner(), Value::Int(-42));

        let v: MySQLValue = record_core::Value::Float(2.5).into();
        assert_eq!(v.into_inner(), Value::Float(2.5));
    }

    #[test]
    fn test_text_is_not_escaped() {
        let text = "Robert'); DROP TABLE students;--";
        let v: MySQLValue = record_core::Value::Text(text.to_string()).into();
        assert_eq!(v.into_inner(), Value::Bytes(text.as_bytes().to_vec()));
    }

    #[test]
    fn test_null_conversion() {
        let v: MySQLValue = (&record_core::Value::Null).into();
        assert_eq!(v.as_inner(), &Value::NULL);
    }
}
