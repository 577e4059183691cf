//! MySQL type conversions for dbify record types.
//!
//! # Structure
//!
//! - `forward`: Convert `record_core::Value` → `MySQLValue` (bound INSERT parameters)
//! - `ddl`: Generate MySQL DDL/DML from `ColumnType` and column lists
//! - `schema`: Parse declared column types reported by the server
//!
//! # Example
//!
//! ```rust
//! use mysql_types::{base_type, MySQLDdl, MySQLValue, ToDdl};
//! use record_core::{ColumnType, Value};
//!
//! // Forward conversion
//! let mysql_value: MySQLValue = Value::Bool(true).into();
//! assert_eq!(mysql_value.into_inner(), mysql_async::Value::Int(1));
//!
//! // DDL generation
//! let ddl = MySQLDdl;
//! assert_eq!(ddl.to_ddl(&ColumnType::VarChar), "VARCHAR(255)");
//!
//! // Declared type parsing
//! assert_eq!(base_type("int(11) unsigned"), "int");
//! ```

pub mod ddl;
pub mod forward;
pub mod schema;

pub use ddl::{quote_identifier, MySQLDdl, ToDdl};
pub use forward::MySQLValue;
pub use schema::{base_type, is_compatible};
