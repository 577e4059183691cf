//! Core types for dbify.
//!
//! This crate provides the foundational types shared by the MySQL type
//! crate and the schema synchronization engine:
//!
//! - [`Value`] - Closed union of the values a record may carry
//! - [`Record`] - Ordered, uniquely-named fields to persist as one row
//! - [`ColumnType`] - Canonical column type tags and type inference
//! - [`TableSchema`] - Live table shape as read back from the database
//!
//! # Architecture
//!
//! ```text
//! record-core (this crate)
//!    │
//!    ├─── mysql-types   (DDL, parameter conversion, declared type parsing)
//!    │
//!    └─── schema-sync   (initializer, migrator, inserter, synchronizer)
//! ```
//!
//! # Example
//!
//! ```rust
//! use record_core::{ColumnType, Record, Value};
//!
//! let record = Record::builder()
//!     .field("name", "Alice")
//!     .field("age", 30)
//!     .field("nickname", Value::Null)
//!     .build()
//!     .unwrap();
//!
//! let record = record.without_nulls();
//! assert_eq!(record.field_names(), vec!["name", "age"]);
//! assert_eq!(
//!     ColumnType::infer("age", record.get("age").unwrap()).unwrap(),
//!     ColumnType::Int
//! );
//! ```

pub mod error;
pub mod json;
pub mod schema;
pub mod types;
pub mod values;

// Re-exports for convenience
pub use error::RecordError;
pub use schema::{is_reserved, Column, LiveColumn, TableSchema, RESERVED_COLUMNS};
pub use types::ColumnType;
pub use values::{Record, RecordBuilder, Value};
