//! Testing utilities
//!
//! - [`MemoryDatabase`]: in-process backend with a statement log
//! - [`MySQLContainer`]: Docker-managed MySQL server for end-to-end tests

pub mod container;
pub mod memory;

pub use container::MySQLContainer;
pub use memory::{MemoryConnection, MemoryDatabase, Statement, StatementKind};
