//! In-memory database for exercising the engine without a server.
//!
//! Mirrors the MySQL behavior the engine relies on: describing a missing
//! table yields no columns, column names compare case-insensitively,
//! `ALTER TABLE` is all-or-nothing and rejects existing columns, inserted
//! rows stay invisible until commit. Every statement is logged, failures can
//! be injected per statement kind and a hook can play a concurrent writer
//! right before the next `ADD COLUMN`.

use crate::connection::{ConnectionProvider, SchemaConnection};
use crate::error::ExecutionError;
use async_trait::async_trait;
use mysql_types::{MySQLDdl, ToDdl};
use record_core::{Column, LiveColumn, Record, TableSchema, Value};
use std::collections::{BTreeMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};

/// Kind of a logged statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    Describe,
    CreateTable,
    AddColumns,
    Insert,
    Commit,
    Rollback,
}

/// A statement as received by the in-memory database.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Describe { table: String },
    CreateTable { table: String },
    AddColumns { table: String, columns: Vec<Column> },
    Insert {
        table: String,
        fields: Vec<(String, Value)>,
    },
    Commit,
    Rollback,
}

impl Statement {
    pub fn kind(&self) -> StatementKind {
        match self {
            Self::Describe { .. } => StatementKind::Describe,
            Self::CreateTable { .. } => StatementKind::CreateTable,
            Self::AddColumns { .. } => StatementKind::AddColumns,
            Self::Insert { .. } => StatementKind::Insert,
            Self::Commit => StatementKind::Commit,
            Self::Rollback => StatementKind::Rollback,
        }
    }
}

type Hook = Box<dyn FnOnce(&MemoryDatabase) + Send>;

#[derive(Default)]
struct MemoryTable {
    columns: Vec<LiveColumn>,
    rows: Vec<Record>,
}

impl MemoryTable {
    fn with_reserved_columns() -> Self {
        Self {
            columns: vec![
                LiveColumn::new("id", "int"),
                LiveColumn::new("created", "datetime"),
            ],
            rows: Vec::new(),
        }
    }

    /// Column names compare case-insensitively, as in MySQL.
    fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name.eq_ignore_ascii_case(name))
    }
}

#[derive(Default)]
struct State {
    tables: BTreeMap<String, MemoryTable>,
    statements: Vec<Statement>,
    failures: VecDeque<(StatementKind, ExecutionError)>,
    add_columns_hooks: VecDeque<Hook>,
    acquired: usize,
    released: usize,
}

impl State {
    /// Log a statement and return the injected failure for it, if any.
    fn record(&mut self, statement: Statement) -> Result<(), ExecutionError> {
        let kind = statement.kind();
        self.statements.push(statement);
        match self.failures.iter().position(|(k, _)| *k == kind) {
            Some(index) => match self.failures.remove(index) {
                Some((_, err)) => Err(err),
                None => Ok(()),
            },
            None => Ok(()),
        }
    }
}

/// Shared in-memory database; clones share the same state.
#[derive(Clone, Default)]
pub struct MemoryDatabase {
    state: Arc<Mutex<State>>,
}

impl MemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Create a table with its reserved columns, without logging a statement.
    pub fn create_table(&self, table: &str) {
        self.lock()
            .tables
            .entry(table.to_string())
            .or_insert_with(MemoryTable::with_reserved_columns);
    }

    /// Add a column directly, as another writer would. Creates the table if needed.
    pub fn add_column(&self, table: &str, name: &str, declared_type: &str) {
        let mut state = self.lock();
        let table = state
            .tables
            .entry(table.to_string())
            .or_insert_with(MemoryTable::with_reserved_columns);
        if !table.has_column(name) {
            table.columns.push(LiveColumn::new(name, declared_type));
        }
    }

    /// Live schema of a table, `None` if it does not exist.
    pub fn schema(&self, table: &str) -> Option<TableSchema> {
        self.lock()
            .tables
            .get(table)
            .map(|t| TableSchema::new(t.columns.clone()))
    }

    pub fn table_names(&self) -> Vec<String> {
        self.lock().tables.keys().cloned().collect()
    }

    /// Committed rows of a table, reserved columns excluded.
    pub fn rows(&self, table: &str) -> Vec<Record> {
        self.lock()
            .tables
            .get(table)
            .map(|t| t.rows.clone())
            .unwrap_or_default()
    }

    /// Every statement received so far, in order.
    pub fn statements(&self) -> Vec<Statement> {
        self.lock().statements.clone()
    }

    pub fn count_statements(&self, kind: StatementKind) -> usize {
        self.lock()
            .statements
            .iter()
            .filter(|s| s.kind() == kind)
            .count()
    }

    pub fn clear_statements(&self) {
        self.lock().statements.clear();
    }

    /// Make the next statement of `kind` fail with `error`.
    pub fn fail_next(&self, kind: StatementKind, error: ExecutionError) {
        self.lock().failures.push_back((kind, error));
    }

    /// Run `hook` right before the next `ADD COLUMN` statement is applied.
    pub fn before_next_add_columns(&self, hook: impl FnOnce(&MemoryDatabase) + Send + 'static) {
        self.lock().add_columns_hooks.push_back(Box::new(hook));
    }

    /// Connections acquired and not yet dropped.
    pub fn open_connections(&self) -> usize {
        let state = self.lock();
        state.acquired - state.released
    }
}

#[async_trait]
impl ConnectionProvider for MemoryDatabase {
    type Connection = MemoryConnection;

    async fn acquire(&self) -> Result<MemoryConnection, ExecutionError> {
        self.lock().acquired += 1;
        Ok(MemoryConnection {
            db: self.clone(),
            pending: Vec::new(),
        })
    }
}

/// Connection to a [`MemoryDatabase`]; holds uncommitted rows.
pub struct MemoryConnection {
    db: MemoryDatabase,
    pending: Vec<(String, Record)>,
}

impl Drop for MemoryConnection {
    fn drop(&mut self) {
        self.db.lock().released += 1;
    }
}

#[async_trait]
impl SchemaConnection for MemoryConnection {
    async fn describe_table(&mut self, table: &str) -> Result<TableSchema, ExecutionError> {
        let mut state = self.db.lock();
        state.record(Statement::Describe {
            table: table.to_string(),
        })?;
        Ok(state
            .tables
            .get(table)
            .map(|t| TableSchema::new(t.columns.clone()))
            .unwrap_or_default())
    }

    async fn create_table_if_absent(&mut self, table: &str) -> Result<(), ExecutionError> {
        let mut state = self.db.lock();
        state.record(Statement::CreateTable {
            table: table.to_string(),
        })?;
        state
            .tables
            .entry(table.to_string())
            .or_insert_with(MemoryTable::with_reserved_columns);
        Ok(())
    }

    async fn add_columns(&mut self, table: &str, columns: &[Column]) -> Result<(), ExecutionError> {
        let hook = self.db.lock().add_columns_hooks.pop_front();
        if let Some(hook) = hook {
            hook(&self.db);
        }

        let mut state = self.db.lock();
        state.record(Statement::AddColumns {
            table: table.to_string(),
            columns: columns.to_vec(),
        })?;

        let live = state
            .tables
            .get_mut(table)
            .ok_or_else(|| ExecutionError::Rejected(format!("Table '{table}' doesn't exist")))?;
        let repeated = columns.iter().enumerate().find(|(i, c)| {
            live.has_column(&c.name)
                || columns[..*i]
                    .iter()
                    .any(|prev| prev.name.eq_ignore_ascii_case(&c.name))
        });
        if let Some((_, existing)) = repeated {
            return Err(ExecutionError::DuplicateColumn {
                column: existing.name.clone(),
            });
        }
        for column in columns {
            let declared = MySQLDdl.to_ddl(&column.column_type).to_lowercase();
            live.columns.push(LiveColumn::new(&column.name, declared));
        }
        Ok(())
    }

    async fn execute_insert(&mut self, table: &str, record: &Record) -> Result<(), ExecutionError> {
        let mut state = self.db.lock();
        state.record(Statement::Insert {
            table: table.to_string(),
            fields: record.clone().into_fields(),
        })?;

        let live = state
            .tables
            .get(table)
            .ok_or_else(|| ExecutionError::Rejected(format!("Table '{table}' doesn't exist")))?;
        if let Some(name) = record.field_names().into_iter().find(|n| !live.has_column(n)) {
            return Err(ExecutionError::Rejected(format!(
                "Unknown column '{name}' in 'field list'"
            )));
        }

        self.pending.push((table.to_string(), record.clone()));
        Ok(())
    }

    async fn commit(&mut self) -> Result<(), ExecutionError> {
        let mut state = self.db.lock();
        state.record(Statement::Commit)?;
        for (table, record) in self.pending.drain(..) {
            if let Some(live) = state.tables.get_mut(&table) {
                live.rows.push(record);
            }
        }
        Ok(())
    }

    async fn rollback(&mut self) -> Result<(), ExecutionError> {
        let mut state = self.db.lock();
        state.record(Statement::Rollback)?;
        self.pending.clear();
        Ok(())
    }
}
