//! Backend-agnostic table gateway.
//!
//! Presents persistence as named tables of rows, decoupled from the domain
//! model, so repositories can be implemented once against this interface and
//! swapped across backends. Two implementations ship with the crate:
//! [`InMemoryTableGateway`] (testing and default fallback) and
//! [`RemoteTableGateway`] (adapter over a managed key-value table service).

mod memory;
mod remote;

pub use memory::InMemoryTableGateway;
pub use remote::{
    AttributeValue, ClientError, Item, KeyAttribute, RemoteTableGateway, TableSpec,
    TableStoreClient,
};

use std::collections::BTreeMap;

/// A single typed scalar cell. Only string values are supported.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum CellValue {
    Text(String),
}

impl CellValue {
    pub fn as_text(&self) -> &str {
        match self {
            Self::Text(value) => value,
        }
    }
}

/// A row: mapping from column name to cell value.
pub type Row = BTreeMap<String, CellValue>;

/// Scalar column type. Only text columns exist today.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Text,
}

/// Column specification, consumed only at table-creation time.
///
/// `is_primary` marks the columns that form the table's unique key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    pub kind: ColumnKind,
    pub is_primary: bool,
    pub is_indexed: bool,
}

impl Column {
    pub fn text(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ColumnKind::Text,
            is_primary: false,
            is_indexed: false,
        }
    }

    pub fn primary(mut self) -> Self {
        self.is_primary = true;
        self
    }

    pub fn indexed(mut self) -> Self {
        self.is_indexed = true;
        self
    }
}

/// Errors from a table gateway.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("table not found: {0}")]
    TableNotFound(String),
    /// Opaque backend failure (transport, malformed response). Not mapped
    /// further — callers treat it as fatal for the current operation.
    #[error("table store backend error: {0}")]
    Backend(#[source] anyhow::Error),
}

/// Generic gateway to a store of named tables holding rows.
///
/// Contracts:
/// - `create_table` and `remove_table` are idempotent.
/// - `insert`, `scan` and `delete` fail with [`GatewayError::TableNotFound`]
///   when the table does not exist.
/// - `insert` does not enforce row-level uniqueness; a backend may treat the
///   table as a set and silently ignore exact-duplicate rows. Callers must
///   not rely on backend-level dedup for uniqueness guarantees.
/// - `delete` of a row that is not present is a no-op.
pub trait TableGateway: Send + Sync {
    /// Names of currently existing tables.
    fn list_tables(&self) -> Result<Vec<String>, GatewayError>;

    /// Create a table. No-op if a table with this name already exists.
    fn create_table(&self, name: &str, columns: &[Column]) -> Result<(), GatewayError>;

    /// Remove a table. No-op if it does not exist.
    fn remove_table(&self, name: &str) -> Result<(), GatewayError>;

    /// Insert a row into an existing table.
    fn insert(&self, table: &str, row: Row) -> Result<(), GatewayError>;

    /// All rows currently in the table.
    fn scan(&self, table: &str) -> Result<Vec<Row>, GatewayError>;

    /// Delete a matching row from an existing table.
    fn delete(&self, table: &str, row: &Row) -> Result<(), GatewayError>;
}

/// Convenience constructor for single-cell rows keyed by column name.
pub fn text_row(column: impl Into<String>, value: impl Into<String>) -> Row {
    let mut row = Row::new();
    row.insert(column.into(), CellValue::Text(value.into()));
    row
}
