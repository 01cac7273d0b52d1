//! Repositories: per-entity storage boundaries over swappable backends.

pub mod traits;

mod memory;
mod shelf;
mod table;

pub use memory::{InMemoryRepository, InMemoryRepositoryFactory};
pub use shelf::{ShelfRepository, ShelfRepositoryFactory, ShelfStore};
pub use table::{TableRepository, TableStoreRepositoryFactory};

use crate::gateway::GatewayError;

/// Errors from the repository layer.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// Uniqueness violation: an entity with this name is already stored.
    #[error("\"{0}\" is already registered")]
    AlreadyExists(String),
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// A table backend returned a row without the expected column.
    #[error("row in table \"{table}\" is missing column \"{column}\"")]
    MissingColumn { table: String, column: String },
}
