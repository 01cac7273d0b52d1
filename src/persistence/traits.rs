//! Repository trait definitions.
//!
//! One generic contract abstracts over the entity type, allowing the
//! in-memory, shelf-file and table-store backends to be used
//! interchangeably behind `Arc<dyn Repository<E>>`.

use std::sync::Arc;

use super::RepositoryError;
use crate::entities::{Entity, Game, Player};

/// Storage boundary for one entity type.
///
/// There is deliberately no update or delete: entities are add-only at this
/// layer, and enumeration is the only read.
pub trait Repository<E: Entity>: Send + Sync {
    /// Insert an entity.
    ///
    /// Fails with [`RepositoryError::AlreadyExists`] when an entity with the
    /// same name is present. The check reads the full current collection
    /// fresh from the backend, never a cache.
    fn add(&self, entity: E) -> Result<(), RepositoryError>;

    /// All entities currently stored. Order is backend-defined: the
    /// in-memory and shelf backends preserve insertion order, the table
    /// backend does not promise one.
    fn get(&self) -> Result<Vec<E>, RepositoryError>;
}

/// Builds the pair of repositories for one backend.
///
/// Builders are memoized: repeated calls on the same factory instance
/// return the same repository, so use cases constructed at different times
/// share state.
pub trait RepositoryFactory {
    fn player_repo(&self) -> Arc<dyn Repository<Player>>;
    fn game_repo(&self) -> Arc<dyn Repository<Game>>;
}
