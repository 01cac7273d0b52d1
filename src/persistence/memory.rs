//! In-memory repositories: process-lifetime storage, insertion order kept.

use std::sync::{Arc, Mutex, OnceLock};

use super::traits::{Repository, RepositoryFactory};
use super::RepositoryError;
use crate::entities::{Entity, Game, Player};

/// List-backed repository. Duplicate detection is a linear scan before
/// append — O(n) per add, fine at this scale.
#[derive(Debug, Default)]
pub struct InMemoryRepository<E> {
    items: Mutex<Vec<E>>,
}

impl<E: Entity> InMemoryRepository<E> {
    pub fn new() -> Self {
        Self {
            items: Mutex::new(Vec::new()),
        }
    }
}

impl<E: Entity> Repository<E> for InMemoryRepository<E> {
    fn add(&self, entity: E) -> Result<(), RepositoryError> {
        let mut items = self.items.lock().unwrap_or_else(|e| e.into_inner());
        if items.iter().any(|item| item.name() == entity.name()) {
            return Err(RepositoryError::AlreadyExists(entity.name().to_string()));
        }
        items.push(entity);
        Ok(())
    }

    fn get(&self) -> Result<Vec<E>, RepositoryError> {
        let items = self.items.lock().unwrap_or_else(|e| e.into_inner());
        Ok(items.clone())
    }
}

/// Factory for in-memory repositories. Each factory instance owns its own
/// stores; building a fresh factory discards all previous state.
#[derive(Debug, Default)]
pub struct InMemoryRepositoryFactory {
    players: OnceLock<Arc<InMemoryRepository<Player>>>,
    games: OnceLock<Arc<InMemoryRepository<Game>>>,
}

impl InMemoryRepositoryFactory {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RepositoryFactory for InMemoryRepositoryFactory {
    fn player_repo(&self) -> Arc<dyn Repository<Player>> {
        self.players
            .get_or_init(|| Arc::new(InMemoryRepository::new()))
            .clone()
    }

    fn game_repo(&self) -> Arc<dyn Repository<Game>> {
        self.games
            .get_or_init(|| Arc::new(InMemoryRepository::new()))
            .clone()
    }
}
