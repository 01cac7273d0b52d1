//! Shelf backend: a single durable JSON key-value file.
//!
//! All collections of a store live in one file as a top-level map of
//! collection key to stored sequence ("players" and "games" are separate
//! keys). Every operation opens, reads/writes and closes the file — there
//! is no long-lived handle, so repeated calls never contend on a lock. The
//! accepted cost is that every write re-serializes the whole map.
//!
//! The read-modify-write cycle is not atomic across processes or threads:
//! two concurrent writers can lose an update. That hazard is documented,
//! not fixed here.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::traits::{Repository, RepositoryFactory};
use super::RepositoryError;
use crate::entities::{Entity, Game, Player};

/// The durable key-value file. Cheap to clone; holds only the path.
#[derive(Debug, Clone)]
pub struct ShelfStore {
    path: PathBuf,
}

impl ShelfStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load_map(&self) -> Result<BTreeMap<String, serde_json::Value>, RepositoryError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let contents = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    fn store_map(
        &self,
        map: &BTreeMap<String, serde_json::Value>,
    ) -> Result<(), RepositoryError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(map)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }

    /// Read the sequence stored under `key`. A missing file or missing key
    /// reads as empty.
    pub fn read<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>, RepositoryError> {
        let map = self.load_map()?;
        match map.get(key) {
            Some(value) => Ok(serde_json::from_value(value.clone())?),
            None => Ok(Vec::new()),
        }
    }

    /// Replace the sequence stored under `key`, rewriting the whole file.
    pub fn write<T: Serialize>(&self, key: &str, items: &[T]) -> Result<(), RepositoryError> {
        let mut map = self.load_map()?;
        map.insert(key.to_string(), serde_json::to_value(items)?);
        self.store_map(&map)
    }
}

/// Repository persisting one collection inside a [`ShelfStore`].
#[derive(Debug)]
pub struct ShelfRepository<E> {
    store: ShelfStore,
    _entity: std::marker::PhantomData<fn() -> E>,
}

impl<E: Entity> ShelfRepository<E> {
    pub fn new(store: ShelfStore) -> Self {
        Self {
            store,
            _entity: std::marker::PhantomData,
        }
    }
}

impl<E: Entity> Repository<E> for ShelfRepository<E> {
    fn add(&self, entity: E) -> Result<(), RepositoryError> {
        let mut items: Vec<E> = self.store.read(E::COLLECTION)?;
        if items.iter().any(|item| item.name() == entity.name()) {
            return Err(RepositoryError::AlreadyExists(entity.name().to_string()));
        }
        items.push(entity);
        self.store.write(E::COLLECTION, &items)
    }

    fn get(&self) -> Result<Vec<E>, RepositoryError> {
        self.store.read(E::COLLECTION)
    }
}

/// Factory for shelf-backed repositories sharing one file.
#[derive(Debug)]
pub struct ShelfRepositoryFactory {
    store: ShelfStore,
    players: OnceLock<Arc<ShelfRepository<Player>>>,
    games: OnceLock<Arc<ShelfRepository<Game>>>,
}

impl ShelfRepositoryFactory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            store: ShelfStore::new(path),
            players: OnceLock::new(),
            games: OnceLock::new(),
        }
    }
}

impl RepositoryFactory for ShelfRepositoryFactory {
    fn player_repo(&self) -> Arc<dyn Repository<Player>> {
        self.players
            .get_or_init(|| Arc::new(ShelfRepository::new(self.store.clone())))
            .clone()
    }

    fn game_repo(&self) -> Arc<dyn Repository<Game>> {
        self.games
            .get_or_init(|| Arc::new(ShelfRepository::new(self.store.clone())))
            .clone()
    }
}
