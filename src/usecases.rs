//! Use cases: thin orchestration between plain name strings and
//! repositories, plus the factory that wires them to the active backend.

use std::path::PathBuf;
use std::sync::Arc;

use crate::config::{ConfigError, Persistence};
use crate::entities::{Entity, Game, Player};
use crate::persistence::traits::{Repository, RepositoryFactory};
use crate::persistence::{InMemoryRepositoryFactory, RepositoryError};

/// Registering and listing players.
#[derive(Clone)]
pub struct ManagePlayers {
    repo: Arc<dyn Repository<Player>>,
}

impl ManagePlayers {
    pub fn new(repo: Arc<dyn Repository<Player>>) -> Self {
        Self { repo }
    }

    /// Names of all registered players.
    pub fn list_players(&self) -> Result<Vec<String>, RepositoryError> {
        let players = self.repo.get()?;
        Ok(players.iter().map(|p| p.name().to_string()).collect())
    }

    /// Register a player by name. Propagates
    /// [`RepositoryError::AlreadyExists`] unchanged.
    pub fn add_player(&self, name: &str) -> Result<(), RepositoryError> {
        self.repo.add(Player::from_name(name))
    }
}

/// Registering and listing games.
#[derive(Clone)]
pub struct ManageGames {
    repo: Arc<dyn Repository<Game>>,
}

impl ManageGames {
    pub fn new(repo: Arc<dyn Repository<Game>>) -> Self {
        Self { repo }
    }

    pub fn list_games(&self) -> Result<Vec<String>, RepositoryError> {
        let games = self.repo.get()?;
        Ok(games.iter().map(|g| g.name().to_string()).collect())
    }

    pub fn add_game(&self, name: &str) -> Result<(), RepositoryError> {
        self.repo.add(Game::from_name(name))
    }
}

/// Builds use cases bound to the currently active repository factory.
///
/// The active factory is explicit, swappable state: [`set_repo_factory`]
/// replaces it and discards the memoized use cases along with the old
/// backend's live repositories — nothing is migrated.
///
/// [`set_repo_factory`]: UseCaseFactory::set_repo_factory
pub struct UseCaseFactory {
    repo_factory: Box<dyn RepositoryFactory>,
    manage_players: Option<ManagePlayers>,
    manage_games: Option<ManageGames>,
}

impl UseCaseFactory {
    pub fn new(repo_factory: Box<dyn RepositoryFactory>) -> Self {
        Self {
            repo_factory,
            manage_players: None,
            manage_games: None,
        }
    }

    /// Swap the active repository factory. Previously built use cases keep
    /// their old repositories; use cases built after this call see the new
    /// backend.
    pub fn set_repo_factory(&mut self, repo_factory: Box<dyn RepositoryFactory>) {
        self.repo_factory = repo_factory;
        self.manage_players = None;
        self.manage_games = None;
    }

    /// Parse a persistence selection and swap to it in one step.
    pub fn set_persistence(
        &mut self,
        backend: &str,
        path: Option<PathBuf>,
    ) -> Result<(), ConfigError> {
        let persistence = Persistence::from_options(backend, path)?;
        tracing::info!(backend, "switching persistence backend");
        self.set_repo_factory(persistence.build_repository_factory());
        Ok(())
    }

    /// The player use case, built once per active factory.
    pub fn manage_players(&mut self) -> ManagePlayers {
        let repo_factory = &self.repo_factory;
        self.manage_players
            .get_or_insert_with(|| ManagePlayers::new(repo_factory.player_repo()))
            .clone()
    }

    /// The game use case, built once per active factory.
    pub fn manage_games(&mut self) -> ManageGames {
        let repo_factory = &self.repo_factory;
        self.manage_games
            .get_or_insert_with(|| ManageGames::new(repo_factory.game_repo()))
            .clone()
    }
}

impl Default for UseCaseFactory {
    /// Starts on a fresh in-memory backend.
    fn default() -> Self {
        Self::new(Box::new(InMemoryRepositoryFactory::new()))
    }
}
