//! matchbook: a player and game registry with swappable persistence.
//!
//! Two registries — players and games — sit behind a uniform repository
//! contract (add with uniqueness enforcement, full enumeration) implemented
//! over three backends:
//!
//! - in-memory, process lifetime only;
//! - a shelf file: one durable JSON key-value file holding both collections;
//! - a remote managed-table store, reached through the backend-agnostic
//!   [`gateway::TableGateway`] abstraction.
//!
//! Factories compose the layers so call sites select a backend without
//! touching business logic:
//!
//! ```
//! use matchbook::UseCaseFactory;
//!
//! let mut factory = UseCaseFactory::default(); // in-memory
//! let players = factory.manage_players();
//! players.add_player("Bob")?;
//! players.add_player("Alice")?;
//! assert_eq!(players.list_players()?.len(), 2);
//!
//! // Switch to durable storage; the in-memory state is discarded.
//! let dir = tempfile::tempdir().unwrap();
//! factory.set_persistence("shelf", Some(dir.path().join("registry.json")))?;
//! assert!(factory.manage_players().list_players()?.is_empty());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod entities;
pub mod gateway;
pub mod persistence;
pub mod usecases;

pub use config::{ConfigError, Persistence};
pub use entities::{Entity, Game, Player};
pub use persistence::traits::{Repository, RepositoryFactory};
pub use persistence::{
    InMemoryRepository, InMemoryRepositoryFactory, RepositoryError, ShelfRepository,
    ShelfRepositoryFactory, ShelfStore, TableRepository, TableStoreRepositoryFactory,
};
pub use usecases::{ManageGames, ManagePlayers, UseCaseFactory};
