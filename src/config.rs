//! Persistence selection.
//!
//! Callers pick a backend by name ("memory" or "shelf"); validation happens
//! here, synchronously, never deferred to first use.

use std::path::PathBuf;

use crate::persistence::traits::RepositoryFactory;
use crate::persistence::{InMemoryRepositoryFactory, ShelfRepositoryFactory};

/// Invalid persistence configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("unsupported persistence backend: \"{0}\"")]
    UnsupportedBackend(String),
    #[error("persistence backend \"{0}\" requires a file path")]
    MissingPath(&'static str),
}

/// A validated persistence selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Persistence {
    /// Process-lifetime storage, no path needed.
    Memory,
    /// Durable single-file key-value store at the given path. The file is
    /// created on first write if it does not exist.
    Shelf { path: PathBuf },
}

impl Persistence {
    /// Parse a backend name and optional path.
    pub fn from_options(backend: &str, path: Option<PathBuf>) -> Result<Self, ConfigError> {
        match backend {
            "memory" => Ok(Self::Memory),
            "shelf" => match path {
                Some(path) => Ok(Self::Shelf { path }),
                None => Err(ConfigError::MissingPath("shelf")),
            },
            other => Err(ConfigError::UnsupportedBackend(other.to_string())),
        }
    }

    /// Build a fresh repository factory for this selection. Fresh means
    /// fresh: selecting "memory" while already on "memory" yields a new,
    /// empty backend.
    pub fn build_repository_factory(&self) -> Box<dyn RepositoryFactory> {
        match self {
            Self::Memory => Box::new(InMemoryRepositoryFactory::new()),
            Self::Shelf { path } => Box::new(ShelfRepositoryFactory::new(path.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::UseCaseFactory;

    #[test]
    fn test_memory_needs_no_path() {
        let persistence = Persistence::from_options("memory", None).unwrap();
        assert_eq!(persistence, Persistence::Memory);
    }

    #[test]
    fn test_shelf_requires_path() {
        let err = Persistence::from_options("shelf", None).unwrap_err();
        assert!(matches!(err, ConfigError::MissingPath("shelf")));

        let persistence =
            Persistence::from_options("shelf", Some(PathBuf::from("/tmp/shelf.json"))).unwrap();
        assert!(matches!(persistence, Persistence::Shelf { .. }));
    }

    #[test]
    fn test_unknown_backend_is_rejected() {
        let err = Persistence::from_options("sql", None).unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedBackend(name) if name == "sql"));
    }

    #[test]
    fn test_set_persistence_swaps_backend() {
        let dir = tempfile::tempdir().unwrap();
        let mut factory = UseCaseFactory::default();
        factory.manage_players().add_player("Bob").unwrap();

        factory
            .set_persistence("shelf", Some(dir.path().join("shelf.json")))
            .unwrap();
        assert!(factory.manage_players().list_players().unwrap().is_empty());

        factory.manage_players().add_player("Alice").unwrap();
        // Back to memory: the shelf state is left behind on disk.
        factory.set_persistence("memory", None).unwrap();
        assert!(factory.manage_players().list_players().unwrap().is_empty());
    }

    #[test]
    fn test_reset_to_memory_discards_state() {
        let mut factory = UseCaseFactory::default();
        factory.manage_players().add_player("Bob").unwrap();

        factory.set_persistence("memory", None).unwrap();
        assert!(factory.manage_players().list_players().unwrap().is_empty());
    }

    #[test]
    fn test_invalid_selection_leaves_backend_untouched() {
        let mut factory = UseCaseFactory::default();
        factory.manage_players().add_player("Bob").unwrap();

        assert!(factory.set_persistence("sql", None).is_err());
        assert_eq!(factory.manage_players().list_players().unwrap(), vec!["Bob"]);
    }
}
