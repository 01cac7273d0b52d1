//! Domain entities: named value objects compared by name.
//!
//! `Player` and `Game` are deliberately minimal — a name is the whole
//! identity. Both serialize transparently as their name string, so a stored
//! collection is a plain sequence of names.

use serde::{Deserialize, Serialize};

/// Seam between the entity model and the generic storage layers.
///
/// Implemented by [`Player`] and [`Game`] so the shelf and table
/// repositories can be written once and instantiated per entity type.
pub trait Entity:
    Clone + PartialEq + Serialize + serde::de::DeserializeOwned + Send + Sync + 'static
{
    /// Collection key this entity type is stored under ("players", "games").
    /// Also the default table name for table-backed repositories.
    const COLLECTION: &'static str;

    fn name(&self) -> &str;

    fn from_name(name: impl Into<String>) -> Self;
}

/// A registered player, unique by name within the player collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Player {
    name: String,
}

impl Player {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Entity for Player {
    const COLLECTION: &'static str = "players";

    fn name(&self) -> &str {
        &self.name
    }

    fn from_name(name: impl Into<String>) -> Self {
        Self::new(name)
    }
}

/// A registered game. Same shape as [`Player`], independent collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Game {
    name: String,
}

impl Game {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Entity for Game {
    const COLLECTION: &'static str = "games";

    fn name(&self) -> &str {
        &self.name
    }

    fn from_name(name: impl Into<String>) -> Self {
        Self::new(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality_is_by_name() {
        let a = Player::new("John");
        let b = Player::new("John");
        let c = Player::new("Jane");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_name_is_case_sensitive() {
        assert_ne!(Player::new("john"), Player::new("John"));
    }

    #[test]
    fn test_serializes_as_plain_name() {
        let player = Player::new("Bob");
        let json = serde_json::to_string(&player).unwrap();
        assert_eq!(json, "\"Bob\"");
        let back: Player = serde_json::from_str(&json).unwrap();
        assert_eq!(back, player);
    }

    #[test]
    fn test_collections_are_distinct() {
        assert_eq!(Player::COLLECTION, "players");
        assert_eq!(Game::COLLECTION, "games");
    }
}
