//! Gateway-backed repositories: the conversion layer between the domain
//! model and a generic table store.
//!
//! A repository owns a fixed table name (defaulting to the entity's
//! collection name) and a single primary text column `name`. Tables are
//! created lazily on the first write, so no provisioning step is needed.

use std::marker::PhantomData;
use std::sync::{Arc, OnceLock};

use super::traits::{Repository, RepositoryFactory};
use super::RepositoryError;
use crate::entities::{Entity, Game, Player};
use crate::gateway::{CellValue, Column, GatewayError, Row, TableGateway};

const NAME_COLUMN: &str = "name";

/// Repository over a [`TableGateway`], one table per entity type.
pub struct TableRepository<E> {
    gateway: Arc<dyn TableGateway>,
    table: String,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Entity> TableRepository<E> {
    /// Repository on the entity's default table name.
    pub fn new(gateway: Arc<dyn TableGateway>) -> Self {
        Self::with_table_name(gateway, E::COLLECTION)
    }

    /// Repository on an explicit table name. Used when several deployments
    /// share one table store, and by tests to stay off the real tables.
    pub fn with_table_name(gateway: Arc<dyn TableGateway>, table: impl Into<String>) -> Self {
        Self {
            gateway,
            table: table.into(),
            _entity: PhantomData,
        }
    }

    pub fn table_name(&self) -> &str {
        &self.table
    }

    fn key_columns() -> Vec<Column> {
        vec![Column::text(NAME_COLUMN).primary()]
    }

    fn to_row(entity: &E) -> Row {
        let mut row = Row::new();
        row.insert(
            NAME_COLUMN.to_string(),
            CellValue::Text(entity.name().to_string()),
        );
        row
    }

    fn from_row(&self, row: Row) -> Result<E, RepositoryError> {
        let value = row
            .get(NAME_COLUMN)
            .ok_or_else(|| RepositoryError::MissingColumn {
                table: self.table.clone(),
                column: NAME_COLUMN.to_string(),
            })?;
        Ok(E::from_name(value.as_text()))
    }
}

impl<E: Entity> Repository<E> for TableRepository<E> {
    fn add(&self, entity: E) -> Result<(), RepositoryError> {
        let current = self.get()?;
        if current.iter().any(|item| item.name() == entity.name()) {
            return Err(RepositoryError::AlreadyExists(entity.name().to_string()));
        }

        let row = Self::to_row(&entity);
        match self.gateway.insert(&self.table, row.clone()) {
            Err(GatewayError::TableNotFound(_)) => {
                // Lazy create on first write, then retry exactly once.
                tracing::debug!(table = %self.table, "table missing, creating before first write");
                self.gateway.create_table(&self.table, &Self::key_columns())?;
                self.gateway.insert(&self.table, row)?;
                Ok(())
            }
            result => Ok(result?),
        }
    }

    fn get(&self) -> Result<Vec<E>, RepositoryError> {
        // Table absence is not an error for reads: an unprovisioned
        // repository is simply empty.
        if !self
            .gateway
            .list_tables()?
            .iter()
            .any(|table| table == &self.table)
        {
            return Ok(Vec::new());
        }
        self.gateway
            .scan(&self.table)?
            .into_iter()
            .map(|row| self.from_row(row))
            .collect()
    }
}

/// Factory for table-store repositories sharing one gateway.
pub struct TableStoreRepositoryFactory {
    gateway: Arc<dyn TableGateway>,
    players: OnceLock<Arc<TableRepository<Player>>>,
    games: OnceLock<Arc<TableRepository<Game>>>,
}

impl TableStoreRepositoryFactory {
    pub fn new(gateway: Arc<dyn TableGateway>) -> Self {
        Self {
            gateway,
            players: OnceLock::new(),
            games: OnceLock::new(),
        }
    }
}

impl RepositoryFactory for TableStoreRepositoryFactory {
    fn player_repo(&self) -> Arc<dyn Repository<Player>> {
        self.players
            .get_or_init(|| Arc::new(TableRepository::new(self.gateway.clone())))
            .clone()
    }

    fn game_repo(&self) -> Arc<dyn Repository<Game>> {
        self.games
            .get_or_init(|| Arc::new(TableRepository::new(self.gateway.clone())))
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::InMemoryTableGateway;

    fn test_repo() -> TableRepository<Player> {
        TableRepository::with_table_name(
            Arc::new(InMemoryTableGateway::new()),
            "__testing_players",
        )
    }

    #[test]
    fn test_get_without_table_returns_empty() {
        let repo = test_repo();
        assert!(repo.get().unwrap().is_empty());
    }

    #[test]
    fn test_add_creates_table_lazily() {
        let gateway = Arc::new(InMemoryTableGateway::new());
        let repo = TableRepository::<Player>::new(gateway.clone());

        repo.add(Player::new("John")).unwrap();

        assert!(gateway.list_tables().unwrap().contains(&"players".to_string()));
        assert_eq!(repo.get().unwrap(), vec![Player::new("John")]);
    }

    #[test]
    fn test_duplicate_name_raises() {
        let repo = test_repo();
        repo.add(Player::new("John")).unwrap();

        let err = repo.add(Player::new("John")).unwrap_err();
        assert!(matches!(err, RepositoryError::AlreadyExists(name) if name == "John"));

        let another_john = Player::new("John");
        assert!(repo.add(another_john).is_err());
        assert_eq!(repo.get().unwrap().len(), 1);
    }

    #[test]
    fn test_table_name_is_overridable() {
        let repo = test_repo();
        assert_eq!(repo.table_name(), "__testing_players");
        repo.add(Player::new("John")).unwrap();
        assert_eq!(repo.get().unwrap().len(), 1);
    }

    #[test]
    fn test_default_table_names_per_entity() {
        let gateway: Arc<dyn TableGateway> = Arc::new(InMemoryTableGateway::new());
        assert_eq!(TableRepository::<Player>::new(gateway.clone()).table_name(), "players");
        assert_eq!(TableRepository::<Game>::new(gateway).table_name(), "games");
    }

    #[test]
    fn test_row_missing_name_column_is_an_error() {
        let gateway = Arc::new(InMemoryTableGateway::new());
        gateway
            .create_table("players", &[Column::text("name").primary()])
            .unwrap();
        gateway
            .insert("players", crate::gateway::text_row("nickname", "Bob"))
            .unwrap();

        let repo = TableRepository::<Player>::new(gateway);
        let err = repo.get().unwrap_err();
        assert!(matches!(err, RepositoryError::MissingColumn { .. }));
    }

    #[test]
    fn test_factory_memoizes_and_shares_gateway() {
        let gateway = Arc::new(InMemoryTableGateway::new());
        let factory = TableStoreRepositoryFactory::new(gateway);

        let first = factory.player_repo();
        let second = factory.player_repo();
        assert!(Arc::ptr_eq(&first, &second));

        first.add(Player::new("Bob")).unwrap();
        assert_eq!(second.get().unwrap().len(), 1);
        // Games live in their own table on the same gateway.
        assert!(factory.game_repo().get().unwrap().is_empty());
    }
}
