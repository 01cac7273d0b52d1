//! Adapter from the table-gateway abstraction to a managed remote
//! key-value table service.
//!
//! The wire client is an opaque capability behind [`TableStoreClient`];
//! authentication, retries and transport are its problem. This module only
//! translates between the gateway vocabulary (rows, column specs) and the
//! service vocabulary (items, attribute values, table specs), and maps the
//! service's "resource not found" condition onto
//! [`GatewayError::TableNotFound`].

use std::collections::BTreeMap;

use super::{CellValue, Column, GatewayError, Row, TableGateway};

/// Wire-level scalar value. `S` is the service's tag for string attributes,
/// the only type this crate stores.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeValue {
    S(String),
}

/// Wire-level item: attribute name to attribute value.
pub type Item = BTreeMap<String, AttributeValue>;

/// One attribute of a table's key schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyAttribute {
    pub name: String,
    /// Scalar type tag as the service understands it ("S" for string).
    pub attribute_type: String,
    pub is_key: bool,
}

/// Creation-time description of a remote table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSpec {
    pub name: String,
    pub attributes: Vec<KeyAttribute>,
}

/// Errors surfaced by a [`TableStoreClient`].
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The addressed table does not exist on the service.
    #[error("resource not found")]
    ResourceNotFound,
    /// Anything else: transport failure, throttling, malformed response.
    #[error(transparent)]
    Transport(#[from] anyhow::Error),
}

/// Opaque wire client for a managed key-value table service.
///
/// Implementations are expected to map their service's specific
/// "resource not found" error code to [`ClientError::ResourceNotFound`] and
/// wrap everything else in [`ClientError::Transport`].
#[cfg_attr(test, mockall::automock)]
pub trait TableStoreClient: Send + Sync {
    fn list_tables(&self) -> Result<Vec<String>, ClientError>;
    fn create_table(&self, spec: &TableSpec) -> Result<(), ClientError>;
    fn delete_table(&self, name: &str) -> Result<(), ClientError>;
    fn put_item(&self, table: &str, item: Item) -> Result<(), ClientError>;
    fn scan(&self, table: &str) -> Result<Vec<Item>, ClientError>;
    fn delete_item(&self, table: &str, key: Item) -> Result<(), ClientError>;
}

/// [`TableGateway`] implementation over a [`TableStoreClient`].
pub struct RemoteTableGateway<C> {
    client: C,
}

impl<C: TableStoreClient> RemoteTableGateway<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    fn map_err(table: &str, error: ClientError) -> GatewayError {
        match error {
            ClientError::ResourceNotFound => GatewayError::TableNotFound(table.to_string()),
            ClientError::Transport(source) => GatewayError::Backend(source),
        }
    }

    fn backend_err(error: ClientError) -> GatewayError {
        match error {
            ClientError::Transport(source) => GatewayError::Backend(source),
            other => GatewayError::Backend(anyhow::Error::new(other)),
        }
    }
}

fn build_table_spec(name: &str, columns: &[Column]) -> TableSpec {
    let attributes = columns
        .iter()
        .map(|column| KeyAttribute {
            name: column.name.clone(),
            attribute_type: "S".to_string(),
            is_key: column.is_primary,
        })
        .collect();
    TableSpec {
        name: name.to_string(),
        attributes,
    }
}

fn row_to_item(row: &Row) -> Item {
    row.iter()
        .map(|(column, value)| {
            let CellValue::Text(text) = value;
            (column.clone(), AttributeValue::S(text.clone()))
        })
        .collect()
}

fn item_to_row(item: Item) -> Row {
    item.into_iter()
        .map(|(attribute, value)| {
            let AttributeValue::S(text) = value;
            (attribute, CellValue::Text(text))
        })
        .collect()
}

impl<C: TableStoreClient> TableGateway for RemoteTableGateway<C> {
    fn list_tables(&self) -> Result<Vec<String>, GatewayError> {
        self.client.list_tables().map_err(Self::backend_err)
    }

    fn create_table(&self, name: &str, columns: &[Column]) -> Result<(), GatewayError> {
        if self.list_tables()?.iter().any(|table| table == name) {
            return Ok(());
        }
        tracing::debug!(table = name, "creating remote table");
        let spec = build_table_spec(name, columns);
        self.client
            .create_table(&spec)
            .map_err(Self::backend_err)
    }

    fn remove_table(&self, name: &str) -> Result<(), GatewayError> {
        if !self.list_tables()?.iter().any(|table| table == name) {
            return Ok(());
        }
        tracing::debug!(table = name, "removing remote table");
        self.client.delete_table(name).map_err(Self::backend_err)
    }

    fn insert(&self, table: &str, row: Row) -> Result<(), GatewayError> {
        self.client
            .put_item(table, row_to_item(&row))
            .map_err(|error| Self::map_err(table, error))
    }

    fn scan(&self, table: &str) -> Result<Vec<Row>, GatewayError> {
        let items = self
            .client
            .scan(table)
            .map_err(|error| Self::map_err(table, error))?;
        Ok(items.into_iter().map(item_to_row).collect())
    }

    fn delete(&self, table: &str, row: &Row) -> Result<(), GatewayError> {
        self.client
            .delete_item(table, row_to_item(row))
            .map_err(|error| Self::map_err(table, error))
    }
}
