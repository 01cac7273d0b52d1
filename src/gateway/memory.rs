//! In-memory table gateway: a map of table name to row list.
//!
//! Holds no real persistence; rows live for the lifetime of the instance.
//! Used as the test double for gateway-backed repositories and as the
//! default fallback backend.

use std::collections::BTreeMap;
use std::sync::Mutex;

use super::{Column, GatewayError, Row, TableGateway};

#[derive(Debug, Default)]
pub struct InMemoryTableGateway {
    tables: Mutex<BTreeMap<String, Vec<Row>>>,
}

impl InMemoryTableGateway {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TableGateway for InMemoryTableGateway {
    fn list_tables(&self) -> Result<Vec<String>, GatewayError> {
        let tables = self.tables.lock().unwrap_or_else(|e| e.into_inner());
        Ok(tables.keys().cloned().collect())
    }

    fn create_table(&self, name: &str, _columns: &[Column]) -> Result<(), GatewayError> {
        let mut tables = self.tables.lock().unwrap_or_else(|e| e.into_inner());
        tables.entry(name.to_string()).or_default();
        Ok(())
    }

    fn remove_table(&self, name: &str) -> Result<(), GatewayError> {
        let mut tables = self.tables.lock().unwrap_or_else(|e| e.into_inner());
        tables.remove(name);
        Ok(())
    }

    fn insert(&self, table: &str, row: Row) -> Result<(), GatewayError> {
        let mut tables = self.tables.lock().unwrap_or_else(|e| e.into_inner());
        let rows = tables
            .get_mut(table)
            .ok_or_else(|| GatewayError::TableNotFound(table.to_string()))?;
        // Set semantics: an exact-duplicate row is silently ignored.
        if !rows.contains(&row) {
            rows.push(row);
        }
        Ok(())
    }

    fn scan(&self, table: &str) -> Result<Vec<Row>, GatewayError> {
        let tables = self.tables.lock().unwrap_or_else(|e| e.into_inner());
        let rows = tables
            .get(table)
            .ok_or_else(|| GatewayError::TableNotFound(table.to_string()))?;
        Ok(rows.clone())
    }

    fn delete(&self, table: &str, row: &Row) -> Result<(), GatewayError> {
        let mut tables = self.tables.lock().unwrap_or_else(|e| e.into_inner());
        let rows = tables
            .get_mut(table)
            .ok_or_else(|| GatewayError::TableNotFound(table.to_string()))?;
        if let Some(position) = rows.iter().position(|candidate| candidate == row) {
            rows.remove(position);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::text_row;

    fn name_column() -> Vec<Column> {
        vec![Column::text("name").primary()]
    }

    #[test]
    fn test_list_tables_starts_empty() {
        let gateway = InMemoryTableGateway::new();
        assert!(gateway.list_tables().unwrap().is_empty());
    }

    #[test]
    fn test_insert_without_table_fails() {
        let gateway = InMemoryTableGateway::new();
        let err = gateway
            .insert("missing", text_row("name", "Player1"))
            .unwrap_err();
        assert!(matches!(err, GatewayError::TableNotFound(name) if name == "missing"));
    }

    #[test]
    fn test_scan_and_delete_without_table_fail() {
        let gateway = InMemoryTableGateway::new();
        assert!(matches!(
            gateway.scan("missing"),
            Err(GatewayError::TableNotFound(_))
        ));
        assert!(matches!(
            gateway.delete("missing", &text_row("name", "Player1")),
            Err(GatewayError::TableNotFound(_))
        ));
    }

    #[test]
    fn test_add_get_delete_roundtrip() {
        let gateway = InMemoryTableGateway::new();
        gateway.create_table("scores", &name_column()).unwrap();

        let row = text_row("name", "Player1");
        gateway.insert("scores", row.clone()).unwrap();
        assert!(gateway.list_tables().unwrap().contains(&"scores".to_string()));
        assert_eq!(gateway.scan("scores").unwrap(), vec![row.clone()]);

        gateway.delete("scores", &row).unwrap();
        assert!(gateway.scan("scores").unwrap().is_empty());
    }

    #[test]
    fn test_create_table_twice_preserves_rows() {
        let gateway = InMemoryTableGateway::new();
        gateway.create_table("scores", &name_column()).unwrap();
        gateway.insert("scores", text_row("name", "Player1")).unwrap();

        gateway.create_table("scores", &name_column()).unwrap();
        assert_eq!(gateway.scan("scores").unwrap().len(), 1);
    }

    #[test]
    fn test_remove_missing_table_is_noop() {
        let gateway = InMemoryTableGateway::new();
        gateway.remove_table("missing").unwrap();
    }

    #[test]
    fn test_duplicate_row_is_ignored() {
        let gateway = InMemoryTableGateway::new();
        gateway.create_table("scores", &name_column()).unwrap();
        gateway.insert("scores", text_row("name", "Player1")).unwrap();
        gateway.insert("scores", text_row("name", "Player1")).unwrap();
        assert_eq!(gateway.scan("scores").unwrap().len(), 1);
    }

    #[test]
    fn test_delete_missing_row_is_noop() {
        let gateway = InMemoryTableGateway::new();
        gateway.create_table("scores", &name_column()).unwrap();
        gateway
            .delete("scores", &text_row("name", "Player1"))
            .unwrap();
    }
}
