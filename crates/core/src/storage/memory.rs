//! In-memory table store.
//!
//! Backs the server binary in development and every test. Rows live in a
//! single map behind an async `RwLock`; each write mints a fresh [`Etag`].

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{Etag, StorageError, TableRow, TableStore};

type Key = (String, String);

/// Table store holding all rows in process memory.
#[derive(Default)]
pub struct MemoryTableStore {
    rows: RwLock<BTreeMap<Key, (Etag, serde_json::Value)>>,
}

impl MemoryTableStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TableStore for MemoryTableStore {
    async fn insert(
        &self,
        partition: &str,
        row_key: &str,
        body: serde_json::Value,
    ) -> Result<Etag, StorageError> {
        let mut rows = self.rows.write().await;
        let key = (partition.to_owned(), row_key.to_owned());
        if rows.contains_key(&key) {
            return Err(StorageError::Conflict);
        }
        let etag = Etag::generate();
        rows.insert(key, (etag.clone(), body));
        Ok(etag)
    }

    async fn get(&self, partition: &str, row_key: &str) -> Result<Option<TableRow>, StorageError> {
        let rows = self.rows.read().await;
        let key = (partition.to_owned(), row_key.to_owned());
        Ok(rows.get(&key).map(|(etag, body)| TableRow {
            partition: partition.to_owned(),
            row_key: row_key.to_owned(),
            etag: etag.clone(),
            body: body.clone(),
        }))
    }

    async fn scan(&self, partition: &str) -> Result<Vec<TableRow>, StorageError> {
        let rows = self.rows.read().await;
        Ok(rows
            .iter()
            .filter(|((p, _), _)| p == partition)
            .map(|((p, k), (etag, body))| TableRow {
                partition: p.clone(),
                row_key: k.clone(),
                etag: etag.clone(),
                body: body.clone(),
            })
            .collect())
    }

    async fn update(
        &self,
        partition: &str,
        row_key: &str,
        body: serde_json::Value,
        expected: &Etag,
    ) -> Result<Etag, StorageError> {
        let mut rows = self.rows.write().await;
        let key = (partition.to_owned(), row_key.to_owned());
        let Some((etag, stored)) = rows.get_mut(&key) else {
            return Err(StorageError::NotFound);
        };
        if etag != expected {
            return Err(StorageError::Conflict);
        }
        let next = Etag::generate();
        *etag = next.clone();
        *stored = body;
        Ok(next)
    }

    async fn delete(&self, partition: &str, row_key: &str) -> Result<(), StorageError> {
        let mut rows = self.rows.write().await;
        let key = (partition.to_owned(), row_key.to_owned());
        if rows.remove(&key).is_none() {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_insert_then_get() {
        let store = MemoryTableStore::new();
        let etag = store
            .insert("Product", "p1", json!({"name": "tea"}))
            .await
            .expect("insert");

        let row = store.get("Product", "p1").await.expect("get").expect("row");
        assert_eq!(row.etag, etag);
        assert_eq!(row.body, json!({"name": "tea"}));
    }

    #[tokio::test]
    async fn test_insert_duplicate_key_conflicts() {
        let store = MemoryTableStore::new();
        store
            .insert("Product", "p1", json!({}))
            .await
            .expect("insert");
        let err = store.insert("Product", "p1", json!({})).await.unwrap_err();
        assert!(matches!(err, StorageError::Conflict));
    }

    #[tokio::test]
    async fn test_update_with_stale_tag_conflicts_and_keeps_row() {
        let store = MemoryTableStore::new();
        let stale = store
            .insert("Order", "o1", json!({"qty": 1}))
            .await
            .expect("insert");
        store
            .update("Order", "o1", json!({"qty": 2}), &stale)
            .await
            .expect("first update");

        let err = store
            .update("Order", "o1", json!({"qty": 9}), &stale)
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::Conflict));

        let row = store.get("Order", "o1").await.expect("get").expect("row");
        assert_eq!(row.body, json!({"qty": 2}));
    }

    #[tokio::test]
    async fn test_delete_then_get_is_none() {
        let store = MemoryTableStore::new();
        store
            .insert("Customer", "c1", json!({}))
            .await
            .expect("insert");
        store.delete("Customer", "c1").await.expect("delete");
        assert!(store.get("Customer", "c1").await.expect("get").is_none());
    }

    #[tokio::test]
    async fn test_delete_missing_row_is_not_found() {
        let store = MemoryTableStore::new();
        let err = store.delete("Customer", "nope").await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound));
    }

    #[tokio::test]
    async fn test_scan_filters_by_partition() {
        let store = MemoryTableStore::new();
        store
            .insert("Product", "p1", json!({}))
            .await
            .expect("insert");
        store
            .insert("Product", "p2", json!({}))
            .await
            .expect("insert");
        store
            .insert("Order", "o1", json!({}))
            .await
            .expect("insert");

        let products = store.scan("Product").await.expect("scan");
        assert_eq!(products.len(), 2);
        assert!(products.iter().all(|r| r.partition == "Product"));
    }
}
