//! Partitioned table storage with optimistic concurrency.
//!
//! Customers, products, and orders live in a key-value store addressed by
//! (partition, row key) pairs. Every row carries an opaque version tag
//! ([`Etag`]) regenerated on each successful write; updates must present the
//! tag they read or fail with [`StorageError::Conflict`].
//!
//! [`TableStore`] is the seam a cloud table SDK implements. [`EntityStore`]
//! layers typed access on top of it via [`TableEntity`]. The crate ships a
//! single backend, [`memory::MemoryTableStore`], used by the server binary
//! and by every test.

pub mod memory;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

pub use memory::MemoryTableStore;

/// Errors from table storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The store is unreachable. Transient; the caller may retry.
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// The targeted (partition, row key) does not exist. Never retried.
    #[error("row not found")]
    NotFound,

    /// The supplied version tag does not match the stored row.
    #[error("version tag mismatch")]
    Conflict,

    /// A stored row could not be decoded into its entity type.
    #[error("corrupt row data: {0}")]
    Corrupt(String),
}

/// Opaque per-row version tag.
///
/// Returned on every read and regenerated on every successful write.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Etag(String);

impl Etag {
    /// Mint a fresh tag.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// The raw tag value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Etag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Etag {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// A raw stored row.
#[derive(Debug, Clone)]
pub struct TableRow {
    /// Partition the row belongs to (groups rows by entity type).
    pub partition: String,
    /// Unique key within the partition.
    pub row_key: String,
    /// Current version tag.
    pub etag: Etag,
    /// Serialized entity body.
    pub body: serde_json::Value,
}

/// Raw table-store contract.
///
/// Implementations provide per-row optimistic concurrency; nothing beyond a
/// single row is ever atomic.
#[async_trait]
pub trait TableStore: Send + Sync {
    /// Insert a new row, returning its initial version tag.
    ///
    /// Inserting over an existing (partition, row key) fails with
    /// [`StorageError::Conflict`].
    async fn insert(
        &self,
        partition: &str,
        row_key: &str,
        body: serde_json::Value,
    ) -> Result<Etag, StorageError>;

    /// Fetch a row, or `None` if absent.
    async fn get(&self, partition: &str, row_key: &str) -> Result<Option<TableRow>, StorageError>;

    /// Fetch every row in a partition. Full scan; no pagination.
    async fn scan(&self, partition: &str) -> Result<Vec<TableRow>, StorageError>;

    /// Replace a row's body if `expected` matches the stored tag.
    ///
    /// Returns the new tag on success, [`StorageError::Conflict`] if the tag
    /// has advanced, [`StorageError::NotFound`] if the row is gone.
    async fn update(
        &self,
        partition: &str,
        row_key: &str,
        body: serde_json::Value,
        expected: &Etag,
    ) -> Result<Etag, StorageError>;

    /// Delete a row. [`StorageError::NotFound`] if it does not exist.
    async fn delete(&self, partition: &str, row_key: &str) -> Result<(), StorageError>;
}

/// A type stored as rows of a fixed partition.
pub trait TableEntity: Serialize + DeserializeOwned + Send + Sync {
    /// Partition all rows of this type share.
    const PARTITION: &'static str;

    /// Row key for this instance.
    fn row_key(&self) -> String;
}

/// Typed facade over a [`TableStore`].
///
/// Cheap to clone; all methods address rows through [`TableEntity`].
#[derive(Clone)]
pub struct EntityStore {
    inner: Arc<dyn TableStore>,
}

impl EntityStore {
    /// Wrap a raw table store.
    #[must_use]
    pub fn new(inner: Arc<dyn TableStore>) -> Self {
        Self { inner }
    }

    /// Insert a new entity, returning its initial version tag.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Conflict` if the row key already exists, or
    /// `StorageError::Unavailable` if the store is unreachable.
    pub async fn add<T: TableEntity>(&self, entity: &T) -> Result<Etag, StorageError> {
        let body = to_body(entity)?;
        self.inner
            .insert(T::PARTITION, &entity.row_key(), body)
            .await
    }

    /// Fetch an entity and its current version tag.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Corrupt` if the stored body does not decode as
    /// `T`, or `StorageError::Unavailable` if the store is unreachable.
    pub async fn get<T: TableEntity>(
        &self,
        row_key: &str,
    ) -> Result<Option<(T, Etag)>, StorageError> {
        match self.inner.get(T::PARTITION, row_key).await? {
            Some(row) => Ok(Some((from_body(row.body)?, row.etag))),
            None => Ok(None),
        }
    }

    /// Fetch every entity in the type's partition.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Corrupt` if any stored body does not decode,
    /// or `StorageError::Unavailable` if the store is unreachable.
    pub async fn get_all<T: TableEntity>(&self) -> Result<Vec<(T, Etag)>, StorageError> {
        let rows = self.inner.scan(T::PARTITION).await?;
        let mut entities = Vec::with_capacity(rows.len());
        for row in rows {
            entities.push((from_body(row.body)?, row.etag));
        }
        Ok(entities)
    }

    /// Replace an entity if `expected` matches the stored version tag.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Conflict` on tag mismatch and
    /// `StorageError::NotFound` if the row no longer exists.
    pub async fn update<T: TableEntity>(
        &self,
        entity: &T,
        expected: &Etag,
    ) -> Result<Etag, StorageError> {
        let body = to_body(entity)?;
        self.inner
            .update(T::PARTITION, &entity.row_key(), body, expected)
            .await
    }

    /// Delete an entity row by key.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the row does not exist.
    pub async fn delete<T: TableEntity>(&self, row_key: &str) -> Result<(), StorageError> {
        self.inner.delete(T::PARTITION, row_key).await
    }
}

fn to_body<T: Serialize>(entity: &T) -> Result<serde_json::Value, StorageError> {
    serde_json::to_value(entity).map_err(|e| StorageError::Corrupt(e.to_string()))
}

fn from_body<T: DeserializeOwned>(body: serde_json::Value) -> Result<T, StorageError> {
    serde_json::from_value(body).map_err(|e| StorageError::Corrupt(e.to_string()))
}
