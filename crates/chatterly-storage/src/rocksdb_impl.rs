//! RocksDB storage implementation.

use crate::{
    column_families::all_column_families,
    errors::{Result, StorageError},
    traits::{deserialize_value, serialize_key, serialize_value, Batch, Storage},
};
use async_trait::async_trait;
use rocksdb::{ColumnFamily, Options, WriteBatch, DB};
use serde::{de::DeserializeOwned, Serialize};
use std::{path::Path, sync::Arc};
use tempfile::TempDir;
use tracing::debug;

/// RocksDB-backed [`Storage`]
pub struct RocksDbStorage {
    db: Arc<DB>,
}

impl RocksDbStorage {
    /// Open (or create) the database at `path` with every column family
    /// the directory needs.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let db = DB::open_cf(&opts, &path, all_column_families())
            .map_err(|e| StorageError::Database(e.to_string()))?;

        debug!(path = ?path.as_ref(), "Opened RocksDB");

        Ok(Self { db: Arc::new(db) })
    }

    /// Open a throwaway database in a fresh temp directory.
    ///
    /// The directory is removed when the returned [`TempDir`] drops, so keep
    /// it alive for as long as the storage is used.
    pub fn open_test() -> Result<(Self, TempDir)> {
        let temp_dir = TempDir::new()?;
        let storage = Self::open(temp_dir.path())?;
        Ok((storage, temp_dir))
    }

    fn cf_handle(&self, cf: &str) -> Result<&ColumnFamily> {
        self.db
            .cf_handle(cf)
            .ok_or_else(|| StorageError::InvalidColumnFamily(cf.to_string()))
    }

    fn read_raw(&self, cf: &str, key: &[u8]) -> Result<Option<Vec<u8>>> {
        let cf_handle = self.cf_handle(cf)?;
        self.db
            .get_cf(cf_handle, key)
            .map_err(|e| StorageError::Database(e.to_string()))
    }
}

#[async_trait]
impl Storage for RocksDbStorage {
    async fn get<K, V>(&self, cf: &str, key: &K) -> Result<Option<V>>
    where
        K: Serialize + Send + Sync,
        V: DeserializeOwned,
    {
        let key_bytes = serialize_key(key)?;

        match self.read_raw(cf, &key_bytes)? {
            Some(bytes) => deserialize_value(&bytes).map(Some),
            None => Ok(None),
        }
    }

    async fn put<K, V>(&self, cf: &str, key: &K, value: &V) -> Result<()>
    where
        K: Serialize + Send + Sync,
        V: Serialize + Send + Sync,
    {
        let cf_handle = self.cf_handle(cf)?;
        let key_bytes = serialize_key(key)?;
        let value_bytes = serialize_value(value)?;

        self.db
            .put_cf(cf_handle, &key_bytes, &value_bytes)
            .map_err(|e| StorageError::Database(e.to_string()))
    }

    async fn delete<K>(&self, cf: &str, key: &K) -> Result<()>
    where
        K: Serialize + Send + Sync,
    {
        let cf_handle = self.cf_handle(cf)?;
        let key_bytes = serialize_key(key)?;

        self.db
            .delete_cf(cf_handle, &key_bytes)
            .map_err(|e| StorageError::Database(e.to_string()))
    }

    fn batch(&self) -> Box<dyn Batch> {
        Box::new(RocksDbBatch {
            db: Arc::clone(&self.db),
            write_batch: WriteBatch::default(),
        })
    }
}

/// RocksDB batch implementation
pub struct RocksDbBatch {
    db: Arc<DB>,
    write_batch: WriteBatch,
}

#[async_trait]
impl Batch for RocksDbBatch {
    fn put_raw(&mut self, cf: &str, key: Vec<u8>, value: Vec<u8>) -> Result<()> {
        let cf_handle = self
            .db
            .cf_handle(cf)
            .ok_or_else(|| StorageError::InvalidColumnFamily(cf.to_string()))?;
        self.write_batch.put_cf(cf_handle, &key, &value);
        Ok(())
    }

    async fn commit(self: Box<Self>) -> Result<()> {
        self.db
            .write(self.write_batch)
            .map_err(|e| StorageError::Database(e.to_string()))?;

        debug!("Batch committed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::BatchExt;
    use crate::{CF_USERS, CF_USERS_BY_EMAIL_PROVIDER};
    use serde::Deserialize;

    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
    struct Row {
        id: String,
        email: String,
    }

    fn row(id: &str) -> Row {
        Row {
            id: id.to_string(),
            email: format!("{}@example.com", id),
        }
    }

    #[tokio::test]
    async fn test_put_and_get() {
        let (storage, _dir) = RocksDbStorage::open_test().unwrap();

        storage.put(CF_USERS, &"u1", &row("u1")).await.unwrap();

        let result: Option<Row> = storage.get(CF_USERS, &"u1").await.unwrap();
        assert_eq!(result, Some(row("u1")));
    }

    #[tokio::test]
    async fn test_get_missing_key() {
        let (storage, _dir) = RocksDbStorage::open_test().unwrap();

        let result: Option<Row> = storage.get(CF_USERS, &"missing").await.unwrap();
        assert_eq!(result, None);
    }

    #[tokio::test]
    async fn test_delete() {
        let (storage, _dir) = RocksDbStorage::open_test().unwrap();

        storage.put(CF_USERS, &"u1", &row("u1")).await.unwrap();
        storage.delete(CF_USERS, &"u1").await.unwrap();

        let result: Option<Row> = storage.get(CF_USERS, &"u1").await.unwrap();
        assert_eq!(result, None);
    }

    #[tokio::test]
    async fn test_unknown_column_family() {
        let (storage, _dir) = RocksDbStorage::open_test().unwrap();

        let err = storage.put("rooms", &"r1", &row("r1")).await.unwrap_err();
        assert!(matches!(err, StorageError::InvalidColumnFamily(cf) if cf == "rooms"));
    }

    #[tokio::test]
    async fn test_batch_writes_across_column_families() {
        let (storage, _dir) = RocksDbStorage::open_test().unwrap();

        let mut batch = storage.batch();
        batch.put(CF_USERS, &"u1", &row("u1")).unwrap();
        batch
            .put(CF_USERS_BY_EMAIL_PROVIDER, &"github:u1@example.com", &"u1")
            .unwrap();
        batch.commit().await.unwrap();

        let user: Option<Row> = storage.get(CF_USERS, &"u1").await.unwrap();
        let id: Option<String> = storage
            .get(CF_USERS_BY_EMAIL_PROVIDER, &"github:u1@example.com")
            .await
            .unwrap();

        assert_eq!(user, Some(row("u1")));
        assert_eq!(id.as_deref(), Some("u1"));
    }

    #[tokio::test]
    async fn test_dropped_batch_writes_nothing() {
        let (storage, _dir) = RocksDbStorage::open_test().unwrap();

        let mut batch = storage.batch();
        batch.put(CF_USERS, &"u1", &row("u1")).unwrap();
        drop(batch);

        let result: Option<Row> = storage.get(CF_USERS, &"u1").await.unwrap();
        assert_eq!(result, None);
    }
}
