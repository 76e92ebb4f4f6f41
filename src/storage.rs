use rusqlite::{params, Connection};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("storage directory unavailable: {0}")]
    Io(#[from] std::io::Error),
}

/// Durable string key-value storage backing the favorites set
pub trait FavoritesStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<T: FavoritesStorage + ?Sized> FavoritesStorage for Box<T> {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).read(key)
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).write(key, value)
    }
}

/// Volatile storage, used in tests and when no database can be opened
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    values: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FavoritesStorage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Open (or create) the database at `path`, creating parent directories
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(path)?;
        let mut storage = SqliteStorage { conn };
        storage.init_schema()?;
        Ok(storage)
    }

    /// Open the database at the platform data directory
    pub fn open_default() -> Result<Self, StorageError> {
        Self::open(&Self::default_path())
    }

    pub fn new_in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        let mut storage = SqliteStorage { conn };
        storage.init_schema()?;
        Ok(storage)
    }

    pub fn default_path() -> PathBuf {
        if let Some(data_dir) = dirs::data_dir() {
            data_dir.join("rmcat").join("favorites.db")
        } else {
            // Fallback to the temp dir if no data dir available
            std::env::temp_dir().join("rmcat").join("favorites.db")
        }
    }

    fn init_schema(&mut self) -> Result<(), StorageError> {
        self.conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS kv_store (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            ) WITHOUT ROWID;
            ",
        )?;
        Ok(())
    }
}

impl FavoritesStorage for SqliteStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let result = self.conn.query_row(
            "SELECT value FROM kv_store WHERE key = ?1",
            params![key],
            |row| row.get::<_, String>(0),
        );

        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv_store (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage_roundtrip() {
        let mut storage = MemoryStorage::new();
        assert_eq!(storage.read("favorites").unwrap(), None);
        storage.write("favorites", "[1,2]").unwrap();
        assert_eq!(storage.read("favorites").unwrap().as_deref(), Some("[1,2]"));
    }

    #[test]
    fn test_sqlite_overwrites_value() {
        let mut storage = SqliteStorage::new_in_memory().unwrap();
        storage.write("favorites", "[1]").unwrap();
        storage.write("favorites", "[1,5]").unwrap();
        assert_eq!(storage.read("favorites").unwrap().as_deref(), Some("[1,5]"));
    }

    #[test]
    fn test_sqlite_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("favorites.db");

        {
            let mut storage = SqliteStorage::open(&path).unwrap();
            storage.write("favorites", "[7]").unwrap();
        }

        let storage = SqliteStorage::open(&path).unwrap();
        assert_eq!(storage.read("favorites").unwrap().as_deref(), Some("[7]"));
    }
}
