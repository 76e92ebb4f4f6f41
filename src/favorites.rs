//! Favorites Store
//!
//! A durable set of favorite character ids. Every toggle is written to
//! storage before it returns, and readers receive the new set as a value.

use crate::api::CharacterId;
use crate::storage::FavoritesStorage;

/// Storage key holding the JSON array of ids
pub const FAVORITES_KEY: &str = "favorites";

/// Insertion-ordered set of character ids
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FavoriteSet {
    ids: Vec<CharacterId>,
}

impl FavoriteSet {
    pub fn from_ids(ids: impl IntoIterator<Item = CharacterId>) -> Self {
        let mut set = FavoriteSet::default();
        for id in ids {
            if !set.ids.contains(&id) {
                set.ids.push(id);
            }
        }
        set
    }

    pub fn contains(&self, id: CharacterId) -> bool {
        self.ids.contains(&id)
    }

    pub fn ids(&self) -> &[CharacterId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// New set with `id` removed if present, appended otherwise
    pub fn toggled(&self, id: CharacterId) -> Self {
        let mut ids = self.ids.clone();
        if let Some(pos) = ids.iter().position(|existing| *existing == id) {
            ids.remove(pos);
        } else {
            ids.push(id);
        }
        FavoriteSet { ids }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.ids).unwrap_or_else(|_| "[]".to_string())
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        let ids: Vec<CharacterId> = serde_json::from_str(text)?;
        Ok(Self::from_ids(ids))
    }
}

pub struct FavoritesStore<S: FavoritesStorage> {
    storage: S,
    current: FavoriteSet,
}

impl<S: FavoritesStorage> FavoritesStore<S> {
    /// Create the store, reading the persisted set once
    pub fn load(storage: S) -> Self {
        let mut store = FavoritesStore {
            storage,
            current: FavoriteSet::default(),
        };
        store.current = store.load_persisted();
        store
    }

    /// Read the persisted set; missing or unreadable data yields an empty set
    pub fn load_persisted(&self) -> FavoriteSet {
        match self.storage.read(FAVORITES_KEY) {
            Ok(Some(text)) => FavoriteSet::from_json(&text).unwrap_or_else(|e| {
                tracing::warn!("ignoring corrupt favorites data: {}", e);
                FavoriteSet::default()
            }),
            Ok(None) => FavoriteSet::default(),
            Err(e) => {
                tracing::warn!("failed to read favorites: {}", e);
                FavoriteSet::default()
            }
        }
    }

    pub fn current(&self) -> &FavoriteSet {
        &self.current
    }

    pub fn is_favorite(&self, id: CharacterId) -> bool {
        self.current.contains(id)
    }

    /// Flip membership of `id`, persist, and return the new set.
    /// A failed write is logged and the in-memory set still changes.
    pub fn toggle(&mut self, id: CharacterId) -> FavoriteSet {
        let next = self.current.toggled(id);
        if let Err(e) = self.storage.write(FAVORITES_KEY, &next.to_json()) {
            tracing::warn!(id, "failed to persist favorites: {}", e);
        }
        tracing::debug!(id, count = next.len(), "favorites toggled");
        self.current = next.clone();
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStorage, StorageError};

    struct BrokenStorage;

    impl FavoritesStorage for BrokenStorage {
        fn read(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Ok(None)
        }

        fn write(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Io(std::io::Error::other("disk full")))
        }
    }

    #[test]
    fn test_toggle_adds_then_removes() {
        let mut store = FavoritesStore::load(MemoryStorage::new());
        assert_eq!(store.toggle(5).ids(), &[5]);
        assert!(store.is_favorite(5));
        assert!(store.toggle(5).is_empty());
        assert!(!store.is_favorite(5));
    }

    #[test]
    fn test_insertion_order_kept() {
        let set = FavoriteSet::from_ids([3, 1, 3, 2]);
        assert_eq!(set.ids(), &[3, 1, 2]);
        assert_eq!(set.to_json(), "[3,1,2]");
    }

    #[test]
    fn test_corrupt_data_yields_empty_set() {
        let mut storage = MemoryStorage::new();
        storage.write(FAVORITES_KEY, "{not json").unwrap();
        let store = FavoritesStore::load(storage);
        assert!(store.current().is_empty());
    }

    #[test]
    fn test_toggle_survives_write_failure() {
        let mut store = FavoritesStore::load(BrokenStorage);
        let set = store.toggle(1);
        assert_eq!(set.ids(), &[1]);
        assert!(store.is_favorite(1));
    }
}
