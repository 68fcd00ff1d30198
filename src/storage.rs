use crate::error::ChefError;
use crate::model::{DietaryPreference, Recipe};
use log::{error, warn};
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Mutex;

pub const FAVORITES_KEY: &str = "smartchef-favorites";
pub const DIETARY_PREFERENCES_KEY: &str = "smartchef-dietary-preferences";

/// A string key/value store for persisted state
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, ChefError>;
    fn set(&self, key: &str, value: &str) -> Result<(), ChefError>;
}

/// Keeps values in memory; nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, ChefError> {
        let values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), ChefError> {
        let mut values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// One `<key>.json` file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStore { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, ChefError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), ChefError> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path_for(key), value)?;
        Ok(())
    }
}

/// Read and decode a JSON blob, treating unreadable or corrupt data as absent.
fn load_blob<T: serde::de::DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    let raw = match store.get(key) {
        Ok(raw) => raw?,
        Err(e) => {
            warn!("Failed to read {}: {}", key, e);
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("Ignoring corrupt {}: {}", key, e);
            None
        }
    }
}

fn save_blob<T: serde::Serialize>(store: &dyn KeyValueStore, key: &str, value: &T) {
    let result = serde_json::to_string(value)
        .map_err(ChefError::from)
        .and_then(|json| store.set(key, &json));
    if let Err(e) = result {
        error!("Failed to save {}: {}", key, e);
    }
}

/// Saved favorites, or an empty list when none are stored or the blob is corrupt.
pub fn load_favorites(store: &dyn KeyValueStore) -> Vec<Recipe> {
    load_blob(store, FAVORITES_KEY).unwrap_or_default()
}

pub fn save_favorites(store: &dyn KeyValueStore, favorites: &[Recipe]) {
    save_blob(store, FAVORITES_KEY, &favorites)
}

/// Saved preference toggles, or `None` when absent or corrupt.
pub fn load_dietary_preferences(store: &dyn KeyValueStore) -> Option<Vec<DietaryPreference>> {
    load_blob(store, DIETARY_PREFERENCES_KEY)
}

pub fn save_dietary_preferences(store: &dyn KeyValueStore, preferences: &[DietaryPreference]) {
    save_blob(store, DIETARY_PREFERENCES_KEY, &preferences)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::sample_recipes;

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryStore::default();
        assert_eq!(store.get("missing").unwrap(), None);
        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("nested"));

        assert_eq!(store.get(FAVORITES_KEY).unwrap(), None);
        store.set(FAVORITES_KEY, "[]").unwrap();
        assert_eq!(store.get(FAVORITES_KEY).unwrap().as_deref(), Some("[]"));
        assert!(dir.path().join("nested/smartchef-favorites.json").exists());
    }

    #[test]
    fn test_favorites_round_trip() {
        let store = MemoryStore::default();
        let favorites = sample_recipes()[..2].to_vec();
        save_favorites(&store, &favorites);
        assert_eq!(load_favorites(&store), favorites);
    }

    #[test]
    fn test_corrupt_blobs_are_ignored() {
        let store = MemoryStore::default();
        store.set(FAVORITES_KEY, "{not json").unwrap();
        store.set(DIETARY_PREFERENCES_KEY, "[{\"id\": 3}]").unwrap();

        assert!(load_favorites(&store).is_empty());
        assert!(load_dietary_preferences(&store).is_none());
    }

    #[test]
    fn test_preferences_round_trip() {
        let store = MemoryStore::default();
        let mut preferences = DietaryPreference::defaults();
        preferences[1].enabled = true;
        save_dietary_preferences(&store, &preferences);
        assert_eq!(load_dietary_preferences(&store), Some(preferences));
    }
}
