//! Key/value persistence and the stored best score
//!
//! Storage is reached only through [`KeyValueStore`]. The browser backend
//! lives in `platform::storage`; [`MemoryStore`] serves native runs and tests.
//!
//! Read failures are never surfaced to the game: a missing, malformed or
//! unreadable best score loads as 0.

use std::collections::HashMap;

use thiserror::Error;

/// LocalStorage key holding the best score as a decimal string
pub const BEST_SCORE_KEY: &str = "flappyDegenHighScore";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage backend is unavailable")]
    Unavailable,

    #[error("storage read of `{key}` failed: {reason}")]
    Read { key: String, reason: String },

    #[error("storage write of `{key}` failed: {reason}")]
    Write { key: String, reason: String },
}

/// Narrow string key/value interface over client-local storage
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-memory store (native runs and tests)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a single entry
    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut store = Self::new();
        store.entries.insert(key.to_string(), value.to_string());
        store
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }
}

/// Parse a stored best score; anything but a non-negative integer is `None`
pub fn parse_best_score(raw: &str) -> Option<u32> {
    raw.trim().parse::<u32>().ok()
}

/// Load the best score, falling back to 0
pub fn load_best_score<S: KeyValueStore + ?Sized>(store: &S) -> u32 {
    match store.get(BEST_SCORE_KEY) {
        Ok(Some(raw)) => match parse_best_score(&raw) {
            Some(best) => {
                log::info!("Loaded best score: {}", best);
                best
            }
            None => {
                log::warn!("Ignoring malformed best score {:?}", raw);
                0
            }
        },
        Ok(None) => {
            log::info!("No best score found, starting fresh");
            0
        }
        Err(e) => {
            log::warn!("Could not read best score: {}", e);
            0
        }
    }
}

/// Persist the best score
pub fn save_best_score<S: KeyValueStore + ?Sized>(
    store: &mut S,
    best: u32,
) -> Result<(), StorageError> {
    store.set(BEST_SCORE_KEY, &best.to_string())?;
    log::info!("Best score saved ({})", best);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Store whose every operation fails
    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Unavailable)
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable)
        }
    }

    #[test]
    fn test_best_score_round_trip() {
        let mut store = MemoryStore::new();
        save_best_score(&mut store, 37).unwrap();
        assert_eq!(load_best_score(&store), 37);
        assert_eq!(store.get(BEST_SCORE_KEY).unwrap().as_deref(), Some("37"));
    }

    #[test]
    fn test_missing_best_score_is_zero() {
        assert_eq!(load_best_score(&MemoryStore::new()), 0);
    }

    #[test]
    fn test_malformed_best_score_is_zero() {
        for raw in ["", "abc", "-5", "12.5", "99999999999"] {
            let store = MemoryStore::with_entry(BEST_SCORE_KEY, raw);
            assert_eq!(load_best_score(&store), 0, "raw value {:?}", raw);
        }
    }

    #[test]
    fn test_whitespace_is_tolerated() {
        let store = MemoryStore::with_entry(BEST_SCORE_KEY, " 12\n");
        assert_eq!(load_best_score(&store), 12);
    }

    #[test]
    fn test_unreadable_store_is_zero() {
        assert_eq!(load_best_score(&BrokenStore), 0);
    }

    #[test]
    fn test_save_failure_is_reported() {
        let err = save_best_score(&mut BrokenStore, 3).unwrap_err();
        assert!(matches!(err, StorageError::Unavailable));
    }
}
