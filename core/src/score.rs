use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

use crate::*;

/// Minimal string key-value storage, shaped like the browser's `localStorage`.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// In-memory store for tests and hosts without persistent storage.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// The persisted best snake score, stored as a base-10 integer string.
pub struct HighScore;

impl HighScore {
    pub const KEY: &'static str = "snakeHighScore";

    /// Reads the stored score, falling back to 0 when it is missing or malformed.
    pub fn load(store: &impl KeyValueStore) -> u32 {
        let Some(raw) = store.get(Self::KEY) else {
            return 0;
        };
        raw.trim().parse().unwrap_or_else(|_| {
            log::warn!("ignoring malformed high score {:?}", raw);
            0
        })
    }

    pub fn save(store: &mut impl KeyValueStore, score: u32) -> Result<()> {
        store.set(Self::KEY, &score.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ReadOnlyStore;

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> Option<String> {
            None
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<()> {
            Err(GameError::StorageUnavailable)
        }
    }

    #[test]
    fn missing_score_reads_as_zero() {
        assert_eq!(HighScore::load(&MemoryStore::new()), 0);
    }

    #[test]
    fn saved_score_is_a_decimal_string() {
        let mut store = MemoryStore::new();
        HighScore::save(&mut store, 42).unwrap();

        assert_eq!(store.get("snakeHighScore").as_deref(), Some("42"));
        assert_eq!(HighScore::load(&store), 42);
    }

    #[test]
    fn malformed_score_reads_as_zero() {
        let mut store = MemoryStore::new();
        for raw in ["", "abc", "-3", "4.5", "99999999999"] {
            store.set(HighScore::KEY, raw).unwrap();
            assert_eq!(HighScore::load(&store), 0, "{raw:?}");
        }
        store.set(HighScore::KEY, " 7 ").unwrap();
        assert_eq!(HighScore::load(&store), 7);
    }

    #[test]
    fn failed_write_is_reported() {
        assert_eq!(
            HighScore::save(&mut ReadOnlyStore, 1),
            Err(GameError::StorageUnavailable)
        );
    }
}
