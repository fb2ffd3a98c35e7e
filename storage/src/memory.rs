use std::collections::HashMap;

use engine::GameState;

use crate::codec;
use crate::error::StorageError;
use crate::store::SnapshotStore;

/// Keeps encoded snapshots in a map, so loading goes through the same decode
/// path as the SQLite store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    snapshots: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores an already encoded snapshot as is.
    pub fn insert_raw(&mut self, key: &str, raw: impl Into<String>) {
        self.snapshots.insert(key.to_string(), raw.into());
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

impl SnapshotStore for MemoryStore {
    fn save(&mut self, key: &str, state: &GameState) -> Result<(), StorageError> {
        let raw = codec::encode(state)?;
        self.snapshots.insert(key.to_string(), raw);
        Ok(())
    }

    fn load(&self, key: &str) -> Result<Option<GameState>, StorageError> {
        Ok(self.snapshots.get(key).and_then(|raw| codec::decode(raw)))
    }

    fn clear(&mut self, key: &str) -> Result<(), StorageError> {
        self.snapshots.remove(key);
        Ok(())
    }
}
