use engine::GameState;

use crate::error::StorageError;

/// Key-value persistence of whole game snapshots.
///
/// `load` returns `Ok(None)` both for a missing key and for a snapshot that
/// cannot be turned back into a consistent game; errors are reserved for the
/// store itself failing.
pub trait SnapshotStore {
    fn save(&mut self, key: &str, state: &GameState) -> Result<(), StorageError>;
    fn load(&self, key: &str) -> Result<Option<GameState>, StorageError>;
    fn clear(&mut self, key: &str) -> Result<(), StorageError>;
}

impl<S: SnapshotStore + ?Sized> SnapshotStore for Box<S> {
    fn save(&mut self, key: &str, state: &GameState) -> Result<(), StorageError> {
        (**self).save(key, state)
    }

    fn load(&self, key: &str) -> Result<Option<GameState>, StorageError> {
        (**self).load(key)
    }

    fn clear(&mut self, key: &str) -> Result<(), StorageError> {
        (**self).clear(key)
    }
}

impl<S: SnapshotStore + ?Sized> SnapshotStore for &mut S {
    fn save(&mut self, key: &str, state: &GameState) -> Result<(), StorageError> {
        (**self).save(key, state)
    }

    fn load(&self, key: &str) -> Result<Option<GameState>, StorageError> {
        (**self).load(key)
    }

    fn clear(&mut self, key: &str) -> Result<(), StorageError> {
        (**self).clear(key)
    }
}
