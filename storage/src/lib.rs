pub mod codec;
pub mod config;
pub mod error;
pub mod memory;
pub mod sqlite;
pub mod store;

#[cfg(test)]
mod tests;

pub use config::StoreConfig;
pub use error::StorageError;
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
pub use store::SnapshotStore;

use engine::GameState;

/// Key a single running game is saved under.
pub const DEFAULT_KEY: &str = "boerenbridge_game_state";

// NoopStore for when snapshots do not need to outlive the process
#[derive(Debug, Default)]
pub struct NoopStore;

impl SnapshotStore for NoopStore {
    fn save(&mut self, _key: &str, _state: &GameState) -> Result<(), StorageError> {
        Ok(())
    }

    fn load(&self, _key: &str) -> Result<Option<GameState>, StorageError> {
        Ok(None)
    }

    fn clear(&mut self, _key: &str) -> Result<(), StorageError> {
        Ok(())
    }
}
