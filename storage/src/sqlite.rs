use chrono::{DateTime, Utc};
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{params, OptionalExtension};

use engine::GameState;

use crate::codec;
use crate::error::StorageError;
use crate::store::SnapshotStore;

const CREATE_SNAPSHOTS: &str = "CREATE TABLE IF NOT EXISTS snapshots (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,
    saved_at TEXT NOT NULL
)";

/// Snapshot store backed by a pooled SQLite database, one row per key.
#[derive(Clone)]
pub struct SqliteStore {
    pool: Pool<SqliteConnectionManager>,
}

impl SqliteStore {
    pub fn open(path: &str, pool_size: u32) -> Result<Self, StorageError> {
        let manager = SqliteConnectionManager::file(path);
        let pool = Pool::builder()
            .max_size(pool_size.max(1))
            .build(manager)
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let store = Self { pool };
        store.run_migrations()?;
        tracing::info!("Opened snapshot store at {}", path);
        Ok(store)
    }

    /// A private in-memory database. Every SQLite in-memory connection is its
    /// own database, so the pool holds exactly one connection for good.
    pub fn in_memory() -> Result<Self, StorageError> {
        let pool = Pool::builder()
            .max_size(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .build(SqliteConnectionManager::memory())
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let store = Self { pool };
        store.run_migrations()?;
        Ok(store)
    }

    pub fn run_migrations(&self) -> Result<(), StorageError> {
        self.connection()?
            .execute(CREATE_SNAPSHOTS, [])
            .map_err(|e| StorageError::Query(e.to_string()))?;
        Ok(())
    }

    pub(crate) fn connection(
        &self,
    ) -> Result<PooledConnection<SqliteConnectionManager>, StorageError> {
        self.pool
            .get()
            .map_err(|e| StorageError::Connection(e.to_string()))
    }

    /// When the snapshot under `key` was last written.
    pub fn saved_at(&self, key: &str) -> Result<Option<DateTime<Utc>>, StorageError> {
        let raw: Option<String> = self
            .connection()?
            .query_row(
                "SELECT saved_at FROM snapshots WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| StorageError::Query(e.to_string()))?;
        raw.map(|value| {
            DateTime::parse_from_rfc3339(&value)
                .map(|ts| ts.with_timezone(&Utc))
                .map_err(|e| StorageError::Timestamp {
                    value: value.clone(),
                    reason: e.to_string(),
                })
        })
        .transpose()
    }

    pub fn keys(&self) -> Result<Vec<String>, StorageError> {
        let conn = self.connection()?;
        let mut stmt = conn
            .prepare("SELECT key FROM snapshots ORDER BY saved_at, key")
            .map_err(|e| StorageError::Query(e.to_string()))?;
        let keys = stmt
            .query_map([], |row| row.get(0))
            .map_err(|e| StorageError::Query(e.to_string()))?
            .collect::<Result<Vec<String>, _>>()
            .map_err(|e| StorageError::Query(e.to_string()))?;
        Ok(keys)
    }
}

impl SnapshotStore for SqliteStore {
    fn save(&mut self, key: &str, state: &GameState) -> Result<(), StorageError> {
        let value = codec::encode(state)?;
        let saved_at = Utc::now().to_rfc3339();
        self.connection()?
            .execute(
                "INSERT INTO snapshots (key, value, saved_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value, saved_at = excluded.saved_at",
                params![key, value, saved_at],
            )
            .map_err(|e| StorageError::Query(e.to_string()))?;
        tracing::debug!("Saved snapshot {} (round {})", key, state.current_round);
        Ok(())
    }

    fn load(&self, key: &str) -> Result<Option<GameState>, StorageError> {
        let raw: Option<String> = self
            .connection()?
            .query_row(
                "SELECT value FROM snapshots WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| StorageError::Query(e.to_string()))?;
        Ok(raw.and_then(|raw| codec::decode(&raw)))
    }

    fn clear(&mut self, key: &str) -> Result<(), StorageError> {
        self.connection()?
            .execute("DELETE FROM snapshots WHERE key = ?1", params![key])
            .map_err(|e| StorageError::Query(e.to_string()))?;
        Ok(())
    }
}
