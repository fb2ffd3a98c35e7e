use serde::{Deserialize, Serialize};

use crate::error::StorageError;
use crate::memory::MemoryStore;
use crate::sqlite::SqliteStore;
use crate::store::SnapshotStore;

fn default_pool_size() -> u32 {
    4
}

/// Where snapshots go.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum StoreConfig {
    #[default]
    Memory,
    Sqlite {
        url: String,
        #[serde(default = "default_pool_size")]
        pool_size: u32,
    },
}

impl StoreConfig {
    pub fn sqlite(url: impl Into<String>) -> Self {
        StoreConfig::Sqlite {
            url: url.into(),
            pool_size: default_pool_size(),
        }
    }

    /// An explicit url wins, then `DATABASE_URL`, then a YAML document
    /// describing the store. With none of them snapshots stay in memory.
    pub fn from_cli_or_env_or_yaml(
        cli_arg: Option<String>,
        yaml_config: Option<&str>,
    ) -> Result<Self, StorageError> {
        if let Some(arg) = cli_arg {
            return Ok(Self::sqlite(arg));
        }
        if let Ok(env) = std::env::var("DATABASE_URL") {
            return Ok(Self::sqlite(env));
        }
        if let Some(yaml) = yaml_config {
            return serde_yaml::from_str(yaml).map_err(|e| StorageError::Config(e.to_string()));
        }
        Ok(StoreConfig::Memory)
    }

    pub fn open(&self) -> Result<Box<dyn SnapshotStore>, StorageError> {
        match self {
            StoreConfig::Memory => Ok(Box::new(MemoryStore::new())),
            StoreConfig::Sqlite { url, pool_size } => {
                let path = url
                    .strip_prefix("sqlite://")
                    .or_else(|| url.strip_prefix("sqlite:"))
                    .unwrap_or(url);
                if path.is_empty() {
                    return Err(StorageError::Config("empty sqlite url".to_string()));
                }
                if path == ":memory:" {
                    return Ok(Box::new(SqliteStore::in_memory()?));
                }
                Ok(Box::new(SqliteStore::open(path, *pool_size)?))
            }
        }
    }
}
