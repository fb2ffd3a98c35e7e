use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database connection error: {0}")]
    Connection(String),

    #[error("Query execution error: {0}")]
    Query(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid timestamp {value:?}: {reason}")]
    Timestamp { value: String, reason: String },

    #[error("Store configuration error: {0}")]
    Config(String),
}
