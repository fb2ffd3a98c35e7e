use engine::{EngineError, PlayerId, SetupError, Stage};
use storage::StorageError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimulationError {
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    #[error("Setup error: {0}")]
    Setup(#[from] SetupError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("No game has been started")]
    NotStarted,

    #[error("Strategy for {player} chose {value}, which is not legal in the {stage} stage")]
    IllegalChoice {
        player: PlayerId,
        value: u32,
        stage: Stage,
    },
}

impl SimulationError {
    /// The engine's input rejection, when that is what this is.
    pub fn rejection(&self) -> Option<&engine::InputRejection> {
        match self {
            SimulationError::Engine(e) => e.rejection(),
            _ => None,
        }
    }
}
