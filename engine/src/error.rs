//! Error types for the rules engine.
//!
//! Input rejections are recoverable: the state they were raised against is
//! left untouched and the caller re-prompts. Each variant carries the values
//! that were involved so a presentation layer can render its own message;
//! `kind()` gives a stable key for that lookup.

use thiserror::Error;

use crate::action::Action;
use crate::player::PlayerId;
use crate::round::Stage;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputRejection {
    #[error("{value} is outside the allowed range 0..={max}")]
    OutOfRange { value: u32, max: u32 },

    #[error(
        "predicting {value} would make the predicted total {total_tricks}, \
         equal to the available tricks"
    )]
    ForbiddenPrediction {
        value: u32,
        others: u32,
        total_tricks: u32,
    },

    #[error(
        "achieving {value} would bring the achieved total to {}, more than the {total_tricks} available tricks",
        .others + .value
    )]
    AchievedExceedsTotal {
        value: u32,
        others: u32,
        total_tricks: u32,
    },

    #[error("achieved tricks add up to {achieved_total} but must add up to {required_total}")]
    AchievedTotalMismatch {
        achieved_total: u32,
        required_total: u32,
    },

    #[error("{actual} is not the active player")]
    NotPlayersTurn {
        expected: Option<PlayerId>,
        actual: PlayerId,
    },

    #[error("{player} has no achieved tricks recorded yet")]
    NotYetRecorded { player: PlayerId },

    #[error("{action} is not accepted during the {stage} stage")]
    WrongStage { stage: Stage, action: Action },

    #[error("unknown {0}")]
    UnknownPlayer(PlayerId),

    #[error("the game is already complete")]
    GameCompleted,
}

impl InputRejection {
    pub fn kind(&self) -> &'static str {
        match self {
            InputRejection::OutOfRange { .. } => "out_of_range",
            InputRejection::ForbiddenPrediction { .. } => "forbidden_prediction",
            InputRejection::AchievedExceedsTotal { .. } => "achieved_exceeds_total",
            InputRejection::AchievedTotalMismatch { .. } => "achieved_total_mismatch",
            InputRejection::NotPlayersTurn { .. } => "not_players_turn",
            InputRejection::NotYetRecorded { .. } => "not_yet_recorded",
            InputRejection::WrongStage { .. } => "wrong_stage",
            InputRejection::UnknownPlayer(_) => "unknown_player",
            InputRejection::GameCompleted => "game_completed",
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("input rejected: {0}")]
    Rejected(#[from] InputRejection),

    #[error("precondition violated: {0}")]
    Precondition(String),
}

impl EngineError {
    pub fn precondition(detail: impl Into<String>) -> Self {
        Self::Precondition(detail.into())
    }

    pub fn rejection(&self) -> Option<&InputRejection> {
        match self {
            EngineError::Rejected(rejection) => Some(rejection),
            EngineError::Precondition(_) => None,
        }
    }

    pub fn is_recoverable(&self) -> bool {
        matches!(self, EngineError::Rejected(_))
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SetupError {
    #[error("at least {min} players are needed, got {count}")]
    TooFewPlayers { count: usize, min: usize },

    #[error("at most {max} players can play, got {count}")]
    TooManyPlayers { count: usize, max: usize },

    #[error("player name {name:?} is longer than {max} characters")]
    NameTooLong { name: String, max: usize },

    #[error("player name {0:?} is used more than once")]
    DuplicateName(String),
}
