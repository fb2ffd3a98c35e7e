use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::game_state::GameState;
use crate::player::PlayerId;
use crate::round::Stage;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Predict(u32),
    Achieve(u32),
    /// Re-entry of an achieved value that was already recorded this round.
    AmendAchieved(u32),
}

impl Action {
    pub fn value(self) -> u32 {
        match self {
            Action::Predict(value) | Action::Achieve(value) | Action::AmendAchieved(value) => {
                value
            }
        }
    }

    /// Stage in which the action is accepted.
    pub fn stage(self) -> Stage {
        match self {
            Action::Predict(_) => Stage::Prediction,
            Action::Achieve(_) | Action::AmendAchieved(_) => Stage::Achieved,
        }
    }
}

impl Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Predict(value) => write!(f, "predict {value}"),
            Action::Achieve(value) => write!(f, "achieve {value}"),
            Action::AmendAchieved(value) => write!(f, "amend achieved to {value}"),
        }
    }
}

/// Something an accepted transition did to the game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    RoundStarted {
        round: u32,
        dealer: PlayerId,
        starter: PlayerId,
        cards_per_player: u32,
    },
    Recorded {
        round: u32,
        player: PlayerId,
        action: Action,
    },
    StageAdvanced {
        round: u32,
        stage: Stage,
    },
    RoundCompleted {
        round: u32,
    },
    GameCompleted,
}

impl Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Event::RoundStarted {
                round,
                dealer,
                starter,
                cards_per_player,
            } => write!(
                f,
                "round {round} started with {cards_per_player} cards, dealt by {dealer}, opened by {starter}"
            ),
            Event::Recorded {
                round,
                player,
                action,
            } => write!(f, "round {round}: {player} did: {action}"),
            Event::StageAdvanced { round, stage } => {
                write!(f, "round {round} moved to the {stage} stage")
            }
            Event::RoundCompleted { round } => write!(f, "round {round} completed"),
            Event::GameCompleted => write!(f, "game completed"),
        }
    }
}

/// Result of an accepted input: the replacement state and what changed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transition {
    pub state: GameState,
    pub events: Vec<Event>,
}

impl Transition {
    pub fn into_state(self) -> GameState {
        self.state
    }

    pub fn completed_round(&self) -> Option<u32> {
        self.events.iter().find_map(|event| match event {
            Event::RoundCompleted { round } => Some(*round),
            _ => None,
        })
    }

    pub fn completed_game(&self) -> bool {
        self.events.contains(&Event::GameCompleted)
    }
}
