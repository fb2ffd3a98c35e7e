use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::player::PlayerId;
use crate::rules;

/// Input stage of a round. Moves strictly forward.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    #[default]
    Prediction,
    Achieved,
    Complete,
}

impl Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Prediction => write!(f, "prediction"),
            Stage::Achieved => write!(f, "achieved"),
            Stage::Complete => write!(f, "complete"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    pub player_id: PlayerId,
    pub predicted: u32,
    pub achieved: u32,
    /// Filled in once, when the round completes.
    pub score: i32,
}

impl Prediction {
    pub fn new(player_id: PlayerId) -> Self {
        Self {
            player_id,
            predicted: 0,
            achieved: 0,
            score: 0,
        }
    }

    pub fn is_exact(&self) -> bool {
        self.predicted == self.achieved
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Round {
    pub round_number: u32,
    pub cards_per_player: u32,
    pub dealer_id: PlayerId,
    pub starter_id: PlayerId,
    #[serde(default)]
    pub stage: Stage,
    #[serde(default)]
    pub active_player_id: Option<PlayerId>,
    /// One entry per player, in table order.
    pub predictions: Vec<Prediction>,
}

impl Round {
    pub fn player_count(&self) -> usize {
        self.predictions.len()
    }

    pub fn total_tricks(&self) -> u32 {
        rules::total_tricks(self.cards_per_player, self.player_count())
    }

    pub fn total_predicted(&self) -> u32 {
        self.predictions.iter().map(|p| p.predicted).sum()
    }

    pub fn total_achieved(&self) -> u32 {
        self.predictions.iter().map(|p| p.achieved).sum()
    }

    pub fn remaining_tricks(&self) -> u32 {
        self.total_tricks().saturating_sub(self.total_achieved())
    }

    pub fn prediction(&self, player: PlayerId) -> Option<&Prediction> {
        self.predictions.iter().find(|p| p.player_id == player)
    }

    pub(crate) fn prediction_mut(&mut self, player: PlayerId) -> Option<&mut Prediction> {
        self.predictions.iter_mut().find(|p| p.player_id == player)
    }

    pub fn predicted_by_others(&self, player: PlayerId) -> u32 {
        self.predictions
            .iter()
            .filter(|p| p.player_id != player)
            .map(|p| p.predicted)
            .sum()
    }

    pub fn achieved_by_others(&self, player: PlayerId) -> u32 {
        self.predictions
            .iter()
            .filter(|p| p.player_id != player)
            .map(|p| p.achieved)
            .sum()
    }

    pub fn is_complete(&self) -> bool {
        self.stage == Stage::Complete
    }
}

impl Display for Round {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let active = self
            .active_player_id
            .map(|id| id.to_string())
            .unwrap_or("nobody".to_string());
        write!(
            f,
            "Round {} ({} cards, dealer {}, starter {}): {} stage, waiting on {}",
            self.round_number,
            self.cards_per_player,
            self.dealer_id,
            self.starter_id,
            self.stage,
            active
        )
    }
}
