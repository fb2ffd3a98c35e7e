//! Per-player prediction statistics over the completed rounds of a game.

use serde::{Deserialize, Serialize};

use crate::game_state::GameState;
use crate::player::PlayerId;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionStats {
    pub player_id: PlayerId,
    pub rounds_played: u32,
    pub total_predicted: u32,
    pub average_prediction: f64,
    /// Sum over rounds of predicted / cards per player.
    pub boldness: f64,
    pub correct_predictions: u32,
    /// 1 is the boldest player.
    pub rank: usize,
}

impl PredictionStats {
    pub fn hit_rate(&self) -> f64 {
        if self.rounds_played == 0 {
            return 0.0;
        }
        self.correct_predictions as f64 / self.rounds_played as f64
    }
}

/// Statistics for every player, boldest first.
pub fn prediction_stats(state: &GameState) -> Vec<PredictionStats> {
    let completed: Vec<_> = state.rounds.iter().filter(|r| r.is_complete()).collect();

    let mut stats: Vec<PredictionStats> = state
        .players
        .iter()
        .map(|player| {
            let mut total_predicted = 0;
            let mut boldness = 0.0;
            let mut correct_predictions = 0;
            let mut rounds_played = 0;
            for round in &completed {
                let Some(prediction) = round.prediction(player.id) else {
                    continue;
                };
                rounds_played += 1;
                total_predicted += prediction.predicted;
                boldness += prediction.predicted as f64 / round.cards_per_player as f64;
                if prediction.is_exact() {
                    correct_predictions += 1;
                }
            }
            let average_prediction = if rounds_played == 0 {
                0.0
            } else {
                total_predicted as f64 / rounds_played as f64
            };
            PredictionStats {
                player_id: player.id,
                rounds_played,
                total_predicted,
                average_prediction,
                boldness,
                correct_predictions,
                rank: 0,
            }
        })
        .collect();

    stats.sort_by(|a, b| b.boldness.total_cmp(&a.boldness));
    for (idx, entry) in stats.iter_mut().enumerate() {
        entry.rank = idx + 1;
    }
    stats
}
