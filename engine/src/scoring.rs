//! Round scores and their aggregation over a game.

use std::cmp::Reverse;

use serde::{Deserialize, Serialize};

use crate::player::{Player, PlayerId};
use crate::round::Round;

/// Awarded on top of the achieved tricks for an exact prediction.
pub const EXACT_BONUS: i32 = 10;
/// Lost per trick of difference between predicted and achieved.
pub const PENALTY_PER_TRICK: i32 = 2;

/// Saturates at the bounds of `i32` for values no real round can produce.
pub fn score(predicted: u32, achieved: u32) -> i32 {
    if predicted == achieved {
        EXACT_BONUS.saturating_add(i32::try_from(achieved).unwrap_or(i32::MAX))
    } else {
        let missed = i32::try_from(predicted.abs_diff(achieved)).unwrap_or(i32::MAX);
        missed.saturating_mul(-PENALTY_PER_TRICK)
    }
}

/// Copy of `round` with every prediction's score filled in.
pub fn score_round(round: &Round) -> Round {
    let mut scored = round.clone();
    for prediction in scored.predictions.iter_mut() {
        prediction.score = score(prediction.predicted, prediction.achieved);
    }
    scored
}

/// Sum of the stored scores for `player`. Rounds without an entry for the
/// player add nothing.
pub fn total_score(player: PlayerId, rounds: &[Round]) -> i32 {
    rounds
        .iter()
        .filter_map(|round| round.prediction(player))
        .map(|p| p.score)
        .sum()
}

/// Running total after each completed round.
pub fn cumulative_scores(player: PlayerId, rounds: &[Round]) -> Vec<i32> {
    rounds
        .iter()
        .filter(|round| round.is_complete())
        .scan(0, |total, round| {
            *total += round.prediction(player).map_or(0, |p| p.score);
            Some(*total)
        })
        .collect()
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Standing {
    pub player_id: PlayerId,
    pub name: String,
    pub total: i32,
}

/// Players by total score, highest first. Equal totals keep table order.
pub fn standings(players: &[Player], rounds: &[Round]) -> Vec<Standing> {
    let mut standings: Vec<Standing> = players
        .iter()
        .map(|player| Standing {
            player_id: player.id,
            name: player.name.clone(),
            total: total_score(player.id, rounds),
        })
        .collect();
    standings.sort_by_key(|standing| Reverse(standing.total));
    standings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::round::{Prediction, Stage};

    fn scored_round(round_number: u32, scores: &[i32]) -> Round {
        Round {
            round_number,
            cards_per_player: 1,
            dealer_id: PlayerId(0),
            starter_id: PlayerId(1),
            stage: Stage::Complete,
            active_player_id: None,
            predictions: scores
                .iter()
                .enumerate()
                .map(|(i, &score)| Prediction {
                    player_id: PlayerId(i),
                    predicted: 0,
                    achieved: 0,
                    score,
                })
                .collect(),
        }
    }

    #[test]
    fn test_score_table() {
        assert_eq!(score(3, 3), 13);
        assert_eq!(score(3, 5), -4);
        assert_eq!(score(5, 3), -4);
        assert_eq!(score(0, 0), 10);
        assert_eq!(score(0, 7), -14);
    }

    #[test]
    fn test_score_saturates_on_huge_values() {
        assert_eq!(score(0, u32::MAX), i32::MIN);
        assert_eq!(score(u32::MAX, 0), i32::MIN);
        assert_eq!(score(u32::MAX, u32::MAX), i32::MAX);
        assert_eq!(score(0, 1 << 31), i32::MIN);
    }

    #[test]
    fn test_score_round_fills_every_entry() {
        let mut round = scored_round(1, &[0, 0, 0, 0]);
        round.predictions[0].predicted = 1;
        round.predictions[0].achieved = 1;
        round.predictions[1].predicted = 1;
        let scored = score_round(&round);
        let scores: Vec<i32> = scored.predictions.iter().map(|p| p.score).collect();
        assert_eq!(scores, vec![11, -2, 10, 10]);
    }

    #[test]
    fn test_total_score_is_not_clamped() {
        let rounds = vec![scored_round(1, &[-4, 12]), scored_round(2, &[-6, 10])];
        assert_eq!(total_score(PlayerId(0), &rounds), -10);
        assert_eq!(total_score(PlayerId(1), &rounds), 22);
        assert_eq!(total_score(PlayerId(5), &rounds), 0);
    }

    #[test]
    fn test_cumulative_scores_skip_open_rounds() {
        let mut open = scored_round(3, &[0, 0]);
        open.stage = Stage::Achieved;
        let rounds = vec![scored_round(1, &[11, -2]), scored_round(2, &[-4, 13]), open];
        assert_eq!(cumulative_scores(PlayerId(0), &rounds), vec![11, 7]);
        assert_eq!(cumulative_scores(PlayerId(1), &rounds), vec![-2, 11]);
    }

    #[test]
    fn test_standings_ties_keep_table_order() {
        let players: Vec<Player> = (0..4).map(|i| Player::new(i, format!("P{i}"))).collect();
        let rounds = vec![scored_round(1, &[10, 12, 12, -2])];
        let order: Vec<PlayerId> = standings(&players, &rounds)
            .iter()
            .map(|s| s.player_id)
            .collect();
        assert_eq!(order, vec![PlayerId(1), PlayerId(2), PlayerId(0), PlayerId(3)]);
    }
}
