//! Value legality for the active player.
//!
//! These checks only look at values. Whose turn it is and which stage the
//! round is in are enforced by the state machine before a value gets here.

use crate::error::InputRejection;
use crate::player::{Player, PlayerId};
use crate::round::Round;
use crate::rules;
use crate::turn;

pub fn check_range(round: &Round, value: u32) -> Result<(), InputRejection> {
    let max = round.total_tricks();
    if rules::value_range(max).contains(&value) {
        Ok(())
    } else {
        Err(InputRejection::OutOfRange { value, max })
    }
}

/// The one prediction the last player in sequence may not make, if any.
pub fn forbidden_prediction(round: &Round, players: &[Player], player: PlayerId) -> Option<u32> {
    if !turn::is_last_in_sequence(player, players, round.starter_id) {
        return None;
    }
    round
        .total_tricks()
        .checked_sub(round.predicted_by_others(player))
}

pub fn validate_prediction(
    round: &Round,
    players: &[Player],
    player: PlayerId,
    value: u32,
) -> Result<(), InputRejection> {
    check_range(round, value)?;
    if forbidden_prediction(round, players, player) == Some(value) {
        return Err(InputRejection::ForbiddenPrediction {
            value,
            others: round.predicted_by_others(player),
            total_tricks: round.total_tricks(),
        });
    }
    Ok(())
}

/// Range and running-total check for an achieved value. The completion check
/// for the last player is `validate_completion`, run on the updated round.
pub fn validate_achieved(round: &Round, player: PlayerId, value: u32) -> Result<(), InputRejection> {
    check_range(round, value)?;
    let others = round.achieved_by_others(player);
    let total_tricks = round.total_tricks();
    if others + value > total_tricks {
        return Err(InputRejection::AchievedExceedsTotal {
            value,
            others,
            total_tricks,
        });
    }
    Ok(())
}

pub fn validate_completion(round: &Round) -> Result<(), InputRejection> {
    let achieved_total = round.total_achieved();
    let required_total = round.total_tricks();
    if achieved_total != required_total {
        return Err(InputRejection::AchievedTotalMismatch {
            achieved_total,
            required_total,
        });
    }
    Ok(())
}

pub fn legal_predictions(round: &Round, players: &[Player], player: PlayerId) -> Vec<u32> {
    let forbidden = forbidden_prediction(round, players, player);
    rules::value_range(round.total_tricks())
        .filter(|&value| Some(value) != forbidden)
        .collect()
}

/// Achieved values that pass every check. The last player in sequence has
/// exactly one: whatever is left of the available tricks.
pub fn legal_achieved(round: &Round, players: &[Player], player: PlayerId) -> Vec<u32> {
    let remaining = round
        .total_tricks()
        .saturating_sub(round.achieved_by_others(player));
    if turn::is_last_in_sequence(player, players, round.starter_id) {
        vec![remaining]
    } else {
        (0..=remaining).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::round::{Prediction, Stage};

    fn table() -> Vec<Player> {
        (0..4).map(|i| Player::new(i, format!("P{i}"))).collect()
    }

    /// Round 3 for 4 players: 3 cards each, 12 tricks, dealer 3, starter 0.
    fn round_three(predicted: [u32; 4], achieved: [u32; 4]) -> Round {
        Round {
            round_number: 3,
            cards_per_player: 3,
            dealer_id: PlayerId(3),
            starter_id: PlayerId(0),
            stage: Stage::Prediction,
            active_player_id: Some(PlayerId(0)),
            predictions: (0..4)
                .map(|i| Prediction {
                    player_id: PlayerId(i),
                    predicted: predicted[i],
                    achieved: achieved[i],
                    score: 0,
                })
                .collect(),
        }
    }

    #[test]
    fn test_range_is_total_tricks() {
        let round = round_three([0; 4], [0; 4]);
        assert!(check_range(&round, 12).is_ok());
        assert_eq!(
            check_range(&round, 13),
            Err(InputRejection::OutOfRange { value: 13, max: 12 })
        );
    }

    #[test]
    fn test_last_player_cannot_make_totals_match() {
        let players = table();
        let round = round_three([2, 3, 4, 0], [0; 4]);
        assert_eq!(forbidden_prediction(&round, &players, PlayerId(3)), Some(3));
        assert_eq!(
            validate_prediction(&round, &players, PlayerId(3), 3),
            Err(InputRejection::ForbiddenPrediction {
                value: 3,
                others: 9,
                total_tricks: 12
            })
        );
        assert!(validate_prediction(&round, &players, PlayerId(3), 2).is_ok());
        assert!(validate_prediction(&round, &players, PlayerId(3), 4).is_ok());
    }

    #[test]
    fn test_earlier_players_may_match_total() {
        let players = table();
        let round = round_three([12, 0, 0, 0], [0; 4]);
        assert_eq!(forbidden_prediction(&round, &players, PlayerId(1)), None);
        assert!(validate_prediction(&round, &players, PlayerId(1), 0).is_ok());
    }

    #[test]
    fn test_overbid_leaves_nothing_forbidden() {
        let players = table();
        let round = round_three([6, 6, 6, 0], [0; 4]);
        assert_eq!(forbidden_prediction(&round, &players, PlayerId(3)), None);
        assert_eq!(legal_predictions(&round, &players, PlayerId(3)).len(), 13);
    }

    #[test]
    fn test_achieved_running_total() {
        let round = round_three([0; 4], [5, 5, 0, 0]);
        assert!(validate_achieved(&round, PlayerId(2), 2).is_ok());
        assert_eq!(
            validate_achieved(&round, PlayerId(2), 3),
            Err(InputRejection::AchievedExceedsTotal {
                value: 3,
                others: 10,
                total_tricks: 12
            })
        );
    }

    #[test]
    fn test_completion_requires_exact_total() {
        assert!(validate_completion(&round_three([0; 4], [3, 3, 3, 3])).is_ok());
        assert_eq!(
            validate_completion(&round_three([0; 4], [3, 3, 3, 2])),
            Err(InputRejection::AchievedTotalMismatch {
                achieved_total: 11,
                required_total: 12
            })
        );
    }

    #[test]
    fn test_legal_achieved_for_last_player_is_remainder() {
        let players = table();
        let round = round_three([0; 4], [4, 4, 1, 0]);
        assert_eq!(legal_achieved(&round, &players, PlayerId(3)), vec![3]);
        assert_eq!(legal_achieved(&round, &players, PlayerId(2)), vec![0, 1, 2, 3, 4]);
    }
}
