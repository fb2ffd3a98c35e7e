//! Property tests for the round schedule, turn order, validation and scoring.

use proptest::prelude::*;

use engine::rules::{self, DECK_SIZE, TOTAL_ROUNDS};
use engine::{
    create_round, next_player, score, total_score, validator, GameState, Player, PlayerId, Round,
    Stage,
};

fn table(n: usize) -> Vec<Player> {
    (0..n).map(|i| Player::new(i, format!("P{i}"))).collect()
}

fn state_at(n: usize, round: u32) -> GameState {
    let mut state = GameState::new(table(n));
    state.current_round = round;
    state
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// Hand sizes ramp up to round 7, back down to round 13, and never exceed
    /// what the deck can deal.
    #[test]
    fn prop_cards_per_player_schedule(round in 1u32..=TOTAL_ROUNDS, n in 1usize..=12) {
        let cap = DECK_SIZE / n as u32;
        let expected = if round <= 7 { round.min(cap) } else { (14 - round).min(cap) };
        prop_assert_eq!(rules::cards_per_player(round, n), expected);
    }

    /// Dealer and starter rotate with the round number.
    #[test]
    fn prop_dealer_and_starter(round in 1u32..=TOTAL_ROUNDS, n in 4usize..=6) {
        let created = create_round(&state_at(n, round)).unwrap();
        prop_assert_eq!(created.dealer_id, PlayerId(round as usize % n));
        prop_assert_eq!(created.starter_id, PlayerId((round as usize % n + 1) % n));
        prop_assert_eq!(created.active_player_id, Some(created.starter_id));
        prop_assert_eq!(created.stage, Stage::Prediction);
    }

    /// Generating a round twice from the same state gives the same round.
    #[test]
    fn prop_round_generation_is_idempotent(round in 1u32..=TOTAL_ROUNDS, n in 4usize..=6) {
        let state = state_at(n, round);
        prop_assert_eq!(create_round(&state).unwrap(), create_round(&state).unwrap());
    }

    /// Following next_player from the starter visits everyone once before
    /// coming back to the starter.
    #[test]
    fn prop_next_player_cycles_the_table(n in 1usize..=8, start in 0usize..8) {
        let players = table(n);
        let starter = PlayerId(start % n);
        let mut seen = Vec::new();
        let mut current = next_player(None, &players, starter);
        for _ in 0..n {
            prop_assert!(!seen.contains(&current));
            seen.push(current);
            current = next_player(Some(current), &players, starter);
        }
        prop_assert_eq!(current, starter);
        prop_assert_eq!(seen.len(), n);
    }

    #[test]
    fn prop_score_formula(predicted in 0u32..=40, achieved in 0u32..=40) {
        let s = score(predicted, achieved);
        if predicted == achieved {
            prop_assert_eq!(s, 10 + achieved as i32);
        } else {
            prop_assert_eq!(s, -2 * (predicted as i32 - achieved as i32).abs());
        }
    }

    /// Total score is the plain sum of stored scores, whatever the order.
    #[test]
    fn prop_total_score_is_order_independent(scores in prop::collection::vec(-30i32..=30, 0..13)) {
        let rounds: Vec<Round> = scores
            .iter()
            .enumerate()
            .map(|(idx, &s)| {
                let mut round = create_round(&state_at(4, idx as u32 + 1)).unwrap();
                round.predictions[0].score = s;
                round
            })
            .collect();
        let mut reversed = rounds.clone();
        reversed.reverse();
        let expected: i32 = scores.iter().sum();
        prop_assert_eq!(total_score(PlayerId(0), &rounds), expected);
        prop_assert_eq!(total_score(PlayerId(0), &reversed), expected);
    }

    /// The last predictor has exactly one forbidden value while the others
    /// have not overbid, and none once they have.
    #[test]
    fn prop_last_predictor_has_at_most_one_forbidden_value(
        round_number in 1u32..=TOTAL_ROUNDS,
        predicted in prop::collection::vec(0u32..=10, 3),
    ) {
        let players = table(4);
        let mut round = create_round(&state_at(4, round_number)).unwrap();
        let order = engine::turn::sequence(&players, round.starter_id);
        for (player, value) in order.iter().zip(&predicted) {
            round.predictions[player.index()].predicted = (*value).min(round.total_tricks());
        }
        let last = order[3];
        let legal = validator::legal_predictions(&round, &players, last);
        let others = round.predicted_by_others(last);
        let total = round.total_tricks();
        if others <= total {
            prop_assert_eq!(legal.len() as u32, total);
            prop_assert!(!legal.contains(&(total - others)));
        } else {
            prop_assert_eq!(legal.len() as u32, total + 1);
        }
    }

    /// Playing out a round with any legal choices always completes it with
    /// the achieved total equal to the available tricks.
    #[test]
    fn prop_legal_play_always_completes_round(
        n in 4usize..=6,
        picks in prop::collection::vec(0usize..100, 12),
    ) {
        let mut state = GameState::new(table(n)).with_current_round().unwrap().state;
        let mut pick = picks.into_iter().cycle();
        while state.current_round == 1 {
            let round = state.active_round().unwrap();
            let player = round.active_player_id.unwrap();
            let action = match round.stage {
                Stage::Prediction => {
                    let legal = validator::legal_predictions(round, &state.players, player);
                    engine::Action::Predict(legal[pick.next().unwrap() % legal.len()])
                }
                _ => {
                    let legal = validator::legal_achieved(round, &state.players, player);
                    engine::Action::Achieve(legal[pick.next().unwrap() % legal.len()])
                }
            };
            state = state.apply(player, action).unwrap().state;
        }
        let done = &state.rounds[0];
        prop_assert!(done.is_complete());
        prop_assert_eq!(done.total_achieved(), done.total_tricks());
        prop_assert!(state.validate().is_ok());
    }
}
