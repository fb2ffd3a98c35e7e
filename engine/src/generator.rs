use crate::error::EngineError;
use crate::game_state::GameState;
use crate::round::{Prediction, Round, Stage};
use crate::rules;

/// Builds the round for `state.current_round`. Pure: the same state always
/// gives the same round, and nothing is appended here.
pub fn create_round(state: &GameState) -> Result<Round, EngineError> {
    let players = &state.players;
    if players.is_empty() {
        return Err(EngineError::precondition("cannot create a round without players"));
    }
    let round_number = state.current_round;
    if round_number == 0 || rules::is_game_complete(round_number) {
        return Err(EngineError::precondition(format!(
            "round {round_number} is outside 1..={}",
            rules::TOTAL_ROUNDS
        )));
    }

    let dealer_id = rules::dealer_for_round(round_number, players)
        .ok_or_else(|| EngineError::precondition("no dealer for an empty table"))?;
    let starter_id = rules::starter_for_dealer(dealer_id, players)
        .ok_or_else(|| EngineError::precondition(format!("dealer {dealer_id} is not seated")))?;

    Ok(Round {
        round_number,
        cards_per_player: rules::cards_per_player(round_number, players.len()),
        dealer_id,
        starter_id,
        stage: Stage::Prediction,
        active_player_id: Some(starter_id),
        predictions: players.iter().map(|p| Prediction::new(p.id)).collect(),
    })
}
