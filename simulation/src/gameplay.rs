use engine::{validator, Action, EngineError, InputRejection, Stage, Standing};
use storage::SnapshotStore;
use strategies::{Strategy, TrickOutcome};

use crate::error::SimulationError;
use crate::session::GameSession;

/// Plays the session's game to the end. Predictions come from `strategies`,
/// one per seat in table order, and the tricks each round from `outcome`.
pub fn run_game<S: SnapshotStore>(
    session: &mut GameSession<S>,
    strategies: &mut [Box<dyn Strategy>],
    outcome: &mut dyn TrickOutcome,
) -> Result<Vec<Standing>, SimulationError> {
    let player_count = session
        .state()
        .ok_or(SimulationError::NotStarted)?
        .player_count();
    if strategies.len() != player_count {
        return Err(SimulationError::Config(format!(
            "{} strategies for {player_count} players",
            strategies.len()
        )));
    }

    loop {
        let state = session
            .state()
            .ok_or(SimulationError::NotStarted)?
            .with_current_round()?
            .into_state();
        if state.game_completed {
            break;
        }
        log::debug!("{state}");

        let round = state
            .active_round()
            .ok_or_else(|| EngineError::precondition("no round is taking input"))?;
        let player = round
            .active_player_id
            .ok_or_else(|| EngineError::precondition(format!("nobody is active in {round}")))?;
        let seat = state
            .players
            .iter()
            .position(|p| p.id == player)
            .ok_or(EngineError::Rejected(InputRejection::UnknownPlayer(player)))?;

        match round.stage {
            Stage::Prediction => {
                let legal = validator::legal_predictions(round, &state.players, player);
                let choice = strategies[seat].select_prediction(round, player, &legal);
                if !legal.contains(&choice) {
                    return Err(SimulationError::IllegalChoice {
                        player,
                        value: choice,
                        stage: round.stage,
                    });
                }
                session.submit(player, Action::Predict(choice))?;
            }
            Stage::Achieved if round.active_player_id == Some(round.starter_id) => {
                let tricks = outcome.achieved(round);
                session.submit_achieved(&tricks)?;
            }
            Stage::Achieved => {
                // resumed halfway through the stage, so only fill in the rest
                let wanted = outcome.achieved(round).get(seat).copied().unwrap_or_default();
                let legal = validator::legal_achieved(round, &state.players, player);
                let value = legal
                    .iter()
                    .copied()
                    .min_by_key(|v| v.abs_diff(wanted))
                    .unwrap_or_default();
                session.submit(player, Action::Achieve(value))?;
            }
            Stage::Complete => {
                return Err(EngineError::precondition(format!("{round} is still active")).into());
            }
        }
    }

    let state = session.state().ok_or(SimulationError::NotStarted)?;
    log::info!(
        "Finished game {} after {} rounds",
        session.key(),
        state.rounds.len()
    );
    Ok(state.standings())
}
