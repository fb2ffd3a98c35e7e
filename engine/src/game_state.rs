use std::fmt::Display;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::action::{Action, Event, Transition};
use crate::error::{EngineError, InputRejection, SetupError};
use crate::generator::create_round;
use crate::player::{Player, PlayerId};
use crate::round::{Round, Stage};
use crate::scoring::{self, Standing};
use crate::setup::confirm_players;
use crate::{rules, turn, validator};

/// Whole-game state. Every input takes `&self` and hands back a replacement
/// state, so a rejected input never leaves anything half applied.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    /// Insertion order is table order.
    pub players: Vec<Player>,
    /// `rounds[i]` is round `i + 1`.
    pub rounds: Vec<Round>,
    pub current_round: u32,
    pub game_started: bool,
    pub game_completed: bool,
}

impl GameState {
    pub fn new(players: Vec<Player>) -> Self {
        log::info!(
            "New game with {} players: {}",
            players.len(),
            players.iter().join(", ")
        );
        Self {
            players,
            rounds: Vec::new(),
            current_round: 1,
            game_started: true,
            game_completed: false,
        }
    }

    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Result<Self, SetupError> {
        Ok(Self::new(confirm_players(names)?))
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn get_player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    fn round_index(&self) -> Option<usize> {
        (self.current_round as usize).checked_sub(1)
    }

    /// The round currently taking input, if it has been created yet.
    pub fn active_round(&self) -> Option<&Round> {
        if self.game_completed {
            return None;
        }
        self.round_index().and_then(|idx| self.rounds.get(idx))
    }

    pub fn active_player(&self) -> Option<PlayerId> {
        self.active_round().and_then(|round| round.active_player_id)
    }

    /// Materializes the current round if it does not exist yet.
    pub fn with_current_round(&self) -> Result<Transition, EngineError> {
        let mut state = self.clone();
        let mut events = Vec::new();
        if !state.game_completed {
            state.ensure_round(&mut events)?;
        }
        Ok(Transition { state, events })
    }

    fn ensure_round(&mut self, events: &mut Vec<Event>) -> Result<usize, EngineError> {
        let idx = self
            .round_index()
            .ok_or_else(|| EngineError::precondition("current round must be at least 1"))?;
        if idx < self.rounds.len() {
            return Ok(idx);
        }
        if idx != self.rounds.len() {
            return Err(EngineError::precondition(format!(
                "round {} cannot be created after only {} rounds",
                self.current_round,
                self.rounds.len()
            )));
        }
        let round = create_round(self)?;
        log::debug!("{round}");
        events.push(Event::RoundStarted {
            round: round.round_number,
            dealer: round.dealer_id,
            starter: round.starter_id,
            cards_per_player: round.cards_per_player,
        });
        self.rounds.push(round);
        Ok(idx)
    }

    /// Applies one player's input. On rejection `self` is the state to keep.
    pub fn apply(&self, player: PlayerId, action: Action) -> Result<Transition, EngineError> {
        if self.game_completed {
            return Err(InputRejection::GameCompleted.into());
        }
        if !self.game_started {
            return Err(EngineError::precondition("the game has not been started"));
        }
        if self.get_player(player).is_none() {
            return Err(InputRejection::UnknownPlayer(player).into());
        }

        let mut state = self.clone();
        let mut events = Vec::new();
        let idx = state.ensure_round(&mut events)?;

        let round = &state.rounds[idx];
        let previous_stage = round.stage;
        let updated = match action {
            Action::Predict(value) => record_prediction(round, &state.players, player, value),
            Action::Achieve(value) => record_achieved(round, &state.players, player, value),
            Action::AmendAchieved(value) => amend_achieved(round, &state.players, player, value),
        }
        .map_err(|rejection| {
            log::debug!("Rejected {player} trying to {action}: {rejection}");
            rejection
        })?;

        let name = state.get_player(player).map_or("unknown", |p| p.name.as_str());
        log::debug!("{name} did: {action}");
        events.push(Event::Recorded {
            round: updated.round_number,
            player,
            action,
        });
        if updated.stage != previous_stage {
            events.push(Event::StageAdvanced {
                round: updated.round_number,
                stage: updated.stage,
            });
        }

        let completed = updated.is_complete();
        state.rounds[idx] = updated;
        if completed {
            events.push(Event::RoundCompleted {
                round: state.current_round,
            });
            state.advance_round(&mut events)?;
        }
        Ok(Transition { state, events })
    }

    fn advance_round(&mut self, events: &mut Vec<Event>) -> Result<(), EngineError> {
        log::info!(
            "Round {} complete, standings: {}",
            self.current_round,
            self.standings()
                .iter()
                .map(|s| format!("{} {}", s.name, s.total))
                .join(", ")
        );
        self.current_round += 1;
        if rules::is_game_complete(self.current_round) {
            self.game_completed = true;
            events.push(Event::GameCompleted);
            let results_str = self
                .standings()
                .iter()
                .enumerate()
                .map(|(idx, standing)| format!("{}. {} ({})", idx + 1, standing.name, standing.total))
                .join("\n");
            log::info!("Game over! Results:\n{results_str}");
            return Ok(());
        }
        self.ensure_round(events)?;
        Ok(())
    }

    pub fn submit_prediction(&self, player: PlayerId, value: u32) -> Result<GameState, EngineError> {
        self.apply(player, Action::Predict(value))
            .map(Transition::into_state)
    }

    pub fn submit_achieved(&self, player: PlayerId, value: u32) -> Result<GameState, EngineError> {
        self.apply(player, Action::Achieve(value))
            .map(Transition::into_state)
    }

    pub fn amend_achieved(&self, player: PlayerId, value: u32) -> Result<GameState, EngineError> {
        self.apply(player, Action::AmendAchieved(value))
            .map(Transition::into_state)
    }

    /// One prediction per player in table order, applied in turn order. All of
    /// them are accepted or none are.
    pub fn submit_all_predictions(&self, values: &[u32]) -> Result<GameState, EngineError> {
        self.submit_all(values, Action::Predict)
            .map(Transition::into_state)
    }

    /// One achieved value per player in table order, applied in turn order.
    /// All of them are accepted or none are.
    pub fn submit_all_achieved(&self, values: &[u32]) -> Result<GameState, EngineError> {
        self.submit_all(values, Action::Achieve)
            .map(Transition::into_state)
    }

    /// Walks the rest of the current stage starting at the active player.
    /// Players who already recorded a value in this stage keep it.
    pub fn submit_all(
        &self,
        values: &[u32],
        make_action: fn(u32) -> Action,
    ) -> Result<Transition, EngineError> {
        if self.game_completed {
            return Err(InputRejection::GameCompleted.into());
        }
        if values.len() != self.players.len() {
            return Err(EngineError::precondition(format!(
                "expected {} values, got {}",
                self.players.len(),
                values.len()
            )));
        }

        let Transition { mut state, mut events } = self.with_current_round()?;
        let (stage, starter, active) = match state.active_round() {
            Some(round) => (round.stage, round.starter_id, round.active_player_id),
            None => return Err(EngineError::precondition("no round is taking input")),
        };
        let expected = make_action(0).stage();
        if stage != expected {
            return Err(InputRejection::WrongStage {
                stage,
                action: make_action(values[0]),
            }
            .into());
        }

        let order = turn::sequence(&state.players, starter);
        let skip = active
            .and_then(|a| order.iter().position(|&p| p == a))
            .unwrap_or(0);
        for player in order.into_iter().skip(skip) {
            let seat = state
                .players
                .iter()
                .position(|p| p.id == player)
                .ok_or(InputRejection::UnknownPlayer(player))?;
            let transition = state.apply(player, make_action(values[seat]))?;
            state = transition.state;
            events.extend(transition.events);
        }
        Ok(Transition { state, events })
    }

    pub fn total_score(&self, player: PlayerId) -> i32 {
        scoring::total_score(player, &self.rounds)
    }

    pub fn cumulative_scores(&self, player: PlayerId) -> Vec<i32> {
        scoring::cumulative_scores(player, &self.rounds)
    }

    pub fn standings(&self) -> Vec<Standing> {
        scoring::standings(&self.players, &self.rounds)
    }

    /// Checks the structural invariants of a state, e.g. one loaded from a
    /// snapshot.
    pub fn validate(&self) -> Result<(), EngineError> {
        let n = self.players.len();
        if !(rules::MIN_PLAYERS..=rules::MAX_PLAYERS).contains(&n) {
            return Err(EngineError::precondition(format!("{n} players is not a valid table")));
        }
        if let Some((idx, player)) = self
            .players
            .iter()
            .enumerate()
            .find(|(idx, p)| p.id.index() != *idx)
        {
            return Err(EngineError::precondition(format!(
                "{} is seated at position {idx}",
                player.id
            )));
        }
        if self.current_round == 0 {
            return Err(EngineError::precondition("current round must be at least 1"));
        }
        if self.game_completed != rules::is_game_complete(self.current_round) {
            return Err(EngineError::precondition(format!(
                "game completed flag {} disagrees with round {}",
                self.game_completed, self.current_round
            )));
        }

        let frozen = self.current_round as usize - 1;
        let max_rounds = if self.game_completed { frozen } else { frozen + 1 };
        if self.rounds.len() < frozen || self.rounds.len() > max_rounds {
            return Err(EngineError::precondition(format!(
                "{} rounds recorded while on round {}",
                self.rounds.len(),
                self.current_round
            )));
        }
        for (idx, round) in self.rounds.iter().enumerate() {
            let number = idx as u32 + 1;
            if round.round_number != number {
                return Err(EngineError::precondition(format!(
                    "round at position {idx} claims to be round {}",
                    round.round_number
                )));
            }
            if round.cards_per_player != rules::cards_per_player(number, n) {
                return Err(EngineError::precondition(format!(
                    "round {number} has {} cards per player",
                    round.cards_per_player
                )));
            }
            let in_order = round.predictions.len() == n
                && round
                    .predictions
                    .iter()
                    .zip(&self.players)
                    .all(|(prediction, player)| prediction.player_id == player.id);
            if !in_order {
                return Err(EngineError::precondition(format!(
                    "round {number} predictions do not match the table"
                )));
            }
            let dealer = rules::dealer_for_round(number, &self.players);
            let starter = dealer.and_then(|d| rules::starter_for_dealer(d, &self.players));
            if dealer != Some(round.dealer_id) || starter != Some(round.starter_id) {
                return Err(EngineError::precondition(format!(
                    "round {number} is dealt by {} and started by {}",
                    round.dealer_id, round.starter_id
                )));
            }
            if idx < frozen && round.stage != Stage::Complete {
                return Err(EngineError::precondition(format!(
                    "round {number} is not complete but the game moved on"
                )));
            }
        }

        if let Some(round) = self.rounds.get(frozen) {
            if round.stage == Stage::Complete {
                return Err(EngineError::precondition(format!(
                    "round {} is complete but still current",
                    round.round_number
                )));
            }
            match round.active_player_id {
                Some(active) if self.get_player(active).is_some() => {}
                other => {
                    return Err(EngineError::precondition(format!(
                        "round {} has no seated active player ({other:?})",
                        round.round_number
                    )));
                }
            }
        }
        Ok(())
    }
}

fn check_turn(round: &Round, player: PlayerId) -> Result<(), InputRejection> {
    if round.active_player_id == Some(player) {
        Ok(())
    } else {
        Err(InputRejection::NotPlayersTurn {
            expected: round.active_player_id,
            actual: player,
        })
    }
}

fn check_stage(round: &Round, action: Action) -> Result<(), InputRejection> {
    if round.stage == action.stage() {
        Ok(())
    } else {
        Err(InputRejection::WrongStage {
            stage: round.stage,
            action,
        })
    }
}

fn record_prediction(
    round: &Round,
    players: &[Player],
    player: PlayerId,
    value: u32,
) -> Result<Round, InputRejection> {
    check_stage(round, Action::Predict(value))?;
    check_turn(round, player)?;
    validator::validate_prediction(round, players, player, value)?;

    let mut updated = round.clone();
    if let Some(prediction) = updated.prediction_mut(player) {
        prediction.predicted = value;
    }
    if turn::is_last_in_sequence(player, players, round.starter_id) {
        updated.stage = Stage::Achieved;
        updated.active_player_id = Some(round.starter_id);
    } else {
        updated.active_player_id = Some(turn::next_player(Some(player), players, round.starter_id));
    }
    Ok(updated)
}

fn record_achieved(
    round: &Round,
    players: &[Player],
    player: PlayerId,
    value: u32,
) -> Result<Round, InputRejection> {
    check_stage(round, Action::Achieve(value))?;
    check_turn(round, player)?;
    validator::validate_achieved(round, player, value)?;

    let mut updated = round.clone();
    if let Some(prediction) = updated.prediction_mut(player) {
        prediction.achieved = value;
    }
    if turn::is_last_in_sequence(player, players, round.starter_id) {
        validator::validate_completion(&updated)?;
        let mut scored = scoring::score_round(&updated);
        scored.stage = Stage::Complete;
        scored.active_player_id = None;
        return Ok(scored);
    }
    updated.active_player_id = Some(turn::next_player(Some(player), players, round.starter_id));
    Ok(updated)
}

/// Re-entry of an achieved value. The turn stays where it is.
fn amend_achieved(
    round: &Round,
    players: &[Player],
    player: PlayerId,
    value: u32,
) -> Result<Round, InputRejection> {
    check_stage(round, Action::AmendAchieved(value))?;
    let recorded = match round.active_player_id {
        Some(active) => {
            let position = turn::position_in_sequence(player, players, round.starter_id);
            let active_position = turn::position_in_sequence(active, players, round.starter_id);
            matches!((position, active_position), (Some(p), Some(a)) if p < a)
        }
        None => false,
    };
    if !recorded {
        return Err(InputRejection::NotYetRecorded { player });
    }
    validator::validate_achieved(round, player, value)?;

    let mut updated = round.clone();
    if let Some(prediction) = updated.prediction_mut(player) {
        prediction.achieved = value;
    }
    Ok(updated)
}

impl Display for GameState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let round_str = if self.game_completed {
            "Game over".to_string()
        } else {
            self.active_round()
                .map(|round| format!("{round}"))
                .unwrap_or(format!("Round {} (not dealt)", self.current_round))
        };
        let players_str = self
            .players
            .iter()
            .map(|player| {
                let current = self
                    .active_round()
                    .and_then(|round| round.prediction(player.id))
                    .map(|p| format!(" predicted {} achieved {}", p.predicted, p.achieved))
                    .unwrap_or_default();
                format!("{}: {} points{current}", player.name, self.total_score(player.id))
            })
            .join("\n");
        write!(f, "\n{round_str}\nScores:\n{players_str}")
    }
}
