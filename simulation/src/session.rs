use engine::{Action, Event, GameState, PlayerId, Transition};
use storage::SnapshotStore;

use crate::error::SimulationError;

/// Owns the current game and writes it to a store after every accepted input.
/// A rejected input leaves both the game and the store as they were.
#[derive(Debug)]
pub struct GameSession<S: SnapshotStore> {
    store: S,
    key: String,
    state: Option<GameState>,
}

impl<S: SnapshotStore> GameSession<S> {
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            state: None,
        }
    }

    /// Picks up whatever game is saved under `key`. A store that cannot be
    /// read is treated like an empty one.
    pub fn resume(store: S, key: impl Into<String>) -> Self {
        let mut session = Self::new(store, key);
        session.state = match session.store.load(&session.key) {
            Ok(state) => state,
            Err(e) => {
                log::warn!("Could not load game {}: {e}", session.key);
                None
            }
        };
        if let Some(state) = &session.state {
            log::info!("Resumed game {} at round {}", session.key, state.current_round);
        }
        session
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn state(&self) -> Option<&GameState> {
        self.state.as_ref()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Seats the players and deals the first round. Replaces any game in
    /// progress.
    pub fn start<N: AsRef<str>>(&mut self, names: &[N]) -> Result<&GameState, SimulationError> {
        let Transition { state, .. } = GameState::from_names(names)?.with_current_round()?;
        self.replace(state)?;
        self.current()
    }

    pub fn submit(&mut self, player: PlayerId, action: Action) -> Result<Vec<Event>, SimulationError> {
        let transition = self.current()?.apply(player, action)?;
        self.commit(transition)
    }

    pub fn submit_predictions(&mut self, values: &[u32]) -> Result<Vec<Event>, SimulationError> {
        let transition = self.current()?.submit_all(values, Action::Predict)?;
        self.commit(transition)
    }

    pub fn submit_achieved(&mut self, values: &[u32]) -> Result<Vec<Event>, SimulationError> {
        let transition = self.current()?.submit_all(values, Action::Achieve)?;
        self.commit(transition)
    }

    /// Forgets the current game, in memory and in the store.
    pub fn reset(&mut self) -> Result<(), SimulationError> {
        self.state = None;
        self.store.clear(&self.key)?;
        log::info!("Cleared game {}", self.key);
        Ok(())
    }

    fn current(&self) -> Result<&GameState, SimulationError> {
        self.state.as_ref().ok_or(SimulationError::NotStarted)
    }

    fn commit(&mut self, transition: Transition) -> Result<Vec<Event>, SimulationError> {
        for event in &transition.events {
            log::debug!("{event}");
        }
        self.replace(transition.state)?;
        Ok(transition.events)
    }

    /// The new state is kept even when saving it fails, so the caller can
    /// retry the save without replaying the input.
    fn replace(&mut self, state: GameState) -> Result<(), SimulationError> {
        let state = self.state.insert(state);
        self.store.save(&self.key, state)?;
        Ok(())
    }

    /// Writes the current game again, e.g. after a failed save.
    pub fn save(&mut self) -> Result<(), SimulationError> {
        let state = self.state.as_ref().ok_or(SimulationError::NotStarted)?;
        self.store.save(&self.key, state)?;
        Ok(())
    }
}
