pub mod config;
pub mod error;
pub mod gameplay;
pub mod session;

use chrono::{DateTime, Utc};
use engine::{prediction_stats, PredictionStats, Standing};
use itertools::Itertools;
use serde::Serialize;
use strategies::Strategy;
use uuid::Uuid;

pub use config::{SeatConfig, SimulationConfig};
pub use error::SimulationError;
pub use gameplay::run_game;
pub use session::GameSession;

/// Outcome of one automated game.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSummary {
    /// Store key the final snapshot was saved under.
    pub key: String,
    pub winner: String,
    pub standings: Vec<Standing>,
    pub stats: Vec<PredictionStats>,
    pub rounds_played: usize,
    pub finished_at: DateTime<Utc>,
}

/// Runs `config.games` complete games against the configured store, each
/// under its own `simulation-<uuid>` key.
pub fn simulate(config: &SimulationConfig) -> Result<Vec<GameSummary>, SimulationError> {
    let names = config.names();
    engine::confirm_players(names.as_slice())?;
    let mut store = config.store.open()?;

    let mut summaries = Vec::with_capacity(config.games);
    for game in 0..config.games {
        let key = format!("simulation-{}", Uuid::new_v4());
        let mut strategies: Vec<Box<dyn Strategy>> = config
            .seats
            .iter()
            .enumerate()
            .map(|(seat, s)| s.strategy.build(config.derived_seed(game, seat)))
            .collect();
        let mut outcome = config
            .outcome
            .build(config.derived_seed(game, config.seats.len()));

        let mut session = GameSession::new(&mut store, key.clone());
        session.start(names.as_slice())?;
        let standings = run_game(&mut session, &mut strategies, &mut *outcome)?;
        let state = session.state().ok_or(SimulationError::NotStarted)?;

        let summary = GameSummary {
            key,
            winner: standings
                .first()
                .map(|s| s.name.clone())
                .unwrap_or_default(),
            stats: prediction_stats(state),
            rounds_played: state.rounds.len(),
            standings,
            finished_at: Utc::now(),
        };
        log::info!(
            "Game {} of {} won by {} ({})",
            game + 1,
            config.games,
            summary.winner,
            summary
                .standings
                .iter()
                .map(|s| format!("{}: {}", s.name, s.total))
                .join(", ")
        );
        summaries.push(summary);
    }
    Ok(summaries)
}
