use std::path::Path;

use serde::{Deserialize, Serialize};
use storage::StoreConfig;
use strategies::{OutcomeKind, StrategyKind};

use crate::error::SimulationError;

fn default_games() -> usize {
    1
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatConfig {
    pub name: String,
    #[serde(default)]
    pub strategy: StrategyKind,
}

/// A batch of automated games, usually read from YAML:
///
/// ```yaml
/// games: 3
/// seed: 42
/// outcome: weighted
/// store:
///   kind: sqlite
///   url: simulations.db
/// seats:
///   - name: Alice
///     strategy: random
///   - name: Bob
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub seats: Vec<SeatConfig>,
    #[serde(default = "default_games")]
    pub games: usize,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub outcome: OutcomeKind,
    #[serde(default)]
    pub store: StoreConfig,
}

impl SimulationConfig {
    pub fn new(seats: Vec<SeatConfig>) -> Self {
        Self {
            seats,
            games: default_games(),
            seed: None,
            outcome: OutcomeKind::default(),
            store: StoreConfig::default(),
        }
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, SimulationError> {
        serde_yaml::from_str(yaml).map_err(|e| SimulationError::Config(e.to_string()))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SimulationError> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path)
            .map_err(|e| SimulationError::Config(format!("{}: {e}", path.display())))?;
        Self::from_yaml(&yaml)
    }

    pub fn names(&self) -> Vec<&str> {
        self.seats.iter().map(|seat| seat.name.as_str()).collect()
    }

    /// Seed for one consumer of randomness in one game, so that seeded runs
    /// are reproducible without every seat drawing the same numbers.
    pub fn derived_seed(&self, game: usize, slot: usize) -> Option<u64> {
        let stride = self.seats.len() as u64 + 1;
        self.seed
            .map(|seed| seed.wrapping_add(game as u64 * stride + slot as u64))
    }
}
