pub mod kind;
pub mod outcome;

use std::fmt::Debug;

use engine::{PlayerId, Round};
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

pub use crate::kind::{OutcomeKind, StrategyKind};
pub use crate::outcome::{RandomOutcome, TrickOutcome, WeightedOutcome};

/// Chooses a prediction for a player whose turn it is. `legal` holds every
/// value the engine would accept right now and is never empty.
pub trait Strategy: Debug {
    fn select_prediction(&mut self, round: &Round, player: PlayerId, legal: &[u32]) -> u32;
}

#[derive(Debug)]
pub struct RandomStrategy {
    rng: StdRng,
}

impl RandomStrategy {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomStrategy {
    fn default() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl Strategy for RandomStrategy {
    fn select_prediction(&mut self, _round: &Round, _player: PlayerId, legal: &[u32]) -> u32 {
        legal.choose(&mut self.rng).copied().unwrap_or_default()
    }
}

/// Predicts its fair share of the round's tricks, or the nearest value it is
/// allowed to.
#[derive(Debug, Default)]
pub struct DefaultStrategy {}

impl Strategy for DefaultStrategy {
    fn select_prediction(&mut self, round: &Round, _player: PlayerId, legal: &[u32]) -> u32 {
        let fair_share = round.total_tricks() / round.player_count().max(1) as u32;
        legal
            .iter()
            .copied()
            .min_by_key(|value| value.abs_diff(fair_share))
            .unwrap_or_default()
    }
}

/// Always predicts as few tricks as it may.
#[derive(Debug, Default)]
pub struct CautiousStrategy {}

impl Strategy for CautiousStrategy {
    fn select_prediction(&mut self, _round: &Round, _player: PlayerId, legal: &[u32]) -> u32 {
        legal.iter().copied().min().unwrap_or_default()
    }
}
