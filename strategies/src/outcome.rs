//! Stand-ins for actually playing the cards: decide how many tricks each
//! player ends up taking in a round.

use std::fmt::Debug;

use engine::Round;
use itertools::Itertools;
use rand::distributions::{Distribution, WeightedIndex};
use rand::{rngs::StdRng, Rng, SeedableRng};

pub trait TrickOutcome: Debug {
    /// Tricks taken per player, in table order. Always sums to the round's
    /// available tricks.
    fn achieved(&mut self, round: &Round) -> Vec<u32>;
}

/// Every trick goes to a uniformly chosen player.
#[derive(Debug)]
pub struct RandomOutcome {
    rng: StdRng,
}

impl RandomOutcome {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomOutcome {
    fn default() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl TrickOutcome for RandomOutcome {
    fn achieved(&mut self, round: &Round) -> Vec<u32> {
        let n = round.player_count();
        let mut tricks = vec![0; n];
        if n == 0 {
            return tricks;
        }
        for _ in 0..round.total_tricks() {
            tricks[self.rng.gen_range(0..n)] += 1;
        }
        log::debug!("Round {} tricks: {}", round.round_number, tricks.iter().join(","));
        tricks
    }
}

/// Tricks lean towards the players who predicted more of them: each trick is
/// won with weight `predicted + 1`.
#[derive(Debug)]
pub struct WeightedOutcome {
    rng: StdRng,
}

impl WeightedOutcome {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for WeightedOutcome {
    fn default() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl TrickOutcome for WeightedOutcome {
    fn achieved(&mut self, round: &Round) -> Vec<u32> {
        let n = round.player_count();
        let mut tricks = vec![0; n];
        let weights = round.predictions.iter().map(|p| p.predicted + 1);
        let dist = match WeightedIndex::new(weights) {
            Ok(dist) => dist,
            Err(e) => {
                log::warn!("No trick weights for round {}: {e}", round.round_number);
                return tricks;
            }
        };
        for _ in 0..round.total_tricks() {
            tricks[dist.sample(&mut self.rng)] += 1;
        }
        log::debug!("Round {} tricks: {}", round.round_number, tricks.iter().join(","));
        tricks
    }
}
