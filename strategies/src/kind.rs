use serde::{Deserialize, Serialize};

use crate::outcome::{RandomOutcome, TrickOutcome, WeightedOutcome};
use crate::{CautiousStrategy, DefaultStrategy, RandomStrategy, Strategy};

/// Strategy named in configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    Random,
    #[default]
    Default,
    Cautious,
}

impl StrategyKind {
    /// Only the random strategy uses the seed.
    pub fn build(self, seed: Option<u64>) -> Box<dyn Strategy> {
        match self {
            StrategyKind::Random => match seed {
                Some(seed) => Box::new(RandomStrategy::seeded(seed)),
                None => Box::new(RandomStrategy::default()),
            },
            StrategyKind::Default => Box::new(DefaultStrategy::default()),
            StrategyKind::Cautious => Box::new(CautiousStrategy::default()),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeKind {
    #[default]
    Random,
    Weighted,
}

impl OutcomeKind {
    pub fn build(self, seed: Option<u64>) -> Box<dyn TrickOutcome> {
        match (self, seed) {
            (OutcomeKind::Random, Some(seed)) => Box::new(RandomOutcome::seeded(seed)),
            (OutcomeKind::Random, None) => Box::new(RandomOutcome::default()),
            (OutcomeKind::Weighted, Some(seed)) => Box::new(WeightedOutcome::seeded(seed)),
            (OutcomeKind::Weighted, None) => Box::new(WeightedOutcome::default()),
        }
    }
}
