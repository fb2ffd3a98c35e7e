pub mod action;
pub mod error;
pub mod game_state;
pub mod generator;
pub mod player;
pub mod round;
pub mod rules;
pub mod scoring;
pub mod setup;
pub mod stats;
pub mod turn;
pub mod validator;

pub use action::{Action, Event, Transition};
pub use error::{EngineError, InputRejection, SetupError};
pub use game_state::GameState;
pub use generator::create_round;
pub use player::{Player, PlayerId};
pub use round::{Prediction, Round, Stage};
pub use scoring::{cumulative_scores, score, score_round, standings, total_score, Standing};
pub use setup::confirm_players;
pub use stats::{prediction_stats, PredictionStats};
pub use turn::next_player;
