//! JSON snapshot format of a `GameState`.

use engine::GameState;

use crate::error::StorageError;

pub fn encode(state: &GameState) -> Result<String, StorageError> {
    Ok(serde_json::to_string(state)?)
}

/// Parses a stored snapshot. Anything that does not parse, or parses into a
/// state that breaks the game's invariants, counts as no snapshot at all.
pub fn decode(raw: &str) -> Option<GameState> {
    let state: GameState = match serde_json::from_str(raw) {
        Ok(state) => state,
        Err(e) => {
            tracing::warn!("Discarding unreadable game snapshot: {}", e);
            return None;
        }
    };
    if let Err(e) = state.validate() {
        tracing::warn!("Discarding inconsistent game snapshot: {}", e);
        return None;
    }
    Some(state)
}
