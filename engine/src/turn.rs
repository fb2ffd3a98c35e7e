//! Turn order within an input stage.
//!
//! Every stage visits the table once, in insertion order, starting at the
//! round's starter and wrapping past the last seat.

use crate::player::{Player, PlayerId};

/// Player who inputs after `current`. With no current player the sequence
/// (re)starts at `starter`.
pub fn next_player(current: Option<PlayerId>, players: &[Player], starter: PlayerId) -> PlayerId {
    let Some(current) = current else {
        return starter;
    };
    match players.iter().position(|p| p.id == current) {
        Some(idx) => players[(idx + 1) % players.len()].id,
        None => {
            log::warn!("{current} is not seated at the table, restarting turn order at {starter}");
            starter
        }
    }
}

/// True when `current` is the final input of a stage that began at `starter`.
pub fn is_last_in_sequence(current: PlayerId, players: &[Player], starter: PlayerId) -> bool {
    next_player(Some(current), players, starter) == starter
}

/// Full visiting order of one stage.
pub fn sequence(players: &[Player], starter: PlayerId) -> Vec<PlayerId> {
    let mut order = Vec::with_capacity(players.len());
    let mut current = starter;
    for _ in 0..players.len() {
        order.push(current);
        current = next_player(Some(current), players, starter);
    }
    order
}

/// 0-based turn position of `player` in a stage that began at `starter`.
pub fn position_in_sequence(player: PlayerId, players: &[Player], starter: PlayerId) -> Option<usize> {
    let start = players.iter().position(|p| p.id == starter)?;
    let idx = players.iter().position(|p| p.id == player)?;
    Some((idx + players.len() - start) % players.len())
}
