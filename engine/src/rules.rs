//! Fixed game constants and the pure arithmetic that derives a round's shape
//! from its number.

use std::ops::RangeInclusive;

use crate::player::{Player, PlayerId};

/// Rounds per game, independent of the player count.
pub const TOTAL_ROUNDS: u32 = 13;
/// Round with the largest hand; hands grow by one card up to here and shrink
/// by one card afterwards.
pub const PEAK_ROUND: u32 = 7;
pub const DECK_SIZE: u32 = 52;
pub const MIN_PLAYERS: usize = 4;
pub const MAX_PLAYERS: usize = 6;
pub const MAX_NAME_LEN: usize = 20;

/// Hand size for a 1-based round: 1..=7 on the way up, 6..=1 on the way down,
/// never more than the deck can deal to every player.
pub fn cards_per_player(round_number: u32, player_count: usize) -> u32 {
    assert!(player_count > 0, "Must have at least 1 player");
    let ramp = if round_number <= PEAK_ROUND {
        round_number
    } else {
        (2 * PEAK_ROUND).saturating_sub(round_number)
    };
    let max_cards = DECK_SIZE / player_count as u32;
    ramp.min(max_cards)
}

/// Dealer seat for a round. Rotates with the round number rather than with the
/// previous dealer.
pub fn dealer_for_round(round_number: u32, players: &[Player]) -> Option<PlayerId> {
    if players.is_empty() {
        return None;
    }
    let idx = round_number as usize % players.len();
    Some(players[idx].id)
}

/// Player to the left of the dealer, who opens every input stage.
pub fn starter_for_dealer(dealer: PlayerId, players: &[Player]) -> Option<PlayerId> {
    let idx = players.iter().position(|p| p.id == dealer)?;
    Some(players[(idx + 1) % players.len()].id)
}

pub fn total_tricks(cards_per_player: u32, player_count: usize) -> u32 {
    cards_per_player * player_count as u32
}

pub fn value_range(total_tricks: u32) -> RangeInclusive<u32> {
    0..=total_tricks
}

pub fn is_game_complete(current_round: u32) -> bool {
    current_round > TOTAL_ROUNDS
}
