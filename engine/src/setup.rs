use std::collections::HashSet;

use crate::error::SetupError;
use crate::player::Player;
use crate::rules::{MAX_NAME_LEN, MAX_PLAYERS, MIN_PLAYERS};

/// Turns entered names into seated players. Names are trimmed and blank
/// entries dropped before any check; ids follow the remaining order.
pub fn confirm_players<S: AsRef<str>>(names: &[S]) -> Result<Vec<Player>, SetupError> {
    let names: Vec<&str> = names
        .iter()
        .map(|name| name.as_ref().trim())
        .filter(|name| !name.is_empty())
        .collect();

    let count = names.len();
    if count < MIN_PLAYERS {
        return Err(SetupError::TooFewPlayers {
            count,
            min: MIN_PLAYERS,
        });
    }
    if count > MAX_PLAYERS {
        return Err(SetupError::TooManyPlayers {
            count,
            max: MAX_PLAYERS,
        });
    }

    let mut seen = HashSet::new();
    for name in &names {
        if name.chars().count() > MAX_NAME_LEN {
            return Err(SetupError::NameTooLong {
                name: name.to_string(),
                max: MAX_NAME_LEN,
            });
        }
        if !seen.insert(name.to_lowercase()) {
            return Err(SetupError::DuplicateName(name.to_string()));
        }
    }

    log::debug!("Seating {} players: {}", count, names.join(", "));
    Ok(names
        .into_iter()
        .enumerate()
        .map(|(idx, name)| Player::new(idx, name))
        .collect())
}
