use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Seat at the table. Ids are handed out in table order starting at 0, so the
/// id doubles as the player's table position.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub usize);

impl PlayerId {
    pub const fn index(self) -> usize {
        self.0
    }
}

impl Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "player {}", self.0)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
}

impl Player {
    pub fn new(id: usize, name: impl Into<String>) -> Self {
        Self {
            id: PlayerId(id),
            name: name.into(),
        }
    }
}

impl PartialEq for Player {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Player {}

impl Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_identity_is_the_id() {
        let a = Player::new(2, "Athena");
        let b = Player::new(2, "Renamed");
        assert_eq!(a, b);
        assert_ne!(a, Player::new(3, "Athena"));
    }

    #[test]
    fn test_player_id_serializes_as_plain_integer() {
        let json = serde_json::to_string(&Player::new(1, "Hermes")).unwrap();
        assert_eq!(json, r#"{"id":1,"name":"Hermes"}"#);
    }
}
