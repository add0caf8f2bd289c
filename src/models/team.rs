//! Team and TeamPlayer data structures.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a player (stable across tournaments, used for rankings).
pub type PlayerId = Uuid;

/// Unique identifier for a team within a tournament.
pub type TeamId = Uuid;

/// A player listed on a team.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamPlayer {
    pub player_id: PlayerId,
    pub name: String,
}

impl TeamPlayer {
    pub fn new(player_id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            player_id,
            name: name.into(),
        }
    }
}

/// A registered unit (usually a pair) competing together.
///
/// Player identity lives in `players`; `name` is display text only.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub players: Vec<TeamPlayer>,
}

impl Team {
    /// Create a team with a fresh id.
    pub fn new(name: impl Into<String>, players: Vec<TeamPlayer>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            players,
        }
    }

    /// Convenience for fixtures and demos: a pair of new players named by `a` and `b`,
    /// displayed as `"a/b"`.
    pub fn pair(a: impl Into<String>, b: impl Into<String>) -> Self {
        let (a, b) = (a.into(), b.into());
        let name = format!("{a}/{b}");
        Self::new(
            name,
            vec![
                TeamPlayer::new(Uuid::new_v4(), a),
                TeamPlayer::new(Uuid::new_v4(), b),
            ],
        )
    }

    pub fn has_player(&self, player_id: PlayerId) -> bool {
        self.players.iter().any(|p| p.player_id == player_id)
    }
}
