//! Persistent category rankings and per-tournament point deltas.

use crate::models::team::PlayerId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A player's cumulative total inside one category ranking.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedPlayer {
    pub player_id: PlayerId,
    pub name: String,
    pub points: u32,
}

/// Points a single player earned in one tournament.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointDelta {
    pub player_id: PlayerId,
    pub name: String,
    pub points: u32,
}

/// Leaderboard for one skill category, sorted by points descending.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingEntry {
    pub category: String,
    pub players: Vec<RankedPlayer>,
    pub updated_at: DateTime<Utc>,
}

impl RankingEntry {
    pub fn new(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            players: Vec::new(),
            updated_at: Utc::now(),
        }
    }

    pub fn points_for(&self, player_id: PlayerId) -> u32 {
        self.players
            .iter()
            .find(|p| p.player_id == player_id)
            .map_or(0, |p| p.points)
    }
}
