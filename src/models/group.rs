//! Round-robin groups and their standings rows.

use crate::models::game::{GroupMatch, MatchId};
use crate::models::team::{Team, TeamId};
use serde::{Deserialize, Serialize};

/// One row of a group table. Always derived from the group's matches.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StandingRow {
    pub team_id: TeamId,
    pub name: String,
    pub points: u32,
    pub played: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
}

impl StandingRow {
    /// Zeroed row for a team that has not played yet.
    pub fn empty(team: &Team) -> Self {
        Self {
            team_id: team.id,
            name: team.name.clone(),
            points: 0,
            played: 0,
            wins: 0,
            draws: 0,
            losses: 0,
        }
    }
}

/// A pod of teams playing each other once.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    /// Sequential letter name: "A", "B", ...
    pub name: String,
    pub teams: Vec<Team>,
    pub matches: Vec<GroupMatch>,
    pub standings: Vec<StandingRow>,
}

impl Group {
    pub fn get_match(&self, id: MatchId) -> Option<&GroupMatch> {
        self.matches.iter().find(|m| m.id == id)
    }

    pub fn get_match_mut(&mut self, id: MatchId) -> Option<&mut GroupMatch> {
        self.matches.iter_mut().find(|m| m.id == id)
    }

    /// True once every match in the group has a result (vacuously true for a one-team group).
    pub fn is_complete(&self) -> bool {
        self.matches.iter().all(|m| m.played)
    }
}
