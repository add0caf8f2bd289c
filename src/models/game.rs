//! Group and knockout matches, and the side that won them.

use crate::models::team::TeamId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a match (group or knockout).
pub type MatchId = Uuid;

/// Which side of a match won: `A` is `team_a`, `B` is `team_b`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum Side {
    A,
    B,
}

/// Which slot of a knockout match a team occupies.
pub type Slot = Side;

/// A round-robin match inside a group.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupMatch {
    pub id: MatchId,
    pub team_a: TeamId,
    pub team_b: TeamId,
    /// Free-text set score, e.g. `"6-3, 4-6, 6-2"`. None until recorded.
    pub score: Option<String>,
    pub played: bool,
}

impl GroupMatch {
    pub fn new(team_a: TeamId, team_b: TeamId) -> Self {
        Self {
            id: Uuid::new_v4(),
            team_a,
            team_b,
            score: None,
            played: false,
        }
    }

    /// Team on the given side.
    pub fn team(&self, side: Side) -> TeamId {
        match side {
            Side::A => self.team_a,
            Side::B => self.team_b,
        }
    }
}

/// Phase of the bracket a round belongs to, derived from how many matches it holds.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum KnockoutStage {
    RoundOf32,
    RoundOf16,
    QuarterFinal,
    SemiFinal,
    Final,
}

impl KnockoutStage {
    /// Stage of a round that has `rounds_after` rounds following it (0 for the final).
    /// Brackets are at most 32 teams, so anything deeper is the round of 32.
    pub fn from_rounds_after(rounds_after: u32) -> Self {
        match rounds_after {
            0 => Self::Final,
            1 => Self::SemiFinal,
            2 => Self::QuarterFinal,
            3 => Self::RoundOf16,
            _ => Self::RoundOf32,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::RoundOf32 => "Round of 32",
            Self::RoundOf16 => "Round of 16",
            Self::QuarterFinal => "Quarterfinal",
            Self::SemiFinal => "Semifinal",
            Self::Final => "Final",
        }
    }
}

/// A single-elimination match. Teams arrive as earlier rounds are decided.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KnockoutMatch {
    pub id: MatchId,
    /// 1-based round number (1 = first round).
    pub round: u32,
    pub team_a: Option<TeamId>,
    pub team_b: Option<TeamId>,
    pub score: Option<String>,
    pub played: bool,
    pub winner: Option<TeamId>,
    /// Match the winner advances to. None only in the final.
    pub next_match_id: Option<MatchId>,
}

impl KnockoutMatch {
    pub fn new(round: u32, next_match_id: Option<MatchId>) -> Self {
        Self {
            id: Uuid::new_v4(),
            round,
            team_a: None,
            team_b: None,
            score: None,
            played: false,
            winner: None,
            next_match_id,
        }
    }

    pub fn slot(&self, slot: Slot) -> Option<TeamId> {
        match slot {
            Side::A => self.team_a,
            Side::B => self.team_b,
        }
    }

    pub fn slot_mut(&mut self, slot: Slot) -> &mut Option<TeamId> {
        match slot {
            Side::A => &mut self.team_a,
            Side::B => &mut self.team_b,
        }
    }

    /// Both teams known and no result yet.
    pub fn is_ready(&self) -> bool {
        self.team_a.is_some() && self.team_b.is_some() && !self.played
    }
}

/// One round of the bracket. The final is a round with a single match.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KnockoutRound {
    pub stage: KnockoutStage,
    pub matches: Vec<KnockoutMatch>,
}
