//! Tournament aggregate, registrations, status and errors.

use crate::models::game::{KnockoutMatch, KnockoutRound, MatchId, Slot};
use crate::models::group::Group;
use crate::models::team::{PlayerId, Team, TeamId, TeamPlayer};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Errors that can occur during tournament operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TournamentError {
    /// Tournament is not in the status this action requires.
    InvalidState {
        expected: TournamentStatus,
        actual: TournamentStatus,
    },
    /// Name or category is blank.
    EmptyName,
    /// `max_teams` must be at least 2.
    InvalidMaxTeams(usize),
    /// `teams_per_group` must be at least 1.
    InvalidTeamsPerGroup(usize),
    /// Cannot lower `max_teams` below the number of approved teams.
    MaxTeamsBelowTeamCount { max_teams: usize, teams: usize },
    /// A registration must list at least one player.
    NoPlayers,
    /// Another registration already uses this team name (case-insensitive).
    DuplicateTeamName(String),
    /// A player is already on an approved team.
    PlayerAlreadyRegistered(PlayerId),
    RegistrationNotFound(RegistrationId),
    /// Registration was already approved or rejected.
    RegistrationAlreadyDecided {
        id: RegistrationId,
        status: RegistrationStatus,
    },
    /// Approving would exceed `max_teams`.
    TournamentFull { max_teams: usize },
    /// Group draw needs at least one approved team.
    NoTeams,
    /// Team count is not a multiple of the group size and the organizer did not confirm.
    UnevenGroups { teams: usize, teams_per_group: usize },
    MatchNotFound(MatchId),
    /// The score does not produce a winner (tie, malformed or empty); the match must be replayed.
    UndecidedScore(String),
    /// Some group matches have no result yet.
    GroupStageIncomplete { unplayed: usize },
    /// Qualifier count is not 2, 4, 8, 16 or 32.
    UnsupportedBracketSize { qualifiers: usize },
    /// Knockout match does not have both teams yet.
    MatchNotReady(MatchId),
    /// Match already has a result. Group results change only through an explicit edit;
    /// knockout results are final.
    MatchAlreadyPlayed(MatchId),
    /// Only a played match can have its result edited.
    MatchNotPlayed(MatchId),
    /// Team is not waiting in the unassigned qualifier pool.
    TeamNotInPool(TeamId),
    /// Slot already holds a team, or the match cannot take manual assignments.
    SlotUnavailable { match_id: MatchId, slot: Slot },
    /// A `next_match_id` points at a match that does not exist.
    BrokenBracketLink(MatchId),
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentError::InvalidState { expected, actual } => write!(
                f,
                "Invalid state for this action: expected {:?}, tournament is {:?}",
                expected, actual
            ),
            TournamentError::EmptyName => write!(f, "Name and category must not be empty"),
            TournamentError::InvalidMaxTeams(n) => {
                write!(f, "Max teams must be at least 2 (got {})", n)
            }
            TournamentError::InvalidTeamsPerGroup(n) => {
                write!(f, "Teams per group must be at least 1 (got {})", n)
            }
            TournamentError::MaxTeamsBelowTeamCount { max_teams, teams } => write!(
                f,
                "Max teams {} is below the {} teams already approved",
                max_teams, teams
            ),
            TournamentError::NoPlayers => write!(f, "A team needs at least one player"),
            TournamentError::DuplicateTeamName(name) => {
                write!(f, "A team named '{}' is already registered", name)
            }
            TournamentError::PlayerAlreadyRegistered(_) => {
                write!(f, "A player is already on an approved team")
            }
            TournamentError::RegistrationNotFound(_) => write!(f, "Registration not found"),
            TournamentError::RegistrationAlreadyDecided { status, .. } => {
                write!(f, "Registration is already {:?}", status)
            }
            TournamentError::TournamentFull { max_teams } => {
                write!(f, "Tournament is full ({} teams)", max_teams)
            }
            TournamentError::NoTeams => write!(f, "Need at least one approved team to draw groups"),
            TournamentError::UnevenGroups {
                teams,
                teams_per_group,
            } => write!(
                f,
                "{} teams do not split evenly into groups of {}; confirm a smaller last group",
                teams, teams_per_group
            ),
            TournamentError::MatchNotFound(_) => write!(f, "Match not found"),
            TournamentError::UndecidedScore(score) => {
                write!(f, "Score '{}' does not decide a winner", score)
            }
            TournamentError::GroupStageIncomplete { unplayed } => {
                write!(f, "{} group match(es) still have no result", unplayed)
            }
            TournamentError::UnsupportedBracketSize { qualifiers } => write!(
                f,
                "{} qualifiers cannot form a bracket (need 2, 4, 8, 16 or 32)",
                qualifiers
            ),
            TournamentError::MatchNotReady(_) => {
                write!(f, "Match does not have both teams assigned yet")
            }
            TournamentError::MatchAlreadyPlayed(_) => {
                write!(f, "Match already has a result")
            }
            TournamentError::MatchNotPlayed(_) => {
                write!(f, "Match has no result to edit yet")
            }
            TournamentError::TeamNotInPool(_) => {
                write!(f, "Team is not in the unassigned qualifier pool")
            }
            TournamentError::SlotUnavailable { slot, .. } => {
                write!(f, "Slot {:?} cannot be assigned", slot)
            }
            TournamentError::BrokenBracketLink(_) => {
                write!(f, "Bracket links to a match that does not exist")
            }
        }
    }
}

impl std::error::Error for TournamentError {}

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Unique identifier for a registration.
pub type RegistrationId = Uuid;

/// Current phase of the tournament. Only ever moves forward.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub enum TournamentStatus {
    /// Accepting and deciding registrations.
    #[default]
    RegistrationOpen,
    /// Groups drawn; round-robin matches being played.
    GroupStage,
    /// Knockout bracket generated.
    FinalStage,
    /// Final decided; rankings applied.
    Finished,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

/// A team's request to join, decided once by the organizer.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub id: RegistrationId,
    pub team_name: String,
    pub players: Vec<TeamPlayer>,
    pub status: RegistrationStatus,
    pub created_at: DateTime<Utc>,
}

impl Registration {
    pub fn new(team_name: impl Into<String>, players: Vec<TeamPlayer>) -> Self {
        Self {
            id: Uuid::new_v4(),
            team_name: team_name.into(),
            players,
            status: RegistrationStatus::Pending,
            created_at: Utc::now(),
        }
    }
}

/// Full tournament snapshot, read and written wholesale by the storage layer.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    /// Skill category; selects the ranking pool.
    pub category: String,
    pub status: TournamentStatus,
    /// Approved teams.
    pub teams: Vec<Team>,
    pub max_teams: usize,
    pub teams_per_group: usize,
    pub registrations: Vec<Registration>,
    #[serde(default)]
    pub groups: Vec<Group>,
    /// Bracket rounds, first round first. Empty until the knockout is generated.
    #[serde(default)]
    pub knockout_rounds: Vec<KnockoutRound>,
    /// Teams that qualified from the groups, in seeding order.
    #[serde(default)]
    pub qualifiers: Vec<TeamId>,
    /// Qualifiers not yet placed in the bracket.
    #[serde(default)]
    pub unassigned_qualifiers: Vec<TeamId>,
    /// Set once the ranking merge has run for this tournament.
    #[serde(default)]
    pub ranking_applied: bool,
    pub created_at: DateTime<Utc>,
}

impl Tournament {
    /// Create an empty tournament open for registrations. Settings are not validated here.
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        max_teams: usize,
        teams_per_group: usize,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            category: category.into(),
            status: TournamentStatus::RegistrationOpen,
            teams: Vec::new(),
            max_teams,
            teams_per_group,
            registrations: Vec::new(),
            groups: Vec::new(),
            knockout_rounds: Vec::new(),
            qualifiers: Vec::new(),
            unassigned_qualifiers: Vec::new(),
            ranking_applied: false,
            created_at: Utc::now(),
        }
    }

    /// Error unless the tournament is currently in `expected`.
    pub fn require_status(&self, expected: TournamentStatus) -> Result<(), TournamentError> {
        if self.status != expected {
            return Err(TournamentError::InvalidState {
                expected,
                actual: self.status,
            });
        }
        Ok(())
    }

    pub fn get_team(&self, id: TeamId) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == id)
    }

    pub fn get_registration_mut(&mut self, id: RegistrationId) -> Option<&mut Registration> {
        self.registrations.iter_mut().find(|r| r.id == id)
    }

    /// Number of group matches without a result, across all groups.
    pub fn unplayed_group_matches(&self) -> usize {
        self.groups
            .iter()
            .flat_map(|g| g.matches.iter())
            .filter(|m| !m.played)
            .count()
    }

    /// Knockout match by id, searching every round.
    pub fn get_knockout_match(&self, id: MatchId) -> Option<&KnockoutMatch> {
        self.knockout_rounds
            .iter()
            .flat_map(|r| r.matches.iter())
            .find(|m| m.id == id)
    }

    /// The single match of the last round, if a bracket exists.
    pub fn final_match(&self) -> Option<&KnockoutMatch> {
        self.knockout_rounds.last().and_then(|r| r.matches.first())
    }

    /// Winner of the final, once decided.
    pub fn champion(&self) -> Option<&Team> {
        self.final_match()
            .and_then(|m| m.winner)
            .and_then(|id| self.get_team(id))
    }
}
