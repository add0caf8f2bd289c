//! Data structures for the padel tournament: teams, groups, matches, bracket, rankings.

mod game;
mod group;
mod ranking;
mod team;
mod tournament;

pub use game::{GroupMatch, KnockoutMatch, KnockoutRound, KnockoutStage, MatchId, Side, Slot};
pub use group::{Group, StandingRow};
pub use ranking::{PointDelta, RankedPlayer, RankingEntry};
pub use team::{PlayerId, Team, TeamId, TeamPlayer};
pub use tournament::{
    Registration, RegistrationId, RegistrationStatus, Tournament, TournamentError, TournamentId,
    TournamentStatus,
};
