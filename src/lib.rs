//! Padel tournament engine: library with models and business logic.
//!
//! The engine does no I/O. Storage and presentation belong to the caller (see the `web` binary).

pub mod config;
pub mod logic;
pub mod models;

pub use config::{ConfigError, ServerConfig};
pub use logic::{
    apply_tournament, approve_registration, assign_knockout_slot, build_bracket,
    build_seeded_bracket, compute_deltas, compute_standings, configure, create_tournament,
    draw_groups, edit_group_score, generate_groups, generate_knockout, generate_knockout_seeded,
    merge_deltas, parse_score, qualifiers, ranking_to_csv, record_group_score,
    record_knockout_score, register_team, reject_registration, round_robin, simulate_remaining,
    Advance, Bracket, Outcome, Seeding, SUPPORTED_BRACKET_SIZES,
};
pub use models::{
    Group, GroupMatch, KnockoutMatch, KnockoutRound, KnockoutStage, MatchId, PlayerId,
    PointDelta, RankedPlayer, RankingEntry, Registration, RegistrationId, RegistrationStatus,
    Side, Slot, StandingRow, Team, TeamId, TeamPlayer, Tournament, TournamentError,
    TournamentId, TournamentStatus,
};
