//! Tournament engine: setup, group play, standings, knockout bracket, rankings, lifecycle.

pub mod finals;
pub mod group_play;
mod lifecycle;
pub mod ranking;
pub mod score;
mod setup;
pub mod standings;

pub use finals::{
    build_bracket, build_seeded_bracket, Advance, Bracket, Seeding, SUPPORTED_BRACKET_SIZES,
};
pub use group_play::{draw_groups, round_robin};
pub use lifecycle::{
    assign_knockout_slot, edit_group_score, generate_groups, generate_knockout,
    generate_knockout_seeded, record_group_score, record_knockout_score, simulate_remaining,
    Outcome,
};
pub use ranking::{apply_tournament, compute_deltas, merge_deltas, ranking_to_csv};
pub use score::parse_score;
pub use setup::{
    approve_registration, configure, create_tournament, register_team, reject_registration,
};
pub use standings::{compute_standings, qualifiers};
