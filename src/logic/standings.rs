//! Group standings derived from match results, and qualifier selection.

use crate::logic::score::parse_score;
use crate::models::{Group, StandingRow, TeamId};

/// Points for a match win. Undecided or unplayed matches award nothing.
pub const POINTS_PER_WIN: u32 = 3;

/// Teams per group that advance to the bracket.
pub const QUALIFIERS_PER_GROUP: usize = 2;

/// Fresh standings table for `group`, sorted by points descending.
///
/// Ties keep the group's team order. Calling this twice on the same group gives the same table.
pub fn compute_standings(group: &Group) -> Vec<StandingRow> {
    let mut rows: Vec<StandingRow> = group.teams.iter().map(StandingRow::empty).collect();

    for m in group.matches.iter().filter(|m| m.played) {
        let Some(side) = m.score.as_deref().and_then(parse_score) else {
            continue;
        };
        let winner = m.team(side);
        let loser = if winner == m.team_a { m.team_b } else { m.team_a };
        for row in rows.iter_mut() {
            if row.team_id == winner {
                row.points += POINTS_PER_WIN;
                row.played += 1;
                row.wins += 1;
            } else if row.team_id == loser {
                row.played += 1;
                row.losses += 1;
            }
        }
    }

    // sort_by is stable: equal points stay in encounter order
    rows.sort_by(|a, b| b.points.cmp(&a.points));
    rows
}

/// Copy of `group` with its standings recomputed.
pub fn refresh_standings(group: &Group) -> Group {
    Group {
        standings: compute_standings(group),
        ..group.clone()
    }
}

/// Top two teams of each group, concatenated group by group.
pub fn qualifiers(groups: &[Group]) -> Vec<TeamId> {
    groups
        .iter()
        .flat_map(|g| {
            compute_standings(g)
                .into_iter()
                .take(QUALIFIERS_PER_GROUP)
                .map(|row| row.team_id)
        })
        .collect()
}
