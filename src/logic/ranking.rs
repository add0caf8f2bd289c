//! Ranking points: per-player deltas from a finished tournament, merged into category rankings.

use crate::logic::score::parse_score;
use crate::models::{
    KnockoutStage, PlayerId, PointDelta, RankedPlayer, RankingEntry, Team, TeamId, Tournament,
};
use chrono::Utc;
use std::collections::HashMap;

pub const GROUP_WIN_POINTS: u32 = 10;
pub const QUALIFICATION_POINTS: u32 = 25;

/// Points for winning a knockout match in `stage`.
pub fn knockout_win_points(stage: KnockoutStage) -> u32 {
    match stage {
        KnockoutStage::RoundOf32 => 30,
        KnockoutStage::RoundOf16 => 40,
        KnockoutStage::QuarterFinal => 60,
        KnockoutStage::SemiFinal => 90,
        KnockoutStage::Final => 150,
    }
}

/// Points earned by each team: group wins, qualification, knockout wins.
pub fn team_points(tournament: &Tournament) -> HashMap<TeamId, u32> {
    let mut points: HashMap<TeamId, u32> = HashMap::new();

    for m in tournament
        .groups
        .iter()
        .flat_map(|g| g.matches.iter())
        .filter(|m| m.played)
    {
        if let Some(side) = m.score.as_deref().and_then(parse_score) {
            *points.entry(m.team(side)).or_default() += GROUP_WIN_POINTS;
        }
    }

    for &team in &tournament.qualifiers {
        *points.entry(team).or_default() += QUALIFICATION_POINTS;
    }

    for round in &tournament.knockout_rounds {
        for winner in round.matches.iter().filter_map(|m| m.winner) {
            *points.entry(winner).or_default() += knockout_win_points(round.stage);
        }
    }

    points
}

/// Per-player deltas for every player on an approved team, in team order.
///
/// Each player gets the full value of every event their team earned; players on teams that
/// earned nothing appear with zero.
pub fn compute_deltas(tournament: &Tournament) -> Vec<PointDelta> {
    let points = team_points(tournament);
    let mut deltas: Vec<PointDelta> = Vec::new();
    for team in &tournament.teams {
        let earned = points.get(&team.id).copied().unwrap_or(0);
        add_team(&mut deltas, team, earned);
    }
    deltas
}

fn add_team(deltas: &mut Vec<PointDelta>, team: &Team, earned: u32) {
    for player in &team.players {
        match deltas.iter_mut().find(|d| d.player_id == player.player_id) {
            Some(d) => d.points = d.points.saturating_add(earned),
            None => deltas.push(PointDelta {
                player_id: player.player_id,
                name: player.name.clone(),
                points: earned,
            }),
        }
    }
}

/// New ranking list with `deltas` added to `category`'s entry (created if missing).
///
/// Unseen players start at zero. The category's players are re-sorted by points descending;
/// other categories are returned untouched.
pub fn merge_deltas(
    rankings: &[RankingEntry],
    category: &str,
    deltas: &[PointDelta],
) -> Vec<RankingEntry> {
    let mut rankings = rankings.to_vec();
    let idx = match rankings.iter().position(|r| r.category == category) {
        Some(idx) => idx,
        None => {
            rankings.push(RankingEntry::new(category));
            rankings.len() - 1
        }
    };

    let entry = &mut rankings[idx];
    for delta in deltas {
        match entry.players.iter_mut().find(|p| p.player_id == delta.player_id) {
            Some(p) => p.points = p.points.saturating_add(delta.points),
            None => entry.players.push(RankedPlayer {
                player_id: delta.player_id,
                name: delta.name.clone(),
                points: delta.points,
            }),
        }
    }
    entry.players.sort_by(|a, b| b.points.cmp(&a.points));
    entry.updated_at = Utc::now();

    log::info!(
        "Ranking '{}' updated with {} player delta(s)",
        category,
        deltas.len()
    );
    rankings
}

/// Apply a finished tournament's points to `rankings`.
///
/// Callers must only do this once per tournament; the lifecycle tracks that with
/// `Tournament::ranking_applied`.
pub fn apply_tournament(rankings: &[RankingEntry], tournament: &Tournament) -> Vec<RankingEntry> {
    merge_deltas(rankings, &tournament.category, &compute_deltas(tournament))
}

/// Category ranking by name, if one exists.
pub fn find_ranking<'a>(rankings: &'a [RankingEntry], category: &str) -> Option<&'a RankingEntry> {
    rankings.iter().find(|r| r.category == category)
}

/// Total points for a player in a category (0 when unranked).
pub fn player_points(rankings: &[RankingEntry], category: &str, player_id: PlayerId) -> u32 {
    find_ranking(rankings, category).map_or(0, |r| r.points_for(player_id))
}

/// CSV export of a category ranking: `position,player_id,name,points`.
pub fn ranking_to_csv(entry: &RankingEntry) -> Result<String, csv::Error> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(["position", "player_id", "name", "points"])?;
    for (i, p) in entry.players.iter().enumerate() {
        wtr.write_record([
            (i + 1).to_string(),
            p.player_id.to_string(),
            p.name.clone(),
            p.points.to_string(),
        ])?;
    }
    let bytes = wtr.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
