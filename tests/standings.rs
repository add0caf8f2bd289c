//! Integration tests for standings and qualifier selection.

use padel_tournament_web::{compute_standings, qualifiers, round_robin, Group, StandingRow, Team};

fn group_of(names: &[&str]) -> Group {
    let teams: Vec<Team> = names.iter().map(|n| Team::pair(*n, format!("{n}2"))).collect();
    Group {
        name: "A".to_string(),
        matches: round_robin(&teams),
        standings: teams.iter().map(StandingRow::empty).collect(),
        teams,
    }
}

/// Record `score` on the match between teams at positions `a` and `b`, as written.
fn score(group: &mut Group, a: usize, b: usize, score: &str) {
    let (ta, tb) = (group.teams[a].id, group.teams[b].id);
    let m = group
        .matches
        .iter_mut()
        .find(|m| m.team_a == ta && m.team_b == tb)
        .expect("match exists");
    m.score = Some(score.to_string());
    m.played = true;
}

#[test]
fn fresh_group_is_all_zero_in_team_order() {
    let g = group_of(&["A", "B", "C"]);
    let rows = compute_standings(&g);
    assert_eq!(rows.len(), 3);
    assert!(rows.iter().all(|r| r.points == 0 && r.played == 0 && r.wins == 0));
    let row_ids: Vec<_> = rows.iter().map(|r| r.team_id).collect();
    let team_ids: Vec<_> = g.teams.iter().map(|t| t.id).collect();
    assert_eq!(row_ids, team_ids);
}

#[test]
fn wins_award_three_points_and_sort_descending() {
    let mut g = group_of(&["A", "B", "C"]);
    score(&mut g, 0, 1, "2-6, 3-6"); // B beats A
    score(&mut g, 0, 2, "6-1, 6-1"); // A beats C
    score(&mut g, 1, 2, "6-4, 6-4"); // B beats C

    let rows = compute_standings(&g);
    assert_eq!(rows[0].team_id, g.teams[1].id);
    assert_eq!(rows[0].points, 6);
    assert_eq!(rows[0].wins, 2);
    assert_eq!(rows[0].played, 2);
    assert_eq!(rows[1].team_id, g.teams[0].id);
    assert_eq!(rows[1].points, 3);
    assert_eq!(rows[1].losses, 1);
    assert_eq!(rows[2].team_id, g.teams[2].id);
    assert_eq!(rows[2].points, 0);
    assert_eq!(rows[2].losses, 2);
    assert!(rows.iter().all(|r| r.draws == 0));
}

#[test]
fn undecided_and_unplayed_matches_count_for_nothing() {
    let mut g = group_of(&["A", "B", "C"]);
    score(&mut g, 0, 1, "6-2, 2-6");
    // played flag without any score
    g.matches[1].played = true;

    let rows = compute_standings(&g);
    assert!(rows.iter().all(|r| r.points == 0 && r.played == 0));
}

#[test]
fn ties_keep_encounter_order() {
    let mut g = group_of(&["A", "B", "C", "D"]);
    score(&mut g, 2, 3, "6-0, 6-0"); // C beats D
    score(&mut g, 0, 1, "6-0, 6-0"); // A beats B

    let rows = compute_standings(&g);
    let order: Vec<_> = rows.iter().map(|r| r.name.clone()).collect();
    assert_eq!(order, vec!["A/A2", "C/C2", "B/B2", "D/D2"]);
}

#[test]
fn recomputing_is_idempotent() {
    let mut g = group_of(&["A", "B", "C", "D"]);
    score(&mut g, 0, 1, "6-3, 6-3");
    score(&mut g, 1, 2, "3-6, 6-3, 7-6");
    let first = compute_standings(&g);
    g.standings = first.clone();
    let second = compute_standings(&g);
    assert_eq!(first, second);
}

#[test]
fn qualifiers_are_top_two_per_group_in_group_order() {
    let mut a = group_of(&["A1", "A2", "A3"]);
    score(&mut a, 0, 1, "1-6, 1-6"); // A2 beats A1
    score(&mut a, 0, 2, "1-6, 1-6"); // A3 beats A1
    score(&mut a, 1, 2, "6-1, 6-1"); // A2 beats A3
    let mut b = group_of(&["B1", "B2"]);
    score(&mut b, 0, 1, "6-0, 6-0");
    let solo = group_of(&["C1"]);

    let q = qualifiers(&[a.clone(), b.clone(), solo.clone()]);
    assert_eq!(
        q,
        vec![a.teams[1].id, a.teams[2].id, b.teams[0].id, b.teams[1].id, solo.teams[0].id]
    );
}
