//! Integration tests for the group draw and round-robin fixtures.

use padel_tournament_web::{draw_groups, round_robin, Team, TeamId};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;

fn teams(n: usize) -> Vec<Team> {
    (0..n)
        .map(|i| Team::pair(format!("P{}a", i), format!("P{}b", i)))
        .collect()
}

fn pair_key(a: TeamId, b: TeamId) -> (TeamId, TeamId) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

#[test]
fn round_robin_covers_every_pair_once() {
    for n in 1..=6 {
        let t = teams(n);
        let matches = round_robin(&t);
        assert_eq!(matches.len(), n * (n - 1) / 2);

        let pairs: HashSet<_> = matches.iter().map(|m| pair_key(m.team_a, m.team_b)).collect();
        assert_eq!(pairs.len(), matches.len(), "no pair repeated");
        assert!(matches.iter().all(|m| m.team_a != m.team_b));
        assert!(matches.iter().all(|m| !m.played && m.score.is_none()));
    }
}

#[test]
fn draw_splits_into_named_groups() {
    let mut rng = StdRng::seed_from_u64(1);
    let groups = draw_groups(&teams(8), 4, &mut rng);
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].name, "A");
    assert_eq!(groups[1].name, "B");
    for g in &groups {
        assert_eq!(g.teams.len(), 4);
        assert_eq!(g.matches.len(), 6);
        assert_eq!(g.standings.len(), 4);
        assert!(g.standings.iter().all(|r| r.points == 0 && r.played == 0));
    }
}

#[test]
fn draw_keeps_every_team_exactly_once() {
    let all = teams(10);
    let mut rng = StdRng::seed_from_u64(2);
    let groups = draw_groups(&all, 4, &mut rng);
    let drawn: Vec<TeamId> = groups.iter().flat_map(|g| g.teams.iter().map(|t| t.id)).collect();
    assert_eq!(drawn.len(), 10);
    let unique: HashSet<_> = drawn.iter().collect();
    assert_eq!(unique.len(), 10);
    assert_eq!(groups.iter().map(|g| g.teams.len()).collect::<Vec<_>>(), vec![4, 4, 2]);
}

#[test]
fn single_team_group_has_no_matches() {
    let mut rng = StdRng::seed_from_u64(3);
    let groups = draw_groups(&teams(5), 4, &mut rng);
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[1].teams.len(), 1);
    assert!(groups[1].matches.is_empty());
    assert!(groups[1].is_complete());
}

#[test]
fn same_seed_gives_same_draw() {
    let all = teams(12);
    let a = draw_groups(&all, 4, &mut StdRng::seed_from_u64(42));
    let b = draw_groups(&all, 4, &mut StdRng::seed_from_u64(42));
    let ids = |groups: &[padel_tournament_web::Group]| -> Vec<TeamId> {
        groups.iter().flat_map(|g| g.teams.iter().map(|t| t.id)).collect()
    };
    assert_eq!(ids(&a), ids(&b));
}
