//! Integration tests for free-text score parsing.

use padel_tournament_web::logic::score::{format_sets, parse_sets, random_score};
use padel_tournament_web::{parse_score, Side};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn three_set_win_for_a() {
    assert_eq!(parse_score("6-2, 3-6, 7-5"), Some(Side::A));
}

#[test]
fn straight_sets_win_for_b() {
    assert_eq!(parse_score("4-6, 3-6"), Some(Side::B));
    assert_eq!(parse_score("6-7"), Some(Side::B));
}

#[test]
fn one_set_each_is_undecided() {
    assert_eq!(parse_score("6-2, 2-6"), None);
}

#[test]
fn garbage_is_undecided() {
    assert_eq!(parse_score("abc"), None);
    assert_eq!(parse_score(""), None);
    assert_eq!(parse_score(",,,"), None);
}

#[test]
fn malformed_tokens_are_skipped() {
    // "x-3" and "7" are ignored; the one valid set decides
    assert_eq!(parse_score("x-3, 6-4, 7"), Some(Side::A));
    assert_eq!(parse_sets(" 6 - 4 ,bad, 2-6"), vec![(6, 4), (2, 6)]);
}

#[test]
fn level_set_counts_for_nobody() {
    assert_eq!(parse_score("6-6"), None);
    assert_eq!(parse_score("6-6, 6-3"), Some(Side::A));
}

#[test]
fn format_is_canonical() {
    assert_eq!(format_sets(&[(6, 3), (4, 6), (6, 2)]), "6-3, 4-6, 6-2");
}

#[test]
fn random_scores_decide_the_requested_side() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..200 {
        assert_eq!(parse_score(&random_score(&mut rng, Side::A)), Some(Side::A));
        assert_eq!(parse_score(&random_score(&mut rng, Side::B)), Some(Side::B));
    }
}
