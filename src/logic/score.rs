//! Free-text set scores: parsing into a winner, and formatting for simulated results.

use crate::models::Side;
use rand::Rng;

/// Valid `(games_a, games_b)` sets in a score string. Malformed tokens are skipped.
pub fn parse_sets(score: &str) -> Vec<(u32, u32)> {
    score
        .split(',')
        .filter_map(|token| {
            let (a, b) = token.split_once('-')?;
            let a = a.trim().parse::<u32>().ok()?;
            let b = b.trim().parse::<u32>().ok()?;
            Some((a, b))
        })
        .collect()
}

/// Side that won more sets, or None when set-wins are level (including no valid sets).
///
/// `"6-2, 3-6, 7-5"` is a win for A; `"6-2, 2-6"` and `"abc"` decide nothing.
pub fn parse_score(score: &str) -> Option<Side> {
    let (mut sets_a, mut sets_b) = (0u32, 0u32);
    for (a, b) in parse_sets(score) {
        if a > b {
            sets_a += 1;
        } else if b > a {
            sets_b += 1;
        }
    }
    match sets_a.cmp(&sets_b) {
        std::cmp::Ordering::Greater => Some(Side::A),
        std::cmp::Ordering::Less => Some(Side::B),
        std::cmp::Ordering::Equal => None,
    }
}

/// Canonical text form: `"6-3, 4-6, 6-2"`.
pub fn format_sets(sets: &[(u32, u32)]) -> String {
    sets.iter()
        .map(|(a, b)| format!("{a}-{b}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Random best-of-three score that `parse_score` resolves to `winner`.
pub fn random_score<R: Rng + ?Sized>(rng: &mut R, winner: Side) -> String {
    // Winner takes two sets; a third set is played when the loser took one.
    let loser_takes_a_set = rng.gen_bool(0.5);
    let mut won = vec![true, true];
    if loser_takes_a_set {
        won.insert(rng.gen_range(0..2), false);
    }
    let sets: Vec<(u32, u32)> = won
        .into_iter()
        .map(|winner_took_set| {
            let (hi, lo) = random_set(rng);
            let (w, l) = if winner_took_set { (hi, lo) } else { (lo, hi) };
            match winner {
                Side::A => (w, l),
                Side::B => (l, w),
            }
        })
        .collect();
    format_sets(&sets)
}

/// Games for one set as (set winner, set loser): 6-0..6-4, 7-5 or 7-6.
fn random_set<R: Rng + ?Sized>(rng: &mut R) -> (u32, u32) {
    match rng.gen_range(0..7) {
        5 => (7, 5),
        6 => (7, 6),
        lo => (6, lo),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn random_sets_are_decisive() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..100 {
            let (hi, lo) = random_set(&mut rng);
            assert!(hi > lo);
        }
    }

    #[test]
    fn random_score_has_two_or_three_sets() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..50 {
            let n = parse_sets(&random_score(&mut rng, Side::B)).len();
            assert!(n == 2 || n == 3);
        }
    }
}
