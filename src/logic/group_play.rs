//! Group stage: drawing teams into groups and generating round-robin fixtures.

use crate::models::{Group, GroupMatch, StandingRow, Team};
use rand::seq::SliceRandom;
use rand::Rng;

/// Draw `teams` into groups of `teams_per_group`.
///
/// 1. Shuffle the teams with `rng`.
/// 2. Cut into consecutive chunks of `teams_per_group`; the last may be smaller.
/// 3. Every unordered pair in a chunk becomes one unplayed match.
/// 4. Standings start zeroed; groups are named A, B, C, ...
///
/// Callers decide whether an uneven last group is acceptable. A group of one team has no matches.
pub fn draw_groups<R: Rng + ?Sized>(
    teams: &[Team],
    teams_per_group: usize,
    rng: &mut R,
) -> Vec<Group> {
    let mut shuffled = teams.to_vec();
    shuffled.shuffle(rng);

    shuffled
        .chunks(teams_per_group.max(1))
        .enumerate()
        .map(|(i, chunk)| {
            let group = Group {
                name: group_name(i),
                teams: chunk.to_vec(),
                matches: round_robin(chunk),
                standings: chunk.iter().map(StandingRow::empty).collect(),
            };
            log::debug!(
                "Drew group {} with {} teams, {} matches",
                group.name,
                group.teams.len(),
                group.matches.len()
            );
            group
        })
        .collect()
}

/// Every unordered pair exactly once, in encounter order: (0,1), (0,2), ..., (n-2,n-1).
pub fn round_robin(teams: &[Team]) -> Vec<GroupMatch> {
    teams
        .iter()
        .enumerate()
        .flat_map(|(i, a)| teams[i + 1..].iter().map(move |b| GroupMatch::new(a.id, b.id)))
        .collect()
}

/// Spreadsheet-style letters: 0 → "A", 25 → "Z", 26 → "AA".
fn group_name(index: usize) -> String {
    let mut n = index + 1;
    let mut name = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        name.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    name.reverse();
    String::from_utf8_lossy(&name).into_owned()
}
