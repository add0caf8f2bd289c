//! Knockout stage: single-elimination bracket construction, manual seeding and advancement.

use crate::logic::score::{parse_score, random_score};
use crate::models::{
    KnockoutMatch, KnockoutRound, KnockoutStage, MatchId, Side, Slot, TeamId, TournamentError,
};
use rand::Rng;

/// Bracket sizes (teams in the first round) the engine can build.
pub const SUPPORTED_BRACKET_SIZES: [usize; 5] = [2, 4, 8, 16, 32];

pub fn is_supported_bracket_size(teams: usize) -> bool {
    SUPPORTED_BRACKET_SIZES.contains(&teams)
}

/// Largest supported size not above `qualifiers`; 2 when there are fewer than two.
pub fn bracket_size(qualifiers: usize) -> usize {
    SUPPORTED_BRACKET_SIZES
        .iter()
        .rev()
        .copied()
        .find(|&size| size <= qualifiers)
        .unwrap_or(SUPPORTED_BRACKET_SIZES[0])
}

/// A freshly built bracket plus the qualifiers that did not fit in it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Bracket {
    pub rounds: Vec<KnockoutRound>,
    pub unassigned: Vec<TeamId>,
}

/// What recording a knockout result led to.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Advance {
    /// Winner moved into `slot` of `next_match_id`.
    Advanced {
        team: TeamId,
        next_match_id: MatchId,
        slot: Slot,
    },
    /// The final was decided.
    Champion(TeamId),
}

/// How the first round of a new bracket is filled.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Seeding {
    /// Qualifiers in group order: match 0 gets qualifiers 0 and 1, and so on.
    #[default]
    GroupOrder,
    /// Every first-round slot starts empty and all qualifiers wait in the pool.
    Manual,
}

/// Build a single-elimination tree for `qualifiers`, seeded in group order.
///
/// Match `j` of a round feeds match `j / 2` of the next. Qualifiers beyond the bracket size
/// are returned as unassigned; slots without a qualifier stay empty for manual assignment.
pub fn build_bracket(qualifiers: &[TeamId]) -> Bracket {
    build_seeded_bracket(qualifiers, Seeding::GroupOrder)
}

/// Build a bracket for `qualifiers` and fill its first round according to `seeding`.
pub fn build_seeded_bracket(qualifiers: &[TeamId], seeding: Seeding) -> Bracket {
    let size = bracket_size(qualifiers.len());
    let num_rounds = size.trailing_zeros();

    let mut rounds: Vec<KnockoutRound> = Vec::with_capacity(num_rounds as usize);
    for round in (1..=num_rounds).rev() {
        let count = size >> round;
        let matches = (0..count)
            .map(|j| {
                let next = rounds.last().map(|later| later.matches[j / 2].id);
                KnockoutMatch::new(round, next)
            })
            .collect();
        rounds.push(KnockoutRound {
            stage: KnockoutStage::from_rounds_after(num_rounds - round),
            matches,
        });
    }
    rounds.reverse();

    let seeded_count = match seeding {
        Seeding::GroupOrder => qualifiers.len().min(size),
        Seeding::Manual => 0,
    };
    let (seeded, unassigned) = qualifiers.split_at(seeded_count);
    if let Some(first) = rounds.first_mut() {
        for (i, &team) in seeded.iter().enumerate() {
            let m = &mut first.matches[i / 2];
            if i % 2 == 0 {
                m.team_a = Some(team);
            } else {
                m.team_b = Some(team);
            }
        }
    }

    log::debug!(
        "Built {:?} bracket of {} with {} round(s), {} qualifier(s) unassigned",
        seeding,
        size,
        num_rounds,
        unassigned.len()
    );
    Bracket {
        rounds,
        unassigned: unassigned.to_vec(),
    }
}

/// (round index, match index within round) of a knockout match.
pub fn find_position(rounds: &[KnockoutRound], match_id: MatchId) -> Option<(usize, usize)> {
    rounds.iter().enumerate().find_map(|(r, round)| {
        round
            .matches
            .iter()
            .position(|m| m.id == match_id)
            .map(|j| (r, j))
    })
}

/// Slot of the next match a winner goes to: A from an even-indexed match, B from an odd one.
pub fn advance_slot(match_index: usize) -> Slot {
    if match_index % 2 == 0 {
        Side::A
    } else {
        Side::B
    }
}

/// Record `score` for a ready match and advance its winner.
///
/// Every check happens before anything is written, so on error `rounds` is unchanged.
pub fn record_result(
    rounds: &mut [KnockoutRound],
    match_id: MatchId,
    score: &str,
) -> Result<Advance, TournamentError> {
    let (r, j) =
        find_position(rounds, match_id).ok_or(TournamentError::MatchNotFound(match_id))?;
    let m = &rounds[r].matches[j];
    if m.played {
        return Err(TournamentError::MatchAlreadyPlayed(match_id));
    }
    let (Some(team_a), Some(team_b)) = (m.team_a, m.team_b) else {
        return Err(TournamentError::MatchNotReady(match_id));
    };
    let side =
        parse_score(score).ok_or_else(|| TournamentError::UndecidedScore(score.to_string()))?;
    let winner = match side {
        Side::A => team_a,
        Side::B => team_b,
    };

    let target = match m.next_match_id {
        Some(next_id) => {
            let pos = find_position(rounds, next_id)
                .ok_or(TournamentError::BrokenBracketLink(next_id))?;
            Some((next_id, pos))
        }
        None => None,
    };

    let m = &mut rounds[r].matches[j];
    m.score = Some(score.trim().to_string());
    m.played = true;
    m.winner = Some(winner);

    match target {
        Some((next_match_id, (nr, nj))) => {
            let slot = advance_slot(j);
            *rounds[nr].matches[nj].slot_mut(slot) = Some(winner);
            log::debug!(
                "Match {} won by {}, advancing to {:?} of {}",
                match_id,
                winner,
                slot,
                next_match_id
            );
            Ok(Advance::Advanced {
                team: winner,
                next_match_id,
                slot,
            })
        }
        None => Ok(Advance::Champion(winner)),
    }
}

/// Place `team` from `pool` into an empty slot of an unplayed first-round match.
pub fn assign_slot(
    rounds: &mut [KnockoutRound],
    pool: &mut Vec<TeamId>,
    match_id: MatchId,
    slot: Slot,
    team: TeamId,
) -> Result<(), TournamentError> {
    let (r, j) =
        find_position(rounds, match_id).ok_or(TournamentError::MatchNotFound(match_id))?;
    let pool_idx = pool
        .iter()
        .position(|&t| t == team)
        .ok_or(TournamentError::TeamNotInPool(team))?;
    let m = &mut rounds[r].matches[j];
    if r != 0 || m.played || m.slot(slot).is_some() {
        return Err(TournamentError::SlotUnavailable { match_id, slot });
    }
    *m.slot_mut(slot) = Some(team);
    pool.remove(pool_idx);
    Ok(())
}

/// Give every ready match a random decisive score, front to back, until nothing is ready.
///
/// Returns the advances in the order they happened.
pub fn simulate_bracket<R: Rng + ?Sized>(
    rounds: &mut [KnockoutRound],
    rng: &mut R,
) -> Result<Vec<Advance>, TournamentError> {
    let mut advances = Vec::new();
    for r in 0..rounds.len() {
        let ready: Vec<MatchId> = rounds[r]
            .matches
            .iter()
            .filter(|m| m.is_ready())
            .map(|m| m.id)
            .collect();
        for match_id in ready {
            let winner = if rng.gen_bool(0.5) { Side::A } else { Side::B };
            let score = random_score(rng, winner);
            advances.push(record_result(rounds, match_id, &score)?);
        }
    }
    Ok(advances)
}
