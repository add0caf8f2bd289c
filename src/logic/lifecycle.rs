//! Tournament lifecycle: RegistrationOpen → GroupStage → FinalStage → Finished.
//!
//! Commands take a snapshot and return a new one. Calling a command from the wrong status is
//! an `InvalidState` error, so a transition never runs twice.

use crate::logic::finals::{
    assign_slot, build_seeded_bracket, is_supported_bracket_size, record_result,
    simulate_bracket, Advance, Seeding,
};
use crate::logic::group_play::draw_groups;
use crate::logic::ranking::apply_tournament;
use crate::logic::score::{parse_score, random_score};
use crate::logic::standings::{qualifiers, refresh_standings};
use crate::models::{
    MatchId, RankingEntry, Side, Slot, TeamId, Tournament, TournamentError, TournamentStatus,
};
use rand::Rng;

/// Result of a command that may finish the tournament.
#[derive(Clone, Debug)]
pub struct Outcome {
    pub tournament: Tournament,
    /// Updated rankings when this command finished the tournament, otherwise None.
    pub rankings: Option<Vec<RankingEntry>>,
}

/// Draw the approved teams into groups and move to `GroupStage`.
///
/// When the team count is not a multiple of `teams_per_group`, the organizer must pass
/// `confirm_uneven` to accept a smaller last group.
pub fn generate_groups<R: Rng + ?Sized>(
    tournament: &Tournament,
    confirm_uneven: bool,
    rng: &mut R,
) -> Result<Tournament, TournamentError> {
    tournament.require_status(TournamentStatus::RegistrationOpen)?;
    if tournament.teams.is_empty() {
        return Err(TournamentError::NoTeams);
    }
    let per_group = tournament.teams_per_group;
    if per_group == 0 {
        return Err(TournamentError::InvalidTeamsPerGroup(per_group));
    }
    if tournament.teams.len() % per_group != 0 && !confirm_uneven {
        return Err(TournamentError::UnevenGroups {
            teams: tournament.teams.len(),
            teams_per_group: per_group,
        });
    }

    let mut next = tournament.clone();
    next.groups = draw_groups(&tournament.teams, per_group, rng);
    next.status = TournamentStatus::GroupStage;
    log::info!(
        "Tournament {} entered group stage with {} group(s)",
        next.id,
        next.groups.len()
    );
    Ok(next)
}

/// Record the score of an unplayed group match and recompute that group's standings.
///
/// A match that already has a result is rejected; changing it goes through
/// [`edit_group_score`].
pub fn record_group_score(
    tournament: &Tournament,
    match_id: MatchId,
    score: &str,
) -> Result<Tournament, TournamentError> {
    write_group_score(tournament, match_id, score, false)
}

/// Replace the result of an already played group match while the group stage is running.
pub fn edit_group_score(
    tournament: &Tournament,
    match_id: MatchId,
    score: &str,
) -> Result<Tournament, TournamentError> {
    write_group_score(tournament, match_id, score, true)
}

fn write_group_score(
    tournament: &Tournament,
    match_id: MatchId,
    score: &str,
    edit: bool,
) -> Result<Tournament, TournamentError> {
    tournament.require_status(TournamentStatus::GroupStage)?;
    if parse_score(score).is_none() {
        return Err(TournamentError::UndecidedScore(score.to_string()));
    }
    let mut next = tournament.clone();
    let group = next
        .groups
        .iter_mut()
        .find(|g| g.get_match(match_id).is_some())
        .ok_or(TournamentError::MatchNotFound(match_id))?;
    let m = group
        .get_match_mut(match_id)
        .ok_or(TournamentError::MatchNotFound(match_id))?;
    match (m.played, edit) {
        (true, false) => return Err(TournamentError::MatchAlreadyPlayed(match_id)),
        (false, true) => return Err(TournamentError::MatchNotPlayed(match_id)),
        (true, true) => {
            log::info!("Re-editing group match {} score to '{}'", match_id, score.trim());
        }
        (false, false) => {}
    }
    m.score = Some(score.trim().to_string());
    m.played = true;
    *group = refresh_standings(group);
    Ok(next)
}

/// Build the knockout bracket from the group qualifiers, seeded in group order, and move to
/// `FinalStage`.
///
/// Requires every group match played and a qualifier count of 2, 4, 8, 16 or 32.
pub fn generate_knockout(tournament: &Tournament) -> Result<Tournament, TournamentError> {
    generate_knockout_seeded(tournament, Seeding::GroupOrder)
}

/// Like [`generate_knockout`], with the first round filled according to `seeding`.
///
/// With [`Seeding::Manual`] every qualifier starts in `unassigned_qualifiers` and the organizer
/// places them with [`assign_knockout_slot`].
pub fn generate_knockout_seeded(
    tournament: &Tournament,
    seeding: Seeding,
) -> Result<Tournament, TournamentError> {
    tournament.require_status(TournamentStatus::GroupStage)?;
    let unplayed = tournament.unplayed_group_matches();
    if unplayed > 0 {
        return Err(TournamentError::GroupStageIncomplete { unplayed });
    }
    let qualified = qualifiers(&tournament.groups);
    if !is_supported_bracket_size(qualified.len()) {
        return Err(TournamentError::UnsupportedBracketSize {
            qualifiers: qualified.len(),
        });
    }

    let bracket = build_seeded_bracket(&qualified, seeding);
    let mut next = tournament.clone();
    next.groups = tournament.groups.iter().map(refresh_standings).collect();
    next.knockout_rounds = bracket.rounds;
    next.unassigned_qualifiers = bracket.unassigned;
    next.qualifiers = qualified;
    next.status = TournamentStatus::FinalStage;
    if let Some(first) = next.knockout_rounds.first() {
        log::info!(
            "Tournament {} entered final stage: {} qualifiers, starting at {} ({:?} seeding)",
            next.id,
            next.qualifiers.len(),
            first.stage.label(),
            seeding
        );
    }
    Ok(next)
}

/// Place an unassigned qualifier into an empty first-round slot.
pub fn assign_knockout_slot(
    tournament: &Tournament,
    match_id: MatchId,
    slot: Slot,
    team: TeamId,
) -> Result<Tournament, TournamentError> {
    tournament.require_status(TournamentStatus::FinalStage)?;
    let mut next = tournament.clone();
    assign_slot(
        &mut next.knockout_rounds,
        &mut next.unassigned_qualifiers,
        match_id,
        slot,
        team,
    )?;
    Ok(next)
}

/// Record a knockout score and advance the winner. Deciding the final finishes the
/// tournament and applies its ranking points to `rankings`.
pub fn record_knockout_score(
    tournament: &Tournament,
    rankings: &[RankingEntry],
    match_id: MatchId,
    score: &str,
) -> Result<Outcome, TournamentError> {
    tournament.require_status(TournamentStatus::FinalStage)?;
    let mut next = tournament.clone();
    match record_result(&mut next.knockout_rounds, match_id, score)? {
        Advance::Champion(_) => Ok(finish(next, rankings)),
        Advance::Advanced { .. } => Ok(Outcome {
            tournament: next,
            rankings: None,
        }),
    }
}

/// Score every remaining match at random (demos and tests).
///
/// In the group stage this fills all unplayed group matches; in the final stage it plays the
/// bracket out, finishing the tournament when the final gets both teams.
pub fn simulate_remaining<R: Rng + ?Sized>(
    tournament: &Tournament,
    rankings: &[RankingEntry],
    rng: &mut R,
) -> Result<Outcome, TournamentError> {
    let mut next = tournament.clone();
    match tournament.status {
        TournamentStatus::GroupStage => {
            for group in next.groups.iter_mut() {
                for m in group.matches.iter_mut().filter(|m| !m.played) {
                    let winner = if rng.gen_bool(0.5) { Side::A } else { Side::B };
                    m.score = Some(random_score(rng, winner));
                    m.played = true;
                }
                *group = refresh_standings(group);
            }
            log::info!("Simulated remaining group matches for tournament {}", next.id);
            Ok(Outcome {
                tournament: next,
                rankings: None,
            })
        }
        TournamentStatus::FinalStage => {
            let advances = simulate_bracket(&mut next.knockout_rounds, rng)?;
            log::info!(
                "Simulated {} knockout match(es) for tournament {}",
                advances.len(),
                next.id
            );
            if advances.iter().any(|a| matches!(a, Advance::Champion(_))) {
                Ok(finish(next, rankings))
            } else {
                Ok(Outcome {
                    tournament: next,
                    rankings: None,
                })
            }
        }
        actual => Err(TournamentError::InvalidState {
            expected: TournamentStatus::FinalStage,
            actual,
        }),
    }
}

/// Enter `Finished` and apply ranking points, unless they were already applied.
fn finish(mut tournament: Tournament, rankings: &[RankingEntry]) -> Outcome {
    tournament.status = TournamentStatus::Finished;
    if let Some(champion) = tournament.champion() {
        log::info!("Tournament {} finished, won by '{}'", tournament.id, champion.name);
    }
    if tournament.ranking_applied {
        return Outcome {
            tournament,
            rankings: None,
        };
    }
    let updated = apply_tournament(rankings, &tournament);
    tournament.ranking_applied = true;
    Outcome {
        tournament,
        rankings: Some(updated),
    }
}
