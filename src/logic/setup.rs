//! Setup phase: creating a tournament, deciding registrations, adjusting settings.
//!
//! Every function takes the current snapshot and returns a new one; the input is never changed.

use crate::models::{
    Registration, RegistrationId, RegistrationStatus, Team, TeamPlayer, Tournament,
    TournamentError, TournamentStatus,
};

fn validate_settings(max_teams: usize, teams_per_group: usize) -> Result<(), TournamentError> {
    if max_teams < 2 {
        return Err(TournamentError::InvalidMaxTeams(max_teams));
    }
    if teams_per_group < 1 {
        return Err(TournamentError::InvalidTeamsPerGroup(teams_per_group));
    }
    Ok(())
}

/// New tournament in `RegistrationOpen` with no teams.
pub fn create_tournament(
    name: &str,
    category: &str,
    max_teams: usize,
    teams_per_group: usize,
) -> Result<Tournament, TournamentError> {
    let (name, category) = (name.trim(), category.trim());
    if name.is_empty() || category.is_empty() {
        return Err(TournamentError::EmptyName);
    }
    validate_settings(max_teams, teams_per_group)?;
    let tournament = Tournament::new(name, category, max_teams, teams_per_group);
    log::info!(
        "Created tournament {} '{}' ({}, up to {} teams, groups of {})",
        tournament.id,
        tournament.name,
        tournament.category,
        max_teams,
        teams_per_group
    );
    Ok(tournament)
}

/// Change `max_teams` / `teams_per_group` while registrations are open.
pub fn configure(
    tournament: &Tournament,
    max_teams: usize,
    teams_per_group: usize,
) -> Result<Tournament, TournamentError> {
    tournament.require_status(TournamentStatus::RegistrationOpen)?;
    validate_settings(max_teams, teams_per_group)?;
    if max_teams < tournament.teams.len() {
        return Err(TournamentError::MaxTeamsBelowTeamCount {
            max_teams,
            teams: tournament.teams.len(),
        });
    }
    let mut next = tournament.clone();
    next.max_teams = max_teams;
    next.teams_per_group = teams_per_group;
    Ok(next)
}

/// Submit a pending registration. Team names are unique (case-insensitive) among
/// registrations that were not rejected.
pub fn register_team(
    tournament: &Tournament,
    team_name: &str,
    players: Vec<TeamPlayer>,
) -> Result<(Tournament, RegistrationId), TournamentError> {
    tournament.require_status(TournamentStatus::RegistrationOpen)?;
    let team_name = team_name.trim();
    if team_name.is_empty() {
        return Err(TournamentError::EmptyName);
    }
    if players.is_empty() {
        return Err(TournamentError::NoPlayers);
    }
    let is_duplicate = tournament
        .registrations
        .iter()
        .filter(|r| r.status != RegistrationStatus::Rejected)
        .any(|r| r.team_name.eq_ignore_ascii_case(team_name));
    if is_duplicate {
        return Err(TournamentError::DuplicateTeamName(team_name.to_string()));
    }

    let registration = Registration::new(team_name, players);
    let id = registration.id;
    let mut next = tournament.clone();
    next.registrations.push(registration);
    Ok((next, id))
}

fn pending_registration(
    tournament: &Tournament,
    id: RegistrationId,
) -> Result<&Registration, TournamentError> {
    tournament.require_status(TournamentStatus::RegistrationOpen)?;
    let registration = tournament
        .registrations
        .iter()
        .find(|r| r.id == id)
        .ok_or(TournamentError::RegistrationNotFound(id))?;
    if registration.status != RegistrationStatus::Pending {
        return Err(TournamentError::RegistrationAlreadyDecided {
            id,
            status: registration.status,
        });
    }
    Ok(registration)
}

/// Approve a pending registration and add its team. Rejected when the tournament is full.
pub fn approve_registration(
    tournament: &Tournament,
    id: RegistrationId,
) -> Result<Tournament, TournamentError> {
    let registration = pending_registration(tournament, id)?;
    if tournament.teams.len() >= tournament.max_teams {
        return Err(TournamentError::TournamentFull {
            max_teams: tournament.max_teams,
        });
    }
    if let Some(p) = registration
        .players
        .iter()
        .find(|p| tournament.teams.iter().any(|t| t.has_player(p.player_id)))
    {
        return Err(TournamentError::PlayerAlreadyRegistered(p.player_id));
    }

    let team = Team::new(registration.team_name.clone(), registration.players.clone());
    let mut next = tournament.clone();
    if let Some(r) = next.get_registration_mut(id) {
        r.status = RegistrationStatus::Approved;
    }
    log::info!(
        "Approved '{}' for tournament {} ({}/{} teams)",
        team.name,
        next.id,
        next.teams.len() + 1,
        next.max_teams
    );
    next.teams.push(team);
    Ok(next)
}

/// Reject a pending registration. Terminal.
pub fn reject_registration(
    tournament: &Tournament,
    id: RegistrationId,
) -> Result<Tournament, TournamentError> {
    pending_registration(tournament, id)?;
    let mut next = tournament.clone();
    if let Some(r) = next.get_registration_mut(id) {
        r.status = RegistrationStatus::Rejected;
    }
    Ok(next)
}
