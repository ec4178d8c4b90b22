use std::collections::HashSet;

use chrono::Duration;
use uuid::Uuid;

use infra::models::{
    AttendanceRow, CourtSettingsRow, GameKind, GameRow, GameStatus, Gender, MemberRow, SkillGrade,
};

use super::types::{CardSize, Court, CourtGrid, PlayStatus, RosterEntry, SessionPlayer};
use crate::skill::SkillRating;

/// Resolve today's attendance into session players. Attendees who already
/// left are dropped; everyone else is matched against the member list, with
/// guest info (or the defaults) filling the gaps.
pub fn session_players(attendance: &[AttendanceRow], members: &[MemberRow]) -> Vec<SessionPlayer> {
    attendance
        .iter()
        .filter(|row| !row.has_left)
        .map(|row| {
            let member = members.iter().find(|m| m.id == row.member_id);
            let (gender, grade) = match (member, &row.guest_info) {
                (Some(member), _) => (member.gender, member.skill_grade),
                (None, Some(info)) => (
                    info.gender.unwrap_or(Gender::Male),
                    info.skill_grade.unwrap_or(SkillGrade::C),
                ),
                (None, None) => (Gender::Male, SkillGrade::C),
            };
            SessionPlayer {
                id: row.member_id,
                name: row.member_name.clone(),
                gender,
                skill: SkillRating::Grade(grade),
                is_guest: row.guest_info.is_some(),
            }
        })
        .collect()
}

/// Ids tied up anywhere on the board, current games and reservations alike.
pub fn busy_player_ids(courts: &[Court]) -> HashSet<Uuid> {
    let mut busy = HashSet::new();
    for court in courts {
        for game in court.current_game.iter().chain(court.next_game.iter()) {
            busy.extend(game.players.iter().copied());
        }
    }
    busy
}

/// The pool a new lineup draws from: session players not tied up on any
/// court, narrowed to the genders the game kind allows. Sorted male block
/// first, strongest first within it, names as tie-break.
pub fn available_players(
    attendance: &[AttendanceRow],
    members: &[MemberRow],
    courts: &[Court],
    kind: GameKind,
) -> Vec<SessionPlayer> {
    let busy = busy_player_ids(courts);
    let mut pool: Vec<SessionPlayer> = session_players(attendance, members)
        .into_iter()
        .filter(|player| !busy.contains(&player.id))
        .filter(|player| match kind {
            GameKind::MenDoubles => player.gender == Gender::Male,
            GameKind::WomenDoubles => player.gender == Gender::Female,
            GameKind::MixedDoubles => true,
        })
        .collect();
    pool.sort_by(|a, b| {
        gender_order(a.gender)
            .cmp(&gender_order(b.gender))
            .then(b.rank().cmp(&a.rank()))
            .then(a.name.cmp(&b.name))
    });
    pool
}

/// Playing wins over waiting wins over available.
pub fn play_status(id: Uuid, courts: &[Court]) -> PlayStatus {
    let in_game = |game: &Option<GameRow>| {
        game.as_ref().is_some_and(|game| game.players.contains(&id))
    };
    if courts.iter().any(|court| in_game(&court.current_game)) {
        return PlayStatus::Playing;
    }
    if courts.iter().any(|court| in_game(&court.next_game)) {
        return PlayStatus::Waiting;
    }
    PlayStatus::Available
}

/// Build the live board: one court per active layout cell, with the playing
/// and waiting games attached by court number. No saved layout, no board.
pub fn active_courts(settings: Option<&CourtSettingsRow>, games: &[GameRow]) -> Vec<Court> {
    let Some(settings) = settings else {
        return Vec::new();
    };
    let mut courts: Vec<Court> = settings
        .grid
        .iter()
        .flatten()
        .filter(|cell| cell.is_active)
        .filter_map(|cell| {
            let number = cell.court_number?;
            Some(Court {
                number,
                name: format!("Court {number}"),
                col: cell.col,
                row: cell.row,
                current_game: games
                    .iter()
                    .find(|game| game.court_id == number && game.status == GameStatus::Playing)
                    .cloned(),
                next_game: games
                    .iter()
                    .find(|game| game.court_id == number && game.status == GameStatus::Waiting)
                    .cloned(),
            })
        })
        .collect();
    courts.sort_by_key(|court| court.number);
    courts
}

/// Dense grid sized to the furthest occupied cell, with the card size that
/// keeps that many courts readable on screen.
pub fn court_grid(courts: &[Court]) -> CourtGrid {
    if courts.is_empty() {
        return CourtGrid {
            cells: Vec::new(),
            rows: 0,
            cols: 0,
            card_size: CardSize::Large,
        };
    }
    let rows = courts.iter().map(|court| court.row).max().unwrap_or(0) + 1;
    let cols = courts.iter().map(|court| court.col).max().unwrap_or(0) + 1;
    let mut cells: Vec<Vec<Option<Court>>> = vec![vec![None; cols]; rows];
    for court in courts {
        cells[court.row][court.col] = Some(court.clone());
    }
    CourtGrid {
        cells,
        rows,
        cols,
        card_size: card_size(cols, courts.len()),
    }
}

pub fn card_size(cols: usize, total_courts: usize) -> CardSize {
    if cols >= 5 || total_courts >= 8 {
        CardSize::Small
    } else if cols >= 4 || total_courts >= 6 {
        CardSize::Medium
    } else if cols >= 3 {
        CardSize::Medium
    } else {
        CardSize::Large
    }
}

/// Everyone currently mid-game, with the court they are on and when it began.
pub fn playing_roster(courts: &[Court]) -> Vec<RosterEntry> {
    let mut entries = Vec::new();
    for court in courts {
        if let Some(game) = &court.current_game {
            for name in &game.player_names {
                entries.push(RosterEntry {
                    player_name: name.clone(),
                    court_name: court.name.clone(),
                    start_time: game.start_time,
                });
            }
        }
    }
    entries
}

/// Everyone queued up in a reservation, with the court they are waiting for.
pub fn waiting_roster(courts: &[Court]) -> Vec<RosterEntry> {
    let mut entries = Vec::new();
    for court in courts {
        if let Some(game) = &court.next_game {
            for name in &game.player_names {
                entries.push(RosterEntry {
                    player_name: name.clone(),
                    court_name: court.name.clone(),
                    start_time: None,
                });
            }
        }
    }
    entries
}

/// Elapsed play time as `M:SS`, growing to `H:MM:SS` past the hour.
pub fn format_elapsed(elapsed: Duration) -> String {
    let total_secs = elapsed.num_seconds().max(0);
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;
    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes}:{seconds:02}")
    }
}

fn gender_order(gender: Gender) -> u8 {
    match gender {
        Gender::Male => 0,
        Gender::Female => 1,
    }
}
