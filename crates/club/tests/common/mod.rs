use once_cell::sync::Lazy;

use club::domains::attendance::CheckInMemberParams;
use club::domains::courts::{Court, LineupPlayer, StartGameParams};
use club::domains::settings::{default_grid, toggle_cell};
use club::AppState;
use infra::models::{AttendanceRow, GameKind, Gender, MemberRow, SkillGrade};
use infra::repos::CreateMemberData;
use infra::DocumentStore;

static TRACING: Lazy<()> = Lazy::new(|| {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
});

pub fn setup_state() -> AppState {
    Lazy::force(&TRACING);
    AppState::new(DocumentStore::new()).expect("Failed to create AppState")
}

/// Create a member through the state so the cached snapshot stays in sync
#[allow(dead_code)]
pub async fn seed_member(
    state: &AppState,
    name: &str,
    gender: Gender,
    grade: SkillGrade,
) -> MemberRow {
    state
        .add_member(CreateMemberData {
            name: name.to_string(),
            birth_year: Some(1990),
            gender,
            skill_grade: grade,
        })
        .await
        .expect("Failed to create member")
}

/// Check a member in for today
#[allow(dead_code)]
pub async fn check_in(state: &AppState, member: &MemberRow) -> AttendanceRow {
    state
        .check_in_member(CheckInMemberParams {
            member_id: member.id,
            shuttlecock_count: 0,
        })
        .await
        .expect("Failed to check member in")
        .attendance
}

/// Create a member and check them in, one call per test player
#[allow(dead_code)]
pub async fn seed_checked_in(
    state: &AppState,
    name: &str,
    gender: Gender,
    grade: SkillGrade,
) -> MemberRow {
    let member = seed_member(state, name, gender, grade).await;
    check_in(state, &member).await;
    member
}

/// Save a layout with the first `active` cells of the default grid turned on
#[allow(dead_code)]
pub async fn save_layout(state: &AppState, active: usize) {
    let mut grid = default_grid(3, 4);
    for index in 0..active {
        toggle_cell(&mut grid, index / 4, index % 4);
    }
    state
        .save_court_settings(grid)
        .await
        .expect("Failed to save court settings");
}

/// The board court with the given number
#[allow(dead_code)]
pub fn court_on_board(state: &AppState, number: i32) -> Court {
    state
        .snapshot()
        .courts
        .into_iter()
        .find(|court| court.number == number)
        .expect("Court missing from the board")
}

/// Lineup entries for the given members, in order
#[allow(dead_code)]
pub fn lineup_of(members: &[&MemberRow]) -> Vec<LineupPlayer> {
    members
        .iter()
        .map(|member| LineupPlayer {
            id: member.id,
            name: member.name.clone(),
        })
        .collect()
}

/// Start a game with the given four members
#[allow(dead_code)]
pub async fn start_game(
    state: &AppState,
    court_number: i32,
    kind: GameKind,
    players: [&MemberRow; 4],
) {
    state
        .start_game(StartGameParams {
            court_number,
            kind,
            players: lineup_of(&players),
        })
        .await
        .expect("Failed to start game");
}

