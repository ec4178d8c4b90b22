mod common;

use chrono::Utc;
use club::domains::attendance::CheckInMemberParams;
use club::domains::courts::CompleteGameParams;
use club::domains::settings::{active_count, default_grid, toggle_cell};
use club::AppState;
use common::*;
use infra::models::{AttendanceRow, GameKind, Gender, SkillGrade};
use infra::repos::{CheckInData, CreateMemberData, UpdateMemberData};
use infra::DocumentStore;
use rand::rngs::StdRng;
use rand::SeedableRng;
use uuid::Uuid;

#[tokio::test]
async fn test_initialize_loads_everything() {
    // Seed the store directly, the way an earlier session would have left it
    let store = DocumentStore::new();
    let member = infra::repos::members::create(
        &store,
        CreateMemberData {
            name: "Aron".to_string(),
            birth_year: Some(1990),
            gender: Gender::Male,
            skill_grade: SkillGrade::B,
        },
    )
    .await
    .expect("Create should succeed");
    infra::repos::attendance::check_in(
        &store,
        CheckInData {
            member_id: member.id,
            member_name: member.name.clone(),
            shuttlecock_count: 2,
            guest_info: None,
        },
    )
    .await
    .expect("Check-in should succeed");
    let mut grid = default_grid(3, 4);
    toggle_cell(&mut grid, 0, 0);
    toggle_cell(&mut grid, 0, 1);
    infra::repos::settings::save(&store, grid)
        .await
        .expect("Save should succeed");

    let state = AppState::new(store).expect("Config should load");
    state.initialize().await.expect("Initial load should succeed");

    let snapshot = state.snapshot();
    assert_eq!(snapshot.members.len(), 1);
    assert_eq!(snapshot.today_attendance.len(), 1);
    assert_eq!(snapshot.all_attendance.len(), 1);
    assert!(snapshot.court_settings.is_some());
    assert_eq!(snapshot.courts.len(), 2);
    assert_eq!(snapshot.weekly_stats.len(), 7);
    assert_eq!(snapshot.weekly_stats[6].count, 1);
    assert!(snapshot.last_error.is_none());
    assert!(!snapshot.loading.members);
    assert!(!snapshot.loading.attendance);
    assert!(!snapshot.loading.courts);
}

#[tokio::test]
async fn test_failed_mutation_leaves_snapshot_untouched() {
    let state = setup_state();
    seed_member(&state, "Aron", Gender::Male, SkillGrade::C).await;

    let err = state
        .update_member(
            Uuid::new_v4(),
            UpdateMemberData {
                name: Some("Ghost".to_string()),
                birth_year: None,
                gender: None,
                skill_grade: None,
                games_played: None,
                games_won: None,
            },
        )
        .await
        .expect_err("Unknown member cannot be updated");
    assert!(err.to_string().contains("not found"));

    let snapshot = state.snapshot();
    assert_eq!(snapshot.members.len(), 1);
    assert_eq!(snapshot.members[0].name, "Aron");

    let err = state
        .check_in_member(CheckInMemberParams {
            member_id: Uuid::new_v4(),
            shuttlecock_count: 0,
        })
        .await
        .expect_err("Unknown member cannot check in");
    assert!(err.to_string().contains("Member not found"));
    assert!(state.snapshot().today_attendance.is_empty());
}

#[tokio::test]
async fn test_member_crud_patches_snapshot() {
    let state = setup_state();
    let zed = seed_member(&state, "Zed", Gender::Male, SkillGrade::B).await;
    let amy = seed_member(&state, "Amy", Gender::Female, SkillGrade::A).await;

    let names = |state: &AppState| {
        state
            .snapshot()
            .members
            .iter()
            .map(|m| m.name.clone())
            .collect::<Vec<_>>()
    };
    assert_eq!(names(&state), vec!["Amy", "Zed"]);

    // A rename re-sorts the roster; untouched fields keep their values
    state
        .update_member(
            zed.id,
            UpdateMemberData {
                name: Some("Abe".to_string()),
                birth_year: None,
                gender: None,
                skill_grade: Some(SkillGrade::A),
                games_played: None,
                games_won: None,
            },
        )
        .await
        .expect("Update should succeed");
    assert_eq!(names(&state), vec!["Abe", "Amy"]);
    let abe = state.snapshot().members[0].clone();
    assert_eq!(abe.skill_grade, SkillGrade::A);
    assert_eq!(abe.birth_year, Some(1990));

    state.delete_member(amy.id).await.expect("Delete should succeed");
    assert_eq!(names(&state), vec!["Abe"]);
    let gone = infra::repos::members::get_by_id(&state.store, amy.id)
        .await
        .expect("Lookup should succeed");
    assert!(gone.is_none());
}

#[tokio::test]
async fn test_available_players_order_and_gender_filter() {
    let state = setup_state();
    seed_checked_in(&state, "Amy", Gender::Female, SkillGrade::S).await;
    seed_checked_in(&state, "Bea", Gender::Female, SkillGrade::C).await;
    seed_checked_in(&state, "Carl", Gender::Male, SkillGrade::A).await;
    seed_checked_in(&state, "Dave", Gender::Male, SkillGrade::S).await;
    seed_checked_in(&state, "Evan", Gender::Male, SkillGrade::A).await;

    let names = |players: Vec<club::domains::courts::SessionPlayer>| {
        players.into_iter().map(|p| p.name).collect::<Vec<_>>()
    };

    // Strongest first, names breaking rank ties
    let men = state.available_players(GameKind::MenDoubles);
    assert_eq!(names(men), vec!["Dave", "Carl", "Evan"]);

    let women = state.available_players(GameKind::WomenDoubles);
    assert_eq!(names(women), vec!["Amy", "Bea"]);

    // Mixed lists the men as a block ahead of the women
    let mixed = state.available_players(GameKind::MixedDoubles);
    assert_eq!(names(mixed), vec!["Dave", "Carl", "Evan", "Amy", "Bea"]);
}

#[tokio::test]
async fn test_recommend_lineup_draws_from_the_bench() {
    let state = setup_state();
    for name in ["Aron", "Ben", "Carl", "Dave"] {
        seed_checked_in(&state, name, Gender::Male, SkillGrade::C).await;
    }

    let mut rng = StdRng::seed_from_u64(1);
    let picked = state
        .recommend_lineup(GameKind::MenDoubles, &mut rng)
        .expect("Recommendation should succeed");
    assert_eq!(picked.len(), 4);

    let err = state
        .recommend_lineup(GameKind::WomenDoubles, &mut rng)
        .expect_err("No women have checked in");
    assert!(err.to_string().contains("at least four"));
}

#[tokio::test]
async fn test_today_stats_tracks_completed_games() {
    let state = setup_state();
    save_layout(&state, 1).await;
    let aron = seed_checked_in(&state, "Aron", Gender::Male, SkillGrade::C).await;
    let ben = seed_checked_in(&state, "Ben", Gender::Male, SkillGrade::C).await;
    let carl = seed_checked_in(&state, "Carl", Gender::Male, SkillGrade::C).await;
    let dave = seed_checked_in(&state, "Dave", Gender::Male, SkillGrade::C).await;

    start_game(&state, 1, GameKind::MenDoubles, [&aron, &ben, &carl, &dave]).await;
    // Nothing shows up while the game is still running
    assert!(state.today_stats().is_empty());

    state
        .complete_game(CompleteGameParams {
            court_number: 1,
            winner_ids: vec![aron.id, ben.id],
        })
        .await
        .expect("Completion should succeed");

    let stats = state.today_stats();
    assert_eq!(stats.len(), 4);
    assert_eq!(stats[0].member.name, "Aron");
    assert_eq!(stats[0].games_played, 1);
    assert_eq!(stats[0].games_won, 1);
    assert_eq!(stats[0].win_rate(), 100);
    let carl_stats = stats
        .iter()
        .find(|s| s.member.name == "Carl")
        .expect("Carl played today");
    assert_eq!(carl_stats.win_rate(), 0);

    // Checking in without playing does not add a row
    seed_checked_in(&state, "Evan", Gender::Male, SkillGrade::C).await;
    assert_eq!(state.today_stats().len(), 4);
}

#[tokio::test]
async fn test_reset_member_data() {
    let state = setup_state();
    for name in ["Aron", "Ben", "Carl"] {
        seed_member(&state, name, Gender::Male, SkillGrade::C).await;
    }

    let removed = state.reset_member_data().await.expect("Reset should succeed");
    assert_eq!(removed, 3);
    assert!(state.snapshot().members.is_empty());
    let left = infra::repos::members::list(&state.store)
        .await
        .expect("List should succeed");
    assert!(left.is_empty());
}

#[tokio::test]
async fn test_reset_statistics_keeps_roster_and_layout() {
    let state = setup_state();
    save_layout(&state, 2).await;
    let aron = seed_checked_in(&state, "Aron", Gender::Male, SkillGrade::C).await;
    let ben = seed_checked_in(&state, "Ben", Gender::Male, SkillGrade::C).await;
    let carl = seed_checked_in(&state, "Carl", Gender::Male, SkillGrade::C).await;
    let dave = seed_checked_in(&state, "Dave", Gender::Male, SkillGrade::C).await;
    start_game(&state, 1, GameKind::MenDoubles, [&aron, &ben, &carl, &dave]).await;
    state
        .complete_game(CompleteGameParams {
            court_number: 1,
            winner_ids: vec![aron.id],
        })
        .await
        .expect("Completion should succeed");

    state
        .reset_statistics_data()
        .await
        .expect("Reset should succeed");

    let snapshot = state.snapshot();
    assert_eq!(snapshot.members.len(), 4);
    assert!(snapshot
        .members
        .iter()
        .all(|m| m.games_played == 0 && m.games_won == 0));
    assert!(snapshot.today_attendance.is_empty());
    assert!(snapshot.all_attendance.is_empty());
    assert!(snapshot.games.is_empty());
    assert!(snapshot.weekly_stats.iter().all(|day| day.count == 0));
    // The layout survives; the board just comes back empty
    assert_eq!(snapshot.courts.len(), 2);
    assert!(snapshot
        .courts
        .iter()
        .all(|court| court.is_free() && !court.has_reservation()));
    assert!(snapshot.court_settings.is_some());
}

#[tokio::test]
async fn test_load_failure_sets_last_error() {
    let state = setup_state();
    // A stray document that cannot be read back as a member
    let bad = AttendanceRow {
        id: Uuid::new_v4(),
        member_id: Uuid::new_v4(),
        member_name: "stray".to_string(),
        date: Utc::now(),
        shuttlecock_count: 0,
        has_left: false,
        guest_info: None,
        created_at: Utc::now(),
    };
    state
        .store
        .insert("members", bad.id, &bad)
        .await
        .expect("Raw insert should succeed");

    let err = state
        .refresh_members()
        .await
        .expect_err("Load should fail on the bad document");
    assert!(err.to_string().contains("invalid document"));

    let snapshot = state.snapshot();
    assert_eq!(snapshot.last_error.as_deref(), Some("Failed to load members"));
    assert!(!snapshot.loading.members);

    // A later successful load leaves the error up for the operator
    state
        .refresh_today_attendance()
        .await
        .expect("Load should succeed");
    assert_eq!(
        state.snapshot().last_error.as_deref(),
        Some("Failed to load members")
    );
}

#[tokio::test]
async fn test_layout_grid_defaults_when_unsaved() {
    let state = setup_state();

    let grid = state.layout_grid();
    assert_eq!(grid.len(), 3);
    assert!(grid.iter().all(|row| row.len() == 4));
    assert!(grid
        .iter()
        .flatten()
        .all(|cell| !cell.is_active && cell.court_number.is_none()));

    // Once saved, the editor gets the saved layout back
    save_layout(&state, 2).await;
    assert_eq!(active_count(&state.layout_grid()), 2);
}
