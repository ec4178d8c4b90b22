use std::sync::Arc;

use parking_lot::RwLock;
use rand::Rng;
use tracing::error;
use uuid::Uuid;

use infra::models::{AttendanceRow, CourtCell, CourtSettingsRow, GameKind, GameRow, MemberRow};
use infra::repos::{
    attendance as attendance_repo, games as games_repo, members as members_repo,
    settings as settings_repo,
};
use infra::repos::{CreateMemberData, DailyAttendanceCount, UpdateMemberData};
use infra::{time, DocumentStore};

use crate::config::AppConfig;
use crate::domains::attendance::{
    self as attendance_domain, CheckInGuestParams, CheckInMemberParams, CheckInOutcome,
};
use crate::domains::courts::{
    self, service as courts_service, CompleteGameOutcome, CompleteGameParams, Court, CourtGrid,
    ReserveGameOutcome, ReserveGameParams, SessionPlayer, StartGameOutcome, StartGameParams,
};
use crate::domains::lineup;
use crate::domains::settings as settings_domain;
use crate::domains::stats::{self, TodayMemberStats};
use crate::error::AppError;

/// Which loads are in flight, one flag per data set the dashboard shows.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoadingFlags {
    pub members: bool,
    pub attendance: bool,
    pub all_attendance: bool,
    pub games: bool,
    pub courts: bool,
    pub weekly_stats: bool,
}

/// Point-in-time copy of everything the club session works from. `games`
/// holds today's game history; the live board lives in `courts`, rebuilt
/// whenever the current games or the layout change.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub members: Vec<MemberRow>,
    pub today_attendance: Vec<AttendanceRow>,
    pub all_attendance: Vec<AttendanceRow>,
    pub games: Vec<GameRow>,
    pub courts: Vec<Court>,
    pub court_settings: Option<CourtSettingsRow>,
    pub weekly_stats: Vec<DailyAttendanceCount>,
    pub loading: LoadingFlags,
    pub last_error: Option<String>,
}

/// Shared application state: the document store plus a cached snapshot of
/// the session data. Mutations write to the store first and patch the
/// snapshot only after the write succeeds, so a failed call leaves the
/// snapshot untouched. `last_error` keeps the most recent load failure for
/// the operator; it is not cleared by later successes.
#[derive(Clone)]
pub struct AppState {
    pub store: DocumentStore,
    config: AppConfig,
    snapshot: Arc<RwLock<Snapshot>>,
}

impl AppState {
    pub fn new(store: DocumentStore) -> anyhow::Result<Self> {
        let config = AppConfig::from_env()?;

        Ok(Self {
            store,
            config,
            snapshot: Arc::new(RwLock::new(Snapshot::default())),
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn snapshot(&self) -> Snapshot {
        self.snapshot.read().clone()
    }

    /// The live board as a renderable grid.
    pub fn court_grid(&self) -> CourtGrid {
        courts::court_grid(&self.snapshot.read().courts)
    }

    /// The layout grid to edit: the saved one, or an all-inactive grid at
    /// the configured default size when nothing has been saved yet.
    pub fn layout_grid(&self) -> Vec<Vec<CourtCell>> {
        let snapshot = self.snapshot.read();
        match &snapshot.court_settings {
            Some(settings) => settings.grid.clone(),
            None => settings_domain::default_grid(
                self.config.default_grid_rows,
                self.config.default_grid_cols,
            ),
        }
    }

    /// The bench for a game kind: checked-in players not tied up on any
    /// court, narrowed to the genders the kind allows.
    pub fn available_players(&self, kind: GameKind) -> Vec<SessionPlayer> {
        let snapshot = self.snapshot.read();
        courts::available_players(
            &snapshot.today_attendance,
            &snapshot.members,
            &snapshot.courts,
            kind,
        )
    }

    /// Suggest an evenly matched four from the current bench.
    pub fn recommend_lineup(
        &self,
        kind: GameKind,
        rng: &mut impl Rng,
    ) -> Result<Vec<SessionPlayer>, AppError> {
        let pool = self.available_players(kind);
        lineup::recommend_lineup(kind, &pool, rng).map_err(AppError::from_workflow)
    }

    /// Per-member results over today's completed games.
    pub fn today_stats(&self) -> Vec<TodayMemberStats> {
        let snapshot = self.snapshot.read();
        stats::today_performance(&snapshot.members, &snapshot.games)
    }

    /// First load after startup, in the order the dashboard needs the data.
    pub async fn initialize(&self) -> Result<(), AppError> {
        self.refresh_members().await?;
        self.refresh_today_attendance().await?;
        self.refresh_all_attendance().await?;
        self.refresh_court_settings().await?;
        self.refresh_weekly_stats().await?;
        self.refresh_current_games().await?;
        Ok(())
    }

    /// Full reload, including today's game history.
    pub async fn refresh_all(&self) -> Result<(), AppError> {
        self.initialize().await?;
        self.refresh_today_games().await?;
        Ok(())
    }

    pub async fn refresh_members(&self) -> Result<(), AppError> {
        self.snapshot.write().loading.members = true;
        let result = members_repo::list(&self.store).await;
        let mut snapshot = self.snapshot.write();
        snapshot.loading.members = false;
        match result {
            Ok(members) => {
                snapshot.members = members;
                Ok(())
            }
            Err(e) => {
                error!("Failed to load members: {}", e);
                snapshot.last_error = Some("Failed to load members".to_string());
                Err(e.into())
            }
        }
    }

    pub async fn refresh_today_attendance(&self) -> Result<(), AppError> {
        self.snapshot.write().loading.attendance = true;
        let result = attendance_repo::list_today(&self.store).await;
        let mut snapshot = self.snapshot.write();
        snapshot.loading.attendance = false;
        match result {
            Ok(rows) => {
                snapshot.today_attendance = rows;
                Ok(())
            }
            Err(e) => {
                error!("Failed to load today's attendance: {}", e);
                snapshot.last_error = Some("Failed to load today's attendance".to_string());
                Err(e.into())
            }
        }
    }

    pub async fn refresh_all_attendance(&self) -> Result<(), AppError> {
        self.snapshot.write().loading.all_attendance = true;
        let result = attendance_repo::list_all(&self.store).await;
        let mut snapshot = self.snapshot.write();
        snapshot.loading.all_attendance = false;
        match result {
            Ok(rows) => {
                snapshot.all_attendance = rows;
                Ok(())
            }
            Err(e) => {
                error!("Failed to load attendance history: {}", e);
                snapshot.last_error = Some("Failed to load attendance history".to_string());
                Err(e.into())
            }
        }
    }

    pub async fn refresh_today_games(&self) -> Result<(), AppError> {
        self.snapshot.write().loading.games = true;
        let result = games_repo::list_today(&self.store).await;
        let mut snapshot = self.snapshot.write();
        snapshot.loading.games = false;
        match result {
            Ok(rows) => {
                snapshot.games = rows;
                Ok(())
            }
            Err(e) => {
                error!("Failed to load today's games: {}", e);
                snapshot.last_error = Some("Failed to load today's games".to_string());
                Err(e.into())
            }
        }
    }

    /// Reload the games still on the board and rebuild the courts from them.
    pub async fn refresh_current_games(&self) -> Result<(), AppError> {
        self.snapshot.write().loading.courts = true;
        let result = games_repo::list_current(&self.store).await;
        let mut snapshot = self.snapshot.write();
        snapshot.loading.courts = false;
        match result {
            Ok(games) => {
                let rebuilt = courts::active_courts(snapshot.court_settings.as_ref(), &games);
                snapshot.courts = rebuilt;
                Ok(())
            }
            Err(e) => {
                error!("Failed to load current games: {}", e);
                snapshot.last_error = Some("Failed to load current games".to_string());
                Err(e.into())
            }
        }
    }

    /// Reload the saved layout and rebuild the board for it. Games already
    /// on the board stay with their court numbers.
    pub async fn refresh_court_settings(&self) -> Result<(), AppError> {
        let result = settings_repo::get(&self.store).await;
        let mut snapshot = self.snapshot.write();
        match result {
            Ok(settings) => {
                let games: Vec<GameRow> = snapshot
                    .courts
                    .iter()
                    .flat_map(|court| {
                        court.current_game.iter().chain(court.next_game.iter()).cloned()
                    })
                    .collect();
                let rebuilt = courts::active_courts(settings.as_ref(), &games);
                snapshot.courts = rebuilt;
                snapshot.court_settings = settings;
                Ok(())
            }
            Err(e) => {
                error!("Failed to load court settings: {}", e);
                snapshot.last_error = Some("Failed to load court settings".to_string());
                Err(e.into())
            }
        }
    }

    pub async fn refresh_weekly_stats(&self) -> Result<(), AppError> {
        self.snapshot.write().loading.weekly_stats = true;
        let result = attendance_repo::weekly_counts(&self.store, time::today()).await;
        let mut snapshot = self.snapshot.write();
        snapshot.loading.weekly_stats = false;
        match result {
            Ok(counts) => {
                snapshot.weekly_stats = counts;
                Ok(())
            }
            Err(e) => {
                error!("Failed to load weekly attendance: {}", e);
                snapshot.last_error = Some("Failed to load weekly attendance".to_string());
                Err(e.into())
            }
        }
    }

    pub async fn add_member(&self, data: CreateMemberData) -> Result<MemberRow, AppError> {
        let member = members_repo::create(&self.store, data).await?;
        {
            let mut snapshot = self.snapshot.write();
            snapshot.members.push(member.clone());
            snapshot.members.sort_by(|a, b| a.name.cmp(&b.name));
        }
        Ok(member)
    }

    pub async fn update_member(
        &self,
        id: Uuid,
        data: UpdateMemberData,
    ) -> Result<MemberRow, AppError> {
        let member = members_repo::update(&self.store, id, data).await?;
        {
            let mut snapshot = self.snapshot.write();
            if let Some(slot) = snapshot.members.iter_mut().find(|m| m.id == id) {
                *slot = member.clone();
            }
            snapshot.members.sort_by(|a, b| a.name.cmp(&b.name));
        }
        Ok(member)
    }

    pub async fn delete_member(&self, id: Uuid) -> Result<(), AppError> {
        members_repo::delete(&self.store, id).await?;
        self.snapshot.write().members.retain(|m| m.id != id);
        Ok(())
    }

    pub async fn check_in_member(
        &self,
        params: CheckInMemberParams,
    ) -> Result<CheckInOutcome, AppError> {
        let outcome = attendance_domain::check_in_member(&self.store, params)
            .await
            .map_err(AppError::from_workflow)?;
        self.insert_attendance(outcome.attendance.clone());
        Ok(outcome)
    }

    pub async fn check_in_guest(
        &self,
        params: CheckInGuestParams,
    ) -> Result<CheckInOutcome, AppError> {
        let outcome = attendance_domain::check_in_guest(&self.store, params)
            .await
            .map_err(AppError::from_workflow)?;
        self.insert_attendance(outcome.attendance.clone());
        Ok(outcome)
    }

    pub async fn update_shuttlecock_count(
        &self,
        id: Uuid,
        shuttlecock_count: i64,
    ) -> Result<AttendanceRow, AppError> {
        let row =
            attendance_repo::update_shuttlecock_count(&self.store, id, shuttlecock_count).await?;
        self.patch_attendance(&row);
        Ok(row)
    }

    pub async fn set_left_status(
        &self,
        id: Uuid,
        has_left: bool,
    ) -> Result<AttendanceRow, AppError> {
        let row = attendance_repo::set_left_status(&self.store, id, has_left).await?;
        self.patch_attendance(&row);
        Ok(row)
    }

    pub async fn delete_attendance(&self, id: Uuid) -> Result<(), AppError> {
        attendance_repo::delete(&self.store, id).await?;
        let mut snapshot = self.snapshot.write();
        snapshot.today_attendance.retain(|row| row.id != id);
        snapshot.all_attendance.retain(|row| row.id != id);
        Ok(())
    }

    /// Start a game on a free court. Today's list gains the new game, loses
    /// any reservations that gave way, and the board is rebuilt.
    pub async fn start_game(&self, params: StartGameParams) -> Result<StartGameOutcome, AppError> {
        let courts = self.snapshot.read().courts.clone();
        let outcome = courts_service::start_game(&self.store, &courts, params)
            .await
            .map_err(AppError::from_workflow)?;
        {
            let mut snapshot = self.snapshot.write();
            for cancelled in &outcome.cancelled {
                snapshot.games.retain(|game| game.id != cancelled.game_id);
            }
            snapshot.games.insert(0, outcome.game.clone());
        }
        self.refresh_current_games().await?;
        Ok(outcome)
    }

    /// Queue the next game on a court, replacing any reservation it had.
    pub async fn reserve_game(
        &self,
        params: ReserveGameParams,
    ) -> Result<ReserveGameOutcome, AppError> {
        let courts = self.snapshot.read().courts.clone();
        let outcome = courts_service::reserve_game(&self.store, &courts, params)
            .await
            .map_err(AppError::from_workflow)?;
        {
            let mut snapshot = self.snapshot.write();
            if let Some(replaced) = outcome.replaced_game_id {
                snapshot.games.retain(|game| game.id != replaced);
            }
            snapshot.games.insert(0, outcome.game.clone());
        }
        self.refresh_current_games().await?;
        Ok(outcome)
    }

    /// Finish the game in progress on a court. The completed game lands in
    /// today's list, member counters move with it, and the board is rebuilt
    /// around whatever happened to the reservation.
    pub async fn complete_game(
        &self,
        params: CompleteGameParams,
    ) -> Result<CompleteGameOutcome, AppError> {
        let courts = self.snapshot.read().courts.clone();
        let outcome = courts_service::complete_game(&self.store, &courts, params)
            .await
            .map_err(AppError::from_workflow)?;
        {
            let mut snapshot = self.snapshot.write();
            let completed = &outcome.completed;
            match snapshot.games.iter().position(|game| game.id == completed.id) {
                Some(index) => snapshot.games[index] = completed.clone(),
                None => snapshot.games.insert(0, completed.clone()),
            }
            if let Some(promoted) = &outcome.promoted {
                if let Some(slot) = snapshot.games.iter_mut().find(|g| g.id == promoted.id) {
                    *slot = promoted.clone();
                }
            }
            if let Some(cancelled) = outcome.cancelled_reservation {
                snapshot.games.retain(|game| game.id != cancelled);
            }
            for player_id in &completed.players {
                if let Some(member) = snapshot.members.iter_mut().find(|m| m.id == *player_id) {
                    member.games_played += 1;
                    if completed.winners.contains(player_id) {
                        member.games_won += 1;
                    }
                }
            }
        }
        self.refresh_current_games().await?;
        Ok(outcome)
    }

    pub async fn cancel_reservation(&self, court_number: i32) -> Result<GameRow, AppError> {
        let courts = self.snapshot.read().courts.clone();
        let cancelled = courts_service::cancel_reservation(&self.store, &courts, court_number)
            .await
            .map_err(AppError::from_workflow)?;
        self.snapshot.write().games.retain(|game| game.id != cancelled.id);
        self.refresh_current_games().await?;
        Ok(cancelled)
    }

    /// Persist a new layout and rebuild the board for it. Games keep their
    /// courts by number; a court dropped from the layout takes its games off
    /// the board, though they stay in the store.
    pub async fn save_court_settings(
        &self,
        grid: Vec<Vec<CourtCell>>,
    ) -> Result<CourtSettingsRow, AppError> {
        let row = settings_repo::save(&self.store, grid).await?;
        let games = games_repo::list_current(&self.store).await?;
        {
            let mut snapshot = self.snapshot.write();
            snapshot.courts = courts::active_courts(Some(&row), &games);
            snapshot.court_settings = Some(row.clone());
        }
        Ok(row)
    }

    /// Wipe the member roster. Attendance and game history stay.
    pub async fn reset_member_data(&self) -> Result<u64, AppError> {
        let removed = members_repo::delete_all(&self.store).await?;
        self.snapshot.write().members.clear();
        Ok(removed)
    }

    /// Wipe attendance and game history and zero every member's counters.
    /// The saved layout survives; the board comes back empty.
    pub async fn reset_statistics_data(&self) -> Result<(), AppError> {
        attendance_repo::delete_all(&self.store).await?;
        games_repo::delete_all(&self.store).await?;
        for member in members_repo::list(&self.store).await? {
            members_repo::update(
                &self.store,
                member.id,
                UpdateMemberData {
                    name: None,
                    birth_year: None,
                    gender: None,
                    skill_grade: None,
                    games_played: Some(0),
                    games_won: Some(0),
                },
            )
            .await?;
        }
        let members = members_repo::list(&self.store).await?;
        let weekly = attendance_repo::weekly_counts(&self.store, time::today()).await?;
        let mut snapshot = self.snapshot.write();
        snapshot.members = members;
        snapshot.today_attendance.clear();
        snapshot.all_attendance.clear();
        snapshot.games.clear();
        snapshot.weekly_stats = weekly;
        let rebuilt = courts::active_courts(snapshot.court_settings.as_ref(), &[]);
        snapshot.courts = rebuilt;
        Ok(())
    }

    // --- Private helpers ---

    fn insert_attendance(&self, row: AttendanceRow) {
        let mut snapshot = self.snapshot.write();
        snapshot.today_attendance.insert(0, row.clone());
        snapshot.all_attendance.insert(0, row);
    }

    fn patch_attendance(&self, row: &AttendanceRow) {
        let mut snapshot = self.snapshot.write();
        if let Some(slot) = snapshot.today_attendance.iter_mut().find(|r| r.id == row.id) {
            *slot = row.clone();
        }
        if let Some(slot) = snapshot.all_attendance.iter_mut().find(|r| r.id == row.id) {
            *slot = row.clone();
        }
    }
}
