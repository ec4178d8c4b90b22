use chrono::Utc;
use uuid::Uuid;

use crate::models::{GameKind, GameRow, GameStatus};
use crate::repos::members;
use crate::store::{DocumentStore, Result, StoreError};
use crate::time;

const COLLECTION: &str = "games";

#[derive(Debug, Clone)]
pub struct CreateGameData {
    pub court_id: i32,
    pub kind: GameKind,
    pub players: Vec<Uuid>,
    pub player_names: Vec<String>,
    pub status: GameStatus,
}

pub async fn create(store: &DocumentStore, data: CreateGameData) -> Result<GameRow> {
    let now = Utc::now();
    let row = GameRow {
        id: Uuid::new_v4(),
        court_id: data.court_id,
        kind: data.kind,
        players: data.players,
        player_names: data.player_names,
        status: data.status,
        start_time: (data.status == GameStatus::Playing).then_some(now),
        end_time: None,
        winners: Vec::new(),
        winner_names: Vec::new(),
        created_at: now,
        updated_at: now,
    };
    store.insert(COLLECTION, row.id, &row).await?;
    Ok(row)
}

pub async fn get_by_id(store: &DocumentStore, id: Uuid) -> Result<Option<GameRow>> {
    store.get(COLLECTION, id).await
}

/// Move a game to a new status. Entering `Playing` stamps a fresh start time
/// so a promoted reservation is not billed for its wait on the bench.
pub async fn update_status(
    store: &DocumentStore,
    id: Uuid,
    status: GameStatus,
) -> Result<GameRow> {
    let mut row: GameRow = store.get(COLLECTION, id).await?.ok_or(StoreError::NotFound {
        collection: COLLECTION,
        id,
    })?;
    row.status = status;
    match status {
        GameStatus::Playing => row.start_time = Some(Utc::now()),
        GameStatus::Completed => row.end_time = Some(Utc::now()),
        GameStatus::Waiting => {}
    }
    row.updated_at = Utc::now();
    store.set(COLLECTION, id, &row).await?;
    Ok(row)
}

/// Finish a game and credit results. Every registered player gets a game
/// played; winners also get a win. Guests have no member record to update.
/// An empty winner list records the game with no winner declared.
pub async fn complete(
    store: &DocumentStore,
    id: Uuid,
    winners: Vec<Uuid>,
    winner_names: Vec<String>,
) -> Result<GameRow> {
    let mut row: GameRow = store.get(COLLECTION, id).await?.ok_or(StoreError::NotFound {
        collection: COLLECTION,
        id,
    })?;
    let now = Utc::now();
    row.status = GameStatus::Completed;
    row.end_time = Some(now);
    row.winners = winners;
    row.winner_names = winner_names;
    row.updated_at = now;
    store.set(COLLECTION, id, &row).await?;
    for player_id in &row.players {
        let won = row.winners.contains(player_id);
        members::record_game_result(store, *player_id, won).await?;
    }
    Ok(row)
}

/// Games still on the board: one playing and at most one waiting per court.
pub async fn list_current(store: &DocumentStore) -> Result<Vec<GameRow>> {
    let mut rows: Vec<GameRow> = store.list(COLLECTION).await?;
    rows.retain(|row| matches!(row.status, GameStatus::Playing | GameStatus::Waiting));
    rows.sort_by(|a, b| a.court_id.cmp(&b.court_id).then(a.created_at.cmp(&b.created_at)));
    Ok(rows)
}

pub async fn list_today(store: &DocumentStore) -> Result<Vec<GameRow>> {
    let mut rows: Vec<GameRow> = store.list(COLLECTION).await?;
    rows.retain(|row| time::is_today(row.created_at));
    rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(rows)
}

pub async fn delete(store: &DocumentStore, id: Uuid) -> Result<()> {
    store.delete(COLLECTION, id).await?;
    Ok(())
}

pub async fn delete_all(store: &DocumentStore) -> Result<u64> {
    store.clear(COLLECTION).await
}
