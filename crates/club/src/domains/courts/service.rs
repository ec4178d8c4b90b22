use std::collections::HashSet;

use uuid::Uuid;

use infra::models::{GameKind, GameRow, GameStatus};
use infra::repos::{games, games::CreateGameData};
use infra::DocumentStore;

use super::types::{Court, LineupPlayer};

/// Parameters for starting a game on a free court.
pub struct StartGameParams {
    pub court_number: i32,
    pub kind: GameKind,
    pub players: Vec<LineupPlayer>,
}

/// A queue dropped because its players were pulled into a starting game.
#[derive(Debug)]
pub struct CancelledReservation {
    pub court_name: String,
    pub game_id: Uuid,
}

/// Result of a started game.
#[derive(Debug)]
pub struct StartGameOutcome {
    pub game: GameRow,
    pub cancelled: Vec<CancelledReservation>,
    pub message: String,
}

/// Parameters for queueing the next game on a court.
pub struct ReserveGameParams {
    pub court_number: i32,
    pub kind: GameKind,
    pub players: Vec<LineupPlayer>,
}

/// Result of a reservation.
pub struct ReserveGameOutcome {
    pub game: GameRow,
    pub replaced_game_id: Option<Uuid>,
    pub message: String,
}

/// Parameters for finishing the game in progress on a court.
pub struct CompleteGameParams {
    pub court_number: i32,
    pub winner_ids: Vec<Uuid>,
}

/// Result of a completed game, including what happened to the reservation.
#[derive(Debug)]
pub struct CompleteGameOutcome {
    pub completed: GameRow,
    pub promoted: Option<GameRow>,
    pub cancelled_reservation: Option<Uuid>,
    pub message: String,
}

/// Start a game on an empty court. Reservations on other courts that share a
/// player give way; the outcome names the courts whose queues were dropped.
pub async fn start_game(
    store: &DocumentStore,
    courts: &[Court],
    params: StartGameParams,
) -> Result<StartGameOutcome, Box<dyn std::error::Error + Send + Sync>> {
    let ids = distinct_lineup(&params.players)?;

    let court = find_court(courts, params.court_number)?;
    if court.current_game.is_some() {
        return Err(format!("{} already has a game in progress", court.name).into());
    }

    // Starting players may still be queued elsewhere; those queues give way
    let mut cancelled = Vec::new();
    for other in courts {
        if other.number == court.number {
            continue;
        }
        if let Some(reservation) = &other.next_game {
            if reservation.players.iter().any(|id| ids.contains(id)) {
                games::delete(store, reservation.id).await?;
                cancelled.push(CancelledReservation {
                    court_name: other.name.clone(),
                    game_id: reservation.id,
                });
            }
        }
    }

    let game = games::create(
        store,
        CreateGameData {
            court_id: court.number,
            kind: params.kind,
            players: params.players.iter().map(|p| p.id).collect(),
            player_names: params.players.iter().map(|p| p.name.clone()).collect(),
            status: GameStatus::Playing,
        },
    )
    .await?;

    let message = if cancelled.is_empty() {
        format!("Game started on {}", court.name)
    } else {
        let names: Vec<&str> = cancelled.iter().map(|c| c.court_name.as_str()).collect();
        format!(
            "Game started on {}; cancelled reservations on {}",
            court.name,
            names.join(", ")
        )
    };

    Ok(StartGameOutcome {
        game,
        cancelled,
        message,
    })
}

/// Queue the next game on a court. An existing reservation is replaced, not
/// stacked; players already mid-game may be queued, conflicts are resolved
/// when the reservation is promoted.
pub async fn reserve_game(
    store: &DocumentStore,
    courts: &[Court],
    params: ReserveGameParams,
) -> Result<ReserveGameOutcome, Box<dyn std::error::Error + Send + Sync>> {
    distinct_lineup(&params.players)?;

    let court = find_court(courts, params.court_number)?;

    let mut replaced_game_id = None;
    if let Some(existing) = &court.next_game {
        games::delete(store, existing.id).await?;
        replaced_game_id = Some(existing.id);
    }

    let game = games::create(
        store,
        CreateGameData {
            court_id: court.number,
            kind: params.kind,
            players: params.players.iter().map(|p| p.id).collect(),
            player_names: params.players.iter().map(|p| p.name.clone()).collect(),
            status: GameStatus::Waiting,
        },
    )
    .await?;

    let message = if replaced_game_id.is_some() {
        format!("Reservation on {} replaced", court.name)
    } else {
        format!("Game reserved on {}", court.name)
    };

    Ok(ReserveGameOutcome {
        game,
        replaced_game_id,
        message,
    })
}

/// Finish the game in progress. Winners are optional (a game may end without
/// a declared result) but never more than the winning pair, and every winner
/// must have been on the court. Afterwards the reservation is promoted to
/// playing, unless one of its players is meanwhile mid-game on another court,
/// in which case it is dropped instead.
pub async fn complete_game(
    store: &DocumentStore,
    courts: &[Court],
    params: CompleteGameParams,
) -> Result<CompleteGameOutcome, Box<dyn std::error::Error + Send + Sync>> {
    let court = find_court(courts, params.court_number)?;
    let game = court
        .current_game
        .as_ref()
        .ok_or("No game in progress on this court")?;

    let mut winner_ids: Vec<Uuid> = Vec::new();
    for id in params.winner_ids {
        if !winner_ids.contains(&id) {
            winner_ids.push(id);
        }
    }
    if winner_ids.len() > 2 {
        return Err("A doubles game has at most two winners".into());
    }
    let mut winner_names = Vec::with_capacity(winner_ids.len());
    for id in &winner_ids {
        let position = game
            .players
            .iter()
            .position(|player| player == id)
            .ok_or("Winners must be players of this game")?;
        winner_names.push(game.player_names.get(position).cloned().unwrap_or_default());
    }

    let completed = games::complete(store, game.id, winner_ids, winner_names).await?;

    let mut promoted = None;
    let mut cancelled_reservation = None;
    let mut message = format!("Game on {} completed", court.name);

    if let Some(reservation) = &court.next_game {
        let conflicted = courts.iter().any(|other| {
            other.number != court.number
                && other.current_game.as_ref().is_some_and(|current| {
                    current.players.iter().any(|id| reservation.players.contains(id))
                })
        });
        if conflicted {
            games::delete(store, reservation.id).await?;
            cancelled_reservation = Some(reservation.id);
            message = format!(
                "Game on {} completed; its reservation was dropped because a reserved player is already in another game",
                court.name
            );
        } else {
            let next = games::update_status(store, reservation.id, GameStatus::Playing).await?;
            message = format!("Game on {} completed; the reserved game is now playing", court.name);
            promoted = Some(next);
        }
    }

    Ok(CompleteGameOutcome {
        completed,
        promoted,
        cancelled_reservation,
        message,
    })
}

/// Drop a court's reservation, whatever state its players are in.
pub async fn cancel_reservation(
    store: &DocumentStore,
    courts: &[Court],
    court_number: i32,
) -> Result<GameRow, Box<dyn std::error::Error + Send + Sync>> {
    let court = find_court(courts, court_number)?;
    let reservation = court
        .next_game
        .as_ref()
        .ok_or("No reservation to cancel on this court")?;
    games::delete(store, reservation.id).await?;
    Ok(reservation.clone())
}

// --- Private helpers ---

fn distinct_lineup(
    players: &[LineupPlayer],
) -> Result<HashSet<Uuid>, Box<dyn std::error::Error + Send + Sync>> {
    let ids: HashSet<Uuid> = players.iter().map(|p| p.id).collect();
    if players.len() != 4 || ids.len() != 4 {
        return Err("A doubles game needs exactly four distinct players".into());
    }
    Ok(ids)
}

fn find_court(
    courts: &[Court],
    number: i32,
) -> Result<&Court, Box<dyn std::error::Error + Send + Sync>> {
    courts
        .iter()
        .find(|court| court.number == number)
        .ok_or_else(|| format!("Court {number} is not on the board").into())
}
