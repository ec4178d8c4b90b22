use chrono::{DateTime, Utc};
use uuid::Uuid;

use infra::models::{GameRow, Gender};

use crate::skill::SkillRating;

/// A court on the live board. Derived from the saved layout and the games
/// currently attached to it, never persisted on its own.
#[derive(Debug, Clone)]
pub struct Court {
    pub number: i32,
    pub name: String,
    pub col: usize,
    pub row: usize,
    pub current_game: Option<GameRow>,
    pub next_game: Option<GameRow>,
}

impl Court {
    pub fn is_free(&self) -> bool {
        self.current_game.is_none()
    }

    pub fn has_reservation(&self) -> bool {
        self.next_game.is_some()
    }
}

/// One attendee resolved for the session. Members carry their own profile;
/// guests fall back to male / C when their info leaves a field out.
#[derive(Debug, Clone)]
pub struct SessionPlayer {
    pub id: Uuid,
    pub name: String,
    pub gender: Gender,
    pub skill: SkillRating,
    pub is_guest: bool,
}

impl SessionPlayer {
    pub fn rank(&self) -> u8 {
        self.skill.rank()
    }
}

/// Minimal identity of a player picked into a lineup.
#[derive(Debug, Clone)]
pub struct LineupPlayer {
    pub id: Uuid,
    pub name: String,
}

impl From<&SessionPlayer> for LineupPlayer {
    fn from(player: &SessionPlayer) -> Self {
        Self {
            id: player.id,
            name: player.name.clone(),
        }
    }
}

/// Where a player currently is on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayStatus {
    Playing,
    Waiting,
    Available,
}

/// Card footprint for rendering the court grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardSize {
    Small,
    Medium,
    Large,
}

/// Dense render model of the active courts, placeholder cells included.
#[derive(Debug, Clone)]
pub struct CourtGrid {
    pub cells: Vec<Vec<Option<Court>>>,
    pub rows: usize,
    pub cols: usize,
    pub card_size: CardSize,
}

/// One line of the live rosters: who is on (or queued for) which court.
#[derive(Debug, Clone)]
pub struct RosterEntry {
    pub player_name: String,
    pub court_name: String,
    pub start_time: Option<DateTime<Utc>>,
}
