use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

/// Manually assigned skill grade, S highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkillGrade {
    S,
    A,
    B,
    C,
    D,
    E,
    F,
}

impl SkillGrade {
    /// Ordinal rank used by the balancing engine: F=1 up to S=7.
    pub fn rank(&self) -> u8 {
        match self {
            SkillGrade::S => 7,
            SkillGrade::A => 6,
            SkillGrade::B => 5,
            SkillGrade::C => 4,
            SkillGrade::D => 3,
            SkillGrade::E => 2,
            SkillGrade::F => 1,
        }
    }
}

impl fmt::Display for SkillGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            SkillGrade::S => "S",
            SkillGrade::A => "A",
            SkillGrade::B => "B",
            SkillGrade::C => "C",
            SkillGrade::D => "D",
            SkillGrade::E => "E",
            SkillGrade::F => "F",
        };
        write!(f, "{letter}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameKind {
    MenDoubles,
    WomenDoubles,
    MixedDoubles,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    Waiting,
    Playing,
    Completed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberRow {
    pub id: Uuid,
    pub name: String,
    pub birth_year: Option<i32>,
    pub gender: Gender,
    pub skill_grade: SkillGrade,
    pub games_played: i64,
    pub games_won: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Profile details for a walk-in attendee who has no member record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuestInfo {
    pub gender: Option<Gender>,
    pub skill_grade: Option<SkillGrade>,
    pub birth_year: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceRow {
    pub id: Uuid,
    pub member_id: Uuid,
    pub member_name: String,
    pub date: DateTime<Utc>,
    pub shuttlecock_count: i64,
    pub has_left: bool,
    pub guest_info: Option<GuestInfo>,
    pub created_at: DateTime<Utc>,
}

impl AttendanceRow {
    pub fn is_guest(&self) -> bool {
        self.guest_info.is_some()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameRow {
    pub id: Uuid,
    pub court_id: i32,
    pub kind: GameKind,
    pub players: Vec<Uuid>,
    pub player_names: Vec<String>,
    pub status: GameStatus,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub winners: Vec<Uuid>,
    pub winner_names: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One cell of the court layout grid. `court_number` is only present on
/// active cells and is kept dense (1..N, row-major) by the settings service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourtCell {
    pub row: usize,
    pub col: usize,
    pub is_active: bool,
    pub court_number: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourtSettingsRow {
    pub grid: Vec<Vec<CourtCell>>,
    pub updated_at: DateTime<Utc>,
}

impl CourtSettingsRow {
    pub fn rows(&self) -> usize {
        self.grid.len()
    }

    pub fn cols(&self) -> usize {
        self.grid.first().map(Vec::len).unwrap_or(0)
    }
}
