use infra::models::SkillGrade;

/// Rating band backing a manual grade. `label` is the display name shown on
/// rosters, `color` the badge color token.
#[derive(Debug, Clone, Copy)]
pub struct GradeBand {
    pub grade: SkillGrade,
    pub min: u32,
    pub max: u32,
    pub label: &'static str,
    pub color: &'static str,
}

pub const GRADE_RANGES: [GradeBand; 7] = [
    GradeBand { grade: SkillGrade::S, min: 2400, max: 3000, label: "semi-pro", color: "purple" },
    GradeBand { grade: SkillGrade::A, min: 2000, max: 2399, label: "expert", color: "red" },
    GradeBand { grade: SkillGrade::B, min: 1600, max: 1999, label: "upper intermediate", color: "orange" },
    GradeBand { grade: SkillGrade::C, min: 1200, max: 1599, label: "intermediate", color: "yellow" },
    GradeBand { grade: SkillGrade::D, min: 800, max: 1199, label: "lower intermediate", color: "green" },
    GradeBand { grade: SkillGrade::E, min: 400, max: 799, label: "beginner", color: "blue" },
    GradeBand { grade: SkillGrade::F, min: 0, max: 399, label: "novice", color: "gray" },
];

pub fn grade_for_rating(rating: u32) -> SkillGrade {
    if rating >= 2400 {
        SkillGrade::S
    } else if rating >= 2000 {
        SkillGrade::A
    } else if rating >= 1600 {
        SkillGrade::B
    } else if rating >= 1200 {
        SkillGrade::C
    } else if rating >= 800 {
        SkillGrade::D
    } else if rating >= 400 {
        SkillGrade::E
    } else {
        SkillGrade::F
    }
}

/// Midpoint of the grade's band, the rating a freshly graded player starts at.
pub fn default_rating_for_grade(grade: SkillGrade) -> u32 {
    let band = band_for(grade);
    (band.min + band.max) / 2
}

pub fn grade_label(grade: SkillGrade) -> &'static str {
    band_for(grade).label
}

pub fn grade_color(grade: SkillGrade) -> &'static str {
    band_for(grade).color
}

pub fn win_rate(games_won: i64, games_played: i64) -> u32 {
    if games_played == 0 {
        return 0;
    }
    ((games_won as f64 / games_played as f64) * 100.0).round() as u32
}

const K_FACTOR: f64 = 32.0;

/// Elo update for one game outcome, floored at zero. Kept alongside the
/// manual grades for clubs that want ratings to move with results.
pub fn rating_after_game(current: u32, opponent: u32, won: bool) -> u32 {
    let expected = 1.0 / (1.0 + 10f64.powf((opponent as f64 - current as f64) / 400.0));
    let actual = if won { 1.0 } else { 0.0 };
    let next = current as f64 + K_FACTOR * (actual - expected);
    next.round().max(0.0) as u32
}

/// How a player's strength is expressed. Grades are assigned by hand;
/// a numeric rating can back them once enough results exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkillRating {
    Grade(SkillGrade),
    Rating(u32),
}

impl SkillRating {
    /// Strength on the 1..=7 scale the balancing engine works with.
    pub fn rank(self) -> u8 {
        match self {
            SkillRating::Grade(grade) => grade.rank(),
            SkillRating::Rating(rating) => grade_for_rating(rating).rank(),
        }
    }
}

// The table covers every grade, so the lookup cannot miss; the novice band
// is only a type-level fallback.
fn band_for(grade: SkillGrade) -> &'static GradeBand {
    GRADE_RANGES
        .iter()
        .find(|band| band.grade == grade)
        .unwrap_or(&GRADE_RANGES[6])
}
