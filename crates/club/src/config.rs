use anyhow::Result;
use std::env;

#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Grid dimensions used when no court layout has been saved yet.
    pub default_grid_rows: usize,
    pub default_grid_cols: usize,
    /// How often the live game board refreshes its elapsed times.
    pub game_refresh_secs: u64,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            default_grid_rows: env::var("CLUB_DEFAULT_GRID_ROWS")
                .unwrap_or_else(|_| "3".to_string())
                .parse()
                .unwrap_or(3),
            default_grid_cols: env::var("CLUB_DEFAULT_GRID_COLS")
                .unwrap_or_else(|_| "4".to_string())
                .parse()
                .unwrap_or(4),
            game_refresh_secs: env::var("CLUB_GAME_REFRESH_SECS")
                .unwrap_or_else(|_| "60".to_string())
                .parse()
                .unwrap_or(60),
        })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_grid_rows: 3,
            default_grid_cols: 4,
            game_refresh_secs: 60,
        }
    }
}
