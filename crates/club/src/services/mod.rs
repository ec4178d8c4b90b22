pub mod game_refresh_service;
pub mod midnight_service;

pub use game_refresh_service::{spawn_game_refresh_service, GameRefreshService};
pub use midnight_service::{spawn_midnight_service, MidnightService};
