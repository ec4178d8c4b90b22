use std::time::Duration;
use tokio::time::{interval, Interval};
use tracing::{error, info};

use crate::AppState;

pub struct GameRefreshService {
    state: AppState,
    interval: Interval,
}

impl GameRefreshService {
    pub fn new(state: AppState) -> Self {
        // Tick at the configured cadence to keep elapsed times moving
        let interval = interval(Duration::from_secs(state.config().game_refresh_secs));

        Self { state, interval }
    }

    /// Start the background board refresh service
    pub async fn run(&mut self) {
        info!("Starting game board refresh service");

        loop {
            self.interval.tick().await;

            if let Err(e) = self.state.refresh_current_games().await {
                error!("Error refreshing the game board: {}", e);
            }
        }
    }
}

/// Spawn the board refresh service as a background task
pub fn spawn_game_refresh_service(state: AppState) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut service = GameRefreshService::new(state);
        service.run().await;
    })
}
