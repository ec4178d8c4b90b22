use chrono::Local;
use tracing::{error, info};

use crate::AppState;
use infra::time;

pub struct MidnightService {
    state: AppState,
}

impl MidnightService {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    /// Start the background midnight rollover service
    pub async fn run(&mut self) {
        info!("Starting midnight rollover service");

        loop {
            let wait = time::until_next_midnight(Local::now());
            tokio::time::sleep(wait).await;

            if let Err(e) = self.roll_over().await {
                error!("Error rolling the session over at midnight: {}", e);
            }
        }
    }

    /// Reload everything scoped to the local day once it changes
    async fn roll_over(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.state.refresh_today_attendance().await?;
        self.state.refresh_current_games().await?;
        self.state.refresh_weekly_stats().await?;
        Ok(())
    }
}

/// Spawn the midnight rollover service as a background task
pub fn spawn_midnight_service(state: AppState) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut service = MidnightService::new(state);
        service.run().await;
    })
}
