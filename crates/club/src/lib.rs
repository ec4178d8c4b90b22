pub mod config;
pub mod domains;
pub mod error;
pub mod services;
pub mod skill;
pub mod state;

pub use config::AppConfig;
pub use error::AppError;
pub use state::AppState;
