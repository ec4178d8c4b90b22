pub mod service;

pub use service::{lineup_quality, recommend_lineup};
