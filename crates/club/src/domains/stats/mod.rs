pub mod service;

pub use service::{today_performance, TodayMemberStats};
