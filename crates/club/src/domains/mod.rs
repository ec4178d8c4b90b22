pub mod attendance;
pub mod courts;
pub mod lineup;
pub mod settings;
pub mod stats;
