pub mod service;

pub use service::{active_count, default_grid, toggle_cell};
