pub mod models;
pub mod repos;
pub mod store;
pub mod time;

pub use store::{DocumentStore, StoreError};
