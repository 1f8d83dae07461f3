// Service exports
pub mod loader;

pub use loader::{load_store, read_incomes, read_listings, read_stops, DatasetError};
