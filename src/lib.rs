pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod model;
pub mod models;
pub mod payroll;
pub mod report;
pub mod seed;
pub mod state;
pub mod store;
pub mod utils;


pub use db::{KeyValueStore, MemoryStore, SqliteStore};
pub use error::{HrmError, Result};
pub use state::AppState;
