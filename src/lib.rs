//! # shopdb - Shop catalogue on an embedded SQLite file
//!
//! shopdb provides:
//! - Plain record types for countries, cities, shops, positions, workers,
//!   categories and products
//! - A SQLite-backed store with explicit foreign keys and eager fetches
//! - A staged, idempotent seeder for the sample catalogue
//! - A nested text/JSON report of shops with their workers and products

pub mod model;
pub mod storage;
pub mod seed;
pub mod report;
pub mod config;
pub mod ui;

// Re-exports for convenient access
pub use model::{Category, City, Country, Position, Product, Shop, Worker};
pub use model::{ProductDetails, ShopDetails, WorkerDetails};
pub use storage::ShopStore;
pub use seed::SeedOutcome;

/// Result type alias for shopdb operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for shopdb operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid decimal in column {column}: {value}")]
    InvalidDecimal { column: &'static str, value: String },

    #[error("Config error: {0}")]
    Config(String),
}
