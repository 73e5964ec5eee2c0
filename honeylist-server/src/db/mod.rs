//! Database layer - SQLite pool, schema migrations and the listing repository
//!
//! # Design Principles
//!
//! - One pool, built at startup and shared through application state
//! - Each repository call acquires its own connection and releases it on drop
//! - One statement per call, parameterized, no surrounding transaction

pub mod pool;
pub mod repos;

pub use pool::{create_pool, run_migrations};
pub use repos::ListingRepo;
