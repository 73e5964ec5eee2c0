//! Repository implementations for database access

pub mod listings;

pub use listings::ListingRepo;
