//! honeylist-server: property listings with image galleries
//!
//! Stores listings in a single SQLite table and serves pages to browse,
//! view, create, edit and delete them. Uploaded images are written to a
//! flat directory under the static root and referenced by public path.

pub mod config;
pub mod db;
pub mod error;
pub mod http;
pub mod models;
pub mod service;
pub mod state;
pub mod uploads;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use http::{build_router, prepare, run_server};
pub use service::ListingService;
pub use state::AppState;
