//! HTTP layer
//!
//! Axum server with:
//! - Server-rendered listing pages and multipart forms
//! - Static files (including uploads) under `/static`
//! - Request tracing
//! - Graceful shutdown

pub mod extractors;
pub mod routes;
pub mod server;
pub mod views;

pub use server::{build_router, prepare, run_server};
