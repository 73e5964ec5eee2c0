//! HTTP server command
//!
//! Runs the listing site until Ctrl+C or SIGTERM.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Parser;

use honeylist_server::config::{ServerConfig, DEFAULT_MAX_UPLOAD_BYTES};
use honeylist_server::run_server;

use super::StorageArgs;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', env = "HONEYLIST_BIND", default_value = "127.0.0.1:5050")]
    pub bind: SocketAddr,

    #[command(flatten)]
    pub storage: StorageArgs,

    /// Largest accepted image, in bytes
    #[arg(long, env = "HONEYLIST_MAX_UPLOAD_BYTES", default_value_t = DEFAULT_MAX_UPLOAD_BYTES)]
    pub max_upload_bytes: usize,
}

impl ServeArgs {
    pub fn to_config(&self) -> ServerConfig {
        ServerConfig {
            bind_addr: self.bind,
            db_path: self.storage.db_path.clone(),
            static_dir: self.storage.static_dir.clone(),
            max_upload_bytes: self.max_upload_bytes,
        }
    }
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let config = args.to_config();

    tracing::info!(
        db = %config.db_path.display(),
        static_dir = %config.static_dir.display(),
        "Starting honeylist on {}",
        config.bind_addr
    );

    run_server(config).await.context("Server error")?;

    Ok(())
}
