//! Initialize storage without starting the server
//!
//! Creates the database file, the `listings` table and the upload
//! directory. Safe to re-run; existing data is kept and older tables gain
//! any missing columns.

use anyhow::{Context, Result};
use clap::Parser;

use honeylist_server::config::ServerConfig;
use honeylist_server::prepare;

use super::StorageArgs;

/// Arguments for the init command
#[derive(Parser, Debug)]
pub struct InitArgs {
    #[command(flatten)]
    pub storage: StorageArgs,
}

pub async fn run_init(args: InitArgs) -> Result<()> {
    let config = ServerConfig {
        db_path: args.storage.db_path,
        static_dir: args.storage.static_dir,
        ..ServerConfig::default()
    };

    let state = prepare(&config).await.with_context(|| {
        format!(
            "Failed to initialize database at {}",
            config.db_path.display()
        )
    })?;
    let count = state
        .listings()
        .list()
        .await
        .context("Failed to read listings")?
        .len();

    println!("Database ready at {}", config.db_path.display());
    println!("Uploads directory: {}", config.upload_dir().display());
    println!("Listings: {}", count);

    Ok(())
}
