//! Command implementations for the honeylist CLI

pub mod init;
pub mod serve;

pub use init::run_init;
pub use serve::run_serve;

use std::path::PathBuf;

use clap::Args;

/// Where listings and uploaded images are kept
#[derive(Args, Debug, Clone)]
pub struct StorageArgs {
    /// SQLite database file
    #[arg(long, env = "HONEYLIST_DB", default_value = "listings.db")]
    pub db_path: PathBuf,

    /// Static asset root; uploads go to <STATIC_DIR>/uploads
    #[arg(long, env = "HONEYLIST_STATIC_DIR", default_value = "static")]
    pub static_dir: PathBuf,
}
