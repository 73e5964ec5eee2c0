//! honeylist CLI - property listing site
//!
//! Subcommands:
//! - `serve`: run the HTTP server
//! - `init`: create the database and upload directory

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "honeylist",
    author,
    version,
    about = "Small property listing site with image galleries"
)]
struct Cli {
    /// Verbose logging (ignored when RUST_LOG is set)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP server
    Serve(commands::serve::ServeArgs),
    /// Create the database schema and upload directory
    Init(commands::init::InitArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Optional .env in the working directory
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    tracing_setup::init(&tracing_setup::TracingConfig { debug: cli.debug }).ok();

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await?,
        Commands::Init(args) => commands::run_init(args).await?,
    }
    Ok(())
}
