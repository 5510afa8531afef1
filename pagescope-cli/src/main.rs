//! Pagescope CLI
//!
//! Observes page-cache residency for files of other processes, following
//! them into their mount namespace when they live in one.

use clap::Parser;
use std::process;
use tracing::Level;

mod cli;
mod commands;

use cli::Cli;

#[tokio::main]
async fn main() {
    // Parse command-line arguments
    let cli = Cli::parse();

    // Setup logging based on verbosity
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .init();

    // Execute the command
    if let Err(e) = commands::dispatch(cli.command).await {
        eprintln!("❌ Error: {e:#}");
        process::exit(1);
    }
}
