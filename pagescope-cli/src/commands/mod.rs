use crate::cli::Commands;
use anyhow::Result;

pub mod ns;
pub mod scan;

/// Dispatch command to appropriate handler
pub async fn dispatch(command: Commands) -> Result<()> {
    match command {
        Commands::Scan { pid, json, files } => scan::execute(pid, json, files).await,

        Commands::Ns { pid } => ns::execute(pid).await,

        Commands::Version => {
            print_version();
            Ok(())
        }
    }
}

fn print_version() {
    println!("🦀 Pagescope");
    println!("Version: {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Features:");
    println!("  • Page cache residency via mincore(2)");
    println!("  • Follows processes into their mount namespace");
    println!("  • Table or JSON output");
}
