//! CLI argument definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pagescope")]
#[command(about = "Page cache observer for files of containerized processes", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan files for page-cache residency
    Scan {
        /// Target process whose mount view the paths belong to
        #[arg(short, long)]
        pid: Option<i32>,

        /// Print machine-readable JSON instead of the table
        #[arg(long)]
        json: bool,

        /// Files to scan
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Show the mount namespace of a process
    Ns {
        /// Process ID (default: current process)
        #[arg(short, long)]
        pid: Option<i32>,
    },

    /// Show version information
    Version,
}
