//! gridchase CLI - Adversarial search and belief tracking in a maze-chase
//! gridworld
//!
//! This CLI provides a unified interface for:
//! - Simulating search agents (reflex, minimax, alpha-beta, expectimax)
//! - Tracking hidden adversaries with exact or particle filters
//! - Comparing agents side-by-side
//! - Exporting recorded sessions for analysis

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "gridchase")]
#[command(version, about = "Adversarial search and belief tracking toolkit", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a search agent through full-information episodes
    Simulate(gridchase::cli::commands::simulate::SimulateArgs),

    /// Hunt hidden adversaries with a belief filter
    Track(gridchase::cli::commands::track::TrackArgs),

    /// Compare all search agents on the same setup
    Compare(gridchase::cli::commands::compare::CompareArgs),

    /// Convert a saved tracking session to CSV
    Export(gridchase::cli::commands::export::ExportArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate(args) => gridchase::cli::commands::simulate::execute(args),
        Commands::Track(args) => gridchase::cli::commands::track::execute(args),
        Commands::Compare(args) => gridchase::cli::commands::compare::execute(args),
        Commands::Export(args) => gridchase::cli::commands::export::execute(args),
    }
}
