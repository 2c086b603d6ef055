//! gearbox CLI - Simultaneous-move matches with personalized outcomes
//!
//! This CLI provides:
//! - Playing a match while printing every participant's own view
//! - Simulating long matches and exporting standings

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "gearbox")]
#[command(version, about = "Simultaneous-move game runner", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a match turn by turn
    Play(gearbox::cli::commands::play::PlayArgs),

    /// Simulate a match and report standings
    Simulate(gearbox::cli::commands::simulate::SimulateArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Play(args) => gearbox::cli::commands::play::execute(args),
        Commands::Simulate(args) => gearbox::cli::commands::simulate::execute(args),
    }
}
