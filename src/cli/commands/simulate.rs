//! Simulate command - Run a long match and report standings

use std::{fs::File, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use serde_json::to_writer_pretty;

use crate::{
    app::{App, MatchConfig},
    cli::{
        config::MatchArgs,
        output::{format_number, print_kv, print_section, print_standings},
    },
    moderator::MatchSummary,
    observers::{ProgressObserver, Standings, StandingsObserver},
    rps::RpsState,
};

#[derive(Parser, Debug)]
#[command(about = "Simulate a match and report standings")]
pub struct SimulateArgs {
    #[command(flatten)]
    pub game: MatchArgs,

    /// Export standings to CSV
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Write a JSON report of the configuration, summary and standings
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Disable the progress bar
    #[arg(long)]
    pub no_progress: bool,
}

/// JSON report written by `--report`
#[derive(Debug, Serialize)]
pub struct SimulationReport {
    pub config: MatchConfig,
    pub summary: MatchSummary<RpsState>,
    pub standings: Standings,
}

pub fn execute(args: SimulateArgs) -> Result<()> {
    let config = args.game.to_config();
    let app = App::new();
    let mut moderator = app.create_match(&config)?;
    let names = moderator.participant_names();

    println!(
        "Simulating {} turns with {} participants",
        format_number(config.rounds),
        config.players
    );

    let standings = StandingsObserver::new();
    moderator.add_observer(Box::new(standings.clone()));
    if !args.no_progress {
        moderator.add_observer(Box::new(ProgressObserver::new(config.rounds)));
    }

    let summary = moderator.run(config.rounds)?;
    let standings = standings.snapshot();

    print_section("Simulation Results");
    print_kv("Turns", &format_number(summary.turns));
    print_kv("Invalid turns", &format_number(summary.invalid_turns));
    print_kv("Valid rounds", &summary.final_state.round.to_string());
    print_standings(&standings, &names);

    if let Some(path) = &args.output {
        standings.export_csv(path)?;
        println!("\nStandings exported to {}", path.display());
    }

    if let Some(path) = &args.report {
        let file = File::create(path)
            .with_context(|| format!("failed to create report {}", path.display()))?;
        let report = SimulationReport {
            config,
            summary,
            standings,
        };
        to_writer_pretty(file, &report)?;
        println!("Report written to {}", path.display());
    }
    Ok(())
}
