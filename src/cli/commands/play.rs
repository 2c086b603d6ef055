//! Play command - Run a match and show what each participant sees

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::{
    app::App,
    cli::{
        config::MatchArgs,
        output::{print_kv, print_section, print_standings},
    },
    observers::{StandingsObserver, TranscriptObserver},
    ports::TurnObserver,
    rps::{RpsEngine, RpsOutcome, RpsView, render_view},
    types::PlayerId,
};

#[derive(Parser, Debug)]
#[command(about = "Play a match and print every participant's view")]
pub struct PlayArgs {
    #[command(flatten)]
    pub game: MatchArgs,

    /// Write a JSONL transcript of outcomes and views
    #[arg(long)]
    pub transcript: Option<PathBuf>,

    /// Only print the final standings
    #[arg(long, short = 'q')]
    pub quiet: bool,
}

/// Prints each delivered view as the participant would read it
struct ViewPrinter {
    names: Vec<String>,
}

impl TurnObserver<RpsEngine> for ViewPrinter {
    fn on_turn_resolved(&mut self, turn: usize, _outcome: &RpsOutcome) -> crate::Result<()> {
        println!("\nTurn {}", turn + 1);
        Ok(())
    }

    fn on_view_delivered(
        &mut self,
        _turn: usize,
        player: PlayerId,
        view: &RpsView,
    ) -> crate::Result<()> {
        let name = self
            .names
            .get(player.index())
            .cloned()
            .unwrap_or_else(|| player.to_string());
        println!("  {name}: {}", render_view(view).join(" | "));
        Ok(())
    }
}

pub fn execute(args: PlayArgs) -> Result<()> {
    let config = args.game.to_config();
    let app = App::new();
    let mut moderator = app.create_match(&config)?;
    let names = moderator.participant_names();

    let standings = StandingsObserver::new();
    moderator.add_observer(Box::new(standings.clone()));
    if !args.quiet {
        moderator.add_observer(Box::new(ViewPrinter {
            names: names.clone(),
        }));
    }
    if let Some(path) = &args.transcript {
        moderator.add_observer(Box::new(TranscriptObserver::create(path)?));
    }

    let summary = moderator.run(config.rounds)?;

    print_section("Match Summary");
    print_kv("Participants", &config.players.to_string());
    print_kv("Turns", &summary.turns.to_string());
    print_kv("Invalid turns", &summary.invalid_turns.to_string());
    print_kv("Valid rounds", &summary.final_state.round.to_string());
    print_standings(&standings.snapshot(), &names);

    if let Some(path) = &args.transcript {
        println!("\nTranscript written to {}", path.display());
    }
    Ok(())
}
