//! Observers for matches
//!
//! Observers allow composable data collection while a match runs without
//! coupling the moderator to specific output formats.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
    sync::{Arc, Mutex, PoisonError},
};

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};

use crate::{
    Error, Outcome, Result,
    ports::{EngineOutcomeOf, PlayerOutcomeOf, RulesEngine, TurnObserver},
    types::{PlayerCount, PlayerId},
};

/// One line of a transcript: the objective outcome and every view derived from it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnRecord {
    /// Turn number
    pub turn: usize,
    /// Objective outcome
    pub outcome: serde_json::Value,
    /// Personalized views, in participant order
    pub views: Vec<serde_json::Value>,
}

/// JSONL observer - writes one [`TurnRecord`] per resolved turn
pub struct TranscriptObserver<W: Write> {
    writer: W,
    current: Option<TurnRecord>,
    expected_views: usize,
}

impl TranscriptObserver<BufWriter<File>> {
    /// Create a transcript file at `path`
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| Error::Io {
            operation: format!("create transcript {}", path.display()),
            source,
        })?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> TranscriptObserver<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            current: None,
            expected_views: 0,
        }
    }

    /// Flush and return the underlying writer
    pub fn into_inner(mut self) -> Result<W> {
        self.flush_record()?;
        Ok(self.writer)
    }

    fn flush_record(&mut self) -> Result<()> {
        if let Some(record) = self.current.take() {
            serde_json::to_writer(&mut self.writer, &record)?;
            writeln!(&mut self.writer)?;
            self.writer.flush()?;
        }
        Ok(())
    }
}

impl<E, W> TurnObserver<E> for TranscriptObserver<W>
where
    E: RulesEngine,
    EngineOutcomeOf<E>: Serialize,
    PlayerOutcomeOf<E>: Serialize,
    W: Write,
{
    fn on_match_start(&mut self, participants: PlayerCount) -> Result<()> {
        self.expected_views = participants.get();
        Ok(())
    }

    fn on_turn_resolved(&mut self, turn: usize, outcome: &EngineOutcomeOf<E>) -> Result<()> {
        self.flush_record()?;
        self.expected_views = outcome.participants().get();
        self.current = Some(TurnRecord {
            turn,
            outcome: serde_json::to_value(outcome)?,
            views: Vec::with_capacity(self.expected_views),
        });
        Ok(())
    }

    fn on_view_delivered(
        &mut self,
        _turn: usize,
        _player: PlayerId,
        view: &PlayerOutcomeOf<E>,
    ) -> Result<()> {
        let complete = match self.current.as_mut() {
            Some(record) => {
                record.views.push(serde_json::to_value(view)?);
                record.views.len() == self.expected_views
            }
            None => false,
        };
        if complete {
            self.flush_record()?;
        }
        Ok(())
    }

    fn on_match_end(&mut self, _turns: usize) -> Result<()> {
        self.flush_record()
    }
}

/// Running totals for one participant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStanding {
    pub player: PlayerId,
    pub total_utility: f64,
    pub wins: usize,
    pub ties: usize,
    pub losses: usize,
    /// Invalid turns this participant caused
    pub faults: usize,
}

impl PlayerStanding {
    fn new(player: PlayerId) -> Self {
        Self {
            player,
            total_utility: 0.0,
            wins: 0,
            ties: 0,
            losses: 0,
            faults: 0,
        }
    }
}

/// Standings of a match
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Standings {
    pub turns: usize,
    pub invalid_turns: usize,
    pub players: Vec<PlayerStanding>,
}

impl Standings {
    /// Participant with the highest total utility (lowest index on ties)
    pub fn leader(&self) -> Option<&PlayerStanding> {
        self.players.iter().reduce(|best, candidate| {
            if candidate.total_utility > best.total_utility {
                candidate
            } else {
                best
            }
        })
    }

    /// Write one CSV row per participant
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv = csv::Writer::from_writer(writer);
        for standing in &self.players {
            csv.serialize(standing)?;
        }
        csv.flush()?;
        Ok(())
    }

    /// Write the standings to a CSV file at `path`
    pub fn export_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| Error::Io {
            operation: format!("create standings file {}", path.display()),
            source,
        })?;
        self.write_csv(BufWriter::new(file))
    }
}

/// Standings observer - tallies utilities and faults per participant
///
/// Clones share the same table, so a clone kept outside the moderator can
/// read the standings after the match.
#[derive(Clone, Default)]
pub struct StandingsObserver {
    table: Arc<Mutex<Standings>>,
}

impl StandingsObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the current standings
    pub fn snapshot(&self) -> Standings {
        self.table
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn with_table<T>(&self, f: impl FnOnce(&mut Standings) -> T) -> T {
        let mut table = self.table.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut table)
    }
}

impl<E: RulesEngine> TurnObserver<E> for StandingsObserver {
    fn on_match_start(&mut self, participants: PlayerCount) -> Result<()> {
        self.with_table(|table| {
            *table = Standings {
                players: participants.players().map(PlayerStanding::new).collect(),
                ..Standings::default()
            };
        });
        Ok(())
    }

    fn on_turn_resolved(&mut self, _turn: usize, outcome: &EngineOutcomeOf<E>) -> Result<()> {
        self.with_table(|table| {
            table.turns += 1;
            if !outcome.is_valid() {
                table.invalid_turns += 1;
                for player in outcome.validity().at_fault() {
                    if let Some(standing) = table.players.get_mut(player.index()) {
                        standing.faults += 1;
                    }
                }
                return;
            }

            if let Some(utilities) = outcome.utilities() {
                for (standing, utility) in table.players.iter_mut().zip(utilities) {
                    standing.total_utility += utility;
                    if *utility > 0.0 {
                        standing.wins += 1;
                    } else if *utility < 0.0 {
                        standing.losses += 1;
                    } else {
                        standing.ties += 1;
                    }
                }
            }
        });
        Ok(())
    }
}

/// Progress bar observer - shows match progress
pub struct ProgressObserver {
    total_turns: u64,
    progress_bar: Option<ProgressBar>,
    invalid_turns: usize,
}

impl ProgressObserver {
    pub fn new(total_turns: usize) -> Self {
        Self {
            total_turns: total_turns as u64,
            progress_bar: None,
            invalid_turns: 0,
        }
    }
}

impl<E: RulesEngine> TurnObserver<E> for ProgressObserver {
    fn on_match_start(&mut self, _participants: PlayerCount) -> Result<()> {
        let pb = ProgressBar::new(self.total_turns);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} turns ({msg})")
                .map_err(|e| Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_turn_resolved(&mut self, _turn: usize, outcome: &EngineOutcomeOf<E>) -> Result<()> {
        if !outcome.is_valid() {
            self.invalid_turns += 1;
        }
        if let Some(pb) = &self.progress_bar {
            pb.inc(1);
            pb.set_message(format!("invalid: {}", self.invalid_turns));
        }
        Ok(())
    }

    fn on_match_end(&mut self, _turns: usize) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(format!("invalid: {}", self.invalid_turns));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        outcome::{EngineOutcome, PerPlayer},
        rps::{Move, RpsEngine, RpsOutcome},
    };

    fn turn(engine: &RpsEngine, moves: &[Move]) -> RpsOutcome {
        let state = engine.initial_state();
        let action = engine.action(&PerPlayer::new(moves.to_vec()));
        let processed = engine.process_action(&state, &action).unwrap();
        EngineOutcome::valid(engine.participants(), action, processed).unwrap()
    }

    #[test]
    fn test_standings_tally() {
        let engine = RpsEngine::new(3).unwrap();
        let mut observer = StandingsObserver::new();
        let shared = observer.clone();

        TurnObserver::<RpsEngine>::on_match_start(&mut observer, engine.participants()).unwrap();
        let won = turn(&engine, &[Move::Rock, Move::Scissors, Move::Scissors]);
        TurnObserver::<RpsEngine>::on_turn_resolved(&mut observer, 0, &won).unwrap();
        let invalid: RpsOutcome =
            EngineOutcome::invalid(engine.participants(), [PlayerId::new(1)]).unwrap();
        TurnObserver::<RpsEngine>::on_turn_resolved(&mut observer, 1, &invalid).unwrap();

        let standings = shared.snapshot();
        assert_eq!(standings.turns, 2);
        assert_eq!(standings.invalid_turns, 1);
        assert_eq!(standings.players[0].wins, 1);
        assert_eq!(standings.players[0].total_utility, 1.0);
        assert_eq!(standings.players[2].losses, 1);
        assert_eq!(standings.players[1].faults, 1);
        assert_eq!(standings.leader().map(|s| s.player), Some(PlayerId::new(0)));
    }

    #[test]
    fn test_standings_csv_has_row_per_player() {
        let standings = Standings {
            turns: 1,
            invalid_turns: 0,
            players: vec![
                PlayerStanding::new(PlayerId::new(0)),
                PlayerStanding::new(PlayerId::new(1)),
            ],
        };
        let mut buffer = Vec::new();
        standings.write_csv(&mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("player,total_utility"));
    }

    #[test]
    fn test_transcript_writes_one_line_per_turn() {
        let engine = RpsEngine::new(2).unwrap();
        let mut observer = TranscriptObserver::new(Vec::new());

        TurnObserver::<RpsEngine>::on_match_start(&mut observer, engine.participants()).unwrap();
        let outcome = turn(&engine, &[Move::Paper, Move::Rock]);
        TurnObserver::<RpsEngine>::on_turn_resolved(&mut observer, 0, &outcome).unwrap();
        for view in outcome.personalize_all().unwrap() {
            let player = view.player();
            TurnObserver::<RpsEngine>::on_view_delivered(&mut observer, 0, player, &view).unwrap();
        }

        let bytes = observer.into_inner().unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 1);

        let record: TurnRecord = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(record.views.len(), 2);
        assert_eq!(record.views[1]["utilities"]["personal"], -1.0);
        assert_eq!(record.views[1]["action"]["repr"]["opponents"][0], "Paper");
        assert_eq!(record.outcome["utilities"][0], 1.0);
    }
}
