//! Observer port - abstraction for match observation and data collection
//!
//! This port defines the interface for observing resolved turns, allowing
//! composable logging and metrics without coupling the orchestrator to
//! specific output formats.

use crate::{
    Result,
    ports::engine::{EngineOutcomeOf, PlayerOutcomeOf, RulesEngine},
    types::{PlayerCount, PlayerId},
};

/// Observer trait for monitoring a match
///
/// Observers can be composed to collect different kinds of data while a
/// match runs. Examples include:
/// - Progress bars for user feedback
/// - JSONL transcripts of every turn
/// - Standings tracking
///
/// # Event Sequence
///
/// The observer methods are called in the following order:
/// 1. `on_match_start(participants)` - Once at the beginning
/// 2. For each turn:
///    - `on_turn_resolved(...)` - Once the objective outcome is complete
///    - `on_view_delivered(...)` - For each participant, after its view is built
///    - Participants receive their views only after every observer has seen them
/// 3. `on_match_end(turns)` - Once at the end
///
/// Observers see the objective record; they are never handed to participants.
///
/// # Examples
///
/// ```no_run
/// use gearbox::{
///     ports::{EngineOutcomeOf, TurnObserver},
///     rps::RpsEngine,
/// };
///
/// struct InvalidTurnCounter {
///     invalid: usize,
/// }
///
/// impl TurnObserver<RpsEngine> for InvalidTurnCounter {
///     fn on_turn_resolved(
///         &mut self,
///         _turn: usize,
///         outcome: &EngineOutcomeOf<RpsEngine>,
///     ) -> gearbox::Result<()> {
///         if !outcome.validity().overall() {
///             self.invalid += 1;
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait TurnObserver<E: RulesEngine> {
    /// Called when the match starts.
    ///
    /// # Default Implementation
    ///
    /// Does nothing. Override to initialize observation state.
    fn on_match_start(&mut self, _participants: PlayerCount) -> Result<()> {
        Ok(())
    }

    /// Called when a turn is fully resolved, before any view is handed out.
    ///
    /// # Parameters
    ///
    /// * `turn` - Index of the turn (0-based)
    /// * `outcome` - The objective outcome of the turn
    ///
    /// # Default Implementation
    ///
    /// Does nothing. Override to record turn results.
    fn on_turn_resolved(&mut self, _turn: usize, _outcome: &EngineOutcomeOf<E>) -> Result<()> {
        Ok(())
    }

    /// Called for each participant's view, just before it is delivered.
    ///
    /// # Default Implementation
    ///
    /// Does nothing.
    fn on_view_delivered(
        &mut self,
        _turn: usize,
        _player: PlayerId,
        _view: &PlayerOutcomeOf<E>,
    ) -> Result<()> {
        Ok(())
    }

    /// Called when the match completes.
    ///
    /// # Parameters
    ///
    /// * `turns` - Number of turns played
    ///
    /// # Default Implementation
    ///
    /// Does nothing. Override to finalize output.
    fn on_match_end(&mut self, _turns: usize) -> Result<()> {
        Ok(())
    }
}
