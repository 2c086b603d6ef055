//! Participant port - anything that takes part in a game

use crate::{
    ports::engine::{PlayerOutcomeOf, RulesEngine, StateViewOf},
    types::PlayerId,
};

/// A participant: a scripted agent, an AI, or a binding to a human interface.
///
/// Participants only ever see their own view of the state and their own
/// [`crate::outcome::PlayerOutcome`]s, which they own once delivered.
pub trait Participant<E: RulesEngine> {
    /// Human-readable name
    fn name(&self) -> &str;

    /// Called once before the first turn.
    fn on_game_start(&mut self, _player: PlayerId, _state: &StateViewOf<E>) {}

    /// Pick this turn's move. Called for every participant before any turn
    /// result is revealed.
    fn choose_move(&mut self, player: PlayerId, state: &StateViewOf<E>) -> E::Move;

    /// Receive this participant's view of the resolved turn.
    fn on_outcome(&mut self, _outcome: PlayerOutcomeOf<E>) {}

    /// Called once after the last turn.
    fn on_game_end(&mut self, _state: &StateViewOf<E>) {}
}
