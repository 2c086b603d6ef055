//! Rules engine port - validates moves and computes turn results

use std::collections::BTreeSet;

use crate::{
    Result,
    outcome::{EngineOutcome, PerPlayer, Personalize, PlayerOutcome, ProcessedActionOutcome},
    types::{PlayerCount, PlayerId},
};

/// The game rules: legality, utilities, and state transitions.
///
/// An engine never builds outcomes itself. It answers questions about one
/// turn and returns a [`ProcessedActionOutcome`]; the orchestrator turns that
/// into an [`EngineOutcome`] and personalizes it.
///
/// Action, state, and delta reach participants only through [`Personalize`]:
/// any per-participant field in them must be a [`PerPlayer`] so it is split
/// for each view. Views must own their data (no shared interior mutability).
pub trait RulesEngine {
    /// What a single participant submits each turn
    type Move: Clone;
    /// The joint action echoed back to participants
    type Action: Personalize + Clone;
    /// Game state
    type State: Personalize + Clone;
    /// Description of a state transition
    type Delta: Personalize + Clone;

    /// Number of participants, fixed for the whole game.
    fn participants(&self) -> PlayerCount;

    fn initial_state(&self) -> Self::State;

    /// Participants whose move is illegal in `state`. Empty means the turn is valid.
    fn validate(&self, state: &Self::State, moves: &PerPlayer<Self::Move>) -> BTreeSet<PlayerId>;

    /// Combine the participants' moves into the joint action.
    fn action(&self, moves: &PerPlayer<Self::Move>) -> Self::Action;

    /// Resolve a validated action.
    ///
    /// # Errors
    ///
    /// Returns an error only for programming errors, never for illegal moves
    /// (those are reported by [`RulesEngine::validate`]).
    fn process_action(
        &self,
        state: &Self::State,
        action: &Self::Action,
    ) -> Result<ProcessedActionOutcome<Self::State, Self::Delta>>;

    /// Whether the game is over.
    fn is_terminal(&self, _state: &Self::State) -> bool {
        false
    }
}

/// Objective outcome type produced for engine `E`.
pub type EngineOutcomeOf<E> = EngineOutcome<
    <E as RulesEngine>::Action,
    <E as RulesEngine>::State,
    <E as RulesEngine>::Delta,
>;

/// Participant-facing form of `E`'s joint action.
pub type ActionViewOf<E> = <<E as RulesEngine>::Action as Personalize>::View;

/// Participant-facing form of `E`'s state.
pub type StateViewOf<E> = <<E as RulesEngine>::State as Personalize>::View;

/// Participant-facing form of `E`'s state delta.
pub type DeltaViewOf<E> = <<E as RulesEngine>::Delta as Personalize>::View;

/// Personalized outcome type delivered to participants of engine `E`.
pub type PlayerOutcomeOf<E> = PlayerOutcome<ActionViewOf<E>, StateViewOf<E>, DeltaViewOf<E>>;
