//! Turn outcomes: the objective record and its per-participant views
//!
//! The rules engine hands back a [`ProcessedActionOutcome`]. The orchestrator
//! combines it with the turn's validity and action into one
//! [`EngineOutcome`], then derives one [`PlayerOutcome`] per participant.
//! Per-participant fields of a `PlayerOutcome` are [`PlayerOutcomeField`]s,
//! so a participant's own entry is never structurally mixed with the others.

pub mod engine;
pub mod field;
pub mod personalize;
pub mod player;
pub mod processed;
pub mod validity;

pub use engine::EngineOutcome;
pub use field::{PerPlayer, PlayerOutcomeField};
pub use personalize::Personalize;
pub use player::PlayerOutcome;
pub use processed::ProcessedActionOutcome;
pub use validity::{Fault, TurnValidity, Validity};

/// Field contract shared by [`EngineOutcome`] and [`PlayerOutcome`].
///
/// Both records expose the same fields; they differ in the shape of the
/// per-participant ones (`PerPlayer` vs `PlayerOutcomeField`). When the turn
/// was invalid every accessor except [`Outcome::is_valid`] returns `None`.
pub trait Outcome {
    type Action;
    type Utilities;
    type State;
    type Delta;

    /// Whether the turn result is usable at all.
    fn is_valid(&self) -> bool;

    fn action(&self) -> Option<&Self::Action>;

    fn utilities(&self) -> Option<&Self::Utilities>;

    fn state(&self) -> Option<&Self::State>;

    fn state_delta(&self) -> Option<&Self::Delta>;
}
