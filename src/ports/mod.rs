//! Ports (trait boundaries) for the collaborators around the outcome model.
//!
//! The rules engine, the participants, and anything observing a match sit
//! outside the personalization layer. These traits are the seams where they
//! plug in; the `rps` module and the `observers` module provide adapters.

pub mod engine;
pub mod observer;
pub mod participant;

pub use engine::{
    ActionViewOf, DeltaViewOf, EngineOutcomeOf, PlayerOutcomeOf, RulesEngine, StateViewOf,
};
pub use observer::TurnObserver;
pub use participant::Participant;
