//! Personalized outcomes for simultaneous-move games
//!
//! This crate provides:
//! - An objective per-turn record ([`EngineOutcome`]) and the per-participant
//!   views projected from it ([`PlayerOutcome`])
//! - Per-participant fields split into `personal` and `opponents`
//! - Fault attribution for invalid turns
//! - A reference moderator, observers, and an N-participant
//!   Rock-Paper-Scissors game with a CLI

pub mod app;
pub mod cli;
pub mod error;
pub mod moderator;
pub mod observers;
pub mod outcome;
pub mod ports;
pub mod rps;
pub mod types;

pub use error::{Error, Result};
pub use moderator::{MatchSummary, Moderator};
pub use outcome::{
    EngineOutcome, Fault, Outcome, PerPlayer, Personalize, PlayerOutcome, PlayerOutcomeField,
    ProcessedActionOutcome, TurnValidity, Validity,
};
pub use types::{PlayerCount, PlayerId};
