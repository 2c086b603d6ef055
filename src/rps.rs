//! N-participant Rock-Paper-Scissors
//!
//! A reference game for the outcome model: a rules engine, a few agents, and
//! a text rendering of a participant's personalized view.

pub mod agents;
pub mod engine;
pub mod moves;
pub mod render;

pub use agents::{AgentKind, RandomAgent, ScriptedAgent, WinStayLoseShiftAgent};
pub use engine::{
    RpsAction, RpsActionView, RpsDelta, RpsDeltaView, RpsEngine, RpsState, RpsStateView,
};
pub use moves::Move;
pub use render::render_view;

use crate::ports::{EngineOutcomeOf, PlayerOutcomeOf};

/// Objective outcome of an RPS turn
pub type RpsOutcome = EngineOutcomeOf<RpsEngine>;

/// A participant's view of an RPS turn
pub type RpsView = PlayerOutcomeOf<RpsEngine>;
