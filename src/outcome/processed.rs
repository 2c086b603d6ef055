//! Raw result of resolving one action in the rules engine

use serde::{Deserialize, Serialize};

use crate::outcome::field::PerPlayer;

/// What the rules engine computed for one turn.
///
/// Consumed once to build an [`crate::outcome::EngineOutcome`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedActionOutcome<S, D = ()> {
    /// Utility for each participant on this turn
    pub utilities: PerPlayer<f64>,
    /// The new shared state after this turn
    pub new_state: S,
    /// Difference from the previous state, for animation or incremental rendering
    pub state_delta: Option<D>,
}

impl<S, D> ProcessedActionOutcome<S, D> {
    pub fn new(utilities: Vec<f64>, new_state: S) -> Self {
        Self {
            utilities: PerPlayer::new(utilities),
            new_state,
            state_delta: None,
        }
    }

    pub fn with_delta(mut self, state_delta: D) -> Self {
        self.state_delta = Some(state_delta);
        self
    }
}
