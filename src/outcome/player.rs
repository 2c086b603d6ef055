//! One participant's personalized view of a turn

use serde::{Deserialize, Serialize};

use super::{Outcome, field::PlayerOutcomeField, validity::Validity};
use crate::types::PlayerId;

/// A participant's view of a resolved turn.
///
/// Same fields as [`super::EngineOutcome`], but per-participant data in the
/// action, utilities, state, and delta is split into the receiver's own entry
/// and the ordered entries of the others.
/// The value is owned outright by the participant it was built for: it may be
/// annotated or mutated freely without affecting anyone else's view.
///
/// Consumers branch on [`Validity::overall`] first, then on
/// [`Validity::personal`], before reading anything else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerOutcome<V, S, D = ()> {
    player: PlayerId,
    validity: Validity,
    action: Option<V>,
    utilities: Option<PlayerOutcomeField<f64>>,
    state: Option<S>,
    state_delta: Option<D>,
}

impl<V, S, D> PlayerOutcome<V, S, D> {
    /// View of an invalid turn; `personal` tells whether `player` caused it.
    pub fn invalid(player: PlayerId, personal: bool) -> Self {
        Self {
            player,
            validity: Validity::invalid(personal),
            action: None,
            utilities: None,
            state: None,
            state_delta: None,
        }
    }

    pub(crate) fn from_parts(
        player: PlayerId,
        validity: Validity,
        action: Option<V>,
        utilities: Option<PlayerOutcomeField<f64>>,
        state: Option<S>,
        state_delta: Option<D>,
    ) -> Self {
        Self {
            player,
            validity,
            action,
            utilities,
            state,
            state_delta,
        }
    }

    /// The participant this view was built for.
    pub fn player(&self) -> PlayerId {
        self.player
    }

    pub fn validity(&self) -> Validity {
        self.validity
    }

    pub fn action_mut(&mut self) -> Option<&mut V> {
        self.action.as_mut()
    }

    pub fn utilities_mut(&mut self) -> Option<&mut PlayerOutcomeField<f64>> {
        self.utilities.as_mut()
    }

    pub fn state_mut(&mut self) -> Option<&mut S> {
        self.state.as_mut()
    }

    pub fn state_delta_mut(&mut self) -> Option<&mut D> {
        self.state_delta.as_mut()
    }
}

impl<V, S, D> Outcome for PlayerOutcome<V, S, D> {
    type Action = V;
    type Utilities = PlayerOutcomeField<f64>;
    type State = S;
    type Delta = D;

    fn is_valid(&self) -> bool {
        self.validity.overall()
    }

    fn action(&self) -> Option<&V> {
        self.action.as_ref()
    }

    fn utilities(&self) -> Option<&PlayerOutcomeField<f64>> {
        self.utilities.as_ref()
    }

    fn state(&self) -> Option<&S> {
        self.state.as_ref()
    }

    fn state_delta(&self) -> Option<&D> {
        self.state_delta.as_ref()
    }
}
