//! The objective, ground-truth record of one resolved turn

use serde::Serialize;

use super::{
    Outcome,
    field::PerPlayer,
    personalize::Personalize,
    player::PlayerOutcome,
    processed::ProcessedActionOutcome,
    validity::TurnValidity,
};
use crate::{
    Result,
    types::{PlayerCount, PlayerId},
};

/// Objective outcome of a turn, indexed by participant.
///
/// Built once per turn and never mutated afterwards; there are no mutable
/// accessors. When the turn is invalid, action, utilities, state, and delta
/// are all absent whatever the engine computed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngineOutcome<A, S, D = ()> {
    participants: PlayerCount,
    validity: TurnValidity,
    action: Option<A>,
    utilities: Option<PerPlayer<f64>>,
    state: Option<S>,
    state_delta: Option<D>,
}

impl<A, S, D> EngineOutcome<A, S, D> {
    /// Build the record of an invalid turn.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::PlayerOutOfRange`] if an at-fault index is not a participant.
    pub fn invalid(
        participants: PlayerCount,
        at_fault: impl IntoIterator<Item = PlayerId>,
    ) -> Result<Self> {
        let validity = TurnValidity::invalid(participants, at_fault)?;
        Ok(Self::without_result(participants, validity))
    }

    fn without_result(participants: PlayerCount, validity: TurnValidity) -> Self {
        Self {
            participants,
            validity,
            action: None,
            utilities: None,
            state: None,
            state_delta: None,
        }
    }

    pub fn participants(&self) -> PlayerCount {
        self.participants
    }

    pub fn validity(&self) -> &TurnValidity {
        &self.validity
    }
}

impl<A, S, D> EngineOutcome<A, S, D>
where
    A: Personalize,
    S: Personalize,
    D: Personalize,
{
    /// Build the record of a valid turn from the engine's computation.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::ShapeMismatch`] if the utilities or any
    /// per-participant field of the action, state, or delta does not have one
    /// entry per participant.
    pub fn valid(
        participants: PlayerCount,
        action: A,
        processed: ProcessedActionOutcome<S, D>,
    ) -> Result<Self> {
        action.ensure_participants(participants)?;
        processed
            .utilities
            .ensure_participants(participants, "utilities")?;
        processed.new_state.ensure_participants(participants)?;
        if let Some(delta) = &processed.state_delta {
            delta.ensure_participants(participants)?;
        }

        Ok(Self {
            participants,
            validity: TurnValidity::Valid,
            action: Some(action),
            utilities: Some(processed.utilities),
            state: Some(processed.new_state),
            state_delta: processed.state_delta,
        })
    }

    /// Build the record for `validity`.
    ///
    /// An invalid validity discards `action` and `processed` unchecked.
    pub fn resolve(
        participants: PlayerCount,
        validity: TurnValidity,
        action: A,
        processed: ProcessedActionOutcome<S, D>,
    ) -> Result<Self> {
        match validity {
            TurnValidity::Valid => Self::valid(participants, action, processed),
            TurnValidity::Invalid { at_fault } => Self::invalid(participants, at_fault),
        }
    }

    /// Derive `player`'s view of this turn.
    ///
    /// Action, state, and delta are each projected through [`Personalize`],
    /// so the view holds no value keyed to another participant's index. The
    /// view owns fresh copies of everything it carries and shares nothing with
    /// this record or with any other participant's view.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::PlayerOutOfRange`] if `player` is not a participant.
    pub fn personalize(&self, player: PlayerId) -> Result<PlayerOutcome<A::View, S::View, D::View>> {
        let player = self.participants.check(player)?;
        let validity = self.validity.for_player(player);

        if !validity.overall() {
            return Ok(PlayerOutcome::invalid(player, validity.personal()));
        }

        let action = self
            .action
            .as_ref()
            .map(|action| action.personalize(player))
            .transpose()?;
        let utilities = self
            .utilities
            .as_ref()
            .map(|utilities| utilities.split(player))
            .transpose()?;

        let state = self
            .state
            .as_ref()
            .map(|state| state.personalize(player))
            .transpose()?;
        let state_delta = self
            .state_delta
            .as_ref()
            .map(|delta| delta.personalize(player))
            .transpose()?;

        Ok(PlayerOutcome::from_parts(
            player,
            validity,
            action,
            utilities,
            state,
            state_delta,
        ))
    }

    /// Derive every participant's view, in participant order.
    pub fn personalize_all(&self) -> Result<Vec<PlayerOutcome<A::View, S::View, D::View>>> {
        self.participants
            .players()
            .map(|player| self.personalize(player))
            .collect()
    }
}

impl<A, S, D> Outcome for EngineOutcome<A, S, D> {
    type Action = A;
    type Utilities = PerPlayer<f64>;
    type State = S;
    type Delta = D;

    fn is_valid(&self) -> bool {
        self.validity.overall()
    }

    fn action(&self) -> Option<&A> {
        self.action.as_ref()
    }

    fn utilities(&self) -> Option<&PerPlayer<f64>> {
        self.utilities.as_ref()
    }

    fn state(&self) -> Option<&S> {
        self.state.as_ref()
    }

    fn state_delta(&self) -> Option<&D> {
        self.state_delta.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Error, outcome::Fault};

    type Simple = EngineOutcome<PerPlayer<&'static str>, u32, String>;

    fn three() -> PlayerCount {
        PlayerCount::new(3).unwrap()
    }

    fn rps_turn() -> Simple {
        let action = PerPlayer::new(vec!["Rock", "Scissors", "Paper"]);
        let processed =
            ProcessedActionOutcome::new(vec![1.0, -1.0, 0.0], 7).with_delta("p0".to_string());
        EngineOutcome::valid(three(), action, processed).unwrap()
    }

    #[test]
    fn test_personalize_splits_action_and_utilities() {
        let outcome = rps_turn();
        let view = outcome.personalize(PlayerId::new(1)).unwrap();

        assert!(view.is_valid());
        let utilities = view.utilities().unwrap();
        assert_eq!(utilities.personal, -1.0);
        assert_eq!(utilities.opponents, vec![1.0, 0.0]);

        let action = view.action().unwrap();
        assert_eq!(action.personal, "Scissors");
        assert_eq!(action.opponents, vec!["Rock", "Paper"]);

        assert_eq!(view.state(), Some(&7));
        assert_eq!(view.player(), PlayerId::new(1));
    }

    #[test]
    fn test_invalid_short_circuits_inputs() {
        let action = PerPlayer::new(vec!["Rock", "Rock", "Rock"]);
        let processed =
            ProcessedActionOutcome::new(vec![1.0, 1.0, 1.0], 9).with_delta("x".to_string());
        let validity = TurnValidity::invalid(three(), [PlayerId::new(0)]).unwrap();

        let outcome: Simple = EngineOutcome::resolve(three(), validity, action, processed).unwrap();
        assert!(!outcome.is_valid());
        assert!(outcome.action().is_none());
        assert!(outcome.utilities().is_none());
        assert!(outcome.state().is_none());
        assert!(outcome.state_delta().is_none());

        let own = outcome.personalize(PlayerId::new(0)).unwrap();
        assert_eq!(own.validity().fault(), Fault::Own);
        assert!(own.action().is_none());
        assert!(own.utilities().is_none());

        let other = outcome.personalize(PlayerId::new(2)).unwrap();
        assert_eq!(other.validity().fault(), Fault::Others);
        assert!(other.state().is_none());
        assert!(other.state_delta().is_none());
    }

    #[test]
    fn test_shape_mismatch_fails_construction() {
        let action = PerPlayer::new(vec!["Rock", "Paper", "Paper"]);
        let processed: ProcessedActionOutcome<u32, String> =
            ProcessedActionOutcome::new(vec![1.0, -1.0], 0);
        let result = EngineOutcome::valid(three(), action, processed);
        assert!(matches!(
            result,
            Err(Error::ShapeMismatch { ref field, expected: 3, got: 2 }) if field == "utilities"
        ));

        let action = PerPlayer::new(vec!["Rock"]);
        let processed: ProcessedActionOutcome<u32, String> =
            ProcessedActionOutcome::new(vec![1.0, -1.0, 0.0], 0);
        assert!(EngineOutcome::valid(three(), action, processed).is_err());
    }

    #[test]
    fn test_per_player_state_is_split() {
        let processed =
            ProcessedActionOutcome::new(vec![0.0; 3], PerPlayer::new(vec![10u32, 20, 30]));
        let outcome: EngineOutcome<PerPlayer<u8>, PerPlayer<u32>> =
            EngineOutcome::valid(three(), PerPlayer::new(vec![1, 2, 3]), processed).unwrap();

        let view = outcome.personalize(PlayerId::new(2)).unwrap();
        let state = view.state().unwrap();
        assert_eq!(state.personal, 30);
        assert_eq!(state.opponents, vec![10, 20]);

        let short = ProcessedActionOutcome::new(vec![0.0; 3], PerPlayer::new(vec![1u32]));
        let result: Result<EngineOutcome<PerPlayer<u8>, PerPlayer<u32>>> =
            EngineOutcome::valid(three(), PerPlayer::new(vec![1, 2, 3]), short);
        assert!(matches!(
            result,
            Err(Error::ShapeMismatch {
                expected: 3,
                got: 1,
                ..
            })
        ));
    }

    #[test]
    fn test_personalize_out_of_range() {
        let outcome = rps_turn();
        assert!(matches!(
            outcome.personalize(PlayerId::new(3)),
            Err(Error::PlayerOutOfRange {
                player: 3,
                participants: 3
            })
        ));
    }

    #[test]
    fn test_personalize_all_in_order() {
        let outcome = rps_turn();
        let views = outcome.personalize_all().unwrap();
        assert_eq!(views.len(), 3);
        for (index, view) in views.iter().enumerate() {
            assert_eq!(view.player(), PlayerId::new(index));
            assert_eq!(
                view.utilities().unwrap().personal,
                outcome.utilities().unwrap().as_slice()[index]
            );
        }
    }
}
