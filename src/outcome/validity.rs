//! Turn validity, objective and per-participant
//!
//! The objective record keeps the set of participants whose action made the
//! turn invalid. Each participant's view only carries the projection of that
//! set: "was I among them".

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::{
    Result,
    types::{PlayerCount, PlayerId},
};

/// Objective validity of a resolved turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnValidity {
    /// The turn resolved normally.
    Valid,
    /// The turn result is unusable. `at_fault` lists the participants whose
    /// own action caused it; it may be empty when no single participant is
    /// to blame.
    Invalid { at_fault: BTreeSet<PlayerId> },
}

impl TurnValidity {
    /// Build an invalid validity, checking every at-fault index against the game.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::PlayerOutOfRange`] if any index is not a participant.
    pub fn invalid(
        participants: PlayerCount,
        at_fault: impl IntoIterator<Item = PlayerId>,
    ) -> Result<Self> {
        let at_fault = at_fault
            .into_iter()
            .map(|player| participants.check(player))
            .collect::<Result<BTreeSet<_>>>()?;
        Ok(TurnValidity::Invalid { at_fault })
    }

    /// Whether the turn result is usable at all.
    pub fn overall(&self) -> bool {
        matches!(self, TurnValidity::Valid)
    }

    /// Whether `player`'s own action invalidated the turn.
    pub fn is_at_fault(&self, player: PlayerId) -> bool {
        match self {
            TurnValidity::Valid => false,
            TurnValidity::Invalid { at_fault } => at_fault.contains(&player),
        }
    }

    /// Participants at fault (empty for a valid turn).
    pub fn at_fault(&self) -> impl Iterator<Item = PlayerId> + '_ {
        let players = match self {
            TurnValidity::Valid => None,
            TurnValidity::Invalid { at_fault } => Some(at_fault.iter().copied()),
        };
        players.into_iter().flatten()
    }

    /// Project onto one participant's view.
    pub fn for_player(&self, player: PlayerId) -> Validity {
        if self.overall() {
            Validity::VALID
        } else {
            Validity::invalid(self.is_at_fault(player))
        }
    }
}

/// Validity as seen by one participant.
///
/// `personal` is only meaningful when `overall` is false; the constructors
/// keep it `false` for valid turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawValidity")]
pub struct Validity {
    overall: bool,
    personal: bool,
}

#[derive(Deserialize)]
struct RawValidity {
    overall: bool,
    personal: bool,
}

impl TryFrom<RawValidity> for Validity {
    type Error = crate::Error;

    fn try_from(raw: RawValidity) -> Result<Self> {
        match (raw.overall, raw.personal) {
            (true, true) => Err(crate::Error::InconsistentValidity),
            (true, false) => Ok(Validity::VALID),
            (false, personal) => Ok(Validity::invalid(personal)),
        }
    }
}

impl Validity {
    pub const VALID: Validity = Validity {
        overall: true,
        personal: false,
    };

    /// An invalid turn; `personal` tells whether the receiving participant caused it.
    pub const fn invalid(personal: bool) -> Self {
        Validity {
            overall: false,
            personal,
        }
    }

    pub fn overall(&self) -> bool {
        self.overall
    }

    pub fn personal(&self) -> bool {
        self.personal
    }

    /// Whose fault the turn's invalidity is, from this participant's perspective.
    pub fn fault(&self) -> Fault {
        match (self.overall, self.personal) {
            (true, _) => Fault::Nobody,
            (false, true) => Fault::Own,
            (false, false) => Fault::Others,
        }
    }
}

/// Participant-relative blame for a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Fault {
    /// The turn was valid.
    Nobody,
    /// The receiving participant's own action invalidated the turn.
    Own,
    /// Someone else invalidated the turn.
    Others,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three() -> PlayerCount {
        PlayerCount::new(3).unwrap()
    }

    #[test]
    fn test_valid_projects_to_nobody() {
        let validity = TurnValidity::Valid;
        for player in three().players() {
            let view = validity.for_player(player);
            assert!(view.overall());
            assert!(!view.personal());
            assert_eq!(view.fault(), Fault::Nobody);
        }
    }

    #[test]
    fn test_invalid_projects_fault_per_player() {
        let validity = TurnValidity::invalid(three(), [PlayerId::new(1)]).unwrap();
        assert!(!validity.overall());

        assert_eq!(validity.for_player(PlayerId::new(0)).fault(), Fault::Others);
        assert_eq!(validity.for_player(PlayerId::new(1)).fault(), Fault::Own);
        assert_eq!(validity.for_player(PlayerId::new(2)).fault(), Fault::Others);
    }

    #[test]
    fn test_invalid_rejects_unknown_player() {
        let result = TurnValidity::invalid(three(), [PlayerId::new(0), PlayerId::new(5)]);
        assert!(matches!(
            result,
            Err(crate::Error::PlayerOutOfRange { player: 5, .. })
        ));
    }

    #[test]
    fn test_at_fault_iterates_sorted() {
        let validity =
            TurnValidity::invalid(three(), [PlayerId::new(2), PlayerId::new(0)]).unwrap();
        let players: Vec<_> = validity.at_fault().collect();
        assert_eq!(players, vec![PlayerId::new(0), PlayerId::new(2)]);
        assert_eq!(TurnValidity::Valid.at_fault().count(), 0);
    }

    #[test]
    fn test_deserialize_rejects_personal_fault_on_valid_turn() {
        let parsed: Validity =
            serde_json::from_str(r#"{"overall":false,"personal":true}"#).unwrap();
        assert_eq!(parsed.fault(), Fault::Own);

        let valid: Validity =
            serde_json::from_str(r#"{"overall":true,"personal":false}"#).unwrap();
        assert_eq!(valid, Validity::VALID);

        let result = serde_json::from_str::<Validity>(r#"{"overall":true,"personal":true}"#);
        assert!(result.is_err());
    }
}
