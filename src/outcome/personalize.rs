//! Projection of actions, states and deltas into a participant's perspective
//!
//! Splitting is applied explicitly, field by field. A payload type lists its
//! per-participant fields by splitting each one in [`Personalize::personalize`];
//! any other field is copied as-is. Plain `Vec`s are not personalized, so an
//! unrelated list is never mistaken for per-participant data, and a payload
//! holding one cannot be embedded in a view at all.

use crate::{
    Result,
    outcome::field::{PerPlayer, PlayerOutcomeField},
    types::{PlayerCount, PlayerId},
};

/// A value that can be viewed from one participant's perspective.
///
/// # Examples
///
/// A nested action payload splits each of its per-participant fields:
///
/// ```
/// use gearbox::{PerPlayer, Personalize, PlayerCount, PlayerId, PlayerOutcomeField};
///
/// #[derive(Clone)]
/// struct Bids {
///     amounts: PerPlayer<u32>,
///     round: u32,
/// }
///
/// struct BidsView {
///     amounts: PlayerOutcomeField<u32>,
///     round: u32,
/// }
///
/// impl Personalize for Bids {
///     type View = BidsView;
///
///     fn ensure_participants(&self, participants: PlayerCount) -> gearbox::Result<()> {
///         self.amounts.ensure_participants(participants, "amounts")
///     }
///
///     fn personalize(&self, player: PlayerId) -> gearbox::Result<BidsView> {
///         Ok(BidsView {
///             amounts: self.amounts.split(player)?,
///             round: self.round,
///         })
///     }
/// }
///
/// let bids = Bids { amounts: PerPlayer::new(vec![3, 5]), round: 1 };
/// let view = bids.personalize(PlayerId::new(1))?;
/// assert_eq!(view.amounts.personal, 5);
/// assert_eq!(view.amounts.opponents, vec![3]);
/// # Ok::<(), gearbox::Error>(())
/// ```
pub trait Personalize {
    /// The participant-facing form. Must own its data.
    type View;

    /// Check every per-participant field holds one entry per participant.
    fn ensure_participants(&self, participants: PlayerCount) -> Result<()>;

    /// Build `player`'s view without modifying `self`.
    fn personalize(&self, player: PlayerId) -> Result<Self::View>;
}

impl<T: Clone> Personalize for PerPlayer<T> {
    type View = PlayerOutcomeField<T>;

    fn ensure_participants(&self, participants: PlayerCount) -> Result<()> {
        PerPlayer::ensure_participants(self, participants, "value")
    }

    fn personalize(&self, player: PlayerId) -> Result<Self::View> {
        self.split(player)
    }
}

/// Values with no per-participant structure are copied into every view.
macro_rules! impl_shared {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Personalize for $ty {
                type View = $ty;

                fn ensure_participants(&self, _participants: PlayerCount) -> Result<()> {
                    Ok(())
                }

                fn personalize(&self, _player: PlayerId) -> Result<Self::View> {
                    Ok(self.clone())
                }
            }
        )*
    };
}

impl_shared!((), bool, u8, u16, u32, u64, usize, i32, i64, f64, String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_values_are_copied() {
        let count = PlayerCount::new(2).unwrap();
        assert!(7u32.ensure_participants(count).is_ok());
        assert_eq!(7u32.personalize(PlayerId::new(1)).unwrap(), 7);
        assert_eq!(
            "table".to_string().personalize(PlayerId::new(0)).unwrap(),
            "table"
        );
    }

    #[test]
    fn test_per_player_checks_length() {
        let values = PerPlayer::new(vec![1, 2, 3]);
        assert!(Personalize::ensure_participants(&values, PlayerCount::new(2).unwrap()).is_err());
        let view = Personalize::personalize(&values, PlayerId::new(2)).unwrap();
        assert_eq!(view.personal, 3);
        assert_eq!(view.opponents, vec![1, 2]);
    }
}
