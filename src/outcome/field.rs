//! Per-participant sequences and the perspective-splitting primitive

use std::slice;

use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    types::{PlayerCount, PlayerId},
};

/// An ordered sequence holding exactly one value per participant.
///
/// Entry `i` belongs to participant `i`. The length is checked against the
/// game's [`PlayerCount`] whenever the sequence enters an outcome.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PerPlayer<T>(Vec<T>);

impl<T> PerPlayer<T> {
    /// Wrap `values`, indexed by participant.
    pub fn new(values: Vec<T>) -> Self {
        PerPlayer(values)
    }

    /// Wrap `values` and check that there is exactly one per participant.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ShapeMismatch`] if the length differs from `participants`.
    pub fn with_participants(values: Vec<T>, participants: PlayerCount) -> Result<Self> {
        let values = PerPlayer(values);
        values.ensure_participants(participants, "values")?;
        Ok(values)
    }

    /// Fail with [`Error::ShapeMismatch`] unless there is one entry per participant.
    pub fn ensure_participants(&self, participants: PlayerCount, field: &str) -> Result<()> {
        if self.0.len() == participants.get() {
            Ok(())
        } else {
            Err(Error::ShapeMismatch {
                field: field.to_string(),
                expected: participants.get(),
                got: self.0.len(),
            })
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, player: PlayerId) -> Option<&T> {
        self.0.get(player.index())
    }

    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.0.iter()
    }

    /// Iterate over `(participant, value)` pairs in index order.
    pub fn enumerate(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.0
            .iter()
            .enumerate()
            .map(|(index, value)| (PlayerId::new(index), value))
    }

    pub fn as_slice(&self) -> &[T] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<T> {
        self.0
    }

    /// Apply `f` to every entry, keeping participant positions.
    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> PerPlayer<U> {
        PerPlayer(self.0.iter().map(f).collect())
    }
}

impl<T: Clone> PerPlayer<T> {
    /// Split into `player`'s own value and the ordered values of the others.
    ///
    /// See [`PlayerOutcomeField::from_slice`].
    pub fn split(&self, player: PlayerId) -> Result<PlayerOutcomeField<T>> {
        PlayerOutcomeField::from_slice(&self.0, player)
    }
}

impl<T> From<Vec<T>> for PerPlayer<T> {
    fn from(values: Vec<T>) -> Self {
        PerPlayer(values)
    }
}

impl<T> FromIterator<T> for PerPlayer<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        PerPlayer(iter.into_iter().collect())
    }
}

impl<'a, T> IntoIterator for &'a PerPlayer<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// One participant's view of a per-participant field.
///
/// `personal` is the receiving participant's own entry. `opponents` holds the
/// other participants' entries in their original relative order, with the
/// receiver's position removed (length N-1).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerOutcomeField<T> {
    pub personal: T,
    pub opponents: Vec<T>,
}

impl<T> PlayerOutcomeField<T> {
    pub fn new(personal: T, opponents: Vec<T>) -> Self {
        Self {
            personal,
            opponents,
        }
    }

    /// Number of participants the field was split from.
    pub fn participants(&self) -> usize {
        self.opponents.len() + 1
    }

    /// Apply `f` to the personal entry and every opponent entry.
    pub fn map<U>(&self, mut f: impl FnMut(&T) -> U) -> PlayerOutcomeField<U> {
        PlayerOutcomeField {
            personal: f(&self.personal),
            opponents: self.opponents.iter().map(f).collect(),
        }
    }
}

impl<T: Clone> PlayerOutcomeField<T> {
    /// Split an ordered per-participant sequence for `player`.
    ///
    /// The input is never modified: the values are copied, the entry at
    /// `player` becomes `personal`, and the rest keep their relative order as
    /// `opponents`. For `[a, b, c, d]` and player 1 this yields `b` and
    /// `[a, c, d]`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PlayerOutOfRange`] if `player` does not index `values`.
    /// No partial result is produced.
    ///
    /// # Examples
    ///
    /// ```
    /// use gearbox::{PlayerId, PlayerOutcomeField};
    ///
    /// let field = PlayerOutcomeField::from_slice(&["a", "b", "c", "d"], PlayerId::new(1))?;
    /// assert_eq!(field.personal, "b");
    /// assert_eq!(field.opponents, vec!["a", "c", "d"]);
    /// # Ok::<(), gearbox::Error>(())
    /// ```
    pub fn from_slice(values: &[T], player: PlayerId) -> Result<Self> {
        let index = player.index();
        if index >= values.len() {
            return Err(Error::PlayerOutOfRange {
                player: index,
                participants: values.len(),
            });
        }

        let mut opponents = values.to_vec();
        let personal = opponents.remove(index);

        Ok(Self {
            personal,
            opponents,
        })
    }
}
