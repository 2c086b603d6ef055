//! Newtype wrappers for participant indexing.
//!
//! Position `i` in every per-participant field of an outcome means
//! "participant `i`". These types make that convention explicit and checked.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Index of a participant within a game (0-based, stable for the whole game).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(usize);

impl PlayerId {
    /// Create a player identifier.
    ///
    /// The index is not range-checked here; use [`PlayerCount::check`] to
    /// validate it against a particular game.
    pub const fn new(index: usize) -> Self {
        PlayerId(index)
    }

    /// Get the inner index.
    pub const fn index(self) -> usize {
        self.0
    }
}

impl From<PlayerId> for usize {
    fn from(player: PlayerId) -> Self {
        player.0
    }
}

impl From<usize> for PlayerId {
    fn from(index: usize) -> Self {
        PlayerId(index)
    }
}

impl TryFrom<i64> for PlayerId {
    type Error = crate::Error;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        usize::try_from(value)
            .map(PlayerId)
            .map_err(|_| crate::Error::NegativePlayerIndex { value })
    }
}

impl TryFrom<i32> for PlayerId {
    type Error = crate::Error;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        PlayerId::try_from(i64::from(value))
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

/// Number of participants in a game (always at least one).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct PlayerCount(usize);

impl PlayerCount {
    /// Create a participant count.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidParticipantCount`] if `count` is zero.
    pub fn new(count: usize) -> Result<Self, crate::Error> {
        if count == 0 {
            Err(crate::Error::InvalidParticipantCount { count })
        } else {
            Ok(PlayerCount(count))
        }
    }

    /// Get the inner value.
    pub fn get(self) -> usize {
        self.0
    }

    /// Whether `player` indexes one of these participants.
    pub fn contains(self, player: PlayerId) -> bool {
        player.0 < self.0
    }

    /// Validate `player` against this count.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::PlayerOutOfRange`] if `player` is not in `[0, N)`.
    pub fn check(self, player: PlayerId) -> Result<PlayerId, crate::Error> {
        if self.contains(player) {
            Ok(player)
        } else {
            Err(crate::Error::PlayerOutOfRange {
                player: player.0,
                participants: self.0,
            })
        }
    }

    /// Iterate over every participant in index order.
    pub fn players(self) -> impl Iterator<Item = PlayerId> {
        (0..self.0).map(PlayerId)
    }
}

impl TryFrom<usize> for PlayerCount {
    type Error = crate::Error;

    fn try_from(count: usize) -> Result<Self, Self::Error> {
        PlayerCount::new(count)
    }
}

impl From<PlayerCount> for usize {
    fn from(count: PlayerCount) -> Self {
        count.0
    }
}

impl fmt::Display for PlayerCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_index_is_rejected() {
        assert!(matches!(
            PlayerId::try_from(-1i64),
            Err(crate::Error::NegativePlayerIndex { value: -1 })
        ));
        assert_eq!(PlayerId::try_from(2i32).unwrap(), PlayerId::new(2));
    }

    #[test]
    fn test_count_checks_range() {
        let count = PlayerCount::new(3).unwrap();
        assert!(count.check(PlayerId::new(2)).is_ok());
        assert!(matches!(
            count.check(PlayerId::new(3)),
            Err(crate::Error::PlayerOutOfRange {
                player: 3,
                participants: 3
            })
        ));
        assert!(PlayerCount::new(0).is_err());
    }

    #[test]
    fn test_players_iterates_in_order() {
        let count = PlayerCount::new(3).unwrap();
        let ids: Vec<usize> = count.players().map(PlayerId::index).collect();
        assert_eq!(ids, vec![0, 1, 2]);
    }
}
