//! Rules engine for N-participant Rock-Paper-Scissors
//!
//! Scoring: if every participant threw the same move, or all three moves
//! appear, the turn is a tie and every utility is 0. Otherwise exactly two
//! moves appear; participants holding the winning one get +1, the rest -1.
//!
//! With a streak limit `k`, throwing the same move more than `k` turns in a
//! row is illegal and invalidates the turn.

use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

use super::moves::Move;
use crate::{
    Error, Result,
    outcome::{PerPlayer, Personalize, PlayerOutcomeField, ProcessedActionOutcome},
    ports::RulesEngine,
    types::{PlayerCount, PlayerId},
};

/// Game state between turns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpsState {
    /// Valid turns played so far
    pub round: u32,
    /// Each participant's move in the last valid turn
    pub last_moves: PerPlayer<Option<Move>>,
    /// How many valid turns in a row each participant has thrown its last move
    pub streaks: PerPlayer<u32>,
}

impl RpsState {
    fn new(participants: PlayerCount) -> Self {
        Self {
            round: 0,
            last_moves: PerPlayer::new(vec![None; participants.get()]),
            streaks: PerPlayer::new(vec![0; participants.get()]),
        }
    }

    /// Streak `player` would reach by throwing `mv` next.
    pub fn streak_after(&self, player: PlayerId, mv: Move) -> u32 {
        match self.last_moves.get(player) {
            Some(Some(last)) if *last == mv => self.streaks.get(player).copied().unwrap_or(0) + 1,
            _ => 1,
        }
    }
}

/// A participant's view of the game state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpsStateView {
    pub round: u32,
    pub last_moves: PlayerOutcomeField<Option<Move>>,
    pub streaks: PlayerOutcomeField<u32>,
}

impl Personalize for RpsState {
    type View = RpsStateView;

    fn ensure_participants(&self, participants: PlayerCount) -> Result<()> {
        self.last_moves
            .ensure_participants(participants, "state.last_moves")?;
        self.streaks.ensure_participants(participants, "state.streaks")
    }

    fn personalize(&self, player: PlayerId) -> Result<RpsStateView> {
        Ok(RpsStateView {
            round: self.round,
            last_moves: self.last_moves.split(player)?,
            streaks: self.streaks.split(player)?,
        })
    }
}

/// What changed in a turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpsDelta {
    /// The move that won, or `None` for a tie
    pub winning_move: Option<Move>,
    /// Whether each participant held the winning move
    pub winners: PerPlayer<bool>,
}

/// A participant's view of what changed in a turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpsDeltaView {
    pub winning_move: Option<Move>,
    pub winners: PlayerOutcomeField<bool>,
}

impl Personalize for RpsDelta {
    type View = RpsDeltaView;

    fn ensure_participants(&self, participants: PlayerCount) -> Result<()> {
        self.winners
            .ensure_participants(participants, "delta.winners")
    }

    fn personalize(&self, player: PlayerId) -> Result<RpsDeltaView> {
        Ok(RpsDeltaView {
            winning_move: self.winning_move,
            winners: self.winners.split(player)?,
        })
    }
}

/// The joint action of a turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpsAction {
    pub moves: PerPlayer<Move>,
    /// Display form of each move
    pub repr: PerPlayer<String>,
}

impl RpsAction {
    pub fn new(moves: PerPlayer<Move>) -> Self {
        let repr = moves.map(|mv| mv.name().to_string());
        Self { moves, repr }
    }
}

/// A participant's view of the joint action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpsActionView {
    pub moves: PlayerOutcomeField<Move>,
    pub repr: PlayerOutcomeField<String>,
}

impl Personalize for RpsAction {
    type View = RpsActionView;

    fn ensure_participants(&self, participants: PlayerCount) -> Result<()> {
        self.moves.ensure_participants(participants, "action.moves")?;
        self.repr.ensure_participants(participants, "action.repr")
    }

    fn personalize(&self, player: PlayerId) -> Result<RpsActionView> {
        Ok(RpsActionView {
            moves: self.moves.split(player)?,
            repr: self.repr.split(player)?,
        })
    }
}

/// Rock-Paper-Scissors for a fixed number of participants
#[derive(Debug, Clone)]
pub struct RpsEngine {
    participants: PlayerCount,
    max_streak: Option<u32>,
    rounds: Option<u32>,
}

impl RpsEngine {
    /// # Errors
    ///
    /// Returns [`Error::InvalidParticipantCount`] for fewer than two participants.
    pub fn new(participants: usize) -> Result<Self> {
        if participants < 2 {
            return Err(Error::InvalidParticipantCount {
                count: participants,
            });
        }
        Ok(Self {
            participants: PlayerCount::new(participants)?,
            max_streak: None,
            rounds: None,
        })
    }

    /// Forbid throwing the same move more than `max_streak` valid turns in a row.
    pub fn with_max_streak(mut self, max_streak: u32) -> Self {
        self.max_streak = Some(max_streak);
        self
    }

    /// End the game after `rounds` valid turns.
    pub fn with_rounds(mut self, rounds: u32) -> Self {
        self.rounds = Some(rounds);
        self
    }

    pub fn max_streak(&self) -> Option<u32> {
        self.max_streak
    }

    /// The winning move among `moves`, if the turn is not a tie.
    pub fn winning_move(moves: &PerPlayer<Move>) -> Option<Move> {
        let present: HashSet<Move> = moves.iter().copied().collect();
        if present.len() != 2 {
            return None;
        }
        present
            .iter()
            .copied()
            .find(|mv| present.iter().any(|other| mv.beats(*other)))
    }
}

impl RulesEngine for RpsEngine {
    type Move = Move;
    type Action = RpsAction;
    type State = RpsState;
    type Delta = RpsDelta;

    fn participants(&self) -> PlayerCount {
        self.participants
    }

    fn initial_state(&self) -> RpsState {
        RpsState::new(self.participants)
    }

    fn validate(&self, state: &RpsState, moves: &PerPlayer<Move>) -> BTreeSet<PlayerId> {
        let Some(limit) = self.max_streak else {
            return BTreeSet::new();
        };
        moves
            .enumerate()
            .filter(|(player, mv)| state.streak_after(*player, **mv) > limit)
            .map(|(player, _)| player)
            .collect()
    }

    fn action(&self, moves: &PerPlayer<Move>) -> RpsAction {
        RpsAction::new(moves.clone())
    }

    fn process_action(
        &self,
        state: &RpsState,
        action: &RpsAction,
    ) -> Result<ProcessedActionOutcome<RpsState, RpsDelta>> {
        action.ensure_participants(self.participants)?;
        state.ensure_participants(self.participants)?;

        let winning_move = Self::winning_move(&action.moves);
        let utilities = action
            .moves
            .iter()
            .map(|mv| match winning_move {
                None => 0.0,
                Some(winner) if *mv == winner => 1.0,
                Some(_) => -1.0,
            })
            .collect();
        let winners = action.moves.map(|mv| Some(*mv) == winning_move);

        let new_state = RpsState {
            round: state.round + 1,
            last_moves: action.moves.map(|mv| Some(*mv)),
            streaks: action
                .moves
                .enumerate()
                .map(|(player, mv)| state.streak_after(player, *mv))
                .collect(),
        };

        Ok(ProcessedActionOutcome::new(utilities, new_state).with_delta(RpsDelta {
            winning_move,
            winners,
        }))
    }

    fn is_terminal(&self, state: &RpsState) -> bool {
        self.rounds.is_some_and(|rounds| state.round >= rounds)
    }
}
