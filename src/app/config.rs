//! Configuration types for match creation.

use serde::{Deserialize, Serialize};

use crate::{Error, Result, rps::AgentKind};

/// Configuration for a Rock-Paper-Scissors match.
///
/// # Examples
///
/// ```
/// use gearbox::app::MatchConfig;
/// use gearbox::rps::AgentKind;
///
/// let config = MatchConfig::new(2)
///     .with_rounds(20)
///     .with_seed(42)
///     .with_max_streak(2)
///     .with_agents(vec![AgentKind::Random, AgentKind::WinStayLoseShift]);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Number of participants
    pub players: usize,
    /// Number of turns to play
    pub rounds: usize,
    /// Random seed for reproducibility
    pub seed: Option<u64>,
    /// Longest allowed run of the same throw (unlimited if `None`)
    pub max_streak: Option<u32>,
    /// Agent per participant; empty means the container's default agent for everyone
    pub agents: Vec<AgentKind>,
}

impl MatchConfig {
    /// Create a configuration for `players` participants.
    ///
    /// Uses default values for other parameters:
    /// - Rounds: 10
    /// - Seed: None (non-deterministic)
    /// - Max streak: None
    /// - Agents: container default
    pub fn new(players: usize) -> Self {
        Self {
            players,
            rounds: 10,
            seed: None,
            max_streak: None,
            agents: Vec::new(),
        }
    }

    pub fn with_rounds(mut self, rounds: usize) -> Self {
        self.rounds = rounds;
        self
    }

    /// Set the random seed for deterministic behavior.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_max_streak(mut self, max_streak: u32) -> Self {
        self.max_streak = Some(max_streak);
        self
    }

    pub fn with_agents(mut self, agents: Vec<AgentKind>) -> Self {
        self.agents = agents;
        self
    }

    /// Check the configuration describes a playable match.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] for fewer than two players,
    /// zero rounds, a zero streak limit, or an agent list whose length differs
    /// from the number of players.
    pub fn validate(&self) -> Result<()> {
        let invalid = |message: String| Err(Error::InvalidConfiguration { message });

        if self.players < 2 {
            return invalid(format!(
                "a match needs at least 2 players, got {}",
                self.players
            ));
        }
        if self.rounds == 0 {
            return invalid("rounds must be positive".to_string());
        }
        if self.max_streak == Some(0) {
            return invalid("max streak must be at least 1".to_string());
        }
        if !self.agents.is_empty() && self.agents.len() != self.players {
            return invalid(format!(
                "{} agents given for {} players",
                self.agents.len(),
                self.players
            ));
        }
        Ok(())
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self::new(2)
    }
}
