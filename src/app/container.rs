//! Dependency container for matches.
//!
//! The container owns the defaults a match falls back on and provides factory
//! methods that wire engines, participants, and seeds together.

use rand::random;

use super::config::MatchConfig;
use crate::{
    Result,
    moderator::Moderator,
    ports::Participant,
    rps::{AgentKind, RpsEngine},
};

/// Application with injected defaults.
///
/// # Examples
///
/// ```
/// use gearbox::app::{App, MatchConfig};
///
/// let app = App::new();
/// let moderator = app.create_match(&MatchConfig::new(4).with_seed(1))?;
/// assert_eq!(moderator.participant_names().len(), 4);
/// # Ok::<(), gearbox::Error>(())
/// ```
pub struct App {
    /// Default random seed (None = non-deterministic)
    default_seed: Option<u64>,
    /// Agent used for every participant when a config names none
    default_agent: AgentKind,
}

impl App {
    /// Create a new app with production defaults.
    ///
    /// Uses:
    /// - No default seed (non-deterministic RNG)
    /// - Random agents
    pub fn new() -> Self {
        Self {
            default_seed: None,
            default_agent: AgentKind::Random,
        }
    }

    /// Create a builder for constructing an app with custom defaults.
    pub fn for_testing() -> AppBuilder {
        AppBuilder::new()
    }

    pub fn default_seed(&self) -> Option<u64> {
        self.default_seed
    }

    /// Build a ready-to-run match from `config`.
    ///
    /// Participant `i` is seeded with `seed + i`, so a fixed seed replays the
    /// same match.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or an agent cannot be
    /// built.
    pub fn create_match(&self, config: &MatchConfig) -> Result<Moderator<RpsEngine>> {
        config.validate()?;

        let mut engine = RpsEngine::new(config.players)?;
        if let Some(max_streak) = config.max_streak {
            engine = engine.with_max_streak(max_streak);
        }

        let seed = config.seed.or(self.default_seed).unwrap_or_else(random);
        let participants = self.create_participants(config, seed)?;
        Moderator::new(engine, participants)
    }

    fn create_participants(
        &self,
        config: &MatchConfig,
        seed: u64,
    ) -> Result<Vec<Box<dyn Participant<RpsEngine>>>> {
        (0..config.players)
            .map(|index| {
                let kind = config.agents.get(index).unwrap_or(&self.default_agent);
                let name = format!("P{index} ({kind})");
                kind.build(name, seed.wrapping_add(index as u64))
            })
            .collect()
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for constructing [`App`] with custom defaults.
pub struct AppBuilder {
    default_seed: Option<u64>,
    default_agent: Option<AgentKind>,
}

impl AppBuilder {
    fn new() -> Self {
        Self {
            default_seed: None,
            default_agent: None,
        }
    }

    pub fn with_default_seed(mut self, seed: u64) -> Self {
        self.default_seed = Some(seed);
        self
    }

    pub fn with_default_agent(mut self, agent: AgentKind) -> Self {
        self.default_agent = Some(agent);
        self
    }

    pub fn build(self) -> App {
        App {
            default_seed: self.default_seed,
            default_agent: self.default_agent.unwrap_or(AgentKind::Random),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rps::Move;

    #[test]
    fn test_seeded_matches_replay() {
        let app = App::for_testing().with_default_seed(99).build();
        let config = MatchConfig::new(3).with_rounds(25);

        let first = app.create_match(&config).unwrap().run(config.rounds).unwrap();
        let second = app.create_match(&config).unwrap().run(config.rounds).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_agents_follow_config_order() {
        let app = App::new();
        let config = MatchConfig::new(2).with_seed(1).with_agents(vec![
            AgentKind::Scripted(vec![Move::Paper]),
            AgentKind::Scripted(vec![Move::Rock]),
        ]);
        let mut moderator = app.create_match(&config).unwrap();
        assert_eq!(
            moderator.participant_names(),
            vec!["P0 (scripted:p)", "P1 (scripted:r)"]
        );

        let summary = moderator.run(4).unwrap();
        assert_eq!(summary.final_state.round, 4);
        assert_eq!(summary.final_state.streaks.as_slice(), &[4, 4]);
    }

    #[test]
    fn test_streak_limit_is_wired() {
        let app = App::new();
        let config = MatchConfig::new(2)
            .with_seed(3)
            .with_max_streak(2)
            .with_agents(vec![
                AgentKind::Scripted(vec![Move::Rock]),
                AgentKind::Scripted(vec![Move::Paper, Move::Scissors]),
            ]);
        let summary = app.create_match(&config).unwrap().run(5).unwrap();
        // Valid turns 1-2, then P0 keeps repeating Rock and every later turn is invalid.
        assert_eq!(summary.final_state.round, 2);
        assert_eq!(summary.invalid_turns, 3);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let app = App::new();
        assert!(app.create_match(&MatchConfig::new(1)).is_err());
    }
}
