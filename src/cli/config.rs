//! Shared configuration types for CLI commands

use clap::Args;

use crate::{app::MatchConfig, rps::AgentKind};

/// Match options shared by `play` and `simulate`
#[derive(Args, Debug, Clone)]
pub struct MatchArgs {
    /// Number of participants
    #[arg(long, short = 'p', default_value_t = 2)]
    pub players: usize,

    /// Number of turns to play
    #[arg(long, short = 'r', default_value_t = 10)]
    pub rounds: usize,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Longest allowed run of the same throw
    #[arg(long)]
    pub max_streak: Option<u32>,

    /// Agent per participant, comma separated (random, wsls, scripted:<moves>)
    #[arg(long, value_delimiter = ',')]
    pub agents: Vec<AgentKind>,
}

impl MatchArgs {
    pub fn to_config(&self) -> MatchConfig {
        let mut config = MatchConfig::new(self.players)
            .with_rounds(self.rounds)
            .with_agents(self.agents.clone());
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        if let Some(max_streak) = self.max_streak {
            config = config.with_max_streak(max_streak);
        }
        config
    }
}
