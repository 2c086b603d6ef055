//! Participants for Rock-Paper-Scissors

use std::{fmt, str::FromStr};

use rand::{Rng, SeedableRng, random, rngs::StdRng};
use serde::{Deserialize, Serialize};

use super::{RpsView, engine::RpsEngine, engine::RpsStateView, moves::Move};
use crate::{Error, Outcome, Result, ports::Participant, types::PlayerId};

/// Kinds of built-in agents, as named on the command line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AgentKind {
    /// Uniformly random throws
    Random,
    /// Repeats a fixed cycle of throws
    Scripted(Vec<Move>),
    /// Keeps a winning or tying throw, switches after a loss
    WinStayLoseShift,
}

impl AgentKind {
    pub const EXPECTED: &'static str = "random, wsls, scripted:<moves> (e.g. scripted:rps)";

    /// Build the participant for `seed`.
    pub fn build(&self, name: String, seed: u64) -> Result<Box<dyn Participant<RpsEngine>>> {
        let agent: Box<dyn Participant<RpsEngine>> = match self {
            AgentKind::Random => Box::new(RandomAgent::with_seed(name, seed)),
            AgentKind::Scripted(moves) => Box::new(ScriptedAgent::new(name, moves.clone())?),
            AgentKind::WinStayLoseShift => Box::new(WinStayLoseShiftAgent::with_seed(name, seed)),
        };
        Ok(agent)
    }

    pub fn label(&self) -> &'static str {
        match self {
            AgentKind::Random => "random",
            AgentKind::Scripted(_) => "scripted",
            AgentKind::WinStayLoseShift => "wsls",
        }
    }
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgentKind::Scripted(moves) => {
                let script: String = moves
                    .iter()
                    .map(|mv| mv.name().chars().next().unwrap_or('?'))
                    .collect();
                write!(f, "scripted:{}", script.to_ascii_lowercase())
            }
            other => f.write_str(other.label()),
        }
    }
}

impl FromStr for AgentKind {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let token = s.trim().to_ascii_lowercase();
        match token.as_str() {
            "random" => return Ok(AgentKind::Random),
            "wsls" | "win-stay-lose-shift" => return Ok(AgentKind::WinStayLoseShift),
            _ => {}
        }

        let unknown = || Error::UnknownAgent {
            input: s.to_string(),
            expected: Self::EXPECTED.to_string(),
        };
        let script = token.strip_prefix("scripted:").ok_or_else(unknown)?;
        let moves = script
            .chars()
            .map(|c| c.to_string().parse::<Move>())
            .collect::<Result<Vec<_>>>()
            .map_err(|_| unknown())?;
        if moves.is_empty() {
            return Err(unknown());
        }
        Ok(AgentKind::Scripted(moves))
    }
}

/// Throws uniformly at random
pub struct RandomAgent {
    name: String,
    rng: StdRng,
}

impl RandomAgent {
    /// Create a random agent with a non-deterministic seed
    pub fn new(name: String) -> Self {
        Self::with_seed(name, random())
    }

    /// Create a random agent with a deterministic seed
    pub fn with_seed(name: String, seed: u64) -> Self {
        Self {
            name,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Participant<RpsEngine> for RandomAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn choose_move(&mut self, _player: PlayerId, _state: &RpsStateView) -> Move {
        Move::ALL[self.rng.random_range(0..Move::ALL.len())]
    }
}

/// Repeats a fixed cycle of throws
pub struct ScriptedAgent {
    name: String,
    script: Vec<Move>,
    cursor: usize,
}

impl ScriptedAgent {
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] for an empty script.
    pub fn new(name: String, script: Vec<Move>) -> Result<Self> {
        if script.is_empty() {
            return Err(Error::InvalidConfiguration {
                message: format!("scripted agent '{name}' needs at least one move"),
            });
        }
        Ok(Self {
            name,
            script,
            cursor: 0,
        })
    }
}

impl Participant<RpsEngine> for ScriptedAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn choose_move(&mut self, _player: PlayerId, _state: &RpsStateView) -> Move {
        let mv = self.script[self.cursor % self.script.len()];
        self.cursor += 1;
        mv
    }
}

/// Keeps a throw that did not lose; after a loss, switches to the throw that
/// beats whatever beat it.
///
/// Learns only from its own personalized view. An invalid turn it caused
/// makes it pick a different throw.
pub struct WinStayLoseShiftAgent {
    name: String,
    rng: StdRng,
    next: Option<Move>,
}

impl WinStayLoseShiftAgent {
    pub fn new(name: String) -> Self {
        Self::with_seed(name, random())
    }

    pub fn with_seed(name: String, seed: u64) -> Self {
        Self {
            name,
            rng: StdRng::seed_from_u64(seed),
            next: None,
        }
    }

    fn react(&self, view: &RpsView) -> Option<Move> {
        if !view.validity().overall() {
            return if view.validity().personal() {
                self.next.map(Move::counter)
            } else {
                self.next
            };
        }

        let action = view.action()?;
        let utility = view.utilities()?.personal;
        let mine = action.moves.personal;
        if utility >= 0.0 {
            Some(mine)
        } else {
            action
                .moves
                .opponents
                .iter()
                .find(|theirs| theirs.beats(mine))
                .map(|theirs| theirs.counter())
        }
    }
}

impl Participant<RpsEngine> for WinStayLoseShiftAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn choose_move(&mut self, _player: PlayerId, _state: &RpsStateView) -> Move {
        match self.next {
            Some(mv) => mv,
            None => Move::ALL[self.rng.random_range(0..Move::ALL.len())],
        }
    }

    fn on_outcome(&mut self, outcome: RpsView) {
        self.next = self.react(&outcome);
    }
}
