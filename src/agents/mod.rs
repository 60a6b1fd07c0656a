//! Action-selecting agents for the protagonist
//!
//! The adversarial search engine lives here: a reflex baseline, plain
//! minimax, minimax with alpha-beta pruning, and expectimax against
//! uniformly random adversaries. All agents share the [`Agent`] trait and a
//! pluggable [`EvaluationFn`] applied at the search horizon.

pub mod adversary;
pub mod alphabeta;
pub mod evaluation;
pub mod expectimax;
pub mod minimax;
pub mod reflex;

use std::{fmt, str::FromStr};

use crate::{
    Error, Result,
    grid::{Direction, GameState},
};

pub use adversary::{AdversaryKind, AdversaryModel, PursuitAdversary, RandomAdversary};
pub use alphabeta::AlphaBetaAgent;
pub use evaluation::{EvaluationFn, ScoreEvaluation, TacticalEvaluation};
pub use expectimax::ExpectimaxAgent;
pub use minimax::MinimaxAgent;
pub use reflex::ReflexAgent;

/// Unified interface for protagonist action selection.
///
/// Implementations analyze the current state and return one of its legal
/// actions for agent 0. Agents that randomize (tie-breaking) accept a seed
/// for reproducible runs.
pub trait Agent: Send {
    /// Select an action for the protagonist in the given state.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoLegalActions`] on terminal states.
    fn select_action(&mut self, state: &GameState) -> Result<Direction>;

    /// The agent's display name.
    fn name(&self) -> &str;

    /// Seed the agent's internal random number generator.
    ///
    /// Deterministic agents can use the default no-op implementation.
    fn set_rng_seed(&mut self, _seed: u64) -> Result<()> {
        Ok(())
    }
}

/// Which search agent to construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentKind {
    Reflex,
    Minimax,
    AlphaBeta,
    Expectimax,
}

impl AgentKind {
    /// All selectable kinds.
    pub const ALL: [AgentKind; 4] = [
        AgentKind::Reflex,
        AgentKind::Minimax,
        AgentKind::AlphaBeta,
        AgentKind::Expectimax,
    ];

    /// Creates a boxed agent of this kind.
    ///
    /// `depth` is the search horizon in full rounds; the reflex agent
    /// ignores it. Tree searches default to the tactical evaluation.
    pub fn into_boxed_agent(self, depth: usize) -> Box<dyn Agent> {
        match self {
            AgentKind::Reflex => Box::new(ReflexAgent::new()),
            AgentKind::Minimax => Box::new(MinimaxAgent::with_evaluation(
                depth,
                Box::new(TacticalEvaluation),
            )),
            AgentKind::AlphaBeta => Box::new(AlphaBetaAgent::with_evaluation(
                depth,
                Box::new(TacticalEvaluation),
            )),
            AgentKind::Expectimax => Box::new(ExpectimaxAgent::with_evaluation(
                depth,
                Box::new(TacticalEvaluation),
            )),
        }
    }
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AgentKind::Reflex => "reflex",
            AgentKind::Minimax => "minimax",
            AgentKind::AlphaBeta => "alphabeta",
            AgentKind::Expectimax => "expectimax",
        };
        write!(f, "{name}")
    }
}

impl FromStr for AgentKind {
    type Err = Error;

    fn from_str(input: &str) -> Result<Self> {
        match input.to_ascii_lowercase().as_str() {
            "reflex" => Ok(AgentKind::Reflex),
            "minimax" => Ok(AgentKind::Minimax),
            "alphabeta" | "alpha-beta" => Ok(AgentKind::AlphaBeta),
            "expectimax" => Ok(AgentKind::Expectimax),
            _ => Err(Error::ParseAgentKind {
                input: input.to_string(),
                expected: "reflex, minimax, alphabeta, expectimax".to_string(),
            }),
        }
    }
}

/// Turn order bookkeeping: the agent after `agent`, and the depth the
/// search enters when play wraps back to the protagonist.
pub(crate) fn next_turn(state: &GameState, agent: usize, depth: usize) -> (usize, usize) {
    if agent + 1 >= state.num_agents() {
        (0, depth + 1)
    } else {
        (agent + 1, depth)
    }
}
