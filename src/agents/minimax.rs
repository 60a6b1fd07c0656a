//! Depth-bounded minimax search

use super::{Agent, EvaluationFn, ScoreEvaluation, next_turn};
use crate::{
    Error, Result,
    grid::{Direction, GameState},
};

/// Minimax agent: the protagonist maximizes, every adversary minimizes.
///
/// Depth counts full rounds: one protagonist move plus one move for each
/// adversary. The evaluation function is applied at the horizon and on
/// states with no legal actions.
pub struct MinimaxAgent {
    depth: usize,
    evaluation: Box<dyn EvaluationFn>,
}

impl MinimaxAgent {
    /// Create a minimax agent evaluating leaves by game score.
    pub fn new(depth: usize) -> Self {
        Self::with_evaluation(depth, Box::new(ScoreEvaluation))
    }

    /// Create a minimax agent with a custom leaf evaluation.
    pub fn with_evaluation(depth: usize, evaluation: Box<dyn EvaluationFn>) -> Self {
        MinimaxAgent { depth, evaluation }
    }

    pub(crate) fn value(&self, state: &GameState, depth: usize, agent: usize) -> Result<f64> {
        let actions = state.legal_actions(agent);
        if depth == self.depth || actions.is_empty() {
            return Ok(self.evaluation.evaluate(state));
        }

        let (next_agent, next_depth) = next_turn(state, agent, depth);
        let mut best = if agent == 0 {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
        for action in actions {
            let successor = state.successor(agent, action)?;
            let value = self.value(&successor, next_depth, next_agent)?;
            best = if agent == 0 {
                best.max(value)
            } else {
                best.min(value)
            };
        }
        Ok(best)
    }
}

impl Agent for MinimaxAgent {
    fn select_action(&mut self, state: &GameState) -> Result<Direction> {
        let actions = state.legal_actions(0);
        let (next_agent, next_depth) = next_turn(state, 0, 0);

        let mut best: Option<(f64, Direction)> = None;
        for action in actions {
            let successor = state.successor(0, action)?;
            let value = self.value(&successor, next_depth, next_agent)?;
            if best.is_none_or(|(best_value, _)| value > best_value) {
                best = Some((value, action));
            }
        }

        best.map(|(_, action)| action)
            .ok_or(Error::NoLegalActions { agent: 0 })
    }

    fn name(&self) -> &str {
        "Minimax"
    }
}
