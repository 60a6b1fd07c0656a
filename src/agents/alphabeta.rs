//! Minimax with alpha-beta pruning

use super::{Agent, EvaluationFn, ScoreEvaluation, next_turn};
use crate::{
    Error, Result,
    grid::{Direction, GameState},
};

/// Alpha-beta agent: minimax values with branch pruning.
///
/// Cutoffs are strict (`value > beta` at a max node, `value < alpha` at a
/// min node), never on equality, so the action returned is always identical
/// to the one plain minimax would pick; pruning only skips subtrees that
/// cannot change it.
pub struct AlphaBetaAgent {
    depth: usize,
    evaluation: Box<dyn EvaluationFn>,
}

impl AlphaBetaAgent {
    /// Create an alpha-beta agent evaluating leaves by game score.
    pub fn new(depth: usize) -> Self {
        Self::with_evaluation(depth, Box::new(ScoreEvaluation))
    }

    /// Create an alpha-beta agent with a custom leaf evaluation.
    pub fn with_evaluation(depth: usize, evaluation: Box<dyn EvaluationFn>) -> Self {
        AlphaBetaAgent { depth, evaluation }
    }

    pub(crate) fn value(
        &self,
        state: &GameState,
        depth: usize,
        agent: usize,
        mut alpha: f64,
        mut beta: f64,
    ) -> Result<f64> {
        let actions = state.legal_actions(agent);
        if depth == self.depth || actions.is_empty() {
            return Ok(self.evaluation.evaluate(state));
        }

        let (next_agent, next_depth) = next_turn(state, agent, depth);
        if agent == 0 {
            let mut best = f64::NEG_INFINITY;
            for action in actions {
                let successor = state.successor(agent, action)?;
                let value = self.value(&successor, next_depth, next_agent, alpha, beta)?;
                if value > best {
                    best = value;
                }
                if best > beta {
                    return Ok(best);
                }
                if best > alpha {
                    alpha = best;
                }
            }
            Ok(best)
        } else {
            let mut best = f64::INFINITY;
            for action in actions {
                let successor = state.successor(agent, action)?;
                let value = self.value(&successor, next_depth, next_agent, alpha, beta)?;
                if value < best {
                    best = value;
                }
                if best < alpha {
                    return Ok(best);
                }
                if best < beta {
                    beta = best;
                }
            }
            Ok(best)
        }
    }
}

impl Agent for AlphaBetaAgent {
    fn select_action(&mut self, state: &GameState) -> Result<Direction> {
        let actions = state.legal_actions(0);
        let (next_agent, next_depth) = next_turn(state, 0, 0);

        let mut alpha = f64::NEG_INFINITY;
        let beta = f64::INFINITY;
        let mut best: Option<(f64, Direction)> = None;
        for action in actions {
            let successor = state.successor(0, action)?;
            let value = self.value(&successor, next_depth, next_agent, alpha, beta)?;
            if best.is_none_or(|(best_value, _)| value > best_value) {
                best = Some((value, action));
            }
            if value > alpha {
                alpha = value;
            }
        }

        best.map(|(_, action)| action)
            .ok_or(Error::NoLegalActions { agent: 0 })
    }

    fn name(&self) -> &str {
        "AlphaBeta"
    }
}
