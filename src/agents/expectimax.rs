//! Expectimax search against randomizing adversaries

use super::{Agent, EvaluationFn, ScoreEvaluation, next_turn};
use crate::{
    Error, Result,
    grid::{Direction, GameState},
};

/// Expectimax agent: adversary turns are chance nodes.
///
/// Each adversary is modeled as choosing uniformly at random among its legal
/// actions, so adversary nodes take the mean of their children instead of
/// the minimum. Against adversaries that actually randomize this is the
/// correct expectation; against optimal play minimax is the safer choice.
pub struct ExpectimaxAgent {
    depth: usize,
    evaluation: Box<dyn EvaluationFn>,
}

impl ExpectimaxAgent {
    /// Create an expectimax agent evaluating leaves by game score.
    pub fn new(depth: usize) -> Self {
        Self::with_evaluation(depth, Box::new(ScoreEvaluation))
    }

    /// Create an expectimax agent with a custom leaf evaluation.
    pub fn with_evaluation(depth: usize, evaluation: Box<dyn EvaluationFn>) -> Self {
        ExpectimaxAgent { depth, evaluation }
    }

    pub(crate) fn value(&self, state: &GameState, depth: usize, agent: usize) -> Result<f64> {
        let actions = state.legal_actions(agent);
        if depth == self.depth || actions.is_empty() {
            return Ok(self.evaluation.evaluate(state));
        }

        let (next_agent, next_depth) = next_turn(state, agent, depth);
        if agent == 0 {
            let mut best = f64::NEG_INFINITY;
            for action in actions {
                let successor = state.successor(agent, action)?;
                best = best.max(self.value(&successor, next_depth, next_agent)?);
            }
            Ok(best)
        } else {
            let count = actions.len() as f64;
            let mut total = 0.0;
            for action in actions {
                let successor = state.successor(agent, action)?;
                total += self.value(&successor, next_depth, next_agent)?;
            }
            Ok(total / count)
        }
    }
}

impl Agent for ExpectimaxAgent {
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
        "Expectimax"
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{
        agents::MinimaxAgent,
        grid::{Layout, SMALL_LAYOUT},
    };

    #[test]
    fn selects_legal_action() {
        let layout = Arc::new(Layout::parse(SMALL_LAYOUT).unwrap());
        let state = GameState::initial(layout);
        let mut agent = ExpectimaxAgent::new(2);
        let action = agent.select_action(&state).unwrap();
        assert!(state.legal_actions(0).contains(&action));
    }

    #[test]
    fn chance_value_never_below_worst_case() {
        // Averaging over adversary actions can only improve on the
        // minimizing adversary, position by position.
        let layout = Arc::new(Layout::parse(SMALL_LAYOUT).unwrap());
        let state = GameState::initial(layout);

        let expectimax = ExpectimaxAgent::new(2);
        let minimax = MinimaxAgent::new(2);
        for action in state.legal_actions(0) {
            let successor = state.successor(0, action).unwrap();
            let expected = expectimax.value(&successor, 0, 1).unwrap();
            let worst = minimax.value(&successor, 0, 1).unwrap();
            assert!(
                expected >= worst - 1e-9,
                "action {action}: {expected} < {worst}"
            );
        }
    }
}
