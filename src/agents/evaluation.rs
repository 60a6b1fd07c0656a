//! Evaluation functions applied at the search horizon

use crate::grid::GameState;

/// Trait for evaluating a game state from the protagonist's perspective.
///
/// Higher values are better for the protagonist. Tree searches call this at
/// their depth horizon and on terminal states.
pub trait EvaluationFn: Send {
    fn evaluate(&self, state: &GameState) -> f64;
}

/// Evaluation that just returns the game score.
///
/// The baseline for tree searches: with this evaluation the search value of
/// a position is exactly its depth-limited game-theoretic score.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreEvaluation;

impl EvaluationFn for ScoreEvaluation {
    fn evaluate(&self, state: &GameState) -> f64 {
        state.score()
    }
}

/// Evaluation combining score, food proximity, adversary danger, and
/// frightened-timer bonus.
///
/// Weights: score dominates (x10), a small pull toward the nearest pellet,
/// a repulsion from adversaries closer than two cells, and a mild bonus
/// while adversaries are edible. Once the maze is cleared the adversary
/// term flips into a large distance reward so the agent coasts out safely.
#[derive(Debug, Clone, Copy, Default)]
pub struct TacticalEvaluation;

impl EvaluationFn for TacticalEvaluation {
    fn evaluate(&self, state: &GameState) -> f64 {
        let position = state.protagonist_position();
        let mut value = state.score() * 10.0;

        let food = state.food_positions();
        if let Some(distance) = food
            .iter()
            .map(|&pellet| position.manhattan_distance(pellet))
            .min()
        {
            value += 2.0 / (distance.max(1) as f64).powi(2);
        }

        let nearest_adversary = state
            .adversaries()
            .iter()
            .map(|a| position.manhattan_distance(a.position))
            .min();
        if let Some(distance) = nearest_adversary {
            if food.is_empty() {
                value += 100_000.0 / (distance.max(1) as f64).powi(2);
            } else if distance < 2 {
                value -= 10.0 / (distance as f64 + 1.0);
            }
        }

        let frightened_total: f64 = state
            .adversaries()
            .iter()
            .map(|a| a.frightened as f64)
            .sum();
        value + frightened_total / 10.0
    }
}
