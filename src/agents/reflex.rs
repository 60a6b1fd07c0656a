//! One-step lookahead reflex agent

use rand::{SeedableRng, prelude::IndexedRandom, rngs::StdRng};

use super::Agent;
use crate::{
    Error, Result,
    grid::{Direction, GameState},
};

/// Reflex agent: scores each legal action by a hand-tuned evaluation of the
/// immediate successor state and picks uniformly among the best.
///
/// The successor evaluation rewards pellet proximity and the game score,
/// penalizes standing next to an adversary, and values frightened time.
pub struct ReflexAgent {
    rng: StdRng,
}

impl ReflexAgent {
    /// Create a reflex agent with an OS-seeded tie-break generator.
    pub fn new() -> Self {
        ReflexAgent {
            rng: StdRng::seed_from_u64(rand::random::<u64>()),
        }
    }

    /// Create a reflex agent with a fixed seed.
    pub fn with_seed(seed: u64) -> Self {
        ReflexAgent {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn successor_value(&self, state: &GameState, action: Direction) -> Result<f64> {
        let successor = state.successor(0, action)?;
        let position = successor.protagonist_position();
        let food = successor.food_positions();

        let mut value = successor.score();

        if let Some(distance) = successor
            .adversaries()
            .iter()
            .map(|a| position.manhattan_distance(a.position))
            .min()
        {
            if food.is_empty() {
                value += 1_000.0 / (distance.max(1) as f64).powi(2);
            } else if distance < 2 {
                value -= (2 - distance) as f64 * 20.0;
            }
        }

        if let Some(distance) = food
            .iter()
            .map(|&pellet| position.manhattan_distance(pellet))
            .min()
        {
            value += 9.0 / (distance.max(1) as f64).powi(2);
        }

        let frightened_total: f64 = successor
            .adversaries()
            .iter()
            .map(|a| a.frightened as f64)
            .sum();
        Ok(value + frightened_total)
    }
}

impl Default for ReflexAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for ReflexAgent {
    fn select_action(&mut self, state: &GameState) -> Result<Direction> {
        let actions = state.legal_actions(0);
        if actions.is_empty() {
            return Err(Error::NoLegalActions { agent: 0 });
        }

        let mut scored = Vec::with_capacity(actions.len());
        for action in actions {
            scored.push((action, self.successor_value(state, action)?));
        }

        let best = scored
            .iter()
            .map(|(_, value)| *value)
            .fold(f64::NEG_INFINITY, f64::max);
        let candidates: Vec<Direction> = scored
            .into_iter()
            .filter(|(_, value)| *value == best)
            .map(|(action, _)| action)
            .collect();

        candidates
            .choose(&mut self.rng)
            .copied()
            .ok_or(Error::NoLegalActions { agent: 0 })
    }

    fn name(&self) -> &str {
        "Reflex"
    }

    fn set_rng_seed(&mut self, seed: u64) -> Result<()> {
        self.rng = StdRng::seed_from_u64(seed);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::grid::{Layout, SMALL_LAYOUT};

    #[test]
    fn selects_legal_action() {
        let state = GameState::initial(Arc::new(Layout::parse(SMALL_LAYOUT).unwrap()));
        let mut agent = ReflexAgent::with_seed(7);
        let action = agent.select_action(&state).unwrap();
        assert!(state.legal_actions(0).contains(&action));
    }

    #[test]
    fn deterministic_under_seed() {
        let state = GameState::initial(Arc::new(Layout::parse(SMALL_LAYOUT).unwrap()));
        let mut first = ReflexAgent::with_seed(42);
        let mut second = ReflexAgent::with_seed(42);
        assert_eq!(
            first.select_action(&state).unwrap(),
            second.select_action(&state).unwrap()
        );
    }
}
