//! Game state and successor generation
//!
//! The state machine follows classic maze-chase rules: the protagonist
//! (agent 0) eats pellets for points under a per-move time penalty, clearing
//! the maze wins, touching an unfrightened adversary loses, energizers make
//! adversaries edible for a fixed number of their moves.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{
    actions::{Direction, Position},
    layout::Layout,
};
use crate::{Error, Result, types::scoring};

/// How an episode ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// All food eaten.
    Won,
    /// Caught by an adversary.
    Lost,
}

/// A chasing adversary: position, facing, and remaining frightened moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdversaryState {
    pub position: Position,
    pub heading: Direction,
    pub frightened: u32,
}

impl AdversaryState {
    fn at(position: Position) -> Self {
        AdversaryState {
            position,
            heading: Direction::Stop,
            frightened: 0,
        }
    }

    /// Whether this adversary is currently edible.
    pub fn is_frightened(&self) -> bool {
        self.frightened > 0
    }
}

/// Full game state: agent 0 is the protagonist, agents 1..=N the adversaries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    #[serde(skip, default = "empty_layout")]
    layout: Arc<Layout>,
    protagonist: Position,
    adversaries: Vec<AdversaryState>,
    food: Vec<bool>,
    food_remaining: usize,
    energizers: Vec<Position>,
    score: f64,
    outcome: Option<Outcome>,
}

fn empty_layout() -> Arc<Layout> {
    // Only reached when deserializing a snapshot; callers re-attach the
    // layout with `with_layout` before using movement queries.
    Arc::new(Layout::parse("%%%\n%P%\n%%%").expect("static layout is valid"))
}

impl GameState {
    /// Starting state for a layout.
    pub fn initial(layout: Arc<Layout>) -> Self {
        let food = layout.initial_food();
        let food_remaining = food.iter().filter(|&&f| f).count();
        GameState {
            protagonist: layout.protagonist_spawn(),
            adversaries: layout
                .adversary_spawns()
                .iter()
                .map(|&p| AdversaryState::at(p))
                .collect(),
            food,
            food_remaining,
            energizers: layout.energizers().to_vec(),
            score: 0.0,
            outcome: None,
            layout,
        }
    }

    /// Re-attach a layout after deserialization.
    pub fn with_layout(mut self, layout: Arc<Layout>) -> Self {
        self.layout = layout;
        self
    }

    /// The maze geometry this state lives on.
    pub fn layout(&self) -> &Arc<Layout> {
        &self.layout
    }

    /// Total number of agents (protagonist plus adversaries).
    pub fn num_agents(&self) -> usize {
        1 + self.adversaries.len()
    }

    /// Protagonist position.
    pub fn protagonist_position(&self) -> Position {
        self.protagonist
    }

    /// Adversary states, 0-based. Agent index `i` maps to entry `i - 1`.
    pub fn adversaries(&self) -> &[AdversaryState] {
        &self.adversaries
    }

    /// Position of the adversary with the given agent index (1-based).
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownAgent`] if the index is 0 or out of range.
    pub fn adversary_position(&self, agent: usize) -> Result<Position> {
        self.adversary(agent).map(|a| a.position)
    }

    fn adversary(&self, agent: usize) -> Result<&AdversaryState> {
        if agent == 0 || agent > self.adversaries.len() {
            return Err(Error::UnknownAgent {
                agent,
                num_agents: self.num_agents(),
            });
        }
        Ok(&self.adversaries[agent - 1])
    }

    /// Current score.
    pub fn score(&self) -> f64 {
        self.score
    }

    /// Number of uneaten pellets.
    pub fn food_remaining(&self) -> usize {
        self.food_remaining
    }

    /// Whether the cell still holds a pellet.
    pub fn has_food(&self, position: Position) -> bool {
        !self.layout.is_wall(position) && self.food[self.layout.cell_index(position)]
    }

    /// Positions of uneaten pellets, row-major.
    pub fn food_positions(&self) -> Vec<Position> {
        self.layout
            .open_cells()
            .into_iter()
            .filter(|&p| self.food[self.layout.cell_index(p)])
            .collect()
    }

    /// Remaining energizer cells.
    pub fn energizers(&self) -> &[Position] {
        &self.energizers
    }

    /// Whether the episode is over.
    pub fn is_terminal(&self) -> bool {
        self.outcome.is_some()
    }

    /// Final outcome, if the episode is over.
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Legal actions for an agent. Empty once the episode is over.
    ///
    /// The protagonist may always stand still; adversaries must keep moving
    /// and may not reverse their heading unless the maze forces it.
    pub fn legal_actions(&self, agent: usize) -> Vec<Direction> {
        if self.is_terminal() {
            return Vec::new();
        }
        if agent == 0 {
            let mut actions = self.layout.open_directions(self.protagonist);
            actions.push(Direction::Stop);
            return actions;
        }
        let Ok(adversary) = self.adversary(agent) else {
            return Vec::new();
        };
        self.layout
            .adversary_directions(adversary.position, adversary.heading)
    }

    /// State after the given agent takes the given action.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EpisodeOver`] on terminal states,
    /// [`Error::UnknownAgent`] for bad indices, and
    /// [`Error::IllegalAction`] for actions not in [`Self::legal_actions`].
    pub fn successor(&self, agent: usize, action: Direction) -> Result<GameState> {
        if self.is_terminal() {
            return Err(Error::EpisodeOver);
        }
        if agent >= self.num_agents() {
            return Err(Error::UnknownAgent {
                agent,
                num_agents: self.num_agents(),
            });
        }
        if !self.legal_actions(agent).contains(&action) {
            return Err(Error::IllegalAction { agent, action });
        }

        let mut next = self.clone();
        if agent == 0 {
            next.move_protagonist(action);
        } else {
            next.move_adversary(agent - 1, action);
        }
        Ok(next)
    }

    fn move_protagonist(&mut self, action: Direction) {
        self.protagonist = self.protagonist.step(action);
        self.score -= scoring::TIME;

        let index = self.layout.cell_index(self.protagonist);
        if self.food[index] {
            self.food[index] = false;
            self.food_remaining -= 1;
            self.score += scoring::FOOD;
            if self.food_remaining == 0 {
                self.score += scoring::WIN;
                self.outcome = Some(Outcome::Won);
                return;
            }
        }

        if let Some(slot) = self.energizers.iter().position(|&e| e == self.protagonist) {
            self.energizers.swap_remove(slot);
            for adversary in &mut self.adversaries {
                adversary.frightened = scoring::FRIGHT_MOVES;
            }
        }

        self.resolve_contacts();
    }

    fn move_adversary(&mut self, slot: usize, action: Direction) {
        let adversary = &mut self.adversaries[slot];
        adversary.position = adversary.position.step(action);
        adversary.heading = action;
        adversary.frightened = adversary.frightened.saturating_sub(1);
        self.resolve_contacts();
    }

    fn resolve_contacts(&mut self) {
        let spawns = self.layout.adversary_spawns().to_vec();
        for (slot, adversary) in self.adversaries.iter_mut().enumerate() {
            if adversary.position != self.protagonist {
                continue;
            }
            if adversary.is_frightened() {
                self.score += scoring::CAPTURE;
                adversary.position = spawns[slot];
                adversary.heading = Direction::Stop;
                adversary.frightened = 0;
            } else {
                self.score -= scoring::LOSS;
                self.outcome = Some(Outcome::Lost);
                return;
            }
        }
    }
}
