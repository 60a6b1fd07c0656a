//! The maze-chase gridworld: layouts, actions, and the game state machine.
//!
//! Agent 0 is always the protagonist; adversaries are agents `1..=N`.

pub mod actions;
pub mod layout;
pub mod state;

pub use actions::{Direction, Position};
pub use layout::{Layout, MEDIUM_LAYOUT, SMALL_LAYOUT};
pub use state::{AdversaryState, GameState, Outcome};
