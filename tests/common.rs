//! Shared fixtures for integration tests
#![allow(dead_code)]

use std::sync::Arc;

use gridchase::grid::{GameState, Layout, MEDIUM_LAYOUT, SMALL_LAYOUT};

/// Dead-end corridor with two pellets and no adversary.
pub const CORRIDOR: &str = "\
%%%%%
%P..%
%%%%%";

/// Corridor with the last pellet between the protagonist and an adversary:
/// taking it wins before contact is possible.
pub const STANDOFF: &str = "\
%%%%%
%P.G%
%%%%%";

pub fn small_layout() -> Arc<Layout> {
    Arc::new(Layout::parse(SMALL_LAYOUT).expect("small layout parses"))
}

pub fn medium_layout() -> Arc<Layout> {
    Arc::new(Layout::parse(MEDIUM_LAYOUT).expect("medium layout parses"))
}

pub fn corridor_state() -> GameState {
    GameState::initial(Arc::new(Layout::parse(CORRIDOR).expect("corridor parses")))
}

pub fn standoff_state() -> GameState {
    GameState::initial(Arc::new(Layout::parse(STANDOFF).expect("standoff parses")))
}

pub fn small_state() -> GameState {
    GameState::initial(small_layout())
}

pub fn medium_state() -> GameState {
    GameState::initial(medium_layout())
}

/// Advance a hidden adversary one step by sampling the same transition
/// model the filters predict with, so the true trajectory always has
/// positive probability under every filter's dynamics.
pub fn model_consistent_step<R: rand::Rng>(
    rng: &mut R,
    layout: &Layout,
    protagonist: gridchase::grid::Position,
    adversary_index: usize,
    position: gridchase::grid::Position,
) -> gridchase::grid::Position {
    gridchase::inference::position_distribution(
        layout,
        protagonist,
        adversary_index,
        position,
        &gridchase::agents::RandomAdversary,
    )
    .sample(rng)
    .unwrap_or(position)
}

/// Noisy reading for a true adversary position, `None` once captured.
pub fn reading_for<R: rand::Rng>(
    rng: &mut R,
    sensor: &gridchase::inference::SensorModel,
    protagonist: gridchase::grid::Position,
    adversary_index: usize,
    position: gridchase::grid::Position,
) -> Option<u32> {
    if position == gridchase::inference::capture_position(adversary_index) {
        None
    } else {
        Some(sensor.sample_reading(rng, protagonist.manhattan_distance(position)))
    }
}
