//! Capture-aware position transition model
//!
//! Given an adversary's hypothetical position and the protagonist's known
//! one, this module builds the distribution over where the adversary will be
//! after one round. The protagonist is assumed equally likely to take any of
//! its legal moves, so an adversary standing on a cell the protagonist can
//! reach is captured with the matching probability; the remaining mass flows
//! through the adversary's own action distribution, with successor cells
//! that are themselves reachable splitting between escape and capture.

use crate::{
    agents::AdversaryModel,
    grid::{Direction, Layout, Position},
    inference::DiscreteDistribution,
};

/// Off-board holding cell for a captured adversary (1-based index).
///
/// The cell sits on the top border wall ring (row 0), so it can never
/// collide with an open maze position.
pub fn capture_position(adversary_index: usize) -> Position {
    Position::new(2 * adversary_index as i32 - 1, 0)
}

/// Distribution over the adversary's next position.
///
/// `adversary_index` is 1-based (agent index). A hypothetical position is
/// treated as having a `Stop` heading, matching how filters place
/// adversaries without history.
pub fn position_distribution(
    layout: &Layout,
    protagonist: Position,
    adversary_index: usize,
    position: Position,
    model: &dyn AdversaryModel,
) -> DiscreteDistribution<Position> {
    let capture = capture_position(adversary_index);
    let mut distribution = DiscreteDistribution::new();

    // Capture is absorbing: a held adversary produces no further motion.
    if position == capture || position == protagonist {
        distribution.set(capture, 1.0);
        return distribution;
    }

    let protagonist_moves = layout.legal_neighbors(protagonist);
    let capture_now = if protagonist_moves.contains(&position) {
        1.0 / protagonist_moves.len() as f64
    } else {
        0.0
    };
    if capture_now > 0.0 {
        distribution.add(capture, capture_now);
    }

    let actions = model.action_distribution(layout, position, Direction::Stop, protagonist, false);
    let action_count = actions.len() as f64;
    let survive = 1.0 - capture_now;
    for (action, probability) in actions {
        let successor = position.step(action);
        if protagonist_moves.contains(&successor) {
            distribution.add(capture, probability * (1.0 / action_count) * survive);
            distribution.add(
                successor,
                probability * ((action_count - 1.0) / action_count) * survive,
            );
        } else {
            distribution.add(successor, probability * survive);
        }
    }

    distribution
}
