//! Adversary policy models
//!
//! An [`AdversaryModel`] maps an adversary's situation to a distribution
//! over its legal actions. The same models drive simulated adversaries in
//! the pipeline and the transition step of every belief filter, so the
//! filters' predictions stay consistent with how adversaries actually move.

use std::{fmt, str::FromStr};

use crate::{
    Error, Result,
    grid::{Direction, Layout, Position},
};

/// Trait for adversary behavior.
pub trait AdversaryModel: Send {
    /// The model's display name.
    fn name(&self) -> &str;

    /// Distribution over legal actions for an adversary at `position`.
    ///
    /// `heading` is the adversary's current facing (`Stop` for a fresh spawn
    /// or a hypothetical placement during inference, which lifts the
    /// no-reversal rule). The returned weights sum to 1 whenever the
    /// position has at least one legal action.
    fn action_distribution(
        &self,
        layout: &Layout,
        position: Position,
        heading: Direction,
        protagonist: Position,
        frightened: bool,
    ) -> Vec<(Direction, f64)>;
}

/// Adversary that moves uniformly at random.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomAdversary;

impl AdversaryModel for RandomAdversary {
    fn name(&self) -> &str {
        "Random"
    }

    fn action_distribution(
        &self,
        layout: &Layout,
        position: Position,
        heading: Direction,
        _protagonist: Position,
        _frightened: bool,
    ) -> Vec<(Direction, f64)> {
        let actions = layout.adversary_directions(position, heading);
        let probability = 1.0 / actions.len().max(1) as f64;
        actions.into_iter().map(|a| (a, probability)).collect()
    }
}

/// Adversary that chases the protagonist (and flees while frightened).
///
/// With probability `attack` it picks uniformly among the distance-best
/// actions; the remaining mass is spread uniformly over all legal actions.
#[derive(Debug, Clone, Copy)]
pub struct PursuitAdversary {
    attack: f64,
}

impl PursuitAdversary {
    /// Create a pursuit adversary committing the given probability mass to
    /// its best actions. Clamped to `[0, 1]`.
    pub fn new(attack: f64) -> Self {
        PursuitAdversary {
            attack: attack.clamp(0.0, 1.0),
        }
    }
}

impl Default for PursuitAdversary {
    fn default() -> Self {
        PursuitAdversary::new(0.8)
    }
}

impl AdversaryModel for PursuitAdversary {
    fn name(&self) -> &str {
        "Pursuit"
    }

    fn action_distribution(
        &self,
        layout: &Layout,
        position: Position,
        heading: Direction,
        protagonist: Position,
        frightened: bool,
    ) -> Vec<(Direction, f64)> {
        let actions = layout.adversary_directions(position, heading);
        if actions.is_empty() {
            return Vec::new();
        }

        let distances: Vec<u32> = actions
            .iter()
            .map(|&a| position.step(a).manhattan_distance(protagonist))
            .collect();
        let target = if frightened {
            *distances.iter().max().expect("actions are non-empty")
        } else {
            *distances.iter().min().expect("actions are non-empty")
        };
        let best_count = distances.iter().filter(|&&d| d == target).count();

        let base = (1.0 - self.attack) / actions.len() as f64;
        actions
            .iter()
            .zip(&distances)
            .map(|(&action, &distance)| {
                let mut weight = base;
                if distance == target {
                    weight += self.attack / best_count as f64;
                }
                (action, weight)
            })
            .collect()
    }
}

/// Which adversary model to construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdversaryKind {
    Random,
    Pursuit,
}

impl AdversaryKind {
    /// Creates a boxed adversary model of this kind.
    pub fn into_boxed_model(self) -> Box<dyn AdversaryModel> {
        match self {
            AdversaryKind::Random => Box::new(RandomAdversary),
            AdversaryKind::Pursuit => Box::new(PursuitAdversary::default()),
        }
    }
}

impl fmt::Display for AdversaryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AdversaryKind::Random => "random",
            AdversaryKind::Pursuit => "pursuit",
        };
        write!(f, "{name}")
    }
}

impl FromStr for AdversaryKind {
    type Err = Error;

    fn from_str(input: &str) -> Result<Self> {
        match input.to_ascii_lowercase().as_str() {
            "random" => Ok(AdversaryKind::Random),
            "pursuit" => Ok(AdversaryKind::Pursuit),
            _ => Err(Error::ParseAdversaryKind {
                input: input.to_string(),
                expected: "random, pursuit".to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::SMALL_LAYOUT;

    fn layout() -> Layout {
        Layout::parse(SMALL_LAYOUT).unwrap()
    }

    #[test]
    fn random_distribution_is_uniform() {
        let layout = layout();
        let distribution = RandomAdversary.action_distribution(
            &layout,
            Position::new(4, 4),
            Direction::Stop,
            Position::new(1, 1),
            false,
        );
        assert!(!distribution.is_empty());
        let total: f64 = distribution.iter().map(|(_, p)| p).sum();
        assert!((total - 1.0).abs() < 1e-9);
        let first = distribution[0].1;
        assert!(distribution.iter().all(|(_, p)| (*p - first).abs() < 1e-9));
    }

    #[test]
    fn pursuit_favors_closing_moves() {
        let layout = layout();
        // Adversary at (4,4), protagonist at (1,4): West closes distance.
        let distribution = PursuitAdversary::default().action_distribution(
            &layout,
            Position::new(4, 4),
            Direction::Stop,
            Position::new(1, 4),
            false,
        );
        let west = distribution
            .iter()
            .find(|(a, _)| *a == Direction::West)
            .map(|(_, p)| *p)
            .unwrap();
        for (action, probability) in &distribution {
            if *action != Direction::West {
                assert!(west > *probability, "{action} {probability} vs West {west}");
            }
        }
    }

    #[test]
    fn frightened_pursuit_flees() {
        let layout = layout();
        let distribution = PursuitAdversary::default().action_distribution(
            &layout,
            Position::new(4, 4),
            Direction::Stop,
            Position::new(1, 4),
            true,
        );
        let east = distribution
            .iter()
            .find(|(a, _)| *a == Direction::East)
            .map(|(_, p)| *p)
            .unwrap();
        let west = distribution
            .iter()
            .find(|(a, _)| *a == Direction::West)
            .map(|(_, p)| *p)
            .unwrap();
        assert!(east > west);
    }

    #[test]
    fn distributions_sum_to_one() {
        let layout = layout();
        for position in layout.open_cells() {
            let distribution = PursuitAdversary::default().action_distribution(
                &layout,
                position,
                Direction::Stop,
                Position::new(1, 1),
                false,
            );
            let total: f64 = distribution.iter().map(|(_, p)| p).sum();
            assert!((total - 1.0).abs() < 1e-9, "at {position}: {total}");
        }
    }
}
