//! Exact Bayesian filtering over one adversary's position

use std::sync::Arc;

use super::{
    BeliefTracker, DiscreteDistribution, SensorModel, capture_position, position_distribution,
};
use crate::{
    agents::AdversaryModel,
    grid::{Layout, Position},
};

/// Exact dynamic inference via forward-algorithm updates.
///
/// The belief is a full distribution over every open cell plus the capture
/// cell. Observation updates multiply in the sensor likelihood pointwise;
/// time updates push each cell's mass through the transition model. Both
/// renormalize, leaving an all-zero belief untouched (it stays zero until
/// the next reset rather than fabricating mass).
pub struct ExactFilter {
    layout: Arc<Layout>,
    adversary_index: usize,
    model: Box<dyn AdversaryModel>,
    sensor: SensorModel,
    beliefs: DiscreteDistribution<Position>,
}

impl ExactFilter {
    /// Create a filter for the adversary with the given 1-based agent index,
    /// starting from the uniform prior.
    pub fn new(
        layout: Arc<Layout>,
        adversary_index: usize,
        model: Box<dyn AdversaryModel>,
        sensor: SensorModel,
    ) -> Self {
        let mut filter = ExactFilter {
            layout,
            adversary_index,
            model,
            sensor,
            beliefs: DiscreteDistribution::new(),
        };
        filter.reset();
        filter
    }

    /// Every position the adversary could occupy, capture cell included.
    fn support(&self) -> Vec<Position> {
        let mut positions = self.layout.open_cells();
        positions.push(capture_position(self.adversary_index));
        positions
    }
}

impl BeliefTracker for ExactFilter {
    fn name(&self) -> &str {
        "Exact"
    }

    fn reset(&mut self) {
        // Uniform over legal cells only; capture starts with no mass.
        self.beliefs = DiscreteDistribution::uniform(self.layout.open_cells());
    }

    fn observe(&mut self, observations: &[Option<u32>], protagonist: Position) {
        let observation = observations
            .get(self.adversary_index - 1)
            .copied()
            .flatten();
        let capture = capture_position(self.adversary_index);
        for position in self.support() {
            let likelihood = self
                .sensor
                .likelihood(observation, protagonist, position, capture);
            let prior = self.beliefs.get(&position);
            self.beliefs.set(position, likelihood * prior);
        }
        self.beliefs.normalize();
    }

    fn elapse(&mut self, protagonist: Position) {
        let mut next = DiscreteDistribution::new();
        for position in self.support() {
            let mass = self.beliefs.get(&position);
            if mass <= 0.0 {
                continue;
            }
            let transition = position_distribution(
                &self.layout,
                protagonist,
                self.adversary_index,
                position,
                self.model.as_ref(),
            );
            for (successor, probability) in transition.iter() {
                next.add(*successor, probability * mass);
            }
        }
        next.normalize();
        self.beliefs = next;
    }

    fn beliefs(&self) -> DiscreteDistribution<Position> {
        let mut beliefs = self.beliefs.clone();
        beliefs.normalize();
        beliefs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        agents::RandomAdversary,
        grid::{Layout, SMALL_LAYOUT},
    };

    fn filter_with(sensor: SensorModel) -> ExactFilter {
        let layout = Arc::new(Layout::parse(SMALL_LAYOUT).unwrap());
        ExactFilter::new(layout, 1, Box::new(RandomAdversary), sensor)
    }

    #[test]
    fn prior_is_uniform_over_open_cells() {
        let filter = filter_with(SensorModel::standard());
        let beliefs = filter.beliefs();
        let open = filter.layout.open_cells();
        let expected = 1.0 / open.len() as f64;
        for cell in open {
            assert!((beliefs.get(&cell) - expected).abs() < 1e-12);
        }
        assert_eq!(beliefs.get(&capture_position(1)), 0.0);
    }

    #[test]
    fn exact_reading_pins_the_distance_ring() {
        let mut filter = filter_with(SensorModel::with_half_width(0));
        let protagonist = Position::new(1, 1);
        let true_position = Position::new(4, 4);
        let distance = protagonist.manhattan_distance(true_position);

        filter.observe(&[Some(distance)], protagonist);
        let beliefs = filter.beliefs();
        assert!(beliefs.get(&true_position) > 0.0);
        for (position, mass) in beliefs.iter() {
            if mass > 0.0 {
                assert_eq!(protagonist.manhattan_distance(*position), distance);
            }
        }
    }

    #[test]
    fn beliefs_stay_normalized_through_updates() {
        let mut filter = filter_with(SensorModel::standard());
        let protagonist = Position::new(1, 1);
        for step in 0..5 {
            filter.observe(&[Some(4 + step)], protagonist);
            assert!((filter.beliefs().total() - 1.0).abs() < 1e-9);
            filter.elapse(protagonist);
            assert!((filter.beliefs().total() - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn missing_observation_moves_mass_to_capture() {
        let mut filter = filter_with(SensorModel::standard());
        let protagonist = Position::new(1, 1);
        filter.observe(&[None], protagonist);
        let beliefs = filter.beliefs();
        // All prior mass sat on open cells, so the update zeroes everything;
        // normalize leaves the zero belief untouched.
        assert_eq!(beliefs.total(), 0.0);

        // After mass has reached the capture cell via a transition, the
        // same evidence concentrates everything there.
        filter.reset();
        filter.elapse(protagonist);
        filter.observe(&[None], protagonist);
        let beliefs = filter.beliefs();
        assert!((beliefs.get(&capture_position(1)) - 1.0).abs() < 1e-9);
    }
}
