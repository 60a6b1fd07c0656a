//! Particle filtering over one adversary's position

use std::sync::Arc;

use rand::{SeedableRng, rngs::StdRng};

use super::{
    BeliefTracker, DiscreteDistribution, SensorModel, capture_position, position_distribution,
};
use crate::{
    agents::AdversaryModel,
    grid::{Layout, Position},
    types::ParticleCount,
};

/// Approximate inference with a fixed-size particle set.
///
/// Particles start evenly (not randomly) spread over the open cells so the
/// prior is uniform up to integer rounding. Observations weight each
/// particle by the sensor likelihood and resample; a reading that zeroes
/// every particle collapses the set back to the uniform spread. Capture
/// evidence (`None`) pins every particle to the capture cell.
pub struct ParticleFilter {
    layout: Arc<Layout>,
    adversary_index: usize,
    model: Box<dyn AdversaryModel>,
    sensor: SensorModel,
    num_particles: ParticleCount,
    particles: Vec<Position>,
    rng: StdRng,
}

impl ParticleFilter {
    /// Create a filter for the adversary with the given 1-based agent index.
    pub fn new(
        layout: Arc<Layout>,
        adversary_index: usize,
        model: Box<dyn AdversaryModel>,
        sensor: SensorModel,
        num_particles: ParticleCount,
        seed: Option<u64>,
    ) -> Self {
        let mut filter = ParticleFilter {
            layout,
            adversary_index,
            model,
            sensor,
            num_particles,
            particles: Vec::new(),
            rng: StdRng::seed_from_u64(seed.unwrap_or_else(rand::random::<u64>)),
        };
        filter.reset();
        filter
    }

    /// The current particle set.
    pub fn particles(&self) -> &[Position] {
        &self.particles
    }

    fn check_particle_count(&self) {
        assert_eq!(
            self.particles.len(),
            self.num_particles.value(),
            "particle set size drifted from the configured count"
        );
    }
}

impl BeliefTracker for ParticleFilter {
    fn name(&self) -> &str {
        "Particle"
    }

    fn reset(&mut self) {
        let open = self.layout.open_cells();
        self.particles = (0..self.num_particles.value())
            .map(|i| open[i % open.len()])
            .collect();
    }

    fn observe(&mut self, observations: &[Option<u32>], protagonist: Position) {
        let observation = observations
            .get(self.adversary_index - 1)
            .copied()
            .flatten();
        let capture = capture_position(self.adversary_index);

        let Some(reading) = observation else {
            // No reading: the adversary is certainly held.
            self.particles = vec![capture; self.num_particles.value()];
            return;
        };

        let mut weighted = DiscreteDistribution::new();
        for &particle in &self.particles {
            let likelihood = self
                .sensor
                .likelihood(Some(reading), protagonist, particle, capture);
            weighted.add(particle, likelihood);
        }

        if weighted.total() <= 0.0 {
            self.reset();
            return;
        }

        let mut resampled = Vec::with_capacity(self.num_particles.value());
        for _ in 0..self.num_particles.value() {
            let particle = weighted
                .sample(&mut self.rng)
                .expect("weighted particle distribution is non-empty");
            resampled.push(particle);
        }
        self.particles = resampled;
        self.check_particle_count();
    }

    fn elapse(&mut self, protagonist: Position) {
        let mut next = Vec::with_capacity(self.particles.len());
        for &particle in &self.particles {
            let transition = position_distribution(
                &self.layout,
                protagonist,
                self.adversary_index,
                particle,
                self.model.as_ref(),
            );
            next.push(transition.sample(&mut self.rng).unwrap_or(particle));
        }
        self.particles = next;
        self.check_particle_count();
    }

    fn beliefs(&self) -> DiscreteDistribution<Position> {
        let mut beliefs = DiscreteDistribution::new();
        for &particle in &self.particles {
            beliefs.add(particle, 1.0);
        }
        beliefs.normalize();
        beliefs
    }
}
