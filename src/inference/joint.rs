//! Joint particle filtering over all adversaries at once
//!
//! Tracking adversaries jointly captures correlations that independent
//! filters miss (two readings that cannot both come from the same corridor,
//! for instance). Each particle is a full assignment of positions, one per
//! adversary; marginal views expose per-adversary beliefs to consumers that
//! expect a single-adversary tracker.

use std::{cell::RefCell, rc::Rc, sync::Arc};

use rand::{SeedableRng, rngs::StdRng};

use super::{
    BeliefTracker, DiscreteDistribution, SensorModel, capture_position, position_distribution,
};
use crate::{
    agents::AdversaryModel,
    grid::{Layout, Position},
    types::ParticleCount,
};

/// Particle filter over tuples of all adversary positions.
pub struct JointParticleFilter {
    layout: Arc<Layout>,
    models: Vec<Box<dyn AdversaryModel>>,
    sensor: SensorModel,
    num_particles: ParticleCount,
    particles: Vec<Vec<Position>>,
    rng: StdRng,
}

impl JointParticleFilter {
    /// Create a joint filter with one policy model per adversary, in agent
    /// order.
    pub fn new(
        layout: Arc<Layout>,
        models: Vec<Box<dyn AdversaryModel>>,
        sensor: SensorModel,
        num_particles: ParticleCount,
        seed: Option<u64>,
    ) -> Self {
        let mut filter = JointParticleFilter {
            layout,
            models,
            sensor,
            num_particles,
            particles: Vec::new(),
            rng: StdRng::seed_from_u64(seed.unwrap_or_else(rand::random::<u64>)),
        };
        filter.reset_particles();
        filter
    }

    /// Number of adversaries tracked jointly.
    pub fn num_adversaries(&self) -> usize {
        self.models.len()
    }

    /// The current particle set.
    pub fn particles(&self) -> &[Vec<Position>] {
        &self.particles
    }

    /// Even spread over position tuples: particle `i` decomposes into
    /// base-`|open|` digits, one per adversary, so the joint prior is
    /// uniform up to integer rounding.
    fn reset_particles(&mut self) {
        let open = self.layout.open_cells();
        let adversaries = self.models.len();
        self.particles = (0..self.num_particles.value())
            .map(|i| {
                let mut index = i;
                (0..adversaries)
                    .map(|_| {
                        let position = open[index % open.len()];
                        index /= open.len();
                        position
                    })
                    .collect()
            })
            .collect();
    }

    /// Update from the full observation vector, one reading per adversary.
    pub fn observe_all(&mut self, observations: &[Option<u32>], protagonist: Position) {
        // Capture evidence pins the component before any weighting.
        for (slot, observation) in observations.iter().enumerate() {
            if observation.is_none() {
                let capture = capture_position(slot + 1);
                for particle in &mut self.particles {
                    particle[slot] = capture;
                }
            }
        }

        let mut weighted: DiscreteDistribution<Vec<Position>> = DiscreteDistribution::new();
        for particle in &self.particles {
            let mut weight = 1.0;
            for (slot, observation) in observations.iter().enumerate() {
                let Some(reading) = observation else {
                    continue;
                };
                weight *= self.sensor.likelihood(
                    Some(*reading),
                    protagonist,
                    particle[slot],
                    capture_position(slot + 1),
                );
            }
            weighted.add(particle.clone(), weight);
        }

        if weighted.total() <= 0.0 {
            self.reset_particles();
            return;
        }

        let mut resampled = Vec::with_capacity(self.num_particles.value());
        for _ in 0..self.num_particles.value() {
            let particle = weighted
                .sample(&mut self.rng)
                .expect("weighted joint distribution is non-empty");
            resampled.push(particle);
        }
        self.particles = resampled;
        self.check_particle_count();
    }

    /// Advance every particle one time step, component by component.
    pub fn elapse_all(&mut self, protagonist: Position) {
        let mut next = Vec::with_capacity(self.particles.len());
        for particle in &self.particles {
            let mut advanced = particle.clone();
            for (slot, model) in self.models.iter().enumerate() {
                let transition = position_distribution(
                    &self.layout,
                    protagonist,
                    slot + 1,
                    advanced[slot],
                    model.as_ref(),
                );
                advanced[slot] = transition.sample(&mut self.rng).unwrap_or(advanced[slot]);
            }
            next.push(advanced);
        }
        self.particles = next;
        self.check_particle_count();
    }

    /// Joint belief over full position tuples, normalized.
    pub fn joint_beliefs(&self) -> DiscreteDistribution<Vec<Position>> {
        let mut beliefs = DiscreteDistribution::new();
        for particle in &self.particles {
            beliefs.add(particle.clone(), 1.0);
        }
        beliefs.normalize();
        beliefs
    }

    /// Marginal belief for one adversary (1-based index), summing out the
    /// others.
    pub fn marginal(&self, adversary_index: usize) -> DiscreteDistribution<Position> {
        let mut beliefs = DiscreteDistribution::new();
        for particle in &self.particles {
            beliefs.add(particle[adversary_index - 1], 1.0);
        }
        beliefs.normalize();
        beliefs
    }

    fn check_particle_count(&self) {
        assert_eq!(
            self.particles.len(),
            self.num_particles.value(),
            "joint particle set size drifted from the configured count"
        );
    }
}

/// Per-adversary view of a shared [`JointParticleFilter`].
///
/// All views share one joint filter; the view for adversary 1 drives the
/// shared observe/elapse updates and the others are read-only, so feeding
/// every view the same observation vector updates the joint state exactly
/// once per step.
pub struct MarginalFilter {
    joint: Rc<RefCell<JointParticleFilter>>,
    adversary_index: usize,
}

impl MarginalFilter {
    /// Create marginal views for every adversary of a joint filter.
    pub fn views(joint: JointParticleFilter) -> Vec<MarginalFilter> {
        let adversaries = joint.num_adversaries();
        let shared = Rc::new(RefCell::new(joint));
        (1..=adversaries)
            .map(|adversary_index| MarginalFilter {
                joint: Rc::clone(&shared),
                adversary_index,
            })
            .collect()
    }
}

impl BeliefTracker for MarginalFilter {
    fn name(&self) -> &str {
        "JointMarginal"
    }

    fn reset(&mut self) {
        if self.adversary_index == 1 {
            self.joint.borrow_mut().reset_particles();
        }
    }

    fn observe(&mut self, observations: &[Option<u32>], protagonist: Position) {
        if self.adversary_index == 1 {
            self.joint.borrow_mut().observe_all(observations, protagonist);
        }
    }

    fn elapse(&mut self, protagonist: Position) {
        if self.adversary_index == 1 {
            self.joint.borrow_mut().elapse_all(protagonist);
        }
    }

    fn beliefs(&self) -> DiscreteDistribution<Position> {
        self.joint.borrow().marginal(self.adversary_index)
    }
}
