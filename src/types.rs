//! Newtype wrappers and domain constants shared across the crate.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of particles carried by an approximate filter (always positive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParticleCount(usize);

impl ParticleCount {
    /// Create a new particle count, validating it is positive.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidParticleCount`] if the count is zero.
    pub fn new(value: usize) -> Result<Self, crate::Error> {
        if value > 0 {
            Ok(ParticleCount(value))
        } else {
            Err(crate::Error::InvalidParticleCount { value })
        }
    }

    /// Get the inner value.
    pub fn value(&self) -> usize {
        self.0
    }
}

impl From<ParticleCount> for usize {
    fn from(count: ParticleCount) -> Self {
        count.0
    }
}

impl fmt::Display for ParticleCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Shannon entropy of a belief distribution (non-negative, in nats).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Entropy(f64);

impl Entropy {
    /// Calculate entropy from a probability distribution.
    pub fn from_distribution<I>(probabilities: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        Entropy(crate::utils::shannon_entropy(probabilities))
    }

    /// Get the inner value.
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl fmt::Display for Entropy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}", self.0)
    }
}

/// Scoring constants for the gridworld.
pub mod scoring {
    /// Points for eating one food pellet.
    pub const FOOD: f64 = 10.0;

    /// Bonus for clearing the last pellet.
    pub const WIN: f64 = 500.0;

    /// Penalty for being caught by an adversary.
    pub const LOSS: f64 = 500.0;

    /// Bonus for catching a frightened adversary.
    pub const CAPTURE: f64 = 200.0;

    /// Per-move time penalty charged to the protagonist.
    pub const TIME: f64 = 1.0;

    /// Number of adversary moves an energizer keeps them frightened.
    pub const FRIGHT_MOVES: u32 = 40;
}

/// Default half-width of the distance sensor's noise window.
pub const SENSOR_HALF_WIDTH: u32 = 7;

/// Default number of particles for single-adversary filters.
pub const DEFAULT_PARTICLES: usize = 300;

/// Default number of particles for the joint filter.
pub const DEFAULT_JOINT_PARTICLES: usize = 600;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn particle_count_rejects_zero() {
        assert!(ParticleCount::new(0).is_err());
        assert_eq!(ParticleCount::new(300).unwrap().value(), 300);
    }

    #[test]
    fn entropy_of_uniform_pair_is_ln_two() {
        let entropy = Entropy::from_distribution(vec![0.5, 0.5]);
        assert!((entropy.value() - std::f64::consts::LN_2).abs() < 1e-9);
    }
}
