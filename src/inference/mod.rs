//! Belief tracking over hidden adversary positions
//!
//! Sequential Bayesian inference from noisy distance readings: an exact
//! forward-algorithm filter, a particle filter, and a joint particle filter
//! over all adversaries with marginal views. All filters interleave an
//! observation step (likelihood reweighting) with a prediction step
//! (pushing mass through the capture-aware transition model).

pub mod distribution;
pub mod exact;
pub mod joint;
pub mod particle;
pub mod sensor;
pub mod transition;

use std::{fmt, str::FromStr};

use crate::{
    Error, Result,
    grid::Position,
};

pub use distribution::DiscreteDistribution;
pub use exact::ExactFilter;
pub use joint::{JointParticleFilter, MarginalFilter};
pub use particle::ParticleFilter;
pub use sensor::SensorModel;
pub use transition::{capture_position, position_distribution};

/// A filter tracking the position of one hidden adversary.
///
/// The pipeline feeds every tracker the full observation vector (one noisy
/// reading per adversary, in agent order) each step; single-adversary
/// filters read their own slot, while marginal views of a shared joint
/// filter use the whole vector.
///
/// Trackers are single-threaded by design: marginal views share the joint
/// filter through `Rc<RefCell<..>>`. Create independent filters per thread
/// if parallel tracking is ever needed.
pub trait BeliefTracker {
    /// The tracker's display name.
    fn name(&self) -> &str;

    /// Restore the uniform prior over legal positions.
    fn reset(&mut self);

    /// Update beliefs from the current observation vector.
    fn observe(&mut self, observations: &[Option<u32>], protagonist: Position);

    /// Advance beliefs one time step through the transition model.
    fn elapse(&mut self, protagonist: Position);

    /// Current belief over this tracker's adversary position, normalized.
    fn beliefs(&self) -> DiscreteDistribution<Position>;
}

/// Which belief tracker to construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerKind {
    /// Exact forward-algorithm filtering, one filter per adversary.
    Exact,
    /// Independent particle filters, one per adversary.
    Particle,
    /// One joint particle filter over all adversaries, marginal views.
    Joint,
}

impl fmt::Display for TrackerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TrackerKind::Exact => "exact",
            TrackerKind::Particle => "particle",
            TrackerKind::Joint => "joint",
        };
        write!(f, "{name}")
    }
}

impl FromStr for TrackerKind {
    type Err = Error;

    fn from_str(input: &str) -> Result<Self> {
        match input.to_ascii_lowercase().as_str() {
            "exact" => Ok(TrackerKind::Exact),
            "particle" => Ok(TrackerKind::Particle),
            "joint" => Ok(TrackerKind::Joint),
            _ => Err(Error::ParseTrackerKind {
                input: input.to_string(),
                expected: "exact, particle, joint".to_string(),
            }),
        }
    }
}
