//! gridchase: adversarial search and belief tracking in a maze-chase
//! gridworld
//!
//! This crate provides:
//! - A compact gridworld with ASCII layouts, pellets, energizers, and
//!   chasing adversaries
//! - Adversarial tree search: reflex, minimax, alpha-beta, expectimax
//! - Belief tracking over hidden adversary positions: exact Bayesian
//!   filtering, particle filtering, and joint particle filtering with
//!   marginal views
//! - Simulation pipelines, tracking analysis, and session export tools

pub mod adapters;
pub mod agents;
pub mod analysis;
pub mod cli;
pub mod error;
pub mod export;
pub mod grid;
pub mod inference;
pub mod learning;
pub mod pipeline;
pub mod ports;
pub mod types;
pub mod utils;

pub use agents::{
    Agent, AgentKind, AlphaBetaAgent, ExpectimaxAgent, MinimaxAgent, ReflexAgent,
};
pub use error::{Error, Result};
pub use grid::{Direction, GameState, Layout, Position};
pub use inference::{
    BeliefTracker, DiscreteDistribution, ExactFilter, JointParticleFilter, ParticleFilter,
    SensorModel, TrackerKind,
};
pub use pipeline::{EpisodeConfig, EpisodePipeline, TrackingConfig, TrackingPipeline};
pub use types::ParticleCount;
