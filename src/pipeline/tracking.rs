//! Tracking runner: hidden adversaries, noisy readings, belief filters
//!
//! The protagonist cannot see the adversaries; each step it receives one
//! noisy distance reading per adversary, feeds the readings to a belief
//! tracker, and greedily chases the most likely position of the nearest
//! hypothesis. Walking onto an adversary's true cell captures it. The run
//! records a per-step, per-adversary trace of tracking quality.

use std::sync::Arc;

use rand::{SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    agents::{AdversaryKind, AdversaryModel},
    grid::{Direction, Layout, Position},
    inference::{
        BeliefTracker, ExactFilter, JointParticleFilter, MarginalFilter, ParticleFilter,
        SensorModel, TrackerKind, capture_position,
    },
    types::ParticleCount,
    utils::weighted_sample,
};

/// Tracking run configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackingConfig {
    /// Step limit for the session
    pub max_steps: usize,

    /// Particle count for approximate filters
    pub num_particles: usize,

    /// Random seed
    pub seed: Option<u64>,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            max_steps: 80,
            num_particles: crate::types::DEFAULT_PARTICLES,
            seed: None,
        }
    }
}

/// One row of the tracking trace: how well a tracker located one adversary
/// at one step. Kept flat so rows serialize directly to CSV.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceRow {
    pub step: usize,
    /// Adversary agent index (1-based)
    pub adversary: usize,
    pub true_x: i32,
    pub true_y: i32,
    pub estimate_x: i32,
    pub estimate_y: i32,
    /// Manhattan distance between estimate and truth
    pub error: u32,
    /// Entropy of the belief, in nats
    pub entropy: f64,
    /// Belief mass assigned to the true position
    pub belief_at_truth: f64,
}

/// Summary of a tracking session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackingResult {
    /// Steps actually run
    pub steps: usize,

    /// Adversaries tracked
    pub adversaries: usize,

    /// Adversaries captured before the step limit
    pub captures: usize,

    /// Mean arg-max position error over all trace rows
    pub mean_error: f64,

    /// Mean belief entropy over all trace rows
    pub mean_entropy: f64,

    /// Mean error over the final step's rows
    pub final_error: f64,
}

impl TrackingResult {
    fn from_trace(trace: &[TraceRow], adversaries: usize, captures: usize) -> Self {
        let rows = trace.len().max(1) as f64;
        let steps = trace.iter().map(|r| r.step + 1).max().unwrap_or(0);
        let final_rows: Vec<&TraceRow> = trace
            .iter()
            .filter(|r| r.step + 1 == steps)
            .collect();
        let final_error = if final_rows.is_empty() {
            0.0
        } else {
            final_rows.iter().map(|r| r.error as f64).sum::<f64>() / final_rows.len() as f64
        };
        Self {
            steps,
            adversaries,
            captures,
            mean_error: trace.iter().map(|r| r.error as f64).sum::<f64>() / rows,
            mean_entropy: trace.iter().map(|r| r.entropy).sum::<f64>() / rows,
            final_error,
        }
    }

    /// Save the result to a JSON file.
    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Load a result from a JSON file.
    pub fn load<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let result = serde_json::from_reader(file)?;
        Ok(result)
    }
}

/// A recorded tracking session: configuration, trace, and summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackingSession {
    pub config: TrackingConfig,
    /// Name of the tracker that produced the trace
    pub tracker: String,
    pub trace: Vec<TraceRow>,
    pub result: TrackingResult,
}

/// Build one tracker per adversary for the requested kind.
///
/// Exact and particle kinds get independent filters; the joint kind gets
/// marginal views over one shared joint filter.
///
/// # Errors
///
/// Returns [`Error::NoAdversaries`] when the layout has no adversary
/// spawns, and [`Error::InvalidParticleCount`] for a zero particle count.
pub fn build_trackers(
    kind: TrackerKind,
    layout: &Arc<Layout>,
    adversary_kind: AdversaryKind,
    sensor: &SensorModel,
    num_particles: usize,
    seed: Option<u64>,
) -> Result<Vec<Box<dyn BeliefTracker>>> {
    let adversaries = layout.adversary_spawns().len();
    if adversaries == 0 {
        return Err(Error::NoAdversaries);
    }

    match kind {
        TrackerKind::Exact => Ok((1..=adversaries)
            .map(|index| {
                Box::new(ExactFilter::new(
                    Arc::clone(layout),
                    index,
                    adversary_kind.into_boxed_model(),
                    sensor.clone(),
                )) as Box<dyn BeliefTracker>
            })
            .collect()),
        TrackerKind::Particle => {
            let particles = ParticleCount::new(num_particles)?;
            Ok((1..=adversaries)
                .map(|index| {
                    Box::new(ParticleFilter::new(
                        Arc::clone(layout),
                        index,
                        adversary_kind.into_boxed_model(),
                        sensor.clone(),
                        particles,
                        seed.map(|s| s.wrapping_add(index as u64)),
                    )) as Box<dyn BeliefTracker>
                })
                .collect())
        }
        TrackerKind::Joint => {
            let particles = ParticleCount::new(num_particles)?;
            let models = (0..adversaries)
                .map(|_| adversary_kind.into_boxed_model())
                .collect();
            let joint = JointParticleFilter::new(
                Arc::clone(layout),
                models,
                sensor.clone(),
                particles,
                seed,
            );
            Ok(MarginalFilter::views(joint)
                .into_iter()
                .map(|view| Box::new(view) as Box<dyn BeliefTracker>)
                .collect())
        }
    }
}

/// Tracking pipeline for a single session
pub struct TrackingPipeline {
    config: TrackingConfig,
}

impl TrackingPipeline {
    /// Create a new tracking pipeline
    pub fn new(config: TrackingConfig) -> Self {
        Self { config }
    }

    /// Run one session: trackers against adversaries moved by `models`.
    ///
    /// `trackers[k]` must track the adversary with agent index `k + 1`,
    /// which is how [`build_trackers`] lays them out.
    pub fn run(
        &mut self,
        layout: Arc<Layout>,
        trackers: &mut [Box<dyn BeliefTracker>],
        models: &[Box<dyn AdversaryModel>],
        sensor: &SensorModel,
    ) -> Result<TrackingSession> {
        let adversaries = layout.adversary_spawns().len();
        if adversaries == 0 || trackers.len() != adversaries || models.len() != adversaries {
            return Err(Error::NoAdversaries);
        }

        let mut rng = StdRng::seed_from_u64(self.config.seed.unwrap_or_else(rand::random::<u64>));
        let mut protagonist = layout.protagonist_spawn();
        let mut positions: Vec<Position> = layout.adversary_spawns().to_vec();
        let mut headings: Vec<Direction> = vec![Direction::Stop; adversaries];
        let mut captured: Vec<bool> = vec![false; adversaries];
        let mut trace = Vec::new();

        let mut steps = 0;
        for step in 0..self.config.max_steps {
            steps = step + 1;

            // Sense: one noisy reading per adversary, none once captured.
            let observations: Vec<Option<u32>> = positions
                .iter()
                .zip(&captured)
                .map(|(&position, &held)| {
                    if held {
                        None
                    } else {
                        Some(
                            sensor
                                .sample_reading(&mut rng, protagonist.manhattan_distance(position)),
                        )
                    }
                })
                .collect();
            for tracker in trackers.iter_mut() {
                tracker.observe(&observations, protagonist);
            }

            // Record tracking quality against the hidden truth.
            for (slot, tracker) in trackers.iter().enumerate() {
                let beliefs = tracker.beliefs();
                let truth = if captured[slot] {
                    capture_position(slot + 1)
                } else {
                    positions[slot]
                };
                let estimate = beliefs.arg_max().copied().unwrap_or(truth);
                trace.push(TraceRow {
                    step,
                    adversary: slot + 1,
                    true_x: truth.x,
                    true_y: truth.y,
                    estimate_x: estimate.x,
                    estimate_y: estimate.y,
                    error: estimate.manhattan_distance(truth),
                    entropy: beliefs.entropy().value(),
                    belief_at_truth: beliefs.get(&truth),
                });
            }

            // Chase: step toward the most likely position of the nearest
            // still-hidden adversary.
            if let Some(action) =
                self.chase_action(&layout, protagonist, trackers, &captured, &mut rng)
            {
                protagonist = protagonist.step(action);
            }
            for slot in 0..adversaries {
                if !captured[slot] && positions[slot] == protagonist {
                    captured[slot] = true;
                    positions[slot] = capture_position(slot + 1);
                }
            }
            if captured.iter().all(|&held| held) {
                break;
            }

            // Predict, then let the hidden adversaries actually move.
            for tracker in trackers.iter_mut() {
                tracker.elapse(protagonist);
            }
            for slot in 0..adversaries {
                if captured[slot] {
                    continue;
                }
                let distribution = models[slot].action_distribution(
                    &layout,
                    positions[slot],
                    headings[slot],
                    protagonist,
                    false,
                );
                if let Some(action) = weighted_sample(&mut rng, &distribution) {
                    positions[slot] = positions[slot].step(action);
                    headings[slot] = action;
                }
                if positions[slot] == protagonist {
                    captured[slot] = true;
                    positions[slot] = capture_position(slot + 1);
                }
            }
        }

        let captures = captured.iter().filter(|&&held| held).count();
        let result = TrackingResult::from_trace(&trace, adversaries, captures);
        let tracker_name = trackers
            .first()
            .map(|t| t.name().to_string())
            .unwrap_or_default();
        debug_assert_eq!(result.steps, steps.min(self.config.max_steps));

        Ok(TrackingSession {
            config: self.config.clone(),
            tracker: tracker_name,
            trace,
            result,
        })
    }

    fn chase_action(
        &self,
        layout: &Layout,
        protagonist: Position,
        trackers: &[Box<dyn BeliefTracker>],
        captured: &[bool],
        rng: &mut StdRng,
    ) -> Option<Direction> {
        let target = trackers
            .iter()
            .enumerate()
            .filter(|(slot, _)| !captured[*slot])
            .filter_map(|(_, tracker)| tracker.beliefs().arg_max().copied())
            .min_by_key(|&estimate| protagonist.manhattan_distance(estimate))?;

        let actions = layout.open_directions(protagonist);
        let best = actions
            .iter()
            .map(|&a| protagonist.step(a).manhattan_distance(target))
            .min()?;
        let candidates: Vec<(Direction, f64)> = actions
            .into_iter()
            .filter(|&a| protagonist.step(a).manhattan_distance(target) == best)
            .map(|a| (a, 1.0))
            .collect();
        weighted_sample(rng, &candidates)
    }
}
