//! `track` command: hunt hidden adversaries with a belief filter

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::{
    agents::{AdversaryKind, AdversaryModel},
    analysis::TrackingAnalysis,
    cli::{config::load_layout, output},
    export::TraceCsvExporter,
    inference::{SensorModel, TrackerKind},
    pipeline::{TrackingConfig, TrackingPipeline, build_trackers},
    ports::SessionRepository,
};

/// Arguments for the track command
#[derive(Args, Debug)]
pub struct TrackArgs {
    /// Layout: `small`, `medium`, or a path to an ASCII layout file
    #[arg(long)]
    pub layout: Option<String>,

    /// Belief tracker: exact, particle, joint
    #[arg(long, default_value = "exact")]
    pub tracker: String,

    /// Adversary behavior assumed and simulated: random, pursuit
    #[arg(long, default_value = "random")]
    pub adversary: String,

    /// Particle count for approximate trackers (defaults to 300, or 600
    /// for the joint filter)
    #[arg(long)]
    pub particles: Option<usize>,

    /// Step limit for the session
    #[arg(long, default_value_t = 80)]
    pub max_steps: usize,

    /// Sensor noise half-width (0 for an exact sensor)
    #[arg(long, default_value_t = crate::types::SENSOR_HALF_WIDTH)]
    pub noise: u32,

    /// Random seed for reproducible runs
    #[arg(long)]
    pub seed: Option<u64>,

    /// Export the per-step trace as CSV
    #[arg(long)]
    pub csv: Option<PathBuf>,

    /// Save the full session as MessagePack
    #[arg(long)]
    pub session: Option<PathBuf>,
}

/// Execute the track command
pub fn execute(args: TrackArgs) -> Result<()> {
    let layout = load_layout(args.layout.as_deref())?;
    let tracker_kind: TrackerKind = args.tracker.parse()?;
    let adversary_kind: AdversaryKind = args.adversary.parse()?;
    let sensor = SensorModel::with_half_width(args.noise);

    let num_particles = args.particles.unwrap_or(match tracker_kind {
        TrackerKind::Joint => crate::types::DEFAULT_JOINT_PARTICLES,
        _ => crate::types::DEFAULT_PARTICLES,
    });
    let config = TrackingConfig {
        max_steps: args.max_steps,
        num_particles,
        seed: args.seed,
    };
    let mut trackers = build_trackers(
        tracker_kind,
        &layout,
        adversary_kind,
        &sensor,
        config.num_particles,
        config.seed,
    )?;
    let models: Vec<Box<dyn AdversaryModel>> = (0..layout.adversary_spawns().len())
        .map(|_| adversary_kind.into_boxed_model())
        .collect();

    output::print_section(&format!(
        "Tracking {} hidden adversaries with the {} filter",
        models.len(),
        tracker_kind
    ));
    let spinner = output::create_spinner("running session");
    let session =
        TrackingPipeline::new(config).run(layout, &mut trackers, &models, &sensor)?;
    spinner.finish_with_message(format!("{} steps", session.result.steps));

    let analysis = TrackingAnalysis::from_trace(&session.trace)?;
    output::print_subsection("Tracking quality");
    output::print_kv("steps", &session.result.steps.to_string());
    output::print_kv(
        "captures",
        &format!(
            "{}/{}",
            session.result.captures, session.result.adversaries
        ),
    );
    output::print_kv("mean error", &format!("{:.2} cells", analysis.mean_error));
    output::print_kv("final error", &format!("{:.2} cells", session.result.final_error));
    output::print_kv("mean entropy", &format!("{:.3} nats", analysis.mean_entropy));
    output::print_kv(
        "mass on truth",
        &format!("{:.3}", analysis.mean_belief_at_truth),
    );
    output::print_kv(
        "sharpened",
        if analysis.improved() { "yes" } else { "no" },
    );

    if let Some(path) = args.csv {
        TraceCsvExporter::write(&path, &session.trace)?;
        output::print_kv("trace csv", &path.display().to_string());
    }
    if let Some(path) = args.session {
        crate::adapters::MsgPackRepository::new().save(&session, &path)?;
        output::print_kv("session", &path.display().to_string());
    }

    Ok(())
}
