//! `simulate` command: run a search agent through full-information episodes

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::{
    agents::{AdversaryKind, AdversaryModel, AgentKind},
    analysis::WinRateEstimate,
    cli::{config::load_layout, output},
    pipeline::{EpisodeConfig, EpisodePipeline, ProgressObserver},
};

/// Arguments for the simulate command
#[derive(Args, Debug)]
pub struct SimulateArgs {
    /// Layout: `small`, `medium`, or a path to an ASCII layout file
    #[arg(long)]
    pub layout: Option<String>,

    /// Agent to run: reflex, minimax, alphabeta, expectimax
    #[arg(long, default_value = "alphabeta")]
    pub agent: String,

    /// Search depth in full rounds (tree-search agents)
    #[arg(long, default_value_t = 2)]
    pub depth: usize,

    /// Adversary behavior: random, pursuit
    #[arg(long, default_value = "pursuit")]
    pub adversary: String,

    /// Number of episodes to play
    #[arg(long, default_value_t = 20)]
    pub episodes: usize,

    /// Step limit per episode
    #[arg(long, default_value_t = 200)]
    pub max_steps: usize,

    /// Random seed for reproducible runs
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write the result summary as JSON
    #[arg(long)]
    pub output: Option<PathBuf>,
}

/// Execute the simulate command
pub fn execute(args: SimulateArgs) -> Result<()> {
    let layout = load_layout(args.layout.as_deref())?;
    let agent_kind: AgentKind = args.agent.parse()?;
    let adversary_kind: AdversaryKind = args.adversary.parse()?;

    let mut agent = agent_kind.into_boxed_agent(args.depth);
    let adversaries: Vec<Box<dyn AdversaryModel>> = (0..layout.adversary_spawns().len())
        .map(|_| adversary_kind.into_boxed_model())
        .collect();

    let config = EpisodeConfig {
        num_episodes: args.episodes,
        max_steps: args.max_steps,
        seed: args.seed,
    };
    let mut pipeline =
        EpisodePipeline::new(config).with_observer(Box::new(ProgressObserver::new()));

    output::print_section(&format!(
        "Simulating {} (depth {}) vs {} adversaries",
        agent.name(),
        args.depth,
        adversary_kind
    ));
    let result = pipeline.run(agent.as_mut(), &adversaries, layout)?;

    let estimate = WinRateEstimate::estimate(result.wins, result.total_episodes, 0.95)?;
    output::print_subsection("Results");
    output::print_kv("episodes", &result.total_episodes.to_string());
    output::print_kv(
        "wins / losses / cutoffs",
        &format!("{} / {} / {}", result.wins, result.losses, result.step_limits),
    );
    output::print_kv(
        "win rate",
        &format!(
            "{:.1}% (95% CI {:.1}%..{:.1}%)",
            estimate.rate * 100.0,
            estimate.low * 100.0,
            estimate.high * 100.0
        ),
    );
    output::print_kv("average score", &format!("{:.1}", result.average_score));
    output::print_kv("average steps", &format!("{:.1}", result.average_steps));

    if let Some(path) = args.output {
        result.save(&path)?;
        output::print_kv("saved", &path.display().to_string());
    }

    Ok(())
}
