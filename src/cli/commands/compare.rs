//! `compare` command: run every search agent on the same setup

use anyhow::Result;
use clap::Args;

use crate::{
    agents::{AdversaryKind, AdversaryModel, AgentKind},
    analysis::WinRateEstimate,
    cli::{config::load_layout, output},
    pipeline::{EpisodeConfig, EpisodePipeline},
};

/// Arguments for the compare command
#[derive(Args, Debug)]
pub struct CompareArgs {
    /// Layout: `small`, `medium`, or a path to an ASCII layout file
    #[arg(long)]
    pub layout: Option<String>,

    /// Search depth for the tree-search agents
    #[arg(long, default_value_t = 2)]
    pub depth: usize,

    /// Adversary behavior: random, pursuit
    #[arg(long, default_value = "random")]
    pub adversary: String,

    /// Episodes per agent
    #[arg(long, default_value_t = 20)]
    pub episodes: usize,

    /// Step limit per episode
    #[arg(long, default_value_t = 200)]
    pub max_steps: usize,

    /// Random seed; every agent replays the same seed sequence
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Execute the compare command
pub fn execute(args: CompareArgs) -> Result<()> {
    let layout = load_layout(args.layout.as_deref())?;
    let adversary_kind: AdversaryKind = args.adversary.parse()?;

    output::print_section(&format!(
        "Comparing agents over {} episodes (depth {}, {} adversaries)",
        args.episodes, args.depth, adversary_kind
    ));

    for kind in AgentKind::ALL {
        let mut agent = kind.into_boxed_agent(args.depth);
        let adversaries: Vec<Box<dyn AdversaryModel>> = (0..layout.adversary_spawns().len())
            .map(|_| adversary_kind.into_boxed_model())
            .collect();
        let config = EpisodeConfig {
            num_episodes: args.episodes,
            max_steps: args.max_steps,
            seed: args.seed,
        };
        let spinner = output::create_spinner(&format!("running {kind}"));
        let result =
            EpisodePipeline::new(config).run(agent.as_mut(), &adversaries, layout.clone())?;
        spinner.finish_and_clear();

        let estimate = WinRateEstimate::estimate(result.wins, result.total_episodes, 0.95)?;
        output::print_subsection(agent.name());
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
    }

    Ok(())
}
