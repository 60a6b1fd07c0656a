//! Episode runner: a search agent against simulated adversaries

use std::sync::Arc;

use rand::{SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use crate::{
    Result,
    agents::{Agent, AdversaryModel},
    grid::{GameState, Layout, Outcome},
    ports::Observer,
    utils::weighted_sample,
};

/// Episode run configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpisodeConfig {
    /// Number of episodes to play
    pub num_episodes: usize,

    /// Step limit per episode (full rounds)
    pub max_steps: usize,

    /// Random seed
    pub seed: Option<u64>,
}

impl Default for EpisodeConfig {
    fn default() -> Self {
        Self {
            num_episodes: 20,
            max_steps: 200,
            seed: None,
        }
    }
}

/// How a single episode ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EpisodeOutcome {
    /// The protagonist cleared the maze.
    Won,
    /// The protagonist was caught.
    Lost,
    /// The step limit ran out first.
    StepLimit,
}

/// Result of an episode run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpisodeResult {
    /// Total episodes played
    pub total_episodes: usize,

    /// Episodes won
    pub wins: usize,

    /// Episodes lost
    pub losses: usize,

    /// Episodes cut off at the step limit
    pub step_limits: usize,

    /// Win rate
    pub win_rate: f64,

    /// Mean final score
    pub average_score: f64,

    /// Mean episode length in full rounds
    pub average_steps: f64,
}

impl EpisodeResult {
    /// Aggregate a run from per-episode tallies.
    pub fn new(outcomes: &[(EpisodeOutcome, f64, usize)]) -> Self {
        let total_episodes = outcomes.len();
        let wins = outcomes
            .iter()
            .filter(|(o, _, _)| *o == EpisodeOutcome::Won)
            .count();
        let losses = outcomes
            .iter()
            .filter(|(o, _, _)| *o == EpisodeOutcome::Lost)
            .count();
        let step_limits = total_episodes - wins - losses;
        let (total_score, total_steps) = outcomes
            .iter()
            .fold((0.0, 0usize), |(score, steps), (_, s, n)| {
                (score + s, steps + n)
            });

        let denom = total_episodes.max(1) as f64;
        Self {
            total_episodes,
            wins,
            losses,
            step_limits,
            win_rate: wins as f64 / denom,
            average_score: total_score / denom,
            average_steps: total_steps as f64 / denom,
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

/// Episode pipeline for one agent against a fixed adversary lineup
pub struct EpisodePipeline {
    config: EpisodeConfig,
    observers: Vec<Box<dyn Observer>>,
}

impl EpisodePipeline {
    /// Create a new episode pipeline
    pub fn new(config: EpisodeConfig) -> Self {
        Self {
            config,
            observers: Vec::new(),
        }
    }

    /// Add an observer to the pipeline
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Run the configured number of episodes.
    ///
    /// The adversary lineup must provide one model per adversary spawn in
    /// the layout; extra models are ignored and missing slots reuse the
    /// last model.
    pub fn run(
        &mut self,
        agent: &mut dyn Agent,
        adversaries: &[Box<dyn AdversaryModel>],
        layout: Arc<Layout>,
    ) -> Result<EpisodeResult> {
        let mut rng = StdRng::seed_from_u64(self.config.seed.unwrap_or_else(rand::random::<u64>));
        if let Some(seed) = self.config.seed {
            agent.set_rng_seed(seed.wrapping_add(1))?;
        }

        for observer in &mut self.observers {
            observer.on_run_start(self.config.num_episodes)?;
        }

        let mut outcomes = Vec::with_capacity(self.config.num_episodes);
        for episode in 0..self.config.num_episodes {
            for observer in &mut self.observers {
                observer.on_episode_start(episode)?;
            }

            let (outcome, score, steps) =
                self.play_episode(agent, adversaries, Arc::clone(&layout), &mut rng)?;
            outcomes.push((outcome, score, steps));

            for observer in &mut self.observers {
                observer.on_episode_end(episode, outcome, score)?;
            }
        }

        for observer in &mut self.observers {
            observer.on_run_end()?;
        }

        Ok(EpisodeResult::new(&outcomes))
    }

    fn play_episode(
        &mut self,
        agent: &mut dyn Agent,
        adversaries: &[Box<dyn AdversaryModel>],
        layout: Arc<Layout>,
        rng: &mut StdRng,
    ) -> Result<(EpisodeOutcome, f64, usize)> {
        let mut state = GameState::initial(layout);
        let mut steps = 0;

        'rounds: while steps < self.config.max_steps {
            for turn in 0..state.num_agents() {
                if state.is_terminal() {
                    break 'rounds;
                }
                let action = if turn == 0 {
                    agent.select_action(&state)?
                } else {
                    let adversary = state.adversaries()[turn - 1];
                    let model = adversaries
                        .get(turn - 1)
                        .or_else(|| adversaries.last())
                        .ok_or(crate::Error::NoAdversaries)?;
                    let distribution = model.action_distribution(
                        state.layout(),
                        adversary.position,
                        adversary.heading,
                        state.protagonist_position(),
                        adversary.is_frightened(),
                    );
                    match weighted_sample(rng, &distribution) {
                        Some(action) => action,
                        // Boxed-in adversary: nothing to do this turn.
                        None => continue,
                    }
                };
                state = state.successor(turn, action)?;
            }
            steps += 1;
        }

        let outcome = match state.outcome() {
            Some(Outcome::Won) => EpisodeOutcome::Won,
            Some(Outcome::Lost) => EpisodeOutcome::Lost,
            None => EpisodeOutcome::StepLimit,
        };
        Ok((outcome, state.score(), steps))
    }
}
