//! Observers for episode-pipeline runs

use indicatif::{ProgressBar, ProgressStyle};

use crate::{Result, pipeline::episode::EpisodeOutcome, ports::Observer};

/// Progress bar observer - Shows run progress
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    wins: usize,
    losses: usize,
    step_limits: usize,
}

impl ProgressObserver {
    /// Create a new progress observer
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            wins: 0,
            losses: 0,
            step_limits: 0,
        }
    }

    fn tally(&self) -> String {
        format!("{} L:{} T:{}", self.wins, self.losses, self.step_limits)
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for ProgressObserver {
    fn on_run_start(&mut self, total_episodes: usize) -> Result<()> {
        let pb = ProgressBar::new(total_episodes as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} episodes (W:{msg})")
                .map_err(|e| crate::Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_episode_end(
        &mut self,
        episode: usize,
        outcome: EpisodeOutcome,
        _score: f64,
    ) -> Result<()> {
        match outcome {
            EpisodeOutcome::Won => self.wins += 1,
            EpisodeOutcome::Lost => self.losses += 1,
            EpisodeOutcome::StepLimit => self.step_limits += 1,
        }

        if let Some(pb) = &self.progress_bar {
            pb.set_position(episode as u64 + 1);
            pb.set_message(self.tally());
        }
        Ok(())
    }

    fn on_run_end(&mut self) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(self.tally());
        }
        Ok(())
    }
}

/// Metrics observer - Collects per-episode scores
#[derive(Debug, Default)]
pub struct MetricsObserver {
    scores: Vec<f64>,
    wins: usize,
    total: usize,
}

impl MetricsObserver {
    /// Create a new metrics observer
    pub fn new() -> Self {
        Self::default()
    }

    /// Scores of every finished episode, in order.
    pub fn scores(&self) -> &[f64] {
        &self.scores
    }

    /// Episodes won so far.
    pub fn wins(&self) -> usize {
        self.wins
    }

    /// Episodes finished so far.
    pub fn total(&self) -> usize {
        self.total
    }
}

impl Observer for MetricsObserver {
    fn on_episode_end(
        &mut self,
        _episode: usize,
        outcome: EpisodeOutcome,
        score: f64,
    ) -> Result<()> {
        self.scores.push(score);
        self.total += 1;
        if outcome == EpisodeOutcome::Won {
            self.wins += 1;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metrics_observer_tallies_outcomes() {
        let mut observer = MetricsObserver::new();
        observer
            .on_episode_end(0, EpisodeOutcome::Won, 120.0)
            .unwrap();
        observer
            .on_episode_end(1, EpisodeOutcome::Lost, -480.0)
            .unwrap();
        assert_eq!(observer.wins(), 1);
        assert_eq!(observer.total(), 2);
        assert_eq!(observer.scores(), &[120.0, -480.0]);
    }
}
