//! Observer port - hooks into pipeline runs
//!
//! Observers allow composable data collection during simulation runs
//! without coupling the episode loop to specific output formats.

use crate::{Result, pipeline::episode::EpisodeOutcome};

/// Observer of an episode-pipeline run.
///
/// All hooks have no-op defaults, so implementations override only what
/// they need (a progress bar cares about episode ends, a metrics collector
/// about outcomes).
pub trait Observer {
    /// Called once before the first episode.
    fn on_run_start(&mut self, _total_episodes: usize) -> Result<()> {
        Ok(())
    }

    /// Called when an episode begins.
    fn on_episode_start(&mut self, _episode: usize) -> Result<()> {
        Ok(())
    }

    /// Called when an episode finishes, with its outcome and final score.
    fn on_episode_end(
        &mut self,
        _episode: usize,
        _outcome: EpisodeOutcome,
        _score: f64,
    ) -> Result<()> {
        Ok(())
    }

    /// Called once after the last episode.
    fn on_run_end(&mut self) -> Result<()> {
        Ok(())
    }
}
