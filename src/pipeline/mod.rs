//! Simulation pipelines: full-information episodes and hidden-adversary
//! tracking sessions.

pub mod episode;
pub mod observers;
pub mod tracking;

pub use episode::{EpisodeConfig, EpisodeOutcome, EpisodePipeline, EpisodeResult};
pub use observers::{MetricsObserver, ProgressObserver};
pub use tracking::{
    TraceRow, TrackingConfig, TrackingPipeline, TrackingResult, TrackingSession, build_trackers,
};
