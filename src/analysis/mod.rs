//! Statistical analysis of tracking sessions and episode runs.

pub mod stats;

pub use stats::{TrackingAnalysis, WinRateEstimate};
