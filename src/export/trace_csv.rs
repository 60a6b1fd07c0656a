//! CSV export of tracking traces
//!
//! Writes the per-step, per-adversary tracking trace as a flat CSV file so
//! sessions can be compared and plotted outside the toolkit.

use std::path::Path;

use crate::{Result, pipeline::tracking::TraceRow};

/// Exporter for tracking-trace CSV files.
pub struct TraceCsvExporter;

impl TraceCsvExporter {
    /// Write a trace to a CSV file, one row per (step, adversary) pair.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or a row fails to
    /// serialize.
    pub fn write<P: AsRef<Path>>(path: P, trace: &[TraceRow]) -> Result<()> {
        let mut writer = csv::Writer::from_path(path)?;
        for row in trace {
            writer.serialize(row)?;
        }
        writer.flush()?;
        Ok(())
    }
}
