//! Statistical summaries of tracking traces and win rates

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, Normal};

use crate::{Error, Result, pipeline::tracking::TraceRow};

/// Aggregate tracking-quality statistics computed from a trace.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackingAnalysis {
    /// Trace rows analyzed
    pub rows: usize,
    /// Mean arg-max position error
    pub mean_error: f64,
    /// Mean belief entropy, in nats
    pub mean_entropy: f64,
    /// Mean belief mass on the true position
    pub mean_belief_at_truth: f64,
    /// Mean error per step, in step order
    pub error_by_step: Vec<f64>,
}

impl TrackingAnalysis {
    /// Analyze a recorded trace.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyTrace`] when the trace has no rows.
    pub fn from_trace(trace: &[TraceRow]) -> Result<Self> {
        if trace.is_empty() {
            return Err(Error::EmptyTrace);
        }

        let rows = trace.len();
        let mean_error = trace.iter().map(|r| r.error as f64).sum::<f64>() / rows as f64;
        let mean_entropy = trace.iter().map(|r| r.entropy).sum::<f64>() / rows as f64;
        let mean_belief_at_truth =
            trace.iter().map(|r| r.belief_at_truth).sum::<f64>() / rows as f64;

        let mut by_step: BTreeMap<usize, (f64, usize)> = BTreeMap::new();
        for row in trace {
            let entry = by_step.entry(row.step).or_insert((0.0, 0));
            entry.0 += row.error as f64;
            entry.1 += 1;
        }
        let error_by_step = by_step
            .into_values()
            .map(|(total, count)| total / count as f64)
            .collect();

        Ok(Self {
            rows,
            mean_error,
            mean_entropy,
            mean_belief_at_truth,
            error_by_step,
        })
    }

    /// Whether the tracker sharpened over the session: the mean error of
    /// the last quarter of steps is below the first quarter's.
    pub fn improved(&self) -> bool {
        let quarter = (self.error_by_step.len() / 4).max(1);
        if self.error_by_step.len() < 2 * quarter {
            return false;
        }
        let early: f64 = self.error_by_step[..quarter].iter().sum::<f64>() / quarter as f64;
        let late: f64 = self.error_by_step[self.error_by_step.len() - quarter..]
            .iter()
            .sum::<f64>()
            / quarter as f64;
        late < early
    }
}

/// Win-rate point estimate with a normal-approximation interval.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WinRateEstimate {
    pub wins: usize,
    pub total: usize,
    pub rate: f64,
    /// Lower bound of the confidence interval
    pub low: f64,
    /// Upper bound of the confidence interval
    pub high: f64,
    /// Confidence level the interval was computed at
    pub confidence: f64,
}

impl WinRateEstimate {
    /// Estimate a win rate with a two-sided confidence interval.
    ///
    /// Uses the normal approximation to the binomial proportion, clamped to
    /// `[0, 1]`. With zero trials the interval is the whole unit range.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfidence`] unless `0 < confidence < 1`.
    pub fn estimate(wins: usize, total: usize, confidence: f64) -> Result<Self> {
        if !(confidence > 0.0 && confidence < 1.0) {
            return Err(Error::InvalidConfidence { value: confidence });
        }
        if total == 0 {
            return Ok(Self {
                wins,
                total,
                rate: 0.0,
                low: 0.0,
                high: 1.0,
                confidence,
            });
        }

        let rate = wins as f64 / total as f64;
        let normal = Normal::new(0.0, 1.0).expect("standard normal parameters are valid");
        let z = normal.inverse_cdf(0.5 + confidence / 2.0);
        let spread = z * (rate * (1.0 - rate) / total as f64).sqrt();

        Ok(Self {
            wins,
            total,
            rate,
            low: (rate - spread).max(0.0),
            high: (rate + spread).min(1.0),
            confidence,
        })
    }
}
