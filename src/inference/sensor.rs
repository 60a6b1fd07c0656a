//! Noisy Manhattan-distance sensor model
//!
//! The protagonist's sonar reports the Manhattan distance to each adversary
//! plus an integer offset drawn from a symmetric kernel: offset `v` has
//! probability proportional to `2^(w - |v|)` inside the window `[-w, w]`
//! and zero outside it. A captured adversary produces no reading at all, so
//! a missing observation is certain evidence of capture.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{
    grid::Position,
    inference::DiscreteDistribution,
    types::SENSOR_HALF_WIDTH,
};

/// Distance sensor with a bounded geometric noise kernel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensorModel {
    half_width: u32,
    /// `offset_probs[|v|]` is the probability of offset `±v` (one side).
    offset_probs: Vec<f64>,
}

impl SensorModel {
    /// The standard sonar: half-width 7, so readings land within ±7 of the
    /// true distance.
    pub fn standard() -> Self {
        Self::with_half_width(SENSOR_HALF_WIDTH)
    }

    /// Sensor with a custom noise half-width. Zero makes it exact.
    pub fn with_half_width(half_width: u32) -> Self {
        // Denominator: sum of 2^(w-|v|) over v in [-w, w] = 3*2^w - 2.
        let denominator = (3.0 * f64::powi(2.0, half_width as i32) - 2.0).max(1.0);
        let offset_probs = (0..=half_width)
            .map(|v| f64::powi(2.0, (half_width - v) as i32) / denominator)
            .collect();
        SensorModel {
            half_width,
            offset_probs,
        }
    }

    /// The noise window half-width.
    pub fn half_width(&self) -> u32 {
        self.half_width
    }

    /// `P(reading | true distance)`.
    pub fn reading_probability(&self, reading: u32, true_distance: u32) -> f64 {
        let offset = reading.abs_diff(true_distance);
        if offset > self.half_width {
            return 0.0;
        }
        self.offset_probs[offset as usize]
    }

    /// Observation likelihood for a hypothetical adversary position.
    ///
    /// A `None` observation means the adversary produced no reading, which
    /// happens exactly when it sits in its capture cell. A present reading
    /// from a captured adversary is impossible.
    pub fn likelihood(
        &self,
        observation: Option<u32>,
        protagonist: Position,
        position: Position,
        capture_cell: Position,
    ) -> f64 {
        match observation {
            None => {
                if position == capture_cell {
                    1.0
                } else {
                    0.0
                }
            }
            Some(reading) => {
                if position == capture_cell {
                    0.0
                } else {
                    self.reading_probability(reading, protagonist.manhattan_distance(position))
                }
            }
        }
    }

    /// Sample a noisy reading for a true distance.
    pub fn sample_reading<R: Rng>(&self, rng: &mut R, true_distance: u32) -> u32 {
        let offsets: DiscreteDistribution<i64> = (-(self.half_width as i64)
            ..=self.half_width as i64)
            .map(|v| (v, self.offset_probs[v.unsigned_abs() as usize]))
            .collect();
        let offset = offsets.sample(rng).unwrap_or(0);
        (true_distance as i64 + offset).max(0) as u32
    }
}

impl Default for SensorModel {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    #[test]
    fn kernel_sums_to_one() {
        for half_width in [0, 1, 3, 7] {
            let sensor = SensorModel::with_half_width(half_width);
            let true_distance = 20;
            let total: f64 = (0..=40)
                .map(|reading| sensor.reading_probability(reading, true_distance))
                .sum();
            assert!((total - 1.0).abs() < 1e-9, "half-width {half_width}: {total}");
        }
    }

    #[test]
    fn standard_kernel_matches_closed_form() {
        let sensor = SensorModel::standard();
        // 2^7 / 382 at zero offset, 2^0 / 382 at the window edge.
        assert!((sensor.reading_probability(10, 10) - 128.0 / 382.0).abs() < 1e-12);
        assert!((sensor.reading_probability(17, 10) - 1.0 / 382.0).abs() < 1e-12);
        assert_eq!(sensor.reading_probability(18, 10), 0.0);
    }

    #[test]
    fn exact_sensor_is_a_point_mass() {
        let sensor = SensorModel::with_half_width(0);
        assert_eq!(sensor.reading_probability(5, 5), 1.0);
        assert_eq!(sensor.reading_probability(6, 5), 0.0);
    }

    #[test]
    fn missing_observation_means_capture() {
        let sensor = SensorModel::standard();
        let protagonist = Position::new(1, 1);
        let capture = Position::new(1, 0);
        assert_eq!(sensor.likelihood(None, protagonist, capture, capture), 1.0);
        assert_eq!(
            sensor.likelihood(None, protagonist, Position::new(3, 3), capture),
            0.0
        );
        assert_eq!(sensor.likelihood(Some(4), protagonist, capture, capture), 0.0);
    }

    #[test]
    fn sampled_readings_stay_in_window() {
        let sensor = SensorModel::standard();
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..500 {
            let reading = sensor.sample_reading(&mut rng, 12);
            assert!(reading.abs_diff(12) <= sensor.half_width());
        }
    }
}
