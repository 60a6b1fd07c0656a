//! Discrete belief and weight distributions

use std::collections::BTreeMap;

use rand::{Rng, distr::StandardUniform};
use serde::{Deserialize, Serialize};

use crate::types::Entropy;

/// A belief or weight distribution over a finite set of discrete keys.
///
/// Keys are kept in a `BTreeMap` so iteration order is deterministic, which
/// keeps seeded sampling reproducible. Values are non-negative weights;
/// [`normalize`](Self::normalize) converts them to probabilities in place
/// and does nothing when the total is zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscreteDistribution<K: Ord> {
    entries: BTreeMap<K, f64>,
}

impl<K: Ord> Default for DiscreteDistribution<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord> DiscreteDistribution<K> {
    /// Create an empty distribution.
    pub fn new() -> Self {
        DiscreteDistribution {
            entries: BTreeMap::new(),
        }
    }

    /// Uniform distribution over the given keys.
    pub fn uniform<I>(keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
    {
        let mut distribution = Self::new();
        for key in keys {
            distribution.entries.insert(key, 1.0);
        }
        distribution.normalize();
        distribution
    }

    /// Weight of a key; absent keys weigh zero.
    pub fn get(&self, key: &K) -> f64 {
        self.entries.get(key).copied().unwrap_or(0.0)
    }

    /// Set the weight of a key.
    pub fn set(&mut self, key: K, weight: f64) {
        self.entries.insert(key, weight);
    }

    /// Add weight to a key, inserting it if absent.
    pub fn add(&mut self, key: K, weight: f64) {
        *self.entries.entry(key).or_insert(0.0) += weight;
    }

    /// Sum of all weights.
    pub fn total(&self) -> f64 {
        self.entries.values().sum()
    }

    /// Number of keys carrying any weight entry.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the distribution has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Normalize weights so they sum to 1, preserving ratios.
    ///
    /// When the total is zero (or not finite) the distribution is left
    /// untouched; callers that need mass must reinitialize instead.
    pub fn normalize(&mut self) {
        let total = self.total();
        if !total.is_finite() || total <= 0.0 {
            return;
        }
        for weight in self.entries.values_mut() {
            *weight /= total;
        }
    }

    /// The key with the highest weight, if any entries exist.
    ///
    /// Ties resolve to the smallest key in the `Ord` order, so the result is
    /// deterministic.
    pub fn arg_max(&self) -> Option<&K> {
        self.entries
            .iter()
            .max_by(|(key_a, a), (key_b, b)| {
                a.partial_cmp(b)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then_with(|| key_b.cmp(key_a))
            })
            .map(|(key, _)| key)
    }

    /// Shannon entropy of the normalized distribution.
    pub fn entropy(&self) -> Entropy {
        let total = self.total();
        if total <= 0.0 {
            return Entropy::from_distribution(std::iter::empty());
        }
        Entropy::from_distribution(self.entries.values().map(|w| w / total))
    }

    /// Iterate over `(key, weight)` entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, f64)> {
        self.entries.iter().map(|(key, weight)| (key, *weight))
    }

    /// Iterate over the keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.keys()
    }
}

impl<K: Ord + Clone> DiscreteDistribution<K> {
    /// Draw a random key, weighted by the values.
    ///
    /// Returns `None` on an empty distribution. A zero-total distribution
    /// falls back to a uniform draw over its keys.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Option<K> {
        if self.entries.is_empty() {
            return None;
        }
        let total = self.total();
        if total <= 0.0 {
            let index = rng.random_range(0..self.entries.len());
            return self.entries.keys().nth(index).cloned();
        }

        let mut threshold = rng.sample::<f64, _>(StandardUniform) * total;
        for (key, weight) in &self.entries {
            if threshold < *weight {
                return Some(key.clone());
            }
            threshold -= weight;
        }
        // Numerical fallback: the threshold walked off the end.
        self.entries.keys().next_back().cloned()
    }
}

impl<K: Ord> FromIterator<(K, f64)> for DiscreteDistribution<K> {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        let mut distribution = Self::new();
        for (key, weight) in iter {
            distribution.add(key, weight);
        }
        distribution
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    #[test]
    fn normalize_preserves_ratios() {
        let mut distribution: DiscreteDistribution<&str> =
            [("a", 1.0), ("b", 2.0), ("c", 2.0), ("d", 0.0)]
                .into_iter()
                .collect();
        distribution.normalize();
        assert_eq!(distribution.get(&"a"), 0.2);
        assert_eq!(distribution.get(&"b"), 0.4);
        assert_eq!(distribution.get(&"c"), 0.4);
        assert_eq!(distribution.get(&"d"), 0.0);
    }

    #[test]
    fn normalize_on_zero_total_is_noop() {
        let mut distribution: DiscreteDistribution<&str> =
            [("a", 0.0), ("b", 0.0)].into_iter().collect();
        distribution.normalize();
        assert_eq!(distribution.total(), 0.0);
    }

    #[test]
    fn arg_max_finds_heaviest_key() {
        let distribution: DiscreteDistribution<&str> =
            [("a", 0.1), ("b", 0.7), ("c", 0.2)].into_iter().collect();
        assert_eq!(distribution.arg_max(), Some(&"b"));
        assert!(DiscreteDistribution::<&str>::new().arg_max().is_none());
    }

    #[test]
    fn sample_tracks_weights() {
        let distribution: DiscreteDistribution<&str> =
            [("a", 1.0), ("b", 2.0), ("c", 2.0), ("d", 0.0)]
                .into_iter()
                .collect();
        let mut rng = StdRng::seed_from_u64(42);
        let mut counts = std::collections::HashMap::new();
        let draws = 10_000;
        for _ in 0..draws {
            *counts
                .entry(distribution.sample(&mut rng).unwrap())
                .or_insert(0usize) += 1;
        }
        let share = |key| counts.get(key).copied().unwrap_or(0) as f64 / draws as f64;
        assert!((share(&"a") - 0.2).abs() < 0.02);
        assert!((share(&"b") - 0.4).abs() < 0.02);
        assert!((share(&"c") - 0.4).abs() < 0.02);
        assert_eq!(share(&"d"), 0.0);
    }

    #[test]
    fn uniform_assigns_equal_mass() {
        let distribution = DiscreteDistribution::uniform(["x", "y", "z", "w"]);
        for key in ["x", "y", "z", "w"] {
            assert!((distribution.get(&key) - 0.25).abs() < 1e-12);
        }
    }

    #[test]
    fn entropy_peaks_at_uniform() {
        let uniform = DiscreteDistribution::uniform([1, 2, 3, 4]);
        let skewed: DiscreteDistribution<i32> =
            [(1, 0.97), (2, 0.01), (3, 0.01), (4, 0.01)].into_iter().collect();
        assert!(uniform.entropy().value() > skewed.entropy().value());
    }
}
