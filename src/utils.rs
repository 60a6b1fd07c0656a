//! Utility functions for the gridchase crate

use rand::{Rng, distr::StandardUniform, prelude::IndexedRandom};

/// Calculate Shannon entropy from a probability distribution.
///
/// The Shannon entropy is calculated as: H = -Σ(p * ln(p)) for p > 0
///
/// # Examples
///
/// ```
/// use gridchase::utils::shannon_entropy;
///
/// // Uniform distribution over 2 outcomes
/// let entropy = shannon_entropy(vec![0.5, 0.5]);
/// assert!((entropy - std::f64::consts::LN_2).abs() < 0.001);
///
/// // Deterministic distribution (zero entropy)
/// let entropy = shannon_entropy(vec![1.0, 0.0, 0.0]);
/// assert!(entropy.abs() < 0.001);
/// ```
pub fn shannon_entropy<I>(probabilities: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    probabilities
        .into_iter()
        .filter(|&p| p > 0.0)
        .map(|p| -p * p.ln())
        .sum()
}

/// Performs weighted random sampling from a collection of items.
///
/// Draws a threshold uniformly in `[0, total)` and walks the items,
/// subtracting weights until the threshold crosses zero.
///
/// # Behavior
///
/// - If all weights are zero or negative, falls back to uniform random selection
/// - The last item is returned as a fallback if the threshold never crosses zero
///   (numerical stability)
///
/// # Examples
///
/// ```
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
/// use gridchase::utils::weighted_sample;
///
/// let mut rng = StdRng::seed_from_u64(42);
/// let items = vec![("a", 1.0), ("b", 2.0), ("c", 1.0)];
/// assert!(weighted_sample(&mut rng, &items).is_some());
/// ```
pub fn weighted_sample<R, T>(rng: &mut R, items: &[(T, f64)]) -> Option<T>
where
    R: Rng,
    T: Clone,
{
    if items.is_empty() {
        return None;
    }

    let total: f64 = items.iter().map(|(_, w)| *w).sum();
    if total <= 0.0 {
        return items.choose(rng).map(|(item, _)| item.clone());
    }

    let mut threshold = rng.sample::<f64, _>(StandardUniform) * total;
    for (item, weight) in items {
        if threshold < *weight {
            return Some(item.clone());
        }
        threshold -= weight;
    }

    items.last().map(|(item, _)| item.clone())
}
