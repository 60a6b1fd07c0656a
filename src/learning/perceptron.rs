//! Binary perceptron classifier
//!
//! The classic mistake-driven linear classifier: score a point by the dot
//! product with a weight vector, predict its sign, and on every mistake add
//! the misclassified point (times its label) to the weights. Training
//! sweeps the dataset until a full pass makes no mistakes.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A labeled binary-classification dataset: feature rows with ±1 labels.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabeledDataset {
    features: Vec<Vec<f64>>,
    labels: Vec<i8>,
}

impl LabeledDataset {
    /// Create a dataset from feature rows and ±1 labels.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LabelCountMismatch`] if the row and label counts
    /// differ, and [`Error::DimensionMismatch`] if the rows are ragged.
    pub fn new(features: Vec<Vec<f64>>, labels: Vec<i8>) -> Result<Self> {
        if features.len() != labels.len() {
            return Err(Error::LabelCountMismatch {
                features: features.len(),
                labels: labels.len(),
            });
        }
        if let Some(first) = features.first() {
            let expected = first.len();
            for row in &features {
                if row.len() != expected {
                    return Err(Error::DimensionMismatch {
                        expected,
                        got: row.len(),
                    });
                }
            }
        }
        Ok(LabeledDataset { features, labels })
    }

    /// Number of examples.
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Whether the dataset has no examples.
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Iterate over `(features, label)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&[f64], i8)> {
        self.features
            .iter()
            .map(Vec::as_slice)
            .zip(self.labels.iter().copied())
    }
}

/// Binary perceptron: classifies points as `+1` or `-1`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Perceptron {
    weights: Vec<f64>,
}

impl Perceptron {
    /// Create a perceptron for the given feature dimensionality, with all
    /// weights zero.
    pub fn new(dimensions: usize) -> Self {
        Perceptron {
            weights: vec![0.0; dimensions],
        }
    }

    /// The current weight vector.
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Score a data point: the dot product with the weights.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] if the point has the wrong
    /// dimensionality.
    pub fn score(&self, features: &[f64]) -> Result<f64> {
        if features.len() != self.weights.len() {
            return Err(Error::DimensionMismatch {
                expected: self.weights.len(),
                got: features.len(),
            });
        }
        Ok(self
            .weights
            .iter()
            .zip(features)
            .map(|(w, x)| w * x)
            .sum())
    }

    /// Predicted class for a data point: `+1` for a non-negative score,
    /// `-1` otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] on a wrong-sized point.
    pub fn predict(&self, features: &[f64]) -> Result<i8> {
        Ok(if self.score(features)? >= 0.0 { 1 } else { -1 })
    }

    /// Train until a full pass over the dataset makes no mistakes.
    ///
    /// Returns the number of passes used.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoConvergence`] when `max_epochs` passes still leave
    /// mistakes (e.g. on data that is not linearly separable), and
    /// [`Error::DimensionMismatch`] on a wrong-sized feature row.
    pub fn train(&mut self, dataset: &LabeledDataset, max_epochs: usize) -> Result<usize> {
        for epoch in 1..=max_epochs {
            let mut mistakes = 0;
            for (features, label) in dataset.iter() {
                if self.predict(features)? != label {
                    mistakes += 1;
                    for (weight, x) in self.weights.iter_mut().zip(features) {
                        *weight += f64::from(label) * x;
                    }
                }
            }
            if mistakes == 0 {
                return Ok(epoch);
            }
        }
        Err(Error::NoConvergence { epochs: max_epochs })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn separable_dataset() -> LabeledDataset {
        // Sign of the first coordinate, with a margin.
        LabeledDataset::new(
            vec![
                vec![2.0, 1.0],
                vec![3.0, -1.0],
                vec![1.5, 0.5],
                vec![-2.0, 1.0],
                vec![-3.0, -0.5],
                vec![-1.5, 0.0],
            ],
            vec![1, 1, 1, -1, -1, -1],
        )
        .unwrap()
    }

    #[test]
    fn converges_on_separable_data() {
        let dataset = separable_dataset();
        let mut perceptron = Perceptron::new(2);
        let epochs = perceptron.train(&dataset, 100).unwrap();
        assert!(epochs <= 100);
        for (features, label) in dataset.iter() {
            assert_eq!(perceptron.predict(features).unwrap(), label);
        }
    }

    #[test]
    fn does_not_converge_on_xor() {
        let dataset = LabeledDataset::new(
            vec![
                vec![0.0, 0.0],
                vec![0.0, 1.0],
                vec![1.0, 0.0],
                vec![1.0, 1.0],
            ],
            vec![-1, 1, 1, -1],
        )
        .unwrap();
        let mut perceptron = Perceptron::new(2);
        assert!(matches!(
            perceptron.train(&dataset, 50),
            Err(Error::NoConvergence { epochs: 50 })
        ));
    }

    #[test]
    fn rejects_mismatched_dimensions() {
        let perceptron = Perceptron::new(3);
        assert!(matches!(
            perceptron.score(&[1.0, 2.0]),
            Err(Error::DimensionMismatch {
                expected: 3,
                got: 2
            })
        ));
    }

    #[test]
    fn rejects_ragged_dataset() {
        let result = LabeledDataset::new(vec![vec![1.0, 2.0], vec![1.0]], vec![1, -1]);
        assert!(matches!(result, Err(Error::DimensionMismatch { .. })));
    }
}
