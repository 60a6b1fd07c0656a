//! Perceptron training on generated datasets

use rand::{Rng, SeedableRng, rngs::StdRng};

use gridchase::learning::{LabeledDataset, Perceptron};

/// Points labeled by which side of `w* · x = 0` they fall on, with a
/// margin so the perceptron convergence theorem applies.
fn separable_blob(seed: u64, count: usize) -> LabeledDataset {
    let mut rng = StdRng::seed_from_u64(seed);
    let true_weights = [1.5, -2.0, 0.5];
    let mut features = Vec::with_capacity(count);
    let mut labels = Vec::with_capacity(count);

    while features.len() < count {
        let point: Vec<f64> = (0..3).map(|_| rng.random_range(-5.0..5.0)).collect();
        let margin: f64 = true_weights.iter().zip(&point).map(|(w, x)| w * x).sum();
        if margin.abs() < 0.5 {
            continue;
        }
        labels.push(if margin > 0.0 { 1 } else { -1 });
        features.push(point);
    }
    LabeledDataset::new(features, labels).unwrap()
}

#[test]
fn learns_a_separable_blob() {
    let dataset = separable_blob(42, 200);
    let mut perceptron = Perceptron::new(3);
    let epochs = perceptron.train(&dataset, 500).unwrap();
    assert!(epochs <= 500);

    for (features, label) in dataset.iter() {
        assert_eq!(perceptron.predict(features).unwrap(), label);
    }
}

#[test]
fn generalizes_to_held_out_points() {
    let train = separable_blob(7, 300);
    let test = separable_blob(8, 100);

    let mut perceptron = Perceptron::new(3);
    perceptron.train(&train, 500).unwrap();

    let correct = test
        .iter()
        .filter(|(features, label)| perceptron.predict(features).unwrap() == *label)
        .count();
    assert!(
        correct >= 90,
        "expected at least 90/100 held-out points correct, got {correct}"
    );
}

#[test]
fn training_is_deterministic() {
    let dataset = separable_blob(11, 150);
    let mut first = Perceptron::new(3);
    let mut second = Perceptron::new(3);
    first.train(&dataset, 500).unwrap();
    second.train(&dataset, 500).unwrap();
    assert_eq!(first.weights(), second.weights());
}
