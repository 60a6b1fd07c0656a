//! Exact-filter behavior against a simulated hidden adversary
//!
//! The hidden adversary moves by sampling the same transition model the
//! filter predicts with, so its true trajectory always carries positive
//! probability and the posterior can be checked against it.

mod common;

use rand::{SeedableRng, rngs::StdRng};

use gridchase::{
    agents::RandomAdversary,
    grid::Position,
    inference::{BeliefTracker, ExactFilter, SensorModel, capture_position},
};

/// Run `steps` observe/elapse rounds with a noise-free sensor and return
/// the final true position (possibly the capture cell).
fn run_hidden_walk(
    filter: &mut ExactFilter,
    layout: &std::sync::Arc<gridchase::grid::Layout>,
    protagonist: Position,
    steps: usize,
    seed: u64,
) -> Position {
    let mut rng = StdRng::seed_from_u64(seed);
    let sensor = SensorModel::with_half_width(0);
    let mut position = layout.adversary_spawns()[0];

    for _ in 0..steps {
        let reading = common::reading_for(&mut rng, &sensor, protagonist, 1, position);
        filter.observe(&[reading], protagonist);
        filter.elapse(protagonist);
        position = common::model_consistent_step(&mut rng, layout, protagonist, 1, position);
    }
    // Final observation so beliefs reflect the last true position.
    let reading = common::reading_for(&mut rng, &sensor, protagonist, 1, position);
    filter.observe(&[reading], protagonist);
    position
}

#[test]
fn noise_free_readings_beat_the_uniform_prior() {
    let layout = common::small_layout();
    let protagonist = layout.protagonist_spawn();
    let mut filter = ExactFilter::new(
        layout.clone(),
        1,
        Box::new(RandomAdversary),
        SensorModel::with_half_width(0),
    );

    let truth = run_hidden_walk(&mut filter, &layout, protagonist, 10, 77);
    let beliefs = filter.beliefs();
    let uniform = 1.0 / layout.open_cells().len() as f64;

    assert!(
        beliefs.get(&truth) > uniform,
        "posterior at truth {} should beat the uniform prior {uniform}",
        beliefs.get(&truth)
    );
    assert!((beliefs.total() - 1.0).abs() < 1e-9);
}

#[test]
fn posterior_support_matches_the_final_reading() {
    let layout = common::small_layout();
    let protagonist = layout.protagonist_spawn();
    let mut filter = ExactFilter::new(
        layout.clone(),
        1,
        Box::new(RandomAdversary),
        SensorModel::with_half_width(0),
    );

    let truth = run_hidden_walk(&mut filter, &layout, protagonist, 6, 5);
    let beliefs = filter.beliefs();
    assert!(beliefs.get(&truth) > 0.0, "truth must stay in support");

    if truth == capture_position(1) {
        // Capture evidence concentrates everything on the capture cell.
        assert!((beliefs.get(&truth) - 1.0).abs() < 1e-9);
        return;
    }
    let final_distance = protagonist.manhattan_distance(truth);
    for (position, mass) in beliefs.iter() {
        if mass > 0.0 {
            assert_eq!(
                protagonist.manhattan_distance(*position),
                final_distance,
                "support must sit on the observed distance ring"
            );
        }
    }
}

#[test]
fn noisy_filter_keeps_truth_in_support() {
    let layout = common::medium_layout();
    let protagonist = layout.protagonist_spawn();
    let sensor = SensorModel::standard();
    let mut filter = ExactFilter::new(
        layout.clone(),
        1,
        Box::new(RandomAdversary),
        sensor.clone(),
    );

    // The true reading is always within the sensor window and the true
    // move always within the transition support, so the posterior can
    // never zero out the truth.
    let mut rng = StdRng::seed_from_u64(21);
    let mut position = layout.adversary_spawns()[0];
    for _ in 0..8 {
        let reading = common::reading_for(&mut rng, &sensor, protagonist, 1, position);
        filter.observe(&[reading], protagonist);
        assert!(
            filter.beliefs().get(&position) > 0.0,
            "truth lost from the posterior at {position}"
        );
        filter.elapse(protagonist);
        position = common::model_consistent_step(&mut rng, &layout, protagonist, 1, position);
    }
}

#[test]
fn capture_reading_concentrates_on_the_capture_cell() {
    let layout = common::small_layout();
    let protagonist = layout.protagonist_spawn();
    let mut filter = ExactFilter::new(
        layout.clone(),
        1,
        Box::new(RandomAdversary),
        SensorModel::standard(),
    );

    // Let transition mass reach the capture cell first, then observe None.
    filter.elapse(protagonist);
    filter.observe(&[None], protagonist);
    let beliefs = filter.beliefs();
    assert!((beliefs.get(&capture_position(1)) - 1.0).abs() < 1e-9);

    // Captured adversaries stay captured.
    filter.elapse(protagonist);
    assert!((filter.beliefs().get(&capture_position(1)) - 1.0).abs() < 1e-9);
}
