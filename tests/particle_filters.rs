//! Particle and joint filter behavior against simulated hidden adversaries

mod common;

use rand::{SeedableRng, rngs::StdRng};

use gridchase::{
    agents::RandomAdversary,
    grid::Position,
    inference::{
        BeliefTracker, ExactFilter, JointParticleFilter, ParticleFilter, SensorModel,
        capture_position,
    },
    types::ParticleCount,
};

fn particle_filter(particles: usize, sensor: SensorModel, seed: u64) -> ParticleFilter {
    ParticleFilter::new(
        common::small_layout(),
        1,
        Box::new(RandomAdversary),
        sensor,
        ParticleCount::new(particles).unwrap(),
        Some(seed),
    )
}

#[test]
fn particle_posterior_beats_the_uniform_prior() {
    let layout = common::small_layout();
    let protagonist = layout.protagonist_spawn();
    let sensor = SensorModel::with_half_width(0);
    let mut filter = particle_filter(2_000, sensor.clone(), 8);

    let mut rng = StdRng::seed_from_u64(88);
    let mut position = layout.adversary_spawns()[0];
    for _ in 0..8 {
        let reading = common::reading_for(&mut rng, &sensor, protagonist, 1, position);
        filter.observe(&[reading], protagonist);
        filter.elapse(protagonist);
        position = common::model_consistent_step(&mut rng, &layout, protagonist, 1, position);
    }
    let reading = common::reading_for(&mut rng, &sensor, protagonist, 1, position);
    filter.observe(&[reading], protagonist);

    let beliefs = filter.beliefs();
    let uniform = 1.0 / layout.open_cells().len() as f64;
    assert!(
        beliefs.get(&position) > uniform,
        "particle posterior at truth {} should beat uniform {uniform}",
        beliefs.get(&position)
    );
}

#[test]
fn particle_beliefs_approximate_the_exact_posterior() {
    let layout = common::small_layout();
    let protagonist = layout.protagonist_spawn();
    let sensor = SensorModel::standard();

    let mut exact = ExactFilter::new(
        layout.clone(),
        1,
        Box::new(RandomAdversary),
        sensor.clone(),
    );
    let mut approximate = particle_filter(20_000, sensor.clone(), 17);

    // Feed both filters the same fixed observation sequence.
    for reading in [6u32, 5, 5, 4] {
        exact.observe(&[Some(reading)], protagonist);
        approximate.observe(&[Some(reading)], protagonist);
        exact.elapse(protagonist);
        approximate.elapse(protagonist);
    }

    let exact_beliefs = exact.beliefs();
    let particle_beliefs = approximate.beliefs();
    let mut total_variation = 0.0;
    for position in layout.open_cells() {
        total_variation +=
            (exact_beliefs.get(&position) - particle_beliefs.get(&position)).abs();
    }
    total_variation += (exact_beliefs.get(&capture_position(1))
        - particle_beliefs.get(&capture_position(1)))
    .abs();
    total_variation /= 2.0;

    assert!(
        total_variation < 0.2,
        "20k particles should track the exact posterior, TV = {total_variation}"
    );
}

#[test]
fn joint_marginals_track_separate_readings() {
    let layout = common::medium_layout();
    let protagonist = layout.protagonist_spawn();
    let sensor = SensorModel::with_half_width(2);
    let mut filter = JointParticleFilter::new(
        layout.clone(),
        vec![Box::new(RandomAdversary), Box::new(RandomAdversary)],
        sensor.clone(),
        ParticleCount::new(5_000).unwrap(),
        Some(4),
    );

    let mut rng = StdRng::seed_from_u64(44);
    let mut positions: Vec<Position> = layout.adversary_spawns().to_vec();
    for _ in 0..6 {
        let observations: Vec<Option<u32>> = positions
            .iter()
            .enumerate()
            .map(|(slot, &p)| common::reading_for(&mut rng, &sensor, protagonist, slot + 1, p))
            .collect();
        filter.observe_all(&observations, protagonist);
        filter.elapse_all(protagonist);
        for (slot, position) in positions.iter_mut().enumerate() {
            *position =
                common::model_consistent_step(&mut rng, &layout, protagonist, slot + 1, *position);
        }
    }

    let uniform = 1.0 / layout.open_cells().len() as f64;
    for (slot, &truth) in positions.iter().enumerate() {
        let marginal = filter.marginal(slot + 1);
        assert!((marginal.total() - 1.0).abs() < 1e-9);
        assert!(
            marginal.get(&truth) > uniform / 4.0,
            "adversary {}: marginal at truth {} too small",
            slot + 1,
            marginal.get(&truth)
        );
    }
}

#[test]
fn joint_capture_evidence_is_component_local() {
    let layout = common::medium_layout();
    let protagonist = layout.protagonist_spawn();
    let sensor = SensorModel::standard();
    let mut filter = JointParticleFilter::new(
        layout.clone(),
        vec![Box::new(RandomAdversary), Box::new(RandomAdversary)],
        sensor,
        ParticleCount::new(1_000).unwrap(),
        Some(5),
    );

    filter.observe_all(&[None, Some(7)], protagonist);
    assert!((filter.marginal(1).get(&capture_position(1)) - 1.0).abs() < 1e-9);
    assert_eq!(filter.marginal(2).get(&capture_position(2)), 0.0);

    // The pinned component survives further time and observation updates.
    filter.elapse_all(protagonist);
    filter.observe_all(&[None, Some(6)], protagonist);
    assert!((filter.marginal(1).get(&capture_position(1)) - 1.0).abs() < 1e-9);
}

#[test]
fn filters_recover_after_an_impossible_reading() {
    let layout = common::small_layout();
    let protagonist = layout.protagonist_spawn();
    let sensor = SensorModel::with_half_width(0);
    let mut filter = particle_filter(500, sensor, 6);

    // Contradictory exact readings: first pin a ring, then claim a distance
    // no surviving particle can produce. The filter must reinitialize.
    filter.observe(&[Some(3)], protagonist);
    filter.observe(&[Some(40)], protagonist);
    assert_eq!(filter.particles().len(), 500);
    assert!((filter.beliefs().total() - 1.0).abs() < 1e-9);
}
