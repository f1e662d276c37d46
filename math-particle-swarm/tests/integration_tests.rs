//! End-to-end tests of the Eggholder swarm through the public API.

use approx::assert_abs_diff_eq;
use math_audio_particle_swarm::{
    ParallelConfig, PSOConfigBuilder, SweepConfig, eggholder, eggholder_swarm, format_report,
    initialize_swarm, mean, run_optimization, run_sweep, stddev, summarize, write_report,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Final global best of the reference configuration with `StdRng` seed 42.
const SEED_42_BASELINE: f64 = -894.6862188568439;

#[test]
fn test_reference_run_regression() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut swarm = initialize_swarm(50, 2, -512.0, 512.0, 77.0, &mut rng);
    let best = run_optimization(&mut swarm, 100, 0.5, 1.5, 1.5, -512.0, 512.0, &mut rng);

    assert_abs_diff_eq!(best, SEED_42_BASELINE, epsilon = 1e-9);
    assert_abs_diff_eq!(
        eggholder(swarm.global_best_position[0], swarm.global_best_position[1]),
        best,
        epsilon = 1e-12
    );
}

#[test]
fn test_builder_reproduces_regression() {
    let cfg = PSOConfigBuilder::new().seed(42).build().unwrap();
    let report = eggholder_swarm(cfg).unwrap().solve();
    assert_abs_diff_eq!(report.fun, SEED_42_BASELINE, epsilon = 1e-9);
}

#[test]
fn test_eggholder_global_minimum_region() {
    assert_abs_diff_eq!(eggholder(512.0, 404.2319), -959.64, epsilon = 1.0);
}

#[test]
fn test_statistics_reference_values() {
    let values = [1.0, 2.0, 3.0, 4.0, 5.0];
    assert_eq!(mean(&values), 3.0);
    assert_abs_diff_eq!(stddev(&values, 3.0), 1.41421, epsilon = 1e-4);

    let summary = summarize(&values).unwrap();
    assert_eq!(summary.best, 1.0);
    assert_abs_diff_eq!(summary.stddev, 2f64.sqrt(), epsilon = 1e-4);
}

#[test]
fn test_default_sweep_to_report() {
    let config = SweepConfig {
        seed: Some(2024),
        parallel: ParallelConfig::default(),
        ..SweepConfig::default()
    };
    let rows = run_sweep(&config).expect("default grid is valid");
    assert_eq!(rows.len(), 6);

    for row in &rows {
        assert_eq!(row.results.len(), 10);
        assert!(row.summary.best <= row.summary.mean);
        assert!(row.summary.stddev >= 0.0);
        // nothing on the Eggholder box goes meaningfully below the minimum
        assert!(row.summary.best > -961.0);
    }
    // same population, more iterations: never worse on average
    for cell in rows.chunks(3) {
        assert!(cell[1].summary.mean <= cell[0].summary.mean);
        assert!(cell[2].summary.mean <= cell[1].summary.mean);
    }

    let path = std::env::temp_dir().join("math_audio_pso_integration_report.txt");
    write_report(&path, &rows, false).unwrap();
    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(written, format_report(&rows));
    assert!(written.lines().next().unwrap().starts_with("Population: 50, Iterations: 20, Best: "));
}
