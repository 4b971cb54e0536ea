//! Property tests for the solver: reference engagement, monotonicity,
//! bisection convergence, and sweep determinism.

use std::cell::Cell;
use std::f64::consts::PI;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use wez_core::config::{EnvelopeConfig, InterceptorConfig, SolverSettings};
use wez_core::enums::ManeuverKind;
use wez_core::types::{InterceptorSpec, TargetProfile};

use crate::bisection::RangeSearch;
use crate::profiles::{assumed_profile, solve_profile};
use crate::sweep::{solve_envelope, solve_envelope_serial};

/// velocity 600, mass 150, thrust 500, drag 0.02, 30 g, N = 3.
fn reference_spec() -> InterceptorSpec {
    InterceptorConfig::default().spec()
}

/// 150 m/s target flying straight at the launcher.
fn head_on_target() -> TargetProfile {
    TargetProfile::straight(150.0, PI)
}

fn small_sweep() -> EnvelopeConfig {
    let mut config = EnvelopeConfig::default();
    config.sweep.azimuth_count = 6;
    config
}

// ---- Reference engagement ----

#[test]
fn test_reference_engagement_has_finite_band() {
    let settings = SolverSettings::default();
    let bounds = solve_profile(&reference_spec(), &head_on_target(), &settings);

    let r_max = bounds.r_max.expect("head-on launch should be solvable");
    let r_min = bounds.r_min.expect("minimum range should be solvable");
    assert!(r_max.is_finite());
    assert!(
        r_max > 100.0 * settings.hit_threshold,
        "r_max {r_max:.0} should be far above the hit threshold"
    );
    assert!(r_min < r_max);
    assert!(r_min >= settings.min_range_floor);
}

#[test]
fn test_more_gain_or_overload_never_shrinks_reach() {
    let settings = SolverSettings::default();
    let target = head_on_target();
    let base = solve_profile(&reference_spec(), &target, &settings)
        .r_max
        .unwrap();

    let mut higher_gain = reference_spec();
    higher_gain.guidance_gain = 5.0;
    let r_gain = solve_profile(&higher_gain, &target, &settings).r_max.unwrap();

    let mut higher_overload = reference_spec();
    higher_overload.max_overload = 45.0;
    let r_overload = solve_profile(&higher_overload, &target, &settings)
        .r_max
        .unwrap();

    let tol = settings.bisection_tolerance;
    assert!(r_gain >= base - tol, "gain: {r_gain:.1} < {base:.1}");
    assert!(r_overload >= base - tol, "overload: {r_overload:.1} < {base:.1}");
}

#[test]
fn test_tail_chase_reach_is_shorter_than_head_on() {
    let settings = SolverSettings::default();
    let head_on = solve_profile(&reference_spec(), &head_on_target(), &settings)
        .r_max
        .unwrap();
    let tail = solve_profile(&reference_spec(), &TargetProfile::straight(150.0, 0.0), &settings)
        .r_max
        .unwrap();
    assert!(tail < head_on, "tail {tail:.0} vs head-on {head_on:.0}");
}

// ---- Maneuver monotonicity ----

#[test]
fn test_maneuvering_target_does_not_extend_reach() {
    let config = EnvelopeConfig::default();
    let spec = reference_spec();
    let base = head_on_target();
    let tol = config.solver.bisection_tolerance;

    let straight = solve_profile(&spec, &base, &config.solver).r_max.unwrap();

    for (kind, g) in [
        (ManeuverKind::SustainedTurn, 2.0),
        (ManeuverKind::SustainedTurn, 6.0),
        (ManeuverKind::PeriodicReversal, 3.0),
        (ManeuverKind::PeriodicReversal, 9.0),
    ] {
        let mut profile = assumed_profile(&base, kind, &config.maneuvers);
        profile.maneuver_g = g;
        if let Some(r_max) = solve_profile(&spec, &profile, &config.solver).r_max {
            assert!(
                r_max <= straight + tol,
                "{kind:?} at {g} g reached {r_max:.1}, straight {straight:.1}"
            );
        }
    }
}

// ---- Bisection convergence ----

#[test]
fn test_max_range_converges_on_random_step_thresholds() {
    let search = RangeSearch::default();
    let mut rng = ChaCha8Rng::seed_from_u64(2024);

    for _ in 0..500 {
        // Within one tolerance of the lower seed the edge is never probed.
        let threshold = rng.gen_range(search.seed_low + search.tolerance..search.seed_high);
        let probes = Cell::new(0u32);
        let r = search
            .max_range(|r| {
                probes.set(probes.get() + 1);
                r <= threshold
            })
            .unwrap_or_else(|| panic!("threshold {threshold} unsolved"));

        assert!(r <= threshold);
        assert!(threshold - r < search.tolerance, "T={threshold} r={r}");
        assert!(probes.get() <= search.max_iterations);
    }
}

#[test]
fn test_min_range_converges_on_random_step_thresholds() {
    let search = RangeSearch::default();
    let mut rng = ChaCha8Rng::seed_from_u64(99);

    for _ in 0..500 {
        let seed_max = rng.gen_range(10_000.0..search.seed_high);
        let threshold = rng.gen_range(search.floor..seed_max - search.tolerance);
        let r = search.min_range(|r| r >= threshold, seed_max).unwrap();
        assert!(r >= threshold);
        assert!(r - threshold < search.tolerance, "T={threshold} r={r}");
    }
}

// ---- Sweep ----

#[test]
fn test_sweep_bands_are_ordered() {
    let config = small_sweep();
    let bands = solve_envelope(&reference_spec(), &head_on_target(), &config);

    assert_eq!(bands.len(), 6);
    for (i, band) in bands.iter().enumerate() {
        assert_eq!(band.azimuth_deg, i as f64 * 60.0);
        assert!(band.is_ordered(), "band {i} out of order: {band:?}");
    }
    assert!(bands[0].is_solved(), "boresight launch should be solvable");
}

#[test]
fn test_sweep_is_deterministic() {
    let config = small_sweep();
    let spec = reference_spec();
    let target = TargetProfile::straight(150.0, 2.5);

    let first = solve_envelope(&spec, &target, &config);
    let second = solve_envelope(&spec, &target, &config);
    let serial = solve_envelope_serial(&spec, &target, &config);

    assert_eq!(first, second);
    assert_eq!(first, serial, "parallel and serial sweeps diverged");
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}
