//! Per-azimuth evaluation across the three canonical target maneuvers.
//!
//! Aggregation is asymmetric. The no-escape band comes from the
//! periodic-reversal profile alone; the outer and inner boundaries take the
//! extreme over all three profiles.

use wez_core::config::{EnvelopeConfig, ManeuverAssumptions, SolverSettings};
use wez_core::enums::ManeuverKind;
use wez_core::state::RangeBand;
use wez_core::types::{InterceptorSpec, TargetProfile};

use crate::bisection::RangeSearch;
use crate::trajectory::simulate;

/// Range bounds found for one maneuver profile.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ProfileBounds {
    pub r_max: Option<f64>,
    pub r_min: Option<f64>,
}

/// Bisect for the maximum then minimum launch range of one profile.
///
/// The minimum search is seeded by the maximum; without a maximum there is
/// nothing to seed it and both bounds are unsolved.
pub fn solve_profile(
    spec: &InterceptorSpec,
    profile: &TargetProfile,
    settings: &SolverSettings,
) -> ProfileBounds {
    let search = RangeSearch::from(settings);
    let hits = |range: f64| simulate(spec, profile, range, settings).hit;

    let r_max = search.max_range(hits);
    let r_min = r_max.and_then(|seed| search.min_range(hits, seed));
    ProfileBounds { r_max, r_min }
}

/// The base target profile flown under one maneuver assumption.
pub fn assumed_profile(
    base: &TargetProfile,
    kind: ManeuverKind,
    assumptions: &ManeuverAssumptions,
) -> TargetProfile {
    let mut profile = base.with_maneuver(kind, assumptions.g_load(kind));
    profile.maneuver_period = assumptions.reversal_period;
    profile
}

fn max_solved(values: [Option<f64>; 3]) -> Option<f64> {
    values.into_iter().flatten().reduce(f64::max)
}

fn min_solved(values: [Option<f64>; 3]) -> Option<f64> {
    values.into_iter().flatten().reduce(f64::min)
}

/// Combine the three profile results into one band.
pub fn aggregate(
    azimuth_deg: f64,
    straight: ProfileBounds,
    turn: ProfileBounds,
    reversal: ProfileBounds,
) -> RangeBand {
    RangeBand {
        azimuth_deg,
        r_max: max_solved([straight.r_max, turn.r_max, reversal.r_max]),
        r_min: min_solved([straight.r_min, turn.r_min, reversal.r_min]),
        nez_r_max: reversal.r_max,
        nez_r_min: reversal.r_min,
    }
}

/// Evaluate one azimuth, solving the three profiles concurrently.
///
/// `spec` must already carry the azimuth as its off-boresight angle.
pub fn evaluate_azimuth(
    spec: &InterceptorSpec,
    base: &TargetProfile,
    azimuth_deg: f64,
    config: &EnvelopeConfig,
) -> RangeBand {
    let solve = |kind| {
        let profile = assumed_profile(base, kind, &config.maneuvers);
        solve_profile(spec, &profile, &config.solver)
    };

    let (straight, (turn, reversal)) = rayon::join(
        || solve(ManeuverKind::Straight),
        || {
            rayon::join(
                || solve(ManeuverKind::SustainedTurn),
                || solve(ManeuverKind::PeriodicReversal),
            )
        },
    );
    aggregate(azimuth_deg, straight, turn, reversal)
}

/// Same as [`evaluate_azimuth`], on the calling thread only.
pub fn evaluate_azimuth_serial(
    spec: &InterceptorSpec,
    base: &TargetProfile,
    azimuth_deg: f64,
    config: &EnvelopeConfig,
) -> RangeBand {
    let [straight, turn, reversal] = ManeuverKind::ALL.map(|kind| {
        let profile = assumed_profile(base, kind, &config.maneuvers);
        solve_profile(spec, &profile, &config.solver)
    });
    aggregate(azimuth_deg, straight, turn, reversal)
}
