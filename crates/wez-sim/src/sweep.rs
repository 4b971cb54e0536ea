//! Azimuth sweep: one band per swept off-boresight angle.

use rayon::prelude::*;
use tracing::trace;

use wez_core::config::EnvelopeConfig;
use wez_core::state::RangeBand;
use wez_core::types::{InterceptorSpec, TargetProfile};

use crate::profiles::{evaluate_azimuth, evaluate_azimuth_serial};

/// Swept azimuths in degrees, evenly spaced from 0 over a full turn.
pub fn azimuths(config: &EnvelopeConfig) -> Vec<f64> {
    let step = config.sweep.step_degrees();
    (0..config.sweep.azimuth_count)
        .map(|i| i as f64 * step)
        .collect()
}

/// Solve every azimuth in parallel on the current `rayon` pool.
///
/// The result is in sweep order regardless of completion order.
pub fn solve_envelope(
    base_spec: &InterceptorSpec,
    target: &TargetProfile,
    config: &EnvelopeConfig,
) -> Vec<RangeBand> {
    azimuths(config)
        .into_par_iter()
        .map(|azimuth_deg| {
            let spec = base_spec.at_off_boresight(azimuth_deg.to_radians());
            let band = evaluate_azimuth(&spec, target, azimuth_deg, config);
            trace!(azimuth_deg, r_max = ?band.r_max, r_min = ?band.r_min, "azimuth solved");
            band
        })
        .collect()
}

/// Solve every azimuth on the calling thread.
pub fn solve_envelope_serial(
    base_spec: &InterceptorSpec,
    target: &TargetProfile,
    config: &EnvelopeConfig,
) -> Vec<RangeBand> {
    azimuths(config)
        .into_iter()
        .map(|azimuth_deg| {
            let spec = base_spec.at_off_boresight(azimuth_deg.to_radians());
            evaluate_azimuth_serial(&spec, target, azimuth_deg, config)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sweep_is_24_steps_of_15_degrees() {
        let az = azimuths(&EnvelopeConfig::default());
        assert_eq!(az.len(), 24);
        assert_eq!(az[0], 0.0);
        assert_eq!(az[1], 15.0);
        assert_eq!(az[23], 345.0);
    }

    #[test]
    fn test_sweep_resolution_follows_config() {
        let mut config = EnvelopeConfig::default();
        config.sweep.azimuth_count = 8;
        let az = azimuths(&config);
        assert_eq!(az, vec![0.0, 45.0, 90.0, 135.0, 180.0, 225.0, 270.0, 315.0]);
    }
}
