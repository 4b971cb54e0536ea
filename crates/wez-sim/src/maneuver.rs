//! Target maneuver laws.
//!
//! Each law maps elapsed engagement time to a target heading rate. Singular
//! points are guarded inside the law that has them.

use wez_core::constants::{G, REVERSAL_EPSILON, TARGET_SPEED_EPSILON};
use wez_core::enums::ManeuverKind;
use wez_core::types::TargetProfile;

/// Heading-rate law flown by the simulated target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ManeuverLaw {
    /// No turn.
    Straight,
    /// Constant turn rate (rad/s).
    SustainedTurn { rate: f64 },
    /// Turn rate `-a / (V * sin(t - period))`, zero near the sine's zero-crossings.
    PeriodicReversal {
        /// Lateral acceleration `g * G` (m/s²).
        lateral_accel: f64,
        speed: f64,
        period: f64,
    },
}

impl ManeuverLaw {
    /// Build the law for a target profile.
    ///
    /// A (nearly) stationary target cannot turn, whatever its assumed load factor.
    pub fn from_profile(profile: &TargetProfile) -> Self {
        if profile.speed < TARGET_SPEED_EPSILON {
            return ManeuverLaw::Straight;
        }
        match profile.kind {
            ManeuverKind::Straight => ManeuverLaw::Straight,
            ManeuverKind::SustainedTurn => ManeuverLaw::SustainedTurn {
                rate: G * profile.maneuver_g / profile.speed,
            },
            ManeuverKind::PeriodicReversal => ManeuverLaw::PeriodicReversal {
                lateral_accel: G * profile.maneuver_g,
                speed: profile.speed,
                period: profile.maneuver_period,
            },
        }
    }

    /// Target heading rate (rad/s) at engagement time `time` (seconds).
    pub fn heading_rate(&self, time: f64) -> f64 {
        match *self {
            ManeuverLaw::Straight => 0.0,
            ManeuverLaw::SustainedTurn { rate } => rate,
            ManeuverLaw::PeriodicReversal {
                lateral_accel,
                speed,
                period,
            } => {
                let sin = (time - period).sin();
                if sin.abs() > REVERSAL_EPSILON {
                    -lateral_accel / (speed * sin)
                } else {
                    0.0
                }
            }
        }
    }

    /// Upper bound on `|heading_rate(t)|` over all `t`.
    pub fn max_abs_rate(&self) -> f64 {
        match *self {
            ManeuverLaw::Straight => 0.0,
            ManeuverLaw::SustainedTurn { rate } => rate.abs(),
            ManeuverLaw::PeriodicReversal {
                lateral_accel,
                speed,
                ..
            } => lateral_accel.abs() / (speed * REVERSAL_EPSILON),
        }
    }
}
