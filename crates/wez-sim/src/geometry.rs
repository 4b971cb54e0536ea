//! Launcher-frame engagement geometry.
//!
//! Bearings are measured in the launcher's horizontal plane from its
//! boresight, positive toward its right, the same convention the trajectory
//! simulator uses for headings.

use std::f64::consts::{PI, TAU};

use glam::DVec2;

use wez_core::types::{LauncherGeometry, TargetDesignation, TargetProfile};

/// Signed shortest rotation from angle `from` to angle `to`, in `[-π, π)`.
pub fn shortest_angle_diff(from: f64, to: f64) -> f64 {
    (to - from + PI).rem_euclid(TAU) - PI
}

/// Wrap an angle into `[-π, π)`.
pub fn wrap_angle(angle: f64) -> f64 {
    shortest_angle_diff(0.0, angle)
}

/// Bearing of a horizontal vector relative to the launcher axes.
fn local_bearing(v: DVec2, forward: DVec2, right: DVec2) -> f64 {
    v.dot(right).atan2(v.dot(forward))
}

/// Target state expressed relative to the launcher for one cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngagementGeometry {
    /// Horizontal distance launcher → target (meters).
    pub range: f64,
    /// Line-of-sight bearing off the launcher boresight (radians).
    pub los_bearing: f64,
    /// Target velocity bearing off the launcher boresight (radians).
    pub target_bearing: f64,
    /// Target heading relative to the line of sight (radians, wrapped).
    pub initial_aspect: f64,
    /// Horizontal target speed (m/s).
    pub target_speed: f64,
}

impl EngagementGeometry {
    /// Project a designation into the launcher frame.
    ///
    /// Returns `None` if the launcher axes have no horizontal component.
    pub fn resolve(launcher: &LauncherGeometry, target: &TargetDesignation) -> Option<Self> {
        let (forward, right) = launcher.horizontal_axes()?;

        let relative = launcher.position.horizontal_offset_to(&target.position);
        let velocity = target.velocity.horizontal();

        let los_bearing = local_bearing(relative, forward, right);
        let target_bearing = local_bearing(velocity, forward, right);

        Some(Self {
            range: relative.length(),
            los_bearing,
            target_bearing,
            initial_aspect: wrap_angle(target_bearing - los_bearing),
            target_speed: velocity.length(),
        })
    }

    /// Non-maneuvering target profile seeded from this geometry.
    pub fn target_profile(&self) -> TargetProfile {
        TargetProfile::straight(self.target_speed, self.initial_aspect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec3;
    use std::f64::consts::FRAC_PI_2;
    use wez_core::types::{Position, Velocity};

    fn north_facing() -> LauncherGeometry {
        LauncherGeometry {
            position: Position::new(0.0, 0.0, 1000.0),
            forward: DVec3::Y,
            right: DVec3::X,
        }
    }

    #[test]
    fn test_shortest_angle_diff_wraps() {
        assert!((shortest_angle_diff(0.1, -0.1) + 0.2).abs() < 1e-12);
        // Crossing the ±π seam takes the short way round.
        let d = shortest_angle_diff(PI - 0.05, -PI + 0.05);
        assert!((d - 0.1).abs() < 1e-12, "got {d}");
        let d = shortest_angle_diff(-PI + 0.05, PI - 0.05);
        assert!((d + 0.1).abs() < 1e-12, "got {d}");
    }

    #[test]
    fn test_head_on_target_has_pi_aspect() {
        let target = TargetDesignation {
            position: Position::new(0.0, 20_000.0, 3000.0),
            velocity: Velocity::new(0.0, -150.0, 0.0),
        };
        let geom = EngagementGeometry::resolve(&north_facing(), &target).unwrap();
        assert!(geom.los_bearing.abs() < 1e-12);
        assert!((geom.initial_aspect.abs() - PI).abs() < 1e-12);
        assert!((geom.range - 20_000.0).abs() < 1e-9);
        assert!((geom.target_speed - 150.0).abs() < 1e-9);
    }

    #[test]
    fn test_bearings_positive_to_the_right() {
        // Target due East of a North-facing launcher, flying North.
        let target = TargetDesignation {
            position: Position::new(5000.0, 0.0, 0.0),
            velocity: Velocity::new(0.0, 200.0, 0.0),
        };
        let geom = EngagementGeometry::resolve(&north_facing(), &target).unwrap();
        assert!((geom.los_bearing - FRAC_PI_2).abs() < 1e-12);
        assert!(geom.target_bearing.abs() < 1e-12);
        assert!((geom.initial_aspect + FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn test_altitude_and_climb_are_ignored() {
        let target = TargetDesignation {
            position: Position::new(3000.0, 4000.0, 9000.0),
            velocity: Velocity::new(0.0, 0.0, -300.0),
        };
        let geom = EngagementGeometry::resolve(&north_facing(), &target).unwrap();
        assert!((geom.range - 5000.0).abs() < 1e-9);
        assert_eq!(geom.target_speed, 0.0);
    }

    #[test]
    fn test_vertical_boresight_is_rejected() {
        let launcher = LauncherGeometry {
            forward: DVec3::Z,
            ..north_facing()
        };
        assert!(EngagementGeometry::resolve(&launcher, &TargetDesignation::default()).is_none());
    }

    #[test]
    fn test_profile_seeded_from_geometry() {
        let target = TargetDesignation {
            position: Position::new(0.0, 10_000.0, 0.0),
            velocity: Velocity::new(150.0, 0.0, 0.0),
        };
        let profile = EngagementGeometry::resolve(&north_facing(), &target)
            .unwrap()
            .target_profile();
        assert!((profile.speed - 150.0).abs() < 1e-9);
        assert!((profile.initial_aspect - FRAC_PI_2).abs() < 1e-12);
    }
}
