//! Fundamental geometric and engagement types.

use glam::{DVec2, DVec3};
use serde::{Deserialize, Serialize};

use crate::enums::ManeuverKind;

/// 3D position in world space (meters, Cartesian).
/// x = East, y = North, z = Up (altitude).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// 3D velocity in world space (m/s).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Horizontal offset to another position (ignoring altitude).
    pub fn horizontal_offset_to(&self, other: &Position) -> DVec2 {
        DVec2::new(other.x - self.x, other.y - self.y)
    }
}

impl Velocity {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Horizontal speed (ignoring vertical component).
    pub fn horizontal_speed(&self) -> f64 {
        self.horizontal().length()
    }

    /// Horizontal component of the velocity.
    pub fn horizontal(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }
}

/// Launcher pose supplied once per orchestration cycle.
///
/// `forward` and `right` need not be normalized or horizontal; they are
/// flattened onto the horizontal plane before use.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LauncherGeometry {
    pub position: Position,
    pub forward: DVec3,
    pub right: DVec3,
}

impl Default for LauncherGeometry {
    /// Launcher at the origin facing North, right wing pointing East.
    fn default() -> Self {
        Self {
            position: Position::default(),
            forward: DVec3::Y,
            right: DVec3::X,
        }
    }
}

impl LauncherGeometry {
    /// Unit forward and right vectors projected onto the horizontal plane.
    ///
    /// Returns `None` if either axis is vertical (or zero).
    pub fn horizontal_axes(&self) -> Option<(DVec2, DVec2)> {
        let forward = self.forward.truncate().try_normalize()?;
        let right = self.right.truncate().try_normalize()?;
        Some((forward, right))
    }
}

/// A designated target sample, taken at orchestration-cycle time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TargetDesignation {
    pub position: Position,
    pub velocity: Velocity,
}

/// Interceptor performance plus the launch off-boresight angle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InterceptorSpec {
    /// Launch speed (m/s).
    pub velocity: f64,
    /// Mass (kg).
    pub mass: f64,
    /// Thrust (N).
    pub thrust: f64,
    /// Drag = `drag_coeff * speed²`.
    pub drag_coeff: f64,
    /// Maximum lateral overload (g).
    pub max_overload: f64,
    /// Proportional navigation gain.
    pub guidance_gain: f64,
    /// Initial heading relative to the launcher boresight (radians, positive right).
    pub off_boresight: f64,
}

impl InterceptorSpec {
    /// Copy of this spec launched at a different off-boresight angle.
    pub fn at_off_boresight(&self, off_boresight: f64) -> Self {
        Self {
            off_boresight,
            ..*self
        }
    }
}

/// Target motion assumption for one simulated engagement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetProfile {
    /// Speed magnitude (m/s).
    pub speed: f64,
    /// Initial target heading relative to the line of sight (radians).
    pub initial_aspect: f64,
    /// Maneuver load factor (g).
    pub maneuver_g: f64,
    /// Periodic-reversal phase offset (seconds).
    pub maneuver_period: f64,
    pub kind: ManeuverKind,
}

impl TargetProfile {
    /// Non-maneuvering target with the given speed and aspect.
    pub fn straight(speed: f64, initial_aspect: f64) -> Self {
        Self {
            speed,
            initial_aspect,
            maneuver_g: 1.0,
            maneuver_period: 0.0,
            kind: ManeuverKind::Straight,
        }
    }

    /// Copy of this profile flying a different maneuver.
    pub fn with_maneuver(&self, kind: ManeuverKind, maneuver_g: f64) -> Self {
        Self {
            kind,
            maneuver_g,
            ..*self
        }
    }
}
