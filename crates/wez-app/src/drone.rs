//! Wandering demo target for headless runs.
//!
//! Flies at constant speed and altitude, jittering its heading from a seeded
//! RNG and turning back toward the launcher once outside the patrol radius.
//! Headings are clockwise from North (+Y), matching the launcher frame.

use std::time::Duration;

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use wez_core::types::{LauncherGeometry, Position, TargetDesignation, Velocity};
use wez_sim::geometry::{shortest_angle_diff, wrap_angle};

use crate::cycle_loop::DesignationSource;

#[derive(Debug, Clone, PartialEq)]
pub struct DroneSettings {
    /// Cruise speed (m/s).
    pub speed: f64,
    /// Largest random heading change per second (radians).
    pub max_jitter_rate: f64,
    /// Turn rate used to return inside the patrol radius (radians/s).
    pub return_rate: f64,
    /// Distance from the launcher beyond which the drone turns back (meters).
    pub patrol_radius: f64,
}

impl Default for DroneSettings {
    fn default() -> Self {
        Self {
            speed: 150.0,
            max_jitter_rate: 0.2,
            return_rate: 0.15,
            patrol_radius: 30_000.0,
        }
    }
}

pub struct TargetDrone {
    settings: DroneSettings,
    launcher: LauncherGeometry,
    position: Position,
    heading: f64,
    rng: ChaCha8Rng,
}

impl TargetDrone {
    pub fn new(
        settings: DroneSettings,
        launcher: LauncherGeometry,
        start: Position,
        heading: f64,
        seed: u64,
    ) -> Self {
        Self {
            settings,
            launcher,
            position: start,
            heading: wrap_angle(heading),
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Drone 20 km north of a default launcher, inbound.
    pub fn inbound(seed: u64) -> Self {
        let launcher = LauncherGeometry::default();
        let start = Position::new(0.0, 20_000.0, launcher.position.z + 1000.0);
        Self::new(
            DroneSettings::default(),
            launcher,
            start,
            std::f64::consts::PI,
            seed,
        )
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn velocity(&self) -> Velocity {
        let (sin, cos) = self.heading.sin_cos();
        Velocity::new(self.settings.speed * sin, self.settings.speed * cos, 0.0)
    }

    pub fn designation(&self) -> TargetDesignation {
        TargetDesignation {
            position: self.position,
            velocity: self.velocity(),
        }
    }

    /// Advance the drone by `dt` seconds.
    pub fn advance(&mut self, dt: f64) {
        if dt <= 0.0 {
            return;
        }

        let jitter = self.settings.max_jitter_rate;
        let mut turn = self.rng.gen_range(-jitter..=jitter) * dt;

        let offset = self.launcher.position.horizontal_offset_to(&self.position);
        if offset.length() > self.settings.patrol_radius {
            // Bearing from the drone back to the launcher
            let home = (-offset.x).atan2(-offset.y);
            let limit = self.settings.return_rate * dt;
            turn += shortest_angle_diff(self.heading, home).clamp(-limit, limit);
        }
        self.heading = wrap_angle(self.heading + turn);

        let velocity = self.velocity();
        self.position.x += velocity.x * dt;
        self.position.y += velocity.y * dt;
    }
}

impl DesignationSource for TargetDrone {
    fn sample(&mut self, elapsed: Duration) -> (Option<TargetDesignation>, LauncherGeometry) {
        self.advance(elapsed.as_secs_f64());
        (Some(self.designation()), self.launcher)
    }
}
