//! Planar pursuit simulation of one interceptor launch.
//!
//! The engagement frame puts the launcher at the origin with x along its
//! boresight. Headings grow toward the launcher's right, so a body at heading
//! `ψ` moves along `(cos ψ, -sin ψ)`. The target starts on the boresight at
//! the candidate range and flies its maneuver law; the interceptor flies
//! proportional navigation integrated with fixed-step RK4.

use glam::DVec2;

use wez_core::config::SolverSettings;
use wez_core::constants::{G, SPEED_EPSILON};
use wez_core::types::{InterceptorSpec, TargetProfile};

use crate::geometry::shortest_angle_diff;
use crate::maneuver::ManeuverLaw;

/// Unit direction of travel for a heading in the engagement frame.
fn heading_vector(heading: f64) -> DVec2 {
    let (sin, cos) = heading.sin_cos();
    DVec2::new(cos, -sin)
}

/// Interceptor integration state. Created per run, never shared.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimState {
    pub position: DVec2,
    /// Speed (m/s).
    pub speed: f64,
    /// Heading (radians).
    pub heading: f64,
    /// Elapsed engagement time (seconds).
    pub time: f64,
}

/// Time derivative of the integrated components of [`SimState`].
#[derive(Debug, Clone, Copy, PartialEq)]
struct Derivative {
    position: DVec2,
    speed: f64,
    heading: f64,
}

impl SimState {
    /// State at launch: launcher origin, launch speed, off-boresight heading.
    pub fn launch(spec: &InterceptorSpec) -> Self {
        Self {
            position: DVec2::ZERO,
            speed: spec.velocity,
            heading: spec.off_boresight,
            time: 0.0,
        }
    }

    fn derivative(&self, spec: &InterceptorSpec, commanded_g: f64) -> Derivative {
        let drag = spec.drag_coeff * self.speed * self.speed;
        let heading = if self.speed > SPEED_EPSILON {
            G * commanded_g / self.speed
        } else {
            0.0
        };
        Derivative {
            position: heading_vector(self.heading) * self.speed,
            speed: (spec.thrust - drag) / spec.mass,
            heading,
        }
    }

    fn offset(&self, d: &Derivative, h: f64) -> Self {
        Self {
            position: self.position + d.position * h,
            speed: self.speed + d.speed * h,
            heading: self.heading + d.heading * h,
            time: self.time,
        }
    }

    /// Advance one RK4 step of length `dt` holding the guidance command fixed.
    pub fn rk4_step(&self, spec: &InterceptorSpec, commanded_g: f64, dt: f64) -> Self {
        let d1 = self.derivative(spec, commanded_g);
        let d2 = self.offset(&d1, dt * 0.5).derivative(spec, commanded_g);
        let d3 = self.offset(&d2, dt * 0.5).derivative(spec, commanded_g);
        let d4 = self.offset(&d3, dt).derivative(spec, commanded_g);

        let w = dt / 6.0;
        Self {
            position: self.position
                + (d1.position + d2.position * 2.0 + d3.position * 2.0 + d4.position) * w,
            speed: self.speed + (d1.speed + 2.0 * d2.speed + 2.0 * d3.speed + d4.speed) * w,
            heading: self.heading
                + (d1.heading + 2.0 * d2.heading + 2.0 * d3.heading + d4.heading) * w,
            time: self.time + dt,
        }
    }
}

/// Target kinematic state, advanced with explicit Euler at constant speed.
#[derive(Debug, Clone, Copy, PartialEq)]
struct TargetState {
    position: DVec2,
    heading: f64,
}

impl TargetState {
    fn advance(&self, heading_rate: f64, speed: f64, dt: f64) -> Self {
        let heading = self.heading + heading_rate * dt;
        Self {
            position: self.position + heading_vector(heading) * (speed * dt),
            heading,
        }
    }
}

/// Proportional navigation command in g, clamped to the overload limit.
pub fn commanded_overload(spec: &InterceptorSpec, speed: f64, los_rate: f64) -> f64 {
    let nz = spec.guidance_gain * speed * los_rate / G;
    nz.clamp(-spec.max_overload, spec.max_overload)
}

/// Result of one simulated launch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimOutcome {
    pub hit: bool,
    /// Closest approach observed before termination (meters).
    pub min_miss: f64,
    /// Engagement time at termination (seconds).
    pub elapsed: f64,
}

/// Simulate a launch with the target initially `initial_range` meters down the boresight.
pub fn simulate(
    spec: &InterceptorSpec,
    profile: &TargetProfile,
    initial_range: f64,
    settings: &SolverSettings,
) -> SimOutcome {
    let dt = settings.time_step;
    let law = ManeuverLaw::from_profile(profile);

    let mut state = SimState::launch(spec);
    let mut target = TargetState {
        position: DVec2::new(initial_range, 0.0),
        heading: profile.initial_aspect,
    };
    let mut min_miss = f64::INFINITY;
    let mut last_los: Option<f64> = None;

    while state.time < settings.max_flight_time {
        target = target.advance(law.heading_rate(state.time), profile.speed, dt);

        let los = target.position - state.position;
        let distance = los.length();
        min_miss = min_miss.min(distance);
        if distance < settings.hit_threshold {
            return SimOutcome {
                hit: true,
                min_miss,
                elapsed: state.time,
            };
        }

        // LOS angle in the heading convention (positive right).
        let los_angle = (-los.y).atan2(los.x);
        let los_rate = match last_los {
            Some(prev) => shortest_angle_diff(prev, los_angle) / dt,
            None => 0.0,
        };
        last_los = Some(los_angle);

        let commanded_g = commanded_overload(spec, state.speed, los_rate);
        state = state.rk4_step(spec, commanded_g, dt);
    }

    SimOutcome {
        hit: false,
        min_miss,
        elapsed: state.time,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};
    use wez_core::config::InterceptorConfig;

    fn spec() -> InterceptorSpec {
        InterceptorConfig::default().spec()
    }

    #[test]
    fn test_speed_relaxes_toward_thrust_drag_balance() {
        // Thrust 500 N, drag 0.02 v²: equilibrium at sqrt(25000) ≈ 158 m/s.
        let spec = spec();
        let mut state = SimState::launch(&spec);
        for _ in 0..2400 {
            state = state.rk4_step(&spec, 0.0, 0.05);
        }
        let terminal = (spec.thrust / spec.drag_coeff).sqrt();
        assert!(state.speed > terminal);
        assert!(state.speed - terminal < 10.0, "speed {:.1}", state.speed);
        assert!((state.time - 120.0).abs() < 1e-6);
    }

    #[test]
    fn test_unguided_flight_follows_heading() {
        let spec = spec().at_off_boresight(FRAC_PI_2);
        let state = SimState::launch(&spec).rk4_step(&spec, 0.0, 0.05);
        // Heading +90° is the launcher's right: -y in the engagement frame.
        assert!(state.position.x.abs() < 1e-9);
        assert!(state.position.y < -25.0);
        assert_eq!(state.heading, FRAC_PI_2);
    }

    #[test]
    fn test_turn_rate_is_g_over_v() {
        let mut spec = spec();
        spec.thrust = spec.drag_coeff * spec.velocity * spec.velocity; // hold speed
        let state = SimState::launch(&spec).rk4_step(&spec, 10.0, 0.05);
        let expected = G * 10.0 / spec.velocity * 0.05;
        assert!((state.heading - expected).abs() < 1e-9);
    }

    #[test]
    fn test_near_zero_speed_does_not_turn() {
        let mut spec = spec();
        spec.velocity = 0.0;
        spec.thrust = 0.0;
        let state = SimState::launch(&spec).rk4_step(&spec, 30.0, 0.05);
        assert_eq!(state.heading, 0.0);
        assert!(state.speed.is_finite());
    }

    #[test]
    fn test_command_clamped_to_overload() {
        let spec = spec();
        assert_eq!(commanded_overload(&spec, 600.0, 10.0), spec.max_overload);
        assert_eq!(commanded_overload(&spec, 600.0, -10.0), -spec.max_overload);
        let small = commanded_overload(&spec, 600.0, 0.01);
        assert!((small - 3.0 * 600.0 * 0.01 / G).abs() < 1e-12);
    }

    #[test]
    fn test_point_blank_target_is_immediate_hit() {
        let outcome = simulate(
            &spec(),
            &TargetProfile::straight(150.0, PI),
            50.0,
            &SolverSettings::default(),
        );
        assert!(outcome.hit);
        assert_eq!(outcome.elapsed, 0.0);
    }

    #[test]
    fn test_head_on_hit_and_out_of_reach_miss() {
        let settings = SolverSettings::default();
        let target = TargetProfile::straight(150.0, PI);

        let near = simulate(&spec(), &target, 20_000.0, &settings);
        assert!(near.hit);
        assert!(near.min_miss < settings.hit_threshold);

        let far = simulate(&spec(), &target, 200_000.0, &settings);
        assert!(!far.hit);
        assert!(far.min_miss > settings.hit_threshold);
        assert!(far.elapsed >= settings.max_flight_time);
    }

    #[test]
    fn test_tail_chase_is_shorter_than_head_on() {
        // At ~158 m/s terminal speed the interceptor barely outruns a 150 m/s
        // target, so 20 km is reachable head-on but not in a tail chase.
        let settings = SolverSettings::default();
        let fleeing = TargetProfile::straight(150.0, 0.0);
        assert!(simulate(&spec(), &fleeing, 5_000.0, &settings).hit);
        assert!(!simulate(&spec(), &fleeing, 20_000.0, &settings).hit);
    }

    #[test]
    fn test_guidance_corrects_off_boresight_launch() {
        let settings = SolverSettings::default();
        let spec = spec().at_off_boresight(30f64.to_radians());
        let outcome = simulate(&spec, &TargetProfile::straight(150.0, PI), 15_000.0, &settings);
        assert!(outcome.hit, "min miss {:.1}", outcome.min_miss);
    }

    #[test]
    fn test_unguided_off_boresight_launch_misses() {
        let settings = SolverSettings::default();
        let mut spec = spec().at_off_boresight(30f64.to_radians());
        spec.guidance_gain = 0.0;
        let outcome = simulate(&spec, &TargetProfile::straight(150.0, PI), 15_000.0, &settings);
        assert!(!outcome.hit);
    }

    #[test]
    fn test_reversing_target_simulation_stays_finite() {
        let settings = SolverSettings::default();
        let mut target = TargetProfile::straight(150.0, PI)
            .with_maneuver(wez_core::enums::ManeuverKind::PeriodicReversal, 9.0);
        target.maneuver_period = 5.0;
        let outcome = simulate(&spec(), &target, 30_000.0, &settings);
        assert!(outcome.min_miss.is_finite());
        assert!(outcome.elapsed <= settings.max_flight_time + settings.time_step);
    }
}
