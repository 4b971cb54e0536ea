//! Configuration models and loaders.
//!
//! Every section falls back to the defaults in [`crate::constants`], so an
//! empty file (or no file at all) yields the reference configuration.

use std::fs::File;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::*;
use crate::enums::ManeuverKind;
use crate::types::InterceptorSpec;

/// Errors that can occur while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Complete solver configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvelopeConfig {
    pub interceptor: InterceptorConfig,
    pub maneuvers: ManeuverAssumptions,
    pub solver: SolverSettings,
    pub sweep: SweepSettings,
    pub cadence: CadenceSettings,
}

/// Interceptor performance, shared by every azimuth of a sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterceptorConfig {
    pub velocity: f64,
    pub mass: f64,
    pub thrust: f64,
    pub drag_coeff: f64,
    pub max_overload: f64,
    pub guidance_gain: f64,
}

impl Default for InterceptorConfig {
    fn default() -> Self {
        Self {
            velocity: INTERCEPTOR_VELOCITY,
            mass: INTERCEPTOR_MASS,
            thrust: INTERCEPTOR_THRUST,
            drag_coeff: INTERCEPTOR_DRAG_COEFF,
            max_overload: INTERCEPTOR_MAX_OVERLOAD,
            guidance_gain: INTERCEPTOR_GUIDANCE_GAIN,
        }
    }
}

impl InterceptorConfig {
    /// Interceptor spec launched along the boresight.
    pub fn spec(&self) -> InterceptorSpec {
        InterceptorSpec {
            velocity: self.velocity,
            mass: self.mass,
            thrust: self.thrust,
            drag_coeff: self.drag_coeff,
            max_overload: self.max_overload,
            guidance_gain: self.guidance_gain,
            off_boresight: 0.0,
        }
    }
}

/// Load factors assumed for each canonical target maneuver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManeuverAssumptions {
    pub straight_g: f64,
    pub sustained_turn_g: f64,
    pub reversal_g: f64,
    /// Phase offset of the periodic reversal (seconds).
    pub reversal_period: f64,
}

impl Default for ManeuverAssumptions {
    fn default() -> Self {
        Self {
            straight_g: STRAIGHT_MANEUVER_G,
            sustained_turn_g: SUSTAINED_TURN_G,
            reversal_g: PERIODIC_REVERSAL_G,
            reversal_period: PERIODIC_REVERSAL_PERIOD,
        }
    }
}

impl ManeuverAssumptions {
    /// Load factor assumed for a maneuver kind.
    pub fn g_load(&self, kind: ManeuverKind) -> f64 {
        match kind {
            ManeuverKind::Straight => self.straight_g,
            ManeuverKind::SustainedTurn => self.sustained_turn_g,
            ManeuverKind::PeriodicReversal => self.reversal_g,
        }
    }
}

/// Trajectory integration and bisection settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverSettings {
    pub time_step: f64,
    pub max_flight_time: f64,
    pub hit_threshold: f64,
    pub bisection_tolerance: f64,
    pub max_iterations: u32,
    pub max_range_seed_low: f64,
    pub max_range_seed_high: f64,
    pub min_range_floor: f64,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            time_step: TIME_STEP,
            max_flight_time: MAX_FLIGHT_TIME,
            hit_threshold: HIT_THRESHOLD,
            bisection_tolerance: BISECTION_TOLERANCE,
            max_iterations: BISECTION_MAX_ITERATIONS,
            max_range_seed_low: MAX_RANGE_SEED_LOW,
            max_range_seed_high: MAX_RANGE_SEED_HIGH,
            min_range_floor: MIN_RANGE_FLOOR,
        }
    }
}

/// Azimuth sweep resolution and worker pool sizing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepSettings {
    pub azimuth_count: usize,
    /// Worker threads for the solve pool; `None` uses one per CPU.
    pub worker_threads: Option<usize>,
}

impl Default for SweepSettings {
    fn default() -> Self {
        Self {
            azimuth_count: AZIMUTH_COUNT,
            worker_threads: None,
        }
    }
}

impl SweepSettings {
    /// Spacing between swept azimuths (degrees).
    pub fn step_degrees(&self) -> f64 {
        360.0 / self.azimuth_count as f64
    }
}

/// Orchestration cadence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CadenceSettings {
    pub interval_secs: f64,
}

impl Default for CadenceSettings {
    fn default() -> Self {
        Self {
            interval_secs: CYCLE_INTERVAL_SECS,
        }
    }
}

impl EnvelopeConfig {
    /// Load and validate a config from a `.toml` or YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let config: EnvelopeConfig =
            if path.extension().map(|ext| ext == "toml").unwrap_or(false) {
                let contents = std::fs::read_to_string(path)?;
                toml::from_str(&contents)?
            } else {
                let reader = File::open(path)?;
                serde_yaml::from_reader(reader)?
            };
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a config from a TOML string.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: EnvelopeConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every value the solver divides by or iterates on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let i = &self.interceptor;
        positive("interceptor.velocity", i.velocity)?;
        positive("interceptor.mass", i.mass)?;
        non_negative("interceptor.thrust", i.thrust)?;
        non_negative("interceptor.drag_coeff", i.drag_coeff)?;
        positive("interceptor.max_overload", i.max_overload)?;
        non_negative("interceptor.guidance_gain", i.guidance_gain)?;

        let m = &self.maneuvers;
        non_negative("maneuvers.straight_g", m.straight_g)?;
        non_negative("maneuvers.sustained_turn_g", m.sustained_turn_g)?;
        non_negative("maneuvers.reversal_g", m.reversal_g)?;
        finite("maneuvers.reversal_period", m.reversal_period)?;

        let s = &self.solver;
        positive("solver.time_step", s.time_step)?;
        positive("solver.max_flight_time", s.max_flight_time)?;
        positive("solver.hit_threshold", s.hit_threshold)?;
        positive("solver.bisection_tolerance", s.bisection_tolerance)?;
        if s.max_iterations == 0 {
            return Err(invalid("solver.max_iterations", "must be at least 1"));
        }
        non_negative("solver.min_range_floor", s.min_range_floor)?;
        positive("solver.max_range_seed_low", s.max_range_seed_low)?;
        if s.max_range_seed_high <= s.max_range_seed_low {
            return Err(invalid(
                "solver.max_range_seed_high",
                format!("must exceed max_range_seed_low ({})", s.max_range_seed_low),
            ));
        }

        if self.sweep.azimuth_count == 0 {
            return Err(invalid("sweep.azimuth_count", "must be at least 1"));
        }
        if self.sweep.worker_threads == Some(0) {
            return Err(invalid("sweep.worker_threads", "must be at least 1 when set"));
        }

        positive("cadence.interval_secs", self.cadence.interval_secs)
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}

fn finite(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(invalid(field, format!("must be finite, got {value}")))
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("must be positive, got {value}")))
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("must not be negative, got {value}")))
    }
}
