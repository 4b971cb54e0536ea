//! Solver constants and tuning defaults.
//!
//! Every value here is a default for a field of [`crate::config::EnvelopeConfig`]
//! unless noted otherwise.

/// Standard gravity (m/s²). Fixed, not configurable.
pub const G: f64 = 9.81;

// --- Trajectory integration ---

/// Integration time step (seconds).
pub const TIME_STEP: f64 = 0.05;

/// Hard cap on simulated flight time (seconds).
pub const MAX_FLIGHT_TIME: f64 = 180.0;

/// Miss distance below which the interceptor counts as a hit (meters).
pub const HIT_THRESHOLD: f64 = 100.0;

/// Interceptor speed below which heading rate is forced to zero (m/s).
pub const SPEED_EPSILON: f64 = 0.1;

/// Band around the zero-crossing of `sin(t - period)` in which the
/// periodic-reversal turn rate is forced to zero.
pub const REVERSAL_EPSILON: f64 = 0.001;

/// Target speed below which no maneuver turn rate is produced (m/s).
pub const TARGET_SPEED_EPSILON: f64 = 0.1;

// --- Bisection ---

/// Bracket width at which a range search stops (meters).
pub const BISECTION_TOLERANCE: f64 = 10.0;

/// Maximum bisection iterations per range search.
pub const BISECTION_MAX_ITERATIONS: u32 = 30;

/// Lower end of the seed bracket for the maximum-range search (meters).
pub const MAX_RANGE_SEED_LOW: f64 = 500.0;

/// Upper end of the seed bracket for the maximum-range search (meters).
pub const MAX_RANGE_SEED_HIGH: f64 = 1_000_000.0;

/// Physical floor for the minimum-range search (meters).
pub const MIN_RANGE_FLOOR: f64 = 100.0;

// --- Interceptor performance ---

/// Launch speed (m/s), roughly Mach 2.
pub const INTERCEPTOR_VELOCITY: f64 = 600.0;

/// Interceptor mass (kg).
pub const INTERCEPTOR_MASS: f64 = 150.0;

/// Sustained motor thrust (N).
pub const INTERCEPTOR_THRUST: f64 = 500.0;

/// Zero-lift drag coefficient: drag = coeff * speed².
pub const INTERCEPTOR_DRAG_COEFF: f64 = 0.02;

/// Maximum lateral overload (g).
pub const INTERCEPTOR_MAX_OVERLOAD: f64 = 30.0;

/// Proportional navigation gain (dimensionless).
pub const INTERCEPTOR_GUIDANCE_GAIN: f64 = 3.0;

// --- Target maneuver assumptions ---

/// Load factor assumed for the non-maneuvering profile (g).
pub const STRAIGHT_MANEUVER_G: f64 = 1.0;

/// Load factor assumed for the sustained-turn profile (g).
pub const SUSTAINED_TURN_G: f64 = 2.0;

/// Load factor assumed for the periodic-reversal (no-escape) profile (g).
pub const PERIODIC_REVERSAL_G: f64 = 9.0;

/// Phase offset of the periodic-reversal maneuver (seconds).
pub const PERIODIC_REVERSAL_PERIOD: f64 = 5.0;

// --- Sweep and cadence ---

/// Number of azimuths swept around the launcher (15° spacing).
pub const AZIMUTH_COUNT: usize = 24;

/// Interval between orchestration cycles (seconds).
pub const CYCLE_INTERVAL_SECS: f64 = 1.0;
