//! Engagement envelope solver.
//!
//! Simulates interceptor-versus-target pursuits, bisects for the launch
//! range boundaries, and sweeps the evaluation across azimuths in parallel.
//! Everything here is a pure function of its inputs; threading beyond the
//! ambient `rayon` pool and publication of results live in `wez-app`.

pub mod bisection;
pub mod geometry;
pub mod maneuver;
pub mod profiles;
pub mod sweep;
pub mod trajectory;

pub use wez_core as core;
pub use bisection::RangeSearch;
pub use geometry::EngagementGeometry;
pub use maneuver::ManeuverLaw;
pub use trajectory::{simulate, SimOutcome};

#[cfg(test)]
mod tests;
