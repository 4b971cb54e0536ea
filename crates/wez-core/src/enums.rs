//! Enumeration types used throughout the solver.

use serde::{Deserialize, Serialize};

/// Target maneuver assumption used when simulating an engagement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ManeuverKind {
    /// Constant heading, constant speed.
    #[default]
    Straight,
    /// Constant-rate turn at the assumed load factor.
    SustainedTurn,
    /// Turn direction reverses with the sign of `sin(t - period)`.
    PeriodicReversal,
}

impl ManeuverKind {
    /// All maneuver kinds, in evaluation order.
    pub const ALL: [ManeuverKind; 3] = [
        ManeuverKind::Straight,
        ManeuverKind::SustainedTurn,
        ManeuverKind::PeriodicReversal,
    ];
}

/// One of the four boundaries carried by a [`crate::state::RangeBand`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Boundary {
    /// Outer edge of the weapon engagement zone.
    RMax,
    /// Inner edge of the weapon engagement zone.
    RMin,
    /// Outer edge of the no-escape zone.
    NezRMax,
    /// Inner edge of the no-escape zone.
    NezRMin,
}
