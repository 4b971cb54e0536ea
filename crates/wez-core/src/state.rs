//! Envelope snapshot: the complete result published after each orchestration cycle.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::enums::Boundary;
use crate::types::{LauncherGeometry, Position};

/// Launch-range bounds for one swept azimuth.
///
/// A bound is `None` when no simulated launch at any probed range hit the
/// target; that is distinct from every real distance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RangeBand {
    /// Off-boresight launch angle (degrees, 0 = boresight, positive right).
    pub azimuth_deg: f64,
    pub r_max: Option<f64>,
    pub r_min: Option<f64>,
    pub nez_r_max: Option<f64>,
    pub nez_r_min: Option<f64>,
}

impl RangeBand {
    /// An azimuth for which no profile produced a hit.
    pub fn unsolved(azimuth_deg: f64) -> Self {
        Self {
            azimuth_deg,
            ..Default::default()
        }
    }

    /// Whether any maneuver profile produced a hit at this azimuth.
    pub fn is_solved(&self) -> bool {
        self.r_max.is_some()
    }

    pub fn boundary(&self, boundary: Boundary) -> Option<f64> {
        match boundary {
            Boundary::RMax => self.r_max,
            Boundary::RMin => self.r_min,
            Boundary::NezRMax => self.nez_r_max,
            Boundary::NezRMin => self.nez_r_min,
        }
    }

    /// `r_min <= r_max` and `nez_r_min <= nez_r_max` wherever both are solved.
    pub fn is_ordered(&self) -> bool {
        let ordered = |lo: Option<f64>, hi: Option<f64>| match (lo, hi) {
            (Some(lo), Some(hi)) => lo <= hi,
            _ => true,
        };
        ordered(self.r_min, self.r_max) && ordered(self.nez_r_min, self.nez_r_max)
    }
}

/// One complete envelope: a band per swept azimuth, in sweep order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnvelopeSnapshot {
    /// Orchestration cycle that produced this snapshot.
    pub cycle: u64,
    /// Wall-clock solve time of the cycle (milliseconds).
    pub solve_ms: u64,
    pub bands: Vec<RangeBand>,
}

impl EnvelopeSnapshot {
    pub fn new(cycle: u64, solve_ms: u64, bands: Vec<RangeBand>) -> Self {
        Self {
            cycle,
            solve_ms,
            bands,
        }
    }

    /// Number of azimuths with at least one solved bound.
    pub fn solved_count(&self) -> usize {
        self.bands.iter().filter(|b| b.is_solved()).count()
    }

    /// World-space points of one boundary around the launcher.
    ///
    /// Each solved azimuth `a` with radius `r` maps to
    /// `center + (forward * cos a + right * sin a) * r`, at launcher altitude.
    /// Unsolved azimuths are skipped. Returns nothing if the launcher axes
    /// have no horizontal component.
    pub fn boundary_points(&self, boundary: Boundary, launcher: &LauncherGeometry) -> Vec<Position> {
        let Some((forward, right)) = launcher.horizontal_axes() else {
            return Vec::new();
        };
        let center = launcher.position;

        self.bands
            .iter()
            .filter_map(|band| {
                let radius = band.boundary(boundary)?;
                let (sin, cos) = band.azimuth_deg.to_radians().sin_cos();
                let offset = (forward * cos + right * sin) * radius;
                Some(Position::new(center.x + offset.x, center.y + offset.y, center.z))
            })
            .collect()
    }
}

fn fmt_bound(f: &mut fmt::Formatter<'_>, value: Option<f64>) -> fmt::Result {
    match value {
        Some(v) => write!(f, "{v:9.1}m"),
        None => write!(f, "{:>10}", "----"),
    }
}

impl fmt::Display for EnvelopeSnapshot {
    /// Per-azimuth report table, one line per band.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Envelope cycle {} ({} ms, {}/{} azimuths solved):",
            self.cycle,
            self.solve_ms,
            self.solved_count(),
            self.bands.len()
        )?;
        for band in &self.bands {
            write!(f, "[{:5.1}°] RMax:", band.azimuth_deg)?;
            fmt_bound(f, band.r_max)?;
            write!(f, " | RMin:")?;
            fmt_bound(f, band.r_min)?;
            write!(f, " | NEZ:")?;
            fmt_bound(f, band.nez_r_min)?;
            write!(f, " ..")?;
            fmt_bound(f, band.nez_r_max)?;
            writeln!(f)?;
        }
        Ok(())
    }
}
