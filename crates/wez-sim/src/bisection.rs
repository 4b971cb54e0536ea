//! Bisection search for launch range boundaries.
//!
//! The hit predicate is treated as a black-box oracle and assumed to be true
//! on one contiguous range interval. If it is not, the search still
//! terminates but may settle on the wrong boundary without noticing.

use wez_core::config::SolverSettings;

/// Seed brackets and stop conditions for the range searches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeSearch {
    /// Lower end of the maximum-range seed bracket (meters).
    pub seed_low: f64,
    /// Upper end of the maximum-range seed bracket (meters).
    pub seed_high: f64,
    /// Lower end of the minimum-range bracket (meters).
    pub floor: f64,
    /// Stop once the bracket is narrower than this (meters).
    pub tolerance: f64,
    pub max_iterations: u32,
}

impl From<&SolverSettings> for RangeSearch {
    fn from(settings: &SolverSettings) -> Self {
        Self {
            seed_low: settings.max_range_seed_low,
            seed_high: settings.max_range_seed_high,
            floor: settings.min_range_floor,
            tolerance: settings.bisection_tolerance,
            max_iterations: settings.max_iterations,
        }
    }
}

impl Default for RangeSearch {
    fn default() -> Self {
        Self::from(&SolverSettings::default())
    }
}

impl RangeSearch {
    /// Largest probed range that hit, or `None` if no probe hit.
    ///
    /// A hit raises the lower bound, a miss lowers the upper bound.
    pub fn max_range(&self, hits: impl Fn(f64) -> bool) -> Option<f64> {
        let mut low = self.seed_low;
        let mut high = self.seed_high;
        let mut best = None;

        for _ in 0..self.max_iterations {
            let probe = 0.5 * (low + high);
            if hits(probe) {
                best = Some(probe);
                low = probe;
            } else {
                high = probe;
            }
            if high - low < self.tolerance {
                break;
            }
        }
        best
    }

    /// Smallest probed range in `[floor, seed_max]` that hit, or `None`.
    ///
    /// A hit lowers the upper bound, a miss raises the lower bound.
    pub fn min_range(&self, hits: impl Fn(f64) -> bool, seed_max: f64) -> Option<f64> {
        let mut low = self.floor;
        let mut high = seed_max;
        let mut best = None;

        for _ in 0..self.max_iterations {
            let probe = 0.5 * (low + high);
            if hits(probe) {
                best = Some(probe);
                high = probe;
            } else {
                low = probe;
            }
            if high - low < self.tolerance {
                break;
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_max_range_finds_step_edge() {
        let search = RangeSearch::default();
        let threshold = 62_345.0;
        let r = search.max_range(|r| r <= threshold).unwrap();
        assert!(r <= threshold);
        assert!(threshold - r < search.tolerance, "got {r}");
    }

    #[test]
    fn test_min_range_finds_step_edge() {
        let search = RangeSearch::default();
        let threshold = 1_234.0;
        let r = search.min_range(|r| r >= threshold, 60_000.0).unwrap();
        assert!(r >= threshold);
        assert!(r - threshold < search.tolerance, "got {r}");
    }

    #[test]
    fn test_never_hit_is_unsolved() {
        let search = RangeSearch::default();
        assert_eq!(search.max_range(|_| false), None);
        assert_eq!(search.min_range(|_| false, 50_000.0), None);
    }

    #[test]
    fn test_always_hit_pins_to_bracket_edges() {
        let search = RangeSearch::default();
        let r_max = search.max_range(|_| true).unwrap();
        assert!(search.seed_high - r_max < search.tolerance);
        let r_min = search.min_range(|_| true, r_max).unwrap();
        assert!(r_min - search.floor < search.tolerance);
    }

    #[test]
    fn test_iteration_cap_bounds_probes() {
        let search = RangeSearch {
            tolerance: 1e-9,
            max_iterations: 12,
            ..Default::default()
        };
        let probes = Cell::new(0u32);
        let _ = search.max_range(|r| {
            probes.set(probes.get() + 1);
            r < 700_000.0
        });
        assert_eq!(probes.get(), 12);
    }

    #[test]
    fn test_tolerance_stops_early() {
        let search = RangeSearch::default();
        let probes = Cell::new(0u32);
        let _ = search.max_range(|r| {
            probes.set(probes.get() + 1);
            r < 333_333.0
        });
        // log2(999_500 / 10) ≈ 16.6
        assert_eq!(probes.get(), 17);
    }

    #[test]
    fn test_threshold_below_seed_is_unsolved() {
        let search = RangeSearch::default();
        assert_eq!(search.max_range(|r| r < 400.0), None);
    }
}
