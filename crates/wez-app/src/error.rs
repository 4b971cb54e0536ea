use thiserror::Error;

use wez_core::ConfigError;

/// Why an orchestration cycle was aborted.
///
/// None of these are fatal: the previous snapshot stays published and the
/// next trigger starts a fresh cycle.
#[derive(Debug, Error)]
pub enum CycleError {
    #[error("invalid envelope config: {0}")]
    Config(#[from] ConfigError),
    #[error("launcher forward/right axes have no horizontal component")]
    DegenerateGeometry,
    #[error("failed to build solver pool: {0}")]
    PoolBuild(#[from] rayon::ThreadPoolBuildError),
    #[error("solver returned {got} bands for {expected} azimuths")]
    IncompleteSweep { expected: usize, got: usize },
    #[error("solver failed: {0}")]
    Solver(String),
    #[error("solver panicked: {0}")]
    SolverPanicked(String),
}

impl CycleError {
    /// Convert a caught panic payload into an error.
    pub(crate) fn from_panic(payload: Box<dyn std::any::Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "unknown panic payload".to_string()
        };
        CycleError::SolverPanicked(message)
    }
}
