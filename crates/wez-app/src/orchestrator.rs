//! Envelope orchestrator: turns a target designation into a published
//! envelope snapshot.
//!
//! Each cycle resolves the engagement geometry, fans the azimuth sweep out on
//! a dedicated `rayon` pool, and publishes only after every band has joined.
//! At most one cycle runs at a time; triggers that arrive while one is in
//! flight are dropped.

use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, error, info};

use wez_core::config::EnvelopeConfig;
use wez_core::state::{EnvelopeSnapshot, RangeBand};
use wez_core::types::{InterceptorSpec, LauncherGeometry, TargetDesignation, TargetProfile};
use wez_sim::geometry::EngagementGeometry;
use wez_sim::sweep;

use crate::error::CycleError;
use crate::store::SnapshotStore;

/// Computes the bands of one envelope.
///
/// Implementations must return one band per swept azimuth, in sweep order.
pub trait EnvelopeSolver: Send + Sync + 'static {
    fn solve(
        &self,
        spec: &InterceptorSpec,
        target: &TargetProfile,
        config: &EnvelopeConfig,
    ) -> Result<Vec<RangeBand>, CycleError>;
}

/// Parallel pursuit sweep over all azimuths and maneuver assumptions.
#[derive(Debug, Clone, Copy, Default)]
pub struct SweepSolver;

impl EnvelopeSolver for SweepSolver {
    fn solve(
        &self,
        spec: &InterceptorSpec,
        target: &TargetProfile,
        config: &EnvelopeConfig,
    ) -> Result<Vec<RangeBand>, CycleError> {
        Ok(sweep::solve_envelope(spec, target, config))
    }
}

/// Result of a non-blocking [`EnvelopeOrchestrator::trigger`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerOutcome {
    /// A cycle was spawned onto the solver pool.
    Started,
    /// A cycle was already in flight; nothing was done.
    Dropped,
    /// No target designated; the clear signal was published.
    Cleared,
}

/// Result of a blocking [`EnvelopeOrchestrator::run_blocking`].
#[derive(Debug, Clone, PartialEq)]
pub enum CycleOutcome {
    Published(Arc<EnvelopeSnapshot>),
    /// Solved, but the target was cleared while the cycle ran.
    Discarded,
    Dropped,
    Cleared,
}

struct Shared<S> {
    config: EnvelopeConfig,
    solver: S,
    pool: rayon::ThreadPool,
    store: Arc<SnapshotStore>,
    in_flight: AtomicBool,
    last_cycle: AtomicU64,
}

/// Holds the single-flight flag for the lifetime of one cycle.
///
/// Dropping the guard releases the flag, including during unwinding.
struct InFlightGuard<S> {
    shared: Arc<Shared<S>>,
}

impl<S> InFlightGuard<S> {
    fn acquire(shared: &Arc<Shared<S>>) -> Option<Self> {
        shared
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()?;
        Some(Self {
            shared: Arc::clone(shared),
        })
    }
}

impl<S> Drop for InFlightGuard<S> {
    fn drop(&mut self) {
        self.shared.in_flight.store(false, Ordering::Release);
    }
}

/// Cheap to clone; clones share the pool, the store and the in-flight flag.
pub struct EnvelopeOrchestrator<S = SweepSolver> {
    shared: Arc<Shared<S>>,
}

impl<S> Clone for EnvelopeOrchestrator<S> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl EnvelopeOrchestrator<SweepSolver> {
    pub fn new(config: EnvelopeConfig) -> Result<Self, CycleError> {
        Self::with_solver(config, SweepSolver)
    }
}

impl<S: EnvelopeSolver> EnvelopeOrchestrator<S> {
    /// Validate `config`, then build an orchestrator with its own solver pool
    /// and an empty store.
    pub fn with_solver(config: EnvelopeConfig, solver: S) -> Result<Self, CycleError> {
        config.validate()?;
        let mut builder =
            rayon::ThreadPoolBuilder::new().thread_name(|i| format!("wez-solver-{i}"));
        if let Some(threads) = config.sweep.worker_threads {
            builder = builder.num_threads(threads);
        }
        let pool = builder.build()?;

        Ok(Self {
            shared: Arc::new(Shared {
                config,
                solver,
                pool,
                store: Arc::new(SnapshotStore::new()),
                in_flight: AtomicBool::new(false),
                last_cycle: AtomicU64::new(0),
            }),
        })
    }

    pub fn config(&self) -> &EnvelopeConfig {
        &self.shared.config
    }

    /// Store that receives every published snapshot.
    pub fn store(&self) -> Arc<SnapshotStore> {
        Arc::clone(&self.shared.store)
    }

    pub fn is_in_flight(&self) -> bool {
        self.shared.in_flight.load(Ordering::Acquire)
    }

    /// Start a cycle on the solver pool and return immediately.
    pub fn trigger(
        &self,
        designation: Option<TargetDesignation>,
        launcher: LauncherGeometry,
    ) -> TriggerOutcome {
        let Some(target) = designation else {
            self.shared.signal_clear();
            return TriggerOutcome::Cleared;
        };
        let Some(guard) = InFlightGuard::acquire(&self.shared) else {
            debug!("trigger dropped: envelope cycle already in flight");
            return TriggerOutcome::Dropped;
        };
        // Bound to the designation now, not when a worker picks the cycle up
        let epoch = self.shared.store.epoch();

        self.shared.pool.spawn(move || {
            // Failures are logged inside execute.
            let _ = guard.shared.execute(&target, &launcher, epoch);
            drop(guard);
        });
        TriggerOutcome::Started
    }

    /// Run a cycle to completion on the solver pool, blocking the caller.
    pub fn run_blocking(
        &self,
        designation: Option<TargetDesignation>,
        launcher: LauncherGeometry,
    ) -> Result<CycleOutcome, CycleError> {
        let Some(target) = designation else {
            self.shared.signal_clear();
            return Ok(CycleOutcome::Cleared);
        };
        let Some(guard) = InFlightGuard::acquire(&self.shared) else {
            debug!("trigger dropped: envelope cycle already in flight");
            return Ok(CycleOutcome::Dropped);
        };
        let epoch = self.shared.store.epoch();

        let shared = &guard.shared;
        let result = shared
            .pool
            .install(|| shared.execute(&target, &launcher, epoch));
        drop(guard);
        result
    }
}

impl<S: EnvelopeSolver> Shared<S> {
    fn signal_clear(&self) {
        if self.store.clear() {
            info!("no target designated; envelope cleared");
        }
    }

    fn execute(
        &self,
        target: &TargetDesignation,
        launcher: &LauncherGeometry,
        epoch: u64,
    ) -> Result<CycleOutcome, CycleError> {
        let cycle = self.last_cycle.fetch_add(1, Ordering::Relaxed) + 1;
        let started = Instant::now();
        debug!(cycle, "envelope cycle started");

        let bands = panic::catch_unwind(AssertUnwindSafe(|| self.solve(target, launcher)))
            .unwrap_or_else(|payload| Err(CycleError::from_panic(payload)))
            .inspect_err(|err| error!(cycle, %err, "envelope cycle aborted"))?;

        let solve_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        let snapshot = Arc::new(EnvelopeSnapshot::new(cycle, solve_ms, bands));

        if !self.store.publish(Arc::clone(&snapshot), epoch) {
            debug!(cycle, "target cleared during cycle; snapshot discarded");
            return Ok(CycleOutcome::Discarded);
        }

        info!(
            cycle,
            solve_ms,
            solved = snapshot.solved_count(),
            azimuths = snapshot.bands.len(),
            "envelope published"
        );
        for line in snapshot.to_string().lines().skip(1) {
            debug!(cycle, "{line}");
        }
        Ok(CycleOutcome::Published(snapshot))
    }

    fn solve(
        &self,
        target: &TargetDesignation,
        launcher: &LauncherGeometry,
    ) -> Result<Vec<RangeBand>, CycleError> {
        let geometry =
            EngagementGeometry::resolve(launcher, target).ok_or(CycleError::DegenerateGeometry)?;
        debug!(
            range_m = geometry.range,
            target_speed = geometry.target_speed,
            aspect_deg = geometry.initial_aspect.to_degrees(),
            "engagement resolved"
        );
        let spec = self.config.interceptor.spec();
        let bands = self
            .solver
            .solve(&spec, &geometry.target_profile(), &self.config)?;

        let expected = self.config.sweep.azimuth_count;
        if bands.len() != expected {
            return Err(CycleError::IncompleteSweep {
                expected,
                got: bands.len(),
            });
        }
        Ok(bands)
    }
}
