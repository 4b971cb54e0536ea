//! Cadence thread: triggers one envelope cycle per interval.
//!
//! Runs decoupled from any simulation tick. The thread only samples the
//! designation and calls `trigger`, which hands the solve to the orchestrator's
//! pool, so a slow cycle shows up as dropped triggers rather than a late loop.

use std::sync::mpsc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use tracing::debug;

use wez_core::types::{LauncherGeometry, TargetDesignation};

use crate::orchestrator::{EnvelopeOrchestrator, EnvelopeSolver};

/// Commands accepted by the cadence thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopCommand {
    Shutdown,
}

/// Supplies the current target and launcher pose at each cycle.
pub trait DesignationSource: Send + 'static {
    /// `elapsed` is the time since the previous sample (zero on the first).
    fn sample(&mut self, elapsed: Duration) -> (Option<TargetDesignation>, LauncherGeometry);
}

impl<F> DesignationSource for F
where
    F: FnMut(Duration) -> (Option<TargetDesignation>, LauncherGeometry) + Send + 'static,
{
    fn sample(&mut self, elapsed: Duration) -> (Option<TargetDesignation>, LauncherGeometry) {
        self(elapsed)
    }
}

/// Handle to a running cadence thread.
pub struct CycleLoop {
    commands: mpsc::Sender<LoopCommand>,
    handle: JoinHandle<()>,
}

impl CycleLoop {
    /// Ask the loop to stop and wait for it.
    ///
    /// A cycle already on the solver pool still runs to completion.
    pub fn shutdown(self) {
        let _ = self.commands.send(LoopCommand::Shutdown);
        let _ = self.handle.join();
    }
}

/// Spawns the cadence loop in a new named thread.
pub fn spawn_cycle_loop<S, D>(orchestrator: EnvelopeOrchestrator<S>, source: D) -> CycleLoop
where
    S: EnvelopeSolver,
    D: DesignationSource,
{
    let interval = Duration::from_secs_f64(orchestrator.config().cadence.interval_secs);
    let (cmd_tx, cmd_rx) = mpsc::channel::<LoopCommand>();

    let handle = std::thread::Builder::new()
        .name("wez-envelope-loop".into())
        .spawn(move || {
            run_cycle_loop(&orchestrator, source, interval, &cmd_rx);
        })
        .expect("Failed to spawn envelope loop thread");

    CycleLoop {
        commands: cmd_tx,
        handle,
    }
}

/// Runs until Shutdown command or channel disconnect.
fn run_cycle_loop<S: EnvelopeSolver, D: DesignationSource>(
    orchestrator: &EnvelopeOrchestrator<S>,
    mut source: D,
    interval: Duration,
    cmd_rx: &mpsc::Receiver<LoopCommand>,
) {
    let mut next_tick_time = Instant::now();
    let mut last_sample: Option<Instant> = None;

    loop {
        let now = Instant::now();
        let elapsed = last_sample.map_or(Duration::ZERO, |t| now - t);
        last_sample = Some(now);

        let (designation, launcher) = source.sample(elapsed);
        let outcome = orchestrator.trigger(designation, launcher);
        debug!(?outcome, "envelope trigger");

        next_tick_time += interval;
        let now = Instant::now();
        if now > next_tick_time && now - next_tick_time > interval * 2 {
            // Too far behind; reset to avoid catch-up spiral
            next_tick_time = now;
        }

        // Wait out the rest of the tick, waking early for commands
        match cmd_rx.recv_timeout(next_tick_time.saturating_duration_since(now)) {
            Ok(LoopCommand::Shutdown) => return,
            Err(mpsc::RecvTimeoutError::Timeout) => {}
            Err(mpsc::RecvTimeoutError::Disconnected) => return,
        }
    }
}
