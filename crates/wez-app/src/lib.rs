//! Envelope orchestration runtime.
//!
//! Runs the solver on its own cadence, off any simulation or render loop,
//! guards against overlapping cycles, and publishes complete snapshots for
//! consumers to poll.

pub mod cycle_loop;
pub mod drone;
pub mod error;
pub mod logging;
pub mod orchestrator;
pub mod store;

pub use wez_core as core;
pub use error::CycleError;
pub use orchestrator::{CycleOutcome, EnvelopeOrchestrator, TriggerOutcome};
pub use store::{Published, SnapshotStore};
