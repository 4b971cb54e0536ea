//! Core types and definitions for the weapon engagement zone solver.
//!
//! This crate defines the vocabulary shared across the other crates:
//! geometry, interceptor and target descriptions, configuration,
//! published envelope snapshots, and constants.
//! It has no dependency on the solver or on any threading runtime.

pub mod config;
pub mod constants;
pub mod enums;
pub mod state;
pub mod types;

pub use config::{ConfigError, EnvelopeConfig};
pub use state::{EnvelopeSnapshot, RangeBand};
