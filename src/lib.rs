//! Single-vehicle EV charging session simulator.

/// Read-only HTTP API over a finished run.
#[cfg(feature = "api")]
pub mod api;
pub mod config;
pub mod devices;
pub mod io;
pub mod runner;
/// Simulation engine, time model, and result types.
pub mod sim;
pub mod timefmt;
