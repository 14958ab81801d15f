//! Construction-time errors for batteries, charging units, and simulations.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use thiserror::Error;

/// Invalid input rejected before any simulation state exists.
///
/// Every variant is raised by a constructor; `Simulation::run` itself
/// cannot fail.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    #[error("battery capacity must be > 0 kWh, got {0}")]
    InvalidCapacity(f32),

    #[error("state of charge must be in [0.0, 1.0], got {0}")]
    InvalidSoc(f32),

    #[error("{field} must be > 0 kW, got {value}")]
    InvalidPower { field: &'static str, value: f32 },

    #[error("sample interval must be > 0 minutes")]
    InvalidSampleInterval,

    #[error("operating window start {start} must be before end {end}")]
    InvalidOperatingWindow { start: NaiveTime, end: NaiveTime },

    #[error("connection ({connection}) and disconnection ({disconnection}) must be on the same day")]
    DifferentDays {
        connection: NaiveDate,
        disconnection: NaiveDate,
    },

    #[error("{field} {time} is outside the operating window {start}-{end}")]
    OutsideOperatingWindow {
        field: &'static str,
        time: NaiveDateTime,
        start: NaiveTime,
        end: NaiveTime,
    },

    #[error("connection ({connection}) must be before disconnection ({disconnection})")]
    InvalidOrder {
        connection: NaiveDateTime,
        disconnection: NaiveDateTime,
    },
}
