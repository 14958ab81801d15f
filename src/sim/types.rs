//! Core simulation types: configuration, charging state, samples, and result sets.

use std::fmt;

use chrono::NaiveDateTime;
use serde::Serialize;

use super::error::SimError;
use super::window::OperatingWindow;

/// Default reporting period in minutes.
pub const DEFAULT_SAMPLE_INTERVAL_MINUTES: u32 = 15;

/// Integration granularity in minutes.
pub const STEP_MINUTES: i64 = 1;

/// Engine timing configuration shared by every simulation.
///
/// # Examples
///
/// ```
/// use ev_charge_sim::sim::types::SimConfig;
///
/// let cfg = SimConfig::default();
/// assert_eq!(cfg.sample_interval_minutes, 15);
/// assert_eq!(cfg.step_hours(), 1.0 / 60.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SimConfig {
    /// Daily bounds for connection and disconnection.
    pub operating_window: OperatingWindow,
    /// Minutes between two recorded samples.
    pub sample_interval_minutes: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            operating_window: OperatingWindow::default(),
            sample_interval_minutes: DEFAULT_SAMPLE_INTERVAL_MINUTES,
        }
    }
}

impl SimConfig {
    /// Creates a new simulation configuration.
    ///
    /// # Errors
    ///
    /// Returns `SimError::InvalidSampleInterval` if `sample_interval_minutes` is zero.
    pub fn new(
        operating_window: OperatingWindow,
        sample_interval_minutes: u32,
    ) -> Result<Self, SimError> {
        if sample_interval_minutes == 0 {
            return Err(SimError::InvalidSampleInterval);
        }
        Ok(Self {
            operating_window,
            sample_interval_minutes,
        })
    }

    /// Duration of one integration step in hours.
    pub fn step_hours(&self) -> f32 {
        STEP_MINUTES as f32 / 60.0
    }
}

/// Charging state of the session at a given minute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChargingState {
    /// Before the operating window opens.
    BeforeWindow,
    /// Inside the window but outside `[connection, disconnection)`.
    Disconnected,
    /// Plugged in with SOC below 100 %.
    Charging,
    /// Plugged in with a full battery.
    HeldFull,
    /// At or after the end of the operating window.
    AfterWindow,
}

impl ChargingState {
    /// Only `Charging` draws power.
    pub fn is_charging(self) -> bool {
        self == Self::Charging
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::BeforeWindow => "before_window",
            Self::Disconnected => "disconnected",
            Self::Charging => "charging",
            Self::HeldFull => "held_full",
            Self::AfterWindow => "after_window",
        }
    }
}

impl fmt::Display for ChargingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One recorded observation of the session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sample {
    /// End of the sampling period (or the window start for the first sample).
    pub timestamp: NaiveDateTime,
    /// Power delivered during the last minute of the period (kW, >= 0).
    pub charging_power_kw: f32,
    /// Battery state of charge at `timestamp` (0 to 100).
    pub soc_pct: f32,
    /// Energy delivered since the window opened (kWh, non-decreasing).
    pub net_energy_charged_kwh: f32,
    /// Charging state during the last minute of the period.
    pub state: ChargingState,
}

impl fmt::Display for Sample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | power={:>6.2} kW | SoC={:>6.2}% | energy={:>6.2} kWh | {}",
            self.timestamp.format("%Y-%m-%d %H:%M"),
            self.charging_power_kw,
            self.soc_pct,
            self.net_energy_charged_kwh,
            self.state,
        )
    }
}

/// Complete, time-ordered output of one simulation run.
///
/// Only `Simulation::run` builds one, so a `ResultSet` is always the whole
/// run and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultSet {
    pub(crate) samples: Vec<Sample>,
    pub(crate) capacity_kwh: f32,
    pub(crate) initial_soc: f32,
    pub(crate) full_at: Option<NaiveDateTime>,
}

impl ResultSet {
    /// The recorded samples, oldest first.
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn last(&self) -> Option<&Sample> {
        self.samples.last()
    }

    /// Capacity of the battery that was charged (kWh).
    pub fn capacity_kwh(&self) -> f32 {
        self.capacity_kwh
    }

    /// State of charge before the run (0.0 to 1.0).
    pub fn initial_soc(&self) -> f32 {
        self.initial_soc
    }

    /// End of the minute in which the battery became full, if it did.
    pub fn full_at(&self) -> Option<NaiveDateTime> {
        self.full_at
    }
}
