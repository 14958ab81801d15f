//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};

use ev_charge_sim::devices::{Battery, ChargingUnit};
use ev_charge_sim::sim::engine::Simulation;
use ev_charge_sim::sim::types::{ResultSet, SimConfig};
use ev_charge_sim::sim::window::OperatingWindow;

/// Instant on the reference day (2025-01-31).
pub fn at(h: u32, m: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 1, 31)
        .and_then(|d| d.and_hms_opt(h, m, 0))
        .expect("valid reference time")
}

/// Default vehicle battery (50 kWh, 10% SOC, 11 kW).
pub fn default_battery() -> Battery {
    Battery::new(50.0, 0.1, 11.0).expect("default battery is valid")
}

/// Default charging unit (22 kW).
pub fn default_unit() -> ChargingUnit {
    ChargingUnit::new(22.0).expect("default unit is valid")
}

/// Default 09:00-21:00 window sampled every `minutes`.
pub fn config_with_interval(minutes: u32) -> SimConfig {
    SimConfig::new(OperatingWindow::default(), minutes).expect("interval is valid")
}

/// Runs one session and returns the results.
pub fn run_session(
    connection: NaiveDateTime,
    disconnection: NaiveDateTime,
    config: SimConfig,
    battery: &mut Battery,
    unit: &ChargingUnit,
) -> ResultSet {
    Simulation::new(connection, disconnection, config)
        .expect("session is valid")
        .run(battery, unit)
}
