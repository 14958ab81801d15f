//! Minute-resolution charging simulation over one operating window.

use chrono::{NaiveDateTime, TimeDelta};
use tracing::{debug, info, trace};

use crate::devices::{Battery, ChargingUnit};

use super::clock::Clock;
use super::error::SimError;
use super::types::{ChargingState, ResultSet, STEP_MINUTES, Sample, SimConfig};
use super::window::{ConnectionWindow, OperatingWindow};

/// One charging session between a connection and a disconnection time.
///
/// Construction validates the time pair; [`Simulation::run`] consumes the
/// simulation and returns the finished [`ResultSet`], so a session can be
/// neither observed mid-run nor run twice.
#[derive(Debug, Clone)]
pub struct Simulation {
    config: SimConfig,
    window: ConnectionWindow,
    samples: Vec<Sample>,
    net_energy_kwh: f32,
    full_at: Option<NaiveDateTime>,
}

impl Simulation {
    /// Creates a new simulation.
    ///
    /// # Arguments
    ///
    /// * `connection` - Instant the vehicle is plugged in
    /// * `disconnection` - Instant the vehicle is unplugged
    /// * `config` - Operating window and sampling interval
    ///
    /// # Errors
    ///
    /// Returns a `SimError` if the sample interval is zero, the operating
    /// window is empty or inverted, the times fall on different days or
    /// outside the operating window, or `connection` is not strictly before
    /// `disconnection`.
    pub fn new(
        connection: NaiveDateTime,
        disconnection: NaiveDateTime,
        config: SimConfig,
    ) -> Result<Self, SimError> {
        if config.sample_interval_minutes == 0 {
            return Err(SimError::InvalidSampleInterval);
        }
        let operating = OperatingWindow::new(
            config.operating_window.start,
            config.operating_window.end,
        )?;
        let window = ConnectionWindow::new(connection, disconnection, operating)?;

        let periods = config.operating_window.minutes() / i64::from(config.sample_interval_minutes);
        Ok(Self {
            config,
            window,
            samples: Vec::with_capacity(usize::try_from(periods).unwrap_or(0) + 2),
            net_energy_kwh: 0.0,
            full_at: None,
        })
    }

    /// Classifies the minute starting at `time`.
    pub fn state_at(&self, time: NaiveDateTime, battery: &Battery) -> ChargingState {
        if time < self.window.window_start() {
            ChargingState::BeforeWindow
        } else if time >= self.window.window_end() {
            ChargingState::AfterWindow
        } else if !self.window.is_connected(time) {
            ChargingState::Disconnected
        } else if battery.is_full() {
            ChargingState::HeldFull
        } else {
            ChargingState::Charging
        }
    }

    /// Executes the one-minute step starting at `time`.
    ///
    /// # Returns
    ///
    /// The state of the minute and the power delivered during it (kW).
    fn step(
        &mut self,
        time: NaiveDateTime,
        battery: &mut Battery,
        unit: &ChargingUnit,
    ) -> (ChargingState, f32) {
        let state = self.state_at(time, battery);
        if !state.is_charging() {
            return (state, 0.0);
        }

        let hours = self.config.step_hours();
        let power_kw = unit.charge_vehicle(battery, hours);
        self.net_energy_kwh += power_kw * hours;

        if battery.is_full() && self.full_at.is_none() {
            let end_of_minute = time + TimeDelta::minutes(STEP_MINUTES);
            debug!(%end_of_minute, "battery full");
            self.full_at = Some(end_of_minute);
        }

        (state, power_kw)
    }

    fn record(
        &mut self,
        timestamp: NaiveDateTime,
        charging_power_kw: f32,
        battery: &Battery,
        state: ChargingState,
    ) {
        let sample = Sample {
            timestamp,
            charging_power_kw,
            soc_pct: battery.soc_pct(),
            net_energy_charged_kwh: self.net_energy_kwh,
            state,
        };
        trace!(%sample, "sample recorded");
        self.samples.push(sample);
    }

    /// Runs the session over the whole operating window.
    ///
    /// Emits one sample at the window start, then one sample at the end of
    /// every sampling period. The final period is cut short at the window
    /// end when the window length is not a multiple of the interval.
    ///
    /// # Arguments
    ///
    /// * `battery` - Vehicle battery, charged in place
    /// * `unit` - Charging unit supplying the power
    pub fn run(mut self, battery: &mut Battery, unit: &ChargingUnit) -> ResultSet {
        let initial_soc = battery.soc();
        let start = self.window.window_start();
        let end = self.window.window_end();
        let interval = self.config.sample_interval_minutes;

        let initial_state = self.state_at(start, battery);
        let initial_power_kw = if initial_state.is_charging() {
            unit.deliverable_power_kw(battery, self.config.step_hours())
        } else {
            0.0
        };
        self.record(start, initial_power_kw, battery, initial_state);

        let mut clock = Clock::new(start, end, TimeDelta::minutes(STEP_MINUTES));
        let mut previous_state = initial_state;

        while !clock.is_finished() {
            let mut last = (previous_state, 0.0);
            for _ in 0..interval {
                let Some(t) = clock.tick() else {
                    break;
                };
                last = self.step(t, battery, unit);
                if last.0 != previous_state {
                    debug!(time = %t, from = %previous_state, to = %last.0, "charging state changed");
                    previous_state = last.0;
                }
            }
            let (state, power_kw) = last;
            self.record(clock.now(), power_kw, battery, state);
        }

        info!(
            samples = self.samples.len(),
            energy_kwh = self.net_energy_kwh,
            final_soc_pct = battery.soc_pct(),
            "simulation finished"
        );

        ResultSet {
            samples: self.samples,
            capacity_kwh: battery.capacity_kwh,
            initial_soc,
            full_at: self.full_at,
        }
    }
}
