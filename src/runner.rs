//! Builds and runs one charging session from a scenario configuration.

use tracing::info;

use crate::config::ScenarioConfig;
use crate::devices::{Battery, ChargingUnit};
use crate::sim::engine::Simulation;
use crate::sim::error::SimError;
use crate::sim::summary::SessionSummary;
use crate::sim::types::ResultSet;

/// Output of [`run_scenario`].
#[derive(Debug, Clone)]
pub struct ScenarioRun {
    pub results: ResultSet,
    pub summary: SessionSummary,
}

/// Constructs battery, unit and simulation from `config`, then runs the session.
///
/// Each call builds fresh components, so repeated runs of the same
/// configuration produce identical results.
///
/// # Errors
///
/// Returns the first `SimError` raised by a constructor.
pub fn run_scenario(config: &ScenarioConfig) -> Result<ScenarioRun, SimError> {
    let bat = &config.battery;
    let mut battery = Battery::new(bat.capacity_kwh, bat.initial_soc, bat.max_power_kw)?;
    let unit = ChargingUnit::new(config.charging_unit.max_output_kw)?;

    let session = &config.session;
    let simulation = Simulation::new(
        session.connection,
        session.disconnection,
        config.sim_config()?,
    )?;

    info!(
        connection = %session.connection,
        disconnection = %session.disconnection,
        effective_kw = unit.effective_power_kw(&battery),
        "running charging session"
    );

    let results = simulation.run(&mut battery, &unit);
    let summary = SessionSummary::from_results(&results);
    Ok(ScenarioRun { results, summary })
}
