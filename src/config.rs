//! TOML-based scenario configuration and preset definitions.

use std::fs;
use std::path::Path;

use chrono::{NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sim::error::SimError;
use crate::sim::types::{DEFAULT_SAMPLE_INTERVAL_MINUTES, SimConfig};
use crate::sim::window::{ConnectionWindow, OperatingWindow};
use crate::timefmt;

/// Top-level scenario configuration parsed from TOML.
///
/// All fields have defaults matching the baseline scenario. Load from
/// TOML with [`ScenarioConfig::from_toml_file`] or use
/// [`ScenarioConfig::baseline`] for the built-in default.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Plug-in and plug-out instants.
    #[serde(default)]
    pub session: SessionConfig,
    /// Daily bounds for the session.
    #[serde(default)]
    pub operating_window: OperatingWindowConfig,
    /// Sampling parameters.
    #[serde(default)]
    pub simulation: SimulationConfig,
    /// Vehicle battery parameters.
    #[serde(default)]
    pub battery: BatteryConfig,
    /// Charge point parameters.
    #[serde(default)]
    pub charging_unit: ChargingUnitConfig,
}

/// Plug-in and plug-out instants (`YYYY-MM-DD HH:MM`).
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    /// Instant the vehicle is plugged in.
    #[serde(with = "timefmt::timestamp")]
    pub connection: NaiveDateTime,
    /// Instant the vehicle is unplugged.
    #[serde(with = "timefmt::timestamp")]
    pub disconnection: NaiveDateTime,
}

impl Default for SessionConfig {
    fn default() -> Self {
        let window = OperatingWindow::default();
        let day = chrono::NaiveDate::from_ymd_opt(2025, 1, 31).unwrap_or_default();
        Self {
            connection: day.and_time(window.start),
            disconnection: day.and_time(window.end),
        }
    }
}

/// Daily bounds within which the session must fall (`HH:MM`).
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct OperatingWindowConfig {
    /// Opening time.
    #[serde(with = "timefmt::time_of_day")]
    pub start: NaiveTime,
    /// Closing time.
    #[serde(with = "timefmt::time_of_day")]
    pub end: NaiveTime,
}

impl Default for OperatingWindowConfig {
    fn default() -> Self {
        let window = OperatingWindow::default();
        Self {
            start: window.start,
            end: window.end,
        }
    }
}

/// Sampling parameters.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Minutes between recorded samples (must be > 0).
    pub sample_interval_minutes: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            sample_interval_minutes: DEFAULT_SAMPLE_INTERVAL_MINUTES,
        }
    }
}

/// Vehicle battery parameters.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct BatteryConfig {
    /// Total energy capacity (kWh).
    pub capacity_kwh: f32,
    /// Initial state of charge (0.0–1.0).
    pub initial_soc: f32,
    /// Vehicle-side charging power ceiling (kW).
    pub max_power_kw: f32,
}

impl Default for BatteryConfig {
    fn default() -> Self {
        Self {
            capacity_kwh: 50.0,
            initial_soc: 0.1,
            max_power_kw: 11.0,
        }
    }
}

/// Charge point parameters.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChargingUnitConfig {
    /// Maximum output power (kW).
    pub max_output_kw: f32,
}

impl Default for ChargingUnitConfig {
    fn default() -> Self {
        Self {
            max_output_kw: 22.0,
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Error)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"battery.initial_soc"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ConfigError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

fn time_on(day: NaiveDateTime, h: u32, m: u32) -> NaiveDateTime {
    day.date().and_hms_opt(h, m, 0).unwrap_or(day)
}

impl ScenarioConfig {
    /// Returns the baseline scenario: the default vehicle plugged in for the
    /// whole operating window.
    pub fn baseline() -> Self {
        Self::default()
    }

    /// Returns the evening top-up preset: a short session on a mostly full battery.
    pub fn evening_top_up() -> Self {
        let day = SessionConfig::default().connection;
        Self {
            session: SessionConfig {
                connection: time_on(day, 18, 30),
                disconnection: time_on(day, 20, 45),
            },
            battery: BatteryConfig {
                initial_soc: 0.8,
                ..BatteryConfig::default()
            },
            simulation: SimulationConfig {
                sample_interval_minutes: 5,
            },
            ..Self::default()
        }
    }

    /// Returns the fast-AC preset: a 22 kW vehicle with a larger battery.
    pub fn fast_ac() -> Self {
        let day = SessionConfig::default().connection;
        Self {
            session: SessionConfig {
                connection: time_on(day, 12, 0),
                disconnection: time_on(day, 16, 0),
            },
            battery: BatteryConfig {
                capacity_kwh: 77.0,
                initial_soc: 0.2,
                max_power_kw: 22.0,
            },
            ..Self::default()
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["baseline", "evening_top_up", "fast_ac"];

    /// Loads a scenario from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "baseline" => Ok(Self::baseline()),
            "evening_top_up" => Ok(Self::evening_top_up()),
            "fast_ac" => Ok(Self::fast_ac()),
            _ => Err(ConfigError::new(
                "preset",
                format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            )),
        }
    }

    /// Parses a scenario from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::new("scenario", format!("cannot read \"{}\": {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a scenario from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::new("toml", e.to_string()))
    }

    /// Engine configuration described by this scenario.
    ///
    /// # Errors
    ///
    /// Returns a `SimError` if the operating window or sample interval is invalid.
    pub fn sim_config(&self) -> Result<SimConfig, SimError> {
        let window = OperatingWindow::new(self.operating_window.start, self.operating_window.end)?;
        SimConfig::new(window, self.simulation.sample_interval_minutes)
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.simulation.sample_interval_minutes == 0 {
            errors.push(ConfigError::new(
                "simulation.sample_interval_minutes",
                "must be > 0",
            ));
        }

        let ow = &self.operating_window;
        match OperatingWindow::new(ow.start, ow.end) {
            Ok(window) => {
                let s = &self.session;
                if let Err(e) = ConnectionWindow::new(s.connection, s.disconnection, window) {
                    let field = match &e {
                        SimError::OutsideOperatingWindow { field, .. } => format!("session.{field}"),
                        _ => "session".to_string(),
                    };
                    errors.push(ConfigError::new(field, e.to_string()));
                }
            }
            Err(e) => errors.push(ConfigError::new("operating_window", e.to_string())),
        }

        let bat = &self.battery;
        if !bat.capacity_kwh.is_finite() || bat.capacity_kwh <= 0.0 {
            errors.push(ConfigError::new("battery.capacity_kwh", "must be > 0"));
        }
        if !(0.0..=1.0).contains(&bat.initial_soc) {
            errors.push(ConfigError::new("battery.initial_soc", "must be in [0.0, 1.0]"));
        }
        if !bat.max_power_kw.is_finite() || bat.max_power_kw <= 0.0 {
            errors.push(ConfigError::new("battery.max_power_kw", "must be > 0"));
        }

        let unit_kw = self.charging_unit.max_output_kw;
        if !unit_kw.is_finite() || unit_kw <= 0.0 {
            errors.push(ConfigError::new("charging_unit.max_output_kw", "must be > 0"));
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn baseline_preset_valid() {
        let cfg = ScenarioConfig::baseline();
        let errors = cfg.validate();
        assert!(errors.is_empty(), "baseline should be valid: {errors:?}");
    }

    #[test]
    fn baseline_matches_reference_defaults() {
        let cfg = ScenarioConfig::baseline();
        assert_eq!(cfg.battery.capacity_kwh, 50.0);
        assert_eq!(cfg.battery.initial_soc, 0.1);
        assert_eq!(cfg.battery.max_power_kw, 11.0);
        assert_eq!(cfg.charging_unit.max_output_kw, 22.0);
        assert_eq!(cfg.simulation.sample_interval_minutes, 15);
        assert_eq!(
            cfg.session.connection.format("%H:%M").to_string(),
            "09:00"
        );
        assert_eq!(
            cfg.session.disconnection.format("%H:%M").to_string(),
            "21:00"
        );
    }

    #[test]
    fn from_preset_unknown() {
        let err = ScenarioConfig::from_preset("nonexistent");
        assert!(err.is_err());
        let e = err.unwrap_err();
        assert!(e.message.contains("unknown preset"));
    }

    #[test]
    fn all_presets_are_valid() {
        for name in ScenarioConfig::PRESETS {
            let cfg = ScenarioConfig::from_preset(name);
            assert!(cfg.is_ok(), "preset \"{name}\" should load");
            let errors = cfg.as_ref().map(|c| c.validate()).unwrap_or_default();
            assert!(
                errors.is_empty(),
                "preset \"{name}\" should be valid: {errors:?}"
            );
        }
    }

    #[test]
    fn valid_toml_parses() {
        let toml = r#"
[session]
connection = "2025-03-10 10:15"
disconnection = "2025-03-10 17:30"

[operating_window]
start = "08:00"
end = "22:00"

[simulation]
sample_interval_minutes = 30

[battery]
capacity_kwh = 64.0
initial_soc = 0.25
max_power_kw = 7.4

[charging_unit]
max_output_kw = 11.0
"#;
        let cfg = ScenarioConfig::from_toml_str(toml);
        assert!(cfg.is_ok(), "valid TOML should parse: {:?}", cfg.err());
        let cfg = cfg.ok();
        assert_eq!(
            cfg.as_ref().map(|c| c.simulation.sample_interval_minutes),
            Some(30)
        );
        assert_eq!(cfg.as_ref().map(|c| c.battery.max_power_kw), Some(7.4));
        assert_eq!(
            cfg.as_ref()
                .map(|c| c.operating_window.start.format("%H:%M").to_string()),
            Some("08:00".to_string())
        );
        assert!(cfg.map(|c| c.validate().is_empty()).unwrap_or(false));
    }

    #[test]
    fn invalid_toml_unknown_field() {
        let toml = r#"
[battery]
capacity_kwh = 50.0
bogus_field = true
"#;
        assert!(ScenarioConfig::from_toml_str(toml).is_err());
    }

    #[test]
    fn invalid_timestamp_rejected() {
        let toml = r#"
[session]
connection = "2025-03-10T10:15:00"
"#;
        let err = ScenarioConfig::from_toml_str(toml);
        assert!(err.is_err());
        assert!(err.unwrap_err().message.contains("YYYY-MM-DD HH:MM"));
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let toml = r#"
[battery]
initial_soc = 0.5
"#;
        let cfg = ScenarioConfig::from_toml_str(toml);
        assert!(cfg.is_ok());
        let cfg = cfg.ok();
        assert_eq!(cfg.as_ref().map(|c| c.battery.initial_soc), Some(0.5));
        // capacity kept default
        assert_eq!(cfg.as_ref().map(|c| c.battery.capacity_kwh), Some(50.0));
        assert_eq!(
            cfg.as_ref().map(|c| c.charging_unit.max_output_kw),
            Some(22.0)
        );
    }

    #[test]
    fn validation_catches_invalid_soc() {
        let mut cfg = ScenarioConfig::baseline();
        cfg.battery.initial_soc = 1.5;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "battery.initial_soc"));
    }

    #[test]
    fn validation_catches_zero_interval() {
        let mut cfg = ScenarioConfig::baseline();
        cfg.simulation.sample_interval_minutes = 0;
        let errors = cfg.validate();
        assert!(
            errors
                .iter()
                .any(|e| e.field == "simulation.sample_interval_minutes")
        );
    }

    #[test]
    fn validation_catches_session_outside_window() {
        let mut cfg = ScenarioConfig::baseline();
        cfg.session.connection = time_on(cfg.session.connection, 8, 0);
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "session.connection"));
    }

    #[test]
    fn validation_catches_reversed_session() {
        let mut cfg = ScenarioConfig::baseline();
        cfg.session.connection = time_on(cfg.session.connection, 15, 0);
        cfg.session.disconnection = time_on(cfg.session.disconnection, 14, 0);
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "session"));
    }

    #[test]
    fn validation_collects_every_error() {
        let mut cfg = ScenarioConfig::baseline();
        cfg.battery.capacity_kwh = 0.0;
        cfg.battery.max_power_kw = -1.0;
        cfg.charging_unit.max_output_kw = 0.0;
        let errors = cfg.validate();
        assert_eq!(errors.len(), 3, "{errors:?}");
    }

    #[test]
    fn sim_config_follows_scenario() {
        let cfg = ScenarioConfig::evening_top_up();
        let sim = cfg.sim_config();
        assert_eq!(sim.map(|s| s.sample_interval_minutes).ok(), Some(5));
    }
}
