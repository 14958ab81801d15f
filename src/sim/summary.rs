//! Post-hoc session summary computed from a finished run.

use std::fmt;

use chrono::NaiveDateTime;
use serde::Serialize;

use super::types::ResultSet;

/// Aggregate figures derived from a complete result set.
///
/// Computed from the samples after the run so the summary can never
/// disagree with what was exported.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSummary {
    /// Energy delivered over the whole window (kWh).
    pub energy_delivered_kwh: f32,
    /// State of charge before the run (%).
    pub initial_soc_pct: f32,
    /// State of charge at the last sample (%).
    pub final_soc_pct: f32,
    /// Highest sampled charging power (kW).
    pub peak_power_kw: f32,
    /// Number of samples whose last minute was spent charging.
    pub charging_samples: usize,
    /// End of the minute in which the battery became full, if it did.
    pub full_at: Option<NaiveDateTime>,
}

impl SessionSummary {
    /// Computes the summary from a result set.
    pub fn from_results(results: &ResultSet) -> Self {
        let initial_soc_pct = results.initial_soc() * 100.0;
        let Some(last) = results.last() else {
            return Self {
                energy_delivered_kwh: 0.0,
                initial_soc_pct,
                final_soc_pct: initial_soc_pct,
                peak_power_kw: 0.0,
                charging_samples: 0,
                full_at: results.full_at(),
            };
        };

        let peak_power_kw = results
            .samples()
            .iter()
            .map(|s| s.charging_power_kw)
            .fold(0.0_f32, f32::max);
        let charging_samples = results
            .samples()
            .iter()
            .filter(|s| s.state.is_charging())
            .count();

        Self {
            energy_delivered_kwh: last.net_energy_charged_kwh,
            initial_soc_pct,
            final_soc_pct: last.soc_pct,
            peak_power_kw,
            charging_samples,
            full_at: results.full_at(),
        }
    }
}

impl fmt::Display for SessionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Session Summary ---")?;
        writeln!(f, "Energy delivered:  {:.2} kWh", self.energy_delivered_kwh)?;
        writeln!(
            f,
            "SoC:               {:.1}% -> {:.1}%",
            self.initial_soc_pct, self.final_soc_pct
        )?;
        writeln!(f, "Peak power:        {:.2} kW", self.peak_power_kw)?;
        writeln!(f, "Charging samples:  {}", self.charging_samples)?;
        match self.full_at {
            Some(t) => write!(f, "Full at:           {}", t.format("%H:%M")),
            None => write!(f, "Full at:           not reached"),
        }
    }
}
