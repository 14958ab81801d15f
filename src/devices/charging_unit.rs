use crate::devices::battery::Battery;
use crate::sim::error::SimError;

/// A single charge point delivering power into one vehicle battery.
///
/// The unit is stateless across steps: every call derives the delivered
/// power from its own output limit and the battery it is paired with.
///
/// Delivered power is the lesser of the unit's and the vehicle's limits,
/// further capped so that one interval never pushes more energy than the
/// battery can still absorb. On the interval where the battery fills up,
/// the reported power is therefore the power actually absorbed, not the
/// full offered power.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChargingUnit {
    /// Maximum output power in kilowatts.
    pub max_output_kw: f32,
}

impl ChargingUnit {
    /// Creates a new charging unit.
    ///
    /// # Errors
    ///
    /// Returns `SimError::InvalidPower` if `max_output_kw` is not a positive
    /// finite number.
    pub fn new(max_output_kw: f32) -> Result<Self, SimError> {
        if !max_output_kw.is_finite() || max_output_kw <= 0.0 {
            return Err(SimError::InvalidPower {
                field: "charging_unit.max_output_kw",
                value: max_output_kw,
            });
        }
        Ok(Self { max_output_kw })
    }

    /// Power offered to `battery` when paired: `min(unit limit, vehicle limit)`.
    pub fn effective_power_kw(&self, battery: &Battery) -> f32 {
        self.max_output_kw.min(battery.max_power_kw)
    }

    /// Power sustainable over `hours` without overfilling `battery`.
    pub fn deliverable_power_kw(&self, battery: &Battery, hours: f32) -> f32 {
        if hours <= 0.0 {
            return 0.0;
        }
        let offered_kw = self.effective_power_kw(battery);
        let headroom_kwh = battery.headroom_kwh();
        if offered_kw * hours < headroom_kwh {
            offered_kw
        } else {
            headroom_kwh / hours
        }
    }

    /// Charges `battery` for `hours` and returns the power sustained (kW).
    pub fn charge_vehicle(&self, battery: &mut Battery, hours: f32) -> f32 {
        let power_kw = self.deliverable_power_kw(battery, hours);
        battery.charge(power_kw * hours);
        power_kw
    }
}
