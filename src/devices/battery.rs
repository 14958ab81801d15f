use crate::sim::error::SimError;

/// Residual headroom below which a charge counts as filling the battery.
const FULL_TOLERANCE_KWH: f32 = 1e-6;

/// Traction battery of the vehicle being charged.
///
/// `Battery` holds the energy currently stored and enforces the capacity
/// bound on every charge: the held charge never exceeds `capacity_kwh`, so
/// the state of charge (SOC) always stays within `0.0..=1.0`.
#[derive(Debug, Clone, PartialEq)]
pub struct Battery {
    /// Battery capacity in kilowatt-hours.
    pub capacity_kwh: f32,

    /// Maximum power the vehicle accepts, in kilowatts.
    pub max_power_kw: f32,

    /// Energy currently held in kilowatt-hours.
    charge_kwh: f32,

    /// State of charge as a fraction (0.0 to 1.0).
    soc: f32,
}

impl Battery {
    /// Creates a new battery.
    ///
    /// # Arguments
    ///
    /// * `capacity_kwh` - Battery capacity in kWh (must be > 0)
    /// * `soc` - Initial state of charge as a fraction (0.0 to 1.0)
    /// * `max_power_kw` - Vehicle-side charging power ceiling in kW (must be > 0)
    ///
    /// # Errors
    ///
    /// Returns a `SimError` if capacity or max power is not a positive finite
    /// number, or if SOC is outside `[0.0, 1.0]`.
    pub fn new(capacity_kwh: f32, soc: f32, max_power_kw: f32) -> Result<Self, SimError> {
        if !capacity_kwh.is_finite() || capacity_kwh <= 0.0 {
            return Err(SimError::InvalidCapacity(capacity_kwh));
        }
        if !(0.0..=1.0).contains(&soc) {
            return Err(SimError::InvalidSoc(soc));
        }
        if !max_power_kw.is_finite() || max_power_kw <= 0.0 {
            return Err(SimError::InvalidPower {
                field: "battery.max_power_kw",
                value: max_power_kw,
            });
        }

        Ok(Self {
            capacity_kwh,
            max_power_kw,
            charge_kwh: soc * capacity_kwh,
            soc,
        })
    }

    /// Adds `amount_kwh` to the battery, clamped at capacity.
    ///
    /// Excess energy beyond capacity is silently discarded. Negative amounts
    /// are ignored.
    ///
    /// # Returns
    ///
    /// Energy actually absorbed in kWh.
    pub fn charge(&mut self, amount_kwh: f32) -> f32 {
        let before = self.charge_kwh;
        let amount_kwh = amount_kwh.max(0.0);
        self.charge_kwh = if amount_kwh + FULL_TOLERANCE_KWH >= self.headroom_kwh() {
            self.capacity_kwh
        } else {
            before + amount_kwh
        };
        self.soc = (self.charge_kwh / self.capacity_kwh).clamp(0.0, 1.0);
        self.charge_kwh - before
    }

    /// State of charge as a fraction (0.0 to 1.0).
    pub fn soc(&self) -> f32 {
        self.soc
    }

    /// State of charge as a percentage (0.0 to 100.0).
    pub fn soc_pct(&self) -> f32 {
        self.soc * 100.0
    }

    /// Energy currently held in kWh.
    pub fn current_charge_kwh(&self) -> f32 {
        self.charge_kwh
    }

    /// Energy the battery can still absorb before it is full.
    pub fn headroom_kwh(&self) -> f32 {
        (self.capacity_kwh - self.charge_kwh).max(0.0)
    }

    /// Returns `true` once the battery holds its full capacity.
    pub fn is_full(&self) -> bool {
        self.soc >= 1.0
    }
}
