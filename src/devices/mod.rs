//! Physical components taking part in a charging session.

/// Vehicle traction battery model.
pub mod battery;
/// Charge point model.
pub mod charging_unit;

pub use battery::Battery;
pub use charging_unit::ChargingUnit;
