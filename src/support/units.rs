//! Extensions to [`uom`].
//!
//! This crate uses [`uom`] for all physical units (temperature, pressure, power).
//! This module adds the specific-energy quantities used by the cycle balances
//! and a helper for temperature differences.
//!
//! ## Temperature differences
//!
//! The [`TemperatureDifference`] trait provides a [`minus`](TemperatureDifference::minus) method
//! for subtracting one absolute temperature from another to get a temperature interval:
//!
//! ```
//! use uom::si::f64::ThermodynamicTemperature;
//! use uom::si::{temperature_interval, thermodynamic_temperature::kelvin};
//! use orc_models::support::units::TemperatureDifference;
//!
//! let t_inlet = ThermodynamicTemperature::new::<kelvin>(373.15);
//! let t_outlet = ThermodynamicTemperature::new::<kelvin>(363.15);
//! let drop = t_inlet.minus(t_outlet);
//! assert!((drop.get::<temperature_interval::kelvin>() - 10.0).abs() < 1e-12);
//! ```

mod quantities;
mod temperature_difference;

pub use quantities::{SpecificEnthalpy, SpecificEntropy, SpecificExergy};
pub use temperature_difference::TemperatureDifference;
