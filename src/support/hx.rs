//! Heat exchanger analysis toolkit.
//!
//! Utilities for characterizing the driving temperature difference and the
//! effective heat-transfer temperature of counter-current exchangers:
//!
//! - [`lmtd`]: log-mean temperature difference from the four terminal temperatures
//! - [`StreamTemperatures`]: inlet/outlet temperatures of an external stream,
//!   with its log-mean (entropic average) temperature
//!
//! # Example
//!
//! ```
//! use orc_models::support::hx::{lmtd, StreamTemperatures};
//! use uom::si::{
//!     f64::ThermodynamicTemperature,
//!     temperature_interval,
//!     thermodynamic_temperature::kelvin,
//! };
//!
//! let hot = StreamTemperatures::new(
//!     ThermodynamicTemperature::new::<kelvin>(473.15),
//!     ThermodynamicTemperature::new::<kelvin>(413.15),
//! );
//! let cold = StreamTemperatures::new(
//!     ThermodynamicTemperature::new::<kelvin>(310.0),
//!     ThermodynamicTemperature::new::<kelvin>(380.0),
//! );
//!
//! let delta_t = lmtd(hot, cold).unwrap();
//! assert!(delta_t.get::<temperature_interval::kelvin>() > 0.0);
//! ```

mod lmtd;
mod stream;

pub use lmtd::{TemperatureCross, lmtd};
pub use stream::StreamTemperatures;
