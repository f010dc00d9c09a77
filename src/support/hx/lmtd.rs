use thiserror::Error;
use uom::si::{f64::TemperatureInterval, temperature_interval::kelvin as delta_kelvin};

use crate::support::units::TemperatureDifference;

use super::StreamTemperatures;

/// Terminal approaches below this difference use the equal-approach branch.
const EQUAL_APPROACH_TOLERANCE: f64 = 1e-9;

/// A temperature cross in a counter-current exchanger.
///
/// At least one terminal approach temperature is non-positive, so heat cannot
/// flow from the hot stream to the cold stream along the whole exchanger.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("temperature cross: hot-end approach {hot_end:?}, cold-end approach {cold_end:?}")]
pub struct TemperatureCross {
    /// `T_hot,in − T_cold,out`.
    pub hot_end: TemperatureInterval,
    /// `T_hot,out − T_cold,in`.
    pub cold_end: TemperatureInterval,
    pub hot: StreamTemperatures,
    pub cold: StreamTemperatures,
}

/// Computes the log-mean temperature difference of a counter-current exchanger.
///
/// The approach temperatures are `ΔT₁ = T_hot,in − T_cold,out` and
/// `ΔT₂ = T_hot,out − T_cold,in`, and `LMTD = (ΔT₁ − ΔT₂) / ln(ΔT₁ / ΔT₂)`.
/// When the approaches are equal within 1e-9 K the common approach is returned.
///
/// # Errors
///
/// Returns [`TemperatureCross`] if either approach is non-positive.
pub fn lmtd(
    hot: StreamTemperatures,
    cold: StreamTemperatures,
) -> Result<TemperatureInterval, TemperatureCross> {
    let hot_end = hot.inlet.minus(cold.outlet);
    let cold_end = hot.outlet.minus(cold.inlet);

    let dt1 = hot_end.get::<delta_kelvin>();
    let dt2 = cold_end.get::<delta_kelvin>();

    // Also rejects NaN approaches.
    if !(dt1 > 0.0 && dt2 > 0.0) {
        return Err(TemperatureCross {
            hot_end,
            cold_end,
            hot,
            cold,
        });
    }

    if (dt1 - dt2).abs() < EQUAL_APPROACH_TOLERANCE {
        return Ok(hot_end);
    }

    Ok(TemperatureInterval::new::<delta_kelvin>(
        (dt1 - dt2) / (dt1 / dt2).ln(),
    ))
}
