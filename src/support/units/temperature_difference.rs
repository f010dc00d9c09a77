use uom::si::{
    f64::{TemperatureInterval, ThermodynamicTemperature},
    temperature_interval::kelvin as delta_kelvin,
    thermodynamic_temperature::kelvin as abs_kelvin,
};

/// Extension trait for computing temperature differences.
///
/// Subtracting two [`ThermodynamicTemperature`] values in [`uom`] does not yield a
/// [`TemperatureInterval`], see
/// [#380](https://github.com/iliekturtles/uom/issues/380).
pub trait TemperatureDifference {
    /// Returns the temperature difference `self - other`.
    fn minus(self, other: Self) -> TemperatureInterval;
}

impl TemperatureDifference for ThermodynamicTemperature {
    fn minus(self, other: Self) -> TemperatureInterval {
        TemperatureInterval::new::<delta_kelvin>(
            self.get::<abs_kelvin>() - other.get::<abs_kelvin>(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::thermodynamic_temperature::degree_celsius;

    #[test]
    fn pinch_between_source_outlet_and_evaporation() {
        let source_outlet = ThermodynamicTemperature::new::<degree_celsius>(80.0);
        let evaporation = ThermodynamicTemperature::new::<abs_kelvin>(343.15);

        assert_relative_eq!(
            source_outlet.minus(evaporation).get::<delta_kelvin>(),
            10.0,
            epsilon = 1e-9
        );
        assert_relative_eq!(
            evaporation.minus(source_outlet).get::<delta_kelvin>(),
            -10.0,
            epsilon = 1e-9
        );
    }
}
