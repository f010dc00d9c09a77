use uom::si::{f64::ThermodynamicTemperature, thermodynamic_temperature::kelvin};

/// Terminal temperatures of a stream passing through a heat exchanger.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StreamTemperatures {
    pub inlet: ThermodynamicTemperature,
    pub outlet: ThermodynamicTemperature,
}

impl StreamTemperatures {
    #[must_use]
    pub fn new(inlet: ThermodynamicTemperature, outlet: ThermodynamicTemperature) -> Self {
        Self { inlet, outlet }
    }

    /// Returns the log-mean (entropic average) temperature of the stream.
    ///
    /// For a stream with constant specific heat this is the temperature at
    /// which the stream's heat exchange produces the same entropy change:
    /// `T_lm = (T_in − T_out) / ln(T_in / T_out)`.
    /// When the terminal temperatures coincide the inlet temperature is returned.
    #[must_use]
    pub fn log_mean(&self) -> ThermodynamicTemperature {
        let t_in = self.inlet.get::<kelvin>();
        let t_out = self.outlet.get::<kelvin>();

        if (t_in - t_out).abs() < 1e-9 {
            return self.inlet;
        }

        ThermodynamicTemperature::new::<kelvin>((t_in - t_out) / (t_in / t_out).ln())
    }

    /// Returns the arithmetic mean of the terminal temperatures.
    #[must_use]
    pub fn arithmetic_mean(&self) -> ThermodynamicTemperature {
        ThermodynamicTemperature::new::<kelvin>(
            0.5 * (self.inlet.get::<kelvin>() + self.outlet.get::<kelvin>()),
        )
    }
}
