//! Flow and heat exergy relative to a dead state.

use uom::si::{
    available_energy::joule_per_kilogram,
    f64::{Power, Pressure, ThermodynamicTemperature},
    power::watt,
    pressure::pascal,
    specific_heat_capacity::joule_per_kilogram_kelvin,
    thermodynamic_temperature::kelvin,
};

use crate::support::units::{SpecificEnthalpy, SpecificEntropy, SpecificExergy};

use super::{Fluid, FluidPoint, Input, PropertyLookupError, PropertyOracle};

/// Environmental reference state for exergy analysis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeadState {
    pub temperature: ThermodynamicTemperature,
    pub pressure: Pressure,
}

impl Default for DeadState {
    /// 25 °C and one standard atmosphere.
    fn default() -> Self {
        Self {
            temperature: ThermodynamicTemperature::new::<kelvin>(298.15),
            pressure: Pressure::new::<pascal>(101_325.0),
        }
    }
}

impl DeadState {
    /// Resolves the dead-state enthalpy and entropy of `fluid`.
    ///
    /// # Errors
    ///
    /// Returns a [`PropertyLookupError`] if the oracle cannot evaluate the fluid
    /// at the dead-state temperature and pressure.
    pub fn reference<O: PropertyOracle + ?Sized>(
        &self,
        oracle: &O,
        fluid: Fluid,
    ) -> Result<ExergyReference, PropertyLookupError> {
        let point = oracle.state(
            fluid,
            &[
                Input::Temperature(self.temperature),
                Input::Pressure(self.pressure),
            ],
        )?;

        Ok(ExergyReference {
            temperature: self.temperature,
            enthalpy: point.enthalpy,
            entropy: point.entropy,
        })
    }

    /// Returns the exergy of heat `q` exchanged at `surface` temperature:
    /// `(1 − T₀/T_s)·Q`.
    ///
    /// Zero heat, or a non-positive surface temperature, carries no exergy.
    #[must_use]
    pub fn heat_exergy(&self, q: Power, surface: ThermodynamicTemperature) -> Power {
        let t_s = surface.get::<kelvin>();
        let q = q.get::<watt>();
        if t_s <= 0.0 || q == 0.0 {
            return Power::new::<watt>(0.0);
        }
        Power::new::<watt>((1.0 - self.temperature.get::<kelvin>() / t_s) * q)
    }
}

/// Dead-state properties of a specific fluid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExergyReference {
    pub temperature: ThermodynamicTemperature,
    pub enthalpy: SpecificEnthalpy,
    pub entropy: SpecificEntropy,
}

impl ExergyReference {
    /// Returns the specific flow exergy `ψ = (h − h₀) − T₀·(s − s₀)`.
    #[must_use]
    pub fn specific_exergy(
        &self,
        enthalpy: SpecificEnthalpy,
        entropy: SpecificEntropy,
    ) -> SpecificExergy {
        let dh = (enthalpy - self.enthalpy).get::<joule_per_kilogram>();
        let ds = (entropy - self.entropy).get::<joule_per_kilogram_kelvin>();
        SpecificExergy::new::<joule_per_kilogram>(dh - self.temperature.get::<kelvin>() * ds)
    }

    /// Returns the specific flow exergy of a resolved state.
    #[must_use]
    pub fn of(&self, point: &FluidPoint) -> SpecificExergy {
        self.specific_exergy(point.enthalpy, point.entropy)
    }
}
