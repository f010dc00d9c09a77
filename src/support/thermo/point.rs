use uom::si::{
    available_energy::joule_per_kilogram,
    f64::{MassDensity, Pressure, Ratio, SpecificHeatCapacity, ThermodynamicTemperature},
    mass_density::kilogram_per_cubic_meter,
    pressure::pascal,
    ratio::ratio,
    specific_heat_capacity::joule_per_kilogram_kelvin,
    thermodynamic_temperature::kelvin,
};

use crate::support::units::{SpecificEnthalpy, SpecificEntropy};

use super::Property;

/// Phase region of a fluid state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Liquid,
    TwoPhase,
    Vapor,
    Supercritical,
}

impl Phase {
    /// Returns `true` for states a turbine can expand: vapor or supercritical.
    #[must_use]
    pub fn is_expandable(self) -> bool {
        matches!(self, Phase::Vapor | Phase::Supercritical)
    }
}

/// A fully resolved fluid state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FluidPoint {
    pub temperature: ThermodynamicTemperature,
    pub pressure: Pressure,
    pub density: MassDensity,
    pub enthalpy: SpecificEnthalpy,
    pub entropy: SpecificEntropy,
    /// Isobaric specific heat, undefined inside the vapor dome.
    pub cp: Option<SpecificHeatCapacity>,
    /// Vapor quality, defined for saturated and two-phase states.
    pub quality: Option<Ratio>,
    pub phase: Phase,
}

impl FluidPoint {
    /// Returns the requested property in SI units, if defined at this state.
    #[must_use]
    pub fn get(&self, property: Property) -> Option<f64> {
        match property {
            Property::Temperature => Some(self.temperature.get::<kelvin>()),
            Property::Pressure => Some(self.pressure.get::<pascal>()),
            Property::Density => Some(self.density.get::<kilogram_per_cubic_meter>()),
            Property::Enthalpy => Some(self.enthalpy.get::<joule_per_kilogram>()),
            Property::Entropy => Some(self.entropy.get::<joule_per_kilogram_kelvin>()),
            Property::Cp => self.cp.map(|cp| cp.get::<joule_per_kilogram_kelvin>()),
            Property::Quality => self.quality.map(|q| q.get::<ratio>()),
        }
    }
}

/// Critical point of a pure fluid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CriticalPoint {
    pub temperature: ThermodynamicTemperature,
    pub pressure: Pressure,
}
