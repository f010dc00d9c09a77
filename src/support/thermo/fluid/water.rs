use uom::si::{
    f64::{MassDensity, SpecificHeatCapacity},
    mass_density::kilogram_per_cubic_meter,
    specific_heat_capacity::joule_per_kilogram_kelvin,
};

use crate::support::thermo::model::incompressible::IncompressibleParameters;

/// Liquid water constants.
pub(crate) struct WaterConstants {
    /// K
    pub critical_temperature: f64,
    /// Pa
    pub critical_pressure: f64,
    /// kg/mol
    pub molar_mass: f64,
    /// J/(kg·K), near 25 °C.
    pub cp: f64,
    /// kg/m³, at 25 °C.
    pub density: f64,
}

pub(crate) const WATER: WaterConstants = WaterConstants {
    critical_temperature: 647.096,
    critical_pressure: 22.064e6,
    molar_mass: 0.018_015_268,
    cp: 4184.0,
    density: 997.047,
};

impl WaterConstants {
    /// Constant-property liquid parameters for heat-source calculations.
    pub(crate) fn liquid(&self) -> IncompressibleParameters {
        IncompressibleParameters::new(
            SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(self.cp),
            MassDensity::new::<kilogram_per_cubic_meter>(self.density),
        )
    }
}
