//! Fluid identities and their constants.

mod organic;
mod water;

use std::{fmt, str::FromStr};

use thiserror::Error;
use uom::si::{
    f64::{MolarMass, Pressure, ThermodynamicTemperature},
    molar_mass::kilogram_per_mole,
    pressure::pascal,
    thermodynamic_temperature::kelvin,
};

use super::CriticalPoint;

pub(crate) use organic::OrganicConstants;
pub(crate) use water::WATER;

/// A pure fluid known to this crate.
///
/// Organic fluids serve as ORC working fluids; water is the default
/// heat-source fluid. Identities parse from their common names
/// (case-insensitive), matching the names `CoolProp` uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Fluid {
    R245fa,
    R1233zdE,
    R134a,
    Isopentane,
    NPentane,
    Water,
}

impl Fluid {
    /// All supported fluids.
    pub const ALL: [Fluid; 6] = [
        Fluid::R245fa,
        Fluid::R1233zdE,
        Fluid::R134a,
        Fluid::Isopentane,
        Fluid::NPentane,
        Fluid::Water,
    ];

    /// Returns the `CoolProp` fluid name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Fluid::R245fa => "R245fa",
            Fluid::R1233zdE => "R1233zd(E)",
            Fluid::R134a => "R134a",
            Fluid::Isopentane => "Isopentane",
            Fluid::NPentane => "n-Pentane",
            Fluid::Water => "Water",
        }
    }

    /// Returns the tabulated critical point of the fluid.
    #[must_use]
    pub fn critical_point(self) -> CriticalPoint {
        let (t_c, p_c) = match self.organic() {
            Some(constants) => (constants.critical_temperature, constants.critical_pressure),
            None => (WATER.critical_temperature, WATER.critical_pressure),
        };
        CriticalPoint {
            temperature: ThermodynamicTemperature::new::<kelvin>(t_c),
            pressure: Pressure::new::<pascal>(p_c),
        }
    }

    /// Returns the molar mass of the fluid.
    #[must_use]
    pub fn molar_mass(self) -> MolarMass {
        let molar_mass = match self.organic() {
            Some(constants) => constants.molar_mass,
            None => WATER.molar_mass,
        };
        MolarMass::new::<kilogram_per_mole>(molar_mass)
    }

    /// Returns the cubic equation-of-state constants for organic fluids.
    pub(crate) fn organic(self) -> Option<&'static OrganicConstants> {
        match self {
            Fluid::R245fa => Some(&organic::R245FA),
            Fluid::R1233zdE => Some(&organic::R1233ZDE),
            Fluid::R134a => Some(&organic::R134A),
            Fluid::Isopentane => Some(&organic::ISOPENTANE),
            Fluid::NPentane => Some(&organic::N_PENTANE),
            Fluid::Water => None,
        }
    }
}

impl fmt::Display for Fluid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A fluid name that does not match any [`Fluid`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown fluid: {0}")]
pub struct UnknownFluid(pub String);

impl FromStr for Fluid {
    type Err = UnknownFluid;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Fluid::ALL
            .into_iter()
            .find(|fluid| fluid.name().eq_ignore_ascii_case(wanted))
            .or(match wanted.to_ascii_lowercase().as_str() {
                "r1233zde" => Some(Fluid::R1233zdE),
                "npentane" | "pentane" => Some(Fluid::NPentane),
                _ => None,
            })
            .ok_or_else(|| UnknownFluid(s.to_string()))
    }
}
