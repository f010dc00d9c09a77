/// Constants for the Peng–Robinson model of an organic fluid, in SI units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct OrganicConstants {
    /// K
    pub critical_temperature: f64,
    /// Pa
    pub critical_pressure: f64,
    pub acentric_factor: f64,
    /// kg/mol
    pub molar_mass: f64,
    /// Ideal-gas heat capacity `cp⁰ = c₀ + c₁·T + c₂·T²` in J/(kg·K), T in K.
    pub ideal_gas_cp: [f64; 3],
}

pub(crate) const R245FA: OrganicConstants = OrganicConstants {
    critical_temperature: 427.01,
    critical_pressure: 3.651e6,
    acentric_factor: 0.3776,
    molar_mass: 0.134_048,
    ideal_gas_cp: [290.0, 2.25, -1.0e-3],
};

pub(crate) const R1233ZDE: OrganicConstants = OrganicConstants {
    critical_temperature: 439.6,
    critical_pressure: 3.6237e6,
    acentric_factor: 0.3025,
    molar_mass: 0.130_496,
    ideal_gas_cp: [240.0, 2.333_333, -1.333_333e-3],
};

pub(crate) const R134A: OrganicConstants = OrganicConstants {
    critical_temperature: 374.21,
    critical_pressure: 4.0593e6,
    acentric_factor: 0.326_84,
    molar_mass: 0.102_032,
    ideal_gas_cp: [220.0, 2.616_667, -1.666_667e-3],
};

pub(crate) const ISOPENTANE: OrganicConstants = OrganicConstants {
    critical_temperature: 460.35,
    critical_pressure: 3.378e6,
    acentric_factor: 0.2274,
    molar_mass: 0.072_149,
    ideal_gas_cp: [-97.315_10, 6.714_208, -2.909_909e-3],
};

pub(crate) const N_PENTANE: OrganicConstants = OrganicConstants {
    critical_temperature: 469.7,
    critical_pressure: 3.370e6,
    acentric_factor: 0.251,
    molar_mass: 0.072_149,
    ideal_gas_cp: [-18.088_44, 6.469_156, -2.767_121e-3],
};
