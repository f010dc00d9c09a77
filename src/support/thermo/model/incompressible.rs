//! Incompressible liquid model with constant heat capacity.
//!
//! `Incompressible` implements a simple and widely-used engineering approximation for liquids:
//! constant density with a constant specific heat capacity.
//!
//! # Assumptions
//!
//! - Density is treated as constant (`ρ = ρ_ref`)
//! - Calorically perfect liquid: `cp` is constant
//! - Pressure effects are not modeled by this approximation
//!
//! # When To Use
//!
//! Sensible-heat sources such as pressurized hot water, where only the
//! enthalpy drop between source inlet and outlet matters.
//!
//! # Reference State
//!
//! Enthalpy and entropy are reported relative to a configurable reference state
//! (`T_ref`, `ρ_ref`, `h_ref`, `s_ref`).

use thiserror::Error;
use uom::{
    ConstZero,
    si::{
        available_energy::joule_per_kilogram,
        f64::{MassDensity, Pressure, SpecificHeatCapacity, ThermodynamicTemperature},
        specific_heat_capacity::joule_per_kilogram_kelvin,
        thermodynamic_temperature::{degree_celsius, kelvin},
    },
};

use crate::support::{
    constraint::{Constraint, StrictlyPositive},
    thermo::{FluidPoint, InputPair, Phase, PropertyError},
    units::{SpecificEnthalpy, SpecificEntropy, TemperatureDifference},
};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum IncompressibleParametersError {
    #[error("invalid cp: {cp:?}")]
    Cp { cp: SpecificHeatCapacity },
    #[error("invalid reference temperature: {t_ref:?}")]
    ReferenceTemperature { t_ref: ThermodynamicTemperature },
    #[error("invalid reference density: {rho_ref:?}")]
    ReferenceDensity { rho_ref: MassDensity },
}

impl From<IncompressibleParametersError> for PropertyError {
    fn from(error: IncompressibleParametersError) -> Self {
        PropertyError::InvalidState {
            context: error.to_string(),
        }
    }
}

/// Reference values used to define enthalpy/entropy offsets for an [`Incompressible`] model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IncompressibleReference {
    pub temperature: ThermodynamicTemperature,
    pub density: MassDensity,
    pub enthalpy: SpecificEnthalpy,
    pub entropy: SpecificEntropy,
}

impl IncompressibleReference {
    /// Returns a reference with `T_ref = 25°C`, `h_ref = 0`, `s_ref = 0`, and the provided `ρ_ref`.
    #[must_use]
    pub fn standard(density: MassDensity) -> Self {
        Self {
            temperature: ThermodynamicTemperature::new::<degree_celsius>(25.0),
            density,
            enthalpy: SpecificEnthalpy::ZERO,
            entropy: SpecificEntropy::ZERO,
        }
    }
}

/// Constant parameters for the [`Incompressible`] model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IncompressibleParameters {
    pub cp: SpecificHeatCapacity,
    pub reference: IncompressibleReference,
}

impl IncompressibleParameters {
    #[must_use]
    pub fn new(cp: SpecificHeatCapacity, reference_density: MassDensity) -> Self {
        Self {
            cp,
            reference: IncompressibleReference::standard(reference_density),
        }
    }

    #[must_use]
    pub fn with_reference(mut self, reference: IncompressibleReference) -> Self {
        self.reference = reference;
        self
    }
}

/// Incompressible liquid model with constant density and constant heat capacity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Incompressible {
    cp: SpecificHeatCapacity,
    t_ref: ThermodynamicTemperature,
    rho_ref: MassDensity,
    h_ref: SpecificEnthalpy,
    s_ref: SpecificEntropy,
}

impl Incompressible {
    /// Creates an incompressible model from constant parameters.
    ///
    /// # Errors
    ///
    /// Returns [`IncompressibleParametersError`] if any required constant is invalid.
    pub fn new(parameters: IncompressibleParameters) -> Result<Self, IncompressibleParametersError> {
        let cp = parameters.cp;
        if StrictlyPositive::check(&cp.value).is_err() {
            return Err(IncompressibleParametersError::Cp { cp });
        }

        let t_ref = parameters.reference.temperature;
        if StrictlyPositive::check(&t_ref.value).is_err() {
            return Err(IncompressibleParametersError::ReferenceTemperature { t_ref });
        }

        let rho_ref = parameters.reference.density;
        if StrictlyPositive::check(&rho_ref.value).is_err() {
            return Err(IncompressibleParametersError::ReferenceDensity { rho_ref });
        }

        Ok(Self {
            cp,
            t_ref,
            rho_ref,
            h_ref: parameters.reference.enthalpy,
            s_ref: parameters.reference.entropy,
        })
    }

    /// Returns the constant reference density used by this model.
    #[must_use]
    pub fn reference_density(&self) -> MassDensity {
        self.rho_ref
    }

    /// Computes enthalpy using `h = h₀ + c·(T − T₀)`.
    #[must_use]
    pub fn enthalpy(&self, temperature: ThermodynamicTemperature) -> SpecificEnthalpy {
        self.h_ref + self.cp * temperature.minus(self.t_ref)
    }

    /// Computes entropy with `s = s₀ + c·ln(T/T₀)`.
    #[must_use]
    pub fn entropy(&self, temperature: ThermodynamicTemperature) -> SpecificEntropy {
        self.s_ref + self.cp * (temperature / self.t_ref).ln()
    }

    /// Resolves the state fixed by `inputs`.
    ///
    /// Pressure is carried through unchanged since it has no effect on
    /// properties.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError::Unsupported`] unless pressure is one of the
    /// inputs together with temperature, enthalpy or entropy, and
    /// [`PropertyError::OutOfDomain`] for non-positive temperatures.
    pub fn point(&self, inputs: InputPair) -> Result<FluidPoint, PropertyError> {
        let (temperature, pressure) = match inputs {
            InputPair::TemperaturePressure(t, p) => (t, p),
            InputPair::PressureEnthalpy(p, h) => {
                let dt = (h - self.h_ref).get::<joule_per_kilogram>()
                    / self.cp.get::<joule_per_kilogram_kelvin>();
                (
                    ThermodynamicTemperature::new::<kelvin>(self.t_ref.get::<kelvin>() + dt),
                    p,
                )
            }
            InputPair::PressureEntropy(p, s) => {
                let ratio = ((s - self.s_ref).get::<joule_per_kilogram_kelvin>()
                    / self.cp.get::<joule_per_kilogram_kelvin>())
                .exp();
                (
                    ThermodynamicTemperature::new::<kelvin>(self.t_ref.get::<kelvin>() * ratio),
                    p,
                )
            }
            other => {
                return Err(PropertyError::Unsupported {
                    context: format!("incompressible model does not accept {other:?}"),
                });
            }
        };

        self.state(temperature, pressure)
    }

    fn state(
        &self,
        temperature: ThermodynamicTemperature,
        pressure: Pressure,
    ) -> Result<FluidPoint, PropertyError> {
        if temperature.get::<kelvin>() <= 0.0 {
            return Err(PropertyError::OutOfDomain {
                context: format!("temperature {temperature:?} must be positive"),
            });
        }

        Ok(FluidPoint {
            temperature,
            pressure,
            density: self.rho_ref,
            enthalpy: self.enthalpy(temperature),
            entropy: self.entropy(temperature),
            cp: Some(self.cp),
            quality: None,
            phase: Phase::Liquid,
        })
    }
}
