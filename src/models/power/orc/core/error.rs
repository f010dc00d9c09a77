use thiserror::Error;
use uom::si::f64::{MassRate, Power, ThermodynamicTemperature};

use crate::support::{
    hx::TemperatureCross,
    thermo::{Phase, PropertyLookupError},
    units::SpecificEnthalpy,
};

use super::ComponentKind;

/// Errors that can occur while solving a cycle or matching it to a heat source.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolveError {
    /// A property lookup failed.
    #[error(transparent)]
    Property(#[from] PropertyLookupError),

    /// The requested design is physically impossible.
    #[error(transparent)]
    Physical(#[from] PhysicalConstraintViolation),

    /// A derived quantity needed to size the cycle is non-positive.
    #[error(transparent)]
    Convergence(#[from] ConvergenceFailure),

    /// A duty was requested for a component that is not installed.
    #[error(transparent)]
    Configuration(#[from] ConfigurationMismatch),
}

/// A design that violates a physical constraint of the cycle.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PhysicalConstraintViolation {
    /// The external and working-fluid temperature profiles cross.
    #[error("{component} temperature profiles cross")]
    TemperatureCross {
        component: ComponentKind,
        #[source]
        source: TemperatureCross,
    },

    /// The turbine would receive liquid or a two-phase mixture.
    #[error("turbine inlet is {phase:?} at {temperature:?}")]
    TurbineInletPhase {
        phase: Phase,
        temperature: ThermodynamicTemperature,
    },

    /// The evaporation temperature is not strictly inside its feasible band.
    #[error(
        "evaporation temperature {saturation:?} must lie strictly between {minimum:?} and {maximum:?}"
    )]
    EvaporationTemperature {
        saturation: ThermodynamicTemperature,
        /// Condensing temperature plus 1 K.
        minimum: ThermodynamicTemperature,
        /// Critical temperature of the working fluid.
        maximum: ThermodynamicTemperature,
    },

    /// The heat-source outlet is colder than the pinch allows.
    #[error("heat-source outlet {source_outlet:?} is below the pinch limit {minimum:?}")]
    PinchViolated {
        source_outlet: ThermodynamicTemperature,
        minimum: ThermodynamicTemperature,
    },
}

/// A sizing quantity that came out non-positive, so no match exists.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConvergenceFailure {
    #[error("heat source delivers no heat: {heat:?}")]
    NoHeatAvailable { heat: Power },

    #[error("non-positive pump-to-turbine enthalpy rise: {rise:?}")]
    NonPositiveEnthalpyRise { rise: SpecificEnthalpy },

    #[error("derived working-fluid mass flow is not positive: {mass_flow:?}")]
    NonPositiveMassFlow { mass_flow: MassRate },
}

/// A positive duty request for a component that is disabled.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("{component} is disabled but {requested:?} was requested")]
pub struct ConfigurationMismatch {
    pub component: ComponentKind,
    pub requested: Power,
}
