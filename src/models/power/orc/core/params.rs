//! Cycle design inputs.

use uom::{
    ConstZero,
    si::f64::{MassRate, Power, Pressure, ThermodynamicTemperature},
};

use crate::support::{
    constraint::{Constrained, StrictlyPositive, UnitIntervalLowerOpen},
    hx::StreamTemperatures,
    thermo::{DeadState, Fluid},
};

use super::{ComponentKind, ConfigurationMismatch};

/// An isentropic efficiency in `(0, 1]`.
pub type Efficiency = Constrained<f64, UnitIntervalLowerOpen>;

/// Which optional heat-input components are installed.
///
/// Passed explicitly with every solve. A positive duty request for a component
/// that is not installed is rejected as a [`ConfigurationMismatch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComponentEnablement {
    pub use_preheater: bool,
    pub use_superheater: bool,
}

impl Default for ComponentEnablement {
    fn default() -> Self {
        Self::ALL
    }
}

impl ComponentEnablement {
    /// Preheater and superheater both installed.
    pub const ALL: Self = Self {
        use_preheater: true,
        use_superheater: true,
    };

    /// Neither optional component installed.
    pub const NONE: Self = Self {
        use_preheater: false,
        use_superheater: false,
    };

    /// Checks that every positive duty request targets an installed component.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationMismatch`] naming the first disabled component
    /// with a positive request.
    pub fn check(&self, duties: &DutyRequests) -> Result<(), ConfigurationMismatch> {
        let requests = [
            (ComponentKind::Preheater, self.use_preheater, duties.preheater),
            (ComponentKind::Superheater, self.use_superheater, duties.superheater),
        ];

        for (component, enabled, requested) in requests {
            if !enabled && requested > Power::ZERO {
                return Err(ConfigurationMismatch {
                    component,
                    requested,
                });
            }
        }
        Ok(())
    }
}

/// Heat the caller asks the preheater and superheater to deliver.
///
/// Non-positive requests mean "no enhancement".
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DutyRequests {
    pub preheater: Power,
    pub superheater: Power,
}

impl Default for DutyRequests {
    fn default() -> Self {
        Self {
            preheater: Power::ZERO,
            superheater: Power::ZERO,
        }
    }
}

impl DutyRequests {
    #[must_use]
    pub fn new(preheater: Power, superheater: Power) -> Self {
        Self {
            preheater,
            superheater,
        }
    }

    #[must_use]
    pub fn with_preheater(mut self, preheater: Power) -> Self {
        self.preheater = preheater;
        self
    }

    #[must_use]
    pub fn with_superheater(mut self, superheater: Power) -> Self {
        self.superheater = superheater;
        self
    }
}

/// Inputs that fully define one cycle solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CycleDesignParameters {
    pub fluid: Fluid,
    pub evaporating_pressure: Pressure,
    /// Turbine-inlet temperature used when no enhancement duty is applied.
    pub turbine_inlet_temperature: ThermodynamicTemperature,
    pub condensing_temperature: ThermodynamicTemperature,
    pub pump_efficiency: Efficiency,
    pub turbine_efficiency: Efficiency,
    pub mass_flow: Constrained<MassRate, StrictlyPositive>,
    pub dead_state: DeadState,
    pub duties: DutyRequests,
    pub enablement: ComponentEnablement,

    /// External heating-stream temperatures across the evaporator, if known.
    pub heating_stream: Option<StreamTemperatures>,

    /// External cooling-stream temperatures across the condenser, if known.
    pub cooling_stream: Option<StreamTemperatures>,
}

impl CycleDesignParameters {
    /// Creates parameters with the default dead state, no duty requests,
    /// both optional components enabled and no external stream data.
    #[must_use]
    pub fn new(
        fluid: Fluid,
        evaporating_pressure: Pressure,
        turbine_inlet_temperature: ThermodynamicTemperature,
        condensing_temperature: ThermodynamicTemperature,
        pump_efficiency: Efficiency,
        turbine_efficiency: Efficiency,
        mass_flow: Constrained<MassRate, StrictlyPositive>,
    ) -> Self {
        Self {
            fluid,
            evaporating_pressure,
            turbine_inlet_temperature,
            condensing_temperature,
            pump_efficiency,
            turbine_efficiency,
            mass_flow,
            dead_state: DeadState::default(),
            duties: DutyRequests::default(),
            enablement: ComponentEnablement::default(),
            heating_stream: None,
            cooling_stream: None,
        }
    }

    #[must_use]
    pub fn with_duties(mut self, duties: DutyRequests) -> Self {
        self.duties = duties;
        self
    }

    #[must_use]
    pub fn with_enablement(mut self, enablement: ComponentEnablement) -> Self {
        self.enablement = enablement;
        self
    }

    #[must_use]
    pub fn with_dead_state(mut self, dead_state: DeadState) -> Self {
        self.dead_state = dead_state;
        self
    }

    #[must_use]
    pub fn with_heating_stream(mut self, stream: StreamTemperatures) -> Self {
        self.heating_stream = Some(stream);
        self
    }

    #[must_use]
    pub fn with_cooling_stream(mut self, stream: StreamTemperatures) -> Self {
        self.cooling_stream = Some(stream);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use uom::si::power::kilowatt;

    #[test]
    fn enabled_components_accept_any_request() {
        let duties = DutyRequests::new(Power::new::<kilowatt>(50.0), Power::new::<kilowatt>(20.0));
        assert!(ComponentEnablement::ALL.check(&duties).is_ok());
    }

    #[test]
    fn disabled_components_accept_zero_or_negative_requests() {
        let duties = DutyRequests::default().with_preheater(Power::new::<kilowatt>(-5.0));
        assert!(ComponentEnablement::NONE.check(&duties).is_ok());
    }

    #[test]
    fn positive_request_for_disabled_component_is_a_mismatch() {
        let enablement = ComponentEnablement {
            use_preheater: true,
            use_superheater: false,
        };
        let duties = DutyRequests::default().with_superheater(Power::new::<kilowatt>(10.0));

        let error = enablement.check(&duties).unwrap_err();
        assert_eq!(error.component, ComponentKind::Superheater);
        assert_eq!(error.requested, Power::new::<kilowatt>(10.0));
    }
}
