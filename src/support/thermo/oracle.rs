use super::{CriticalPoint, Fluid, FluidPoint, Input, InputPair, PropertyError, PropertyLookupError};

/// A property that can be requested from a [`PropertyOracle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
    /// K
    Temperature,
    /// Pa
    Pressure,
    /// kg/m³
    Density,
    /// J/kg
    Enthalpy,
    /// J/(kg·K)
    Entropy,
    /// J/(kg·K)
    Cp,
    /// Vapor mass fraction.
    Quality,
}

/// Resolves fluid states from two independent inputs.
///
/// Implementors provide [`point`](Self::point) and
/// [`critical_point`](Self::critical_point); the provided
/// [`state`](Self::state) and [`lookup`](Self::lookup) methods validate
/// caller-supplied inputs and attach diagnostics to failures.
///
/// Oracles are shared across threads during parameter sweeps, so they must be
/// `Send + Sync`.
pub trait PropertyOracle: Send + Sync {
    /// Resolves the state fixed by `inputs`.
    ///
    /// # Errors
    ///
    /// Returns a [`PropertyError`] if the model cannot evaluate the state.
    fn point(&self, fluid: Fluid, inputs: InputPair) -> Result<FluidPoint, PropertyError>;

    /// Returns the critical point of `fluid`.
    ///
    /// # Errors
    ///
    /// Returns a [`PropertyError`] if the model does not know the fluid.
    fn critical_point(&self, fluid: Fluid) -> Result<CriticalPoint, PropertyError>;

    /// Resolves the state fixed by exactly two independent inputs, in any order.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyLookupError::InputCount`] or
    /// [`PropertyLookupError::DependentInputs`] for malformed inputs and
    /// [`PropertyLookupError::Backend`] if the model fails.
    fn state(&self, fluid: Fluid, inputs: &[Input]) -> Result<FluidPoint, PropertyLookupError> {
        let pair = InputPair::try_from(inputs)?;
        self.point(fluid, pair)
            .map_err(|source| PropertyLookupError::Backend {
                fluid,
                inputs: inputs.to_vec(),
                source,
            })
    }

    /// Returns a single property, in SI units, at the state fixed by `inputs`.
    ///
    /// # Errors
    ///
    /// Fails like [`state`](Self::state), and with
    /// [`PropertyError::Undefined`] if the property has no value at that state
    /// (such as `cp` inside the vapor dome).
    fn lookup(
        &self,
        property: Property,
        fluid: Fluid,
        inputs: &[Input],
    ) -> Result<f64, PropertyLookupError> {
        let point = self.state(fluid, inputs)?;
        point
            .get(property)
            .ok_or_else(|| PropertyLookupError::Backend {
                fluid,
                inputs: inputs.to_vec(),
                source: PropertyError::Undefined {
                    context: format!("{property:?} in {:?} state", point.phase),
                },
            })
    }
}

impl<O: PropertyOracle + ?Sized> PropertyOracle for &O {
    fn point(&self, fluid: Fluid, inputs: InputPair) -> Result<FluidPoint, PropertyError> {
        (**self).point(fluid, inputs)
    }

    fn critical_point(&self, fluid: Fluid) -> Result<CriticalPoint, PropertyError> {
        (**self).critical_point(fluid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{
        available_energy::joule_per_kilogram,
        f64::{MassDensity, Pressure, Ratio, ThermodynamicTemperature},
        mass_density::kilogram_per_cubic_meter,
        pressure::pascal,
        ratio::ratio,
        specific_heat_capacity::joule_per_kilogram_kelvin,
        thermodynamic_temperature::kelvin,
    };

    use crate::support::{
        thermo::Phase,
        units::{SpecificEnthalpy, SpecificEntropy},
    };

    /// Returns a fixed two-phase point for every request.
    struct FixedOracle;

    impl PropertyOracle for FixedOracle {
        fn point(&self, fluid: Fluid, _inputs: InputPair) -> Result<FluidPoint, PropertyError> {
            if fluid == Fluid::Water {
                return Err(PropertyError::Unsupported {
                    context: "water".into(),
                });
            }
            Ok(FluidPoint {
                temperature: ThermodynamicTemperature::new::<kelvin>(350.0),
                pressure: Pressure::new::<pascal>(1.0e6),
                density: MassDensity::new::<kilogram_per_cubic_meter>(100.0),
                enthalpy: SpecificEnthalpy::new::<joule_per_kilogram>(4.0e5),
                entropy: SpecificEntropy::new::<joule_per_kilogram_kelvin>(1.5e3),
                cp: None,
                quality: Some(Ratio::new::<ratio>(0.5)),
                phase: Phase::TwoPhase,
            })
        }

        fn critical_point(&self, fluid: Fluid) -> Result<CriticalPoint, PropertyError> {
            Ok(fluid.critical_point())
        }
    }

    fn inputs() -> [Input; 2] {
        [
            Input::Temperature(ThermodynamicTemperature::new::<kelvin>(350.0)),
            Input::Quality(Ratio::new::<ratio>(0.5)),
        ]
    }

    #[test]
    fn lookup_returns_si_values() {
        let enthalpy = FixedOracle
            .lookup(Property::Enthalpy, Fluid::R245fa, &inputs())
            .unwrap();
        assert_relative_eq!(enthalpy, 4.0e5);
    }

    #[test]
    fn undefined_property_reports_inputs() {
        let error = FixedOracle
            .lookup(Property::Cp, Fluid::R245fa, &inputs())
            .unwrap_err();

        let PropertyLookupError::Backend {
            fluid,
            inputs: offending,
            source,
        } = error
        else {
            panic!("expected a backend error");
        };
        assert_eq!(fluid, Fluid::R245fa);
        assert_eq!(offending, inputs().to_vec());
        assert!(matches!(source, PropertyError::Undefined { .. }));
    }

    #[test]
    fn backend_failures_are_wrapped() {
        let error = FixedOracle.state(Fluid::Water, &inputs()).unwrap_err();
        assert!(matches!(
            error,
            PropertyLookupError::Backend {
                fluid: Fluid::Water,
                source: PropertyError::Unsupported { .. },
                ..
            }
        ));
    }

    #[test]
    fn malformed_inputs_fail_before_the_backend() {
        let error = FixedOracle
            .lookup(Property::Enthalpy, Fluid::Water, &inputs()[..1])
            .unwrap_err();
        assert_eq!(error, PropertyLookupError::InputCount { count: 1 });
    }

    #[test]
    fn references_are_oracles() {
        let oracle = &FixedOracle;
        let point = oracle.state(Fluid::R134a, &inputs()).unwrap();
        assert_eq!(point.phase, Phase::TwoPhase);
    }
}
