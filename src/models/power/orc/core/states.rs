//! Cycle state points.
//!
//! Positions follow the working fluid around the cycle:
//!
//! ```text
//!  1 condenser outlet ── pump ──▶ 2 ── preheater ──▶ 2b ── evaporator ──▶ 3
//!  ▲                                                                      │
//!  └── condenser ◀── 4 ◀── turbine ◀── 3b ◀──────────── superheater ◀─────┘
//! ```

use std::fmt;

use tracing::{debug, trace};
use uom::{
    ConstZero,
    si::{
        f64::{MassRate, Power, Pressure, Ratio, TemperatureInterval, ThermodynamicTemperature},
        ratio::ratio,
        temperature_interval::kelvin as delta_kelvin,
    },
};

use crate::support::{
    thermo::{Fluid, FluidPoint, Input, Phase, PropertyLookupError, PropertyOracle},
    units::{SpecificEnthalpy, SpecificEntropy},
};

use super::{CycleDesignParameters, PhysicalConstraintViolation, SolveError};

/// Margin kept between the preheater outlet and the evaporation temperature.
const PREHEATER_MARGIN_K: f64 = 5.0;

/// Margin kept between the turbine inlet and the critical temperature.
const CRITICAL_MARGIN_K: f64 = 10.0;

/// Turbine-inlet superheat at or below this value collapses to saturated vapor.
const MIN_SUPERHEAT_K: f64 = 1.0;

/// Minimum gap between the condensing and evaporation temperatures.
const MIN_LIFT_K: f64 = 1.0;

/// A labeled position in the cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CyclePosition {
    /// Saturated liquid leaving the condenser (1).
    CondenserOutlet,
    /// Compressed liquid leaving the pump (2).
    PumpOutlet,
    /// Liquid leaving the preheater (2b).
    PreheaterOutlet,
    /// Saturated vapor leaving the evaporator (3).
    EvaporatorOutlet,
    /// Vapor entering the turbine, after the superheater (3b).
    TurbineInlet,
    /// Expanded vapor leaving the turbine (4).
    TurbineOutlet,
}

impl CyclePosition {
    /// All positions in flow order.
    pub const ALL: [Self; 6] = [
        Self::CondenserOutlet,
        Self::PumpOutlet,
        Self::PreheaterOutlet,
        Self::EvaporatorOutlet,
        Self::TurbineInlet,
        Self::TurbineOutlet,
    ];

    /// Returns the conventional short label: `1`, `2`, `2b`, `3`, `3b`, `4`.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::CondenserOutlet => "1",
            Self::PumpOutlet => "2",
            Self::PreheaterOutlet => "2b",
            Self::EvaporatorOutlet => "3",
            Self::TurbineInlet => "3b",
            Self::TurbineOutlet => "4",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for CyclePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The working-fluid state at one cycle position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatePoint {
    pub position: CyclePosition,
    pub temperature: ThermodynamicTemperature,
    pub pressure: Pressure,
    pub enthalpy: SpecificEnthalpy,
    pub entropy: SpecificEntropy,
    pub phase: Option<Phase>,
}

impl StatePoint {
    fn at(position: CyclePosition, point: &FluidPoint) -> Self {
        trace!(
            %position,
            temperature = ?point.temperature,
            pressure = ?point.pressure,
            phase = ?point.phase,
            "solved state point"
        );
        Self {
            position,
            temperature: point.temperature,
            pressure: point.pressure,
            enthalpy: point.enthalpy,
            entropy: point.entropy,
            phase: Some(point.phase),
        }
    }
}

/// Requested and absorbed heat for an optional enhancement component.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnhancementDuty {
    pub requested: Power,
    pub actual: Power,
    /// Set when a positive request was limited by a temperature ceiling.
    pub constraint_active: bool,
}

impl EnhancementDuty {
    fn pass_through(requested: Power) -> Self {
        Self {
            requested,
            actual: Power::ZERO,
            constraint_active: false,
        }
    }
}

/// The six state points of a solved cycle plus the enhancement outcomes.
#[derive(Debug, Clone, PartialEq)]
pub struct CycleStates {
    points: [StatePoint; 6],
    pub preheater: EnhancementDuty,
    pub superheater: EnhancementDuty,
    pub evaporation_temperature: ThermodynamicTemperature,
    pub critical_temperature: ThermodynamicTemperature,
    /// Set when the turbine inlet was held at `T_crit − 10 K`, whether or not
    /// any enhancement duty was requested.
    pub turbine_inlet_capped: bool,
}

impl CycleStates {
    /// Returns the state at `position`.
    #[must_use]
    pub fn get(&self, position: CyclePosition) -> &StatePoint {
        &self.points[position.index()]
    }

    /// Iterates over the states in flow order.
    pub fn iter(&self) -> impl Iterator<Item = &StatePoint> {
        self.points.iter()
    }

    /// Condensing pressure, taken at the condenser outlet.
    #[must_use]
    pub fn condensing_pressure(&self) -> Pressure {
        self.get(CyclePosition::CondenserOutlet).pressure
    }
}

/// Property lookups for one working fluid.
struct Lookup<'a, O: ?Sized> {
    oracle: &'a O,
    fluid: Fluid,
}

impl<O: PropertyOracle + ?Sized> Lookup<'_, O> {
    fn saturated(
        &self,
        temperature: ThermodynamicTemperature,
        quality: f64,
    ) -> Result<FluidPoint, PropertyLookupError> {
        self.oracle.state(
            self.fluid,
            &[
                Input::Temperature(temperature),
                Input::Quality(Ratio::new::<ratio>(quality)),
            ],
        )
    }

    fn saturated_at(
        &self,
        pressure: Pressure,
        quality: f64,
    ) -> Result<FluidPoint, PropertyLookupError> {
        self.oracle.state(
            self.fluid,
            &[
                Input::Pressure(pressure),
                Input::Quality(Ratio::new::<ratio>(quality)),
            ],
        )
    }

    fn tp(
        &self,
        temperature: ThermodynamicTemperature,
        pressure: Pressure,
    ) -> Result<FluidPoint, PropertyLookupError> {
        self.oracle.state(
            self.fluid,
            &[Input::Temperature(temperature), Input::Pressure(pressure)],
        )
    }

    fn ph(
        &self,
        pressure: Pressure,
        enthalpy: SpecificEnthalpy,
    ) -> Result<FluidPoint, PropertyLookupError> {
        self.oracle.state(
            self.fluid,
            &[Input::Pressure(pressure), Input::Enthalpy(enthalpy)],
        )
    }

    fn ps(
        &self,
        pressure: Pressure,
        entropy: SpecificEntropy,
    ) -> Result<FluidPoint, PropertyLookupError> {
        self.oracle.state(
            self.fluid,
            &[Input::Pressure(pressure), Input::Entropy(entropy)],
        )
    }

    fn critical_temperature(&self) -> Result<ThermodynamicTemperature, PropertyLookupError> {
        self.oracle
            .critical_point(self.fluid)
            .map(|critical| critical.temperature)
            .map_err(|source| PropertyLookupError::CriticalPoint {
                fluid: self.fluid,
                source,
            })
    }
}

/// Condenser outlet and pump outlet for a given evaporating pressure.
pub(super) struct PumpSide {
    pub condenser_outlet: FluidPoint,
    pub pump_outlet: FluidPoint,
}

/// Solves states 1 and 2.
///
/// The pump outlet enthalpy is `h₂ = h₁ + (h₂ₛ − h₁) / η_pump`.
pub(super) fn pump_side<O: PropertyOracle + ?Sized>(
    oracle: &O,
    fluid: Fluid,
    condensing_temperature: ThermodynamicTemperature,
    evaporating_pressure: Pressure,
    pump_efficiency: f64,
) -> Result<PumpSide, PropertyLookupError> {
    let lookup = Lookup { oracle, fluid };

    let condenser_outlet = lookup.saturated(condensing_temperature, 0.0)?;
    let h1 = condenser_outlet.enthalpy;
    let h2s = lookup.ps(evaporating_pressure, condenser_outlet.entropy)?.enthalpy;
    let pump_outlet = lookup.ph(evaporating_pressure, h1 + (h2s - h1) / pump_efficiency)?;

    Ok(PumpSide {
        condenser_outlet,
        pump_outlet,
    })
}

/// Resolves the turbine inlet for an enthalpy boost applied to saturated vapor.
///
/// A zero boost uses the design temperature. The result is capped at
/// `T_crit − 10 K` and collapses to saturated vapor when it is no more than
/// 1 K above saturation. Returns the state and whether the cap applied.
pub(super) fn turbine_inlet<O: PropertyOracle + ?Sized>(
    oracle: &O,
    fluid: Fluid,
    saturated_vapor: &FluidPoint,
    design_temperature: ThermodynamicTemperature,
    critical_temperature: ThermodynamicTemperature,
    boost: Option<SpecificEnthalpy>,
) -> Result<(FluidPoint, bool), PropertyLookupError> {
    let lookup = Lookup { oracle, fluid };
    let pressure = saturated_vapor.pressure;
    let ceiling = critical_temperature - delta(CRITICAL_MARGIN_K);

    let (candidate, clamped) = match boost {
        Some(boost) => {
            let ceiling_point = lookup.tp(ceiling, pressure)?;
            let target = saturated_vapor.enthalpy + boost;
            if target > ceiling_point.enthalpy {
                (ceiling_point, true)
            } else {
                (lookup.ph(pressure, target)?, false)
            }
        }
        None if design_temperature > ceiling => (lookup.tp(ceiling, pressure)?, true),
        None if design_temperature > saturated_vapor.temperature + delta(MIN_SUPERHEAT_K) => {
            (lookup.tp(design_temperature, pressure)?, false)
        }
        None => (*saturated_vapor, false),
    };

    if candidate.temperature > saturated_vapor.temperature + delta(MIN_SUPERHEAT_K) {
        Ok((candidate, clamped))
    } else {
        Ok((*saturated_vapor, clamped))
    }
}

/// Solves all six state points for `params`.
///
/// A known `critical_temperature` skips the oracle's critical-point lookup.
///
/// # Errors
///
/// Returns [`SolveError::Configuration`] for duty requests on disabled
/// components, [`SolveError::Property`] if any lookup fails, and
/// [`SolveError::Physical`] if the evaporation temperature is infeasible or the
/// turbine inlet is not expandable.
pub(super) fn solve_states<O: PropertyOracle + ?Sized>(
    oracle: &O,
    params: &CycleDesignParameters,
    critical_temperature: Option<ThermodynamicTemperature>,
) -> Result<CycleStates, SolveError> {
    params.enablement.check(&params.duties)?;

    let fluid = params.fluid;
    let lookup = Lookup { oracle, fluid };
    let pressure = params.evaporating_pressure;
    let m_dot = params.mass_flow.into_inner();

    let PumpSide {
        condenser_outlet,
        pump_outlet,
    } = pump_side(
        oracle,
        fluid,
        params.condensing_temperature,
        pressure,
        params.pump_efficiency.into_inner(),
    )?;

    let evaporator_outlet = lookup.saturated_at(pressure, 1.0)?;
    let t_sat = evaporator_outlet.temperature;
    let t_crit = match critical_temperature {
        Some(temperature) => temperature,
        None => lookup.critical_temperature()?,
    };
    check_evaporation_temperature(t_sat, params.condensing_temperature, t_crit)?;

    let (preheater_outlet, preheater) =
        preheat(&lookup, &pump_outlet, t_sat, m_dot, params.duties.preheater)?;

    let requested_superheat = params.duties.superheater.max(Power::ZERO);
    let boost = preheater.actual + requested_superheat;
    let (turbine_inlet, clamped) = turbine_inlet(
        oracle,
        fluid,
        &evaporator_outlet,
        params.turbine_inlet_temperature,
        t_crit,
        (boost > Power::ZERO).then(|| boost / m_dot),
    )?;

    if !turbine_inlet.phase.is_expandable() {
        return Err(PhysicalConstraintViolation::TurbineInletPhase {
            phase: turbine_inlet.phase,
            temperature: turbine_inlet.temperature,
        }
        .into());
    }

    let collapsed = boost > Power::ZERO && turbine_inlet == evaporator_outlet;
    let superheater = EnhancementDuty {
        requested: params.duties.superheater,
        actual: (m_dot * (turbine_inlet.enthalpy - evaporator_outlet.enthalpy)).max(Power::ZERO),
        constraint_active: requested_superheat > Power::ZERO && (clamped || collapsed),
    };
    if clamped || collapsed {
        debug!(
            ?fluid,
            boost = ?boost,
            turbine_inlet = ?turbine_inlet.temperature,
            "turbine-inlet temperature limited"
        );
    }

    let h3b = turbine_inlet.enthalpy;
    let condensing_pressure = condenser_outlet.pressure;
    let h4s = lookup.ps(condensing_pressure, turbine_inlet.entropy)?.enthalpy;
    let eta_turbine = params.turbine_efficiency.into_inner();
    let turbine_outlet = lookup.ph(condensing_pressure, h3b - (h3b - h4s) * eta_turbine)?;

    let points = [
        StatePoint::at(CyclePosition::CondenserOutlet, &condenser_outlet),
        StatePoint::at(CyclePosition::PumpOutlet, &pump_outlet),
        StatePoint::at(CyclePosition::PreheaterOutlet, &preheater_outlet),
        StatePoint::at(CyclePosition::EvaporatorOutlet, &evaporator_outlet),
        StatePoint::at(CyclePosition::TurbineInlet, &turbine_inlet),
        StatePoint::at(CyclePosition::TurbineOutlet, &turbine_outlet),
    ];

    Ok(CycleStates {
        points,
        preheater,
        superheater,
        evaporation_temperature: t_sat,
        critical_temperature: t_crit,
        turbine_inlet_capped: clamped,
    })
}

/// Checks `T_cond + 1 K < T_sat < T_crit`.
pub(super) fn check_evaporation_temperature(
    saturation: ThermodynamicTemperature,
    condensing: ThermodynamicTemperature,
    critical: ThermodynamicTemperature,
) -> Result<(), PhysicalConstraintViolation> {
    let minimum = condensing + delta(MIN_LIFT_K);
    if saturation > minimum && saturation < critical {
        Ok(())
    } else {
        Err(PhysicalConstraintViolation::EvaporationTemperature {
            saturation,
            minimum,
            maximum: critical,
        })
    }
}

/// Applies the preheater duty to the pump outlet, capped at `T_sat − 5 K`.
fn preheat<O: PropertyOracle + ?Sized>(
    lookup: &Lookup<'_, O>,
    pump_outlet: &FluidPoint,
    t_sat: ThermodynamicTemperature,
    m_dot: MassRate,
    requested: Power,
) -> Result<(FluidPoint, EnhancementDuty), PropertyLookupError> {
    if requested <= Power::ZERO {
        return Ok((*pump_outlet, EnhancementDuty::pass_through(requested)));
    }

    let ceiling = lookup.tp(t_sat - delta(PREHEATER_MARGIN_K), pump_outlet.pressure)?;
    let h2 = pump_outlet.enthalpy;

    if h2 >= ceiling.enthalpy {
        debug!(?requested, "pump outlet already at the preheater ceiling");
        return Ok((
            *pump_outlet,
            EnhancementDuty {
                requested,
                actual: Power::ZERO,
                constraint_active: true,
            },
        ));
    }

    let target = h2 + requested / m_dot;
    if target > ceiling.enthalpy {
        let actual = m_dot * (ceiling.enthalpy - h2);
        debug!(?requested, ?actual, "preheater duty clamped");
        return Ok((
            ceiling,
            EnhancementDuty {
                requested,
                actual,
                constraint_active: true,
            },
        ));
    }

    let outlet = lookup.ph(pump_outlet.pressure, target)?;
    Ok((
        outlet,
        EnhancementDuty {
            requested,
            actual: requested,
            constraint_active: false,
        },
    ))
}

fn delta(kelvin: f64) -> TemperatureInterval {
    TemperatureInterval::new::<delta_kelvin>(kelvin)
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use proptest::prelude::*;
    use uom::si::{
        power::{kilowatt, watt},
        pressure::bar,
        thermodynamic_temperature::kelvin,
    };

    use crate::models::power::orc::core::{
        ComponentEnablement, DutyRequests,
        test_support::{oracle, scenario_a, subcritical_design},
    };

    #[test]
    fn scenario_a_states_are_ordered_around_the_cycle() {
        let states = solve_states(&oracle(), &scenario_a(), None).unwrap();

        let t = |position| states.get(position).temperature.get::<kelvin>();
        assert_relative_eq!(t(CyclePosition::CondenserOutlet), 308.15, epsilon = 1e-6);
        assert_relative_eq!(t(CyclePosition::PumpOutlet), 308.907, epsilon = 1e-2);
        assert_relative_eq!(t(CyclePosition::EvaporatorOutlet), 380.9345, epsilon = 1e-2);

        // 450 K exceeds T_crit − 10 K, so the design temperature is capped.
        assert_relative_eq!(
            t(CyclePosition::TurbineInlet),
            states.critical_temperature.get::<kelvin>() - 10.0,
            epsilon = 1e-9
        );
        assert!(states.turbine_inlet_capped);
        assert!(!states.superheater.constraint_active);

        let labels: Vec<_> = states.iter().map(|point| point.position.label()).collect();
        assert_eq!(labels, ["1", "2", "2b", "3", "3b", "4"]);
    }

    #[test]
    fn turbine_inlet_is_always_expandable() {
        for design in [scenario_a(), subcritical_design()] {
            let states = solve_states(&oracle(), &design, None).unwrap();
            let phase = states.get(CyclePosition::TurbineInlet).phase.unwrap();
            assert!(phase.is_expandable(), "{phase:?}");
        }
    }

    #[test]
    fn zero_preheater_request_is_a_pass_through() {
        let design = subcritical_design()
            .with_duties(DutyRequests::default().with_preheater(Power::new::<watt>(-1.0)));
        let states = solve_states(&oracle(), &design, None).unwrap();

        assert_eq!(
            states.get(CyclePosition::PumpOutlet).enthalpy,
            states.get(CyclePosition::PreheaterOutlet).enthalpy
        );
        assert_eq!(states.preheater.actual, Power::ZERO);
        assert!(!states.preheater.constraint_active);
    }

    #[test]
    fn moderate_preheater_request_is_fully_absorbed() {
        let design = subcritical_design()
            .with_duties(DutyRequests::default().with_preheater(Power::new::<kilowatt>(50.0)));
        let states = solve_states(&oracle(), &design, None).unwrap();

        assert_relative_eq!(states.preheater.actual.get::<kilowatt>(), 50.0);
        assert!(!states.preheater.constraint_active);
        assert_relative_eq!(
            states.get(CyclePosition::PreheaterOutlet).temperature.get::<kelvin>(),
            316.40,
            epsilon = 0.05
        );
    }

    #[test]
    fn oversized_preheater_request_clamps_at_the_ceiling() {
        let requested = Power::new::<kilowatt>(5000.0);
        let design =
            subcritical_design().with_duties(DutyRequests::default().with_preheater(requested));
        let states = solve_states(&oracle(), &design, None).unwrap();

        let ceiling = states.evaporation_temperature.get::<kelvin>() - 5.0;
        assert_relative_eq!(
            states.get(CyclePosition::PreheaterOutlet).temperature.get::<kelvin>(),
            ceiling,
            epsilon = 1e-9
        );
        assert!(states.preheater.actual < requested);
        assert!(states.preheater.constraint_active);
        assert_relative_eq!(states.preheater.actual.get::<watt>(), 492_835.6, max_relative = 1e-3);
    }

    #[test]
    fn oversized_superheater_request_clamps_below_critical() {
        let requested = Power::new::<kilowatt>(5000.0);
        let design =
            subcritical_design().with_duties(DutyRequests::default().with_superheater(requested));
        let states = solve_states(&oracle(), &design, None).unwrap();

        assert_relative_eq!(
            states.get(CyclePosition::TurbineInlet).temperature.get::<kelvin>(),
            states.critical_temperature.get::<kelvin>() - 10.0,
            epsilon = 1e-9
        );
        assert!(states.superheater.actual < requested);
        assert!(states.superheater.constraint_active);
        assert!(states.turbine_inlet_capped);
    }

    #[test]
    fn known_critical_temperature_is_used_as_given() {
        let lowered = ThermodynamicTemperature::new::<kelvin>(420.0);
        let states = solve_states(&oracle(), &subcritical_design(), Some(lowered)).unwrap();

        assert_eq!(states.critical_temperature, lowered);
        assert!(!states.turbine_inlet_capped);

        let states = solve_states(&oracle(), &scenario_a(), Some(lowered)).unwrap();
        assert_relative_eq!(
            states.get(CyclePosition::TurbineInlet).temperature.get::<kelvin>(),
            410.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn tiny_boost_collapses_to_saturated_vapor() {
        let design = subcritical_design()
            .with_duties(DutyRequests::default().with_superheater(Power::new::<watt>(1.0)));
        let states = solve_states(&oracle(), &design, None).unwrap();

        assert_eq!(
            states.get(CyclePosition::TurbineInlet),
            &StatePoint {
                position: CyclePosition::TurbineInlet,
                ..*states.get(CyclePosition::EvaporatorOutlet)
            }
        );
        assert_eq!(states.superheater.actual, Power::ZERO);
        assert!(states.superheater.constraint_active);
    }

    #[test]
    fn evaporation_below_condensing_is_rejected() {
        let mut design = subcritical_design();
        design.condensing_temperature = ThermodynamicTemperature::new::<kelvin>(380.5);

        let error = solve_states(&oracle(), &design, None).unwrap_err();
        assert!(matches!(
            error,
            SolveError::Physical(PhysicalConstraintViolation::EvaporationTemperature { .. })
        ));
    }

    #[test]
    fn evaporation_bounds_are_strict() {
        let k = ThermodynamicTemperature::new::<kelvin>;
        assert!(check_evaporation_temperature(k(310.0), k(305.0), k(427.0)).is_ok());
        assert!(check_evaporation_temperature(k(306.0), k(305.0), k(427.0)).is_err());
        assert!(check_evaporation_temperature(k(427.0), k(305.0), k(427.0)).is_err());
    }

    #[test]
    fn disabled_preheater_with_request_is_rejected_before_lookups() {
        let design = subcritical_design()
            .with_enablement(ComponentEnablement::NONE)
            .with_duties(DutyRequests::default().with_preheater(Power::new::<kilowatt>(1.0)));

        let error = solve_states(&oracle(), &design, None).unwrap_err();
        assert!(matches!(error, SolveError::Configuration(_)));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        #[test]
        fn turbine_inlet_is_expandable_for_any_valid_design(
            pressure in 4.0..18.0_f64,
            design_inlet in 330.0..460.0_f64,
            preheater in 0.0..400.0_f64,
            superheater in 0.0..400.0_f64,
        ) {
            let design = CycleDesignParameters {
                evaporating_pressure: Pressure::new::<bar>(pressure),
                turbine_inlet_temperature: ThermodynamicTemperature::new::<kelvin>(design_inlet),
                ..scenario_a()
            }
            .with_duties(
                DutyRequests::default()
                    .with_preheater(Power::new::<kilowatt>(preheater))
                    .with_superheater(Power::new::<kilowatt>(superheater)),
            );

            let states = solve_states(&oracle(), &design, None).unwrap();
            let inlet = states.get(CyclePosition::TurbineInlet);
            let phase = inlet.phase.unwrap();

            prop_assert!(phase.is_expandable(), "{phase:?}");
            prop_assert!(inlet.temperature >= states.evaporation_temperature);
            prop_assert!(
                inlet.temperature.get::<kelvin>()
                    <= states.critical_temperature.get::<kelvin>() - 10.0 + 1e-9
            );
            if states.superheater.constraint_active {
                prop_assert!(superheater > 0.0);
            }
        }
    }
}
