//! Sizing an ORC to a single-phase heat-source stream.

use std::{
    collections::HashMap,
    sync::{PoisonError, RwLock},
};

use tracing::{debug, trace};
use uom::{
    ConstZero,
    si::{
        f64::{
            MassDensity, MassRate, Power, Pressure, Ratio, SpecificHeatCapacity,
            TemperatureInterval, ThermodynamicTemperature, VolumeRate,
        },
        mass_density::kilogram_per_cubic_meter,
        pressure::pascal,
        ratio::ratio,
        specific_heat_capacity::joule_per_kilogram_kelvin,
        temperature_interval::kelvin as delta_kelvin,
    },
};

use crate::support::{
    constraint::{Constrained, ConstraintResult, NonNegative, StrictlyPositive},
    hx::StreamTemperatures,
    thermo::{DeadState, Fluid, Input, Property, PropertyLookupError, PropertyOracle},
    units::{SpecificEnthalpy, TemperatureDifference},
};

use super::{
    ComponentEnablement, ComponentKind, ConvergenceFailure, CycleDesignParameters, CycleKpi,
    CyclePosition, CycleSolution, DutyRequests, Efficiency, HeatExchange,
    PhysicalConstraintViolation, SolveError,
    solve::solve_with_critical_temperature,
    states::{PumpSide, check_evaporation_temperature, pump_side, turbine_inlet},
};

/// Slack allowed when re-checking the pinch after the full solve.
const PINCH_TOLERANCE_K: f64 = 1e-6;

/// How the heat-source flow rate is specified.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SourceFlow {
    /// Converted with the source density at inlet conditions.
    Volumetric(VolumeRate),
    Mass(MassRate),
}

/// Superheat and pinch temperature offsets, both non-negative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemperatureMargins {
    superheat: TemperatureInterval,
    pinch: TemperatureInterval,
}

impl Default for TemperatureMargins {
    /// 10 K superheat and a 10 K pinch.
    fn default() -> Self {
        Self {
            superheat: TemperatureInterval::new::<delta_kelvin>(10.0),
            pinch: TemperatureInterval::new::<delta_kelvin>(10.0),
        }
    }
}

impl TemperatureMargins {
    /// Constructs validated margins.
    ///
    /// # Errors
    ///
    /// Returns an error if either margin is negative or not a number.
    pub fn new(
        superheat: TemperatureInterval,
        pinch: TemperatureInterval,
    ) -> ConstraintResult<Self> {
        let superheat = NonNegative::new(superheat)?;
        let pinch = NonNegative::new(pinch)?;
        Ok(Self::from_constrained(superheat, pinch))
    }

    #[must_use]
    pub fn from_constrained(
        superheat: Constrained<TemperatureInterval, NonNegative>,
        pinch: Constrained<TemperatureInterval, NonNegative>,
    ) -> Self {
        Self {
            superheat: superheat.into_inner(),
            pinch: pinch.into_inner(),
        }
    }

    /// Turbine-inlet temperature above the evaporation temperature.
    #[must_use]
    pub fn superheat(&self) -> TemperatureInterval {
        self.superheat
    }

    /// Minimum heat-source approach to the evaporation temperature.
    #[must_use]
    pub fn pinch(&self) -> TemperatureInterval {
        self.pinch
    }
}

/// Inputs to [`try_match`] and [`match_to_heat_source`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeatSourceInput {
    pub inlet_temperature: ThermodynamicTemperature,
    pub flow: SourceFlow,
    pub condensing_temperature: ThermodynamicTemperature,
    pub pump_efficiency: Efficiency,
    pub turbine_efficiency: Efficiency,
    pub working_fluid: Fluid,
    pub source_fluid: Fluid,
    pub margins: TemperatureMargins,
    /// Pressure at which the source density and specific heat are evaluated.
    pub source_pressure: Pressure,
    pub dead_state: DeadState,
    pub duties: DutyRequests,
    pub enablement: ComponentEnablement,
}

impl HeatSourceInput {
    /// Creates an input for an R245fa cycle heated by liquid water at
    /// atmospheric pressure, with default margins, dead state and enablement
    /// and no enhancement duty.
    #[must_use]
    pub fn new(
        inlet_temperature: ThermodynamicTemperature,
        flow: SourceFlow,
        condensing_temperature: ThermodynamicTemperature,
        pump_efficiency: Efficiency,
        turbine_efficiency: Efficiency,
    ) -> Self {
        Self {
            inlet_temperature,
            flow,
            condensing_temperature,
            pump_efficiency,
            turbine_efficiency,
            working_fluid: Fluid::R245fa,
            source_fluid: Fluid::Water,
            margins: TemperatureMargins::default(),
            source_pressure: Pressure::new::<pascal>(101_325.0),
            dead_state: DeadState::default(),
            duties: DutyRequests::default(),
            enablement: ComponentEnablement::default(),
        }
    }

    #[must_use]
    pub fn with_working_fluid(mut self, fluid: Fluid) -> Self {
        self.working_fluid = fluid;
        self
    }

    #[must_use]
    pub fn with_source_fluid(mut self, fluid: Fluid) -> Self {
        self.source_fluid = fluid;
        self
    }

    #[must_use]
    pub fn with_margins(mut self, margins: TemperatureMargins) -> Self {
        self.margins = margins;
        self
    }

    #[must_use]
    pub fn with_source_pressure(mut self, pressure: Pressure) -> Self {
        self.source_pressure = pressure;
        self
    }

    #[must_use]
    pub fn with_dead_state(mut self, dead_state: DeadState) -> Self {
        self.dead_state = dead_state;
        self
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
}

/// Heat-source quantities derived by the matcher.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeatSourceProfile {
    pub fluid: Fluid,
    pub mass_flow: MassRate,
    pub specific_heat: SpecificHeatCapacity,
    pub inlet_temperature: ThermodynamicTemperature,
    /// Pinch-constrained outlet: evaporation temperature plus the pinch.
    pub outlet_temperature: ThermodynamicTemperature,
    pub pressure: Pressure,
    /// `ṁ·cp·(T_in − T_out)`.
    pub heat_available: Power,
}

impl HeatSourceProfile {
    #[must_use]
    pub fn temperatures(&self) -> StreamTemperatures {
        StreamTemperatures::new(self.inlet_temperature, self.outlet_temperature)
    }
}

/// A cycle matched to a heat source.
#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceResult {
    pub solution: CycleSolution,
    pub working_fluid_mass_flow: MassRate,
    pub source: HeatSourceProfile,
    pub evaporating_pressure: Pressure,
    pub evaporating_temperature: ThermodynamicTemperature,
    pub turbine_inlet_temperature: ThermodynamicTemperature,
    pub enablement: ComponentEnablement,
    pub duties: DutyRequests,
}

impl PerformanceResult {
    #[must_use]
    pub fn kpi(&self) -> &CycleKpi {
        &self.solution.kpi
    }

    #[must_use]
    pub fn net_power(&self) -> Power {
        self.solution.kpi.net_power
    }

    #[must_use]
    pub fn total_exergy_destruction(&self) -> Power {
        self.solution.kpi.exergy_destruction.total()
    }

    /// Evaporator LMTD against the heat-source stream.
    #[must_use]
    pub fn evaporator_lmtd(&self) -> Option<TemperatureInterval> {
        self.evaporator_exchange().map(|exchange| exchange.lmtd)
    }

    /// Exergy of the heat the evaporator receives from the source.
    #[must_use]
    pub fn evaporator_heat_exergy(&self) -> Power {
        self.evaporator_exchange()
            .map_or(Power::ZERO, |exchange| exchange.heat_exergy)
    }

    fn evaporator_exchange(&self) -> Option<HeatExchange> {
        self.solution
            .components
            .get(ComponentKind::Evaporator)
            .heat_exchange
    }
}

/// Per-fluid critical temperatures, filled lazily and shared across calls.
///
/// The cache is keyed by fluid only, so share one instance per oracle.
/// Hits take the read lock; a miss asks the oracle and then takes the write
/// lock to store the result.
#[derive(Debug, Default)]
pub struct CriticalTemperatureCache {
    temperatures: RwLock<HashMap<Fluid, ThermodynamicTemperature>>,
}

impl CriticalTemperatureCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached critical temperature of `fluid`, if any.
    #[must_use]
    pub fn cached(&self, fluid: Fluid) -> Option<ThermodynamicTemperature> {
        self.temperatures
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&fluid)
            .copied()
    }

    /// Returns the critical temperature of `fluid`, asking `oracle` on a miss.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyLookupError::CriticalPoint`] if the oracle fails.
    /// Failures are not cached.
    pub fn get_or_fetch<O: PropertyOracle + ?Sized>(
        &self,
        oracle: &O,
        fluid: Fluid,
    ) -> Result<ThermodynamicTemperature, PropertyLookupError> {
        if let Some(temperature) = self.cached(fluid) {
            return Ok(temperature);
        }

        let temperature = oracle
            .critical_point(fluid)
            .map_err(|source| PropertyLookupError::CriticalPoint { fluid, source })?
            .temperature;

        trace!(%fluid, ?temperature, "caching critical temperature");
        self.temperatures
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(fluid, temperature);

        Ok(temperature)
    }
}

/// Matches a cycle to the heat source described by `input`.
///
/// The evaporation temperature is `T_in − pinch − superheat`, the source
/// leaves at `T_sat + pinch` and the working-fluid flow absorbs all of the
/// heat released between those temperatures.
///
/// # Errors
///
/// Returns the first failure: a [`SolveError::Configuration`] for duty
/// requests on disabled components, a [`SolveError::Physical`] if the
/// evaporation temperature or pinch is infeasible, a
/// [`SolveError::Convergence`] if no heat or enthalpy rise is available, or a
/// [`SolveError::Property`] if a lookup fails.
pub fn try_match<O: PropertyOracle + ?Sized>(
    oracle: &O,
    cache: &CriticalTemperatureCache,
    input: &HeatSourceInput,
) -> Result<PerformanceResult, SolveError> {
    input.enablement.check(&input.duties)?;

    let fluid = input.working_fluid;
    let superheat = input.margins.superheat();
    let pinch = input.margins.pinch();

    let t_crit = cache.get_or_fetch(oracle, fluid)?;
    let t_sat = input.inlet_temperature - pinch - superheat;
    check_evaporation_temperature(t_sat, input.condensing_temperature, t_crit)?;

    let saturated_vapor = oracle.state(
        fluid,
        &[
            Input::Temperature(t_sat),
            Input::Quality(Ratio::new::<ratio>(1.0)),
        ],
    )?;
    let p_evap = saturated_vapor.pressure;

    let source = source_profile(oracle, input, t_sat + pinch)?;
    if source.heat_available <= Power::ZERO {
        return Err(ConvergenceFailure::NoHeatAvailable {
            heat: source.heat_available,
        }
        .into());
    }

    let PumpSide { pump_outlet, .. } = pump_side(
        oracle,
        fluid,
        input.condensing_temperature,
        p_evap,
        input.pump_efficiency.into_inner(),
    )?;
    let (unboosted_inlet, _) = turbine_inlet(
        oracle,
        fluid,
        &saturated_vapor,
        t_sat + superheat,
        t_crit,
        None,
    )?;

    let rise = unboosted_inlet.enthalpy - pump_outlet.enthalpy;
    if rise <= SpecificEnthalpy::ZERO {
        return Err(ConvergenceFailure::NonPositiveEnthalpyRise { rise }.into());
    }

    let mass_flow = source.heat_available / rise;
    let constrained_flow = StrictlyPositive::new(mass_flow)
        .map_err(|_| ConvergenceFailure::NonPositiveMassFlow { mass_flow })?;

    let params = CycleDesignParameters::new(
        fluid,
        p_evap,
        t_sat + superheat,
        input.condensing_temperature,
        input.pump_efficiency,
        input.turbine_efficiency,
        constrained_flow,
    )
    .with_dead_state(input.dead_state)
    .with_duties(input.duties)
    .with_enablement(input.enablement)
    .with_heating_stream(source.temperatures());

    let solution = solve_with_critical_temperature(oracle, &params, Some(t_crit))?;

    let evaporating_temperature = solution.states.evaporation_temperature;
    let minimum = evaporating_temperature + pinch;
    if source.outlet_temperature.minus(minimum).get::<delta_kelvin>() < -PINCH_TOLERANCE_K {
        return Err(PhysicalConstraintViolation::PinchViolated {
            source_outlet: source.outlet_temperature,
            minimum,
        }
        .into());
    }

    let turbine_inlet_temperature = solution.states.get(CyclePosition::TurbineInlet).temperature;
    Ok(PerformanceResult {
        solution,
        working_fluid_mass_flow: mass_flow,
        source,
        evaporating_pressure: p_evap,
        evaporating_temperature,
        turbine_inlet_temperature,
        enablement: input.enablement,
        duties: input.duties,
    })
}

/// Matches a cycle to a heat source, or returns `None` if no feasible match
/// exists at this input.
///
/// The failure reason is logged at debug level.
pub fn match_to_heat_source<O: PropertyOracle + ?Sized>(
    oracle: &O,
    cache: &CriticalTemperatureCache,
    input: &HeatSourceInput,
) -> Option<PerformanceResult> {
    match try_match(oracle, cache, input) {
        Ok(result) => Some(result),
        Err(error) => {
            debug!(
                inlet_temperature = ?input.inlet_temperature,
                condensing_temperature = ?input.condensing_temperature,
                %error,
                "no feasible heat-source match"
            );
            None
        }
    }
}

fn source_profile<O: PropertyOracle + ?Sized>(
    oracle: &O,
    input: &HeatSourceInput,
    outlet_temperature: ThermodynamicTemperature,
) -> Result<HeatSourceProfile, PropertyLookupError> {
    let fluid = input.source_fluid;
    let inlet = [
        Input::Temperature(input.inlet_temperature),
        Input::Pressure(input.source_pressure),
    ];

    let specific_heat = SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(oracle.lookup(
        Property::Cp,
        fluid,
        &inlet,
    )?);
    let mass_flow = match input.flow {
        SourceFlow::Mass(mass_flow) => mass_flow,
        SourceFlow::Volumetric(volume_flow) => {
            let density = MassDensity::new::<kilogram_per_cubic_meter>(oracle.lookup(
                Property::Density,
                fluid,
                &inlet,
            )?);
            density * volume_flow
        }
    };

    let heat_available =
        mass_flow * specific_heat * input.inlet_temperature.minus(outlet_temperature);

    Ok(HeatSourceProfile {
        fluid,
        mass_flow,
        specific_heat,
        inlet_temperature: input.inlet_temperature,
        outlet_temperature,
        pressure: input.source_pressure,
        heat_available,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{
        available_energy::kilojoule_per_kilogram, mass_rate::kilogram_per_second, power::watt,
        pressure::bar, thermodynamic_temperature::kelvin,
    };

    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::{
        models::power::orc::core::test_support::{heat_source, kelvin_temp, oracle},
        support::thermo::{CriticalPoint, FluidPoint, InputPair, PropertyError, model::Builtin},
    };

    fn matched(t_in: f64) -> PerformanceResult {
        try_match(&oracle(), &CriticalTemperatureCache::new(), &heat_source(t_in)).unwrap()
    }

    #[test]
    fn warm_source_baseline() {
        let result = matched(333.15);

        assert_relative_eq!(result.net_power().get::<watt>(), 8_172.6, max_relative = 1e-3);
        assert_relative_eq!(
            result.working_fluid_mass_flow.get::<kilogram_per_second>(),
            2.0567,
            max_relative = 1e-3
        );
        assert_relative_eq!(result.evaporating_pressure.get::<bar>(), 2.500, max_relative = 1e-3);
        assert_relative_eq!(
            result.source.heat_available.get::<watt>(),
            417_164.5,
            max_relative = 1e-6
        );
        assert_relative_eq!(result.evaporating_temperature.get::<kelvin>(), 313.15, epsilon = 1e-6);
        assert_relative_eq!(result.turbine_inlet_temperature.get::<kelvin>(), 323.15, epsilon = 1e-6);
    }

    #[test]
    fn hot_source_baseline() {
        let result = matched(373.15);

        assert_relative_eq!(result.net_power().get::<watt>(), 38_230.7, max_relative = 1e-3);
        assert_relative_eq!(
            result.kpi().thermal_efficiency.unwrap().get::<ratio>(),
            0.091644,
            max_relative = 1e-3
        );
        assert_relative_eq!(
            result.working_fluid_mass_flow.get::<kilogram_per_second>(),
            1.78919,
            max_relative = 1e-3
        );
        assert_relative_eq!(result.evaporating_pressure.get::<bar>(), 7.8638, max_relative = 1e-3);
    }

    #[test]
    fn all_available_heat_is_absorbed() {
        let result = matched(373.15);
        assert_relative_eq!(
            result.kpi().heat_input.get::<watt>(),
            result.source.heat_available.get::<watt>(),
            max_relative = 1e-6
        );
    }

    #[test]
    fn evaporator_figures_use_the_source_stream() {
        let result = matched(373.15);

        // Counterflow: hot end 373.15 − 353.15 K, cold end 363.15 K − T₂.
        let lmtd = result.evaporator_lmtd().unwrap().get::<delta_kelvin>();
        assert!(lmtd > 10.0 && lmtd < 60.0, "{lmtd}");
        assert!(result.evaporator_heat_exergy() > Power::ZERO);
        assert!(result.evaporator_heat_exergy() < result.source.heat_available);
        assert!(result.total_exergy_destruction() > Power::ZERO);
    }

    #[test]
    fn pinch_is_respected_on_success() {
        for t_in in [333.15, 350.0, 373.15, 390.0] {
            let input = heat_source(t_in);
            let result = matched(t_in);
            let minimum = result.evaporating_temperature + input.margins.pinch();
            assert!(
                result.source.outlet_temperature.minus(minimum).get::<delta_kelvin>()
                    >= -PINCH_TOLERANCE_K
            );
        }
    }

    #[test]
    fn low_lift_source_is_infeasible() {
        let oracle = oracle();
        let cache = CriticalTemperatureCache::new();

        // 325 − 10 − 10 = 305 K is not above 305.15 + 1 K.
        let input = heat_source(325.0);
        assert!(match_to_heat_source(&oracle, &cache, &input).is_none());
        assert!(matches!(
            try_match(&oracle, &cache, &input),
            Err(SolveError::Physical(
                PhysicalConstraintViolation::EvaporationTemperature { .. }
            ))
        ));

        // The same source matches against a colder condenser.
        let input = HeatSourceInput {
            condensing_temperature: kelvin_temp(295.0),
            ..input
        };
        assert!(match_to_heat_source(&oracle, &cache, &input).is_some());
    }

    #[test]
    fn warm_source_becomes_infeasible_with_a_warmer_condenser() {
        // 333.15 − 10 − 10 = 313.15 K is not above 312.5 + 1 K.
        let input = HeatSourceInput {
            condensing_temperature: kelvin_temp(312.5),
            ..heat_source(333.15)
        };
        assert!(match_to_heat_source(&oracle(), &CriticalTemperatureCache::new(), &input).is_none());
    }

    #[test]
    fn zero_superheat_leaves_no_heat() {
        let pinch = TemperatureInterval::new::<delta_kelvin>(10.0);
        let margins = TemperatureMargins::new(TemperatureInterval::ZERO, pinch).unwrap();
        let input = heat_source(373.15).with_margins(margins);

        let error = try_match(&oracle(), &CriticalTemperatureCache::new(), &input).unwrap_err();
        assert!(matches!(
            error,
            SolveError::Convergence(ConvergenceFailure::NoHeatAvailable { .. })
        ));
    }

    #[test]
    fn negative_margins_are_rejected() {
        let negative = TemperatureInterval::new::<delta_kelvin>(-1.0);
        let ten = TemperatureInterval::new::<delta_kelvin>(10.0);
        assert!(TemperatureMargins::new(negative, ten).is_err());
        assert!(TemperatureMargins::new(ten, negative).is_err());
    }

    #[test]
    fn oversized_preheater_request_clamps_to_the_deliverable_maximum() {
        let oracle = oracle();
        let base = matched(373.15);

        let margin = TemperatureInterval::new::<delta_kelvin>(5.0);
        let ceiling = oracle
            .state(
                Fluid::R245fa,
                &[
                    Input::Temperature(base.evaporating_temperature - margin),
                    Input::Pressure(base.evaporating_pressure),
                ],
            )
            .unwrap();
        let pump_outlet = base.solution.states.get(CyclePosition::PumpOutlet).enthalpy;
        let maximum = base.working_fluid_mass_flow * (ceiling.enthalpy - pump_outlet);
        assert_relative_eq!(maximum.get::<watt>(), 106_588.28, max_relative = 1e-3);

        let input = heat_source(373.15)
            .with_duties(DutyRequests::default().with_preheater(maximum * 10.0));
        let result = try_match(&oracle, &CriticalTemperatureCache::new(), &input).unwrap();

        let preheater = result.solution.components.get(ComponentKind::Preheater);
        assert_relative_eq!(
            preheater.duty.get::<watt>(),
            maximum.get::<watt>(),
            max_relative = 1e-9
        );
        assert!(preheater.constraint_active);
        assert!(result.solution.states.preheater.actual < maximum * 10.0);
    }

    #[test]
    fn disabled_preheater_request_is_a_configuration_error() {
        let input = heat_source(373.15)
            .with_enablement(ComponentEnablement::NONE)
            .with_duties(DutyRequests::default().with_preheater(Power::new::<watt>(1.0e3)));

        let error = try_match(&oracle(), &CriticalTemperatureCache::new(), &input).unwrap_err();
        assert!(matches!(error, SolveError::Configuration(_)));
    }

    #[test]
    fn mass_flow_mode_matches_the_equivalent_volumetric_flow() {
        let oracle = oracle();
        let cache = CriticalTemperatureCache::new();
        let volumetric = try_match(&oracle, &cache, &heat_source(350.0)).unwrap();

        let input = HeatSourceInput {
            flow: SourceFlow::Mass(volumetric.source.mass_flow),
            ..heat_source(350.0)
        };
        let by_mass = try_match(&oracle, &cache, &input).unwrap();

        assert_relative_eq!(
            by_mass.net_power().get::<watt>(),
            volumetric.net_power().get::<watt>(),
            max_relative = 1e-12
        );
    }

    /// Counts critical-point requests and delegates everything else.
    struct CountingOracle {
        inner: Builtin,
        critical_calls: AtomicUsize,
    }

    impl PropertyOracle for CountingOracle {
        fn point(&self, fluid: Fluid, inputs: InputPair) -> Result<FluidPoint, PropertyError> {
            self.inner.point(fluid, inputs)
        }

        fn critical_point(&self, fluid: Fluid) -> Result<CriticalPoint, PropertyError> {
            self.critical_calls.fetch_add(1, Ordering::Relaxed);
            self.inner.critical_point(fluid)
        }
    }

    #[test]
    fn cache_fetches_each_fluid_once() {
        let oracle = CountingOracle {
            inner: oracle(),
            critical_calls: AtomicUsize::new(0),
        };
        let cache = CriticalTemperatureCache::new();
        assert!(cache.cached(Fluid::R245fa).is_none());

        let first = cache.get_or_fetch(&oracle, Fluid::R245fa).unwrap();
        let second = cache.get_or_fetch(&oracle, Fluid::R245fa).unwrap();

        assert_eq!(first, second);
        assert_eq!(cache.cached(Fluid::R245fa), Some(first));
        assert_relative_eq!(first.get::<kelvin>(), 427.01, epsilon = 1e-6);
        assert_eq!(oracle.critical_calls.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn repeated_matches_reuse_the_cached_critical_temperature() {
        let oracle = CountingOracle {
            inner: oracle(),
            critical_calls: AtomicUsize::new(0),
        };
        let cache = CriticalTemperatureCache::new();

        for _ in 0..3 {
            try_match(&oracle, &cache, &heat_source(373.15)).unwrap();
        }
        assert_eq!(oracle.critical_calls.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn design_cap_without_superheater_request_is_not_a_superheater_constraint() {
        // 437 − 20 = 417 K, so the 427 K design inlet exceeds T_crit − 10 K.
        let result = matched(437.0);
        let states = &result.solution.states;

        assert!(states.turbine_inlet_capped);
        assert_relative_eq!(
            result.turbine_inlet_temperature.get::<kelvin>(),
            states.critical_temperature.get::<kelvin>() - 10.0,
            epsilon = 1e-9
        );
        assert_eq!(states.superheater.requested, Power::ZERO);
        assert!(!states.superheater.constraint_active);
        assert!(
            !result
                .solution
                .components
                .get(ComponentKind::Superheater)
                .constraint_active
        );
    }

    /// Delegates to the builtin model, then skews one kind of result.
    enum Skew {
        /// Adds 1000 kJ/kg to working-fluid (P, h) states.
        PressureEnthalpy,
        /// Adds 1 K to working-fluid (P, Q) states.
        SaturationTemperature,
        /// Reports an undefined `cp` for the source stream as NaN.
        SourceHeatCapacity,
    }

    struct SkewedOracle {
        inner: Builtin,
        skew: Skew,
    }

    impl PropertyOracle for SkewedOracle {
        fn point(&self, fluid: Fluid, inputs: InputPair) -> Result<FluidPoint, PropertyError> {
            let mut point = self.inner.point(fluid, inputs)?;
            match (&self.skew, inputs) {
                (Skew::PressureEnthalpy, InputPair::PressureEnthalpy(..))
                    if fluid == Fluid::R245fa =>
                {
                    point.enthalpy += SpecificEnthalpy::new::<kilojoule_per_kilogram>(1000.0);
                }
                (Skew::SaturationTemperature, InputPair::PressureQuality(..))
                    if fluid == Fluid::R245fa =>
                {
                    point.temperature += TemperatureInterval::new::<delta_kelvin>(1.0);
                }
                (Skew::SourceHeatCapacity, _) if fluid == Fluid::Water => {
                    point.cp = Some(SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(
                        f64::NAN,
                    ));
                }
                _ => {}
            }
            Ok(point)
        }

        fn critical_point(&self, fluid: Fluid) -> Result<CriticalPoint, PropertyError> {
            self.inner.critical_point(fluid)
        }
    }

    fn try_skewed(skew: Skew) -> Result<PerformanceResult, SolveError> {
        let oracle = SkewedOracle {
            inner: oracle(),
            skew,
        };
        try_match(&oracle, &CriticalTemperatureCache::new(), &heat_source(373.15))
    }

    #[test]
    fn pump_outlet_above_turbine_inlet_is_rejected() {
        let error = try_skewed(Skew::PressureEnthalpy).unwrap_err();
        assert!(
            matches!(
                error,
                SolveError::Convergence(ConvergenceFailure::NonPositiveEnthalpyRise { rise })
                    if rise < SpecificEnthalpy::ZERO
            ),
            "{error:?}"
        );
    }

    #[test]
    fn undefined_source_heat_leaves_no_valid_mass_flow() {
        let error = try_skewed(Skew::SourceHeatCapacity).unwrap_err();
        assert!(
            matches!(
                error,
                SolveError::Convergence(ConvergenceFailure::NonPositiveMassFlow { mass_flow })
                    if mass_flow.is_nan()
            ),
            "{error:?}"
        );
    }

    #[test]
    fn solved_saturation_above_the_estimate_violates_the_pinch() {
        let error = try_skewed(Skew::SaturationTemperature).unwrap_err();
        let SolveError::Physical(PhysicalConstraintViolation::PinchViolated {
            source_outlet,
            minimum,
        }) = &error
        else {
            panic!("expected a pinch violation, got {error:?}");
        };
        assert_relative_eq!(source_outlet.get::<kelvin>(), 363.15, epsilon = 1e-9);
        assert_relative_eq!(minimum.get::<kelvin>(), 364.15, epsilon = 1e-3);
    }
}
