//! Organic Rankine cycle models.
//!
//! Two [`twine_core::Model`] adapters share one computational core:
//!
//! - [`OrcCycle`] solves a cycle from explicit [`CycleDesignParameters`].
//! - [`HeatSourceMatcher`] sizes a cycle to a [`HeatSourceInput`] stream.
//!
//! Both borrow a [`PropertyOracle`]. Any oracle works; the
//! [`Builtin`](crate::support::thermo::model::Builtin) model needs no external
//! library.
//!
//! # Example
//!
//! ```
//! use orc_models::{
//!     models::power::orc::{CycleDesignParameters, Efficiency, OrcCycle},
//!     support::{
//!         constraint::StrictlyPositive,
//!         thermo::{Fluid, model::Builtin},
//!     },
//! };
//! use twine_core::Model;
//! use uom::si::{
//!     f64::{MassRate, Pressure, ThermodynamicTemperature},
//!     mass_rate::kilogram_per_second,
//!     pressure::bar,
//!     thermodynamic_temperature::kelvin,
//! };
//!
//! let oracle = Builtin::default();
//! let cycle = OrcCycle::new(&oracle);
//!
//! let design = CycleDesignParameters::new(
//!     Fluid::R245fa,
//!     Pressure::new::<bar>(15.0),
//!     ThermodynamicTemperature::new::<kelvin>(400.0),
//!     ThermodynamicTemperature::new::<kelvin>(308.15),
//!     Efficiency::new(0.75).unwrap(),
//!     Efficiency::new(0.80).unwrap(),
//!     StrictlyPositive::new(MassRate::new::<kilogram_per_second>(5.0)).unwrap(),
//! );
//!
//! let solution = cycle.call(&design).unwrap();
//! assert!(solution.kpi.thermal_efficiency.is_some());
//! ```

mod core;

pub use self::core::{
    Basis, ComponentEnablement, ComponentKind, ComponentResult, ComponentResults,
    ConfigurationMismatch, ConvergenceFailure, CriticalTemperatureCache, CycleDesignParameters,
    CycleKpi, CyclePosition, CycleSolution, CycleStates, DutyRequests, Efficiency,
    EnhancementDuty, ExergyDestruction, HeatExchange, HeatSourceInput, HeatSourceProfile,
    PerformanceResult, PhysicalConstraintViolation, SolveError, SourceFlow, StatePoint,
    TemperatureMargins, match_to_heat_source, solve_cycle, sweep, try_match,
};

use twine_core::Model;

use crate::support::thermo::PropertyOracle;

/// Solves an ORC from explicit design parameters.
#[derive(Debug)]
pub struct OrcCycle<'a, O: ?Sized> {
    oracle: &'a O,
}

impl<'a, O: PropertyOracle + ?Sized> OrcCycle<'a, O> {
    #[must_use]
    pub fn new(oracle: &'a O) -> Self {
        Self { oracle }
    }
}

impl<O: PropertyOracle + ?Sized> Model for OrcCycle<'_, O> {
    type Input = CycleDesignParameters;
    type Output = CycleSolution;
    type Error = SolveError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        solve_cycle(self.oracle, input)
    }
}

/// Sizes an ORC to a heat-source stream.
///
/// Owns a [`CriticalTemperatureCache`] shared by every call on this matcher,
/// including the parallel [`sweep`](Self::sweep).
#[derive(Debug)]
pub struct HeatSourceMatcher<'a, O: ?Sized> {
    oracle: &'a O,
    cache: CriticalTemperatureCache,
}

impl<'a, O: PropertyOracle + ?Sized> HeatSourceMatcher<'a, O> {
    #[must_use]
    pub fn new(oracle: &'a O) -> Self {
        Self {
            oracle,
            cache: CriticalTemperatureCache::new(),
        }
    }

    /// Returns the match, or `None` if the input admits no feasible cycle.
    #[must_use]
    pub fn match_input(&self, input: &HeatSourceInput) -> Option<PerformanceResult> {
        match_to_heat_source(self.oracle, &self.cache, input)
    }

    /// Matches a batch in parallel, one entry per input in input order.
    #[must_use]
    pub fn sweep(&self, inputs: &[HeatSourceInput]) -> Vec<Option<PerformanceResult>> {
        sweep(self.oracle, &self.cache, inputs)
    }

    #[must_use]
    pub fn cache(&self) -> &CriticalTemperatureCache {
        &self.cache
    }
}

impl<O: PropertyOracle + ?Sized> Model for HeatSourceMatcher<'_, O> {
    type Input = HeatSourceInput;
    type Output = PerformanceResult;
    type Error = SolveError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        try_match(self.oracle, &self.cache, input)
    }
}
