//! Core ORC cycle solver and heat-source matcher.
//!
//! Data flows one way: the [`PropertyOracle`](crate::support::thermo::PropertyOracle)
//! feeds the state solver, whose states feed the component balances, which
//! reduce to cycle KPIs. The matcher derives cycle inputs from a heat-source
//! stream and drives the same pipeline.

mod balance;
mod error;
mod kpi;
mod matcher;
mod params;
mod solve;
mod states;
mod sweep;

#[cfg(test)]
mod test_support;

pub use balance::{Basis, ComponentKind, ComponentResult, ComponentResults, HeatExchange};
pub use error::{ConfigurationMismatch, ConvergenceFailure, PhysicalConstraintViolation, SolveError};
pub use kpi::{CycleKpi, ExergyDestruction};
pub use matcher::{
    CriticalTemperatureCache, HeatSourceInput, HeatSourceProfile, PerformanceResult, SourceFlow,
    TemperatureMargins, match_to_heat_source, try_match,
};
pub use params::{ComponentEnablement, CycleDesignParameters, DutyRequests, Efficiency};
pub use solve::{CycleSolution, solve_cycle};
pub use states::{CyclePosition, CycleStates, EnhancementDuty, StatePoint};
pub use sweep::sweep;
