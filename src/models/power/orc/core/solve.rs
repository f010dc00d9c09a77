use uom::si::f64::ThermodynamicTemperature;

use crate::support::thermo::PropertyOracle;

use super::{
    ComponentResults, CycleDesignParameters, CycleKpi, CycleStates, SolveError, balance::balance,
    kpi::aggregate, states::solve_states,
};

/// States, component balances and KPIs of one solved cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct CycleSolution {
    pub states: CycleStates,
    pub components: ComponentResults,
    pub kpi: CycleKpi,
}

/// Solves the cycle defined by `params`.
///
/// # Errors
///
/// Returns a [`SolveError`] if the configuration is inconsistent, a property
/// lookup fails, or the design violates a physical constraint. Enhancement
/// clamping is not an error; it is reported on the states and components.
pub fn solve_cycle<O: PropertyOracle + ?Sized>(
    oracle: &O,
    params: &CycleDesignParameters,
) -> Result<CycleSolution, SolveError> {
    solve_with_critical_temperature(oracle, params, None)
}

/// Solves the cycle, reusing `critical_temperature` when the caller already
/// knows it.
pub(super) fn solve_with_critical_temperature<O: PropertyOracle + ?Sized>(
    oracle: &O,
    params: &CycleDesignParameters,
    critical_temperature: Option<ThermodynamicTemperature>,
) -> Result<CycleSolution, SolveError> {
    let states = solve_states(oracle, params, critical_temperature)?;
    let components = balance(oracle, params, &states)?;
    let kpi = aggregate(&components);

    Ok(CycleSolution {
        states,
        components,
        kpi,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use proptest::prelude::*;
    use uom::si::{
        f64::{Power, ThermodynamicTemperature},
        power::{kilowatt, watt},
        ratio::ratio,
        thermodynamic_temperature::kelvin,
    };

    use crate::models::power::orc::core::{
        ComponentKind, CyclePosition, DutyRequests,
        test_support::{efficiency, oracle, scenario_a, subcritical_design},
    };

    #[test]
    fn scenario_a_regression() {
        let solution = solve_cycle(&oracle(), &scenario_a()).unwrap();

        assert_relative_eq!(
            solution.kpi.net_power.get::<watt>(),
            163_849.25,
            max_relative = 1e-3
        );
        assert_relative_eq!(
            solution.kpi.thermal_efficiency.unwrap().get::<ratio>(),
            0.118163,
            max_relative = 1e-3
        );
    }

    #[test]
    fn higher_turbine_efficiency_baseline() {
        let mut design = subcritical_design();
        design.turbine_efficiency = efficiency(0.9);

        let solution = solve_cycle(&oracle(), &design).unwrap();
        assert_relative_eq!(
            solution.kpi.net_power.get::<watt>(),
            173_022.8,
            max_relative = 1e-3
        );
    }

    #[test]
    fn preheater_duty_flows_into_turbine_inlet() {
        let design = subcritical_design()
            .with_duties(DutyRequests::default().with_preheater(Power::new::<kilowatt>(50.0)));
        let solution = solve_cycle(&oracle(), &design).unwrap();

        assert_relative_eq!(
            solution.kpi.net_power.get::<watt>(),
            146_085.9,
            max_relative = 1e-3
        );
        assert!(
            solution.states.get(CyclePosition::TurbineInlet).temperature
                > solution.states.get(CyclePosition::EvaporatorOutlet).temperature
        );
        assert_eq!(
            solution.components.get(ComponentKind::Preheater).duty,
            Power::new::<kilowatt>(50.0)
        );
    }

    #[test]
    fn property_failures_propagate() {
        let mut design = subcritical_design();
        design.condensing_temperature = ThermodynamicTemperature::new::<kelvin>(100.0);

        let error = solve_cycle(&oracle(), &design).unwrap_err();
        assert!(matches!(error, SolveError::Property(_)));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(12))]

        #[test]
        fn net_power_grows_with_turbine_efficiency(low in 0.5..0.9_f64, step in 0.01..0.1_f64) {
            let oracle = oracle();
            let mut design = subcritical_design();

            design.turbine_efficiency = efficiency(low);
            let before = solve_cycle(&oracle, &design).unwrap().kpi.net_power;
            design.turbine_efficiency = efficiency(low + step);
            let after = solve_cycle(&oracle, &design).unwrap().kpi.net_power;

            prop_assert!(after >= before, "{before:?} > {after:?}");
        }

        #[test]
        fn net_power_grows_with_pump_efficiency(low in 0.4..0.85_f64, step in 0.01..0.15_f64) {
            let oracle = oracle();
            let mut design = subcritical_design();

            design.pump_efficiency = efficiency(low);
            let before = solve_cycle(&oracle, &design).unwrap().kpi.net_power;
            design.pump_efficiency = efficiency(low + step);
            let after = solve_cycle(&oracle, &design).unwrap().kpi.net_power;

            prop_assert!(after >= before, "{before:?} > {after:?}");
        }
    }
}
