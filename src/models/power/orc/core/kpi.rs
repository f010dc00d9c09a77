use uom::{
    ConstZero,
    si::f64::{Power, Ratio},
};

use super::{ComponentKind, ComponentResults, balance::ratio_of};

/// Exergy destroyed in each component.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExergyDestruction([Power; 6]);

impl ExergyDestruction {
    #[must_use]
    pub fn get(&self, kind: ComponentKind) -> Power {
        self.0[kind.index()]
    }

    /// Sum over all components.
    #[must_use]
    pub fn total(&self) -> Power {
        self.0.iter().fold(Power::ZERO, |total, &part| total + part)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ComponentKind, Power)> + '_ {
        ComponentKind::ALL.into_iter().map(|kind| (kind, self.get(kind)))
    }
}

/// Cycle-level performance indicators.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CycleKpi {
    /// `W_turbine − W_pump`.
    pub net_power: Power,

    /// Evaporator plus the absorbed preheater and superheater duties.
    pub heat_input: Power,

    /// Condenser duty magnitude.
    pub heat_rejected: Power,

    /// `W_net / Q_in`, undefined when no heat is supplied.
    pub thermal_efficiency: Option<Ratio>,

    /// `W_net / E_heat,evaporator`, undefined when the evaporator heat carries
    /// no exergy.
    pub exergy_efficiency: Option<Ratio>,

    pub exergy_destruction: ExergyDestruction,
}

/// Reduces component results to cycle KPIs.
pub(super) fn aggregate(components: &ComponentResults) -> CycleKpi {
    let duty = |kind| components.get(kind).duty;

    let net_power = duty(ComponentKind::Turbine) - duty(ComponentKind::Pump);
    let heat_input = duty(ComponentKind::Evaporator)
        + duty(ComponentKind::Preheater)
        + duty(ComponentKind::Superheater);
    let evaporator_heat_exergy = components
        .get(ComponentKind::Evaporator)
        .heat_exchange
        .map_or(Power::ZERO, |exchange| exchange.heat_exergy);

    CycleKpi {
        net_power,
        heat_input,
        heat_rejected: duty(ComponentKind::Condenser).abs(),
        thermal_efficiency: ratio_of(net_power, heat_input),
        exergy_efficiency: ratio_of(net_power, evaporator_heat_exergy),
        exergy_destruction: ExergyDestruction(
            ComponentKind::ALL.map(|kind| components.get(kind).exergy_destruction),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{power::watt, ratio::ratio};

    use crate::models::power::orc::core::{
        CycleDesignParameters,
        balance::balance,
        states::solve_states,
        test_support::{oracle, scenario_a, stream},
    };

    fn kpi(params: &CycleDesignParameters) -> CycleKpi {
        let oracle = oracle();
        let states = solve_states(&oracle, params, None).unwrap();
        aggregate(&balance(&oracle, params, &states).unwrap())
    }

    #[test]
    fn scenario_a_baseline() {
        let kpi = kpi(&scenario_a());

        assert_relative_eq!(kpi.net_power.get::<watt>(), 163_849.25, max_relative = 1e-3);
        assert_relative_eq!(kpi.heat_input.get::<watt>(), 1_386_637.6, max_relative = 1e-3);
        assert_relative_eq!(
            kpi.thermal_efficiency.unwrap().get::<ratio>(),
            0.118163,
            max_relative = 1e-3
        );
        assert_relative_eq!(
            kpi.heat_rejected.get::<watt>(),
            (kpi.heat_input - kpi.net_power).get::<watt>(),
            max_relative = 1e-9
        );
    }

    #[test]
    fn exergy_efficiency_uses_heating_stream() {
        let kpi = kpi(&scenario_a().with_heating_stream(stream(473.15, 413.15)));
        assert_relative_eq!(
            kpi.exergy_efficiency.unwrap().get::<ratio>(),
            0.42676,
            max_relative = 1e-3
        );
    }

    #[test]
    fn destruction_total_is_the_sum_of_parts() {
        let kpi = kpi(&scenario_a());
        let parts: f64 = kpi
            .exergy_destruction
            .iter()
            .map(|(_, destroyed)| destroyed.get::<watt>())
            .sum();
        assert_relative_eq!(kpi.exergy_destruction.total().get::<watt>(), parts);
        assert_eq!(kpi.exergy_destruction.get(ComponentKind::Preheater), Power::ZERO);
    }
}
