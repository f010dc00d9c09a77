//! Energy and exergy balances for each cycle component.

use std::fmt;

use uom::si::{
    f64::{MassRate, Power, Ratio, TemperatureInterval, ThermodynamicTemperature},
    power::watt,
    ratio::ratio,
};

use crate::support::{
    hx::{StreamTemperatures, lmtd},
    thermo::{DeadState, ExergyReference, PropertyOracle},
    units::{SpecificExergy, TemperatureDifference},
};

use super::{
    CycleDesignParameters, CyclePosition, CycleStates, PhysicalConstraintViolation, SolveError,
};

/// A component of the cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ComponentKind {
    Pump,
    Preheater,
    Evaporator,
    Superheater,
    Turbine,
    Condenser,
}

impl ComponentKind {
    /// All components in flow order, starting at the pump.
    pub const ALL: [Self; 6] = [
        Self::Pump,
        Self::Preheater,
        Self::Evaporator,
        Self::Superheater,
        Self::Turbine,
        Self::Condenser,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Pump => "pump",
            Self::Preheater => "preheater",
            Self::Evaporator => "evaporator",
            Self::Superheater => "superheater",
            Self::Turbine => "turbine",
            Self::Condenser => "condenser",
        }
    }

    pub(super) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How a heat exchanger's driving temperatures were obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Basis {
    /// From the external stream's inlet and outlet temperatures.
    ExternalStreams,
    /// No external stream data: the temperature difference is the working
    /// fluid's terminal difference and the surface temperature is the
    /// arithmetic mean of its terminals.
    WorkingFluidApproximation,
}

/// Heat-exchange figures for the evaporator and condenser.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeatExchange {
    /// `(1 − T₀/T_surface)·Q`, signed like the duty.
    pub heat_exergy: Power,
    pub lmtd: TemperatureInterval,
    pub surface_temperature: ThermodynamicTemperature,
    pub basis: Basis,
}

/// Energy and exergy figures for one component.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComponentResult {
    pub kind: ComponentKind,

    /// Heat into the working fluid, or shaft work magnitude for the pump and turbine.
    ///
    /// The condenser duty is negative.
    pub duty: Power,

    pub exergy_destruction: Power,

    /// Exergetic efficiency; `None` where undefined (zero duty, condenser).
    pub efficiency: Option<Ratio>,

    /// Set when a temperature ceiling limited the absorbed duty.
    pub constraint_active: bool,

    /// Present for the evaporator and condenser.
    pub heat_exchange: Option<HeatExchange>,
}

/// Results for all six components, addressable by [`ComponentKind`].
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentResults([ComponentResult; 6]);

impl ComponentResults {
    #[must_use]
    pub fn get(&self, kind: ComponentKind) -> &ComponentResult {
        &self.0[kind.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &ComponentResult> {
        self.0.iter()
    }
}

/// Computes every component balance from solved states.
///
/// # Errors
///
/// Returns [`SolveError::Property`] if the dead-state lookup fails and
/// [`SolveError::Physical`] if an exchanger's temperature profiles cross.
pub(super) fn balance<O: PropertyOracle + ?Sized>(
    oracle: &O,
    params: &CycleDesignParameters,
    states: &CycleStates,
) -> Result<ComponentResults, SolveError> {
    let reference = params.dead_state.reference(oracle, params.fluid)?;
    let flow = Flow {
        m_dot: params.mass_flow.into_inner(),
        states,
        reference,
        dead_state: params.dead_state,
    };

    use CyclePosition::{
        CondenserOutlet as S1, EvaporatorOutlet as S3, PreheaterOutlet as S2b, PumpOutlet as S2,
        TurbineInlet as S3b, TurbineOutlet as S4,
    };

    let pump = {
        let work = flow.enthalpy_rate(S1, S2);
        let reversible = flow.exergy_rate(S1, S2);
        flow.result(ComponentKind::Pump, work, work - reversible, ratio_of(reversible, work))
    };

    let preheater = flow
        .enhancement(ComponentKind::Preheater, S2, S2b, states.preheater.actual)
        .with_constraint(states.preheater.constraint_active);

    let evaporator = {
        let q = flow.enthalpy_rate(S2b, S3);
        let working = flow.stream(S2b, S3);
        let exchange = exchange(
            ComponentKind::Evaporator,
            params.heating_stream,
            working,
            Side::Cold,
            q,
            &flow.dead_state,
        )?;
        let gained = flow.exergy_rate(S2b, S3);
        ComponentResult {
            heat_exchange: Some(exchange),
            ..flow.result(
                ComponentKind::Evaporator,
                q,
                exchange.heat_exergy - gained,
                ratio_of(gained, exchange.heat_exergy),
            )
        }
    };

    let superheater = flow
        .enhancement(ComponentKind::Superheater, S3, S3b, states.superheater.actual)
        .with_constraint(states.superheater.constraint_active);

    let turbine = {
        let work = flow.enthalpy_rate(S4, S3b);
        let available = flow.exergy_rate(S4, S3b);
        flow.result(ComponentKind::Turbine, work, available - work, ratio_of(work, available))
    };

    let condenser = {
        let q = flow.enthalpy_rate(S4, S1);
        let working = flow.stream(S4, S1);
        let exchange = exchange(
            ComponentKind::Condenser,
            params.cooling_stream,
            working,
            Side::Hot,
            q,
            &flow.dead_state,
        )?;
        let released = flow.exergy_rate(S1, S4);
        ComponentResult {
            heat_exchange: Some(exchange),
            ..flow.result(ComponentKind::Condenser, q, released + exchange.heat_exergy, None)
        }
    };

    Ok(ComponentResults([
        pump,
        preheater,
        evaporator,
        superheater,
        turbine,
        condenser,
    ]))
}

/// The working-fluid flow through the solved states.
struct Flow<'a> {
    m_dot: MassRate,
    states: &'a CycleStates,
    reference: ExergyReference,
    dead_state: DeadState,
}

impl Flow<'_> {
    fn specific_exergy(&self, position: CyclePosition) -> SpecificExergy {
        let point = self.states.get(position);
        self.reference.specific_exergy(point.enthalpy, point.entropy)
    }

    /// `ṁ·(h_to − h_from)`.
    fn enthalpy_rate(&self, from: CyclePosition, to: CyclePosition) -> Power {
        self.m_dot * (self.states.get(to).enthalpy - self.states.get(from).enthalpy)
    }

    /// `ṁ·(ψ_to − ψ_from)`.
    fn exergy_rate(&self, from: CyclePosition, to: CyclePosition) -> Power {
        self.m_dot * (self.specific_exergy(to) - self.specific_exergy(from))
    }

    fn stream(&self, inlet: CyclePosition, outlet: CyclePosition) -> StreamTemperatures {
        StreamTemperatures::new(
            self.states.get(inlet).temperature,
            self.states.get(outlet).temperature,
        )
    }

    fn result(
        &self,
        kind: ComponentKind,
        duty: Power,
        exergy_destruction: Power,
        efficiency: Option<Ratio>,
    ) -> ComponentResult {
        ComponentResult {
            kind,
            duty,
            exergy_destruction,
            efficiency,
            constraint_active: false,
            heat_exchange: None,
        }
    }

    /// Preheater or superheater: heat `q` raises the fluid from `from` to `to`.
    fn enhancement(
        &self,
        kind: ComponentKind,
        from: CyclePosition,
        to: CyclePosition,
        q: Power,
    ) -> ComponentResult {
        let gained = self.exergy_rate(from, to);
        self.result(kind, q, q - gained, ratio_of(gained, q))
    }
}

impl ComponentResult {
    fn with_constraint(mut self, constraint_active: bool) -> Self {
        self.constraint_active = constraint_active;
        self
    }
}

/// Which side of the exchanger the working fluid is on.
#[derive(Debug, Clone, Copy)]
enum Side {
    Hot,
    Cold,
}

fn exchange(
    component: ComponentKind,
    external: Option<StreamTemperatures>,
    working: StreamTemperatures,
    side: Side,
    q: Power,
    dead_state: &DeadState,
) -> Result<HeatExchange, PhysicalConstraintViolation> {
    let (lmtd, surface_temperature, basis) = match external {
        Some(external) => {
            let (hot, cold) = match side {
                Side::Hot => (working, external),
                Side::Cold => (external, working),
            };
            let lmtd = lmtd(hot, cold)
                .map_err(|source| PhysicalConstraintViolation::TemperatureCross { component, source })?;
            (lmtd, external.log_mean(), Basis::ExternalStreams)
        }
        None => {
            let difference = match side {
                Side::Hot => working.inlet.minus(working.outlet),
                Side::Cold => working.outlet.minus(working.inlet),
            };
            (
                difference,
                working.arithmetic_mean(),
                Basis::WorkingFluidApproximation,
            )
        }
    };

    Ok(HeatExchange {
        heat_exergy: dead_state.heat_exergy(q, surface_temperature),
        lmtd,
        surface_temperature,
        basis,
    })
}

/// `numerator / denominator`, or `None` if the denominator is zero.
pub(super) fn ratio_of(numerator: Power, denominator: Power) -> Option<Ratio> {
    let denominator = denominator.get::<watt>();
    if denominator == 0.0 || !denominator.is_finite() {
        return None;
    }
    Some(Ratio::new::<ratio>(numerator.get::<watt>() / denominator))
}
