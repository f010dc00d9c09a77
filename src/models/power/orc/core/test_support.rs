use uom::si::{
    f64::{MassRate, Pressure, ThermodynamicTemperature, VolumeRate},
    mass_rate::kilogram_per_second,
    pressure::bar,
    thermodynamic_temperature::kelvin,
    volume_rate::cubic_meter_per_second,
};

use crate::support::{
    constraint::{Constrained, StrictlyPositive},
    hx::StreamTemperatures,
    thermo::{Fluid, model::Builtin},
};

use super::{CycleDesignParameters, Efficiency, HeatSourceInput, SourceFlow};

pub(super) fn oracle() -> Builtin {
    Builtin::default()
}

pub(super) fn efficiency(value: f64) -> Efficiency {
    Efficiency::new(value).unwrap()
}

pub(super) fn kelvin_temp(value: f64) -> ThermodynamicTemperature {
    ThermodynamicTemperature::new::<kelvin>(value)
}

pub(super) fn stream(t_in: f64, t_out: f64) -> StreamTemperatures {
    StreamTemperatures::new(kelvin_temp(t_in), kelvin_temp(t_out))
}

/// R245fa at 15 bar with a 450 K turbine-inlet target and 5 kg/s.
pub(super) fn scenario_a() -> CycleDesignParameters {
    CycleDesignParameters::new(
        Fluid::R245fa,
        Pressure::new::<bar>(15.0),
        kelvin_temp(450.0),
        kelvin_temp(308.15),
        efficiency(0.75),
        efficiency(0.80),
        Constrained::<MassRate, StrictlyPositive>::new(MassRate::new::<kilogram_per_second>(5.0))
            .unwrap(),
    )
}

/// Scenario A with a 400 K turbine inlet, below the critical cap.
pub(super) fn subcritical_design() -> CycleDesignParameters {
    CycleDesignParameters {
        turbine_inlet_temperature: kelvin_temp(400.0),
        ..scenario_a()
    }
}

/// Water at `t_in` kelvin and 0.01 m³/s against a 305.15 K condenser.
pub(super) fn heat_source(t_in: f64) -> HeatSourceInput {
    HeatSourceInput::new(
        kelvin_temp(t_in),
        SourceFlow::Volumetric(VolumeRate::new::<cubic_meter_per_second>(0.01)),
        kelvin_temp(305.15),
        efficiency(0.75),
        efficiency(0.80),
    )
}
