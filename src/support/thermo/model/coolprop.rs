//! CoolProp-backed fluid property model.

mod error;

use std::{
    collections::HashMap,
    sync::{Mutex, MutexGuard},
};

use rfluids::{
    io::{FluidInputPair, FluidParam, FluidTrivialParam},
    native::AbstractState,
};
use uom::si::{
    available_energy::joule_per_kilogram,
    f64::{MassDensity, Pressure, Ratio, SpecificHeatCapacity, ThermodynamicTemperature},
    mass_density::kilogram_per_cubic_meter,
    pressure::pascal,
    ratio::ratio,
    specific_heat_capacity::joule_per_kilogram_kelvin,
    thermodynamic_temperature::kelvin,
};

use crate::support::{
    thermo::{CriticalPoint, Fluid, FluidPoint, InputPair, Phase, PropertyError, PropertyOracle},
    units::{SpecificEnthalpy, SpecificEntropy},
};

pub use error::CoolPropError;

const BACKEND: &str = "HEOS";

/// A property oracle backed by `CoolProp`'s Helmholtz-energy equations of state.
///
/// One `AbstractState` is created per fluid up front. Each is guarded by its
/// own mutex so that an update and the reads that follow it stay atomic.
#[cfg_attr(docsrs, doc(cfg(feature = "coolprop")))]
pub struct CoolProp {
    states: HashMap<Fluid, Mutex<AbstractState>>,
}

impl CoolProp {
    /// Creates an oracle for every [`Fluid`].
    ///
    /// # Errors
    ///
    /// Returns [`CoolPropError`] if an `AbstractState` cannot be created.
    pub fn new() -> Result<Self, CoolPropError> {
        Self::with_fluids(&Fluid::ALL)
    }

    /// Creates an oracle restricted to `fluids`.
    ///
    /// # Errors
    ///
    /// Returns [`CoolPropError`] if an `AbstractState` cannot be created.
    pub fn with_fluids(fluids: &[Fluid]) -> Result<Self, CoolPropError> {
        let states = fluids
            .iter()
            .map(|&fluid| -> Result<_, CoolPropError> {
                let state = AbstractState::new(BACKEND, fluid.name())?;
                Ok((fluid, Mutex::new(state)))
            })
            .collect::<Result<HashMap<_, _>, _>>()?;
        Ok(Self { states })
    }

    fn lock(&self, fluid: Fluid) -> Result<MutexGuard<'_, AbstractState>, CoolPropError> {
        let state = self
            .states
            .get(&fluid)
            .ok_or(CoolPropError::UnknownFluid(fluid))?;
        Ok(state.lock()?)
    }
}

/// Maps an input pair onto `CoolProp`'s ordering and units.
fn coolprop_inputs(inputs: InputPair) -> Result<(FluidInputPair, f64, f64), PropertyError> {
    let converted = match inputs {
        InputPair::TemperaturePressure(t, p) => {
            (FluidInputPair::PT, p.get::<pascal>(), t.get::<kelvin>())
        }
        InputPair::TemperatureQuality(t, q) => {
            (FluidInputPair::QT, q.get::<ratio>(), t.get::<kelvin>())
        }
        InputPair::PressureQuality(p, q) => {
            (FluidInputPair::PQ, p.get::<pascal>(), q.get::<ratio>())
        }
        InputPair::PressureEnthalpy(p, h) => (
            FluidInputPair::HMassP,
            h.get::<joule_per_kilogram>(),
            p.get::<pascal>(),
        ),
        InputPair::PressureEntropy(p, s) => (
            FluidInputPair::PSMass,
            p.get::<pascal>(),
            s.get::<joule_per_kilogram_kelvin>(),
        ),
        InputPair::EnthalpyEntropy(h, s) => (
            FluidInputPair::HMassSMass,
            h.get::<joule_per_kilogram>(),
            s.get::<joule_per_kilogram_kelvin>(),
        ),
        other => {
            return Err(PropertyError::Unsupported {
                context: format!("CoolProp input pair {other:?}"),
            });
        }
    };
    Ok(converted)
}

impl PropertyOracle for CoolProp {
    fn point(&self, fluid: Fluid, inputs: InputPair) -> Result<FluidPoint, PropertyError> {
        let (pair, first, second) = coolprop_inputs(inputs)?;
        let mut state = self.lock(fluid)?;
        state.update(pair, first, second).map_err(CoolPropError::Rfluids)?;

        let output = |param: FluidParam| state.keyed_output(param).map_err(CoolPropError::Rfluids);
        let t = output(FluidParam::T)?;
        let p = output(FluidParam::P)?;
        let density = output(FluidParam::DMass)?;
        let h = output(FluidParam::HMass)?;
        let s = output(FluidParam::SMass)?;
        let q = output(FluidParam::Q)?;
        let t_crit = state
            .keyed_output(FluidTrivialParam::TCritical)
            .map_err(CoolPropError::Rfluids)?;
        let p_crit = state
            .keyed_output(FluidTrivialParam::PCritical)
            .map_err(CoolPropError::Rfluids)?;

        let phase = if q <= 0.0 && q > -f64::EPSILON {
            Phase::Liquid
        } else if (q - 1.0).abs() < f64::EPSILON {
            Phase::Vapor
        } else if q > 0.0 && q < 1.0 {
            Phase::TwoPhase
        } else if t >= t_crit {
            if p >= p_crit { Phase::Supercritical } else { Phase::Vapor }
        } else if p >= p_crit {
            Phase::Liquid
        } else {
            state
                .update(FluidInputPair::PQ, p, 0.0)
                .map_err(CoolPropError::Rfluids)?;
            let t_sat = state
                .keyed_output(FluidParam::T)
                .map_err(CoolPropError::Rfluids)?;
            if t > t_sat { Phase::Vapor } else { Phase::Liquid }
        };

        let cp = if phase == Phase::TwoPhase {
            None
        } else {
            state
                .update(FluidInputPair::PT, p, t)
                .ok()
                .and_then(|()| state.keyed_output(FluidParam::CpMass).ok())
                .map(SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>)
        };

        Ok(FluidPoint {
            temperature: ThermodynamicTemperature::new::<kelvin>(t),
            pressure: Pressure::new::<pascal>(p),
            density: MassDensity::new::<kilogram_per_cubic_meter>(density),
            enthalpy: SpecificEnthalpy::new::<joule_per_kilogram>(h),
            entropy: SpecificEntropy::new::<joule_per_kilogram_kelvin>(s),
            cp,
            quality: (0.0..=1.0)
                .contains(&q)
                .then(|| Ratio::new::<ratio>(q)),
            phase,
        })
    }

    fn critical_point(&self, fluid: Fluid) -> Result<CriticalPoint, PropertyError> {
        let state = self.lock(fluid)?;
        let t = state
            .keyed_output(FluidTrivialParam::TCritical)
            .map_err(CoolPropError::Rfluids)?;
        let p = state
            .keyed_output(FluidTrivialParam::PCritical)
            .map_err(CoolPropError::Rfluids)?;
        Ok(CriticalPoint {
            temperature: ThermodynamicTemperature::new::<kelvin>(t),
            pressure: Pressure::new::<pascal>(p),
        })
    }
}

// Thread-safety is provided by rfluids, which serializes all CoolProp FFI calls
// through a global mutex. Our local mutexes keep update/query call pairs atomic.
#[allow(dead_code)]
const _: () = {
    fn assert_send_sync<T: Send + Sync>() {}
    fn check() {
        assert_send_sync::<CoolProp>();
    }
};
