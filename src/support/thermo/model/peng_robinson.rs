//! Peng–Robinson cubic equation of state for organic working fluids.
//!
//! A self-contained real-fluid model adequate for cycle screening:
//!
//! - Residual properties from the Peng–Robinson equation with the standard
//!   `α(T)` function of the acentric factor
//! - Ideal-gas heat capacity `cp⁰(T) = c₀ + c₁·T + c₂·T²`
//! - Reference state `h = 0`, `s = 0` for the ideal gas at 273.15 K and 1 atm
//! - Saturation from equal liquid and vapor fugacities
//!
//! Supported inputs are (T, P), (T, Q), (P, Q), (P, h) and (P, s).
//! Temperatures are limited to `[0.4·Tc, 2·Tc]`.
//!
//! Absolute enthalpy and entropy differ from `CoolProp`'s reference state; only
//! differences are meaningful when comparing the two.

mod config;
mod cubic;
mod inversion;
mod saturation;

pub use config::InversionConfig;

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
    thermo::{Fluid, FluidPoint, InputPair, Phase, PropertyError},
    units::{SpecificEnthalpy, SpecificEntropy},
};

use cubic::{Cubic, Sample};
use saturation::Saturation;

/// Peng–Robinson property model of one organic fluid.
#[derive(Debug, Clone, Copy)]
pub struct PengRobinson {
    fluid: Fluid,
    eos: Cubic,
    config: InversionConfig,
}

/// Property held fixed along an isobar during inversion.
#[derive(Debug, Clone, Copy)]
enum Isobaric {
    Enthalpy(f64),
    Entropy(f64),
}

impl Isobaric {
    fn target(self) -> f64 {
        match self {
            Isobaric::Enthalpy(h) => h,
            Isobaric::Entropy(s) => s,
        }
    }

    fn of(self, sample: &Sample) -> f64 {
        match self {
            Isobaric::Enthalpy(_) => sample.enthalpy,
            Isobaric::Entropy(_) => sample.entropy,
        }
    }
}

impl PengRobinson {
    /// Creates a model for `fluid`.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError::Unsupported`] if `fluid` has no cubic constants.
    pub fn new(fluid: Fluid, config: InversionConfig) -> Result<Self, PropertyError> {
        let constants = fluid.organic().ok_or_else(|| PropertyError::Unsupported {
            context: format!("no Peng-Robinson constants for {fluid}"),
        })?;

        Ok(Self {
            fluid,
            eos: Cubic::new(constants),
            config,
        })
    }

    /// Returns the modeled fluid.
    #[must_use]
    pub fn fluid(&self) -> Fluid {
        self.fluid
    }

    /// Resolves the state fixed by `inputs`.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError::Unsupported`] for input pairs other than
    /// (T, P), (T, Q), (P, Q), (P, h) and (P, s), and other [`PropertyError`]s
    /// for states outside the model's domain.
    pub fn point(&self, inputs: InputPair) -> Result<FluidPoint, PropertyError> {
        match inputs {
            InputPair::TemperaturePressure(t, p) => {
                self.single_phase(t.get::<kelvin>(), p.get::<pascal>())
            }
            InputPair::TemperatureQuality(t, q) => {
                let q = check_quality(q)?;
                let sat = saturation::at_temperature(&self.eos, t.get::<kelvin>(), &self.config)?;
                Ok(two_phase(&sat, q, sat.liquid.pressure))
            }
            InputPair::PressureQuality(p, q) => {
                let q = check_quality(q)?;
                let p = p.get::<pascal>();
                let t = self.saturation_temperature_raw(p)?;
                let sat = saturation::at_temperature(&self.eos, t, &self.config)?;
                Ok(two_phase(&sat, q, p))
            }
            InputPair::PressureEnthalpy(p, h) => self.along_isobar(
                p.get::<pascal>(),
                Isobaric::Enthalpy(h.get::<joule_per_kilogram>()),
            ),
            InputPair::PressureEntropy(p, s) => self.along_isobar(
                p.get::<pascal>(),
                Isobaric::Entropy(s.get::<joule_per_kilogram_kelvin>()),
            ),
            other => Err(PropertyError::Unsupported {
                context: format!("Peng-Robinson model does not accept {other:?}"),
            }),
        }
    }

    /// Returns the saturation pressure at temperature `t`.
    ///
    /// # Errors
    ///
    /// Fails above the critical temperature, outside the temperature domain,
    /// or if the fugacity iteration does not converge.
    pub fn saturation_pressure(
        &self,
        t: ThermodynamicTemperature,
    ) -> Result<Pressure, PropertyError> {
        saturation::pressure(&self.eos, t.get::<kelvin>(), &self.config)
            .map(Pressure::new::<pascal>)
    }

    /// Returns the saturation temperature at pressure `p`.
    ///
    /// # Errors
    ///
    /// Fails at or above the critical pressure, or below the saturation
    /// pressure at the lowest modeled temperature.
    pub fn saturation_temperature(
        &self,
        p: Pressure,
    ) -> Result<ThermodynamicTemperature, PropertyError> {
        self.saturation_temperature_raw(p.get::<pascal>())
            .map(ThermodynamicTemperature::new::<kelvin>)
    }

    fn saturation_temperature_raw(&self, p: f64) -> Result<f64, PropertyError> {
        Cubic::check_pressure(p)?;
        if p >= self.eos.critical_pressure() {
            return Err(PropertyError::OutOfDomain {
                context: format!("no saturation at or above the critical pressure ({p:.1} Pa)"),
            });
        }

        inversion::solve_temperature(
            |t| saturation::pressure(&self.eos, t, &self.config).map(f64::ln),
            p.ln(),
            [self.eos.min_temperature(), self.eos.critical_temperature()],
            &self.config,
        )
    }

    /// Single-phase state at `(t, p)` on the stable root.
    fn single_phase(&self, t: f64, p: f64) -> Result<FluidPoint, PropertyError> {
        Ok(point_from(&self.sample(t, p)?, None))
    }

    fn sample(&self, t: f64, p: f64) -> Result<Sample, PropertyError> {
        self.eos.check_temperature(t)?;
        Cubic::check_pressure(p)?;
        let roots = self.eos.roots(t, p)?;
        Ok(self.eos.sample(t, p, Cubic::stable_root(&roots), &roots))
    }

    /// Resolves the state on isobar `p` where `property` reaches its target.
    fn along_isobar(&self, p: f64, property: Isobaric) -> Result<FluidPoint, PropertyError> {
        Cubic::check_pressure(p)?;
        let target = property.target();

        let bracket = if p < self.eos.critical_pressure() {
            let t_sat = self.saturation_temperature_raw(p)?;
            let sat = saturation::at_temperature(&self.eos, t_sat, &self.config)?;
            let (low, high) = (property.of(&sat.liquid), property.of(&sat.vapor));

            if (low..=high).contains(&target) {
                let q = (target - low) / (high - low);
                return Ok(two_phase(&sat, q, p));
            }

            if target > high {
                [t_sat, self.eos.max_temperature()]
            } else {
                [self.eos.min_temperature(), t_sat]
            }
        } else {
            [self.eos.min_temperature(), self.eos.max_temperature()]
        };

        let t = inversion::solve_temperature(
            |t| self.sample(t, p).map(|sample| property.of(&sample)),
            target,
            bracket,
            &self.config,
        )?;

        self.single_phase(t, p)
    }
}

fn check_quality(q: Ratio) -> Result<f64, PropertyError> {
    let q = q.get::<ratio>();
    if (0.0..=1.0).contains(&q) {
        Ok(q)
    } else {
        Err(PropertyError::OutOfDomain {
            context: format!("quality {q} outside [0, 1]"),
        })
    }
}

/// Builds a saturated or two-phase point at quality `q` and pressure `p`.
fn two_phase(sat: &Saturation, q: f64, p: f64) -> FluidPoint {
    #[allow(clippy::float_cmp)]
    let mut point = if q == 0.0 {
        point_from(&sat.liquid, None)
    } else if q == 1.0 {
        point_from(&sat.vapor, None)
    } else {
        let (h, s, v) = sat.mix(q);
        FluidPoint {
            temperature: ThermodynamicTemperature::new::<kelvin>(sat.liquid.temperature),
            pressure: Pressure::new::<pascal>(p),
            density: MassDensity::new::<kilogram_per_cubic_meter>(1.0 / v),
            enthalpy: SpecificEnthalpy::new::<joule_per_kilogram>(h),
            entropy: SpecificEntropy::new::<joule_per_kilogram_kelvin>(s),
            cp: None,
            quality: None,
            phase: Phase::TwoPhase,
        }
    };
    point.pressure = Pressure::new::<pascal>(p);
    point.quality = Some(Ratio::new::<ratio>(q));
    point
}

fn point_from(sample: &Sample, quality: Option<Ratio>) -> FluidPoint {
    FluidPoint {
        temperature: ThermodynamicTemperature::new::<kelvin>(sample.temperature),
        pressure: Pressure::new::<pascal>(sample.pressure),
        density: MassDensity::new::<kilogram_per_cubic_meter>(1.0 / sample.volume),
        enthalpy: SpecificEnthalpy::new::<joule_per_kilogram>(sample.enthalpy),
        entropy: SpecificEntropy::new::<joule_per_kilogram_kelvin>(sample.entropy),
        cp: Some(SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(sample.cp)),
        quality,
        phase: sample.phase,
    }
}
