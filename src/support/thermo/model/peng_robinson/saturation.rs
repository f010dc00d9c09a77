//! Vapor–liquid equilibrium of a pure fluid.

use crate::support::thermo::{Phase, PropertyError};

use super::{
    InversionConfig,
    cubic::{Cubic, Sample},
};

/// Coexisting saturated liquid and vapor at one temperature.
#[derive(Debug, Clone, Copy)]
pub(super) struct Saturation {
    pub liquid: Sample,
    pub vapor: Sample,
}

impl Saturation {
    /// Lever-rule interpolation at vapor quality `q`.
    pub(super) fn mix(&self, q: f64) -> (f64, f64, f64) {
        let (l, v) = (&self.liquid, &self.vapor);
        (
            l.enthalpy + q * (v.enthalpy - l.enthalpy),
            l.entropy + q * (v.entropy - l.entropy),
            l.volume + q * (v.volume - l.volume),
        )
    }
}

/// Solves `φ_liquid = φ_vapor` for the saturation pressure at `t`, in Pa.
///
/// Successive substitution `P ← P·φ_L/φ_V`, seeded by Wilson's correlation.
/// When only one root exists the pressure is nudged toward the two-root region.
pub(super) fn pressure(
    eos: &Cubic,
    t: f64,
    config: &InversionConfig,
) -> Result<f64, PropertyError> {
    let t_c = eos.critical_temperature();
    if t >= t_c {
        return if t == t_c {
            Ok(eos.critical_pressure())
        } else {
            Err(PropertyError::OutOfDomain {
                context: format!("no saturation above the critical temperature ({t:.3} K)"),
            })
        };
    }
    eos.check_temperature(t)?;

    let mut p = eos.wilson_pressure(t);
    for _ in 0..config.saturation_max_iters {
        let roots = eos.roots(t, p)?;

        if !roots.distinct {
            p *= if eos.is_liquid_like(roots.liquid, t, p) {
                0.9
            } else {
                1.1
            };
            continue;
        }

        let step = Cubic::ln_phi(roots.liquid, roots.a, roots.b)
            - Cubic::ln_phi(roots.vapor, roots.a, roots.b);
        p *= step.exp();

        if step.abs() < config.saturation_tol {
            return Ok(p);
        }
    }

    Err(PropertyError::Calculation {
        context: format!(
            "saturation pressure at {t:.3} K did not converge in {} iterations",
            config.saturation_max_iters
        ),
    })
}

/// Resolves saturated liquid and vapor at `t`.
pub(super) fn at_temperature(
    eos: &Cubic,
    t: f64,
    config: &InversionConfig,
) -> Result<Saturation, PropertyError> {
    if t >= eos.critical_temperature() {
        return Err(PropertyError::OutOfDomain {
            context: format!("no two-phase region at {t:.3} K"),
        });
    }

    let p = pressure(eos, t, config)?;
    let roots = eos.roots(t, p)?;
    if !roots.distinct {
        return Err(PropertyError::Calculation {
            context: format!("saturation at {t:.3} K collapsed to a single root"),
        });
    }

    let mut liquid = eos.sample(t, p, roots.liquid, &roots);
    let mut vapor = eos.sample(t, p, roots.vapor, &roots);
    liquid.phase = Phase::Liquid;
    vapor.phase = Phase::Vapor;

    Ok(Saturation { liquid, vapor })
}
