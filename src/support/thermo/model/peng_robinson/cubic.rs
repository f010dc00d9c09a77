//! Peng–Robinson equation of state on a per-unit-mass basis.

use std::f64::consts::{PI, SQRT_2};

use crate::support::thermo::{Phase, PropertyError, fluid::OrganicConstants};

/// Universal gas constant, J/(mol·K).
const GAS_CONSTANT: f64 = 8.314_462_618;

/// Ideal-gas reference state where `h = 0` and `s = 0`.
const REFERENCE_TEMPERATURE: f64 = 273.15;
const REFERENCE_PRESSURE: f64 = 101_325.0;

/// Roots of the compressibility cubic above the covolume bound `Z > B`.
#[derive(Debug, Clone, Copy)]
pub(super) struct Roots {
    /// Smallest root.
    pub liquid: f64,
    /// Largest root, equal to `liquid` when only one root exists.
    pub vapor: f64,
    pub distinct: bool,
    /// Dimensionless attraction `A = a·P / (R·T)²`.
    pub a: f64,
    /// Dimensionless covolume `B = b·P / (R·T)`.
    pub b: f64,
}

/// Properties at a single root, in SI units.
#[derive(Debug, Clone, Copy)]
pub(super) struct Sample {
    pub temperature: f64,
    pub pressure: f64,
    pub volume: f64,
    pub enthalpy: f64,
    pub entropy: f64,
    pub cp: f64,
    pub phase: Phase,
}

#[derive(Debug, Clone, Copy)]
pub(super) struct Cubic {
    /// Specific gas constant, J/(kg·K).
    r: f64,
    t_c: f64,
    p_c: f64,
    a_c: f64,
    b: f64,
    acentric_factor: f64,
    kappa: f64,
    v_c: f64,
    cp0: [f64; 3],
}

impl Cubic {
    pub(super) fn new(constants: &OrganicConstants) -> Self {
        let r = GAS_CONSTANT / constants.molar_mass;
        let t_c = constants.critical_temperature;
        let p_c = constants.critical_pressure;
        let w = constants.acentric_factor;

        Self {
            r,
            t_c,
            p_c,
            a_c: 0.457_24 * r * r * t_c * t_c / p_c,
            b: 0.077_80 * r * t_c / p_c,
            acentric_factor: w,
            kappa: 0.374_64 + 1.542_26 * w - 0.269_92 * w * w,
            v_c: 0.3074 * r * t_c / p_c,
            cp0: constants.ideal_gas_cp,
        }
    }

    pub(super) fn critical_temperature(&self) -> f64 {
        self.t_c
    }

    pub(super) fn critical_pressure(&self) -> f64 {
        self.p_c
    }

    pub(super) fn min_temperature(&self) -> f64 {
        0.4 * self.t_c
    }

    pub(super) fn max_temperature(&self) -> f64 {
        2.0 * self.t_c
    }

    /// Ensures `t` lies within the range the correlations are fitted for.
    pub(super) fn check_temperature(&self, t: f64) -> Result<(), PropertyError> {
        if (self.min_temperature()..=self.max_temperature()).contains(&t) {
            Ok(())
        } else {
            Err(PropertyError::OutOfDomain {
                context: format!(
                    "temperature {t:.3} K outside [{:.3}, {:.3}] K",
                    self.min_temperature(),
                    self.max_temperature()
                ),
            })
        }
    }

    pub(super) fn check_pressure(p: f64) -> Result<(), PropertyError> {
        if p.is_finite() && p > 0.0 {
            Ok(())
        } else {
            Err(PropertyError::OutOfDomain {
                context: format!("pressure {p} Pa must be positive"),
            })
        }
    }

    /// Wilson's correlation, used to seed saturation pressure iterations.
    pub(super) fn wilson_pressure(&self, t: f64) -> f64 {
        self.p_c * (5.373 * (1.0 + self.acentric_factor) * (1.0 - self.t_c / t)).exp()
    }

    fn sqrt_alpha(&self, t: f64) -> f64 {
        1.0 + self.kappa * (1.0 - (t / self.t_c).sqrt())
    }

    fn attraction(&self, t: f64) -> f64 {
        let sa = self.sqrt_alpha(t);
        self.a_c * sa * sa
    }

    fn attraction_dt(&self, t: f64) -> f64 {
        -self.a_c * self.kappa * self.sqrt_alpha(t) / (t * self.t_c).sqrt()
    }

    fn attraction_dt2(&self, t: f64) -> f64 {
        self.a_c * self.kappa / (2.0 * t)
            * (self.kappa / self.t_c + self.sqrt_alpha(t) / (t * self.t_c).sqrt())
    }

    /// Solves `Z³ − (1−B)·Z² + (A − 3B² − 2B)·Z − (AB − B² − B³) = 0`.
    pub(super) fn roots(&self, t: f64, p: f64) -> Result<Roots, PropertyError> {
        let rt = self.r * t;
        let a = self.attraction(t) * p / (rt * rt);
        let b = self.b * p / rt;

        let c2 = -(1.0 - b);
        let c1 = a - 3.0 * b * b - 2.0 * b;
        let c0 = -(a * b - b * b - b * b * b);

        // Depressed cubic y³ + p·y + q = 0 with Z = y − c2/3.
        let dp = c1 - c2 * c2 / 3.0;
        let dq = 2.0 * c2.powi(3) / 27.0 - c2 * c1 / 3.0 + c0;
        let disc = (dq / 2.0).powi(2) + (dp / 3.0).powi(3);

        let mut candidates = [f64::NAN; 3];
        if disc > 0.0 {
            let sd = disc.sqrt();
            candidates[0] = (-dq / 2.0 + sd).cbrt() + (-dq / 2.0 - sd).cbrt() - c2 / 3.0;
        } else {
            let m = 2.0 * (-dp / 3.0).sqrt();
            let theta = (3.0 * dq / (dp * m)).clamp(-1.0, 1.0).acos() / 3.0;
            for (k, z) in candidates.iter_mut().enumerate() {
                #[allow(clippy::cast_precision_loss)]
                let shift = 2.0 * PI * k as f64 / 3.0;
                *z = m * (theta - shift).cos() - c2 / 3.0;
            }
        }

        let valid = candidates.iter().copied().filter(|z| z.is_finite() && *z > b);
        let (liquid, vapor, count) = valid.fold(
            (f64::INFINITY, f64::NEG_INFINITY, 0_usize),
            |(lo, hi, n), z| (lo.min(z), hi.max(z), n + 1),
        );

        if count == 0 {
            return Err(PropertyError::Calculation {
                context: format!("no physical compressibility root at T = {t:.3} K, P = {p:.1} Pa"),
            });
        }

        Ok(Roots {
            liquid,
            vapor,
            distinct: count > 1 && vapor - liquid > 1e-12,
            a,
            b,
        })
    }

    /// Natural log of the fugacity coefficient at root `z`.
    pub(super) fn ln_phi(z: f64, a: f64, b: f64) -> f64 {
        z - 1.0 - (z - b).ln() - a / (2.0 * SQRT_2 * b) * log_term(z, b)
    }

    /// Returns the root with the lower Gibbs energy.
    pub(super) fn stable_root(roots: &Roots) -> f64 {
        if !roots.distinct {
            return roots.liquid;
        }
        let liquid = Self::ln_phi(roots.liquid, roots.a, roots.b);
        let vapor = Self::ln_phi(roots.vapor, roots.a, roots.b);
        if liquid < vapor { roots.liquid } else { roots.vapor }
    }

    /// Returns `true` if a specific volume lies on the liquid side of the critical volume.
    pub(super) fn is_liquid_like(&self, z: f64, t: f64, p: f64) -> bool {
        z * self.r * t / p < self.v_c
    }

    fn ideal_enthalpy(&self, t: f64) -> f64 {
        let [c0, c1, c2] = self.cp0;
        let t0 = REFERENCE_TEMPERATURE;
        c0 * (t - t0) + c1 / 2.0 * (t * t - t0 * t0) + c2 / 3.0 * (t.powi(3) - t0.powi(3))
    }

    fn ideal_entropy(&self, t: f64, p: f64) -> f64 {
        let [c0, c1, c2] = self.cp0;
        let t0 = REFERENCE_TEMPERATURE;
        c0 * (t / t0).ln() + c1 * (t - t0) + c2 / 2.0 * (t * t - t0 * t0)
            - self.r * (p / REFERENCE_PRESSURE).ln()
    }

    fn ideal_cp(&self, t: f64) -> f64 {
        let [c0, c1, c2] = self.cp0;
        c0 + c1 * t + c2 * t * t
    }

    /// Evaluates properties at root `z` of the cubic at `(t, p)`.
    pub(super) fn sample(&self, t: f64, p: f64, z: f64, roots: &Roots) -> Sample {
        let a = self.attraction(t);
        let da = self.attraction_dt(t);
        let d2a = self.attraction_dt2(t);
        let b = self.b;
        let r = self.r;
        let log = log_term(z, roots.b);
        let scale = 2.0 * SQRT_2 * b;

        let enthalpy = self.ideal_enthalpy(t) + r * t * (z - 1.0) + (t * da - a) / scale * log;
        let entropy = self.ideal_entropy(t, p) + r * (z - roots.b).ln() + da / scale * log;

        let v = z * r * t / p;
        let cv = self.ideal_cp(t) - r + t * d2a / scale * log;
        let den = v * v + 2.0 * b * v - b * b;
        let dp_dt = r / (v - b) - da / den;
        let dp_dv = -r * t / (v - b).powi(2) + 2.0 * a * (v + b) / (den * den);
        let cp = cv - t * dp_dt * dp_dt / dp_dv;

        let phase = if t >= self.t_c {
            Phase::Supercritical
        } else if v < self.v_c {
            Phase::Liquid
        } else {
            Phase::Vapor
        };

        Sample {
            temperature: t,
            pressure: p,
            volume: v,
            enthalpy,
            entropy,
            cp,
            phase,
        }
    }
}

fn log_term(z: f64, b: f64) -> f64 {
    ((z + (1.0 + SQRT_2) * b) / (z + (1.0 - SQRT_2) * b)).ln()
}
