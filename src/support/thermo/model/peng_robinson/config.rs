use twine_solvers::equation::bisection;
use uom::si::{f64::TemperatureInterval, temperature_interval::kelvin as delta_kelvin};

/// Iteration settings for the Peng–Robinson model's numerical inversions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InversionConfig {
    /// Maximum iteration count for temperature bisection.
    pub max_iters: usize,

    /// Absolute tolerance on the temperature search variable.
    pub temp_tol: TemperatureInterval,

    /// Maximum fugacity iterations per saturation pressure.
    pub saturation_max_iters: usize,

    /// Convergence tolerance on `ln(φ_liquid / φ_vapor)`.
    pub saturation_tol: f64,
}

impl Default for InversionConfig {
    fn default() -> Self {
        Self {
            max_iters: 100,
            temp_tol: TemperatureInterval::new::<delta_kelvin>(1e-9),
            saturation_max_iters: 500,
            saturation_tol: 1e-10,
        }
    }
}

impl InversionConfig {
    /// Converts this configuration into a bisection solver configuration.
    pub(super) fn bisection(&self) -> bisection::Config {
        bisection::Config {
            max_iters: self.max_iters,
            x_abs_tol: self.temp_tol.get::<delta_kelvin>(),
            x_rel_tol: 0.0,
            residual_tol: 1e-12,
        }
    }
}
