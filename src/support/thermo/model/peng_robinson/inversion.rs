//! Temperature inversion of property curves by bisection.

use std::convert::Infallible;

use twine_core::{EquationProblem, Model};
use twine_solvers::equation::bisection;

use crate::support::thermo::PropertyError;

use super::InversionConfig;

/// Model adapter exposing a property as a function of temperature, in K.
struct Curve<F> {
    property: F,
}

impl<F> Model for Curve<F>
where
    F: Fn(f64) -> Result<f64, PropertyError>,
{
    type Input = f64;
    type Output = f64;
    type Error = PropertyError;

    fn call(&self, temperature: &f64) -> Result<f64, PropertyError> {
        (self.property)(*temperature)
    }
}

/// Residual `property(T) − target`.
struct Target(f64);

impl EquationProblem<1> for Target {
    type Input = f64;
    type Output = f64;
    type Error = Infallible;

    fn input(&self, x: &[f64; 1]) -> Result<f64, Infallible> {
        Ok(x[0])
    }

    fn residuals(&self, _input: &f64, output: &f64) -> Result<[f64; 1], Infallible> {
        Ok([output - self.0])
    }
}

/// Finds the temperature in `bracket` where `property` equals `target`.
///
/// Failed evaluations are treated as lying above the root, which holds for
/// every curve this model inverts: they fail only near the critical point.
pub(super) fn solve_temperature<F>(
    property: F,
    target: f64,
    bracket: [f64; 2],
    config: &InversionConfig,
) -> Result<f64, PropertyError>
where
    F: Fn(f64) -> Result<f64, PropertyError>,
{
    let solution = bisection::solve(
        &Curve { property },
        &Target(target),
        bracket,
        &config.bisection(),
        |event: &bisection::Event<'_, _, _>| {
            if event.result().is_err() {
                return Some(bisection::Action::assume_positive());
            }
            None
        },
    )
    .map_err(|error| match error {
        bisection::Error::InvalidBracket(_) => PropertyError::OutOfDomain {
            context: format!(
                "target {target} not reached within [{:.3}, {:.3}] K",
                bracket[0], bracket[1]
            ),
        },
        other => PropertyError::Calculation {
            context: format!("temperature inversion failed: {other}"),
        },
    })?;

    if solution.status != bisection::Status::Converged {
        return Err(PropertyError::Calculation {
            context: format!(
                "temperature inversion hit iteration limit: residual={}, iters={}",
                solution.residual, solution.iters
            ),
        });
    }

    Ok(solution.x)
}
