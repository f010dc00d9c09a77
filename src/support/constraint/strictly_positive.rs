use std::cmp::Ordering;

use num_traits::Zero;

use super::{Constrained, Constraint, ConstraintError};

/// Marker type enforcing that a value is strictly positive (greater than zero).
///
/// # Examples
///
/// ```
/// use orc_models::support::constraint::{Constrained, StrictlyPositive};
/// use uom::si::{f64::MassRate, mass_rate::kilogram_per_second};
///
/// let m_dot = StrictlyPositive::new(MassRate::new::<kilogram_per_second>(5.0)).unwrap();
/// assert_eq!(m_dot.into_inner().get::<kilogram_per_second>(), 5.0);
///
/// assert!(Constrained::<f64, StrictlyPositive>::new(0.0).is_err());
/// assert!(StrictlyPositive::new(-1).is_err());
/// assert!(StrictlyPositive::new(f64::NAN).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct StrictlyPositive;

impl StrictlyPositive {
    /// Constructs a [`Constrained<T, StrictlyPositive>`] if the value is strictly positive.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is zero, negative, or not a number (`NaN`).
    pub fn new<T: PartialOrd + Zero>(
        value: T,
    ) -> Result<Constrained<T, StrictlyPositive>, ConstraintError> {
        Constrained::<T, StrictlyPositive>::new(value)
    }
}

impl<T: PartialOrd + Zero> Constraint<T> for StrictlyPositive {
    fn check(value: &T) -> Result<(), ConstraintError> {
        match value.partial_cmp(&T::zero()) {
            Some(Ordering::Greater) => Ok(()),
            Some(Ordering::Equal) => Err(ConstraintError::Zero),
            Some(Ordering::Less) => Err(ConstraintError::Negative),
            None => Err(ConstraintError::NotANumber),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use uom::si::{
        f64::{MassRate, Pressure},
        mass_rate::kilogram_per_second,
        pressure::bar,
    };

    #[test]
    fn mass_rates() {
        let mass_rate = MassRate::new::<kilogram_per_second>(5.0);
        assert!(StrictlyPositive::new(mass_rate).is_ok());

        let mass_rate = MassRate::new::<kilogram_per_second>(0.0);
        assert_eq!(StrictlyPositive::new(mass_rate), Err(ConstraintError::Zero));

        let mass_rate = MassRate::new::<kilogram_per_second>(-2.0);
        assert_eq!(
            StrictlyPositive::new(mass_rate),
            Err(ConstraintError::Negative)
        );
    }

    #[test]
    fn pressures() {
        assert!(StrictlyPositive::new(Pressure::new::<bar>(15.0)).is_ok());
        assert!(StrictlyPositive::new(Pressure::new::<bar>(f64::NAN)).is_err());
    }
}
