use std::{cmp::Ordering, marker::PhantomData};

use num_traits::Zero;

use super::{Constrained, Constraint, ConstraintError};

/// Marker type enforcing that a value is non-negative (zero or greater).
///
/// Used for temperature offsets such as the pinch point and superheat margins.
///
/// # Examples
///
/// ```
/// use orc_models::support::constraint::NonNegative;
/// use uom::si::{f64::TemperatureInterval, temperature_interval::kelvin};
///
/// let pinch = NonNegative::new(TemperatureInterval::new::<kelvin>(10.0)).unwrap();
/// assert_eq!(pinch.into_inner().get::<kelvin>(), 10.0);
///
/// assert!(NonNegative::new(TemperatureInterval::new::<kelvin>(-1.0)).is_err());
/// assert!(NonNegative::new(f64::NAN).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct NonNegative;

impl NonNegative {
    /// Constructs a [`Constrained<T, NonNegative>`] if the value is non-negative.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is negative or not a number (`NaN`).
    pub fn new<T: PartialOrd + Zero>(
        value: T,
    ) -> Result<Constrained<T, NonNegative>, ConstraintError> {
        Constrained::<T, NonNegative>::new(value)
    }

    /// Returns zero as a non-negative constrained value.
    #[must_use]
    pub fn zero<T: PartialOrd + Zero>() -> Constrained<T, NonNegative> {
        Constrained {
            value: T::zero(),
            _marker: PhantomData,
        }
    }
}

impl<T: PartialOrd + Zero> Constraint<T> for NonNegative {
    fn check(value: &T) -> Result<(), ConstraintError> {
        match value.partial_cmp(&T::zero()) {
            Some(Ordering::Greater | Ordering::Equal) => Ok(()),
            Some(Ordering::Less) => Err(ConstraintError::Negative),
            None => Err(ConstraintError::NotANumber),
        }
    }
}
