use std::cmp::Ordering;

use num_traits::Zero;

use super::{Constrained, Constraint, ConstraintError};

/// Marker type enforcing that a value is strictly positive (greater than zero).
///
/// Physical parameters such as inertia, peak torque, and clutch stiffness
/// use this constraint, since a zero or negative value makes the dynamics
/// divide by zero or run backwards.
///
/// # Examples
///
/// ```
/// use powertrain_models::support::constraint::StrictlyPositive;
///
/// let stiffness = StrictlyPositive::new(10.0).unwrap();
/// assert_eq!(stiffness.into_inner(), 10.0);
///
/// assert!(StrictlyPositive::new(0.0).is_err());
/// assert!(StrictlyPositive::new(-1.0).is_err());
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
        f64::{AngularVelocity, Time},
        angular_velocity::revolution_per_minute,
        time::second,
    };

    #[test]
    fn floats() {
        assert!(StrictlyPositive::new(0.016).is_ok());
        assert!(matches!(
            StrictlyPositive::new(0.0),
            Err(ConstraintError::Zero)
        ));
        assert!(matches!(
            StrictlyPositive::new(-0.1),
            Err(ConstraintError::Negative)
        ));
        assert!(matches!(
            StrictlyPositive::new(f64::NAN),
            Err(ConstraintError::NotANumber)
        ));
    }

    #[test]
    fn quantities() {
        let dt = Time::new::<second>(0.1);
        assert!(StrictlyPositive::new(dt).is_ok());

        let stalled = AngularVelocity::new::<revolution_per_minute>(0.0);
        assert!(StrictlyPositive::new(stalled).is_err());

        let reversed = AngularVelocity::new::<revolution_per_minute>(-50.0);
        assert!(StrictlyPositive::new(reversed).is_err());
    }
}
