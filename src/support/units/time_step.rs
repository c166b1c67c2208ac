use std::ops::Deref;

use uom::si::{f64::Time, time::second};

use crate::support::constraint::{Constrained, ConstraintResult, StrictlyPositive};

/// A fixed simulation time step.
///
/// The value must be strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct TimeStep(Constrained<Time, StrictlyPositive>);

impl TimeStep {
    /// Create a [`TimeStep`] from a value in seconds.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the value is not strictly positive.
    pub fn from_seconds(value: f64) -> ConstraintResult<Self> {
        Self::from_quantity(Time::new::<second>(value))
    }

    /// Create a [`TimeStep`] from a time quantity.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the quantity is not strictly positive.
    pub fn from_quantity(quantity: Time) -> ConstraintResult<Self> {
        Ok(Self(StrictlyPositive::new(quantity)?))
    }

    /// Returns the step length in seconds.
    #[must_use]
    pub fn seconds(&self) -> f64 {
        self.0.as_ref().get::<second>()
    }
}

impl Deref for TimeStep {
    type Target = Time;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::time::millisecond;

    use crate::support::constraint::ConstraintError;

    #[test]
    fn from_milliseconds() -> ConstraintResult<()> {
        let dt = TimeStep::from_quantity(Time::new::<millisecond>(16.0))?;
        assert_relative_eq!(dt.seconds(), 0.016);
        assert_relative_eq!(dt.get::<millisecond>(), 16.0);
        Ok(())
    }

    #[test]
    fn rejects_non_positive_steps() {
        assert_eq!(TimeStep::from_seconds(0.0), Err(ConstraintError::Zero));
        assert_eq!(
            TimeStep::from_seconds(-0.1),
            Err(ConstraintError::Negative)
        );
    }
}
