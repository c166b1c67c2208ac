use std::num::NonZeroUsize;

use thiserror::Error;
use uom::{ConstZero, si::f64::AngularVelocity};

use crate::support::{
    constraint::{Constrained, ConstraintError, NonNegative, UnitInterval},
    units::TimeStep,
};

/// Engagement above which clutch-synchronized engine speed is fed back.
const DEFAULT_FEEDBACK_THRESHOLD: f64 = 0.1;

/// Ticks of history kept by default: 10 s at 0.1 s.
const DEFAULT_HISTORY_LEN: NonZeroUsize = NonZeroUsize::new(100).unwrap();

/// Errors that can occur while configuring a driveline.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum DrivelineConfigError {
    #[error("feedback threshold must lie in [0, 1]")]
    FeedbackThreshold(#[source] ConstraintError),

    #[error("initial transmission speed must not be negative")]
    TransmissionSpeed(#[source] ConstraintError),
}

/// Driveline run configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrivelineConfig {
    dt: TimeStep,
    feedback_threshold: f64,
    history_len: NonZeroUsize,
    initial_transmission_speed: AngularVelocity,
}

impl DrivelineConfig {
    /// Creates a configuration for the given fixed step.
    ///
    /// Defaults: feedback above 10% engagement, 100 ticks of history, and a
    /// transmission shaft starting at rest.
    #[must_use]
    pub fn new(dt: TimeStep) -> Self {
        Self {
            dt,
            feedback_threshold: DEFAULT_FEEDBACK_THRESHOLD,
            history_len: DEFAULT_HISTORY_LEN,
            initial_transmission_speed: AngularVelocity::ZERO,
        }
    }

    /// Sets the engagement above which the clutch-adjusted engine speed is
    /// committed back into the engine.
    ///
    /// # Errors
    ///
    /// Returns [`DrivelineConfigError::FeedbackThreshold`] unless the value lies in `[0, 1]`.
    pub fn with_feedback_threshold(self, threshold: f64) -> Result<Self, DrivelineConfigError> {
        let feedback_threshold = UnitInterval::new(threshold)
            .map(Constrained::into_inner)
            .map_err(DrivelineConfigError::FeedbackThreshold)?;

        Ok(Self {
            feedback_threshold,
            ..self
        })
    }

    #[must_use]
    pub fn with_history_len(self, history_len: NonZeroUsize) -> Self {
        Self {
            history_len,
            ..self
        }
    }

    /// Sets the transmission input shaft speed at the start of the run.
    ///
    /// # Errors
    ///
    /// Returns [`DrivelineConfigError::TransmissionSpeed`] if the speed is negative or NaN.
    pub fn with_initial_transmission_speed(
        self,
        speed: AngularVelocity,
    ) -> Result<Self, DrivelineConfigError> {
        let initial_transmission_speed = NonNegative::new(speed)
            .map(Constrained::into_inner)
            .map_err(DrivelineConfigError::TransmissionSpeed)?;

        Ok(Self {
            initial_transmission_speed,
            ..self
        })
    }

    #[must_use]
    pub fn dt(&self) -> TimeStep {
        self.dt
    }

    #[must_use]
    pub fn feedback_threshold(&self) -> f64 {
        self.feedback_threshold
    }

    #[must_use]
    pub fn history_len(&self) -> NonZeroUsize {
        self.history_len
    }

    #[must_use]
    pub fn initial_transmission_speed(&self) -> AngularVelocity {
        self.initial_transmission_speed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::support::units::ShaftSpeed;

    fn config() -> DrivelineConfig {
        DrivelineConfig::new(TimeStep::from_seconds(0.1).unwrap())
    }

    #[test]
    fn defaults() {
        let config = config();
        assert_relative_eq!(config.dt().seconds(), 0.1);
        assert_relative_eq!(config.feedback_threshold(), 0.1);
        assert_eq!(config.history_len().get(), 100);
        assert_relative_eq!(config.initial_transmission_speed().rpm(), 0.0);
    }

    #[test]
    fn feedback_threshold_must_be_a_fraction() {
        assert!(config().with_feedback_threshold(0.0).is_ok());
        assert_eq!(
            config().with_feedback_threshold(1.5),
            Err(DrivelineConfigError::FeedbackThreshold(
                ConstraintError::AboveMaximum
            ))
        );
    }

    #[test]
    fn transmission_cannot_start_reversed() {
        assert!(
            config()
                .with_initial_transmission_speed(AngularVelocity::from_rpm(-10.0))
                .is_err()
        );
        let config = config()
            .with_initial_transmission_speed(AngularVelocity::from_rpm(1500.0))
            .unwrap();
        assert_relative_eq!(
            config.initial_transmission_speed().rpm(),
            1500.0,
            max_relative = 1e-12
        );
    }
}
