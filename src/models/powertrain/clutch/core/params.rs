use thiserror::Error;
use uom::si::{f64::Frequency, frequency::hertz};

use crate::support::constraint::{
    Constrained, ConstraintError, NonNegative, StrictlyPositive, UnitInterval,
};

/// Default engagement tolerance for regime classification.
const DEFAULT_REGIME_TOLERANCE: f64 = 1e-6;

/// How a fully engaged clutch synchronizes the two shafts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LockPolicy {
    /// Both shafts jump to their average speed in one tick.
    Instant,

    /// Both shafts move 80% of the way to their average speed each tick.
    #[default]
    FastConvergence,
}

impl LockPolicy {
    /// Fraction of the gap to the average closed per tick when locked.
    #[must_use]
    pub fn convergence(self) -> f64 {
        match self {
            Self::Instant => 1.0,
            Self::FastConvergence => 0.8,
        }
    }
}

/// Errors that can occur while constructing [`ClutchParams`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ClutchParamsError {
    #[error("clutch stiffness must be strictly positive")]
    Stiffness(#[source] ConstraintError),

    #[error("freewheel decay rate must not be negative")]
    FreewheelDecay(#[source] ConstraintError),

    #[error("regime tolerance must lie in [0, 0.5): {0}")]
    RegimeTolerance(f64),
}

/// Immutable clutch parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClutchParams {
    stiffness: Frequency,
    lock: LockPolicy,
    freewheel_decay: Frequency,
    regime_tolerance: f64,
}

impl ClutchParams {
    /// Creates clutch parameters with the given stiffness and default
    /// lock policy, freewheel decay, and regime tolerance.
    ///
    /// # Errors
    ///
    /// Returns [`ClutchParamsError::Stiffness`] if the stiffness is not
    /// strictly positive.
    pub fn new(stiffness: Frequency) -> Result<Self, ClutchParamsError> {
        let stiffness = StrictlyPositive::new(stiffness)
            .map(Constrained::into_inner)
            .map_err(ClutchParamsError::Stiffness)?;

        Ok(Self {
            stiffness,
            ..Self::default()
        })
    }

    #[must_use]
    pub fn with_lock(self, lock: LockPolicy) -> Self {
        Self { lock, ..self }
    }

    /// Sets the fractional speed loss per second of a freewheeling transmission shaft.
    ///
    /// # Errors
    ///
    /// Returns [`ClutchParamsError::FreewheelDecay`] if the rate is negative or NaN.
    pub fn with_freewheel_decay(self, rate: Frequency) -> Result<Self, ClutchParamsError> {
        let freewheel_decay = NonNegative::new(rate)
            .map(Constrained::into_inner)
            .map_err(ClutchParamsError::FreewheelDecay)?;

        Ok(Self {
            freewheel_decay,
            ..self
        })
    }

    /// Sets how close to 0 or 1 an engagement must be to count as fully
    /// disengaged or locked.
    ///
    /// # Errors
    ///
    /// Returns [`ClutchParamsError::RegimeTolerance`] unless `0 ≤ tolerance < 0.5`.
    pub fn with_regime_tolerance(self, tolerance: f64) -> Result<Self, ClutchParamsError> {
        match UnitInterval::new(tolerance) {
            Ok(tol) if tol.into_inner() < 0.5 => Ok(Self {
                regime_tolerance: tolerance,
                ..self
            }),
            _ => Err(ClutchParamsError::RegimeTolerance(tolerance)),
        }
    }

    /// Convergence rate constant used while slipping.
    #[must_use]
    pub fn stiffness(&self) -> Frequency {
        self.stiffness
    }

    #[must_use]
    pub fn lock(&self) -> LockPolicy {
        self.lock
    }

    #[must_use]
    pub fn freewheel_decay(&self) -> Frequency {
        self.freewheel_decay
    }

    #[must_use]
    pub fn regime_tolerance(&self) -> f64 {
        self.regime_tolerance
    }
}

/// 10 /s stiffness, fast-convergence lock, 3% per second freewheel decay.
impl Default for ClutchParams {
    fn default() -> Self {
        Self {
            stiffness: Frequency::new::<hertz>(10.0),
            lock: LockPolicy::default(),
            freewheel_decay: Frequency::new::<hertz>(0.03),
            regime_tolerance: DEFAULT_REGIME_TOLERANCE,
        }
    }
}
