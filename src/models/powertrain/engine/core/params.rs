use num_traits::Zero;
use thiserror::Error;
use uom::si::{
    f64::{AngularVelocity, MomentOfInertia, Torque},
    moment_of_inertia::kilogram_square_meter,
    torque::newton_meter,
};

use crate::support::{
    constraint::{Constrained, ConstraintError, StrictlyPositive},
    units::ShaftSpeed,
};

/// Share of the flywheel inertia added by the driveline at full engagement.
const DRIVELINE_INERTIA_SHARE: f64 = 0.5;

/// Selects how clutch engagement affects the inertia the engine accelerates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InertiaModel {
    /// Flywheel only; clutch engagement is ignored.
    Fixed,

    /// Flywheel plus driveline mass, rising linearly with engagement to 1.5×
    /// the flywheel inertia when the clutch is fully engaged.
    #[default]
    ClutchCoupled,
}

impl InertiaModel {
    /// Returns the effective inertia for an engagement level in `[0, 1]`.
    #[must_use]
    pub fn effective(self, flywheel: MomentOfInertia, engagement: f64) -> MomentOfInertia {
        match self {
            Self::Fixed => flywheel,
            Self::ClutchCoupled => flywheel + flywheel * (DRIVELINE_INERTIA_SHARE * engagement),
        }
    }
}

/// Errors that can occur while constructing [`EngineParams`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum EngineParamsError {
    /// A parameter that must be strictly positive was not.
    #[error("{parameter} must be strictly positive")]
    NotPositive {
        /// Name of the offending parameter.
        parameter: &'static str,

        #[source]
        source: ConstraintError,
    },

    /// The idle speed is not below the maximum speed.
    #[error("idle speed must be below max speed: idle={idle:?}, max={max:?}")]
    IdleNotBelowMax {
        idle: AngularVelocity,
        max: AngularVelocity,
    },
}

/// Immutable engine parameters.
///
/// All values are validated at construction: speeds, inertia, peak torque,
/// and the drag coefficient must be strictly positive, and the idle speed
/// must be below the maximum speed.
///
/// The drag coefficient is expressed as the drag torque at 1000 RPM; drag
/// scales with the square of speed from there.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineParams {
    idle_speed: AngularVelocity,
    max_speed: AngularVelocity,
    flywheel_inertia: MomentOfInertia,
    max_torque: Torque,
    drag_coefficient: Torque,
    inertia_model: InertiaModel,
}

impl EngineParams {
    /// Creates validated engine parameters using the [`InertiaModel::ClutchCoupled`]
    /// inertia model.
    ///
    /// # Errors
    ///
    /// Returns [`EngineParamsError`] if any value is zero, negative, or NaN,
    /// or if `idle_speed` is not below `max_speed`.
    pub fn new(
        idle_speed: AngularVelocity,
        max_speed: AngularVelocity,
        flywheel_inertia: MomentOfInertia,
        max_torque: Torque,
        drag_coefficient: Torque,
    ) -> Result<Self, EngineParamsError> {
        let idle_speed = positive("idle speed", idle_speed)?;
        let max_speed = positive("max speed", max_speed)?;

        if idle_speed >= max_speed {
            return Err(EngineParamsError::IdleNotBelowMax {
                idle: idle_speed,
                max: max_speed,
            });
        }

        Ok(Self {
            idle_speed,
            max_speed,
            flywheel_inertia: positive("flywheel inertia", flywheel_inertia)?,
            max_torque: positive("max torque", max_torque)?,
            drag_coefficient: positive("drag coefficient", drag_coefficient)?,
            inertia_model: InertiaModel::default(),
        })
    }

    /// Returns these parameters with a different inertia model.
    #[must_use]
    pub fn with_inertia_model(self, inertia_model: InertiaModel) -> Self {
        Self {
            inertia_model,
            ..self
        }
    }

    #[must_use]
    pub fn idle_speed(&self) -> AngularVelocity {
        self.idle_speed
    }

    #[must_use]
    pub fn max_speed(&self) -> AngularVelocity {
        self.max_speed
    }

    #[must_use]
    pub fn flywheel_inertia(&self) -> MomentOfInertia {
        self.flywheel_inertia
    }

    #[must_use]
    pub fn max_torque(&self) -> Torque {
        self.max_torque
    }

    /// Drag coefficient in Nm per (1000 RPM)²: the drag torque at 1000 RPM.
    #[must_use]
    pub fn drag_coefficient(&self) -> Torque {
        self.drag_coefficient
    }

    #[must_use]
    pub fn inertia_model(&self) -> InertiaModel {
        self.inertia_model
    }
}

/// A small petrol engine: 800–7000 RPM, 0.1 kg·m² flywheel, 200 Nm peak,
/// 0.25 Nm of drag at 1000 RPM, clutch-coupled inertia.
impl Default for EngineParams {
    fn default() -> Self {
        Self {
            idle_speed: AngularVelocity::from_rpm(800.0),
            max_speed: AngularVelocity::from_rpm(7000.0),
            flywheel_inertia: MomentOfInertia::new::<kilogram_square_meter>(0.1),
            max_torque: Torque::new::<newton_meter>(200.0),
            drag_coefficient: Torque::new::<newton_meter>(0.25),
            inertia_model: InertiaModel::default(),
        }
    }
}

fn positive<T: PartialOrd + Zero>(parameter: &'static str, value: T) -> Result<T, EngineParamsError> {
    StrictlyPositive::new(value)
        .map(Constrained::into_inner)
        .map_err(|source| EngineParamsError::NotPositive { parameter, source })
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    fn rpm(value: f64) -> AngularVelocity {
        AngularVelocity::from_rpm(value)
    }

    fn nm(value: f64) -> Torque {
        Torque::new::<newton_meter>(value)
    }

    fn kg_m2(value: f64) -> MomentOfInertia {
        MomentOfInertia::new::<kilogram_square_meter>(value)
    }

    #[test]
    fn accepts_typical_engine() {
        let params = EngineParams::new(rpm(900.0), rpm(6500.0), kg_m2(0.2), nm(350.0), nm(0.1))
            .expect("parameters are valid");

        assert_relative_eq!(params.idle_speed().rpm(), 900.0, max_relative = 1e-12);
        assert_relative_eq!(params.max_torque().get::<newton_meter>(), 350.0);
        assert_eq!(params.inertia_model(), InertiaModel::ClutchCoupled);
    }

    #[test]
    fn rejects_zero_inertia() {
        let err = EngineParams::new(rpm(800.0), rpm(7000.0), kg_m2(0.0), nm(200.0), nm(0.25))
            .unwrap_err();

        assert_eq!(
            err,
            EngineParamsError::NotPositive {
                parameter: "flywheel inertia",
                source: ConstraintError::Zero,
            }
        );
    }

    #[test]
    fn rejects_negative_drag() {
        let err = EngineParams::new(rpm(800.0), rpm(7000.0), kg_m2(0.1), nm(200.0), nm(-1.0))
            .unwrap_err();

        assert!(matches!(
            err,
            EngineParamsError::NotPositive {
                parameter: "drag coefficient",
                source: ConstraintError::Negative,
            }
        ));
    }

    #[test]
    fn rejects_idle_at_or_above_max() {
        let err = EngineParams::new(rpm(7000.0), rpm(7000.0), kg_m2(0.1), nm(200.0), nm(0.25))
            .unwrap_err();
        assert!(matches!(err, EngineParamsError::IdleNotBelowMax { .. }));

        let err = EngineParams::new(rpm(8000.0), rpm(7000.0), kg_m2(0.1), nm(200.0), nm(0.25))
            .unwrap_err();
        assert!(matches!(err, EngineParamsError::IdleNotBelowMax { .. }));
    }

    #[test]
    fn clutch_coupled_inertia_scales_with_engagement() {
        let flywheel = kg_m2(0.1);
        let model = InertiaModel::ClutchCoupled;

        assert_relative_eq!(
            model.effective(flywheel, 0.0).get::<kilogram_square_meter>(),
            0.1
        );
        assert_relative_eq!(
            model.effective(flywheel, 0.5).get::<kilogram_square_meter>(),
            0.125
        );
        assert_relative_eq!(
            model.effective(flywheel, 1.0).get::<kilogram_square_meter>(),
            0.15
        );
    }

    #[test]
    fn fixed_inertia_ignores_engagement() {
        let flywheel = kg_m2(0.1);
        assert_relative_eq!(
            InertiaModel::Fixed
                .effective(flywheel, 1.0)
                .get::<kilogram_square_meter>(),
            0.1
        );
    }
}
