//! Clutch model.
//!
//! [`Clutch`] mutates caller-owned shaft speeds in place. [`ClutchModel`]
//! adapts the same tick to [`twine_core::Model`] as a pure transition from
//! shaft speeds to coupled shaft speeds.

mod core;

pub use self::core::{
    Clutch, ClutchParams, ClutchParamsError, Coupling, LockPolicy, Regime, ShaftSpeeds,
};

use std::convert::Infallible;

use twine_core::Model;

use crate::support::units::TimeStep;

/// One fixed clutch tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClutchTick {
    pub speeds: ShaftSpeeds,
    pub engagement: f64,
    pub dt: TimeStep,
}

/// [`twine_core::Model`] adapter mapping a [`ClutchTick`] to a [`Coupling`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClutchModel {
    params: ClutchParams,
}

impl ClutchModel {
    #[must_use]
    pub fn new(params: ClutchParams) -> Self {
        Self { params }
    }

    #[must_use]
    pub fn params(&self) -> &ClutchParams {
        &self.params
    }
}

impl Model for ClutchModel {
    type Input = ClutchTick;
    type Output = Coupling;
    type Error = Infallible;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        Ok(self.params.couple(input.speeds, input.engagement, input.dt))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use uom::si::f64::AngularVelocity;

    use crate::support::units::ShaftSpeed;

    #[test]
    fn model_matches_stateful_clutch() {
        let params = ClutchParams::default();
        let model = ClutchModel::new(params);
        let mut clutch = Clutch::new(params);
        let dt = TimeStep::from_seconds(0.1).unwrap();

        let mut engine = AngularVelocity::from_rpm(5200.0);
        let mut transmission = AngularVelocity::from_rpm(300.0);

        for engagement in [0.0, 0.05, 0.2, 0.5, 0.8, 1.0, 1.0, 0.0] {
            let tick = ClutchTick {
                speeds: ShaftSpeeds {
                    engine,
                    transmission,
                },
                engagement,
                dt,
            };
            let coupling = model.call(&tick).unwrap();
            let regime = clutch.update(&mut engine, &mut transmission, engagement, dt);

            assert_eq!(coupling.regime, regime);
            assert_eq!(coupling.speeds.engine, engine);
            assert_eq!(coupling.speeds.transmission, transmission);
        }
    }
}
