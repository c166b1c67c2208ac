//! Problem formulation for the net-torque balance.

use std::convert::Infallible;

use twine_core::{EquationProblem, Model};
use uom::si::{
    f64::{AngularVelocity, Torque},
    torque::newton_meter,
};

use crate::support::units::ShaftSpeed;

use crate::models::powertrain::engine::core::{EngineParams, torque};

/// Steady-state torques at one engine speed.
#[derive(Debug, Clone, Copy)]
pub(super) struct Balance {
    pub(super) speed: AngularVelocity,

    /// Fully smoothed output torque.
    pub(super) torque: Torque,

    /// Output torque minus load, plus drag.
    pub(super) net_torque: Torque,
}

/// Model evaluating the steady-state torque balance at a given speed.
///
/// Steady state means the smoothing filter has caught up, so the output
/// torque equals the curve target.
pub(super) struct BalanceModel<'a> {
    params: &'a EngineParams,
    throttle: f64,
    load: f64,
}

impl<'a> BalanceModel<'a> {
    pub(super) fn new(params: &'a EngineParams, throttle: f64, load: Torque) -> Self {
        Self {
            params,
            throttle,
            load: load.get::<newton_meter>(),
        }
    }

    pub(super) fn balance(&self, speed: AngularVelocity) -> Balance {
        let rpm = speed.rpm();
        let output = torque::target(self.params, rpm, self.throttle);
        let net = output - self.load + torque::drag(self.params, rpm);

        Balance {
            speed,
            torque: Torque::new::<newton_meter>(output),
            net_torque: Torque::new::<newton_meter>(net),
        }
    }
}

impl Model for BalanceModel<'_> {
    type Input = AngularVelocity;
    type Output = Balance;
    type Error = Infallible;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        Ok(self.balance(*input))
    }
}

/// Equation problem driving the net torque to zero over engine speed in RPM.
pub(super) struct BalanceProblem;

impl EquationProblem<1> for BalanceProblem {
    type Input = AngularVelocity;
    type Output = Balance;
    type Error = Infallible;

    fn input(&self, x: &[f64; 1]) -> Result<Self::Input, Self::Error> {
        Ok(AngularVelocity::from_rpm(x[0]))
    }

    fn residuals(
        &self,
        _input: &Self::Input,
        output: &Self::Output,
    ) -> Result<[f64; 1], Self::Error> {
        Ok([output.net_torque.get::<newton_meter>()])
    }
}
