use twine_solvers::equation::bisection;
use uom::si::{
    f64::{AngularVelocity, Torque},
    torque::newton_meter,
};

use crate::support::units::ShaftSpeed;

/// Solver configuration for finding an engine operating point.
#[derive(Debug, Clone, Copy)]
pub struct EquilibriumConfig {
    /// Maximum iteration count for the bisection solve.
    pub max_iters: usize,

    /// Absolute tolerance for the engine speed search variable.
    pub speed_tol: AngularVelocity,

    /// Absolute tolerance for the net torque residual.
    pub torque_tol: Torque,
}

impl Default for EquilibriumConfig {
    fn default() -> Self {
        Self {
            max_iters: 100,
            speed_tol: AngularVelocity::from_rpm(1e-9),
            torque_tol: Torque::new::<newton_meter>(1e-9),
        }
    }
}

impl EquilibriumConfig {
    /// Converts this configuration into a bisection solver configuration.
    pub(super) fn bisection(&self) -> bisection::Config {
        bisection::Config {
            max_iters: self.max_iters,
            x_abs_tol: self.speed_tol.rpm(),
            x_rel_tol: 0.0,
            residual_tol: self.torque_tol.get::<newton_meter>(),
        }
    }
}
