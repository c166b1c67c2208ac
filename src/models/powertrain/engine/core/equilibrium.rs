//! Steady-state operating point of the engine.
//!
//! At a fixed throttle and load the engine settles where the smoothed output
//! torque, the load, and drag cancel. This module finds that speed with a
//! bisection solve over the governed speed range `[idle, max]`.

mod config;
mod error;
mod problem;

pub use config::EquilibriumConfig;
pub use error::EquilibriumError;

use log::debug;
use twine_solvers::equation::bisection;
use uom::si::{
    f64::{AngularVelocity, Torque},
    torque::newton_meter,
};

use crate::support::units::ShaftSpeed;

use super::EngineParams;

use problem::{BalanceModel, BalanceProblem};

/// Where the engine settles for a fixed throttle and load.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OperatingPoint {
    /// Net torque is non-positive at idle; an engine started from idle is
    /// held there by the idle governor.
    ///
    /// Net torque may still turn positive higher in the range, so an engine
    /// that is already spinning can settle at a faster stable point.
    Idle,

    /// Net torque crosses zero inside the governed range.
    Balanced {
        /// Steady-state speed.
        speed: AngularVelocity,

        /// Steady-state output torque.
        torque: Torque,
    },

    /// Net torque is non-negative at the max speed; the limiter holds it there.
    RevLimit,
}

/// Solves for the operating point of an engine.
///
/// # Errors
///
/// Returns [`EquilibriumError`] if the bisection solve fails or does not converge.
pub(super) fn equilibrium(
    params: &EngineParams,
    throttle: f64,
    load: Torque,
    config: EquilibriumConfig,
) -> Result<OperatingPoint, EquilibriumError> {
    let model = BalanceModel::new(params, throttle.clamp(0.0, 1.0), load);

    let idle = params.idle_speed();
    let max = params.max_speed();

    if model.balance(idle).net_torque.get::<newton_meter>() <= 0.0 {
        debug!("engine equilibrium: idle governed, throttle={throttle:.3}");
        return Ok(OperatingPoint::Idle);
    }
    if model.balance(max).net_torque.get::<newton_meter>() >= 0.0 {
        debug!("engine equilibrium: rev limited, throttle={throttle:.3}");
        return Ok(OperatingPoint::RevLimit);
    }

    let solution = bisection::solve(
        &model,
        &BalanceProblem,
        [idle.rpm(), max.rpm()],
        &config.bisection(),
        |_event: &bisection::Event<'_, _, _>| None,
    )?;

    if solution.status != bisection::Status::Converged {
        return Err(EquilibriumError::MaxIters {
            residual: Torque::new::<newton_meter>(solution.residual),
            iters: solution.iters,
        });
    }

    let balance = solution.snapshot.output;
    debug!(
        "engine equilibrium: {:.1} rpm after {} iterations",
        balance.speed.rpm(),
        solution.iters
    );

    Ok(OperatingPoint::Balanced {
        speed: balance.speed,
        torque: balance.torque,
    })
}
