use thiserror::Error;
use twine_solvers::equation::bisection;
use uom::si::f64::Torque;

/// Errors that can occur while solving for an engine operating point.
#[derive(Debug, Error)]
pub enum EquilibriumError {
    /// The bisection solver encountered an error.
    #[error("bisection solver error")]
    Bisection(#[from] bisection::Error),

    /// The solver reached the iteration limit without converging.
    #[error("solver hit iteration limit: residual={residual:?}")]
    MaxIters {
        /// Net torque at the best speed found.
        residual: Torque,

        /// Iteration count performed by the solver.
        iters: usize,
    },
}
