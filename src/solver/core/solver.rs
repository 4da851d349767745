use crate::solver::core::{linsolvers::LinearSolverError, ConfigError};
use thiserror::Error;

// ---------------------------------
// Solver status type
// ---------------------------------

/// Status of solver at termination

#[repr(u32)]
#[derive(PartialEq, Eq, Clone, Debug, Copy, Default)]
pub enum SolverStatus {
    /// Problem is not solved (solver hasn't run).
    #[default]
    Unsolved,
    /// Solver terminated with a solution.
    Solved,
    /// Iteration limit reached before the duality gap tolerance was met.
    MaxIterations,
    /// Solver terminated with a numerical error in the starting point or a linear solve
    NumericalError,
    /// Solver terminated by a user callback
    CallbackTerminated,
}

impl std::fmt::Display for SolverStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

// ---------------------------------
// Solver error type
// ---------------------------------

/// Error type returned by [`LinIpmSolver`](crate::solver::LinIpmSolver) setup and solve

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LinIpmError {
    /// Bad problem data or settings
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Setup, factorization or solve failure of the linear algebra
    #[error(transparent)]
    LinearSolver(#[from] LinearSolverError),
    /// The iteration limit was reached
    #[error("iterations did not converge ({iterations} iterations)")]
    Convergence { iterations: u32 },
    /// The user termination callback requested a stop
    #[error("solve terminated by callback after {iterations} iterations")]
    CallbackTerminated { iterations: u32 },
}

impl LinIpmError {
    /// Solver status implied by this error
    pub fn status(&self) -> SolverStatus {
        match self {
            LinIpmError::Config(_) => SolverStatus::Unsolved,
            LinIpmError::LinearSolver(_) => SolverStatus::NumericalError,
            LinIpmError::Convergence { .. } => SolverStatus::MaxIterations,
            LinIpmError::CallbackTerminated { .. } => SolverStatus::CallbackTerminated,
        }
    }
}

#[test]
fn test_error_status() {
    let e = LinIpmError::Convergence { iterations: 0 };
    assert_eq!(e.status(), SolverStatus::MaxIterations);
    assert_eq!(e.to_string(), "iterations did not converge (0 iterations)");

    let e: LinIpmError = ConfigError::BadFieldValue("tol").into();
    assert_eq!(e.status(), SolverStatus::Unsolved);
    assert_eq!(e.to_string(), "Bad value for field \"tol\"");

    assert_eq!(SolverStatus::default(), SolverStatus::Unsolved);
    assert_eq!(SolverStatus::CallbackTerminated.to_string(), "CallbackTerminated");
}
