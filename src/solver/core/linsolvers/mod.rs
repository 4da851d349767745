//! Linear solver backends for the Newton systems of the interior point method.
//!
//! A backend factors a square sparse matrix once per iteration and then
//! solves against that factorization any number of times.

use crate::algebra::{CscMatrix, FloatT};
use std::time::Duration;
use thiserror::Error;

mod config;
mod denselu;
mod sparselu;

pub(crate) use config::*;
pub use denselu::*;
pub use sparselu::*;

/// Error type returned by [`LinearSolver`] operations.   Each variant carries
/// the backend name and the backend's own diagnostic.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LinearSolverError {
    #[error("{solver} setup failed: {reason}")]
    Setup { solver: &'static str, reason: String },
    #[error("{solver} factorization failed: {reason}")]
    Factorization { solver: &'static str, reason: String },
    #[error("{solver} solve failed: {reason}")]
    Solve { solver: &'static str, reason: String },
}

/// Counters and (optionally) timings recorded by a backend
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinearSolverStats {
    /// numeric factorizations performed
    pub factor_count: usize,
    /// solves performed
    pub solve_count: usize,
    /// time spent in numeric factorization, if timing is enabled
    pub factor_time: Duration,
    /// time spent in solves, if timing is enabled
    pub solve_time: Duration,
    /// nonzeros in the most recent factors
    pub nnz_factors: usize,
}

/// Sparse direct solver for square, possibly unsymmetric, systems.
///
/// The solver calls [`initialize`](LinearSolver::initialize) once per solve
/// with the first Newton matrix, then [`factorize`](LinearSolver::factorize)
/// every iteration followed by two calls to [`solve`](LinearSolver::solve).
/// The sparsity pattern of the matrix is fixed after `initialize`.
pub trait LinearSolver<T: FloatT> {
    /// backend name, as used in the `direct_solve_method` setting
    fn name(&self) -> &'static str;

    /// Symbolic setup for matrices with the pattern of `mat`.   May be
    /// called again to restart with a new pattern.
    fn initialize(
        &mut self,
        mat: &CscMatrix<T>,
        symmetric: bool,
        verbose: bool,
        timing: bool,
    ) -> Result<(), LinearSolverError>;

    /// Numeric factorization of `mat`
    fn factorize(&mut self, mat: &CscMatrix<T>) -> Result<(), LinearSolverError>;

    /// Solve `M*out = rhs` (or `M^T*out = rhs`) with the current factors
    fn solve(&mut self, out: &mut [T], rhs: &[T], transposed: bool)
        -> Result<(), LinearSolverError>;

    /// Free all factorization resources.  Safe to call more than once.
    fn release(&mut self);

    /// true between `initialize` and `release`
    fn is_initialized(&self) -> bool;

    /// counters and timings collected so far
    fn stats(&self) -> &LinearSolverStats;
}

/// Boxed trait object for a [`LinearSolver`]
pub type BoxedLinearSolver<T> = Box<dyn LinearSolver<T> + Send>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algebra::*;

    fn test_backend(mut solver: BoxedLinearSolver<f64>) {
        #[rustfmt::skip]
        let A = CscMatrix::from(
            &[[0., 2., 1.],
              [1., 0., 3.],
              [4., 1., 0.]]);
        let xref = [1., -2., 3.];

        let mut b = [0.; 3];
        A.gemv(&mut b, &xref, 1., 0.);
        let mut bt = [0.; 3];
        A.t().gemv(&mut bt, &xref, 1., 0.);

        assert!(!solver.is_initialized());
        solver.initialize(&A, false, true, true).unwrap();
        assert!(solver.is_initialized());
        solver.factorize(&A).unwrap();

        let mut x = [0.; 3];
        solver.solve(&mut x, &b, false).unwrap();
        assert!(x.norm_inf_diff(&xref) < 1e-12);

        solver.solve(&mut x, &bt, true).unwrap();
        assert!(x.norm_inf_diff(&xref) < 1e-12);

        let stats = solver.stats();
        assert_eq!((stats.factor_count, stats.solve_count), (1, 2));
        assert!(stats.nnz_factors > 0);

        let mut short = [0.; 2];
        assert!(solver.solve(&mut short, &b, false).is_err());

        solver.release();
        solver.release();
        assert!(!solver.is_initialized());
        assert!(solver.solve(&mut x, &b, false).is_err());
    }

    #[test]
    fn test_sparselu_backend() {
        test_backend(Box::new(SparseLUSolver::<f64>::default()));
    }

    #[test]
    fn test_denselu_backend() {
        test_backend(Box::new(DenseLUSolver::<f64>::new()));
    }

    fn test_backend_timing(mut solver: BoxedLinearSolver<f64>) {
        let A = CscMatrix::from(&[[2., 1.], [1., 3.]]);
        let b = [3., 4.];
        let mut x = [0.; 2];

        // timings stay empty unless requested
        solver.initialize(&A, false, false, false).unwrap();
        solver.factorize(&A).unwrap();
        solver.solve(&mut x, &b, false).unwrap();
        assert_eq!(solver.stats().factor_time, Duration::ZERO);
        assert_eq!(solver.stats().solve_time, Duration::ZERO);

        let start = std::time::Instant::now();
        solver.initialize(&A, false, false, true).unwrap();
        solver.factorize(&A).unwrap();
        solver.solve(&mut x, &b, false).unwrap();
        solver.solve(&mut x, &b, true).unwrap();
        let wall = start.elapsed();

        let stats = solver.stats();
        assert_eq!((stats.factor_count, stats.solve_count), (1, 2));
        assert!(stats.factor_time + stats.solve_time <= wall);
        assert!(x.norm_inf_diff(&[1., 1.]) < 1e-12);
    }

    #[test]
    fn test_sparselu_timing() {
        test_backend_timing(Box::new(SparseLUSolver::<f64>::default()));
    }

    #[test]
    fn test_denselu_timing() {
        test_backend_timing(Box::new(DenseLUSolver::<f64>::new()));
    }
}
