#![allow(non_snake_case)]
use super::{LinearSolver, LinearSolverError, LinearSolverStats};
use crate::algebra::*;
use crate::sparselu::*;
use crate::timers::*;

const NAME: &str = "sparselu";

/// Native sparse LU backend with AMD ordering and threshold pivoting.
pub struct SparseLUSolver<T> {
    factors: Option<SparseLUFactorisation<T>>,
    pivot_tol: T,
    stats: LinearSolverStats,
    timers: Timers,
    verbose: bool,
    timing: bool,
}

impl<T> SparseLUSolver<T>
where
    T: FloatT,
{
    /// New backend with the given pivot threshold in (0, 1].
    pub fn new(pivot_tol: T) -> Self {
        Self {
            factors: None,
            pivot_tol,
            stats: LinearSolverStats::default(),
            timers: Timers::default(),
            verbose: false,
            timing: false,
        }
    }
}

fn _factors_mut<T>(
    factors: &mut Option<SparseLUFactorisation<T>>,
    err: fn(&'static str, String) -> LinearSolverError,
) -> Result<&mut SparseLUFactorisation<T>, LinearSolverError> {
    factors
        .as_mut()
        .ok_or_else(|| err(NAME, "not initialized".to_string()))
}

impl<T> Default for SparseLUSolver<T>
where
    T: FloatT,
{
    fn default() -> Self {
        Self::new((0.1).as_T())
    }
}

fn _setup_error(solver: &'static str, reason: String) -> LinearSolverError {
    LinearSolverError::Setup { solver, reason }
}
fn _factor_error(solver: &'static str, reason: String) -> LinearSolverError {
    LinearSolverError::Factorization { solver, reason }
}
fn _solve_error(solver: &'static str, reason: String) -> LinearSolverError {
    LinearSolverError::Solve { solver, reason }
}

impl<T> LinearSolver<T> for SparseLUSolver<T>
where
    T: FloatT,
{
    fn name(&self) -> &'static str {
        NAME
    }

    fn initialize(
        &mut self,
        mat: &CscMatrix<T>,
        _symmetric: bool,
        verbose: bool,
        timing: bool,
    ) -> Result<(), LinearSolverError> {
        // LU makes no use of symmetry
        self.release();

        let opts = SparseLUSettingsBuilder::default()
            .pivot_tol(self.pivot_tol)
            .build()
            .map_err(|e| _setup_error(NAME, e.to_string()))?;

        let factors = SparseLUFactorisation::new(mat, Some(opts))
            .map_err(|e| _setup_error(NAME, e.to_string()))?;

        self.factors = Some(factors);
        self.stats = LinearSolverStats::default();
        self.timers = Timers::default();
        self.verbose = verbose;
        self.timing = timing;
        Ok(())
    }

    fn factorize(&mut self, mat: &CscMatrix<T>) -> Result<(), LinearSolverError> {
        let factors = _factors_mut(&mut self.factors, _factor_error)?;
        let timers = &mut self.timers;

        let result;
        timeit! {timers => "factor"; {
            result = factors.refactor(mat);
        }}
        let nnz = factors.nnz();

        if self.timing {
            self.stats.factor_time = timers.elapsed(&["factor"]).unwrap_or_default();
        }
        self.stats.factor_count += 1;
        if self.verbose {
            self.stats.nnz_factors = nnz;
        }
        result.map_err(|e| _factor_error(NAME, e.to_string()))
    }

    fn solve(
        &mut self,
        out: &mut [T],
        rhs: &[T],
        transposed: bool,
    ) -> Result<(), LinearSolverError> {
        if out.len() != rhs.len() {
            return Err(_solve_error(NAME, "incompatible dimensions".to_string()));
        }
        let factors = _factors_mut(&mut self.factors, _solve_error)?;
        let timers = &mut self.timers;

        // NB: the factorization solves in place
        out.copy_from(rhs);
        let result;
        timeit! {timers => "solve"; {
            result = if transposed {
                factors.solve_transposed(out)
            } else {
                factors.solve(out)
            };
        }}

        if self.timing {
            self.stats.solve_time = timers.elapsed(&["solve"]).unwrap_or_default();
        }
        self.stats.solve_count += 1;
        result.map_err(|e| _solve_error(NAME, e.to_string()))
    }

    fn release(&mut self) {
        self.factors = None;
    }

    fn is_initialized(&self) -> bool {
        self.factors.is_some()
    }

    fn stats(&self) -> &LinearSolverStats {
        &self.stats
    }
}
