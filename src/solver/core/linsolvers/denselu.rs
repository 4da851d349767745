#![allow(non_snake_case)]
use super::{LinearSolver, LinearSolverError, LinearSolverStats};
use crate::algebra::*;
use crate::timers::*;

const NAME: &str = "dense";

/// Dense LU backend with partial pivoting.  Converts each matrix to
/// dense storage, so it is only suitable for small problems.
pub struct DenseLUSolver<T> {
    engine: Option<(Matrix<T>, LUEngine<T>)>,
    stats: LinearSolverStats,
    timers: Timers,
    timing: bool,
}

impl<T> DenseLUSolver<T>
where
    T: FloatT,
{
    pub fn new() -> Self {
        Self {
            engine: None,
            stats: LinearSolverStats::default(),
            timers: Timers::default(),
            timing: false,
        }
    }
}

impl<T> Default for DenseLUSolver<T>
where
    T: FloatT,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> LinearSolver<T> for DenseLUSolver<T>
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
        _verbose: bool,
        timing: bool,
    ) -> Result<(), LinearSolverError> {
        self.release();
        if !mat.is_square() || mat.nrows() == 0 {
            return Err(LinearSolverError::Setup {
                solver: NAME,
                reason: format!("matrix is {} x {}", mat.nrows(), mat.ncols()),
            });
        }
        let n = mat.nrows();
        self.engine = Some((Matrix::zeros((n, n)), LUEngine::new(n)));
        self.stats = LinearSolverStats::default();
        self.timers = Timers::default();
        self.timing = timing;
        Ok(())
    }

    fn factorize(&mut self, mat: &CscMatrix<T>) -> Result<(), LinearSolverError> {
        let (dense, engine) = self
            .engine
            .as_mut()
            .ok_or_else(|| LinearSolverError::Factorization {
                solver: NAME,
                reason: "not initialized".to_string(),
            })?;

        if mat.size() != dense.size() {
            return Err(LinearSolverError::Factorization {
                solver: NAME,
                reason: "matrix dimension changed".to_string(),
            });
        }

        // scatter into the dense workspace
        dense.data_mut().fill(T::zero());
        for col in 0..mat.n {
            for k in mat.colptr[col]..mat.colptr[col + 1] {
                dense[(mat.rowval[k], col)] += mat.nzval[k];
            }
        }

        let timers = &mut self.timers;
        let result;
        timeit! {timers => "factor"; {
            result = engine.lu(dense);
        }}
        if self.timing {
            self.stats.factor_time = timers.elapsed(&["factor"]).unwrap_or_default();
        }
        self.stats.factor_count += 1;
        self.stats.nnz_factors = dense.m * dense.n;

        result.map_err(|e| LinearSolverError::Factorization {
            solver: NAME,
            reason: e.to_string(),
        })
    }

    fn solve(
        &mut self,
        out: &mut [T],
        rhs: &[T],
        transposed: bool,
    ) -> Result<(), LinearSolverError> {
        let (dense, engine) = self
            .engine
            .as_ref()
            .ok_or_else(|| LinearSolverError::Solve {
                solver: NAME,
                reason: "not initialized".to_string(),
            })?;

        if out.len() != dense.m || rhs.len() != dense.m {
            return Err(LinearSolverError::Solve {
                solver: NAME,
                reason: "incompatible dimensions".to_string(),
            });
        }

        out.copy_from(rhs);
        let timers = &mut self.timers;
        timeit! {timers => "solve"; {
            engine.solve(out, transposed);
        }}
        if self.timing {
            self.stats.solve_time = timers.elapsed(&["solve"]).unwrap_or_default();
        }
        self.stats.solve_count += 1;
        Ok(())
    }

    fn release(&mut self) {
        self.engine = None;
    }

    fn is_initialized(&self) -> bool {
        self.engine.is_some()
    }

    fn stats(&self) -> &LinearSolverStats {
        &self.stats
    }
}
