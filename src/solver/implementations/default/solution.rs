use super::*;
use crate::algebra::*;
use crate::solver::core::SolverStatus;

/// Solution returned by the [`LinIpmSolver`](crate::solver::LinIpmSolver).
///
/// After an unsuccessful solve the vectors hold the last iterate and
/// `status` says why the solver stopped.
#[derive(Debug, Clone, Default)]
pub struct LinIpmSolution<T> {
    /// primal variables
    pub x: Vec<T>,
    /// multipliers of the equality constraints
    pub lambda: Vec<T>,
    /// dual slacks
    pub s: Vec<T>,
    /// primal objective `c^T x`
    pub obj_val: T,
    /// dual objective `b^T λ`
    pub obj_val_dual: T,
    pub status: SolverStatus,
    pub iterations: u32,
    pub solve_time: f64,
    /// `‖Ax - b‖∞` at the returned point
    pub r_prim: T,
    /// `‖A^T λ + s - c‖∞` at the returned point
    pub r_dual: T,
}

impl<T> LinIpmSolution<T>
where
    T: FloatT,
{
    pub fn new(nx: usize, nl: usize) -> Self {
        Self {
            x: vec![T::zero(); nx],
            lambda: vec![T::zero(); nl],
            s: vec![T::zero(); nx],
            ..Default::default()
        }
    }

    pub(crate) fn finalize(
        &mut self,
        data: &LinIpmProblemData<T>,
        variables: &IpmVector<T>,
        info: &LinIpmInfo<T>,
    ) {
        let (x, l, s) = variables.split();
        self.x.copy_from(x);
        self.lambda.copy_from(l);
        self.s.copy_from(s);

        self.obj_val = data.c.dot(x);
        self.obj_val_dual = data.b.dot(l);

        // residuals at the returned point, which may differ from
        // the last ones evaluated if the iteration limit was hit
        let mut rl = data.b.clone();
        data.A.gemv(&mut rl, x, T::one(), -T::one());
        self.r_prim = rl.norm_inf();

        let mut rx = vec![T::zero(); data.nx];
        rx.waxpby(T::one(), s, -T::one(), &data.c);
        data.A.t().gemv(&mut rx, l, T::one(), T::one());
        self.r_dual = rx.norm_inf();

        self.status = info.status;
        self.iterations = info.iterations;
        self.solve_time = info.solve_time;
    }
}
