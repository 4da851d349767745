use super::*;
use crate::algebra::*;
use crate::io::PrintTarget;
use crate::solver::core::SolverStatus;
use crate::timers::*;

/// Per-iteration progress of the [`LinIpmSolver`](crate::solver::LinIpmSolver).
///
/// The termination callback receives this struct once per iteration.
#[derive(Default, Debug)]
pub struct LinIpmInfo<T> {
    pub iterations: u32,
    pub cost_primal: T,
    pub cost_dual: T,
    pub gap_rel: T,
    pub res_primal: T,
    pub res_dual: T,
    pub μ: T,
    pub sigma: T,
    /// step length taken in x on the previous iteration
    pub step_primal: T,
    /// step length taken in λ and s on the previous iteration
    pub step_dual: T,
    /// smallest entry of x at the current iterate
    pub min_x: T,
    /// smallest entry of s at the current iterate
    pub min_s: T,
    pub solve_time: f64,
    pub status: SolverStatus,
    /// name of the linear solver backend
    pub linsolver: &'static str,

    // target for all solver output
    pub(crate) stream: PrintTarget,
}

impl<T> LinIpmInfo<T>
where
    T: FloatT,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn reset(&mut self, timers: &mut Timers) {
        self.status = SolverStatus::Unsolved;
        self.iterations = 0;
        self.sigma = T::zero();
        self.step_primal = T::zero();
        self.step_dual = T::zero();
        self.solve_time = 0f64;

        timers.reset_timer("solve");
    }

    pub(crate) fn save_scalars(
        &mut self,
        residuals: &LinIpmResiduals<T>,
        variables: &IpmVector<T>,
        iter: u32,
    ) {
        self.iterations = iter;
        self.cost_primal = residuals.ctx;
        self.cost_dual = residuals.btl;
        self.gap_rel = residuals.gap_rel;
        self.res_primal = residuals.res_primal;
        self.res_dual = residuals.res_dual;
        self.μ = residuals.mu;
        self.min_x = variables.x().minimum();
        self.min_s = variables.s().minimum();
    }

    pub(crate) fn save_step(&mut self, sigma: T, αp: T, αd: T) {
        self.sigma = sigma;
        self.step_primal = αp;
        self.step_dual = αd;
    }

    pub(crate) fn finalize(&mut self, status: SolverStatus, timers: &Timers) {
        self.status = status;
        self.solve_time = timers
            .elapsed(&["solve"])
            .unwrap_or_default()
            .as_secs_f64();
    }
}
