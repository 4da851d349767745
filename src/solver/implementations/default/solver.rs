use super::*;
use crate::algebra::*;
use crate::io::ConfigurablePrintTarget;
use crate::solver::core::{
    callbacks::{Callback, SolverCallbacks},
    linsolvers::{get_linear_solver, BoxedLinearSolver, LinearSolverStats},
    ConfigError, LinIpmError, SolverStatus,
};
use crate::timers::*;
use itertools::izip;
use std::io::Write;

/// Primal-dual interior point solver for standard form linear programs
/// ```text
/// minimize    c^T x
/// subject to  Ax = b
///             x >= 0
/// ```
///
/// All working storage, including the linear solver backend, is acquired
/// in [`new`](LinIpmSolver::new) and reused by every call to
/// [`solve`](LinIpmSolver::solve).
pub struct LinIpmSolver<T: FloatT = f64> {
    pub data: LinIpmProblemData<T>,
    /// current iterate `[x; λ; s]`
    pub variables: IpmVector<T>,
    /// negated Newton direction
    pub step: IpmVector<T>,
    pub residuals: LinIpmResiduals<T>,
    pub jacobian: LinIpmJacobian<T>,
    pub info: LinIpmInfo<T>,
    pub solution: LinIpmSolution<T>,
    pub settings: LinIpmSettings<T>,
    linsolver: BoxedLinearSolver<T>,
    timers: Option<Timers>,
    callbacks: SolverCallbacks<LinIpmInfo<T>>,
}

impl<T> LinIpmSolver<T>
where
    T: FloatT,
{
    /// Create a solver for the problem `(A, b, c)`.
    ///
    /// Fails if the dimensions of `A`, `b` and `c` disagree, if either
    /// dimension is zero, if `A` is malformed or if the settings are invalid.
    pub fn new(
        A: &CscMatrix<T>,
        b: &[T],
        c: &[T],
        settings: LinIpmSettings<T>,
    ) -> Result<Self, ConfigError> {
        settings.validate()?;

        let data = LinIpmProblemData::new(A, b, c)?;
        let (nx, nl) = (data.nx, data.nl);

        let linsolver =
            get_linear_solver(&settings.direct_solve_method, settings.lu_pivot_tolerance)?;

        let variables = IpmVector::new(nx, nl);
        let step = IpmVector::new(nx, nl);
        let residuals = LinIpmResiduals::new(nx, nl);

        // pattern only; values are filled at every iteration
        let jacobian = LinIpmJacobian::new(&data, &variables);

        let mut info = LinIpmInfo::new();
        info.linsolver = linsolver.name();

        let solution = LinIpmSolution::new(nx, nl);

        Ok(Self {
            data,
            variables,
            step,
            residuals,
            jacobian,
            info,
            solution,
            settings,
            linsolver,
            timers: Some(Timers::default()),
            callbacks: SolverCallbacks::default(),
        })
    }

    /// Create a solver with default settings overridden by `(name, value)`
    /// options.   See [`LinIpmSettings::apply_params`].
    pub fn new_with_params(
        A: &CscMatrix<T>,
        b: &[T],
        c: &[T],
        params: &[(&str, f64)],
    ) -> Result<Self, ConfigError> {
        let mut settings = LinIpmSettings::default();
        settings.apply_params(params)?;
        Self::new(A, b, c, settings)
    }

    /// Run the solver.
    ///
    /// On success the optimal point is available from [`x`](LinIpmSolver::x),
    /// [`lambda`](LinIpmSolver::lambda), [`s`](LinIpmSolver::s) and the
    /// [`solution`](LinIpmSolver::solution) field.  Errors from the linear
    /// solver are returned immediately.   Reaching the iteration limit
    /// returns [`LinIpmError::Convergence`].
    pub fn solve(&mut self) -> Result<(), LinIpmError> {
        //timers is stored as an option so that
        //we can swap it out here and avoid
        //borrow conflicts with other fields.
        let mut timers = self.timers.take().unwrap_or_default();

        // print failures never stop the solver
        notimeit! {timers; {
            let _ = self.info.print_banner(&self.settings);
            let _ = self.info.print_configuration(&self.settings, &self.data);
            let _ = self.info.print_status_header(&self.settings);
        }}

        self.info.reset(&mut timers);

        let mut result: Result<(), LinIpmError> = Ok(());

        timeit! {timers => "solve"; {

        timeit!{timers => "start point"; {
            if let Err(e) = self.variables.start_point(&self.data) {
                result = Err(e.into());
            }
        }}

        if result.is_ok() {
            timeit!{timers => "IP iteration"; {
                result = self.iterate(&mut timers);
            }}
        }

        }} // end "solve" timer

        let status = match result {
            Ok(()) => SolverStatus::Solved,
            Err(ref e) => e.status(),
        };
        self.info.finalize(status, &timers);
        self.solution
            .finalize(&self.data, &self.variables, &self.info);

        let _ = self.info.print_footer(&self.settings, self.linsolver.stats());

        //stow the timers back into Option in the solver struct
        self.timers.replace(timers);

        result
    }

    // main loop
    fn iterate(&mut self, timers: &mut Timers) -> Result<(), LinIpmError> {
        for iter in 0..self.settings.max_iter {
            self.residuals.update(&self.variables, &self.data);
            self.info
                .save_scalars(&self.residuals, &self.variables, iter);

            notimeit! {timers; {
                let _ = self.info.print_status(&self.settings);
            }}

            if self.callbacks.check_termination(&self.info) {
                return Err(LinIpmError::CallbackTerminated { iterations: iter });
            }

            if self.residuals.is_converged(&self.data, &self.settings) {
                return Ok(());
            }

            self.predictor_corrector(iter == 0, timers)?;
        }

        self.info.iterations = self.settings.max_iter;
        Err(LinIpmError::Convergence {
            iterations: self.settings.max_iter,
        })
    }

    fn predictor_corrector(&mut self, first: bool, timers: &mut Timers) -> Result<(), LinIpmError> {
        timeit! {timers => "jacobian"; {
            self.jacobian.update(&self.data, &self.variables);
        }}

        // symbolic setup once per solve
        if first {
            let verbose = self.settings.verbose;
            let result;
            timeit! {timers => "kkt init"; {
                result = self.linsolver.initialize(&self.jacobian.J, false, verbose, verbose);
            }}
            result?;
        }

        let result;
        timeit! {timers => "kkt factor"; {
            result = self.linsolver.factorize(&self.jacobian.J);
        }}
        result?;

        // affine scaling (predictor) direction
        self.kkt_solve(timers)?;

        let (αx, αs) = self.variables.ratio_test(&self.step);
        let αp = T::min(T::one(), αx);
        let αd = T::min(T::one(), αs);

        let μ = self.residuals.mu;
        let μaff = self.variables.mu_affine(&self.step, αp, αd);
        let σ = if μ > T::zero() {
            T::powi(μaff / μ, 3)
        } else {
            T::zero()
        };

        // corrector: rs += dx∘ds - σμ
        {
            let (dx, _, ds) = self.step.split();
            let rs = self.residuals.r.s_mut();
            for (r, &dx, &ds) in izip!(rs, dx, ds) {
                *r += dx * ds - σ * μ;
            }
        }
        self.kkt_solve(timers)?;

        let (αx, αs) = self.variables.ratio_test(&self.step);
        let frac = self.settings.max_step_fraction;
        let αp = T::min(T::one(), frac * αx);
        let αd = T::min(T::one(), frac * αs);

        self.variables.add_step(&self.step, αp, αd);
        self.info.save_step(σ, αp, αd);

        Ok(())
    }

    // solves J*step = r with the current factors
    fn kkt_solve(&mut self, timers: &mut Timers) -> Result<(), LinIpmError> {
        let result;
        timeit! {timers => "kkt solve"; {
            result = self.linsolver.solve(&mut self.step.data, &self.residuals.r.data, false);
        }}
        result?;
        Ok(())
    }

    /// primal solution of the last solve
    pub fn x(&self) -> &[T] {
        &self.solution.x
    }

    /// equality constraint multipliers of the last solve
    pub fn lambda(&self) -> &[T] {
        &self.solution.lambda
    }

    /// dual slacks of the last solve
    pub fn s(&self) -> &[T] {
        &self.solution.s
    }

    /// Replace the linear solver backend with a user supplied one.
    /// The previous backend is released.
    pub fn set_linear_solver(&mut self, linsolver: BoxedLinearSolver<T>) {
        self.linsolver.release();
        self.linsolver = linsolver;
        self.info.linsolver = self.linsolver.name();
    }

    /// counters and timings of the linear solver backend
    pub fn linear_solver_stats(&self) -> &LinearSolverStats {
        self.linsolver.stats()
    }

    /// Print the time spent in each phase of the last solve
    pub fn print_timers(&mut self) -> std::io::Result<()> {
        match self.timers {
            Some(ref timers) => timers.print(&mut self.info.stream),
            None => Ok(()),
        }
    }

    /// Set a function called at every iteration with the current
    /// [`LinIpmInfo`].  Returning `true` stops the solve.
    pub fn set_termination_callback<F>(&mut self, callback: F)
    where
        F: FnMut(&LinIpmInfo<T>) -> bool + Send + 'static,
    {
        self.callbacks.termination_callback = Callback::Rust(Box::new(callback));
    }

    pub fn unset_termination_callback(&mut self) {
        self.callbacks.termination_callback = Callback::None;
    }

    /// Release the linear solver factors.  The solver can still be
    /// solved again afterwards, at the cost of a new symbolic setup.
    pub fn release(&mut self) {
        self.linsolver.release();
    }
}

impl<T> Drop for LinIpmSolver<T>
where
    T: FloatT,
{
    fn drop(&mut self) {
        self.release();
    }
}

impl<T> ConfigurablePrintTarget for LinIpmSolver<T>
where
    T: FloatT,
{
    fn print_to_stdout(&mut self) {
        self.info.print_to_stdout()
    }
    fn print_to_file(&mut self, file: std::fs::File) {
        self.info.print_to_file(file)
    }
    fn print_to_stream(&mut self, stream: Box<dyn Write + Send + Sync>) {
        self.info.print_to_stream(stream)
    }
    fn print_to_sink(&mut self) {
        self.info.print_to_sink()
    }
    fn print_to_buffer(&mut self) {
        self.info.print_to_buffer()
    }
    fn get_print_buffer(&mut self) -> std::io::Result<String> {
        self.info.get_print_buffer()
    }
}
