#![allow(non_snake_case)]

use linipm::{algebra::*, solver::*};
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

fn test_lp() -> (CscMatrix<f64>, Vec<f64>, Vec<f64>) {
    #[rustfmt::skip]
    let A = CscMatrix::from(
        &[[1.,  1., 1., 0., 0.],
          [1., -1., 0., 1., 0.],
          [2.,  1., 0., 0., 1.]]);
    (A, vec![4., 1., 6.], vec![-3., -2., 0., 0., 0.])
}

fn solve_with(method: &str) -> LinIpmSolver<f64> {
    let (A, b, c) = test_lp();
    let settings = LinIpmSettingsBuilder::default()
        .direct_solve_method(method.to_string())
        .build()
        .unwrap();
    let mut solver = LinIpmSolver::new(&A, &b, &c, settings).unwrap();
    solver.solve().unwrap();
    solver
}

#[test]
fn test_dense_and_sparse_agree() {
    let sparse = solve_with("sparselu");
    let dense = solve_with("dense");
    let auto = solve_with("auto");

    assert_eq!(sparse.info.linsolver, "sparselu");
    assert_eq!(dense.info.linsolver, "dense");
    assert_eq!(auto.info.linsolver, "sparselu");

    assert_eq!(sparse.solution.iterations, dense.solution.iterations);
    assert!(sparse.x().dist(dense.x()) <= 1e-8);
    assert!(sparse.lambda().dist(dense.lambda()) <= 1e-8);
    assert_eq!(sparse.solution.x, auto.solution.x);
}

#[test]
fn test_linear_solver_stats() {
    let solver = solve_with("sparselu");
    let stats = solver.linear_solver_stats();

    // one factorization and two solves per step taken
    let iters = solver.solution.iterations as usize;
    assert_eq!(stats.factor_count, iters);
    assert_eq!(stats.solve_count, 2 * iters);
}

// a backend that counts calls before handing them on
struct CountingSolver {
    inner: SparseLUSolver<f64>,
    factors: Arc<AtomicUsize>,
    releases: Arc<AtomicUsize>,
}

impl LinearSolver<f64> for CountingSolver {
    fn name(&self) -> &'static str {
        "counting"
    }
    fn initialize(
        &mut self,
        mat: &CscMatrix<f64>,
        symmetric: bool,
        verbose: bool,
        timing: bool,
    ) -> Result<(), LinearSolverError> {
        assert!(!symmetric);
        self.inner.initialize(mat, symmetric, verbose, timing)
    }
    fn factorize(&mut self, mat: &CscMatrix<f64>) -> Result<(), LinearSolverError> {
        self.factors.fetch_add(1, Ordering::SeqCst);
        self.inner.factorize(mat)
    }
    fn solve(
        &mut self,
        out: &mut [f64],
        rhs: &[f64],
        transposed: bool,
    ) -> Result<(), LinearSolverError> {
        assert!(!transposed);
        self.inner.solve(out, rhs, transposed)
    }
    fn release(&mut self) {
        self.releases.fetch_add(1, Ordering::SeqCst);
        self.inner.release()
    }
    fn is_initialized(&self) -> bool {
        self.inner.is_initialized()
    }
    fn stats(&self) -> &LinearSolverStats {
        self.inner.stats()
    }
}

#[test]
fn test_custom_linear_solver() {
    let (A, b, c) = test_lp();
    let factors = Arc::new(AtomicUsize::new(0));
    let releases = Arc::new(AtomicUsize::new(0));

    {
        let mut solver = LinIpmSolver::new(&A, &b, &c, LinIpmSettings::default()).unwrap();
        solver.set_linear_solver(Box::new(CountingSolver {
            inner: SparseLUSolver::default(),
            factors: Arc::clone(&factors),
            releases: Arc::clone(&releases),
        }));
        assert_eq!(solver.info.linsolver, "counting");

        solver.solve().unwrap();
        assert!(solver.x().dist(&[2., 2., 0., 1., 0.]) <= 1e-6);
        assert_eq!(
            factors.load(Ordering::SeqCst),
            solver.solution.iterations as usize
        );
        assert_eq!(releases.load(Ordering::SeqCst), 0);
    }

    // released when the solver is dropped
    assert_eq!(releases.load(Ordering::SeqCst), 1);
}

#[test]
fn test_backend_errors() {
    let A = CscMatrix::from(&[[1., 2.], [2., 4.]]);
    let mut out = [0.; 2];

    let mut sparse = SparseLUSolver::<f64>::default();
    let err = sparse.factorize(&A).unwrap_err();
    assert!(matches!(err, LinearSolverError::Factorization { .. }));

    sparse.initialize(&A, false, false, false).unwrap();
    let err = sparse.factorize(&A).unwrap_err();
    assert!(matches!(
        err,
        LinearSolverError::Factorization {
            solver: "sparselu",
            ..
        }
    ));
    let err = sparse.solve(&mut out, &[1., 1.], false).unwrap_err();
    assert!(matches!(err, LinearSolverError::Solve { .. }));

    let mut dense = DenseLUSolver::<f64>::new();
    dense.initialize(&A, false, false, false).unwrap();
    let err = dense.factorize(&A).unwrap_err();
    assert!(matches!(
        err,
        LinearSolverError::Factorization {
            solver: "dense",
            ..
        }
    ));
}
