#![allow(non_snake_case)]

use linipm::{algebra::*, solver::*};
use std::sync::{Arc, Mutex};

fn callback_lp() -> (CscMatrix<f64>, Vec<f64>, Vec<f64>) {
    #[rustfmt::skip]
    let A = CscMatrix::from(
        &[[1.,  1., 1., 0., 0.],
          [1., -1., 0., 1., 0.],
          [2.,  1., 0., 0., 1.]]);
    (A, vec![4., 1., 6.], vec![-3., -2., 0., 0., 0.])
}

// setup a custom termination function
fn callback_r(info: &LinIpmInfo<f64>) -> bool {
    info.iterations >= 3
}

#[test]
fn test_callbacks() {
    let (A, b, c) = callback_lp();
    let mut solver = LinIpmSolver::new(&A, &b, &c, LinIpmSettings::default()).unwrap();

    solver.set_termination_callback(callback_r);
    let err = solver.solve().unwrap_err();
    assert_eq!(err, LinIpmError::CallbackTerminated { iterations: 3 });
    assert_eq!(solver.solution.status, SolverStatus::CallbackTerminated);
    assert_eq!(solver.solution.iterations, 3);

    // turn it off and run again
    solver.unset_termination_callback();
    solver.solve().unwrap();
    assert_eq!(solver.solution.status, SolverStatus::Solved);
}

// record (gap, min x, min s) at every iteration
fn trace(A: &CscMatrix<f64>, b: &[f64], c: &[f64]) -> Vec<(f64, f64, f64)> {
    let mut solver = LinIpmSolver::new(A, b, c, LinIpmSettings::default()).unwrap();

    let history = Arc::new(Mutex::new(Vec::new()));
    let h = Arc::clone(&history);
    solver.set_termination_callback(move |info: &LinIpmInfo<f64>| {
        h.lock()
            .unwrap()
            .push((info.gap_rel, info.min_x, info.min_s));
        false
    });
    solver.solve().unwrap();

    let out = history.lock().unwrap().clone();
    assert_eq!(out.len() as u32, solver.solution.iterations + 1);
    out
}

#[test]
fn test_iterates_stay_interior() {
    let (A, b, c) = callback_lp();
    let history = trace(&A, &b, &c);
    assert!(history.iter().all(|&(_, minx, mins)| minx > 0. && mins > 0.));

    let A = CscMatrix::from(&[[1., 1.]]);
    let history = trace(&A, &[4.], &[-1., -2.]);
    assert!(history.iter().all(|&(_, minx, mins)| minx > 0. && mins > 0.));
}

#[test]
fn test_gap_nonincreasing() {
    let problems = vec![
        callback_lp(),
        (CscMatrix::from(&[[1., 1.]]), vec![4.], vec![-1., -2.]),
        (CscMatrix::from(&[[1., 1., 1.]]), vec![1.], vec![1., 2., 3.]),
    ];

    for (A, b, c) in problems {
        let history = trace(&A, &b, &c);
        assert!(history.windows(2).all(|w| w[1].0 <= w[0].0));
        assert!(history.last().unwrap().0 < 1e-8);
    }
}

#[test]
fn test_repeat_trajectory() {
    let (A, b, c) = callback_lp();
    assert_eq!(trace(&A, &b, &c), trace(&A, &b, &c));
}
