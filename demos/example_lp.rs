#![allow(non_snake_case)]

use linipm::algebra::*;
use linipm::solver::*;

fn problem_data() -> (CscMatrix<f64>, Vec<f64>, Vec<f64>) {
    // maximize 3 x1 + 2 x2 subject to
    //   x1 + x2 <= 4,  x1 - x2 <= 1,  2 x1 + x2 <= 6
    // in standard form with slack variables x3, x4, x5
    let A = CscMatrix::new(
        3,                                           // m
        5,                                           // n
        vec![0, 3, 6, 7, 8, 9],                      // colptr
        vec![0, 1, 2, 0, 1, 2, 0, 1, 2],             // rowval
        vec![1., 1., 2., 1., -1., 1., 1., 1., 1.],   // nzval
    );

    let b = vec![4., 1., 6.];
    let c = vec![-3., -2., 0., 0., 0.];

    (A, b, c)
}

fn main() {
    let (A, b, c) = problem_data();

    let settings = LinIpmSettingsBuilder::default()
        .verbose(true)
        .max_iter(50)
        .build()
        .unwrap();

    let mut solver = LinIpmSolver::new(&A, &b, &c, settings).unwrap();

    match solver.solve() {
        Ok(()) => println!("x = {:?}", solver.x()),
        Err(e) => println!("solve failed: {e}"),
    }
}
