#![cfg(feature = "serde")]
#![allow(non_snake_case)]

use linipm::{algebra::*, solver::*};
use std::io::{Seek, SeekFrom};

#[test]
fn test_json_io() {
    #[rustfmt::skip]
    let A = CscMatrix::from(
        &[[1., 2., 1., 0.],
          [3., 1., 0., 1.]]);
    let b = [8., 9.];
    let c = [-2., -3., 0., 0.];

    let settings = LinIpmSettingsBuilder::default()
        .direct_solve_method("dense".to_string())
        .max_iter(40)
        .build()
        .unwrap();
    let mut solver = LinIpmSolver::new(&A, &b, &c, settings).unwrap();
    solver.solve().unwrap();

    let mut file = tempfile::tempfile().unwrap();
    solver.save_to_file(&mut file).unwrap();

    file.seek(SeekFrom::Start(0)).unwrap();
    let mut solver2 = LinIpmSolver::<f64>::load_from_file(&mut file).unwrap();
    assert_eq!(solver2.settings.direct_solve_method, "dense");
    assert_eq!(solver2.settings.max_iter, 40);
    assert_eq!(solver2.data.b, b);

    solver2.solve().unwrap();
    assert_eq!(solver.solution.x, solver2.solution.x);
    assert!(solver2.x().dist(&[2., 3., 0., 0.]) <= 1e-6);
}
