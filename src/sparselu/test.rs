use super::*;
use crate::algebra::{CscMatrix, Matrix, MatrixVectorMultiply, VectorMath};

// tests some of the private functions of the sparse LU.  Configured
// as submodule of sparselu.rs to expose internals.

fn test_matrix_4x4() -> CscMatrix<f64> {
    // A =
    //[ 0.0   2.0    ⋅    1.0]
    //[ 3.0    ⋅    1.0    ⋅ ]
    //[  ⋅    1.0   4.0    ⋅ ]
    //[ 1.0    ⋅     ⋅    2.0]
    //
    // zero on the (1,1) diagonal forces a row exchange
    #[rustfmt::skip]
    let A = CscMatrix::from(
        &[[0., 2., 0., 1.],
          [3., 0., 1., 0.],
          [0., 1., 4., 0.],
          [1., 0., 0., 2.]]);
    A
}

// an unsymmetric KKT matrix of the form [0 A' I; A 0 0; S 0 X]
fn test_kkt_matrix() -> CscMatrix<f64> {
    let n = 3;
    let m = 2;
    #[rustfmt::skip]
    let A = CscMatrix::from(
        &[[1., 1., 0.],
          [0., 1., 1.]]);
    let x = [0.5, 1.0, 2.0];
    let s = [1.5, 0.25, 0.1];

    let ny = 2 * n + m;
    let mut trip = TripletMatrix::new(ny, ny, 2 * A.nnz() + 3 * n);
    trip.put_matrix_and_transpose(&A);
    for i in 0..n {
        trip.put(i, n + m + i, 1.);
        trip.put(n + m + i, i, s[i]);
        trip.put(n + m + i, n + m + i, x[i]);
    }
    trip.to_csc()
}

fn check_solves(A: &CscMatrix<f64>, lu: &mut SparseLUFactorisation<f64>) {
    let n = A.n;
    let xtrue: Vec<f64> = (0..n).map(|i| (i as f64) - 1.5).collect();

    let mut b = vec![0.; n];
    A.gemv(&mut b, &xtrue, 1., 0.);
    lu.solve(&mut b).unwrap();
    assert!(b.norm_inf_diff(&xtrue) < 1e-10);

    let mut b = vec![0.; n];
    A.t().gemv(&mut b, &xtrue, 1., 0.);
    lu.solve_transposed(&mut b).unwrap();
    assert!(b.norm_inf_diff(&xtrue) < 1e-10);
}

#[test]
fn test_invperm() {
    let perm = vec![3, 0, 2, 1];
    assert_eq!(_invperm(&perm).unwrap(), vec![1, 3, 2, 0]);
}

//test fail on bad permutation
#[test]
fn test_invperm_bad_perm1() {
    let perm = vec![3, 0, 2, 0]; //repeated index
    assert!(_invperm(&perm).is_err())
}

#[test]
fn test_invperm_bad_perm2() {
    let perm = vec![4, 0, 2, 1]; //index too big
    assert!(_invperm(&perm).is_err())
}

#[test]
fn test_permute() {
    let perm = vec![3, 0, 2, 1];
    let b = vec![1., 2., 3., 4.];
    let mut x = vec![0.; 4];
    let mut y = vec![0.; 4];

    _permute(&mut x, &b, &perm);
    assert_eq!(x, vec![4., 1., 3., 2.]);

    _ipermute(&mut y, &x, &perm);
    assert_eq!(y, b);
}

#[test]
fn test_triangular_solves() {
    // L = [1 0; 2 1], U = [3 1; 0 2]
    let L = CscMatrix::new(2, 2, vec![0, 2, 3], vec![0, 1, 1], vec![1., 2., 1.]);
    let U = CscMatrix::new(2, 2, vec![0, 1, 3], vec![0, 0, 1], vec![3., 1., 2.]);

    let mut x = vec![1., 4.];
    _lsolve(&L, &mut x);
    assert_eq!(x, vec![1., 2.]);
    _ltsolve(&L, &mut x);
    assert_eq!(x, vec![-3., 2.]);

    let mut x = vec![5., 4.];
    _usolve(&U, &mut x);
    assert_eq!(x, vec![1., 2.]);
    _utsolve(&U, &mut x);
    assert!(x.norm_inf_diff(&[1. / 3., 5. / 6.]) < 1e-15);
}

#[test]
fn test_solve_natural_ordering() {
    let A = test_matrix_4x4();
    let opts = SparseLUSettingsBuilder::default()
        .perm(vec![0, 1, 2, 3])
        .build()
        .unwrap();
    let mut lu = SparseLUFactorisation::new(&A, Some(opts)).unwrap();
    lu.refactor(&A).unwrap();

    // first pivot cannot be the zero diagonal
    assert_ne!(lu.pinv[0], 0);
    check_solves(&A, &mut lu);
}

#[test]
fn test_solve_amd_ordering() {
    let A = test_matrix_4x4();
    let mut lu = SparseLUFactorisation::new(&A, None).unwrap();
    lu.refactor(&A).unwrap();
    check_solves(&A, &mut lu);
}

#[test]
fn test_factors_reproduce_matrix() {
    let A = test_kkt_matrix();
    let n = A.n;
    let mut lu = SparseLUFactorisation::new(&A, None).unwrap();
    lu.refactor(&A).unwrap();

    // P*A*Q = L*U
    let Ld = Matrix::from(&lu.L);
    let Ud = Matrix::from(&lu.U);
    let Ad = Matrix::from(&A);
    for i in 0..n {
        for j in 0..n {
            let lu_ij: f64 = (0..n).map(|k| Ld[(i, k)] * Ud[(k, j)]).sum();
            let row = lu.pinv.iter().position(|&p| p == i).unwrap();
            let col = lu.q[j];
            assert!((lu_ij - Ad[(row, col)]).abs() < 1e-12);
        }
    }
    check_solves(&A, &mut lu);
}

#[test]
fn test_refactor_new_values() {
    let mut A = test_kkt_matrix();
    let mut lu = SparseLUFactorisation::new(&A, None).unwrap();
    lu.refactor(&A).unwrap();
    check_solves(&A, &mut lu);

    // same pattern, different values
    A.nzval.iter_mut().enumerate().for_each(|(i, v)| *v *= 1. + 0.1 * (i as f64));
    lu.refactor(&A).unwrap();
    check_solves(&A, &mut lu);
}

#[test]
fn test_singular() {
    #[rustfmt::skip]
    let A = CscMatrix::from(
        &[[1., 2., 0.],
          [2., 4., 0.],
          [0., 0., 1.]]);
    let opts = SparseLUSettingsBuilder::default()
        .perm(vec![0, 1, 2])
        .build()
        .unwrap();
    let mut lu = SparseLUFactorisation::new(&A, Some(opts)).unwrap();
    assert_eq!(lu.refactor(&A), Err(SparseLUError::SingularMatrix(1)));

    // structurally singular, empty column
    let B = CscMatrix::new(2, 2, vec![0, 2, 2], vec![0, 1], vec![1., 1.]);
    let mut lu = SparseLUFactorisation::new(&B, None).unwrap();
    assert!(matches!(
        lu.refactor(&B),
        Err(SparseLUError::SingularMatrix(_))
    ));
}

#[test]
fn test_not_factored() {
    let A = test_matrix_4x4();
    let mut lu = SparseLUFactorisation::new(&A, None).unwrap();
    let mut b = vec![1.; 4];
    assert_eq!(lu.solve(&mut b), Err(SparseLUError::NotFactored));
    assert_eq!(lu.nnz(), 0);

    lu.refactor(&A).unwrap();
    let mut b = vec![1.; 3];
    assert_eq!(lu.solve(&mut b), Err(SparseLUError::IncompatibleDimension));
    assert!(lu.nnz() >= A.nnz());
}

#[test]
fn test_bad_structure() {
    let A = CscMatrix::<f64>::spalloc(2, 3, 0);
    assert_eq!(
        SparseLUFactorisation::new(&A, None).unwrap_err(),
        SparseLUError::IncompatibleDimension
    );
}
