#![allow(non_snake_case)]

use crate::algebra::{DenseFactorizationError, FactorCholesky, FloatT, Matrix, ShapedMatrix};

/// Dense Cholesky factorization `A = L*L^T`
pub struct CholeskyEngine<T> {
    /// lower triangular factor (stored as square dense)
    pub L: Matrix<T>,
}

impl<T> CholeskyEngine<T>
where
    T: FloatT,
{
    pub fn new(n: usize) -> Self {
        let L = Matrix::<T>::zeros((n, n));
        Self { L }
    }
}

impl<T> FactorCholesky for CholeskyEngine<T>
where
    T: FloatT,
{
    type T = T;

    // column oriented (left looking) factorization. Fails
    // on the first column with a non-positive pivot.
    fn cholesky(&mut self, A: &Matrix<T>) -> Result<(), DenseFactorizationError> {
        if A.size() != self.L.size() || !A.is_square() {
            return Err(DenseFactorizationError::IncompatibleDimension);
        }

        let n = A.nrows();
        let L = &mut self.L;
        L.data_mut().fill(T::zero());

        for j in 0..n {
            let mut d = A[(j, j)];
            for k in 0..j {
                d -= L[(j, k)] * L[(j, k)];
            }
            if !(d > T::zero()) || !d.is_finite() {
                return Err(DenseFactorizationError::Cholesky(j));
            }
            let ljj = d.sqrt();
            L[(j, j)] = ljj;

            for i in (j + 1)..n {
                let mut v = A[(i, j)];
                for k in 0..j {
                    v -= L[(i, k)] * L[(j, k)];
                }
                L[(i, j)] = v / ljj;
            }
        }
        Ok(())
    }

    fn solve(&self, b: &mut [T]) {
        let L = &self.L;
        let n = L.nrows();
        assert_eq!(b.len(), n);

        // L*y = b
        for j in 0..n {
            b[j] /= L[(j, j)];
            let bj = b[j];
            for i in (j + 1)..n {
                b[i] -= L[(i, j)] * bj;
            }
        }
        // L^T*x = y
        for j in (0..n).rev() {
            let mut v = b[j];
            for i in (j + 1)..n {
                v -= L[(i, j)] * b[i];
            }
            b[j] = v / L[(j, j)];
        }
    }
}

#[test]
fn test_cholesky() {
    use crate::algebra::{MatrixVectorMultiply, VectorMath};

    #[rustfmt::skip]
    let S = Matrix::from(
        &[[ 8., -2., 4.],
          [-2., 12., 2.],
          [ 4.,  2., 6.]]);

    let mut eng = CholeskyEngine::<f64>::new(3);
    assert!(eng.cholesky(&S).is_ok());

    // L*L^T reproduces S
    for i in 0..3 {
        for j in 0..3 {
            let v: f64 = (0..3).map(|k| eng.L[(i, k)] * eng.L[(j, k)]).sum();
            assert!((v - S[(i, j)]).abs() < 1e-12);
        }
    }

    let xtrue = vec![1., -2., 3.];
    let mut b = vec![0.; 3];
    S.gemv(&mut b, &xtrue, 1., 0.);
    eng.solve(&mut b);
    assert!(b.norm_inf_diff(&xtrue) < 1e-10);
}

#[test]
fn test_cholesky_indefinite() {
    #[rustfmt::skip]
    let S = Matrix::from(
        &[[1., 2.],
          [2., 1.]]);

    let mut eng = CholeskyEngine::<f64>::new(2);
    assert_eq!(
        eng.cholesky(&S),
        Err(DenseFactorizationError::Cholesky(1))
    );

    let mut eng = CholeskyEngine::<f64>::new(3);
    assert_eq!(
        eng.cholesky(&S),
        Err(DenseFactorizationError::IncompatibleDimension)
    );
}
