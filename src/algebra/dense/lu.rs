#![allow(non_snake_case)]

use crate::algebra::{DenseFactorizationError, FactorLU, FloatT, Matrix, ShapedMatrix};

/// Dense LU factorization with partial row pivoting, `P*A = L*U`
pub struct LUEngine<T> {
    /// L (unit lower, diagonal implicit) and U packed in one matrix
    pub LU: Matrix<T>,
    /// row permutation.  Row `i` of `P*A` is row `perm[i]` of `A`
    pub perm: Vec<usize>,
}

impl<T> LUEngine<T>
where
    T: FloatT,
{
    pub fn new(n: usize) -> Self {
        let LU = Matrix::<T>::zeros((n, n));
        let perm = (0..n).collect();
        Self { LU, perm }
    }
}

impl<T> FactorLU for LUEngine<T>
where
    T: FloatT,
{
    type T = T;

    fn lu(&mut self, A: &Matrix<T>) -> Result<(), DenseFactorizationError> {
        if A.size() != self.LU.size() || !A.is_square() {
            return Err(DenseFactorizationError::IncompatibleDimension);
        }

        let n = A.nrows();
        self.LU.data_mut().copy_from_slice(A.data());
        let LU = &mut self.LU;
        let perm = &mut self.perm;
        perm.iter_mut().enumerate().for_each(|(i, p)| *p = i);

        for k in 0..n {
            // pivot search in column k
            let mut p = k;
            let mut pmax = LU[(k, k)].abs();
            for i in (k + 1)..n {
                let v = LU[(i, k)].abs();
                if v > pmax {
                    pmax = v;
                    p = i;
                }
            }
            if pmax == T::zero() || !pmax.is_finite() {
                return Err(DenseFactorizationError::LU(k));
            }
            if p != k {
                for j in 0..n {
                    let tmp = LU[(k, j)];
                    LU[(k, j)] = LU[(p, j)];
                    LU[(p, j)] = tmp;
                }
                perm.swap(k, p);
            }

            let pivot = LU[(k, k)];
            for i in (k + 1)..n {
                LU[(i, k)] /= pivot;
            }
            for j in (k + 1)..n {
                let ukj = LU[(k, j)];
                if ukj == T::zero() {
                    continue;
                }
                for i in (k + 1)..n {
                    let lik = LU[(i, k)];
                    LU[(i, j)] -= lik * ukj;
                }
            }
        }
        Ok(())
    }

    fn solve(&self, b: &mut [T], transposed: bool) {
        let LU = &self.LU;
        let n = LU.nrows();
        assert_eq!(b.len(), n);

        let mut x = vec![T::zero(); n];

        if !transposed {
            // L*U*x = P*b
            for i in 0..n {
                x[i] = b[self.perm[i]];
            }
            for j in 0..n {
                let xj = x[j];
                for i in (j + 1)..n {
                    x[i] -= LU[(i, j)] * xj;
                }
            }
            for j in (0..n).rev() {
                x[j] /= LU[(j, j)];
                let xj = x[j];
                for i in 0..j {
                    x[i] -= LU[(i, j)] * xj;
                }
            }
            b.copy_from_slice(&x);
        } else {
            // U^T*L^T*(P*x) = b
            x.copy_from_slice(b);
            for j in 0..n {
                let mut v = x[j];
                for i in 0..j {
                    v -= LU[(i, j)] * x[i];
                }
                x[j] = v / LU[(j, j)];
            }
            for j in (0..n).rev() {
                let mut v = x[j];
                for i in (j + 1)..n {
                    v -= LU[(i, j)] * x[i];
                }
                x[j] = v;
            }
            for i in 0..n {
                b[self.perm[i]] = x[i];
            }
        }
    }
}

#[test]
fn test_lu() {
    use crate::algebra::{MatrixVectorMultiply, VectorMath};

    // zero leading entry forces a row exchange
    #[rustfmt::skip]
    let A = Matrix::from(
        &[[0., 2., 1.],
          [1., 1., 0.],
          [3., 0., 4.]]);

    let mut eng = LUEngine::<f64>::new(3);
    assert!(eng.lu(&A).is_ok());

    let xtrue = vec![1., 2., -1.];
    let mut b = vec![0.; 3];
    A.gemv(&mut b, &xtrue, 1., 0.);
    eng.solve(&mut b, false);
    assert!(b.norm_inf_diff(&xtrue) < 1e-12);

    let mut b = vec![0.; 3];
    A.t().gemv(&mut b, &xtrue, 1., 0.);
    eng.solve(&mut b, true);
    assert!(b.norm_inf_diff(&xtrue) < 1e-12);
}

#[test]
fn test_lu_singular() {
    #[rustfmt::skip]
    let A = Matrix::from(
        &[[1., 2.],
          [2., 4.]]);

    let mut eng = LUEngine::<f64>::new(2);
    assert_eq!(eng.lu(&A), Err(DenseFactorizationError::LU(1)));
}
