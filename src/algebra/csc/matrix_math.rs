use crate::algebra::*;

impl<T: FloatT> MatrixVectorMultiply for CscMatrix<T> {
    type T = T;

    fn gemv(&self, y: &mut [T], x: &[T], a: T, b: T) {
        _csc_axpby_N(self, y, x, a, b);
    }
}

impl<T: FloatT> MatrixVectorMultiply for Adjoint<'_, CscMatrix<T>> {
    type T = T;

    fn gemv(&self, y: &mut [T], x: &[T], a: T, b: T) {
        _csc_axpby_T(self.src, y, x, a, b);
    }
}

impl<T: FloatT> CscMatrix<T> {
    /// Writes the dense Gram matrix `M = A*A^T` into `M`.
    ///
    /// # Panics
    /// Panics if `M` is not `m x m`.
    #[allow(non_snake_case)]
    pub fn gram_into(&self, M: &mut Matrix<T>) {
        assert_eq!(M.size(), (self.m, self.m));
        M.data_mut().fill(T::zero());

        // each column of A contributes the outer product
        // of its own entries
        for col in 0..self.n {
            let first = self.colptr[col];
            let last = self.colptr[col + 1];
            let rows = &self.rowval[first..last];
            let vals = &self.nzval[first..last];

            for (&rj, &vj) in rows.iter().zip(vals) {
                for (&ri, &vi) in rows.iter().zip(vals) {
                    M[(ri, rj)] += vi * vj;
                }
            }
        }
    }
}

fn _scale_y<T: FloatT>(y: &mut [T], b: T) {
    if b == T::zero() {
        y.fill(T::zero());
    } else if b == T::one() {
    } else if b == -T::one() {
        y.negate();
    } else {
        y.scale(b);
    }
}

// sparse matrix-vector multiply, no transpose
#[allow(non_snake_case)]
fn _csc_axpby_N<T: FloatT>(A: &CscMatrix<T>, y: &mut [T], x: &[T], a: T, b: T) {
    assert_eq!(x.len(), A.n);
    assert_eq!(y.len(), A.m);

    //first do the b*y part
    _scale_y(y, b);

    // if a is zero, we're done
    if a == T::zero() {
        return;
    }

    //y += a*A*x
    if a == T::one() {
        for (j, xj) in x.iter().enumerate() {
            for i in A.colptr[j]..A.colptr[j + 1] {
                y[A.rowval[i]] += A.nzval[i] * *xj;
            }
        }
    } else if a == -T::one() {
        for (j, xj) in x.iter().enumerate() {
            for i in A.colptr[j]..A.colptr[j + 1] {
                y[A.rowval[i]] -= A.nzval[i] * *xj;
            }
        }
    } else {
        for (j, xj) in x.iter().enumerate() {
            for i in A.colptr[j]..A.colptr[j + 1] {
                y[A.rowval[i]] += a * A.nzval[i] * *xj;
            }
        }
    }
}

// sparse matrix-vector multiply, transposed
#[allow(non_snake_case)]
fn _csc_axpby_T<T: FloatT>(A: &CscMatrix<T>, y: &mut [T], x: &[T], a: T, b: T) {
    assert_eq!(x.len(), A.m);
    assert_eq!(y.len(), A.n);

    //first do the b*y part
    _scale_y(y, b);

    // if a is zero, we're done
    if a == T::zero() {
        return;
    }

    //y += a*A'*x
    for (j, yj) in y.iter_mut().enumerate() {
        let mut acc = T::zero();
        for k in A.colptr[j]..A.colptr[j + 1] {
            acc += A.nzval[k] * x[A.rowval[k]];
        }
        *yj += a * acc;
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn test_matrix() -> CscMatrix<f64> {
        #[rustfmt::skip]
        let A = CscMatrix::from(
            &[[1., 0., 2.],
              [0., 3., 4.]]);
        A
    }

    #[test]
    fn test_gemv() {
        let A = test_matrix();
        let x = vec![1., 2., 3.];

        let mut y = vec![1., 1.];
        A.gemv(&mut y, &x, 1., 0.);
        assert_eq!(y, vec![7., 18.]);

        // accumulate variant
        let mut y = vec![1., 1.];
        A.gemv(&mut y, &x, -1., 1.);
        assert_eq!(y, vec![-6., -17.]);

        let mut y = vec![1., 1.];
        A.gemv(&mut y, &x, 2., 3.);
        assert_eq!(y, vec![17., 39.]);
    }

    #[test]
    fn test_gemv_transpose() {
        let A = test_matrix();
        let x = vec![1., -1.];

        let mut y = vec![0.; 3];
        A.t().gemv(&mut y, &x, 1., 0.);
        assert_eq!(y, vec![1., -3., -2.]);

        let mut y = vec![1., 1., 1.];
        A.t().gemv(&mut y, &x, -1., 1.);
        assert_eq!(y, vec![0., 4., 3.]);
    }

    #[test]
    fn test_gram() {
        let A = test_matrix();
        let mut M = Matrix::zeros((2, 2));
        M.data_mut().fill(99.);
        A.gram_into(&mut M);

        #[rustfmt::skip]
        let Mtrue = Matrix::from(
            &[[5.,  8.],
              [8., 25.]]);
        assert_eq!(M, Mtrue);
    }
}
