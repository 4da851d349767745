#![allow(non_snake_case)]

use crate::algebra::{
    Adjoint, CscMatrix, FloatT, MatrixShape, MatrixVectorMultiply, ShapedMatrix, VectorMath,
};
use std::ops::{Index, IndexMut};

/// Dense matrix in column major format
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<T = f64> {
    /// number of rows
    pub m: usize,
    /// number of columns
    pub n: usize,
    /// vector of data in column major format
    pub data: Vec<T>,
}

impl<T> Matrix<T>
where
    T: FloatT,
{
    pub fn zeros(size: (usize, usize)) -> Self {
        let (m, n) = size;
        let data = vec![T::zero(); m * n];
        Self { m, n, data }
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    pub fn t(&self) -> Adjoint<'_, Self> {
        Adjoint { src: self }
    }

    pub fn col_slice(&self, col: usize) -> &[T] {
        assert!(col < self.n);
        &self.data[(col * self.m)..(col + 1) * self.m]
    }

    pub fn col_slice_mut(&mut self, col: usize) -> &mut [T] {
        assert!(col < self.n);
        &mut self.data[(col * self.m)..(col + 1) * self.m]
    }

    #[inline]
    fn index_linear(&self, idx: (usize, usize)) -> usize {
        idx.0 + self.m * idx.1
    }
}

// row major initialization, i.e. Matrix::from(&[[1.,2.],[3.,4.]])
// gives the matrix that reads that way on the page
impl<T, const R: usize, const C: usize> From<&[[T; C]; R]> for Matrix<T>
where
    T: FloatT,
{
    fn from(rows: &[[T; C]; R]) -> Self {
        let mut mat = Matrix::zeros((R, C));
        for (r, row) in rows.iter().enumerate() {
            for (c, &val) in row.iter().enumerate() {
                mat[(r, c)] = val;
            }
        }
        mat
    }
}

impl<T> From<&CscMatrix<T>> for Matrix<T>
where
    T: FloatT,
{
    fn from(A: &CscMatrix<T>) -> Self {
        let mut mat = Matrix::zeros((A.m, A.n));
        for col in 0..A.n {
            for k in A.colptr[col]..A.colptr[col + 1] {
                mat[(A.rowval[k], col)] += A.nzval[k];
            }
        }
        mat
    }
}

impl<T> IndexMut<(usize, usize)> for Matrix<T>
where
    T: FloatT,
{
    fn index_mut(&mut self, idx: (usize, usize)) -> &mut Self::Output {
        let lidx = self.index_linear(idx);
        &mut self.data[lidx]
    }
}

impl<T> Index<(usize, usize)> for Matrix<T>
where
    T: FloatT,
{
    type Output = T;
    fn index(&self, idx: (usize, usize)) -> &Self::Output {
        &self.data[self.index_linear(idx)]
    }
}

impl<T> Index<(usize, usize)> for Adjoint<'_, Matrix<T>>
where
    T: FloatT,
{
    type Output = T;
    fn index(&self, idx: (usize, usize)) -> &Self::Output {
        &self.src[(idx.1, idx.0)]
    }
}

impl<T> ShapedMatrix for Matrix<T>
where
    T: FloatT,
{
    fn nrows(&self) -> usize {
        self.m
    }
    fn ncols(&self) -> usize {
        self.n
    }
    fn shape(&self) -> MatrixShape {
        MatrixShape::N
    }
}

impl<T: FloatT> MatrixVectorMultiply for Matrix<T> {
    type T = T;

    fn gemv(&self, y: &mut [T], x: &[T], a: T, b: T) {
        assert_eq!(x.len(), self.n);
        assert_eq!(y.len(), self.m);
        y.scale(b);
        for (col, &xcol) in x.iter().enumerate() {
            y.axpby(a * xcol, self.col_slice(col), T::one());
        }
    }
}

impl<T: FloatT> MatrixVectorMultiply for Adjoint<'_, Matrix<T>> {
    type T = T;

    fn gemv(&self, y: &mut [T], x: &[T], a: T, b: T) {
        assert_eq!(x.len(), self.src.m);
        assert_eq!(y.len(), self.src.n);
        for (col, yj) in y.iter_mut().enumerate() {
            *yj = a * self.src.col_slice(col).dot(x) + b * (*yj);
        }
    }
}

impl<T> std::fmt::Display for Matrix<T>
where
    T: FloatT,
{
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        writeln!(f)?;
        for i in 0..self.m {
            write!(f, "[ ")?;
            for j in 0..self.n {
                write!(f, " {:?}", self[(i, j)])?;
            }
            writeln!(f, "]")?;
        }
        writeln!(f)?;
        Ok(())
    }
}

#[test]
fn test_dense_gemv() {
    #[rustfmt::skip]
    let A = Matrix::from(
        &[[1., 2., 3.],
          [4., 5., 6.]]);

    let x = vec![1., 1., 1.];
    let mut y = vec![1., 1.];
    A.gemv(&mut y, &x, 1., 2.);
    assert_eq!(y, vec![8., 17.]);

    let x = vec![1., -1.];
    let mut y = vec![0.; 3];
    A.t().gemv(&mut y, &x, 1., 0.);
    assert_eq!(y, vec![-3., -3., -3.]);
}

#[test]
fn test_dense_from_csc() {
    let A = CscMatrix::new(2, 2, vec![0, 1, 3], vec![1, 0, 1], vec![3., 4., 5.]);
    let M = Matrix::from(&A);
    assert_eq!(M.data(), &[0., 3., 4., 5.]);
    assert_eq!(M[(0, 1)], 4.);
    assert_eq!(M.t()[(1, 0)], 4.);
}
