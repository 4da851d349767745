#![allow(non_snake_case)]

// Dense matrices are used only for the normal equations of the
// starting point and by the dense LU backend.

mod cholesky;
mod core;
mod lu;

pub use cholesky::*;
pub use core::*;
pub use lu::*;

use crate::algebra::{DenseFactorizationError, FloatT};

/// Cholesky factorization of a dense symmetric positive definite matrix
pub trait FactorCholesky {
    type T: FloatT;
    /// Factor `A = L*L^T`.   Only the lower triangle of `A` is read.
    fn cholesky(&mut self, A: &Matrix<Self::T>) -> Result<(), DenseFactorizationError>;
    /// Solve `A*x = b` in place using a previously computed factor.
    fn solve(&self, b: &mut [Self::T]);
}

/// LU factorization of a dense square matrix with partial pivoting
pub trait FactorLU {
    type T: FloatT;
    /// Factor `P*A = L*U`
    fn lu(&mut self, A: &Matrix<Self::T>) -> Result<(), DenseFactorizationError>;
    /// Solve `A*x = b` (or `A^T*x = b`) in place using a previously computed factor.
    fn solve(&self, b: &mut [Self::T], transposed: bool);
}
