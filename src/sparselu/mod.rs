//! Native sparse LU factorization for square unsymmetric matrices.
//!
//! Left-looking (Gilbert-Peierls) factorization `P*A*Q = L*U` with
//! threshold partial pivoting and an AMD fill-reducing column ordering.

mod sparselu;
pub use sparselu::*;
