// All sparse matrix representations in the solver and math
// implementations are in standard compressed sparse column format,
// as is the API.  Dense matrices are column major.

/// Matrix orientation marker
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub enum MatrixShape {
    /// Normal matrix orientation
    N,
    /// Transposed matrix orientation
    T,
}

/// Adjoint of a matrix.  Borrows the underlying matrix
/// and changes only the orientation used in products.
#[derive(Debug, Clone, Copy)]
pub struct Adjoint<'a, M> {
    /// The underlying (untransposed) matrix
    pub src: &'a M,
}
