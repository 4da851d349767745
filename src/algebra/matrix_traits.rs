use crate::algebra::MatrixShape;

/// Dimension queries shared by sparse, dense and adjoint matrices.
pub trait ShapedMatrix {
    /// number of rows
    fn nrows(&self) -> usize;
    /// number of columns
    fn ncols(&self) -> usize;
    /// orientation of the matrix
    fn shape(&self) -> MatrixShape;
    /// (rows, columns) pair
    fn size(&self) -> (usize, usize) {
        (self.nrows(), self.ncols())
    }
    /// true if rows == columns
    fn is_square(&self) -> bool {
        self.nrows() == self.ncols()
    }
}
