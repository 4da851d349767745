#![allow(non_snake_case)]

use crate::algebra::{CscMatrix, FloatT, MatrixShape};

/// Sparse matrix in triplet (coordinate) format, used to assemble
/// matrices from blocks before conversion to [`CscMatrix`].
///
/// The capacity is fixed at construction.  Repeated (row, col) entries
/// are summed on conversion.
#[derive(Debug, Clone)]
pub struct TripletMatrix<T = f64> {
    /// number of rows
    pub m: usize,
    /// number of columns
    pub n: usize,
    rows: Vec<usize>,
    cols: Vec<usize>,
    vals: Vec<T>,
    capacity: usize,
}

impl<T> TripletMatrix<T>
where
    T: FloatT,
{
    /// an empty `m x n` triplet with room for `capacity` entries
    pub fn new(m: usize, n: usize, capacity: usize) -> Self {
        Self {
            m,
            n,
            rows: Vec::with_capacity(capacity),
            cols: Vec::with_capacity(capacity),
            vals: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// number of entries inserted since the last [`start`](TripletMatrix::start)
    pub fn len(&self) -> usize {
        self.vals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vals.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Clear all entries, keeping the allocation.
    pub fn start(&mut self) {
        self.rows.clear();
        self.cols.clear();
        self.vals.clear();
    }

    /// Insert a value at (row, col).
    ///
    /// # Panics
    /// Panics if the triplet is full or the index is out of bounds.
    pub fn put(&mut self, row: usize, col: usize, value: T) {
        assert!(
            self.len() < self.capacity,
            "triplet capacity {} exceeded",
            self.capacity
        );
        assert!(row < self.m && col < self.n, "triplet index out of bounds");
        self.rows.push(row);
        self.cols.push(col);
        self.vals.push(value);
    }

    /// Insert all structural entries of `A` (or of `A^T`) with its
    /// top left corner at (`rowoff`, `coloff`).
    pub fn put_block(&mut self, A: &CscMatrix<T>, rowoff: usize, coloff: usize, shape: MatrixShape) {
        for col in 0..A.n {
            for k in A.colptr[col]..A.colptr[col + 1] {
                let row = A.rowval[k];
                match shape {
                    MatrixShape::N => self.put(rowoff + row, coloff + col, A.nzval[k]),
                    MatrixShape::T => self.put(rowoff + col, coloff + row, A.nzval[k]),
                }
            }
        }
    }

    /// Insert `A` and its transpose into the block pattern
    /// ```text
    /// [ .  A^T ]
    /// [ A   .  ]
    /// ```
    /// i.e. `A` at rows starting at `A.n` and `A^T` at columns
    /// starting at `A.n`.
    pub fn put_matrix_and_transpose(&mut self, A: &CscMatrix<T>) {
        self.put_block(A, A.n, 0, MatrixShape::N);
        self.put_block(A, 0, A.n, MatrixShape::T);
    }

    /// Convert to CSC, summing duplicates.   Also returns a map
    /// from each triplet entry to its position in `nzval`, for use
    /// with [`update_csc_values`](TripletMatrix::update_csc_values).
    pub fn to_csc_with_map(&self) -> (CscMatrix<T>, Vec<usize>) {
        let nentries = self.len();

        let mut order: Vec<usize> = (0..nentries).collect();
        order.sort_by_key(|&k| (self.cols[k], self.rows[k]));

        let mut map = vec![0; nentries];
        let mut colptr = vec![0; self.n + 1];
        let mut rowval = Vec::with_capacity(nentries);
        let mut nzval: Vec<T> = Vec::with_capacity(nentries);

        let mut last: Option<(usize, usize)> = None;
        for &k in order.iter() {
            let key = (self.cols[k], self.rows[k]);
            if last == Some(key) {
                // duplicate, accumulate into the previous entry
                if let Some(v) = nzval.last_mut() {
                    *v += self.vals[k];
                }
            } else {
                rowval.push(self.rows[k]);
                nzval.push(self.vals[k]);
                colptr[key.0 + 1] += 1;
                last = Some(key);
            }
            map[k] = nzval.len() - 1;
        }

        //column counts to column pointers
        for col in 0..self.n {
            colptr[col + 1] += colptr[col];
        }

        (CscMatrix::new(self.m, self.n, colptr, rowval, nzval), map)
    }

    /// Convert to CSC, summing duplicates.
    pub fn to_csc(&self) -> CscMatrix<T> {
        self.to_csc_with_map().0
    }

    /// Overwrite the values of a matrix produced by
    /// [`to_csc_with_map`](TripletMatrix::to_csc_with_map) with the current
    /// triplet values.  The triplet must have been refilled with the
    /// same pattern in the same order.
    ///
    /// # Panics
    /// Panics if the map does not match the current number of entries.
    pub fn update_csc_values(&self, A: &mut CscMatrix<T>, map: &[usize]) {
        assert_eq!(map.len(), self.len());
        A.nzval.fill(T::zero());
        for (&dest, &v) in map.iter().zip(&self.vals) {
            A.nzval[dest] += v;
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_triplet_duplicates() {
        let mut trip = TripletMatrix::<f64>::new(3, 3, 6);
        trip.put(2, 0, 1.);
        trip.put(0, 0, 2.);
        trip.put(1, 2, 3.);
        trip.put(2, 0, 4.);
        trip.put(0, 1, 5.);

        let (A, map) = trip.to_csc_with_map();
        assert!(A.check_format().is_ok());
        assert_eq!(A.colptr, vec![0, 2, 3, 4]);
        assert_eq!(A.rowval, vec![0, 2, 0, 1]);
        assert_eq!(A.nzval, vec![2., 5., 5., 3.]);
        assert_eq!(map, vec![1, 0, 3, 1, 2]);
    }

    #[test]
    fn test_triplet_refill() {
        let mut trip = TripletMatrix::<f64>::new(2, 2, 3);
        trip.put(0, 0, 1.);
        trip.put(1, 1, 2.);
        trip.put(0, 0, 3.);
        let (mut A, map) = trip.to_csc_with_map();
        assert_eq!(A.nzval, vec![4., 2.]);

        trip.start();
        assert!(trip.is_empty());
        trip.put(0, 0, -1.);
        trip.put(1, 1, 7.);
        trip.put(0, 0, 0.5);
        trip.update_csc_values(&mut A, &map);
        assert_eq!(A.nzval, vec![-0.5, 7.]);
    }

    #[test]
    fn test_triplet_matrix_and_transpose() {
        #[rustfmt::skip]
        let A = CscMatrix::from(
            &[[1., 2.],
              [0., 3.],
              [4., 0.]]);

        let mut trip = TripletMatrix::<f64>::new(5, 5, 2 * A.nnz());
        trip.put_matrix_and_transpose(&A);
        let K = trip.to_csc();

        // A at (2.., 0..), A^T at (0.., 2..)
        assert_eq!(K.get_entry((2, 0)), Some(1.));
        assert_eq!(K.get_entry((2, 1)), Some(2.));
        assert_eq!(K.get_entry((4, 0)), Some(4.));
        assert_eq!(K.get_entry((0, 2)), Some(1.));
        assert_eq!(K.get_entry((1, 2)), Some(2.));
        assert_eq!(K.get_entry((0, 4)), Some(4.));
        assert_eq!(K.get_entry((1, 3)), Some(3.));
        assert_eq!(K.nnz(), 8);
    }

    #[test]
    #[should_panic]
    fn test_triplet_capacity() {
        let mut trip = TripletMatrix::<f64>::new(2, 2, 1);
        trip.put(0, 0, 1.);
        trip.put(1, 1, 1.);
    }
}
