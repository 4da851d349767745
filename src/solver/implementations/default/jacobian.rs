use super::*;
use crate::algebra::*;

/// Newton matrix of the KKT conditions at the current iterate
/// ```text
/// J = [ 0   A^T  I ]
///     [ A   0    0 ]
///     [ S   0    X ]
/// ```
/// The sparsity pattern is fixed at construction.  Later updates only
/// refill values through a map from triplet entries to CSC entries.
#[derive(Debug)]
pub struct LinIpmJacobian<T> {
    /// compressed form handed to the linear solver
    pub J: CscMatrix<T>,
    triplet: TripletMatrix<T>,
    map: Vec<usize>,
}

impl<T> LinIpmJacobian<T>
where
    T: FloatT,
{
    pub fn new(data: &LinIpmProblemData<T>, variables: &IpmVector<T>) -> Self {
        let ny = data.ny();
        let capacity = 2 * data.A.nnz() + 3 * data.nx;

        let mut triplet = TripletMatrix::new(ny, ny, capacity);
        _fill_triplet(&mut triplet, data, variables);
        let (J, map) = triplet.to_csc_with_map();

        Self { J, triplet, map }
    }

    /// Refill with the values at `variables`
    pub fn update(&mut self, data: &LinIpmProblemData<T>, variables: &IpmVector<T>) {
        _fill_triplet(&mut self.triplet, data, variables);
        self.triplet.update_csc_values(&mut self.J, &self.map);
    }
}

fn _fill_triplet<T: FloatT>(
    triplet: &mut TripletMatrix<T>,
    data: &LinIpmProblemData<T>,
    variables: &IpmVector<T>,
) {
    let (nx, nl) = (data.nx, data.nl);
    let (x, _, s) = variables.split();

    triplet.start();
    triplet.put_matrix_and_transpose(&data.A);

    let soff = nx + nl;
    for i in 0..nx {
        triplet.put(i, soff + i, T::one());
        triplet.put(soff + i, i, s[i]);
        triplet.put(soff + i, soff + i, x[i]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jacobian_assembly() {
        let A = CscMatrix::from(&[[1., 2.]]);
        let data = LinIpmProblemData::new(&A, &[1.], &[1., 1.]).unwrap();

        let mut y = IpmVector::<f64>::new(2, 1);
        y.data.copy_from_slice(&[3., 4., 0., 5., 6.]);

        let mut jac = LinIpmJacobian::new(&data, &y);

        #[rustfmt::skip]
        let expected = Matrix::from(
           &[[0., 0., 1., 1., 0.],
             [0., 0., 2., 0., 1.],
             [1., 2., 0., 0., 0.],
             [5., 0., 0., 3., 0.],
             [0., 6., 0., 0., 4.]]);

        assert_eq!(Matrix::from(&jac.J), expected);
        assert_eq!(jac.J.nnz(), 2 * 2 + 3 * 2);
        assert!(jac.J.check_format().is_ok());

        // same pattern, new values
        y.data.copy_from_slice(&[7., 8., 9., 0., 10.]);
        let pattern = (jac.J.colptr.clone(), jac.J.rowval.clone());
        jac.update(&data, &y);

        assert_eq!((jac.J.colptr.clone(), jac.J.rowval.clone()), pattern);
        assert_eq!(jac.J.get_entry((3, 0)), Some(0.));
        assert_eq!(jac.J.get_entry((4, 1)), Some(10.));
        assert_eq!(jac.J.get_entry((4, 4)), Some(8.));
        assert_eq!(jac.J.get_entry((0, 2)), Some(1.));
    }
}
