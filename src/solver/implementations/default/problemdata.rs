use crate::algebra::*;
use crate::solver::core::ConfigError;

/// Problem data for `min c^T x  s.t.  Ax = b, x >= 0`.  Not modified by the solver.
#[derive(Debug, Clone)]
pub struct LinIpmProblemData<T> {
    /// constraint matrix, `nl x nx`
    pub A: CscMatrix<T>,
    /// right hand side of the equality constraints
    pub b: Vec<T>,
    /// linear cost
    pub c: Vec<T>,
    /// number of variables
    pub nx: usize,
    /// number of equality constraints
    pub nl: usize,

    // norms used in the optional feasibility test
    pub(crate) normb_inf: T,
    pub(crate) normc_inf: T,
}

impl<T> LinIpmProblemData<T>
where
    T: FloatT,
{
    pub fn new(A: &CscMatrix<T>, b: &[T], c: &[T]) -> Result<Self, ConfigError> {
        let nx = c.len();
        let nl = b.len();

        if nx == 0 || nl == 0 {
            return Err(ConfigError::EmptyProblem { nx, nl });
        }
        if A.nrows() != nl {
            return Err(ConfigError::IncompatibleDimension(
                "rows of A must equal the length of b",
            ));
        }
        if A.ncols() != nx {
            return Err(ConfigError::IncompatibleDimension(
                "columns of A must equal the length of c",
            ));
        }
        A.check_format()?;

        Ok(Self {
            A: A.clone(),
            b: b.to_vec(),
            c: c.to_vec(),
            nx,
            nl,
            normb_inf: b.norm_inf(),
            normc_inf: c.norm_inf(),
        })
    }

    /// length of the combined iterate `[x; λ; s]`
    pub fn ny(&self) -> usize {
        2 * self.nx + self.nl
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_problem_dimensions() {
        let A = CscMatrix::from(&[[1., 1., 0.], [0., 1., 1.]]);
        let data = LinIpmProblemData::new(&A, &[1., 2.], &[1., 1., 1.]).unwrap();
        assert_eq!((data.nx, data.nl, data.ny()), (3, 2, 8));
        assert_eq!(data.normb_inf, 2.);

        let err = LinIpmProblemData::new(&A, &[1.], &[1., 1., 1.]).unwrap_err();
        assert!(matches!(err, ConfigError::IncompatibleDimension(_)));

        let err = LinIpmProblemData::new(&A, &[1., 2.], &[1., 1.]).unwrap_err();
        assert!(matches!(err, ConfigError::IncompatibleDimension(_)));

        let err = LinIpmProblemData::new(&CscMatrix::zeros((0, 3)), &[], &[1., 1., 1.]).unwrap_err();
        assert_eq!(err, ConfigError::EmptyProblem { nx: 3, nl: 0 });
    }

    #[test]
    fn test_problem_bad_format() {
        let A = CscMatrix {
            m: 1,
            n: 2,
            colptr: vec![0, 1, 2],
            rowval: vec![0, 3],
            nzval: vec![1., 1.],
        };
        let err = LinIpmProblemData::new(&A, &[1.], &[1., 1.]).unwrap_err();
        assert!(matches!(err, ConfigError::BadMatrixFormat(_)));
    }
}
