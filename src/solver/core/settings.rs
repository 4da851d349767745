use crate::algebra::SparseFormatError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
/// Error type returned by problem setup and settings validation
pub enum ConfigError {
    /// The problem has no variables or no equality constraints
    #[error("Problem must have at least one variable and one constraint (nx = {nx}, nl = {nl})")]
    EmptyProblem { nx: usize, nl: usize },
    /// Problem data dimensions do not agree
    #[error("Incompatible dimension: {0}")]
    IncompatibleDimension(&'static str),
    /// The constraint matrix is not a well formed CSC matrix
    #[error("Bad constraint matrix: {0}")]
    BadMatrixFormat(#[from] SparseFormatError),
    /// An error attributable to one of the settings fields
    #[error("Bad value for field \"{0}\"")]
    BadFieldValue(&'static str),
    /// A recognized option whose value cannot be used
    #[error("Bad value {value} for option \"{name}\"")]
    BadOptionValue { name: String, value: String },
    /// a linear solver problem of some kind (e.g. not found)
    #[error("Problem with {solver} solver ({problem})")]
    LinearSolverProblem {
        solver: String,
        problem: &'static str,
    },
}
