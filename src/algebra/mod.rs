//! __linipm__ algebra module.
//!
//! __NB__: Functions and objects in this module are used internally by the
//! interior point solver but are also exposed for building problem data
//! and for use in alternative linear solver backends.
//!
//! All sparse matrices are in compressed sparse column format and all
//! operations are generic over [`FloatT`].

// first import and flatten the solver's collection
// of core numeric types and matrix / vector traits.

mod adjoint;
mod csc;
mod dense;
mod error_types;
mod floats;
mod math_traits;
mod matrix_traits;
mod matrix_types;
mod vecmath;

pub use csc::*;
pub use dense::*;
pub use error_types::*;
pub use floats::*;
pub use math_traits::*;
pub use matrix_traits::*;
pub use matrix_types::*;
