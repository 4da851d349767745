//! Primal-dual interior point solver for standard form linear programs.
//!
//! The iterate is held as a single vector `y = [x; λ; s]`.   Each iteration
//! assembles the Newton matrix
//! ```text
//! J = [ 0   A^T  I ]
//!     [ A   0    0 ]
//!     [ S   0    X ]
//! ```
//! factors it once and solves against it twice to form a Mehrotra
//! predictor-corrector step.

#![allow(non_snake_case)]

mod info;
mod info_print;
mod jacobian;
mod problemdata;
mod residuals;
mod settings;
mod solution;
mod solver;
mod variables;

#[cfg(feature = "serde")]
mod json;

pub use info::*;
pub use jacobian::*;
pub use problemdata::*;
pub use residuals::*;
pub use settings::*;
pub use solution::*;
pub use solver::*;
pub use variables::*;
