//! linipm solver main module.
//!
//! This module contains the main types and traits for the interior point
//! solver.   The solver itself lives in
//! [`implementations::default`](crate::solver::implementations::default) and
//! is re-exported here.   The Newton systems it produces are solved through
//! the [`LinearSolver`] trait, so alternative factorization backends can be
//! selected by name in the [settings](LinIpmSettings) or supplied directly.

// internal module structure
pub(crate) mod core;
pub mod implementations;

//Here we expose only part of the solver internals
//and rearrange public modules a bit to give a more
//user friendly API

pub use crate::solver::core::{ConfigError, LinIpmError, SolverStatus};

//backend trait and the standard backends
pub use crate::solver::core::linsolvers::{
    BoxedLinearSolver, DenseLUSolver, LinearSolver, LinearSolverError, LinearSolverStats,
    SparseLUSolver,
};

pub use crate::solver::implementations::default;
pub use crate::solver::implementations::default::*;
