//! Solver implementations.
//!
//! Only standard form linear programs are supported at present.

pub mod default;
