// package together the following and re-export
// in a partially flattened structure :
// : solver status and error types
// : user callbacks
// : linear solver backends

pub mod callbacks;
pub mod linsolvers;

//partially flatten top level pieces

mod settings;
mod solver;
pub use settings::*;
pub use solver::*;
