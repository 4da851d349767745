mod core;
mod matrix_math;
mod triplet;

pub use self::core::*;
pub use triplet::*;
