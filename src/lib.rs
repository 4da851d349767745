//! __linipm__ is a primal-dual interior point solver for linear programs in
//! standard form:
//!
//! $$
//! \begin{array}{rl}
//! \text{minimize} & c^T x\\\\\[2ex\]
//!  \text{subject to} & A x = b \\\\\[1ex\]
//!         & x \ge 0
//!  \end{array}
//! $$
//!
//! or equivalently its dual
//!
//! $$
//! \begin{array}{rl}
//! \text{maximize} & b^T \lambda\\\\\[2ex\]
//!  \text{subject to} & A^T \lambda + s = c \\\\\[1ex\]
//!         & s \ge 0
//!  \end{array}
//! $$
//!
//! with decision variables $x \in \mathbb{R}^n$, $\lambda \in \mathbb{R}^m$,
//! $s \in \mathbb{R}^n$ and a sparse constraint matrix $A \in \mathbb{R}^{m \times n}$.
//!
//! Each iteration linearizes the KKT conditions, factors the resulting
//! unsymmetric Newton system once and solves it twice to produce a Mehrotra
//! predictor-corrector step.
//!
//! ## Features
//!
//! * __Sparse__: the constraint matrix is held in compressed sparse column
//!   format and the Newton system is factored with a native sparse LU.
//!
//! * __Pluggable linear algebra__: the Newton system is solved through the
//!   [`LinearSolver`](crate::solver::LinearSolver) trait.  A sparse LU and a
//!   dense LU backend are provided.
//!
//! * __Configurable output__: iteration traces can be sent to stdout, a file,
//!   an arbitrary stream or an in-memory buffer.
//!
//! # Example
//!
//! ```no_run
//! use linipm::algebra::*;
//! use linipm::solver::*;
//!
//! // minimize -x1 - 2 x2  s.t.  x1 + x2 = 4,  x >= 0
//! let A = CscMatrix::new(1, 2, vec![0, 1, 2], vec![0, 0], vec![1., 1.]);
//! let b = vec![4.];
//! let c = vec![-1., -2.];
//!
//! let settings = LinIpmSettings::default();
//! let mut solver = LinIpmSolver::new(&A, &b, &c, settings).unwrap();
//! solver.solve().unwrap();
//! println!("x = {:?}", solver.x());
//! ```
//!
//! # License
//!
//! Licensed under Apache License, Version 2.0.

//Rust hates greek characters
#![allow(confusable_idents)]

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod algebra;
pub mod io;
pub mod solver;
pub mod sparselu;
pub(crate) mod timers;
