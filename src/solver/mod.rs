//! KKT based solver for equality constrained quadratic programs.
//!
//! A problem
//!
//! ```text
//! minimize    xᵀPx + 2qᵀx + r
//! subject to  Ax + b = 0
//! ```
//!
//! is solved through the single saddle point system
//!
//! ```text
//! [ P  Aᵀ ] [ x ]   [ -q ]
//! [ A  0  ] [ ν ] = [ -b ]
//! ```
//!
//! with a single sparse LU factorisation from `faer`.  A system that cannot be solved
//! reliably is reported as [`SolverStatus::Infeasible`] rather than as
//! an error.  Problems are usually given as canonical expressions from
//! [`problem`](crate::problem), indexed through a [`SymData`] offset map.

mod data;
mod directsolve;
mod error;
mod info;
mod info_print;
mod kktsystem;
mod result;
mod settings;
#[allow(clippy::module_inception)]
mod solver;
mod suitable;
mod symdata;

#[cfg(feature = "serde")]
mod json;

pub use data::*;
pub use directsolve::{DirectKktSolver, FaerLuSolver, KktSolution, KktSolveFailure};
pub use error::*;
pub use info::*;
pub use result::*;
pub use settings::*;
pub use solver::*;
pub use suitable::*;
pub use symdata::*;
