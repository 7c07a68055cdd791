//! Canonical expressions, constraints and problems.
//!
//! These types play the part of an already canonicalized model: every
//! expression knows its variables and curvature, and can write its
//! coefficients against a [`SymData`](crate::solver::SymData) offset map
//! through [`AffineCoeffs`] or [`QuadraticCoeffs`].

mod affine;
mod constraint;
mod curvature;
mod expression;
#[allow(clippy::module_inception)]
mod problem;
mod quadratic;
mod variable;

pub use affine::*;
pub use constraint::*;
pub use curvature::*;
pub use expression::*;
pub use problem::*;
pub use quadratic::*;
pub use variable::*;
