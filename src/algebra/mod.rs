//! Sparse and vector linear algebra.
//!
//! Everything needed to extract, assemble and solve an equality
//! constrained quadratic program: a compressed sparse column matrix
//! type with slicing and stacking, matrix-vector products and
//! vector operations on slices of [`FloatT`].

mod csc;
mod error_types;
mod floats;
mod math_traits;
mod matrix_types;
mod vecmath;

pub use error_types::*;
pub use floats::*;
pub use math_traits::*;
pub use matrix_types::*;

#[cfg(test)]
mod tests;
