//! __eqkkt__ solves equality constrained quadratic programs
//!
//! $$
//! \begin{array}{rl}
//! \text{minimize} & x^T P x + 2 q^T x + r\\\\\[2ex\]
//!  \text{subject to} & Ax + b = 0
//!  \end{array}
//! $$
//!
//! with a single direct solve of the saddle point system
//!
//! $$
//! \begin{bmatrix} P & A^T \\\\ A & 0 \end{bmatrix}
//! \begin{bmatrix} x \\\\ \nu \end{bmatrix} =
//! \begin{bmatrix} -q \\\\ -b \end{bmatrix}.
//! $$
//!
//! It is meant as a backend of a convex modeling layer: the layer hands
//! over a canonical quadratic objective and a list of affine equality
//! constraints, and receives a result keyed by `status`, `value`,
//! `primal` and `eq_dual`.  The system is factored once with the sparse
//! LU of [`faer`](https://docs.rs/faer).  A singular system, or one the
//! factorisation cannot solve to tolerance, is reported as infeasible.
//!
//! ## Modules
//!
//! - [`problem`]: variables, canonical affine and quadratic expressions,
//!   constraints, objectives and the suitability rules they feed.
//! - [`solver`]: the variable offset map, coefficient extraction, KKT
//!   assembly and solve, settings and results.
//! - [`algebra`]: compressed sparse column matrices and vector math.
//!
//! ## Example
//!
//! ```
//! use eqkkt::algebra::CscMatrix;
//! use eqkkt::problem::*;
//! use eqkkt::solver::*;
//!
//! // minimize (x₀ - 1)² + (x₁ - 2)²  subject to  x₀ = x₁
//! let x = Variable::vector(2);
//! let residual = AffineForm::variable(&x).sub(&AffineForm::constant(vec![1., 2.])).unwrap();
//! let objective = Objective::Minimize(QuadForm::sum_squares(&residual));
//! let diff = AffineForm::from_terms(vec![(x.clone(), CscMatrix::from(&[[1., -1.]]))], vec![0.]).unwrap();
//! let problem = Problem::new(objective, vec![Constraint::Eq(diff)]);
//!
//! let mut solver = LsSolver::<f64>::new(LsSettings::default()).unwrap();
//! let result = solver.solve_problem(&problem).unwrap();
//!
//! let x = result.primal.unwrap();
//! assert!((x[0] - 1.5).abs() < 1e-10 && (x[1] - 1.5).abs() < 1e-10);
//! assert!((result.value.unwrap() - 0.5).abs() < 1e-10);
//! ```

//Rust hates greek characters
#![allow(confusable_idents)]

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod algebra;
pub mod io;
pub mod problem;
pub mod solver;
pub mod timers;
