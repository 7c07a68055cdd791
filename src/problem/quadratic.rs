#![allow(non_snake_case)]

use super::affine::stuff_affine;
use super::expression::collect_variables;
use super::{AffineCoeffs, AffineForm, Curvature, Expression, ExtractionError, QuadraticCoeffs, Variable};
use crate::algebra::{CscMatrix, FloatT, ShapedMatrix};
use crate::solver::SymData;
use std::iter::zip;

#[derive(Debug, Clone, PartialEq)]
enum QuadTerm<T> {
    // vec(left)ᵀ Q vec(right)
    Bilinear {
        left: Variable,
        right: Variable,
        Q: CscMatrix<T>,
    },
    // weight * ‖arg‖²
    SumSquares { weight: T, arg: AffineForm<T> },
}

/// A scalar quadratic expression
///
/// ```text
/// Σ vec(xᵢ)ᵀ Qᵢⱼ vec(xⱼ) + Σ wₖ‖Cₖx + cₖ‖² + lᵀx + c
/// ```
///
/// Curvature is tracked from construction, and can be overridden when
/// the caller knows better.
#[derive(Debug, Clone, PartialEq)]
pub struct QuadForm<T = f64> {
    terms: Vec<QuadTerm<T>>,
    linear: AffineForm<T>,
    curvature: Curvature,
}

impl<T> QuadForm<T>
where
    T: FloatT,
{
    /// `‖arg‖²`, which is convex
    pub fn sum_squares(arg: &AffineForm<T>) -> Self {
        let curvature = if arg.terms().is_empty() {
            Curvature::Constant
        } else {
            Curvature::Convex
        };
        QuadForm {
            terms: vec![QuadTerm::SumSquares {
                weight: T::one(),
                arg: arg.clone(),
            }],
            linear: AffineForm::constant(vec![T::zero()]),
            curvature,
        }
    }

    /// `vec(x)ᵀ Q vec(x)`.
    ///
    /// Curvature is decided from `Q` by a sufficient test: a symmetric,
    /// diagonally dominant `Q` with nonnegative diagonal is convex, its
    /// negation is concave, and anything else is unknown.
    ///
    /// # Panics
    /// Panics if `Q` is not square with dimension `x.size()`.
    pub fn quad_form(x: &Variable, Q: &CscMatrix<T>) -> Self {
        assert_eq!(Q.size(), (x.size(), x.size()));

        let curvature = if Q.nzval.iter().all(|v| v.is_zero()) {
            Curvature::Constant
        } else if is_diagonally_dominant(Q, T::one()) {
            Curvature::Convex
        } else if is_diagonally_dominant(Q, -T::one()) {
            Curvature::Concave
        } else {
            Curvature::Unknown
        };

        QuadForm {
            terms: vec![QuadTerm::Bilinear {
                left: x.clone(),
                right: x.clone(),
                Q: Q.clone(),
            }],
            linear: AffineForm::constant(vec![T::zero()]),
            curvature,
        }
    }

    /// A scalar affine expression viewed as a quadratic one
    ///
    /// # Panics
    /// Panics if `arg` does not have exactly one row.
    pub fn from_affine(arg: &AffineForm<T>) -> Self {
        assert_eq!(arg.rows(), 1);
        QuadForm {
            terms: Vec::new(),
            linear: arg.clone(),
            curvature: arg.curvature(),
        }
    }

    /// Replace the curvature derived at construction
    pub fn with_curvature(mut self, curvature: Curvature) -> Self {
        self.curvature = curvature;
        self
    }

    /// Sum of two quadratic expressions
    pub fn add(&self, other: &Self) -> Result<Self, ExtractionError> {
        let mut terms = self.terms.clone();
        terms.extend(other.terms.iter().cloned());
        Ok(QuadForm {
            terms,
            linear: self.linear.add(&other.linear)?,
            curvature: self.curvature + other.curvature,
        })
    }

    /// Scalar multiple of a quadratic expression
    pub fn scale(&self, c: T) -> Self {
        let terms = self
            .terms
            .iter()
            .map(|term| match term {
                QuadTerm::Bilinear { left, right, Q } => {
                    let mut Q = Q.clone();
                    Q.nzval.iter_mut().for_each(|v| *v *= c);
                    QuadTerm::Bilinear {
                        left: left.clone(),
                        right: right.clone(),
                        Q,
                    }
                }
                QuadTerm::SumSquares { weight, arg } => QuadTerm::SumSquares {
                    weight: *weight * c,
                    arg: arg.clone(),
                },
            })
            .collect();

        QuadForm {
            terms,
            linear: self.linear.scale(c),
            curvature: self.curvature.scale(c),
        }
    }

    /// True if the expression has any second order term
    fn has_quadratic_terms(&self) -> bool {
        !self.terms.is_empty()
    }
}

// Gershgorin test on the symmetric part of sign*Q: every diagonal
// entry dominates the off diagonal absolute row sum.
fn is_diagonally_dominant<T: FloatT>(Q: &CscMatrix<T>, sign: T) -> bool {
    let n = Q.ncols();
    let mut diag = vec![T::zero(); n];
    let mut offdiag = vec![T::zero(); n];
    let half: T = T::one() / (T::one() + T::one());

    for (row, col, val) in Q.triplets() {
        if row == col {
            diag[row] += sign * val;
        } else {
            // symmetric part splits each entry over two positions
            offdiag[row] += half * val.abs();
            offdiag[col] += half * val.abs();
        }
    }
    zip(&diag, &offdiag).all(|(&d, &o)| d >= o)
}

impl<T: FloatT> Expression for QuadForm<T> {
    fn variables(&self) -> Vec<Variable> {
        let mut vars = Vec::new();
        for term in &self.terms {
            match term {
                QuadTerm::Bilinear { left, right, .. } => {
                    vars.push(left.clone());
                    vars.push(right.clone());
                }
                QuadTerm::SumSquares { arg, .. } => vars.extend(arg.variables()),
            }
        }
        vars.extend(self.linear.variables());
        collect_variables(&vars)
    }

    fn curvature(&self) -> Curvature {
        self.curvature
    }

    fn is_affine(&self) -> bool {
        !self.has_quadratic_terms()
    }

    fn is_quadratic(&self) -> bool {
        true
    }
}

impl<T: FloatT> QuadraticCoeffs<T> for QuadForm<T> {
    fn quad_coeffs(&self, symdata: &SymData) -> Result<CscMatrix<T>, ExtractionError> {
        let n = symdata.x_length();
        let (mut I, mut J, mut V) = (Vec::new(), Vec::new(), Vec::new());
        let half: T = T::one() / (T::one() + T::one());

        for term in &self.terms {
            match term {
                QuadTerm::Bilinear { left, right, Q } => {
                    let (loff, lsize) = lookup(symdata, left)?;
                    let (roff, rsize) = lookup(symdata, right)?;
                    if Q.size() != (lsize, rsize) {
                        return Err(ExtractionError::BlockDimension {
                            id: right.id(),
                            expected: rsize,
                            found: Q.ncols(),
                        });
                    }
                    // split each entry over both triangles
                    for (row, col, val) in Q.triplets() {
                        let (r, c) = (loff + row, roff + col);
                        I.extend([r, c]);
                        J.extend([c, r]);
                        V.extend([half * val, half * val]);
                    }
                }
                QuadTerm::SumSquares { weight, arg } => {
                    // ‖Ax + b‖² = [x;1]ᵀ [A b]ᵀ[A b] [x;1]
                    let (A, b) = arg.affine_coeffs(symdata)?;
                    let nzidx: Vec<usize> = (0..b.len()).filter(|&i| !b[i].is_zero()).collect();
                    let bcol = CscMatrix::new(
                        b.len(),
                        1,
                        vec![0, nzidx.len()],
                        nzidx.clone(),
                        nzidx.iter().map(|&i| b[i]).collect(),
                    );
                    let G = CscMatrix::hcat(&A, &bcol).gram();
                    for (row, col, val) in G.triplets() {
                        I.push(row);
                        J.push(col);
                        V.push(*weight * val);
                    }
                }
            }
        }

        // linear coefficients go in the last column only
        let (lI, lJ, lV) = stuff_affine(self.linear.terms(), symdata)?;
        debug_assert!(lI.iter().all(|&i| i == 0));
        I.extend(lJ);
        J.extend(std::iter::repeat(n).take(lV.len()));
        V.extend(lV);

        let r = self.linear.offset()[0];
        if !r.is_zero() {
            I.push(n);
            J.push(n);
            V.push(r);
        }

        Ok(CscMatrix::new_from_triplets(n + 1, n + 1, I, J, V))
    }
}

fn lookup(symdata: &SymData, var: &Variable) -> Result<(usize, usize), ExtractionError> {
    symdata
        .slot(var.id())
        .ok_or(ExtractionError::UnknownVariable(var.id()))
}
