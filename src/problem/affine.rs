#![allow(non_snake_case)]

use super::expression::collect_variables;
use super::{AffineCoeffs, Curvature, Expression, ExtractionError, Variable};
use crate::algebra::{CscMatrix, FloatT, MatrixMath, ShapedMatrix};
use crate::solver::SymData;

/// An affine expression `Σₖ Cₖ vec(xₖ) + c` with one sparse
/// coefficient block per variable.
///
/// ```
/// use eqkkt::algebra::CscMatrix;
/// use eqkkt::problem::{AffineForm, Variable};
///
/// // x₀ + 2x₁ - 3
/// let x = Variable::vector(2);
/// let C = CscMatrix::from(&[[1., 2.]]);
/// let expr = AffineForm::from_terms(vec![(x, C)], vec![-3.]).unwrap();
/// assert_eq!(expr.rows(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct AffineForm<T = f64> {
    terms: Vec<(Variable, CscMatrix<T>)>,
    constant: Vec<T>,
}

impl<T> AffineForm<T>
where
    T: FloatT,
{
    /// The variable itself, i.e. the identity map on its entries
    pub fn variable(x: &Variable) -> Self {
        let n = x.size();
        AffineForm {
            terms: vec![(x.clone(), CscMatrix::identity(n))],
            constant: vec![T::zero(); n],
        }
    }

    /// A constant vector
    pub fn constant(c: Vec<T>) -> Self {
        AffineForm {
            terms: Vec::new(),
            constant: c,
        }
    }

    /// Builds `Σₖ Cₖ vec(xₖ) + c` from explicit coefficient blocks.
    /// Blocks for the same variable are summed.
    pub fn from_terms(
        terms: Vec<(Variable, CscMatrix<T>)>,
        constant: Vec<T>,
    ) -> Result<Self, ExtractionError> {
        let mut out = Self::constant(constant);
        for (var, C) in terms {
            out.push_term(var, C)?;
        }
        Ok(out)
    }

    /// Number of rows, i.e. the flattened size of the expression
    pub fn rows(&self) -> usize {
        self.constant.len()
    }

    /// The constant offset `c`
    pub fn offset(&self) -> &[T] {
        &self.constant
    }

    /// Coefficient blocks, one per variable
    pub fn terms(&self) -> &[(Variable, CscMatrix<T>)] {
        &self.terms
    }

    /// Sum of two affine expressions of the same size
    pub fn add(&self, other: &Self) -> Result<Self, ExtractionError> {
        if self.rows() != other.rows() {
            return Err(ExtractionError::IncompatibleDimension {
                expected: self.rows(),
                found: other.rows(),
            });
        }
        let mut out = self.clone();
        for (c, &oc) in out.constant.iter_mut().zip(&other.constant) {
            *c += oc;
        }
        for (var, C) in &other.terms {
            out.push_term(var.clone(), C.clone())?;
        }
        Ok(out)
    }

    /// Difference of two affine expressions of the same size
    pub fn sub(&self, other: &Self) -> Result<Self, ExtractionError> {
        self.add(&other.scale(-T::one()))
    }

    /// Scalar multiple of an affine expression
    pub fn scale(&self, c: T) -> Self {
        let mut out = self.clone();
        for (_, C) in out.terms.iter_mut() {
            C.scale(c);
        }
        for v in out.constant.iter_mut() {
            *v *= c;
        }
        out
    }

    fn push_term(&mut self, var: Variable, C: CscMatrix<T>) -> Result<(), ExtractionError> {
        if C.nrows() != self.rows() {
            return Err(ExtractionError::IncompatibleDimension {
                expected: self.rows(),
                found: C.nrows(),
            });
        }
        if C.ncols() != var.size() {
            return Err(ExtractionError::BlockDimension {
                id: var.id(),
                expected: var.size(),
                found: C.ncols(),
            });
        }

        match self.terms.iter_mut().find(|(v, _)| *v == var) {
            Some((_, existing)) => *existing = sum_blocks(existing, &C),
            None => self.terms.push((var, C)),
        }
        Ok(())
    }
}

// elementwise sum of two blocks of equal size
fn sum_blocks<T: FloatT>(A: &CscMatrix<T>, B: &CscMatrix<T>) -> CscMatrix<T> {
    let (mut I, mut J, mut V) = (Vec::new(), Vec::new(), Vec::new());
    for (i, j, v) in A.triplets().chain(B.triplets()) {
        I.push(i);
        J.push(j);
        V.push(v);
    }
    CscMatrix::new_from_triplets(A.m, A.n, I, J, V)
}

impl<T: FloatT> Expression for AffineForm<T> {
    fn variables(&self) -> Vec<Variable> {
        collect_variables(self.terms.iter().map(|(v, _)| v))
    }

    fn curvature(&self) -> Curvature {
        if self.terms.is_empty() {
            Curvature::Constant
        } else {
            Curvature::Affine
        }
    }

    fn is_quadratic(&self) -> bool {
        true
    }
}

impl<T: FloatT> AffineCoeffs<T> for AffineForm<T> {
    fn affine_coeffs(&self, symdata: &SymData) -> Result<(CscMatrix<T>, Vec<T>), ExtractionError> {
        let (I, J, V) = stuff_affine(&self.terms, symdata)?;
        let A = CscMatrix::new_from_triplets(self.rows(), symdata.x_length(), I, J, V);
        Ok((A, self.constant.clone()))
    }
}

// place each coefficient block into the columns owned by its variable
#[allow(clippy::type_complexity)]
pub(crate) fn stuff_affine<T: FloatT>(
    terms: &[(Variable, CscMatrix<T>)],
    symdata: &SymData,
) -> Result<(Vec<usize>, Vec<usize>, Vec<T>), ExtractionError> {
    let nnz = terms.iter().map(|(_, C)| C.nnz()).sum();
    let mut I = Vec::with_capacity(nnz);
    let mut J = Vec::with_capacity(nnz);
    let mut V = Vec::with_capacity(nnz);

    for (var, C) in terms {
        let (offset, size) = symdata
            .slot(var.id())
            .ok_or(ExtractionError::UnknownVariable(var.id()))?;
        if C.ncols() != size {
            return Err(ExtractionError::BlockDimension {
                id: var.id(),
                expected: size,
                found: C.ncols(),
            });
        }
        for (row, col, val) in C.triplets() {
            I.push(row);
            J.push(offset + col);
            V.push(val);
        }
    }
    Ok((I, J, V))
}
