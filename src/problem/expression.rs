use super::{Curvature, Variable, VariableId};
use crate::algebra::{CscMatrix, FloatT};
use crate::solver::SymData;
use thiserror::Error;

/// Error type returned by coefficient extraction
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("variable {0} is not present in the variable offset map")]
    UnknownVariable(VariableId),
    #[error("coefficient block for variable {id} has {found} columns, expected {expected}")]
    BlockDimension {
        id: VariableId,
        expected: usize,
        found: usize,
    },
    #[error("incompatible expression dimensions: expected {expected}, found {found}")]
    IncompatibleDimension { expected: usize, found: usize },
}

/// Symbolic properties of a canonical expression.
pub trait Expression {
    /// Variables in the expression, in order of first appearance
    fn variables(&self) -> Vec<Variable>;

    /// DCP curvature of the expression
    fn curvature(&self) -> Curvature;

    /// True if the expression is affine in its variables
    fn is_affine(&self) -> bool {
        self.curvature().is_affine()
    }

    /// True if the expression is a polynomial of degree at most two.
    fn is_quadratic(&self) -> bool;

    fn is_convex(&self) -> bool {
        self.curvature().is_convex()
    }

    fn is_concave(&self) -> bool {
        self.curvature().is_concave()
    }
}

/// Extraction of `(A, b)` such that the expression equals `A x + b`,
/// with `x` the flattened unknown indexed by `symdata`.
pub trait AffineCoeffs<T: FloatT> {
    fn affine_coeffs(&self, symdata: &SymData) -> Result<(CscMatrix<T>, Vec<T>), ExtractionError>;
}

/// Extraction of the `(N+1) x (N+1)` matrix `M` such that a scalar
/// expression equals `[x;1]ᵀ M [x;1]`.
pub trait QuadraticCoeffs<T: FloatT> {
    fn quad_coeffs(&self, symdata: &SymData) -> Result<CscMatrix<T>, ExtractionError>;
}

// Collects variables from a sequence, keeping the first occurrence
// of each id.  Inconsistent duplicates are kept so that the variable
// offset map can reject them.
pub(crate) fn collect_variables<'a>(vars: impl IntoIterator<Item = &'a Variable>) -> Vec<Variable> {
    let mut out: Vec<Variable> = Vec::new();
    for var in vars {
        if !out.contains(var) {
            out.push(var.clone());
        }
    }
    out
}
