use super::SettingsError;
use crate::algebra::SparseFormatError;
use crate::problem::{ExtractionError, VariableId};
use thiserror::Error;

/// Error type returned for malformed input to the solver.
///
/// Numerical failure of the KKT solve is not an error: it is reported
/// as [`SolverStatus::Infeasible`](crate::solver::SolverStatus::Infeasible).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LsError {
    #[error("coefficient extraction failed: {0}")]
    Extraction(#[from] ExtractionError),
    #[error("variable {id} appears more than once with different shape or kind")]
    InconsistentVariable { id: VariableId },
    #[error("dimension mismatch in {what}: expected {expected}, found {found}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("quadratic term P is not symmetric")]
    NotSymmetric,
    #[error("constraint {0} is not a linear equality")]
    UnsupportedConstraint(usize),
    #[error("problem is not suitable for a KKT based solve")]
    NotSuitable,
    #[error("bad sparse matrix data: {0}")]
    Format(#[from] SparseFormatError),
    #[error("invalid settings: {0}")]
    Settings(#[from] SettingsError),
}
