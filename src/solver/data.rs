#![allow(non_snake_case)]

use super::{LsError, SymData};
use crate::algebra::*;
use crate::problem::{AffineCoeffs, QuadraticCoeffs};

/// Numeric data of an equality constrained quadratic program
///
/// ```text
/// minimize    xᵀPx + 2qᵀx + r
/// subject to  Ax + b = 0
/// ```
///
/// with `P` symmetric and stored in full.
#[derive(Debug, Clone, PartialEq)]
pub struct LsProblemData<T> {
    pub P: CscMatrix<T>,
    pub q: Vec<T>,
    pub r: T,
    pub A: CscMatrix<T>,
    pub b: Vec<T>,
}

impl<T> LsProblemData<T>
where
    T: FloatT,
{
    /// Problem data from explicit matrices, with dimension, format
    /// and symmetry checks.  An `A` with zero rows means there are no
    /// constraints.
    pub fn new(
        P: CscMatrix<T>,
        q: Vec<T>,
        r: T,
        A: CscMatrix<T>,
        b: Vec<T>,
    ) -> Result<Self, LsError> {
        let data = Self { P, q, r, A, b };
        data.check()?;
        Ok(data)
    }

    /// Dimension, format and symmetry checks
    pub fn check(&self) -> Result<(), LsError> {
        self.P.check_format()?;
        self.A.check_format()?;

        let n = self.q.len();
        _check_dim("P rows", n, self.P.nrows())?;
        _check_dim("P columns", n, self.P.ncols())?;
        _check_dim("A columns", n, self.A.ncols())?;
        _check_dim("b", self.A.nrows(), self.b.len())?;

        if !self.P.is_symmetric() {
            return Err(LsError::NotSymmetric);
        }
        Ok(())
    }

    /// Extracts problem data from an objective and a list of equality
    /// constraint expressions, all indexed by `symdata`.
    ///
    /// The objective is read as `[x;1]ᵀ M [x;1]` and split into
    /// `P = M[:N,:N]`, `q` the average of the last column and the last
    /// row of `M`, and `r = M[N,N]`.  The constraints `Aᵢx + bᵢ = 0` are
    /// stacked in order.
    pub fn from_expressions<O, E>(
        objective: &O,
        constraints: &[&E],
        symdata: &SymData,
    ) -> Result<Self, LsError>
    where
        O: QuadraticCoeffs<T>,
        E: AffineCoeffs<T>,
    {
        let N = symdata.x_length();

        let M = objective.quad_coeffs(symdata)?;
        _check_dim("quadratic coefficient rows", N + 1, M.nrows())?;
        _check_dim("quadratic coefficient columns", N + 1, M.ncols())?;

        let P = M.submatrix(0..N, 0..N);
        let r = M.get_entry((N, N)).unwrap_or_else(T::zero);
        let half: T = (0.5).as_T();
        let lastcol = M.col_to_dense(N);
        let lastrow = M.row_to_dense(N);
        let q = lastcol[0..N]
            .iter()
            .zip(&lastrow[0..N])
            .map(|(&c, &r)| half * (c + r))
            .collect();

        let mut blocks = Vec::with_capacity(constraints.len());
        let mut b = Vec::new();
        for c in constraints {
            let (Ai, bi) = c.affine_coeffs(symdata)?;
            _check_dim("constraint columns", N, Ai.ncols())?;
            _check_dim("constraint offset", Ai.nrows(), bi.len())?;
            blocks.push(Ai);
            b.extend(bi);
        }

        let A = if blocks.is_empty() {
            CscMatrix::zeros((0, N))
        } else {
            let refs: Vec<&CscMatrix<T>> = blocks.iter().collect();
            CscMatrix::vstack(&refs)?
        };

        Self::new(P, q, r, A, b)
    }

    /// number of variables
    pub fn n(&self) -> usize {
        self.q.len()
    }

    /// number of equality constraint rows
    pub fn m(&self) -> usize {
        self.b.len()
    }

    /// Objective value `xᵀPx + 2qᵀx + r`
    pub fn objective_value(&self, x: &[T]) -> T {
        let two: T = (2.0).as_T();
        self.P.quad_form(x) + two * self.q.dot(x) + self.r
    }

    /// Removes explicitly stored zeros from `P` and `A`
    pub fn dropzeros(&mut self) {
        self.P.dropzeros();
        self.A.dropzeros();
    }
}

fn _check_dim(what: &'static str, expected: usize, found: usize) -> Result<(), LsError> {
    if expected != found {
        return Err(LsError::DimensionMismatch {
            what,
            expected,
            found,
        });
    }
    Ok(())
}
