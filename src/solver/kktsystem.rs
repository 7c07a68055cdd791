#![allow(non_snake_case)]

use crate::algebra::*;

/// Upper triangular saddle point matrix
///
/// ```text
/// K = [ P  Aᵀ ]
///     [ A  0  ]
/// ```
///
/// with every diagonal entry structurally present.
#[derive(Debug, Clone)]
pub(crate) struct KktSystem<T> {
    pub KKT: CscMatrix<T>,
    pub n: usize,
    pub m: usize,
}

impl<T> KktSystem<T>
where
    T: FloatT,
{
    /// `P` must be square and upper triangular, `A` must have as
    /// many columns as `P`.
    pub fn new(P: &CscMatrix<T>, A: &CscMatrix<T>) -> Self {
        let (m, n) = A.size();
        assert_eq!(P.size(), (n, n));

        let KKT = assemble_kkt_matrix(P, A);

        Self { KKT, n, m }
    }

    pub fn dim(&self) -> usize {
        self.n + self.m
    }

    /// Right hand side `[-q; -b]`
    pub fn rhs(&self, q: &[T], b: &[T]) -> Vec<T> {
        assert_eq!(q.len(), self.n);
        assert_eq!(b.len(), self.m);
        q.iter().chain(b).map(|&v| -v).collect()
    }
}

// Built column by column.  Column j < n is column j of P with a zero
// appended if its diagonal is missing, and column n+i is row i of A
// followed by the zero diagonal of the (2,2) block.
fn assemble_kkt_matrix<T: FloatT>(P: &CscMatrix<T>, A: &CscMatrix<T>) -> CscMatrix<T> {
    let (m, n) = A.size();
    let At = A.transpose();

    let nnz_bound = P.nnz() + A.nnz() + n + m;
    let mut colptr = Vec::with_capacity(n + m + 1);
    let mut rowval = Vec::with_capacity(nnz_bound);
    let mut nzval = Vec::with_capacity(nnz_bound);
    colptr.push(0);

    for col in 0..n {
        let rng = P.colptr[col]..P.colptr[col + 1];
        let has_diag = P.rowval[rng.clone()].last() == Some(&col);
        rowval.extend_from_slice(&P.rowval[rng.clone()]);
        nzval.extend_from_slice(&P.nzval[rng]);
        if !has_diag {
            rowval.push(col);
            nzval.push(T::zero());
        }
        colptr.push(rowval.len());
    }

    for row in 0..m {
        let rng = At.colptr[row]..At.colptr[row + 1];
        rowval.extend_from_slice(&At.rowval[rng.clone()]);
        nzval.extend_from_slice(&At.nzval[rng]);
        rowval.push(n + row);
        nzval.push(T::zero());
        colptr.push(rowval.len());
    }

    CscMatrix::new(n + m, n + m, colptr, rowval, nzval)
}

/// Index of the first row (equivalently column) of the saddle point
/// matrix built from `P` and `A` that holds no stored entry at all.
/// `P` must be upper triangular.
pub(crate) fn find_empty_kkt_row<T: FloatT>(P: &CscMatrix<T>, A: &CscMatrix<T>) -> Option<usize> {
    let (m, n) = A.size();
    let mut occupied = vec![false; n + m];

    for (row, col, _) in P.triplets() {
        occupied[row] = true;
        occupied[col] = true;
    }
    for (row, col, _) in A.triplets() {
        occupied[col] = true;
        occupied[n + row] = true;
    }
    occupied.iter().position(|&o| !o)
}
