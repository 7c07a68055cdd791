#![allow(non_snake_case)]

use crate::algebra::{CscMatrix, FloatT, SparseFormatError};

impl<T> CscMatrix<T>
where
    T: FloatT,
{
    /// Horizontal concatenation `[A B]`
    ///
    /// # Panics
    /// Panics if the row dimensions differ.
    pub fn hcat(A: &Self, B: &Self) -> Self {
        assert_eq!(A.m, B.m);

        // B's columns follow A's, so its pointers shift by nnz(A)
        let mut colptr = A.colptr.clone();
        colptr.extend(B.colptr[1..].iter().map(|&p| p + A.nnz()));

        let rowval = [&A.rowval[..], &B.rowval[..]].concat();
        let nzval = [&A.nzval[..], &B.nzval[..]].concat();

        CscMatrix::new(A.m, A.n + B.n, colptr, rowval, nzval)
    }

    /// Vertical concatenation of any number of blocks.
    ///
    /// Errors if there are no blocks or their column dimensions differ.
    pub fn vstack(blocks: &[&Self]) -> Result<Self, SparseFormatError> {
        let Some(first) = blocks.first() else {
            return Err(SparseFormatError::EmptyStack);
        };
        let n = first.n;
        if blocks.iter().any(|B| B.n != n) {
            return Err(SparseFormatError::IncompatibleDimension);
        }

        let m = blocks.iter().map(|B| B.m).sum();
        let nnz = blocks.iter().map(|B| B.nnz()).sum();
        let mut colptr = Vec::with_capacity(n + 1);
        let mut rowval = Vec::with_capacity(nnz);
        let mut nzval = Vec::with_capacity(nnz);
        colptr.push(0);

        // each output column is the same column of every block in turn,
        // so row indices stay sorted
        for col in 0..n {
            let mut offset = 0;
            for B in blocks {
                let rng = B.colptr[col]..B.colptr[col + 1];
                rowval.extend(B.rowval[rng.clone()].iter().map(|&r| r + offset));
                nzval.extend_from_slice(&B.nzval[rng]);
                offset += B.m;
            }
            colptr.push(rowval.len());
        }

        Ok(CscMatrix::new(m, n, colptr, rowval, nzval))
    }
}
