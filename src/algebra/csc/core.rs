#![allow(non_snake_case)]

use crate::algebra::{CscMatrix, FloatT, ShapedMatrix, SparseFormatError};
use itertools::Itertools;
use std::iter::zip;
use std::ops::Range;

impl<T> CscMatrix<T>
where
    T: FloatT,
{
    /// `CscMatrix` constructor.
    ///
    /// # Panics
    /// Makes rudimentary dimensional compatibility checks and panics on
    /// failure.   This constructor does __not__
    /// ensure that rows indices are all in bounds or that data is arranged
    /// such that entries within each column appear in order of increasing
    /// row index.   Responsibility for ensuring these conditions hold
    /// is left to the caller.
    ///

    pub fn new(m: usize, n: usize, colptr: Vec<usize>, rowval: Vec<usize>, nzval: Vec<T>) -> Self {
        assert_eq!(rowval.len(), nzval.len());
        assert_eq!(colptr.len(), n + 1);
        assert_eq!(colptr[n], rowval.len());
        CscMatrix {
            m,
            n,
            colptr,
            rowval,
            nzval,
        }
    }

    /// allocate space for a sparse matrix with `nnz` elements
    ///
    /// To make an m x n matrix of zeros, use
    /// ```
    /// use eqkkt::algebra::CscMatrix;
    /// let m = 3;
    /// let n = 4;
    /// let A : CscMatrix<f64> = CscMatrix::spalloc((m,n),0);
    /// assert_eq!(A.nnz(), 0);
    /// ```

    pub fn spalloc(size: (usize, usize), nnz: usize) -> Self {
        let (m, n) = size;
        let mut colptr = vec![0; n + 1];
        let rowval = vec![0; nnz];
        let nzval = vec![T::zero(); nnz];
        colptr[n] = nnz;

        CscMatrix::new(m, n, colptr, rowval, nzval)
    }

    /// Sparse matrix of zeros of the given size
    pub fn zeros(size: (usize, usize)) -> Self {
        Self::spalloc(size, 0)
    }

    /// Identity matrix of size `n`
    pub fn identity(n: usize) -> Self {
        let colptr = (0usize..=n).collect();
        let rowval = (0usize..n).collect();
        let nzval = vec![T::one(); n];

        CscMatrix::new(n, n, colptr, rowval, nzval)
    }

    /// Construct a matrix from (row, column, value) triplets.
    ///
    /// Entries with repeated indices are summed, in the order in which
    /// they appear in the input.
    ///
    /// # Panics
    /// Panics if the triplet vectors differ in length or if any index is
    /// out of bounds.
    pub fn new_from_triplets(m: usize, n: usize, I: Vec<usize>, J: Vec<usize>, V: Vec<T>) -> Self {
        assert_eq!(I.len(), J.len());
        assert_eq!(I.len(), V.len());
        assert!(I.iter().all(|&i| i < m));
        assert!(J.iter().all(|&j| j < n));

        // stable sort, so that duplicates accumulate in input order
        let mut p: Vec<usize> = (0..V.len()).collect();
        p.sort_by_key(|&k| (J[k], I[k]));

        let mut colptr = vec![0; n + 1];
        let mut rowval = Vec::with_capacity(V.len());
        let mut nzval = Vec::with_capacity(V.len());
        let mut last: Option<(usize, usize)> = None;

        for k in p {
            let (row, col, val) = (I[k], J[k], V[k]);
            if last == Some((row, col)) {
                if let Some(v) = nzval.last_mut() {
                    *v += val;
                }
            } else {
                rowval.push(row);
                nzval.push(val);
                colptr[col + 1] += 1;
                last = Some((row, col));
            }
        }

        for i in 0..n {
            colptr[i + 1] += colptr[i];
        }

        CscMatrix::new(m, n, colptr, rowval, nzval)
    }

    /// Iterator over the (row, column, value) triplets of all
    /// structural entries, in column major order
    pub fn triplets(&self) -> impl Iterator<Item = (usize, usize, T)> + '_ {
        (0..self.n).flat_map(move |col| {
            let rng = self.colptr[col]..self.colptr[col + 1];
            zip(&self.rowval[rng.clone()], &self.nzval[rng]).map(move |(&row, &val)| (row, col, val))
        })
    }

    /// number of nonzeros
    pub fn nnz(&self) -> usize {
        self.colptr[self.n]
    }

    /// Check that matrix data is correctly formatted.
    pub fn check_format(&self) -> Result<(), SparseFormatError> {
        if self.rowval.len() != self.nzval.len() {
            return Err(SparseFormatError::IncompatibleDimension);
        }

        if self.colptr.is_empty()
            || (self.colptr.len() - 1) != self.n
            || self.colptr[self.n] != self.rowval.len()
        {
            return Err(SparseFormatError::IncompatibleDimension);
        }

        //check for colptr monotonicity
        if self.colptr.windows(2).any(|c| c[0] > c[1]) {
            return Err(SparseFormatError::BadColptr);
        }

        //check for rowval monotonicity within each column
        for col in 0..self.n {
            let rng = self.colptr[col]..self.colptr[col + 1];
            if self.rowval[rng].windows(2).any(|c| c[0] >= c[1]) {
                return Err(SparseFormatError::BadRowval);
            }
        }
        //check for row values out of bounds
        if !self.rowval.iter().all(|r| r < &self.m) {
            return Err(SparseFormatError::BadRowval);
        }

        Ok(())
    }

    /// Allocates a new matrix containing only entries from the upper triangular part
    pub fn to_triu(&self) -> Self {
        assert_eq!(self.m, self.n);
        let (m, n) = (self.m, self.n);
        let mut colptr = vec![0; n + 1];
        let mut rowval = Vec::new();
        let mut nzval = Vec::new();

        for col in 0..n {
            let rng = self.colptr[col]..self.colptr[col + 1];
            for (&row, &val) in zip(&self.rowval[rng.clone()], &self.nzval[rng]) {
                if row <= col {
                    rowval.push(row);
                    nzval.push(val);
                }
            }
            colptr[col + 1] = rowval.len();
        }
        CscMatrix::new(m, n, colptr, rowval, nzval)
    }

    /// True if the matrix is upper triangular
    pub fn is_triu(&self) -> bool {
        // check lower triangle for any structural entries, regardless
        // of the values that may be assigned to them
        (0..self.ncols()).all(|col| {
            let rows = &self.rowval[self.colptr[col]..self.colptr[col + 1]];
            rows.iter().all(|&row| row <= col)
        })
    }

    /// True if the matrix is square and numerically symmetric.
    /// Structural entries holding zero are treated as absent.
    pub fn is_symmetric(&self) -> bool {
        if !self.is_square() {
            return false;
        }
        (0..self.n).all(|col| {
            let rng = self.colptr[col]..self.colptr[col + 1];
            zip(&self.rowval[rng.clone()], &self.nzval[rng])
                .all(|(&row, &val)| self.get_entry((col, row)).unwrap_or(T::zero()) == val)
        })
    }

    /// Returns the value at the given (row,col) index as an Option.
    /// Returns None if the given index is not a structural nonzero.
    ///
    /// # Panics
    /// Panics if the given index is out of bounds.
    pub fn get_entry(&self, idx: (usize, usize)) -> Option<T> {
        let (row, col) = idx;
        assert!(row < self.nrows() && col < self.ncols());

        let first = self.colptr[col];
        let last = self.colptr[col + 1];
        let rows_in_this_column = &self.rowval[first..last];
        match rows_in_this_column.binary_search(&row) {
            Ok(idx) => Some(self.nzval[first + idx]),
            Err(_) => None,
        }
    }

    /// Remove all structural entries holding an explicit zero.
    pub fn dropzeros(&mut self) {
        let mut writeidx = 0;
        let mut readidx = 0;

        for col in 0..self.n {
            let stop = self.colptr[col + 1];
            while readidx < stop {
                let val = self.nzval[readidx];
                if val != T::zero() {
                    self.rowval[writeidx] = self.rowval[readidx];
                    self.nzval[writeidx] = val;
                    writeidx += 1;
                }
                readidx += 1;
            }
            self.colptr[col + 1] = writeidx;
        }
        self.rowval.truncate(writeidx);
        self.nzval.truncate(writeidx);
    }

    /// Allocates a new matrix holding the transpose
    pub fn transpose(&self) -> Self {
        let (I, J, V): (Vec<_>, Vec<_>, Vec<_>) =
            self.triplets().map(|(row, col, v)| (col, row, v)).multiunzip();
        CscMatrix::new_from_triplets(self.n, self.m, I, J, V)
    }

    /// Allocates a new matrix holding the block `self[rows, cols]`
    ///
    /// # Panics
    /// Panics if either range exceeds the matrix dimensions.
    pub fn submatrix(&self, rows: Range<usize>, cols: Range<usize>) -> Self {
        assert!(rows.start <= rows.end && rows.end <= self.m);
        assert!(cols.start <= cols.end && cols.end <= self.n);

        let mut colptr = Vec::with_capacity(cols.len() + 1);
        let mut rowval = Vec::new();
        let mut nzval = Vec::new();
        colptr.push(0);

        for col in cols.clone() {
            let rng = self.colptr[col]..self.colptr[col + 1];
            for (&row, &val) in zip(&self.rowval[rng.clone()], &self.nzval[rng]) {
                if rows.contains(&row) {
                    rowval.push(row - rows.start);
                    nzval.push(val);
                }
            }
            colptr.push(rowval.len());
        }

        CscMatrix::new(rows.len(), cols.len(), colptr, rowval, nzval)
    }

    /// Dense copy of column `col`
    pub fn col_to_dense(&self, col: usize) -> Vec<T> {
        assert!(col < self.n);
        let mut v = vec![T::zero(); self.m];
        let rng = self.colptr[col]..self.colptr[col + 1];
        for (&row, &val) in zip(&self.rowval[rng.clone()], &self.nzval[rng]) {
            v[row] = val;
        }
        v
    }

    /// Dense copy of row `row`
    pub fn row_to_dense(&self, row: usize) -> Vec<T> {
        assert!(row < self.m);
        (0..self.n)
            .map(|col| self.get_entry((row, col)).unwrap_or(T::zero()))
            .collect()
    }

    /// Allocates the Gram matrix `selfᵀ*self`.
    ///
    /// The output is exactly symmetric, since both triangles
    /// accumulate the same products in the same order.
    pub fn gram(&self) -> Self {
        // columns of At index the rows of self
        let At = self.transpose();
        let n = self.n;

        let mut colptr = Vec::with_capacity(n + 1);
        let mut rowval = Vec::new();
        let mut nzval = Vec::new();
        colptr.push(0);

        let mut work = vec![T::zero(); n];
        let mut mark = vec![usize::MAX; n];
        let mut pattern = Vec::new();

        for j in 0..n {
            pattern.clear();
            for p in self.colptr[j]..self.colptr[j + 1] {
                let (i, aij) = (self.rowval[p], self.nzval[p]);
                for q in At.colptr[i]..At.colptr[i + 1] {
                    let k = At.rowval[q];
                    if mark[k] != j {
                        mark[k] = j;
                        work[k] = T::zero();
                        pattern.push(k);
                    }
                    work[k] += At.nzval[q] * aij;
                }
            }
            pattern.sort_unstable();
            for &k in &pattern {
                rowval.push(k);
                nzval.push(work[k]);
            }
            colptr.push(rowval.len());
        }

        CscMatrix::new(n, n, colptr, rowval, nzval)
    }
}

impl<T> ShapedMatrix for CscMatrix<T> {
    fn nrows(&self) -> usize {
        self.m
    }
    fn ncols(&self) -> usize {
        self.n
    }
}

/// Make a sparse matrix from a dense array.  Zero entries are
/// not stored.
impl<'a, T, const R: usize, const C: usize> From<&'a [[T; C]; R]> for CscMatrix<T>
where
    T: FloatT,
{
    fn from(rows: &'a [[T; C]; R]) -> Self {
        let mut colptr = Vec::with_capacity(C + 1);
        let mut rowval = Vec::new();
        let mut nzval = Vec::new();
        colptr.push(0);

        for col in 0..C {
            for (row, data) in rows.iter().enumerate() {
                if data[col] != T::zero() {
                    rowval.push(row);
                    nzval.push(data[col]);
                }
            }
            colptr.push(rowval.len());
        }
        CscMatrix::new(R, C, colptr, rowval, nzval)
    }
}

#[test]
fn test_csc_get_entry() {
    // A =
    //[ ⋅   4.0    ⋅    ⋅   12.0]
    //[1.0  5.0    ⋅    ⋅     ⋅ ]
    //[ ⋅   6.0    ⋅    ⋅   13.0]
    //[2.0  7.0  10.0   ⋅     ⋅ ]
    //[ ⋅   8.0  11.0   ⋅   14.0]
    //[3.0  9.0    ⋅    ⋅     ⋅ ]

    let A = CscMatrix::new(
        6,                                                                 // m
        5,                                                                 // n
        vec![0, 3, 9, 11, 11, 14],                                         // colptr
        vec![1, 3, 5, 0, 1, 2, 3, 4, 5, 3, 4, 0, 2, 4],                    // rowval
        vec![1., 2., 3., 4., 5., 6., 7., 8., 9., 10., 11., 12., 13., 14.], // nzval
    );

    assert_eq!(A.get_entry((1, 0)).unwrap(), 1.);
    assert_eq!(A.get_entry((5, 0)).unwrap(), 3.);
    assert_eq!(A.get_entry((0, 1)).unwrap(), 4.);
    assert_eq!(A.get_entry((3, 2)).unwrap(), 10.);
    assert_eq!(A.get_entry((4, 4)).unwrap(), 14.);

    assert!(A.get_entry((0, 0)).is_none());
    assert!(A.get_entry((2, 2)).is_none());
    assert!(A.get_entry((1, 3)).is_none());
    assert!(A.get_entry((3, 4)).is_none());

    assert_eq!(A.row_to_dense(4), vec![0., 8., 11., 0., 14.]);
    assert_eq!(A.col_to_dense(2), vec![0., 0., 0., 10., 11., 0.]);
}
