#![allow(non_snake_case)]
use crate::algebra::*;

fn test_matrix_4x4_triu() -> CscMatrix<f64> {
    // A =
    //[ 4.0  -3.0   7.0    ⋅ ]
    //[  ⋅    8.0  -1.0    ⋅ ]
    //[  ⋅     ⋅    2.0  -3.0]
    //[  ⋅     ⋅     ⋅    1.0]
    let Ap = vec![0, 1, 3, 6, 8];
    let Ai = vec![0, 0, 1, 0, 1, 2, 2, 3];
    let Ax = vec![4., -3., 8., 7., -1., 2., -3., 1.];
    CscMatrix::new(4, 4, Ap, Ai, Ax)
}

fn test_matrix_4x4() -> CscMatrix<f64> {
    // A =
    //[ 4.0  -3.0   7.0    ⋅ ]
    //[  ⋅    8.0  -1.0    ⋅ ]
    //[ 1.0    ⋅    2.0  -3.0]
    //[  ⋅   -1.0    ⋅    1.0]

    //NB: same as above, but with tril entries
    let Ap = vec![0, 2, 5, 8, 10];
    let Ai = vec![0, 2, 0, 1, 3, 0, 1, 2, 2, 3];
    let Ax = vec![4., 1., -3., 8., -1., 7., -1., 2., -3., 1.];
    CscMatrix::new(4, 4, Ap, Ai, Ax)
}

fn test_matrix_3x4() -> CscMatrix<f64> {
    // A =
    //[-1.0  -17.0  6.0  10.0]
    //[ 3.0     ⋅   7.0    ⋅ ]
    //[  ⋅    -4.0   ⋅   -5.0]
    let Ap = vec![0, 2, 4, 6, 8];
    let Ai = vec![0, 1, 0, 2, 0, 1, 0, 2];
    let Ax = vec![-1., 3., -17., -4., 6., 7., 10., -5.];
    CscMatrix::new(3, 4, Ap, Ai, Ax)
}

#[test]
fn test_nrows_ncols_nnz_is_square() {
    let A = test_matrix_3x4();
    let B = test_matrix_4x4_triu();
    assert_eq!(A.nrows(), 3);
    assert_eq!(A.ncols(), 4);
    assert_eq!(B.nrows(), 4);
    assert_eq!(B.ncols(), 4);
    assert!(!A.is_square());
    assert!(B.is_square());
    assert_eq!(A.nnz(), 8);
    assert_eq!(B.nnz(), 8);
    assert!(A.check_format().is_ok());
}

#[test]
fn test_check_format_failures() {
    let mut A = test_matrix_3x4();
    A.rowval[1] = 7;
    assert_eq!(A.check_format(), Err(SparseFormatError::BadRowval));

    let mut A = test_matrix_3x4();
    A.rowval.swap(0, 1);
    assert_eq!(A.check_format(), Err(SparseFormatError::BadRowval));

    let mut A = test_matrix_3x4();
    A.nzval.pop();
    assert_eq!(A.check_format(), Err(SparseFormatError::IncompatibleDimension));
}

#[test]
fn test_from_dense_array() {
    let A = CscMatrix::from(&[
        [-1., -17., 6., 10.], //
        [3., 0., 7., 0.],     //
        [0., -4., 0., -5.],   //
    ]);
    assert_eq!(A, test_matrix_3x4());
}

#[test]
fn test_scale() {
    let mut A = test_matrix_4x4_triu();
    A.scale(2.);
    let v = vec![8., -6., 16., 14., -2., 4., -6., 2.];
    assert_eq!(A.nzval, v);
}

#[test]
fn test_products() {
    let A = test_matrix_3x4();
    let x = vec![1., -2., 3., -4.];
    let mut y = vec![5., -6., 7.];

    // y += 2*A*x
    A.mul_acc(&mut y, &x, 2.);
    assert_eq!(y, vec![27., 42., 63.]);

    // y += 2*Aᵀ*x
    let mut y = vec![1., -2., 3., -4.];
    A.mul_t_acc(&mut y, &[5., -6., 7.], 2.);
    assert_eq!(y, vec![-45., -228., -21., 26.]);
}

#[test]
fn test_sym_mul_acc() {
    let A = test_matrix_4x4_triu();
    let x = vec![1., 2., -3., -4.];
    let mut y = vec![0., 1., -1., 2.];

    // the symmetric product of the triu data matches the full matrix
    let mut ysym = y.clone();
    let Afull = CscMatrix::from(&[
        [4., -3., 7., 0.],  //
        [-3., 8., -1., 0.], //
        [7., -1., 2., -3.], //
        [0., 0., -3., 1.],  //
    ]);
    A.sym_mul_acc(&mut ysym, &x, -2.);
    Afull.mul_acc(&mut y, &x, -2.);
    assert_eq!(ysym, y);
    assert_eq!(y, vec![46., -31., -23., -8.]);

    // entries below the diagonal are ignored
    let mut ylow = vec![0., 1., -1., 2.];
    test_matrix_4x4().sym_mul_acc(&mut ylow, &x, -2.);
    assert_eq!(ylow, y);
}

#[test]
fn test_quad_form() {
    let x = vec![1., 2., -3., -4.];

    // only the stored entries count, no symmetry assumed
    assert_eq!(test_matrix_4x4_triu().quad_form(&x), 13.);
    assert_eq!(test_matrix_4x4().quad_form(&x), 18.);
}

#[test]
fn test_matrix_to_triu() {
    let Afull = test_matrix_4x4();
    let Atriu = test_matrix_4x4_triu();

    let B = Afull.to_triu();
    assert_eq!(B, Atriu);
    assert!(B.is_triu());
    assert!(!Afull.is_triu());
}

#[test]
fn test_matrix_to_triu_empty() {
    let A = CscMatrix::<f64>::zeros((5, 5));
    let B = A.to_triu();
    assert_eq!(B, A);
}

#[test]
#[should_panic]
fn test_matrix_to_triu_notsquare() {
    let A = CscMatrix::<f64>::zeros((5, 4));
    let _ = A.to_triu();
}

#[test]
fn test_triplets_sum_duplicates() {
    let A = CscMatrix::new_from_triplets(
        3,
        2,
        vec![0, 2, 0, 1, 0],
        vec![1, 0, 1, 1, 0],
        vec![1., 2., 3., 4., 5.],
    );
    assert!(A.check_format().is_ok());
    assert_eq!(A.colptr, vec![0, 2, 4]);
    assert_eq!(A.rowval, vec![0, 2, 0, 1]);
    assert_eq!(A.nzval, vec![5., 2., 4., 4.]);
}

#[test]
fn test_dropzeros() {
    let mut A = CscMatrix::new(3, 2, vec![0, 2, 4], vec![0, 1, 1, 2], vec![1., 0., 0., 2.]);
    A.dropzeros();
    assert_eq!(A.colptr, vec![0, 1, 2]);
    assert_eq!(A.rowval, vec![0, 2]);
    assert_eq!(A.nzval, vec![1., 2.]);
}

#[test]
fn test_transpose() {
    let At = test_matrix_3x4().transpose();
    let B = CscMatrix::from(&[
        [-1., 3., 0.],   //
        [-17., 0., -4.], //
        [6., 7., 0.],    //
        [10., 0., -5.],  //
    ]);
    assert_eq!(At, B);
    assert!(At.check_format().is_ok());
}

#[test]
fn test_submatrix_and_dense_slices() {
    let A = test_matrix_3x4();
    let S = A.submatrix(0..2, 1..3);
    assert_eq!(S, CscMatrix::from(&[[-17., 6.], [0., 7.]]));

    let E = A.submatrix(1..1, 0..4);
    assert_eq!(E.size(), (0, 4));
    assert_eq!(E.nnz(), 0);

    assert_eq!(A.col_to_dense(3), vec![10., 0., -5.]);
    assert_eq!(A.row_to_dense(2), vec![0., -4., 0., -5.]);
}

#[test]
fn test_gram_and_symmetry() {
    let B = CscMatrix::from(&[[1., 2.], [0., 3.]]);
    let G = B.gram();
    assert_eq!(G, CscMatrix::from(&[[1., 2.], [2., 13.]]));
    assert!(G.is_symmetric());
    assert!(!test_matrix_4x4().is_symmetric());
    assert!(!test_matrix_3x4().is_symmetric());

    // an explicit zero on one side only is still symmetric
    let Z = CscMatrix::new(2, 2, vec![0, 1, 3], vec![0, 0, 1], vec![1., 0., 2.]);
    assert!(Z.is_symmetric());
}

#[test]
fn test_matrix_hcat_and_vstack() {
    let n = 3;
    let I1 = CscMatrix::<f64>::identity(n);
    let mut I2 = CscMatrix::<f64>::identity(n);
    I2.negate();

    let Av = CscMatrix::vstack(&[&I1, &I2]).unwrap();
    assert_eq!(Av.size(), (6, 3));
    assert_eq!(Av.colptr, vec![0, 2, 4, 6]);
    assert_eq!(Av.rowval, vec![0, 3, 1, 4, 2, 5]);
    assert_eq!(Av.nzval, vec![1., -1., 1., -1., 1., -1.]);
    assert!(Av.check_format().is_ok());

    let Ah = CscMatrix::hcat(&I1, &I2);
    assert_eq!(Ah.size(), (3, 6));
    assert_eq!(Ah.colptr, vec![0, 1, 2, 3, 4, 5, 6]);
    assert_eq!(Ah.rowval, vec![0, 1, 2, 0, 1, 2]);
    assert_eq!(Ah.nzval, vec![1., 1., 1., -1., -1., -1.]);

    let A = CscMatrix::from(&[[1., 2.], [0., 3.]]);
    let b = CscMatrix::from(&[[4.], [5.]]);
    let c = CscMatrix::from(&[[6., 0.]]);
    assert_eq!(
        CscMatrix::hcat(&A, &b),
        CscMatrix::from(&[[1., 2., 4.], [0., 3., 5.]])
    );
    assert_eq!(
        CscMatrix::vstack(&[&A, &c, &CscMatrix::zeros((0, 2))]).unwrap(),
        CscMatrix::from(&[[1., 2.], [0., 3.], [6., 0.]])
    );

    // bad dimensions and empty inputs
    assert_eq!(
        CscMatrix::<f64>::vstack(&[]),
        Err(SparseFormatError::EmptyStack)
    );
    assert_eq!(
        CscMatrix::vstack(&[&A, &b]),
        Err(SparseFormatError::IncompatibleDimension)
    );
}

#[test]
fn test_triplets() {
    let A = test_matrix_3x4();
    let t: Vec<(usize, usize, f64)> = A.triplets().collect();
    assert_eq!(t.len(), A.nnz());
    assert_eq!(t[0], (0, 0, -1.));
    assert_eq!(t[3], (2, 1, -4.));
    assert_eq!(t[7], (2, 3, -5.));

    let (I, (J, V)): (Vec<_>, (Vec<_>, Vec<_>)) = t.into_iter().map(|(i, j, v)| (i, (j, v))).unzip();
    assert_eq!(CscMatrix::new_from_triplets(3, 4, I, J, V), A);
}
