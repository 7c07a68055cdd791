#![allow(non_snake_case)]

use super::kktsystem::KktSystem;
use super::{LsSettings, SettingsError};
use crate::algebra::*;
use crate::timers::*;
use faer::linalg::solvers::Solve;
use faer::prelude::*;
use faer::sparse::linalg::solvers::Lu;
use faer::sparse::{SparseColMat, Triplet};
use std::fmt;

/// Direct solver holding a factorisation of the KKT matrix
pub trait DirectKktSolver<T: FloatT> {
    /// Solves `Kx = b` with the held factors
    fn solve(&self, x: &mut [T], b: &[T]);
}

/// Sparse LU factorisation with partial pivoting from `faer`.
///
/// The upper triangle of the KKT matrix is mirrored into a full matrix,
/// and the factorisation is computed in `f64` whatever the solver's
/// float type.
pub struct FaerLuSolver {
    // None for a 0×0 system
    lu: Option<Lu<usize, f64>>,
    n: usize,
}

impl FaerLuSolver {
    /// Factors `KKT`, given as its upper triangle.  A factorisation
    /// error is final.
    pub fn new<T: FloatT>(KKT: &CscMatrix<T>) -> Result<Self, KktSolveFailure> {
        assert!(KKT.is_square(), "KKT matrix is not square");
        let n = KKT.nrows();
        if n == 0 {
            return Ok(Self { lu: None, n });
        }

        let mut triplets = Vec::with_capacity(2 * KKT.nnz());
        for (row, col, v) in KKT.triplets().filter(|&(row, col, _)| row <= col) {
            let v = v.to_f64().unwrap_or(f64::NAN);
            if !v.is_finite() {
                return Err(KktSolveFailure::NonFinite);
            }
            triplets.push(Triplet::new(row, col, v));
            if row != col {
                triplets.push(Triplet::new(col, row, v));
            }
        }

        let K = SparseColMat::<usize, f64>::try_new_from_triplets(n, n, &triplets)
            .map_err(|_| KktSolveFailure::Structural)?;
        let lu = K.sp_lu().map_err(|_| KktSolveFailure::Singular)?;

        Ok(Self { lu: Some(lu), n })
    }
}

impl<T> DirectKktSolver<T> for FaerLuSolver
where
    T: FloatT,
{
    fn solve(&self, x: &mut [T], b: &[T]) {
        assert_eq!(x.len(), self.n);
        assert_eq!(b.len(), self.n);
        let Some(lu) = &self.lu else {
            return;
        };

        let rhs = Mat::<f64>::from_fn(self.n, 1, |i, _| b[i].to_f64().unwrap_or(f64::NAN));
        let sol = lu.solve(rhs);

        for (i, xi) in x.iter_mut().enumerate() {
            *xi = T::from_f64(sol[(i, 0)]).unwrap_or_else(T::nan);
        }
    }
}

type BoxedKktSolver<T> = Box<dyn DirectKktSolver<T>>;

pub(crate) type KktSolverConstructor<T> =
    fn(&CscMatrix<T>) -> Result<BoxedKktSolver<T>, KktSolveFailure>;

/// Factorisation selected by `direct_solve_method`.  Any new solver
/// type must be added here and to the settings validation.
pub(crate) fn kkt_solver_constructor<T>(
    settings: &LsSettings<T>,
) -> Result<KktSolverConstructor<T>, SettingsError>
where
    T: FloatT,
{
    let ctor: KktSolverConstructor<T> = match settings.direct_solve_method.as_str() {
        "faer" => |K| FaerLuSolver::new(K).map(|s| Box::new(s) as BoxedKktSolver<T>),
        _ => return Err(SettingsError::BadFieldValue("direct_solve_method")),
    };
    Ok(ctor)
}

/// Reason a KKT system could not be solved.
///
/// These are numerical outcomes rather than errors, and are reported
/// as infeasibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KktSolveFailure {
    /// the system has a row with no entries
    Structural,
    /// the factorisation found the matrix singular
    Singular,
    /// the solution does not satisfy the system to tolerance
    Residual,
    /// the data or the solution contains Inf or NaN values
    NonFinite,
}

impl fmt::Display for KktSolveFailure {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            KktSolveFailure::Structural => "structurally singular",
            KktSolveFailure::Singular => "singular factorisation",
            KktSolveFailure::Residual => "residual above tolerance",
            KktSolveFailure::NonFinite => "non-finite values",
        };
        write!(f, "{}", s)
    }
}

/// Solution of a KKT system together with solve diagnostics
#[derive(Debug, Clone)]
pub struct KktSolution<T> {
    /// the full solution `[x; ν]`
    pub x: Vec<T>,
    pub refine_iters: u32,
    /// ‖b - Kx‖∞
    pub residual: T,
}

/// Solves `Kx = rhs` with a single factorisation of `K`.  A singular
/// factorisation is final.  The refined solution is accepted only if
/// it is finite and passes the residual test.
pub(crate) fn solve_kkt<T: FloatT>(
    kkt: &KktSystem<T>,
    rhs: &[T],
    factor: KktSolverConstructor<T>,
    settings: &LsSettings<T>,
    timers: &mut Timers,
) -> Result<KktSolution<T>, KktSolveFailure> {
    assert_eq!(rhs.len(), kkt.dim());
    let K = &kkt.KKT;

    timeit! {timers => "factor";
        let factors = factor(K);
    }
    let solver = factors?;

    timeit! {timers => "solve";
        let sol = _solve_and_refine(solver.as_ref(), K, rhs, settings);
    }

    if !sol.x.all_finite() || !sol.residual.is_finite() {
        return Err(KktSolveFailure::NonFinite);
    }
    let tol = settings.kkt_residual_abstol + settings.kkt_residual_reltol * rhs.norm_inf();
    if sol.residual > tol {
        return Err(KktSolveFailure::Residual);
    }
    Ok(sol)
}

fn _solve_and_refine<T: FloatT>(
    solver: &dyn DirectKktSolver<T>,
    K: &CscMatrix<T>,
    b: &[T],
    settings: &LsSettings<T>,
) -> KktSolution<T> {
    let n = b.len();
    let mut x = vec![T::zero(); n];
    let mut e = vec![T::zero(); n];

    solver.solve(&mut x, b);

    let mut refine_iters = 0;
    let residual = if settings.iterative_refinement_enable {
        _iterative_refinement(solver, K, &mut x, b, &mut e, settings, &mut refine_iters)
    } else {
        _get_refine_error(&mut e, b, K, &x)
    };

    KktSolution {
        x,
        refine_iters,
        residual,
    }
}

// returns the final residual norm ‖b - Kx‖∞
fn _iterative_refinement<T: FloatT>(
    solver: &dyn DirectKktSolver<T>,
    K: &CscMatrix<T>,
    x: &mut Vec<T>,
    b: &[T],
    e: &mut [T],
    settings: &LsSettings<T>,
    iters: &mut u32,
) -> T {
    let reltol = settings.iterative_refinement_reltol;
    let abstol = settings.iterative_refinement_abstol;
    let stopratio = settings.iterative_refinement_stop_ratio;
    let tol = abstol + reltol * b.norm_inf();

    let mut dx = vec![T::zero(); x.len()];
    let mut norme = _get_refine_error(e, b, K, x);

    for _ in 0..settings.iterative_refinement_max_iter {
        if !norme.is_finite() || norme <= tol {
            break;
        }
        let lastnorme = norme;

        // candidate x + dx is built in dx and kept only if it helps
        solver.solve(&mut dx, e);
        *iters += 1;
        dx.axpy(T::one(), x);
        norme = _get_refine_error(e, b, K, &dx);

        let improved_ratio = lastnorme / norme;
        if improved_ratio > T::one() {
            std::mem::swap(x, &mut dx);
        } else {
            norme = lastnorme;
            break;
        }
        if improved_ratio < stopratio {
            break;
        }
    }
    norme
}

// e = b - Kξ for the symmetric K held as its upper triangle.
// Returns ‖e‖∞.
fn _get_refine_error<T: FloatT>(e: &mut [T], b: &[T], K: &CscMatrix<T>, ξ: &[T]) -> T {
    e.copy_from_slice(b);
    K.sym_mul_acc(e, ξ, -T::one());
    e.norm_inf()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solve(
        kkt: &KktSystem<f64>,
        rhs: &[f64],
        settings: &LsSettings<f64>,
    ) -> Result<KktSolution<f64>, KktSolveFailure> {
        let factor = kkt_solver_constructor(settings).unwrap();
        solve_kkt(kkt, rhs, factor, settings, &mut Timers::default())
    }

    #[test]
    fn test_exact_solve() {
        // min x₀² + x₁²  s.t. x₀ + x₁ = 1 (as P = I, Aᵀ = [1 1])
        let P = CscMatrix::from(&[[1., 0.], [0., 1.]]);
        let A = CscMatrix::from(&[[1., 1.]]);
        let kkt = KktSystem::new(&P, &A);
        let rhs = kkt.rhs(&[0., 0.], &[-1.]);

        let sol = solve(&kkt, &rhs, &LsSettings::default()).unwrap();
        assert!(sol.x.norm_inf_diff(&[0.5, 0.5, -0.5]) < 1e-12);
        assert!(sol.residual < 1e-12);
    }

    #[test]
    fn test_zero_diagonal_pivoting() {
        // P = 0 with A square and nonsingular.  Every diagonal entry of
        // the KKT matrix is zero, so the factorisation must pivot.
        let P = CscMatrix::<f64>::zeros((2, 2));
        let A = CscMatrix::from(&[[1., 1.], [1., -1.]]);
        let kkt = KktSystem::new(&P, &A);
        let rhs = kkt.rhs(&[0., 0.], &[-3., -1.]);

        let sol = solve(&kkt, &rhs, &LsSettings::default()).unwrap();
        assert!(sol.x.norm_inf_diff(&[2., 1., 0., 0.]) < 1e-12);
    }

    #[test]
    fn test_singular_consistent_is_final() {
        // P = [1 1; 1 1], q = -[1 1] has a line of minimizers, but the
        // KKT matrix is exactly singular
        let P = CscMatrix::from(&[[1., 1.], [0., 1.]]);
        let A = CscMatrix::<f64>::zeros((0, 2));
        let kkt = KktSystem::new(&P, &A);
        let rhs = kkt.rhs(&[-1., -1.], &[]);

        let failure = solve(&kkt, &rhs, &LsSettings::default()).unwrap_err();
        assert!(matches!(
            failure,
            KktSolveFailure::Singular | KktSolveFailure::NonFinite
        ));
    }

    #[test]
    fn test_redundant_rows_are_singular() {
        // the same constraint twice makes the KKT matrix singular
        let P = CscMatrix::<f64>::identity(2);
        let A = CscMatrix::from(&[[1., 0.], [1., 0.]]);
        let kkt = KktSystem::new(&P, &A);
        let rhs = kkt.rhs(&[0., 0.], &[-1., -1.]);

        let failure = solve(&kkt, &rhs, &LsSettings::default()).unwrap_err();
        assert!(matches!(
            failure,
            KktSolveFailure::Singular | KktSolveFailure::NonFinite
        ));
    }

    #[test]
    fn test_inconsistent_is_rejected() {
        // P = [1 1; 1 1], q = [1, -1] has no stationary point
        let P = CscMatrix::from(&[[1., 1.], [0., 1.]]);
        let A = CscMatrix::<f64>::zeros((0, 2));
        let kkt = KktSystem::new(&P, &A);
        let rhs = kkt.rhs(&[1., -1.], &[]);

        assert!(solve(&kkt, &rhs, &LsSettings::default()).is_err());
    }

    #[test]
    fn test_refinement_off() {
        let P = CscMatrix::from(&[[4., 1.], [0., 3.]]);
        let A = CscMatrix::from(&[[1., 2.]]);
        let kkt = KktSystem::new(&P, &A);
        let rhs = kkt.rhs(&[1., -1.], &[0.5]);

        let settings = LsSettings {
            iterative_refinement_enable: false,
            ..LsSettings::default()
        };
        let sol = solve(&kkt, &rhs, &settings).unwrap();
        assert_eq!(sol.refine_iters, 0);
        assert!(sol.residual < 1e-12);
    }

    #[test]
    fn test_unknown_method() {
        let settings = LsSettings::<f64> {
            direct_solve_method: "mumps".to_string(),
            ..LsSettings::default()
        };
        assert!(kkt_solver_constructor(&settings).is_err());
    }
}
