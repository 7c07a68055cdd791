#![allow(non_snake_case)]

use eqkkt::{algebra::*, solver::*};

fn assert_infeasible(result: &SolveResult<f64>) {
    assert_eq!(result.status, SolverStatus::Infeasible);
    assert!(result.value.is_none());
    assert!(result.primal.is_none());
    assert!(result.eq_dual.is_none());

    let map = result.to_map();
    assert_eq!(map.len(), 1);
    assert_eq!(map[STATUS], ResultValue::Status(SolverStatus::Infeasible));
}

#[test]
fn test_all_zero_problem() {
    // P = 0, q = 0, A = 0 with a single row
    let data = LsProblemData::new(
        CscMatrix::zeros((1, 1)),
        vec![0.],
        0.,
        CscMatrix::zeros((1, 1)),
        vec![0.],
    )
    .unwrap();

    let mut solver = LsSolver::new(LsSettings::default()).unwrap();
    let result = solver.solve_data(&data).unwrap();

    assert_infeasible(&result);
    assert_eq!(solver.info.failure, Some(KktSolveFailure::Structural));
    assert_eq!(solver.info.status, Some(SolverStatus::Infeasible));
}

#[test]
fn test_stored_zeros_are_dropped() {
    // explicit zeros in P and A still make an empty KKT row
    let P = CscMatrix::new(1, 1, vec![0, 1], vec![0], vec![0.]);
    let A = CscMatrix::new(1, 1, vec![0, 1], vec![0], vec![0.]);
    let data = LsProblemData::new(P, vec![1.], 0., A, vec![1.]).unwrap();

    let mut solver = LsSolver::new(LsSettings::default()).unwrap();
    let result = solver.solve_data(&data).unwrap();

    assert_infeasible(&result);
    assert_eq!(solver.info.failure, Some(KktSolveFailure::Structural));
}

#[test]
fn test_unbounded_unconstrained() {
    // minimize 2x with no constraints
    let data = LsProblemData::new(
        CscMatrix::zeros((1, 1)),
        vec![1.],
        0.,
        CscMatrix::zeros((0, 1)),
        vec![],
    )
    .unwrap();

    let mut solver = LsSolver::new(LsSettings::default()).unwrap();
    let result = solver.solve_data(&data).unwrap();
    assert_infeasible(&result);
}

#[test]
fn test_inconsistent_constraints() {
    // x = 1 and x = 2
    let P = CscMatrix::identity(1);
    let A = CscMatrix::from(&[[1.], [1.]]);
    let data = LsProblemData::new(P, vec![0.], 0., A, vec![-1., -2.]).unwrap();

    let mut solver = LsSolver::new(LsSettings::default()).unwrap();
    let result = solver.solve_data(&data).unwrap();

    assert_infeasible(&result);
    assert!(solver.info.failure.is_some());
    assert!(solver.info.residual.is_nan());
}

fn assert_singular(solver: &LsSolver<f64>) {
    assert!(matches!(
        solver.info.failure,
        Some(KktSolveFailure::Singular) | Some(KktSolveFailure::NonFinite)
    ));
}

#[test]
fn test_redundant_constraints() {
    // x = 1 twice: consistent, but the KKT matrix is exactly singular
    let P = CscMatrix::identity(1);
    let A = CscMatrix::from(&[[1.], [1.]]);
    let data = LsProblemData::new(P, vec![0.], 0., A, vec![-1., -1.]).unwrap();

    let mut solver = LsSolver::new(LsSettings::default()).unwrap();
    let result = solver.solve_data(&data).unwrap();

    assert_infeasible(&result);
    assert_singular(&solver);
}

#[test]
fn test_redundant_constraints_two_variables() {
    // x₀ = 1 twice, with P = I
    let P = CscMatrix::identity(2);
    let A = CscMatrix::from(&[[1., 0.], [1., 0.]]);
    let data = LsProblemData::new(P, vec![0., 0.], 0., A, vec![-1., -1.]).unwrap();

    let mut solver = LsSolver::new(LsSettings::default()).unwrap();
    let result = solver.solve_data(&data).unwrap();

    assert_infeasible(&result);
    assert_singular(&solver);
}

#[test]
fn test_singular_objective_without_constraints() {
    // P = [1 1; 1 1], q = 0: every x with x₀ = -x₁ is optimal, but
    // P is exactly singular
    let P = CscMatrix::from(&[[1., 1.], [1., 1.]]);
    let data = LsProblemData::new(P, vec![0., 0.], 0., CscMatrix::zeros((0, 2)), vec![]).unwrap();

    let mut solver = LsSolver::new(LsSettings::default()).unwrap();
    let result = solver.solve_data(&data).unwrap();

    assert_infeasible(&result);
    assert_singular(&solver);
}

#[test]
fn test_singular_p_with_full_rank_constraints() {
    // P = 0 is singular on its own, but A is square and invertible,
    // so the KKT matrix is not
    let data = LsProblemData::new(
        CscMatrix::zeros((2, 2)),
        vec![0., 0.],
        0.,
        CscMatrix::from(&[[1., 1.], [1., -1.]]),
        vec![-3., -1.],
    )
    .unwrap();

    let mut solver = LsSolver::new(LsSettings::default()).unwrap();
    let result = solver.solve_data(&data).unwrap();

    assert_eq!(result.status, SolverStatus::Optimal);
    let x = result.primal.unwrap();
    assert!(x.norm_inf_diff(&[2., 1.]) <= 1e-10);
    assert!(f64::abs(result.value.unwrap()) <= 1e-12);
}
