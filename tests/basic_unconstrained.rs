#![allow(non_snake_case)]

use eqkkt::{algebra::*, solver::*};

fn basic_unconstrained_data() -> LsProblemData<f64> {
    // P = [4. 1;1 2]
    let P = CscMatrix::new(
        2,                    // m
        2,                    // n
        vec![0, 2, 4],        // colptr
        vec![0, 1, 0, 1],     // rowval
        vec![4., 1., 1., 2.], // nzval
    );
    let q = vec![1., 1.];
    let A = CscMatrix::zeros((0, 2));

    LsProblemData::new(P, q, 0., A, vec![]).unwrap()
}

fn quiet_solver() -> LsSolver<f64> {
    LsSolver::new(LsSettings::default()).unwrap()
}

#[test]
fn test_unconstrained_feasible() {
    let data = basic_unconstrained_data();
    let mut solver = quiet_solver();
    let result = solver.solve_data(&data).unwrap();

    assert_eq!(result.status, SolverStatus::Optimal);

    // x = -P⁻¹q, value = -qᵀP⁻¹q
    let x = result.primal.unwrap();
    let refsol = [-1. / 7., -3. / 7.];
    assert!(x.dist(&refsol) <= 1e-10);
    assert!(f64::abs(result.value.unwrap() + 4. / 7.) <= 1e-10);

    let nu = result.eq_dual.unwrap();
    assert!(nu.is_empty());
}

#[test]
fn test_unconstrained_offset() {
    let mut data = basic_unconstrained_data();
    data.r = 3.;
    let mut solver = quiet_solver();
    let result = solver.solve_data(&data).unwrap();

    assert_eq!(result.status, SolverStatus::Optimal);
    assert!(f64::abs(result.value.unwrap() - (3. - 4. / 7.)) <= 1e-10);
}

#[test]
fn test_unconstrained_info() {
    let data = basic_unconstrained_data();
    let mut solver = quiet_solver();
    solver.solve_data(&data).unwrap();

    assert!(solver.info.failure.is_none());
    assert!(solver.info.residual <= 1e-8);
    assert_eq!(solver.info.n, 2);
    assert_eq!(solver.info.m, 0);
    // triu of P only
    assert_eq!(solver.info.nnzKKT, 3);
}

#[test]
fn test_unconstrained_timers() {
    let data = basic_unconstrained_data();
    let mut solver = quiet_solver();
    let result = solver.solve_data(&data).unwrap();

    assert!(result.solve_time >= 0.);
    for phase in ["setup", "kkt assembly", "factor", "solve"] {
        assert!(solver.info.phase_time(phase).is_some(), "missing {}", phase);
    }
    // no extraction when solving from data
    assert!(solver.info.phase_time("extraction").is_none());
}

#[test]
fn test_unconstrained_f32() {
    let P = CscMatrix::<f32>::from(&[[2., 0.], [0., 8.]]);
    let data = LsProblemData::new(P, vec![-2., 4.], 0., CscMatrix::zeros((0, 2)), vec![])
        .unwrap();
    let mut solver = LsSolver::<f32>::new(LsSettings::default()).unwrap();
    let result = solver.solve_data(&data).unwrap();

    assert_eq!(result.status, SolverStatus::Optimal);
    let x = result.primal.unwrap();
    assert!((x[0] - 1.).abs() <= 1e-5);
    assert!((x[1] + 0.5).abs() <= 1e-5);
}
