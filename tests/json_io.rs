#![allow(non_snake_case)]

#[cfg(feature = "serde")]
#[test]
fn test_json_io() {
    use eqkkt::{algebra::*, solver::*};
    use std::io::{Seek, SeekFrom};

    // minimize ‖x‖² subject to x₀ + x₁ = 1
    let P = CscMatrix::identity(2);
    let A = CscMatrix::from(&[[1., 1.]]);
    let data = LsProblemData::new(P, vec![0., 0.], 0., A, vec![-1.]).unwrap();
    let settings = LsSettingsBuilder::default()
        .kkt_residual_abstol(1e-12)
        .build()
        .unwrap();

    // write the problem to a file
    let mut file = tempfile::tempfile().unwrap();
    data.write_to_file(&mut file, &settings).unwrap();

    // read the problem from the file
    file.seek(SeekFrom::Start(0)).unwrap();
    let (data2, settings2) = LsProblemData::<f64>::read_from_file(&mut file).unwrap();
    assert_eq!(settings2.kkt_residual_abstol, 1e-12);

    let mut solver = LsSolver::new(settings).unwrap();
    let mut solver2 = LsSolver::new(settings2).unwrap();
    let result = solver.solve_data(&data).unwrap();
    let result2 = solver2.solve_data(&data2).unwrap();
    assert_eq!(result.primal, result2.primal);
    assert_eq!(result.eq_dual, result2.eq_dual);
}

#[cfg(feature = "serde")]
#[test]
fn test_json_bad_settings() {
    use eqkkt::{algebra::*, solver::*};
    use std::io::{Seek, SeekFrom, Write};

    let data = LsProblemData::new(
        CscMatrix::<f64>::identity(1),
        vec![0.],
        0.,
        CscMatrix::zeros((0, 1)),
        vec![],
    )
    .unwrap();
    let mut file = tempfile::tempfile().unwrap();
    data.write_to_file(&mut file, &LsSettings::default()).unwrap();

    // swap in an unknown linear solver
    file.seek(SeekFrom::Start(0)).unwrap();
    let json = std::io::read_to_string(&mut file).unwrap();
    let json = json.replace("\"faer\"", "\"nosuchsolver\"");
    let mut file = tempfile::tempfile().unwrap();
    file.write_all(json.as_bytes()).unwrap();
    file.seek(SeekFrom::Start(0)).unwrap();

    let err = LsProblemData::<f64>::read_from_file(&mut file).unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
}

#[cfg(feature = "serde")]
#[test]
fn test_result_serialization() {
    use eqkkt::{algebra::*, solver::*};

    let data = LsProblemData::new(
        CscMatrix::<f64>::identity(1),
        vec![-1.],
        0.,
        CscMatrix::zeros((0, 1)),
        vec![],
    )
    .unwrap();
    let mut solver = LsSolver::new(LsSettings::default()).unwrap();
    let result = solver.solve_data(&data).unwrap();

    let json = serde_json::to_string(&result).unwrap();
    assert!(json.contains("\"status\":\"optimal\""));
    assert!(json.contains("\"eq_dual\":[]"));

    let result2: SolveResult<f64> = serde_json::from_str(&json).unwrap();
    assert_eq!(result2.status, SolverStatus::Optimal);
    assert_eq!(result2.primal, result.primal);
}
