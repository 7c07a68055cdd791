#![allow(non_snake_case)]
use eqkkt::algebra::*;
use eqkkt::problem::*;
use eqkkt::solver::*;

fn main() {
    // minimum norm solution of an underdetermined system
    //
    //   minimize    ‖x‖²
    //   subject to  Cx = d

    let x = Variable::vector(4);

    let C = CscMatrix::from(&[
        [1., 2., 0., 1.], //
        [0., 1., 1., -1.], //
    ]);
    let d = vec![3., 1.];

    let objective = Objective::Minimize(QuadForm::sum_squares(&AffineForm::variable(&x)));

    // Cx - d = 0
    let residual = AffineForm::from_terms(vec![(x.clone(), C)], d.iter().map(|v| -v).collect())
        .unwrap();
    let problem = Problem::new(objective, vec![Constraint::Eq(residual)]);

    let settings = LsSettingsBuilder::default().verbose(true).build().unwrap();
    let mut solver = LsSolver::new(settings).unwrap();
    let result = solver.solve_problem(&problem).unwrap();

    println!("status  = {}", result.status);
    if let (Some(value), Some(primal), Some(dual)) = (result.value, result.primal, result.eq_dual) {
        println!("value   = {}", value);
        println!("x       = {:?}", primal);
        println!("eq_dual = {:?}", dual);
    }
}
