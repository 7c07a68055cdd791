use crate::problem::{Constraint, Expression, Problem};

/// True if a problem can be solved through a single KKT system.
///
/// That is the case when all of the following hold:
/// - the problem is DCP,
/// - the objective is quadratic but not affine,
/// - every constraint is an equality,
/// - every variable is of a kind the KKT solve supports
///   (see [`VariableKind::is_ls_compatible`](crate::problem::VariableKind::is_ls_compatible)),
/// - no variable carries a sign restriction.
pub fn suitable<O, E>(problem: &Problem<O, E>) -> bool
where
    O: Expression,
    E: Expression,
{
    let objective = problem.objective.expr();
    let variables = problem.variables();

    problem.is_dcp()
        && objective.is_quadratic()
        && !objective.is_affine()
        && problem
            .constraints
            .iter()
            .all(|c| matches!(c, Constraint::Eq(_)))
        && variables.iter().all(|v| v.kind().is_ls_compatible())
        && variables.iter().all(|v| v.domain().is_none())
}
