use super::expression::collect_variables;
use super::{Constraint, Expression, ExtractionError, QuadraticCoeffs, Variable};
use crate::algebra::{CscMatrix, FloatT, MatrixMath};
use crate::solver::SymData;

/// Optimisation sense together with the objective expression
#[derive(Debug, Clone, PartialEq)]
pub enum Objective<E> {
    Minimize(E),
    Maximize(E),
}

impl<E> Objective<E> {
    /// The objective expression, regardless of sense
    pub fn expr(&self) -> &E {
        match self {
            Objective::Minimize(e) | Objective::Maximize(e) => e,
        }
    }

    pub fn is_maximize(&self) -> bool {
        matches!(self, Objective::Maximize(_))
    }
}

impl<E> Objective<E>
where
    E: Expression,
{
    pub fn variables(&self) -> Vec<Variable> {
        self.expr().variables()
    }

    /// Minimize a convex or maximize a concave expression
    pub fn is_dcp(&self) -> bool {
        match self {
            Objective::Minimize(e) => e.is_convex(),
            Objective::Maximize(e) => e.is_concave(),
        }
    }
}

// Coefficients of the equivalent minimisation, i.e. `-f` for `maximize f`
impl<T, E> QuadraticCoeffs<T> for Objective<E>
where
    T: FloatT,
    E: QuadraticCoeffs<T>,
{
    fn quad_coeffs(&self, symdata: &SymData) -> Result<CscMatrix<T>, ExtractionError> {
        match self {
            Objective::Minimize(e) => e.quad_coeffs(symdata),
            Objective::Maximize(e) => {
                let mut M = e.quad_coeffs(symdata)?;
                M.negate();
                Ok(M)
            }
        }
    }
}

/// An objective together with a list of constraints
#[derive(Debug, Clone, PartialEq)]
pub struct Problem<O, E> {
    pub objective: Objective<O>,
    pub constraints: Vec<Constraint<E>>,
}

impl<O, E> Problem<O, E>
where
    O: Expression,
    E: Expression,
{
    pub fn new(objective: Objective<O>, constraints: Vec<Constraint<E>>) -> Self {
        Self {
            objective,
            constraints,
        }
    }

    /// Variables of the objective, then of each constraint in turn,
    /// without repeats
    pub fn variables(&self) -> Vec<Variable> {
        let mut vars = self.objective.variables();
        for c in &self.constraints {
            vars.extend(c.variables());
        }
        collect_variables(&vars)
    }

    pub fn is_dcp(&self) -> bool {
        self.objective.is_dcp() && self.constraints.iter().all(|c| c.is_dcp())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::{AffineForm, QuadForm};

    #[test]
    fn test_problem_variables_and_dcp() {
        let x = Variable::vector(2);
        let y = Variable::scalar();
        let f = QuadForm::<f64>::sum_squares(&AffineForm::variable(&x));
        let g = AffineForm::from_terms(
            vec![
                (y.clone(), CscMatrix::from(&[[1.]])),
                (x.clone(), CscMatrix::from(&[[1., 1.]])),
            ],
            vec![0.],
        )
        .unwrap();

        let prob = Problem::new(Objective::Minimize(f.clone()), vec![Constraint::Eq(g.clone())]);
        let ids: Vec<_> = prob.variables().iter().map(|v| v.id()).collect();
        assert_eq!(ids, vec![x.id(), y.id()]);
        assert!(prob.is_dcp());

        let prob = Problem::new(Objective::Maximize(f), vec![Constraint::Eq(g)]);
        assert!(!prob.is_dcp());
        assert!(prob.objective.is_maximize());
    }

    #[test]
    fn test_maximize_negates_coeffs() {
        let x = Variable::scalar();
        let symdata = SymData::new(&[x.clone()]).unwrap();
        let f = QuadForm::sum_squares(&AffineForm::variable(&x)).scale(-1.);

        let Mmax = Objective::Maximize(f.clone()).quad_coeffs(&symdata).unwrap();
        let Mmin = Objective::Minimize(f).quad_coeffs(&symdata).unwrap();
        assert_eq!(Mmax.get_entry((0, 0)), Some(1.));
        assert_eq!(Mmin.get_entry((0, 0)), Some(-1.));
    }
}
