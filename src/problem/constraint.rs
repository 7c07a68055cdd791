use super::expression::collect_variables;
use super::{Expression, Variable};

/// A canonical constraint over expressions of type `E`
#[derive(Debug, Clone, PartialEq)]
pub enum Constraint<E> {
    /// `expr == 0`
    Eq(E),
    /// `expr <= 0`, elementwise
    Leq(E),
    /// `‖x‖₂ <= t`
    SecondOrderCone { t: E, x: E },
    /// `expr` is positive semidefinite
    Psd(E),
}

impl<E> Constraint<E>
where
    E: Expression,
{
    /// Variables in the constraint, in order of first appearance
    pub fn variables(&self) -> Vec<Variable> {
        match self {
            Constraint::Eq(e) | Constraint::Leq(e) | Constraint::Psd(e) => e.variables(),
            Constraint::SecondOrderCone { t, x } => {
                let vars = t.variables();
                collect_variables(vars.iter().chain(x.variables().iter()))
            }
        }
    }

    /// DCP rules for constraints: equalities and cone arguments must be
    /// affine, inequalities `f(x) <= 0` need convex `f`.
    pub fn is_dcp(&self) -> bool {
        match self {
            Constraint::Eq(e) => e.is_affine(),
            Constraint::Leq(e) => e.is_convex(),
            Constraint::SecondOrderCone { t, x } => t.is_affine() && x.is_affine(),
            Constraint::Psd(e) => e.is_affine(),
        }
    }

    /// True for an equality with an affine expression
    pub fn is_linear_equality(&self) -> bool {
        matches!(self, Constraint::Eq(e) if e.is_affine())
    }

    /// The expression constrained to zero, if this is an equality
    pub fn equality_expr(&self) -> Option<&E> {
        match self {
            Constraint::Eq(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algebra::CscMatrix;
    use crate::problem::{AffineForm, QuadForm};

    #[test]
    fn test_constraint_dcp() {
        let x = Variable::vector(2);
        let ex = AffineForm::<f64>::variable(&x);

        assert!(Constraint::Eq(ex.clone()).is_dcp());
        assert!(Constraint::Eq(ex.clone()).is_linear_equality());
        assert!(!Constraint::Leq(ex.clone()).is_linear_equality());

        let convex = QuadForm::sum_squares(&ex);
        assert!(Constraint::Leq(convex.clone()).is_dcp());
        assert!(!Constraint::Eq(convex.clone()).is_dcp());
        assert!(!Constraint::Leq(convex.scale(-1.)).is_dcp());
        assert!(!Constraint::Psd(convex).is_dcp());

        let t = Variable::scalar();
        let soc = Constraint::SecondOrderCone {
            t: AffineForm::variable(&t),
            x: ex,
        };
        assert!(soc.is_dcp());
        let ids: Vec<_> = soc.variables().iter().map(|v| v.id()).collect();
        assert_eq!(ids, vec![t.id(), x.id()]);
        assert!(soc.equality_expr().is_none());
    }

    #[test]
    fn test_constraint_equality_expr() {
        let x = Variable::vector(2);
        let e = AffineForm::from_terms(vec![(x, CscMatrix::from(&[[1., 1.]]))], vec![-1.]).unwrap();
        let c = Constraint::Eq(e.clone());
        assert_eq!(c.equality_expr(), Some(&e));
    }
}
