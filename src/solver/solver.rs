#![allow(non_snake_case)]

use super::directsolve::{kkt_solver_constructor, solve_kkt, KktSolverConstructor};
use super::info_print::print_banner;
use super::kktsystem::{find_empty_kkt_row, KktSystem};
use super::*;
use crate::algebra::*;
use crate::io::{ConfigurablePrintTarget, PrintTarget};
use crate::problem::*;
use crate::timers::*;

/// Problem classes a solver backend accepts through the general
/// conic path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SolverCapabilities {
    pub lp: bool,
    pub socp: bool,
    pub sdp: bool,
    pub exp: bool,
    pub mip: bool,
}

/// Constraints of a problem sorted by how a backend treats them
#[derive(Debug)]
pub struct ConstraintSplit<'a, E> {
    pub eq: Vec<&'a Constraint<E>>,
    pub ineq: Vec<&'a Constraint<E>>,
    pub nonlinear: Vec<&'a Constraint<E>>,
}

/// Interface of a solver backend to the modeling layer
pub trait Solver<T: FloatT, O, E> {
    /// The name of the solver
    fn name(&self) -> &'static str;

    /// Problem classes accepted through the general conic path
    fn capabilities(&self) -> SolverCapabilities;

    /// Sorts constraints into equalities, inequalities and nonlinear
    /// constraints
    fn split_constraints<'a>(&self, constraints: &'a [Constraint<E>]) -> ConstraintSplit<'a, E>;

    /// True if the backend can solve the problem
    fn suitable(&self, problem: &Problem<O, E>) -> bool;

    /// Builds the variable offset map for a problem
    fn get_sym_data(
        &self,
        objective: &Objective<O>,
        constraints: &[Constraint<E>],
        cached: Option<&SymData>,
    ) -> Result<SymData, LsError>;

    /// Solves a problem given its variable offset map
    fn solve(
        &mut self,
        objective: &Objective<O>,
        constraints: &[Constraint<E>],
        symdata: &SymData,
    ) -> Result<SolveResult<T>, LsError>;
}

/// Solver for equality constrained quadratic programs through a
/// single KKT system.
///
/// ```
/// use eqkkt::algebra::CscMatrix;
/// use eqkkt::problem::*;
/// use eqkkt::solver::*;
///
/// // minimize ‖x‖² subject to x₀ + x₁ = 1
/// let x = Variable::vector(2);
/// let objective = Objective::Minimize(QuadForm::sum_squares(&AffineForm::variable(&x)));
/// let row = AffineForm::from_terms(vec![(x.clone(), CscMatrix::from(&[[1., 1.]]))], vec![-1.]).unwrap();
/// let problem = Problem::new(objective, vec![Constraint::Eq(row)]);
///
/// let mut solver = LsSolver::<f64>::new(LsSettings::default()).unwrap();
/// let result = solver.solve_problem(&problem).unwrap();
///
/// assert_eq!(result.status, SolverStatus::Optimal);
/// let primal = result.primal.unwrap();
/// assert!((primal[0] - 0.5).abs() < 1e-10);
/// assert!((result.value.unwrap() - 0.5).abs() < 1e-10);
/// ```
#[derive(Debug)]
pub struct LsSolver<T: FloatT> {
    pub settings: LsSettings<T>,
    /// diagnostics of the most recent solve
    pub info: LsInfo<T>,
    stream: PrintTarget,
}

impl<T> LsSolver<T>
where
    T: FloatT,
{
    pub fn new(settings: LsSettings<T>) -> Result<Self, SettingsError> {
        settings.validate()?;
        Ok(Self {
            settings,
            info: LsInfo::new(),
            stream: PrintTarget::default(),
        })
    }

    /// Solves a problem from already extracted data
    pub fn solve_data(&mut self, data: &LsProblemData<T>) -> Result<SolveResult<T>, LsError> {
        let factor = self.checked_settings()?;
        data.check()?;

        let mut timers = Timers::default();
        self.info = LsInfo::new();

        timeit! {timers => "total";
            let solution = self.solve_extracted(data.clone(), false, factor, &mut timers);
        }

        Ok(self.finish(solution, &timers))
    }

    /// Checks suitability, builds the variable offset map and solves
    pub fn solve_problem<O, E>(&mut self, problem: &Problem<O, E>) -> Result<SolveResult<T>, LsError>
    where
        O: Expression + QuadraticCoeffs<T>,
        E: Expression + AffineCoeffs<T>,
    {
        if !Solver::<T, O, E>::suitable(self, problem) {
            return Err(LsError::NotSuitable);
        }
        let symdata = self.get_sym_data(&problem.objective, &problem.constraints, None)?;
        Solver::<T, O, E>::solve(self, &problem.objective, &problem.constraints, &symdata)
    }

    // settings are public fields, so they are checked again on every
    // solve rather than only at construction
    fn checked_settings(&self) -> Result<KktSolverConstructor<T>, LsError> {
        self.settings.validate()?;
        Ok(kkt_solver_constructor(&self.settings)?)
    }

    // everything after coefficient extraction.  Returns (x, ν, value),
    // or None when the KKT solve fails.
    fn solve_extracted(
        &mut self,
        mut data: LsProblemData<T>,
        is_maximize: bool,
        factor: KktSolverConstructor<T>,
        timers: &mut Timers,
    ) -> Option<(Vec<T>, Vec<T>, T)> {
        let settings = &self.settings;

        // a failed write to the print target never fails the solve
        print_banner(&mut self.stream, settings.verbose).ok();

        timeit! {timers => "setup";
            if settings.input_sparse_dropzeros {
                data.dropzeros();
            }
            let Ptriu = data.P.to_triu();
            let empty_row = find_empty_kkt_row(&Ptriu, &data.A);
        }

        // with no constraints this is just P
        timeit! {timers => "kkt assembly";
            let kkt = KktSystem::new(&Ptriu, &data.A);
            let rhs = kkt.rhs(&data.q, &data.b);
        }

        self.info.save_dimensions(&data, kkt.KKT.nnz());
        self.info.print_configuration(&mut self.stream, settings).ok();

        let outcome = match empty_row {
            Some(_) => Err(KktSolveFailure::Structural),
            None => solve_kkt(&kkt, &rhs, factor, settings, timers),
        };
        self.info.save_kkt_outcome(&outcome);

        let sol = outcome.ok()?;
        let n = data.n();
        let two: T = (2.0).as_T();

        let x = sol.x[..n].to_vec();
        // multiplier of the objective xᵀPx + 2qᵀx + r
        let nu = sol.x[n..].iter().map(|&v| two * v).collect();
        let value = data.objective_value(&x);
        let value = if is_maximize { -value } else { value };

        Some((x, nu, value))
    }

    fn finish(&mut self, solution: Option<(Vec<T>, Vec<T>, T)>, timers: &Timers) -> SolveResult<T> {
        let (status, objective) = match &solution {
            Some((_, _, value)) => (SolverStatus::Optimal, Some(*value)),
            None => (SolverStatus::Infeasible, None),
        };
        self.info.finalize(status, objective, timers);
        self.info.print_footer(&mut self.stream, &self.settings).ok();

        let (x, nu, value) = match solution {
            Some((x, nu, value)) => (Some(x), Some(nu), Some(value)),
            None => (None, None, None),
        };
        SolveResult::format(x, nu, value, self.info.clone())
    }
}

impl<T, O, E> Solver<T, O, E> for LsSolver<T>
where
    T: FloatT,
    O: Expression + QuadraticCoeffs<T>,
    E: Expression + AffineCoeffs<T>,
{
    fn name(&self) -> &'static str {
        "LS"
    }

    // none: this backend is only reached through the quadratic path
    fn capabilities(&self) -> SolverCapabilities {
        SolverCapabilities::default()
    }

    fn split_constraints<'a>(&self, constraints: &'a [Constraint<E>]) -> ConstraintSplit<'a, E> {
        let (eq, ineq): (Vec<_>, Vec<_>) = constraints
            .iter()
            .partition(|c| matches!(c, Constraint::Eq(_)));
        ConstraintSplit {
            eq,
            ineq,
            nonlinear: Vec::new(),
        }
    }

    fn suitable(&self, problem: &Problem<O, E>) -> bool {
        suitable(problem)
    }

    // the offset map is cheap to build, so a cached one is not reused
    fn get_sym_data(
        &self,
        objective: &Objective<O>,
        constraints: &[Constraint<E>],
        _cached: Option<&SymData>,
    ) -> Result<SymData, LsError> {
        SymData::from_problem(objective, constraints)
    }

    fn solve(
        &mut self,
        objective: &Objective<O>,
        constraints: &[Constraint<E>],
        symdata: &SymData,
    ) -> Result<SolveResult<T>, LsError> {
        let factor = self.checked_settings()?;
        let mut timers = Timers::default();
        self.info = LsInfo::new();

        timeit! {timers => "total";
            timeit! {timers => "extraction";
                let data = _extract(objective, constraints, symdata);
            }
            let solution = data.map(|data| {
                self.solve_extracted(data, objective.is_maximize(), factor, &mut timers)
            });
        }

        let solution = solution?;
        Ok(self.finish(solution, &timers))
    }
}

fn _extract<T, O, E>(
    objective: &Objective<O>,
    constraints: &[Constraint<E>],
    symdata: &SymData,
) -> Result<LsProblemData<T>, LsError>
where
    T: FloatT,
    O: QuadraticCoeffs<T>,
    E: AffineCoeffs<T>,
{
    let exprs = constraints
        .iter()
        .enumerate()
        .map(|(i, c)| match c {
            Constraint::Eq(e) => Ok(e),
            _ => Err(LsError::UnsupportedConstraint(i)),
        })
        .collect::<Result<Vec<&E>, LsError>>()?;

    LsProblemData::from_expressions(objective, &exprs, symdata)
}

impl<T> ConfigurablePrintTarget for LsSolver<T>
where
    T: FloatT,
{
    fn print_target(&mut self) -> &mut PrintTarget {
        &mut self.stream
    }
}
