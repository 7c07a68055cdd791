use super::{KktSolution, KktSolveFailure, LsProblemData, SolverStatus};
use crate::algebra::*;
use crate::timers::*;
use std::time::Duration;

/// Diagnostics collected during a solve
#[derive(Default, Debug, Clone)]
pub struct LsInfo<T> {
    /// number of variables
    pub n: usize,
    /// number of equality constraint rows
    pub m: usize,
    pub nnzP: usize,
    pub nnzA: usize,
    pub nnzKKT: usize,
    /// iterative refinement steps taken
    pub refine_iters: u32,
    /// ‖b - Kx‖∞ of the accepted KKT solution
    pub residual: T,
    /// why the KKT solve failed, if it did
    pub failure: Option<KktSolveFailure>,
    pub status: Option<SolverStatus>,
    /// objective value of the solution, if any
    pub objective: Option<T>,
    /// solve time in seconds
    pub solve_time: f64,
    pub timers: Timers,
}

impl<T> LsInfo<T>
where
    T: FloatT,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn save_dimensions(&mut self, data: &LsProblemData<T>, nnzKKT: usize) {
        self.n = data.n();
        self.m = data.m();
        self.nnzP = data.P.nnz();
        self.nnzA = data.A.nnz();
        self.nnzKKT = nnzKKT;
    }

    pub(crate) fn save_kkt_outcome(&mut self, outcome: &Result<KktSolution<T>, KktSolveFailure>) {
        match outcome {
            Ok(sol) => {
                self.refine_iters = sol.refine_iters;
                self.residual = sol.residual;
                self.failure = None;
            }
            Err(failure) => {
                self.residual = T::nan();
                self.failure = Some(*failure);
            }
        }
    }

    pub(crate) fn finalize(&mut self, status: SolverStatus, objective: Option<T>, timers: &Timers) {
        self.status = Some(status);
        self.objective = objective;
        self.solve_time = timers.total_time().as_secs_f64();
        self.timers = timers.clone();
    }

    /// Time spent in a named phase of the solve, e.g. `"extraction"`
    /// or `"factor"`.  Phases run inside the `"total"` timer.
    pub fn phase_time(&self, phase: &'static str) -> Option<Duration> {
        self.timers.elapsed(&["total", phase])
    }
}
