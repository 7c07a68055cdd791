use super::LsInfo;
use crate::algebra::FloatT;
use std::collections::BTreeMap;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// key of the solve status in [`SolveResult::to_map`]
pub const STATUS: &str = "status";
/// key of the optimal value
pub const VALUE: &str = "value";
/// key of the primal solution
pub const PRIMAL: &str = "primal";
/// key of the equality constraint dual
pub const EQ_DUAL: &str = "eq_dual";

/// Status of the solver at termination
#[derive(PartialEq, Eq, Clone, Debug, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SolverStatus {
    /// The KKT system was solved
    Optimal,
    /// The KKT system is singular, so no solution is reported
    Infeasible,
}

impl fmt::Display for SolverStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SolverStatus::Optimal => write!(f, "optimal"),
            SolverStatus::Infeasible => write!(f, "infeasible"),
        }
    }
}

/// A single entry of a result map
#[derive(PartialEq, Clone, Debug)]
pub enum ResultValue<T> {
    Status(SolverStatus),
    Scalar(T),
    Vector(Vec<T>),
}

/// Result of a solve.
///
/// When the status is [`Infeasible`](SolverStatus::Infeasible) the value,
/// primal and dual are all `None`, otherwise they are all defined.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(bound = "T: Serialize + DeserializeOwned + Default")
)]
pub struct SolveResult<T> {
    pub status: SolverStatus,
    /// optimal objective value
    pub value: Option<T>,
    /// primal solution, indexed by the variable offset map
    pub primal: Option<Vec<T>>,
    /// equality constraint dual, one entry per stacked constraint row.
    ///
    /// This is the multiplier of the objective `xᵀPx + 2qᵀx + r`, so
    /// it is twice the dual block `ν` of the KKT solution and satisfies
    /// `2Px + 2q + Aᵀν = 0`.
    pub eq_dual: Option<Vec<T>>,
    /// solve time in seconds
    pub solve_time: f64,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub info: LsInfo<T>,
}

impl<T> SolveResult<T>
where
    T: FloatT,
{
    /// Packages a solution.  An undefined primal means the problem was
    /// found infeasible, and the other parts are then ignored.
    pub fn format(
        x: Option<Vec<T>>,
        nu: Option<Vec<T>>,
        p_star: Option<T>,
        info: LsInfo<T>,
    ) -> Self {
        let solve_time = info.solve_time;
        match (x, nu, p_star) {
            (Some(x), Some(nu), Some(p)) => Self {
                status: SolverStatus::Optimal,
                value: Some(p),
                primal: Some(x),
                eq_dual: Some(nu),
                solve_time,
                info,
            },
            _ => Self {
                status: SolverStatus::Infeasible,
                value: None,
                primal: None,
                eq_dual: None,
                solve_time,
                info,
            },
        }
    }

    /// The result as a map with keys [`STATUS`], [`VALUE`], [`PRIMAL`]
    /// and [`EQ_DUAL`].  Undefined entries are absent.
    pub fn to_map(&self) -> BTreeMap<&'static str, ResultValue<T>> {
        let mut map = BTreeMap::new();
        map.insert(STATUS, ResultValue::Status(self.status));
        if let Some(v) = self.value {
            map.insert(VALUE, ResultValue::Scalar(v));
        }
        if let Some(ref x) = self.primal {
            map.insert(PRIMAL, ResultValue::Vector(x.clone()));
        }
        if let Some(ref nu) = self.eq_dual {
            map.insert(EQ_DUAL, ResultValue::Vector(nu.clone()));
        }
        map
    }
}

#[test]
fn test_result_format() {
    let info = LsInfo::<f64>::default();
    let res = SolveResult::format(Some(vec![1., 2.]), Some(vec![]), Some(3.), info.clone());
    assert_eq!(res.status, SolverStatus::Optimal);
    let map = res.to_map();
    assert_eq!(map.len(), 4);
    assert_eq!(map[VALUE], ResultValue::Scalar(3.));
    assert_eq!(map[EQ_DUAL], ResultValue::Vector(vec![]));

    let res = SolveResult::format(None, None, None, info);
    assert_eq!(res.status.to_string(), "infeasible");
    let map = res.to_map();
    assert_eq!(map.len(), 1);
    assert_eq!(map[STATUS], ResultValue::Status(SolverStatus::Infeasible));
}
