use thiserror::Error;

use crate::problem::LpProblem;
use crate::solution::Solution;

/// A hard failure talking to a solver, as opposed to a non-optimal outcome
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    #[error("Solver unavailable: {0}")]
    Unavailable(String),
    #[error("Solver failure: {0}")]
    Failure(String),
}

/// Common interface for LP solvers
pub trait LpSolver {
    /// Solve the problem synchronously.
    ///
    /// Infeasible, unbounded and other non-optimal outcomes are reported through
    /// [`Solution::status`]. `Err` is reserved for a solver that could not run.
    fn solve(&self, problem: &LpProblem) -> Result<Solution, SolverError>;

    /// Solver name for logging
    fn name(&self) -> &str;
}

impl<S: LpSolver + ?Sized> LpSolver for Box<S> {
    fn solve(&self, problem: &LpProblem) -> Result<Solution, SolverError> {
        (**self).solve(problem)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
