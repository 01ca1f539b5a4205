mod backend;
mod cbc;
mod factory;
#[cfg(feature = "highs")]
mod highs;
mod lp_format;
mod problem;
mod simplex;
mod solution;

pub use backend::{LpSolver, SolverError};
pub use cbc::{parse_solution as parse_cbc_solution, CbcCommand};
pub use factory::{create_solver, ConfigError, SolverConfig, SolverKind, CBC_PATH_ENV, SOLVER_ENV};
#[cfg(feature = "highs")]
pub use highs::HighsSolver;
pub use lp_format::{to_lp_string, write_lp};
pub use problem::{Constraint, ConstraintOp, LpProblem, Objective, Sense};
pub use simplex::Simplex;
pub use solution::{Solution, SolutionStatus};
