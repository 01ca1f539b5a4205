use ::highs::{HighsModelStatus, RowProblem, Sense as HighsSense};

use crate::backend::{LpSolver, SolverError};
use crate::problem::{ConstraintOp, LpProblem, Sense};
use crate::solution::{Solution, SolutionStatus};

/// HiGHS solver implementation
#[derive(Debug, Clone, Default)]
pub struct HighsSolver;

impl HighsSolver {
    pub fn new() -> Self {
        HighsSolver
    }

    /// Convert HiGHS status to ours
    fn convert_status(model_status: HighsModelStatus) -> SolutionStatus {
        match model_status {
            HighsModelStatus::Optimal => SolutionStatus::Optimal,
            HighsModelStatus::Infeasible => SolutionStatus::Infeasible,
            HighsModelStatus::Unbounded => SolutionStatus::Unbounded,
            HighsModelStatus::NotSet => SolutionStatus::NotSolved,
            _ => SolutionStatus::Undefined,
        }
    }
}

impl LpSolver for HighsSolver {
    fn solve(&self, problem: &LpProblem) -> Result<Solution, SolverError> {
        let mut pb = RowProblem::default();

        let columns: Vec<_> = problem
            .objective
            .coefficients
            .iter()
            .map(|&cost| pb.add_column(cost, 0.0..))
            .collect();

        for c in &problem.constraints {
            let factors: Vec<_> = columns.iter().copied().zip(c.coefficients.iter().copied()).collect();
            match c.op {
                ConstraintOp::Le => pb.add_row(..=c.rhs, factors),
                ConstraintOp::Eq => pb.add_row(c.rhs..=c.rhs, factors),
                ConstraintOp::Ge => pb.add_row(c.rhs.., factors),
            }
        }

        let sense = match problem.objective.sense {
            Sense::Maximize => HighsSense::Maximise,
            Sense::Minimize => HighsSense::Minimise,
        };

        let mut model = pb.optimise(sense);
        model.make_quiet();
        // Presolve can only report "unbounded or infeasible"
        model.set_option("presolve", "off");
        let solved = model.solve();

        let status = Self::convert_status(solved.status());
        if !status.is_optimal() {
            return Ok(Solution::without_assignment(status));
        }

        let values: Vec<f64> = solved.get_solution().columns().to_vec();
        if values.len() != problem.num_variables() {
            return Err(SolverError::Failure(format!(
                "HiGHS returned {} values for {} variables",
                values.len(),
                problem.num_variables()
            )));
        }
        let objective_value = problem.objective_value(&values);
        Ok(Solution::optimal(values, objective_value))
    }

    fn name(&self) -> &str {
        "HiGHS"
    }
}
