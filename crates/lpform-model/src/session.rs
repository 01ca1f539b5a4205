use log::{info, warn};
use lpform_solver::{LpSolver, SolverError};
use thiserror::Error;

use crate::builder::{build_problem, BuildError};
use crate::form::FormState;
use crate::report::Report;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolveError {
    #[error(transparent)]
    Build(#[from] BuildError),
    #[error(transparent)]
    Solver(#[from] SolverError),
}

/// Build the form into a problem, solve it and report the outcome
pub fn solve_form(form: &FormState, solver: &dyn LpSolver) -> Result<Report, SolveError> {
    let problem = build_problem(form)?;

    let solution = solver.solve(&problem).inspect_err(|e| {
        warn!("{} failed: {}", solver.name(), e);
    })?;
    info!("{} finished: {}", solver.name(), solution.status);

    Ok(Report::from_solution(&problem, &solution))
}

/// The form being edited plus the report of the last successful solve
#[derive(Debug, Clone, Default)]
pub struct Session {
    form: FormState,
    last_report: Option<Report>,
}

impl Session {
    pub fn new(form: FormState) -> Self {
        Self {
            form,
            last_report: None,
        }
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut FormState {
        &mut self.form
    }

    pub fn last_report(&self) -> Option<&Report> {
        self.last_report.as_ref()
    }

    /// Solve the current form. On error the previous report stays in place.
    pub fn solve(&mut self, solver: &dyn LpSolver) -> Result<&Report, SolveError> {
        let report = solve_form(&self.form, solver)?;
        Ok(self.last_report.insert(report))
    }
}
