use lpform_model::{build_problem, solve_form, BuildError, FormState, Session, SolveError};
use lpform_solver::{LpProblem, LpSolver, Sense, Simplex, Solution, SolutionStatus, SolverError};

fn assert_close(actual: f64, expected: f64) {
    assert!((actual - expected).abs() < 1e-6, "got {} (expected {})", actual, expected);
}

/// Panics if called; proves the builder rejected input before solving
struct UnreachableSolver;

impl LpSolver for UnreachableSolver {
    fn solve(&self, _problem: &LpProblem) -> Result<Solution, SolverError> {
        panic!("solver must not be invoked for malformed input");
    }

    fn name(&self) -> &str {
        "unreachable"
    }
}

fn textbook_form() -> FormState {
    let mut form = FormState::with_shape(2, 3);
    form.set_sense(Sense::Maximize);
    form.set_objective_cell(1, "3").unwrap();
    form.set_objective_cell(2, "5").unwrap();
    form.set_constraint_cell(1, 1, "1").unwrap();
    form.set_rhs(1, "4").unwrap();
    form.set_constraint_cell(2, 2, "2").unwrap();
    form.set_rhs(2, "12").unwrap();
    form.set_constraint_cell(3, 1, "3").unwrap();
    form.set_constraint_cell(3, 2, "2").unwrap();
    form.set_rhs(3, "18").unwrap();
    form
}

#[test]
fn test_textbook_lp_is_optimal() {
    let report = solve_form(&textbook_form(), &Simplex::new()).unwrap();

    assert_eq!(report.status, SolutionStatus::Optimal);
    assert_eq!(report.assignments.len(), 2);
    assert_eq!(report.assignments[0].variable, "x1");
    assert_close(report.assignments[0].value, 2.0);
    assert_close(report.assignments[1].value, 6.0);
    assert_close(report.objective_value.unwrap(), 36.0);
}

#[test]
fn test_contradictory_bounds_are_infeasible() {
    let mut form = FormState::with_shape(1, 2);
    form.set_constraint_cell(1, 1, "1").unwrap();
    form.set_relation(1, ">=").unwrap();
    form.set_rhs(1, "5").unwrap();
    form.set_constraint_cell(2, 1, "1").unwrap();
    form.set_relation(2, "<=").unwrap();
    form.set_rhs(2, "2").unwrap();

    let report = solve_form(&form, &Simplex::new()).unwrap();

    assert_eq!(report.status, SolutionStatus::Infeasible);
    assert!(report.assignments.is_empty());
    assert_eq!(report.objective_value, None);
    assert_eq!(report.lines(), vec!["Status: Infeasible", "No optimal solution found."]);
}

#[test]
fn test_maximize_without_constraints_is_unbounded() {
    let mut form = FormState::with_shape(1, 0);
    form.set_objective_cell(1, "1").unwrap();

    let report = solve_form(&form, &Simplex::new()).unwrap();

    assert_eq!(report.status, SolutionStatus::Unbounded);
}

#[test]
fn test_zero_constraints_depend_only_on_direction() {
    let mut form = FormState::with_shape(2, 3);
    form.set_constraint_count(0).unwrap();
    form.set_sense(Sense::Minimize);
    form.set_objective_cell(1, "2").unwrap();
    form.set_objective_cell(2, "7").unwrap();

    let problem = build_problem(&form).unwrap();
    assert!(problem.constraints.is_empty());

    let report = solve_form(&form, &Simplex::new()).unwrap();
    assert_eq!(report.status, SolutionStatus::Optimal);
    assert_eq!(report.objective_value, Some(0.0));
}

#[test]
fn test_shrinking_variables_clears_entered_coefficients() {
    let mut form = FormState::with_shape(3, 2);
    form.set_objective_cell(1, "1").unwrap();
    form.set_objective_cell(2, "2").unwrap();
    form.set_objective_cell(3, "3").unwrap();
    form.set_constraint_cell(1, 3, "4").unwrap();

    form.set_variable_count(2).unwrap();

    assert_eq!(form.variable_count(), 2);
    assert!(form.objective_cells().iter().all(String::is_empty));
    for row in form.constraint_rows() {
        assert_eq!(row.coefficients.len(), 2);
        assert!(row.coefficients.iter().all(String::is_empty));
    }
}

#[test]
fn test_blank_form_has_aligned_zero_vectors() {
    for n in 1..=8 {
        let mut form = FormState::with_shape(n, 3);
        for row in 1..=3 {
            form.set_rhs(row, "1").unwrap();
        }

        let problem = build_problem(&form).unwrap();

        assert_eq!(problem.num_variables(), n);
        assert_eq!(problem.objective.coefficients, vec![0.0; n]);
        assert!(problem.constraints.iter().all(|c| c.coefficients == vec![0.0; n]));
    }
}

#[test]
fn test_any_malformed_cell_blocks_the_solve() {
    let base = textbook_form();
    let mut edits: Vec<Box<dyn Fn(&mut FormState)>> = Vec::new();
    for variable in 1..=2 {
        edits.push(Box::new(move |f: &mut FormState| f.set_objective_cell(variable, "abc").unwrap()));
        for row in 1..=3 {
            edits.push(Box::new(move |f: &mut FormState| f.set_constraint_cell(row, variable, "1..2").unwrap()));
        }
    }
    for row in 1..=3 {
        edits.push(Box::new(move |f: &mut FormState| f.set_rhs(row, "").unwrap()));
        edits.push(Box::new(move |f: &mut FormState| f.set_rhs(row, "ten").unwrap()));
    }

    for edit in edits {
        let mut form = base.clone();
        edit(&mut form);

        let mut session = Session::new(form);
        let err = session.solve(&UnreachableSolver).unwrap_err();

        assert!(matches!(
            err,
            SolveError::Build(
                BuildError::NonNumericObjectiveCoefficient { .. } | BuildError::NonNumericConstraintValue { .. }
            )
        ));
        assert!(session.last_report().is_none());
    }
}
