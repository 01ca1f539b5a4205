use log::debug;
use lpform_solver::{ConstraintOp, LpProblem};
use thiserror::Error;

use crate::form::{Cell, FormState};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BuildError {
    #[error("Please ensure all objective coefficients are numeric: x{variable} is '{text}'")]
    NonNumericObjectiveCoefficient { variable: usize, text: String },
    #[error("Please ensure all constraint values are numeric: {cell} is '{text}'")]
    NonNumericConstraintValue { cell: Cell, text: String },
    #[error("Unknown relation '{text}' in constraint {row}; expected <=, = or >=")]
    UnknownRelation { row: usize, text: String },
}

impl BuildError {
    /// The offending cell
    pub fn cell(&self) -> Cell {
        match self {
            BuildError::NonNumericObjectiveCoefficient { variable, .. } => Cell::Objective { variable: *variable },
            BuildError::NonNumericConstraintValue { cell, .. } => *cell,
            BuildError::UnknownRelation { row, .. } => Cell::Relation { row: *row },
        }
    }
}

/// Parse one numeric cell. `Ok(None)` means the cell is blank.
///
/// Non-finite values (`inf`, `NaN`) are not numbers an LP can use and are
/// rejected like any other text.
fn parse_number(text: &str) -> Result<Option<f64>, ()> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(Some(value)),
        _ => Err(()),
    }
}

pub fn parse_relation(text: &str) -> Option<ConstraintOp> {
    match text.trim() {
        "<=" | "≤" => Some(ConstraintOp::Le),
        "=" | "==" => Some(ConstraintOp::Eq),
        ">=" | "≥" => Some(ConstraintOp::Ge),
        _ => None,
    }
}

/// Turn the form into an LP problem.
///
/// The first malformed cell aborts the whole build; nothing is returned for a
/// partially valid form.
pub fn build_problem(form: &FormState) -> Result<LpProblem, BuildError> {
    let n = form.variable_count();
    let mut problem = LpProblem::with_indexed_variables(n);

    let objective = form
        .objective_cells()
        .iter()
        .enumerate()
        .map(|(i, text)| {
            parse_number(text)
                .map(|value| value.unwrap_or(0.0))
                .map_err(|_| BuildError::NonNumericObjectiveCoefficient {
                    variable: i + 1,
                    text: text.clone(),
                })
        })
        .collect::<Result<Vec<f64>, _>>()?;
    problem.set_objective(objective, form.sense());

    for (r, constraint) in form.constraint_rows().iter().enumerate() {
        let row = r + 1;

        let coefficients = constraint
            .coefficients
            .iter()
            .enumerate()
            .map(|(i, text)| {
                parse_number(text)
                    .map(|value| value.unwrap_or(0.0))
                    .map_err(|_| BuildError::NonNumericConstraintValue {
                        cell: Cell::Coefficient { row, variable: i + 1 },
                        text: text.clone(),
                    })
            })
            .collect::<Result<Vec<f64>, _>>()?;

        let op = parse_relation(&constraint.relation).ok_or_else(|| BuildError::UnknownRelation {
            row,
            text: constraint.relation.clone(),
        })?;

        // The RHS has no default
        let rhs = match parse_number(&constraint.rhs) {
            Ok(Some(value)) => value,
            Ok(None) | Err(()) => {
                return Err(BuildError::NonNumericConstraintValue {
                    cell: Cell::Rhs { row },
                    text: constraint.rhs.clone(),
                });
            }
        };

        problem.add_constraint(format!("c{}", row), coefficients, op, rhs);
    }

    debug!(
        "built {} problem with {} variables and {} constraints",
        problem.objective.sense,
        problem.num_variables(),
        problem.num_constraints()
    );
    Ok(problem)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lpform_solver::Sense;

    fn textbook_form() -> FormState {
        let mut form = FormState::with_shape(2, 3);
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
    fn test_builds_textbook_problem() {
        let problem = build_problem(&textbook_form()).unwrap();

        assert_eq!(problem.variables, vec!["x1", "x2"]);
        assert_eq!(problem.objective.coefficients, vec![3.0, 5.0]);
        assert_eq!(problem.objective.sense, Sense::Maximize);
        assert_eq!(problem.num_constraints(), 3);
        assert_eq!(problem.constraints[0].coefficients, vec![1.0, 0.0]);
        assert_eq!(problem.constraints[1].coefficients, vec![0.0, 2.0]);
        assert_eq!(problem.constraints[2].coefficients, vec![3.0, 2.0]);
        assert_eq!(problem.constraints[2].name, "c3");
        assert_eq!(problem.constraints[2].op, ConstraintOp::Le);
        assert_eq!(problem.constraints[2].rhs, 18.0);
    }

    #[test]
    fn test_blank_cells_default_to_zero() {
        for n in 1..=6 {
            let mut form = FormState::with_shape(n, 2);
            form.set_rhs(1, "1").unwrap();
            form.set_rhs(2, "0").unwrap();

            let problem = build_problem(&form).unwrap();

            assert_eq!(problem.objective.coefficients, vec![0.0; n]);
            for c in &problem.constraints {
                assert_eq!(c.coefficients, vec![0.0; n]);
            }
        }
    }

    #[test]
    fn test_number_syntax() {
        assert_eq!(parse_number("  -2.5 "), Ok(Some(-2.5)));
        assert_eq!(parse_number("1e3"), Ok(Some(1000.0)));
        assert_eq!(parse_number(".5"), Ok(Some(0.5)));
        assert_eq!(parse_number("   "), Ok(None));
        assert_eq!(parse_number("inf"), Err(()));
        assert_eq!(parse_number("NaN"), Err(()));
        assert_eq!(parse_number("3,5"), Err(()));
    }

    #[test]
    fn test_non_numeric_objective() {
        let mut form = textbook_form();
        form.set_objective_cell(2, "five").unwrap();

        let err = build_problem(&form).unwrap_err();

        assert_eq!(
            err,
            BuildError::NonNumericObjectiveCoefficient {
                variable: 2,
                text: "five".to_string()
            }
        );
        assert_eq!(err.cell(), Cell::Objective { variable: 2 });
    }

    #[test]
    fn test_non_numeric_coefficient_stops_at_first_bad_row() {
        let mut form = textbook_form();
        form.set_constraint_cell(2, 1, "x").unwrap();
        form.set_constraint_cell(3, 1, "y").unwrap();

        let err = build_problem(&form).unwrap_err();

        assert_eq!(err.cell(), Cell::Coefficient { row: 2, variable: 1 });
    }

    #[test]
    fn test_rhs_is_required() {
        let mut form = textbook_form();
        form.set_rhs(3, " ").unwrap();

        let err = build_problem(&form).unwrap_err();

        assert_eq!(
            err,
            BuildError::NonNumericConstraintValue {
                cell: Cell::Rhs { row: 3 },
                text: " ".to_string()
            }
        );
    }

    #[test]
    fn test_unknown_relation_fails() {
        let mut form = textbook_form();
        form.set_relation(1, "<").unwrap();

        let err = build_problem(&form).unwrap_err();

        assert_eq!(
            err,
            BuildError::UnknownRelation {
                row: 1,
                text: "<".to_string()
            }
        );
    }

    #[test]
    fn test_relation_spellings() {
        assert_eq!(parse_relation("<="), Some(ConstraintOp::Le));
        assert_eq!(parse_relation("≤"), Some(ConstraintOp::Le));
        assert_eq!(parse_relation(" = "), Some(ConstraintOp::Eq));
        assert_eq!(parse_relation("=="), Some(ConstraintOp::Eq));
        assert_eq!(parse_relation("≥"), Some(ConstraintOp::Ge));
        assert_eq!(parse_relation("=>"), None);
    }

    #[test]
    fn test_zero_constraints() {
        let mut form = FormState::with_shape(2, 0);
        form.set_sense(Sense::Minimize);

        let problem = build_problem(&form).unwrap();

        assert!(problem.constraints.is_empty());
        assert_eq!(problem.objective.sense, Sense::Minimize);
    }

    #[test]
    fn test_error_message_names_the_cell() {
        let err = BuildError::NonNumericConstraintValue {
            cell: Cell::Coefficient { row: 2, variable: 3 },
            text: "abc".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Please ensure all constraint values are numeric: constraint 2, x3 is 'abc'"
        );
    }
}
