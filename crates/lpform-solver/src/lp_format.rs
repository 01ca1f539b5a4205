//! CPLEX LP file writer.
//!
//! The output is the plain-text format read by CBC, HiGHS, GLPK and most other
//! LP tools. Variables are written with an explicit `>= 0` bound.

use std::io::{self, Write};

use crate::problem::{LpProblem, Sense};

/// Write `problem` in CPLEX LP format
pub fn write_lp<W: Write>(problem: &LpProblem, out: &mut W) -> io::Result<()> {
    let header = match problem.objective.sense {
        Sense::Maximize => "Maximize",
        Sense::Minimize => "Minimize",
    };
    writeln!(out, "\\ lpform model")?;
    writeln!(out, "{}", header)?;
    writeln!(out, " obj: {}", linear_expr(&problem.objective.coefficients, &problem.variables))?;

    writeln!(out, "Subject To")?;
    if problem.constraints.is_empty() {
        // Some readers reject an empty constraint section
        if let Some(first) = problem.variables.first() {
            writeln!(out, " dummy: 0 {} >= 0", first)?;
        }
    }
    for c in &problem.constraints {
        writeln!(
            out,
            " {}: {} {} {}",
            c.name,
            linear_expr(&c.coefficients, &problem.variables),
            c.op,
            number(c.rhs)
        )?;
    }

    writeln!(out, "Bounds")?;
    for name in &problem.variables {
        writeln!(out, " {} >= 0", name)?;
    }
    writeln!(out, "End")?;
    Ok(())
}

/// Render `problem` as an LP-format string
pub fn to_lp_string(problem: &LpProblem) -> String {
    let mut buf = Vec::new();
    // Writing into a Vec cannot fail
    let _ = write_lp(problem, &mut buf);
    String::from_utf8_lossy(&buf).into_owned()
}

fn linear_expr(coefficients: &[f64], variables: &[String]) -> String {
    let mut expr = String::new();
    for (coef, name) in coefficients.iter().zip(variables) {
        if *coef == 0.0 {
            continue;
        }
        if expr.is_empty() {
            if *coef < 0.0 {
                expr.push('-');
            }
        } else if *coef < 0.0 {
            expr.push_str(" - ");
        } else {
            expr.push_str(" + ");
        }
        expr.push_str(&number(coef.abs()));
        expr.push(' ');
        expr.push_str(name);
    }
    if expr.is_empty() {
        if let Some(first) = variables.first() {
            expr = format!("0 {}", first);
        }
    }
    expr
}

fn number(value: f64) -> String {
    if value == 0.0 {
        // Avoid printing -0
        "0".to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::ConstraintOp;

    #[test]
    fn test_textbook_problem() {
        let mut problem = LpProblem::with_indexed_variables(2);
        problem.set_objective(vec![3.0, 5.0], Sense::Maximize);
        problem.add_constraint("c1", vec![1.0, 0.0], ConstraintOp::Le, 4.0);
        problem.add_constraint("c2", vec![0.0, 2.0], ConstraintOp::Le, 12.0);
        problem.add_constraint("c3", vec![3.0, -2.5], ConstraintOp::Ge, -18.0);

        let text = to_lp_string(&problem);
        let expected = "\\ lpform model
Maximize
 obj: 3 x1 + 5 x2
Subject To
 c1: 1 x1 <= 4
 c2: 2 x2 <= 12
 c3: 3 x1 - 2.5 x2 >= -18
Bounds
 x1 >= 0
 x2 >= 0
End
";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_empty_objective_and_constraints() {
        let mut problem = LpProblem::with_indexed_variables(1);
        problem.set_objective(vec![-0.0], Sense::Minimize);

        let text = to_lp_string(&problem);

        assert!(text.contains("Minimize\n obj: 0 x1\n"));
        assert!(text.contains(" dummy: 0 x1 >= 0\n"));
    }

    #[test]
    fn test_leading_negative_term() {
        let mut problem = LpProblem::with_indexed_variables(2);
        problem.add_constraint("c1", vec![-1.0, 1.0], ConstraintOp::Eq, 0.0);

        let text = to_lp_string(&problem);

        assert!(text.contains(" c1: -1 x1 + 1 x2 = 0\n"));
    }
}
