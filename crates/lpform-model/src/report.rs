use std::fmt;

use lpform_solver::{LpProblem, Solution, SolutionStatus};

/// Display-ready outcome of one solve
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub status: SolutionStatus,
    /// One entry per variable, empty unless optimal
    pub assignments: Vec<Assignment>,
    pub objective_value: Option<f64>,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub variable: String,
    pub value: f64,
}

impl Report {
    pub fn from_solution(problem: &LpProblem, solution: &Solution) -> Self {
        let assignments = match (&solution.values, solution.status) {
            (Some(values), SolutionStatus::Optimal) => problem
                .variables
                .iter()
                .zip(values)
                .map(|(name, &value)| Assignment {
                    variable: name.clone(),
                    value,
                })
                .collect(),
            _ => Vec::new(),
        };
        let objective_value = if solution.status.is_optimal() {
            solution.objective_value
        } else {
            None
        };

        Self {
            status: solution.status,
            assignments,
            objective_value,
        }
    }

    pub fn is_optimal(&self) -> bool {
        self.status.is_optimal()
    }

    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![format!("Status: {}", self.status)];
        match (self.is_optimal(), self.objective_value) {
            (true, Some(objective)) => {
                lines.push("Optimal Solution Found:".to_string());
                for a in &self.assignments {
                    lines.push(format!("{} = {}", a.variable, format_value(a.value)));
                }
                lines.push(format!("Objective Value: {}", format_value(objective)));
            }
            _ => lines.push("No optimal solution found.".to_string()),
        }
        lines
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.lines() {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

fn format_value(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optimal_report() {
        let problem = LpProblem::with_indexed_variables(2);
        let solution = Solution::optimal(vec![2.0, 6.5], 36.0);

        let report = Report::from_solution(&problem, &solution);

        assert_eq!(
            report.lines(),
            vec![
                "Status: Optimal",
                "Optimal Solution Found:",
                "x1 = 2",
                "x2 = 6.5",
                "Objective Value: 36",
            ]
        );
        assert_eq!(
            report.to_string(),
            "Status: Optimal\nOptimal Solution Found:\nx1 = 2\nx2 = 6.5\nObjective Value: 36\n"
        );
    }

    #[test]
    fn test_non_optimal_report() {
        let problem = LpProblem::with_indexed_variables(1);
        let report = Report::from_solution(&problem, &Solution::without_assignment(SolutionStatus::NotSolved));

        assert!(report.assignments.is_empty());
        assert_eq!(report.objective_value, None);
        assert_eq!(report.lines(), vec!["Status: Not Solved", "No optimal solution found."]);
    }

    #[test]
    fn test_negative_zero_prints_as_zero() {
        let problem = LpProblem::with_indexed_variables(1);
        let report = Report::from_solution(&problem, &Solution::optimal(vec![-0.0], -0.0));
        assert_eq!(report.lines()[2], "x1 = 0");
        assert_eq!(report.lines()[3], "Objective Value: 0");
    }
}
