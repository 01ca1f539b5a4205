use std::fmt;

/// The result of solving an LP problem
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    /// Solution status
    pub status: SolutionStatus,
    /// Optimal value for each variable, present only when optimal
    pub values: Option<Vec<f64>>,
    /// Optimal objective value, present only when optimal
    pub objective_value: Option<f64>,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolutionStatus {
    /// An optimal solution was found
    Optimal,
    /// The problem is infeasible (no solution exists)
    Infeasible,
    /// The problem is unbounded
    Unbounded,
    /// The solver finished without a meaningful answer
    Undefined,
    /// The solver stopped before reaching an answer
    NotSolved,
}

impl SolutionStatus {
    pub fn label(self) -> &'static str {
        match self {
            SolutionStatus::Optimal => "Optimal",
            SolutionStatus::Infeasible => "Infeasible",
            SolutionStatus::Unbounded => "Unbounded",
            SolutionStatus::Undefined => "Undefined",
            SolutionStatus::NotSolved => "Not Solved",
        }
    }

    pub fn is_optimal(self) -> bool {
        self == SolutionStatus::Optimal
    }
}

impl fmt::Display for SolutionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Solution {
    pub fn optimal(values: Vec<f64>, objective_value: f64) -> Self {
        Self {
            status: SolutionStatus::Optimal,
            values: Some(values),
            objective_value: Some(objective_value),
        }
    }

    /// A non-optimal outcome. Optimal results must go through [`Solution::optimal`].
    pub fn without_assignment(status: SolutionStatus) -> Self {
        debug_assert!(!status.is_optimal());
        Self {
            status,
            values: None,
            objective_value: None,
        }
    }

    pub fn infeasible() -> Self {
        Self::without_assignment(SolutionStatus::Infeasible)
    }

    pub fn unbounded() -> Self {
        Self::without_assignment(SolutionStatus::Unbounded)
    }

    pub fn not_solved() -> Self {
        Self::without_assignment(SolutionStatus::NotSolved)
    }
}
