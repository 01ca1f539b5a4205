use log::debug;

use crate::backend::{LpSolver, SolverError};
use crate::problem::{ConstraintOp, LpProblem, Sense};
use crate::solution::Solution;

/// Dense two-phase simplex solver for small linear programs
#[derive(Debug, Clone)]
pub struct Simplex {
    /// Maximum pivots per phase before giving up
    max_iterations: usize,
    /// Tolerance for floating point comparisons
    tolerance: f64,
}

impl Default for Simplex {
    fn default() -> Self {
        Self {
            max_iterations: 10000,
            tolerance: 1e-9,
        }
    }
}

impl LpSolver for Simplex {
    fn solve(&self, problem: &LpProblem) -> Result<Solution, SolverError> {
        Ok(self.solve_problem(problem))
    }

    fn name(&self) -> &str {
        "simplex"
    }
}

impl Simplex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_iterations(mut self, max: usize) -> Self {
        self.max_iterations = max;
        self
    }

    /// Solve the LP problem using the two-phase simplex method
    pub fn solve_problem(&self, problem: &LpProblem) -> Solution {
        let mut tableau = self.build_tableau(problem);

        // Phase 1: Find initial basic feasible solution
        if tableau.n_artificial > 0 {
            match self.phase1(&mut tableau) {
                PhaseResult::Optimal => {}
                PhaseResult::Infeasible | PhaseResult::Unbounded => return Solution::infeasible(),
                PhaseResult::IterationLimit => return Solution::not_solved(),
            }
        }

        // Phase 2: Optimize
        match self.phase2(&mut tableau) {
            PhaseResult::Optimal => self.extract_solution(&tableau, problem),
            PhaseResult::Unbounded => Solution::unbounded(),
            PhaseResult::Infeasible => Solution::infeasible(),
            PhaseResult::IterationLimit => Solution::not_solved(),
        }
    }

    fn build_tableau(&self, problem: &LpProblem) -> Tableau {
        let n_vars = problem.num_variables();
        let n_constraints = problem.num_constraints();

        // Rows with a negative RHS are multiplied by -1 so every RHS is non-negative
        let rows: Vec<(Vec<f64>, ConstraintOp, f64)> = problem
            .constraints
            .iter()
            .map(|c| {
                if c.rhs < 0.0 {
                    (c.coefficients.iter().map(|a| -a).collect(), c.op.flipped(), -c.rhs)
                } else {
                    (c.coefficients.clone(), c.op, c.rhs)
                }
            })
            .collect();

        // Count slack and artificial variables needed
        let mut n_slack = 0;
        let mut n_artificial = 0;
        for (_, op, _) in &rows {
            match op {
                ConstraintOp::Le => n_slack += 1,
                ConstraintOp::Ge => {
                    n_slack += 1; // surplus
                    n_artificial += 1;
                }
                ConstraintOp::Eq => n_artificial += 1,
            }
        }

        let total_cols = n_vars + n_slack + n_artificial + 1; // +1 for RHS
        let total_rows = n_constraints + 1; // +1 for objective

        let mut tableau = Tableau {
            data: vec![vec![0.0; total_cols]; total_rows],
            basic_vars: vec![0; n_constraints],
            n_vars,
            n_slack,
            n_artificial,
        };

        let mut slack_idx = n_vars;
        let mut artificial_idx = n_vars + n_slack;

        for (i, (coefficients, op, rhs)) in rows.into_iter().enumerate() {
            for (j, coef) in coefficients.into_iter().enumerate().take(n_vars) {
                tableau.data[i][j] = coef;
            }
            tableau.data[i][total_cols - 1] = rhs;

            match op {
                ConstraintOp::Le => {
                    tableau.data[i][slack_idx] = 1.0;
                    tableau.basic_vars[i] = slack_idx;
                    slack_idx += 1;
                }
                ConstraintOp::Ge => {
                    tableau.data[i][slack_idx] = -1.0; // surplus
                    slack_idx += 1;
                    tableau.data[i][artificial_idx] = 1.0;
                    tableau.basic_vars[i] = artificial_idx;
                    artificial_idx += 1;
                }
                ConstraintOp::Eq => {
                    tableau.data[i][artificial_idx] = 1.0;
                    tableau.basic_vars[i] = artificial_idx;
                    artificial_idx += 1;
                }
            }
        }

        // Objective row (last row). Internally the tableau always maximizes,
        // so a positive entry marks a column that improves the objective.
        let obj_row = n_constraints;
        for (j, &coef) in problem.objective.coefficients.iter().enumerate().take(n_vars) {
            tableau.data[obj_row][j] = match problem.objective.sense {
                Sense::Maximize => coef,
                Sense::Minimize => -coef,
            };
        }

        tableau
    }

    fn phase1(&self, tableau: &mut Tableau) -> PhaseResult {
        let n_constraints = tableau.data.len() - 1;
        let n_cols = tableau.data[0].len();
        let art_start = tableau.artificial_start();

        let orig_obj = tableau.data[n_constraints].clone();

        // Maximize -sum(artificials)
        for j in 0..n_cols {
            tableau.data[n_constraints][j] = 0.0;
        }
        for j in art_start..(art_start + tableau.n_artificial) {
            tableau.data[n_constraints][j] = -1.0;
        }

        // Price out the basic artificials
        for i in 0..n_constraints {
            if tableau.basic_vars[i] >= art_start {
                for j in 0..n_cols {
                    tableau.data[n_constraints][j] += tableau.data[i][j];
                }
            }
        }

        match self.iterate(tableau, n_cols - 1) {
            PhaseResult::Optimal => {}
            other => return other,
        }

        let rhs_col = n_cols - 1;
        for i in 0..n_constraints {
            if tableau.basic_vars[i] >= art_start && tableau.data[i][rhs_col].abs() > self.tolerance {
                debug!("simplex: phase 1 left artificial in row {} at {}", i, tableau.data[i][rhs_col]);
                return PhaseResult::Infeasible;
            }
        }

        self.drive_out_artificials(tableau);

        // Restore original objective and price out the basis
        tableau.data[n_constraints] = orig_obj;
        for i in 0..n_constraints {
            let basic = tableau.basic_vars[i];
            let ratio = tableau.data[n_constraints][basic];
            if ratio.abs() > self.tolerance {
                for j in 0..n_cols {
                    tableau.data[n_constraints][j] -= ratio * tableau.data[i][j];
                }
            }
        }

        PhaseResult::Optimal
    }

    /// Pivot zero-valued artificials out of the basis. Rows with no usable
    /// column are redundant and keep their artificial at zero.
    fn drive_out_artificials(&self, tableau: &mut Tableau) {
        let art_start = tableau.artificial_start();
        for i in 0..tableau.basic_vars.len() {
            if tableau.basic_vars[i] < art_start {
                continue;
            }
            if let Some(col) = (0..art_start).find(|&j| tableau.data[i][j].abs() > self.tolerance) {
                self.pivot(tableau, i, col);
            }
        }
    }

    fn phase2(&self, tableau: &mut Tableau) -> PhaseResult {
        // Artificial columns never re-enter the basis
        let exclude_from = tableau.artificial_start();
        self.iterate(tableau, exclude_from)
    }

    fn iterate(&self, tableau: &mut Tableau, n_candidate_cols: usize) -> PhaseResult {
        let mut iteration = 0;
        // Dantzig's rule until the first degenerate pivot, then Bland's rule,
        // which cannot cycle
        let mut bland = false;
        loop {
            let Some(pivot_col) = self.find_pivot_column(tableau, n_candidate_cols, bland) else {
                debug!("simplex: optimal after {} pivots", iteration);
                return PhaseResult::Optimal;
            };
            if iteration == self.max_iterations {
                debug!("simplex: iteration limit {} reached", self.max_iterations);
                return PhaseResult::IterationLimit;
            }
            let Some((pivot_row, ratio)) = self.find_pivot_row(tableau, pivot_col) else {
                return PhaseResult::Unbounded;
            };
            if !bland && ratio <= self.tolerance {
                debug!("simplex: degenerate pivot at iteration {}, switching to Bland's rule", iteration);
                bland = true;
            }
            self.pivot(tableau, pivot_row, pivot_col);
            iteration += 1;
        }
    }

    fn find_pivot_column(&self, tableau: &Tableau, n_candidate_cols: usize, bland: bool) -> Option<usize> {
        let obj_row = &tableau.data[tableau.data.len() - 1];

        if bland {
            // Lowest-index improving column
            return (0..n_candidate_cols).find(|&j| obj_row[j] > self.tolerance);
        }

        // Most positive reduced cost
        let mut max_val = self.tolerance;
        let mut max_col = None;

        for (j, &value) in obj_row.iter().enumerate().take(n_candidate_cols) {
            if value > max_val {
                max_val = value;
                max_col = Some(j);
            }
        }

        max_col
    }

    /// Minimum-ratio row for the entering column. Ties go to the row whose
    /// basic variable has the lowest index.
    fn find_pivot_row(&self, tableau: &Tableau, col: usize) -> Option<(usize, f64)> {
        let n_constraints = tableau.data.len() - 1;
        let rhs_col = tableau.data[0].len() - 1;

        let mut best: Option<(usize, f64)> = None;

        for i in 0..n_constraints {
            let val = tableau.data[i][col];
            if val <= self.tolerance {
                continue;
            }
            let ratio = (tableau.data[i][rhs_col] / val).max(0.0);
            best = match best {
                None => Some((i, ratio)),
                Some((row, min_ratio)) => {
                    let tied = (ratio - min_ratio).abs() <= self.tolerance;
                    if (!tied && ratio < min_ratio) || (tied && tableau.basic_vars[i] < tableau.basic_vars[row]) {
                        Some((i, ratio))
                    } else {
                        Some((row, min_ratio))
                    }
                }
            };
        }

        best
    }

    fn pivot(&self, tableau: &mut Tableau, row: usize, col: usize) {
        let n_rows = tableau.data.len();
        let n_cols = tableau.data[0].len();

        tableau.basic_vars[row] = col;

        let pivot_val = tableau.data[row][col];
        for j in 0..n_cols {
            tableau.data[row][j] /= pivot_val;
        }

        for i in 0..n_rows {
            if i != row {
                let factor = tableau.data[i][col];
                if factor != 0.0 {
                    for j in 0..n_cols {
                        tableau.data[i][j] -= factor * tableau.data[row][j];
                    }
                }
            }
        }
    }

    fn extract_solution(&self, tableau: &Tableau, problem: &LpProblem) -> Solution {
        let n_vars = tableau.n_vars;
        let rhs_col = tableau.data[0].len() - 1;

        let mut values = vec![0.0; n_vars];
        for (i, &basic) in tableau.basic_vars.iter().enumerate() {
            if basic < n_vars {
                let value = tableau.data[i][rhs_col];
                values[basic] = if value.abs() < self.tolerance { 0.0 } else { value };
            }
        }

        let objective_value = problem.objective_value(&values);
        Solution::optimal(values, objective_value)
    }
}

struct Tableau {
    data: Vec<Vec<f64>>,
    basic_vars: Vec<usize>,
    n_vars: usize,
    n_slack: usize,
    n_artificial: usize,
}

impl Tableau {
    fn artificial_start(&self) -> usize {
        self.n_vars + self.n_slack
    }
}

enum PhaseResult {
    Optimal,
    Unbounded,
    Infeasible,
    IterationLimit,
}
