use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::Command;

use log::{debug, warn};
use tempfile::TempDir;

use crate::backend::{LpSolver, SolverError};
use crate::lp_format::write_lp;
use crate::problem::{LpProblem, Sense};
use crate::solution::{Solution, SolutionStatus};

/// Solves problems by running the COIN-OR `cbc` executable on an LP file
#[derive(Debug, Clone)]
pub struct CbcCommand {
    executable: PathBuf,
}

impl Default for CbcCommand {
    fn default() -> Self {
        Self {
            executable: PathBuf::from("cbc"),
        }
    }
}

impl CbcCommand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_executable(mut self, executable: impl Into<PathBuf>) -> Self {
        self.executable = executable.into();
        self
    }

    fn run(&self, lp_path: &Path, sol_path: &Path) -> Result<(), SolverError> {
        debug!("cbc: running {} on {}", self.executable.display(), lp_path.display());
        let output = Command::new(&self.executable)
            .arg(lp_path)
            .arg("-solve")
            .arg("-solution")
            .arg(sol_path)
            .output()
            .map_err(|e| match e.kind() {
                io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied => {
                    SolverError::Unavailable(format!("cannot run {}: {}", self.executable.display(), e))
                }
                _ => SolverError::Failure(format!("cannot run {}: {}", self.executable.display(), e)),
            })?;

        debug!("cbc: {}", String::from_utf8_lossy(&output.stdout).trim_end());
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!("cbc exited with {}", output.status);
            return Err(SolverError::Failure(format!(
                "{} exited with {}: {}",
                self.executable.display(),
                output.status,
                stderr.trim()
            )));
        }
        Ok(())
    }
}

impl LpSolver for CbcCommand {
    fn solve(&self, problem: &LpProblem) -> Result<Solution, SolverError> {
        let dir = TempDir::new().map_err(|e| SolverError::Failure(format!("cannot create temp dir: {}", e)))?;
        let lp_path = dir.path().join("model.lp");
        let sol_path = dir.path().join("model.sol");

        write_model(&as_minimization(problem), &lp_path)
            .map_err(|e| SolverError::Failure(format!("cannot write {}: {}", lp_path.display(), e)))?;

        self.run(&lp_path, &sol_path)?;

        let text = fs::read_to_string(&sol_path)
            .map_err(|e| SolverError::Failure(format!("no solution file from cbc: {}", e)))?;
        parse_solution(&text, problem)
    }

    fn name(&self) -> &str {
        "cbc"
    }
}

fn write_model(problem: &LpProblem, path: &Path) -> io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    write_lp(problem, &mut out)?;
    out.flush()
}

/// CBC's LP reader handles minimisation most reliably, so a maximised
/// objective is negated. Reported objective values are recomputed from the
/// original problem.
fn as_minimization(problem: &LpProblem) -> LpProblem {
    let mut min = problem.clone();
    if problem.objective.sense == Sense::Maximize {
        let negated = problem.objective.coefficients.iter().map(|c| -c).collect();
        min.set_objective(negated, Sense::Minimize);
    }
    min
}

/// Map the first line of a CBC solution file onto a status
fn parse_status(line: &str) -> SolutionStatus {
    let line = line.trim_start();
    if line.starts_with("Optimal") {
        SolutionStatus::Optimal
    } else if line.starts_with("Infeasible") || line.starts_with("Integer infeasible") {
        SolutionStatus::Infeasible
    } else if line.starts_with("Unbounded") {
        SolutionStatus::Unbounded
    } else if line.starts_with("Stopped") {
        SolutionStatus::NotSolved
    } else {
        SolutionStatus::Undefined
    }
}

/// Parse a CBC solution file for `problem`.
///
/// Value lines look like `<index> <name> <value> <reduced cost>`, optionally
/// prefixed with `**` when the entry is infeasible. Row entries share the
/// format and are skipped by name.
pub fn parse_solution(text: &str, problem: &LpProblem) -> Result<Solution, SolverError> {
    let mut lines = text.lines();
    let first = lines
        .next()
        .ok_or_else(|| SolverError::Failure("empty cbc solution file".to_string()))?;

    let status = parse_status(first);
    if !status.is_optimal() {
        return Ok(Solution::without_assignment(status));
    }

    let mut values = vec![0.0; problem.num_variables()];
    for line in lines {
        let mut fields = line.split_whitespace().peekable();
        if fields.peek() == Some(&"**") {
            fields.next();
        }
        let (Some(_index), Some(name), Some(value)) = (fields.next(), fields.next(), fields.next()) else {
            continue;
        };
        let Some(position) = problem.variables.iter().position(|v| v == name) else {
            continue;
        };
        values[position] = value
            .parse()
            .map_err(|_| SolverError::Failure(format!("bad value '{}' for {} in cbc solution", value, name)))?;
    }

    let objective_value = problem.objective_value(&values);
    Ok(Solution::optimal(values, objective_value))
}
