use std::fmt;

use lpform_solver::Sense;
use thiserror::Error;

/// Relation shown in a freshly built constraint row
pub const DEFAULT_RELATION: &str = "<=";
pub const DEFAULT_VARIABLE_COUNT: usize = 5;
pub const DEFAULT_CONSTRAINT_COUNT: usize = 3;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormError {
    #[error("Invalid input: the {field} must be {}, got '{value}'", .field.requirement())]
    InvalidInput { field: CountField, value: String },
    #[error("No {0} in the current form")]
    CellOutOfRange(Cell),
}

/// The two count inputs that reshape the form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountField {
    Variables,
    Constraints,
}

impl CountField {
    fn requirement(self) -> &'static str {
        match self {
            CountField::Variables => "a positive integer",
            CountField::Constraints => "a non-negative integer",
        }
    }

    fn minimum(self) -> i64 {
        match self {
            CountField::Variables => 1,
            CountField::Constraints => 0,
        }
    }
}

impl fmt::Display for CountField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CountField::Variables => f.write_str("number of variables"),
            CountField::Constraints => f.write_str("number of constraints"),
        }
    }
}

/// Location of an editable cell. Rows and variables are 1-based, matching the
/// `x1..xN` labels shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Objective { variable: usize },
    Coefficient { row: usize, variable: usize },
    Relation { row: usize },
    Rhs { row: usize },
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Objective { variable } => write!(f, "objective coefficient x{}", variable),
            Cell::Coefficient { row, variable } => write!(f, "constraint {}, x{}", row, variable),
            Cell::Relation { row } => write!(f, "constraint {} relation", row),
            Cell::Rhs { row } => write!(f, "constraint {} RHS", row),
        }
    }
}

/// One editable constraint row, all raw text
#[derive(Debug, Clone, PartialEq)]
pub struct ConstraintRow {
    pub coefficients: Vec<String>,
    pub relation: String,
    pub rhs: String,
}

impl ConstraintRow {
    fn blank(variable_count: usize) -> Self {
        Self {
            coefficients: vec![String::new(); variable_count],
            relation: DEFAULT_RELATION.to_string(),
            rhs: String::new(),
        }
    }
}

/// Editable, unvalidated problem input.
///
/// Every reshape (variable or constraint count) rebuilds the affected cells
/// from scratch; previously entered text is discarded.
#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    sense: Sense,
    objective: Vec<String>,
    constraints: Vec<ConstraintRow>,
}

impl Default for FormState {
    fn default() -> Self {
        Self::with_shape(DEFAULT_VARIABLE_COUNT, DEFAULT_CONSTRAINT_COUNT)
    }
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Blank form with the given shape. `variable_count` is clamped to at least 1.
    pub fn with_shape(variable_count: usize, constraint_count: usize) -> Self {
        let n = variable_count.max(1);
        Self {
            sense: Sense::Maximize,
            objective: vec![String::new(); n],
            constraints: (0..constraint_count).map(|_| ConstraintRow::blank(n)).collect(),
        }
    }

    /// Parse a raw count cell
    pub fn parse_count(text: &str, field: CountField) -> Result<i64, FormError> {
        text.trim().parse::<i64>().map_err(|_| FormError::InvalidInput {
            field,
            value: text.to_string(),
        })
    }

    fn check_count(n: i64, field: CountField) -> Result<usize, FormError> {
        if n < field.minimum() {
            return Err(FormError::InvalidInput {
                field,
                value: n.to_string(),
            });
        }
        usize::try_from(n).map_err(|_| FormError::InvalidInput {
            field,
            value: n.to_string(),
        })
    }

    /// Resize to `n` variables, clearing the objective and rebuilding every
    /// constraint row blank
    pub fn set_variable_count(&mut self, n: i64) -> Result<(), FormError> {
        let n = Self::check_count(n, CountField::Variables)?;
        self.objective = vec![String::new(); n];
        let rows = self.constraints.len();
        self.constraints = (0..rows).map(|_| ConstraintRow::blank(n)).collect();
        Ok(())
    }

    /// Replace the constraint rows with `n` blank rows
    pub fn set_constraint_count(&mut self, n: i64) -> Result<(), FormError> {
        let n = Self::check_count(n, CountField::Constraints)?;
        let variables = self.variable_count();
        self.constraints = (0..n).map(|_| ConstraintRow::blank(variables)).collect();
        Ok(())
    }

    pub fn set_sense(&mut self, sense: Sense) {
        self.sense = sense;
    }

    pub fn set_objective_cell(&mut self, variable: usize, text: impl Into<String>) -> Result<(), FormError> {
        let slot = variable
            .checked_sub(1)
            .and_then(|i| self.objective.get_mut(i))
            .ok_or(FormError::CellOutOfRange(Cell::Objective { variable }))?;
        *slot = text.into();
        Ok(())
    }

    pub fn set_constraint_cell(&mut self, row: usize, variable: usize, text: impl Into<String>) -> Result<(), FormError> {
        let cell = Cell::Coefficient { row, variable };
        let coefficients = &mut self.row_mut(row, cell)?.coefficients;
        let slot = variable
            .checked_sub(1)
            .and_then(|i| coefficients.get_mut(i))
            .ok_or(FormError::CellOutOfRange(cell))?;
        *slot = text.into();
        Ok(())
    }

    pub fn set_relation(&mut self, row: usize, text: impl Into<String>) -> Result<(), FormError> {
        self.row_mut(row, Cell::Relation { row })?.relation = text.into();
        Ok(())
    }

    pub fn set_rhs(&mut self, row: usize, text: impl Into<String>) -> Result<(), FormError> {
        self.row_mut(row, Cell::Rhs { row })?.rhs = text.into();
        Ok(())
    }

    fn row_mut(&mut self, row: usize, cell: Cell) -> Result<&mut ConstraintRow, FormError> {
        row.checked_sub(1)
            .and_then(|i| self.constraints.get_mut(i))
            .ok_or(FormError::CellOutOfRange(cell))
    }

    pub fn variable_count(&self) -> usize {
        self.objective.len()
    }

    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    pub fn sense(&self) -> Sense {
        self.sense
    }

    pub fn objective_cells(&self) -> &[String] {
        &self.objective
    }

    pub fn constraint_rows(&self) -> &[ConstraintRow] {
        &self.constraints
    }
}
