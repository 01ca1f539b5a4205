//! JSON form documents.
//!
//! A document is what a user would have typed into the form: counts and cells
//! as raw text (or plain JSON numbers). Loading replays it onto a
//! [`FormState`] through the same operations an interactive front-end uses,
//! so validation happens in one place.

use std::fs;
use std::path::Path;

use lpform_model::{CountField, FormError, FormState};
use lpform_solver::Sense;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("Error reading {0}: {1}")]
    Io(String, std::io::Error),
    #[error("Invalid form document {0}: {1}")]
    Json(String, serde_json::Error),
    #[error(transparent)]
    Form(#[from] FormError),
}

/// A cell as written in JSON: either text or a number
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum CellValue {
    Text(String),
    Number(f64),
}

impl Default for CellValue {
    fn default() -> Self {
        CellValue::Text(String::new())
    }
}

impl CellValue {
    pub fn to_text(&self) -> String {
        match self {
            CellValue::Text(text) => text.clone(),
            CellValue::Number(value) => value.to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RowDocument {
    #[serde(default)]
    pub coefficients: Vec<CellValue>,
    #[serde(default = "default_relation")]
    pub relation: String,
    #[serde(default)]
    pub rhs: CellValue,
}

fn default_relation() -> String {
    lpform_model::form::DEFAULT_RELATION.to_string()
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FormDocument {
    #[serde(default)]
    pub variables: CellValue,
    #[serde(default)]
    pub direction: Sense,
    #[serde(default)]
    pub objective: Vec<CellValue>,
    #[serde(default)]
    pub constraints: Vec<RowDocument>,
}

impl FormDocument {
    pub fn load(path: &Path) -> Result<Self, DocumentError> {
        let source = fs::read_to_string(path).map_err(|e| DocumentError::Io(path.display().to_string(), e))?;
        serde_json::from_str(&source).map_err(|e| DocumentError::Json(path.display().to_string(), e))
    }

    /// Replay the document onto a fresh form
    pub fn to_form(&self) -> Result<FormState, FormError> {
        let mut form = FormState::new();

        let variables = FormState::parse_count(&self.variables.to_text(), CountField::Variables)?;
        form.set_variable_count(variables)?;
        let rows = i64::try_from(self.constraints.len()).map_err(|_| FormError::InvalidInput {
            field: CountField::Constraints,
            value: self.constraints.len().to_string(),
        })?;
        form.set_constraint_count(rows)?;
        form.set_sense(self.direction);

        for (i, cell) in self.objective.iter().enumerate() {
            form.set_objective_cell(i + 1, cell.to_text())?;
        }
        for (r, row) in self.constraints.iter().enumerate() {
            for (i, cell) in row.coefficients.iter().enumerate() {
                form.set_constraint_cell(r + 1, i + 1, cell.to_text())?;
            }
            form.set_relation(r + 1, row.relation.clone())?;
            form.set_rhs(r + 1, row.rhs.to_text())?;
        }
        Ok(form)
    }

    pub fn from_form(form: &FormState) -> Self {
        Self {
            variables: CellValue::Number(form.variable_count() as f64),
            direction: form.sense(),
            objective: form.objective_cells().iter().cloned().map(CellValue::Text).collect(),
            constraints: form
                .constraint_rows()
                .iter()
                .map(|row| RowDocument {
                    coefficients: row.coefficients.iter().cloned().map(CellValue::Text).collect(),
                    relation: row.relation.clone(),
                    rhs: CellValue::Text(row.rhs.clone()),
                })
                .collect(),
        }
    }
}
