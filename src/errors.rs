use serde::Serialize;
use thiserror::Error;

use crate::records::Field;

/// A row that survived sentinel filtering but could not be typed.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RowError {
    #[error("row {row}: {field} has unparseable value '{value}'")]
    Malformed {
        row: usize,
        field: Field,
        value: String,
    },
    #[error("row {row}: time taken '{value}' is missing the '(min) ' unit prefix")]
    MissingUnit { row: usize, value: String },
}

impl RowError {
    /// Input position of the offending row.
    pub fn row(&self) -> usize {
        match self {
            RowError::Malformed { row, .. } | RowError::MissingUnit { row, .. } => *row,
        }
    }
}
