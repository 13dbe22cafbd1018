use crate::error::{AppError, Result};
use serde_json::Value;
use std::fmt;

/// A single cell as read from or written to a range.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    #[default]
    Empty,
    Bool(bool),
    Number(f64),
    Text(String),
}

/// Rows of cells; rows may have different lengths.
pub type ValueGrid = Vec<Vec<CellValue>>;

impl CellValue {
    fn to_json(&self) -> Result<Value> {
        let value = match self {
            // An empty string clears the cell; null would leave it untouched
            CellValue::Empty => Value::String(String::new()),
            CellValue::Bool(b) => Value::Bool(*b),
            CellValue::Number(n) if n.fract() == 0.0 && n.abs() < i64::MAX as f64 => {
                Value::from(*n as i64)
            }
            CellValue::Number(n) => serde_json::Number::from_f64(*n)
                .map(Value::Number)
                .ok_or_else(|| AppError::Validation(format!("Cannot write number {}", n)))?,
            CellValue::Text(s) => Value::String(s.clone()),
        };
        Ok(value)
    }
}

impl From<Value> for CellValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => CellValue::Empty,
            Value::Bool(b) => CellValue::Bool(b),
            Value::Number(n) => n.as_f64().map(CellValue::Number).unwrap_or_default(),
            Value::String(s) if s.is_empty() => CellValue::Empty,
            Value::String(s) => CellValue::Text(s),
            other => CellValue::Text(other.to_string()),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<i32> for CellValue {
    fn from(n: i32) -> Self {
        CellValue::Number(n.into())
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Bool(true) => write!(f, "TRUE"),
            CellValue::Bool(false) => write!(f, "FALSE"),
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Text(s) => write!(f, "{}", s),
        }
    }
}

pub(super) fn grid_from_json(rows: Option<Vec<Vec<Value>>>) -> ValueGrid {
    rows.unwrap_or_default()
        .into_iter()
        .map(|row| row.into_iter().map(CellValue::from).collect())
        .collect()
}

pub(super) fn grid_to_json(grid: &[Vec<CellValue>]) -> Result<Vec<Vec<Value>>> {
    grid.iter()
        .map(|row| row.iter().map(CellValue::to_json).collect())
        .collect()
}
