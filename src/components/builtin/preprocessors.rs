//! Column-level preprocessors.
//!
//! Each is a no-op when the data is not tabular or the expected column is
//! absent.

use crate::components::{Params, Preprocessor};
use crate::data::{Cell, Value};
use crate::error::ComponentError;

/// Adds a `grade` column derived from `score`: >= 90 is A, >= 80 is B,
/// everything else C.
pub struct ScoreToLetterPreprocessor;

impl Preprocessor for ScoreToLetterPreprocessor {
    fn process(&self, data: Value) -> Result<Value, ComponentError> {
        match data {
            Value::Frame(mut frame) => {
                if let Some(column) = frame.column("score") {
                    let grades: Vec<Cell> = column.cells().iter().map(grade_cell).collect();
                    frame.set_column("grade", grades)?;
                }
                Ok(Value::Frame(frame))
            }
            other => Ok(other),
        }
    }
}

fn grade_cell(cell: &Cell) -> Cell {
    match cell.as_f64() {
        Some(score) if score >= 90.0 => Cell::from("A"),
        Some(score) if score >= 80.0 => Cell::from("B"),
        Some(_) => Cell::from("C"),
        None => Cell::Null,
    }
}

/// Doubles every value in the `score` column.
pub struct DoubleScorePreprocessor;

impl Preprocessor for DoubleScorePreprocessor {
    fn process(&self, data: Value) -> Result<Value, ComponentError> {
        match data {
            Value::Frame(mut frame) => {
                if let Some(column) = frame.column("score") {
                    let doubled: Vec<Cell> = column
                        .cells()
                        .iter()
                        .map(|cell| match cell {
                            Cell::Int(i) => Cell::Int(i * 2),
                            Cell::Float(f) => Cell::Float(f * 2.0),
                            other => other.clone(),
                        })
                        .collect();
                    frame.set_column("score", doubled)?;
                }
                Ok(Value::Frame(frame))
            }
            other => Ok(other),
        }
    }
}

/// Uppercases every string in the `name` column.
pub struct UppercaseNamePreprocessor;

impl Preprocessor for UppercaseNamePreprocessor {
    fn process(&self, data: Value) -> Result<Value, ComponentError> {
        match data {
            Value::Frame(mut frame) => {
                if let Some(column) = frame.column("name") {
                    let upper: Vec<Cell> = column
                        .cells()
                        .iter()
                        .map(|cell| match cell {
                            Cell::Str(s) => Cell::Str(s.to_uppercase()),
                            other => other.clone(),
                        })
                        .collect();
                    frame.set_column("name", upper)?;
                }
                Ok(Value::Frame(frame))
            }
            other => Ok(other),
        }
    }
}

/// Factory registered as `builtin.preprocessors.ScoreToLetterPreprocessor`.
pub fn make_score_to_letter(_params: &Params) -> Result<Box<dyn Preprocessor>, ComponentError> {
    Ok(Box::new(ScoreToLetterPreprocessor))
}

/// Factory registered as `builtin.preprocessors.DoubleScorePreprocessor`.
pub fn make_double_score(_params: &Params) -> Result<Box<dyn Preprocessor>, ComponentError> {
    Ok(Box::new(DoubleScorePreprocessor))
}

/// Factory registered as `builtin.preprocessors.UppercaseNamePreprocessor`.
pub fn make_uppercase_name(_params: &Params) -> Result<Box<dyn Preprocessor>, ComponentError> {
    Ok(Box::new(UppercaseNamePreprocessor))
}
