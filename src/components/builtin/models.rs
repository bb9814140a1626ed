//! Counting and aggregating models.
//!
//! None of these learn anything during `fit`; they exist to exercise the
//! pipeline end to end. Each reads whatever the shared dataloader's buffer
//! currently holds.

use crate::components::{Model, Params, SharedDataloader};
use crate::data::{Cell, Dtype, Frame, Value};
use crate::error::ComponentError;

fn tabular_data(dataloader: &SharedDataloader) -> Result<Frame, ComponentError> {
    let guard = dataloader.borrow();
    match guard.data() {
        None => Err(ComponentError::DataNotLoaded),
        Some(Value::Frame(frame)) => Ok(frame.clone()),
        Some(other) => Err(ComponentError::Failed(format!(
            "expected tabular data, found {}",
            other.type_name()
        ))),
    }
}

/// Predicts a one-row frame counting A/B/C values of the `grade` column.
pub struct GradeCountModel {
    dataloader: SharedDataloader,
}

impl Model for GradeCountModel {
    fn fit(&mut self) -> Result<(), ComponentError> {
        Ok(())
    }

    fn infer(&self) -> Result<Value, ComponentError> {
        let frame = tabular_data(&self.dataloader)?;
        let mut counts = [0i64; 3];
        if let Some(column) = frame.column("grade") {
            for cell in column.cells() {
                if let Cell::Str(grade) = cell {
                    match grade.as_str() {
                        "A" => counts[0] += 1,
                        "B" => counts[1] += 1,
                        "C" => counts[2] += 1,
                        _ => {}
                    }
                }
            }
        }

        let mut out = Frame::new();
        for (name, count) in ["A", "B", "C"].into_iter().zip(counts) {
            out.push_column(name, vec![Cell::Int(count)])?;
        }
        Ok(Value::Frame(out))
    }
}

/// Predicts a one-row frame holding the sum of the `score` column.
pub struct SumScoreModel {
    dataloader: SharedDataloader,
}

impl Model for SumScoreModel {
    fn fit(&mut self) -> Result<(), ComponentError> {
        Ok(())
    }

    fn infer(&self) -> Result<Value, ComponentError> {
        let frame = tabular_data(&self.dataloader)?;
        let sum = frame.column("score").map_or(Cell::Null, |column| {
            let total: f64 = column.cells().iter().filter_map(Cell::as_f64).sum();
            match column.dtype() {
                Dtype::Int => Cell::Int(total as i64),
                _ => Cell::Float(total),
            }
        });

        let mut out = Frame::new();
        out.push_column("sum_score", vec![sum])?;
        Ok(Value::Frame(out))
    }
}

/// Predicts a one-row frame holding the mean of the `score` column.
pub struct MeanScoreModel {
    dataloader: SharedDataloader,
}

impl Model for MeanScoreModel {
    fn fit(&mut self) -> Result<(), ComponentError> {
        Ok(())
    }

    fn infer(&self) -> Result<Value, ComponentError> {
        let frame = tabular_data(&self.dataloader)?;
        let mean = frame.column("score").map_or(Cell::Null, |column| {
            let values: Vec<f64> = column.cells().iter().filter_map(Cell::as_f64).collect();
            if values.is_empty() {
                Cell::Null
            } else {
                Cell::Float(values.iter().sum::<f64>() / values.len() as f64)
            }
        });

        let mut out = Frame::new();
        out.push_column("mean_score", vec![mean])?;
        Ok(Value::Frame(out))
    }
}

/// Predicts a one-row frame holding the row count of the loaded data.
pub struct RowCountModel {
    dataloader: SharedDataloader,
}

impl Model for RowCountModel {
    fn fit(&mut self) -> Result<(), ComponentError> {
        Ok(())
    }

    fn infer(&self) -> Result<Value, ComponentError> {
        let frame = tabular_data(&self.dataloader)?;
        let mut out = Frame::new();
        out.push_column("row_count", vec![Cell::Int(frame.num_rows() as i64)])?;
        Ok(Value::Frame(out))
    }
}

/// Factory registered as `builtin.models.GradeCountModel`.
pub fn make_grade_count_model(
    _params: &Params,
    dataloader: SharedDataloader,
    _split: &str,
) -> Result<Box<dyn Model>, ComponentError> {
    Ok(Box::new(GradeCountModel { dataloader }))
}

/// Factory registered as `builtin.models.SumScoreModel`.
pub fn make_sum_score_model(
    _params: &Params,
    dataloader: SharedDataloader,
    _split: &str,
) -> Result<Box<dyn Model>, ComponentError> {
    Ok(Box::new(SumScoreModel { dataloader }))
}

/// Factory registered as `builtin.models.MeanScoreModel`.
pub fn make_mean_score_model(
    _params: &Params,
    dataloader: SharedDataloader,
    _split: &str,
) -> Result<Box<dyn Model>, ComponentError> {
    Ok(Box::new(MeanScoreModel { dataloader }))
}

/// Factory registered as `builtin.models.RowCountModel`.
pub fn make_row_count_model(
    _params: &Params,
    dataloader: SharedDataloader,
    _split: &str,
) -> Result<Box<dyn Model>, ComponentError> {
    Ok(Box::new(RowCountModel { dataloader }))
}
