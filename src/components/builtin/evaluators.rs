//! Example evaluators.

use tracing::info;

use crate::components::{EvalResult, Evaluator, Params, SharedDataloader};
use crate::data::Value;
use crate::error::ComponentError;

/// Logs the predictions and returns a fixed metric.
#[derive(Default)]
pub struct PrintEvaluator {
    predictions: Option<Value>,
}

impl Evaluator for PrintEvaluator {
    fn set_predictions(&mut self, predictions: Value) {
        self.predictions = Some(predictions);
    }

    fn evaluate(&self) -> Result<EvalResult, ComponentError> {
        info!(predictions = ?self.predictions, "evaluating predictions");
        let mut result = EvalResult::new();
        result.insert("dummy_metric".to_string(), serde_json::Value::from(1.0));
        Ok(result)
    }
}

/// Reports whether every predicted `score` exceeds 90.
#[derive(Default)]
pub struct ScoreThresholdEvaluator {
    predictions: Option<Value>,
}

impl Evaluator for ScoreThresholdEvaluator {
    fn set_predictions(&mut self, predictions: Value) {
        self.predictions = Some(predictions);
    }

    fn evaluate(&self) -> Result<EvalResult, ComponentError> {
        let all_above_90 = match self.predictions.as_ref().and_then(Value::as_frame) {
            Some(frame) => match frame.column("score") {
                Some(column) if !column.is_empty() => column
                    .cells()
                    .iter()
                    .all(|cell| cell.as_f64().is_some_and(|score| score > 90.0)),
                _ => false,
            },
            None => false,
        };

        let mut result = EvalResult::new();
        result.insert(
            "all_above_90".to_string(),
            serde_json::Value::from(all_above_90),
        );
        Ok(result)
    }
}

/// Factory registered as `builtin.evaluators.PrintEvaluator`.
pub fn make_print_evaluator(
    _params: &Params,
    _dataloader: SharedDataloader,
) -> Result<Box<dyn Evaluator>, ComponentError> {
    Ok(Box::new(PrintEvaluator::default()))
}

/// Factory registered as `builtin.evaluators.ScoreThresholdEvaluator`.
pub fn make_score_threshold_evaluator(
    _params: &Params,
    _dataloader: SharedDataloader,
) -> Result<Box<dyn Evaluator>, ComponentError> {
    Ok(Box::new(ScoreThresholdEvaluator::default()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Cell, Frame};

    fn score_predictions(scores: Vec<i64>) -> Value {
        let mut frame = Frame::new();
        frame
            .push_column("score", scores.into_iter().map(Cell::Int).collect())
            .unwrap();
        Value::Frame(frame)
    }

    #[test]
    fn test_print_evaluator_returns_dummy_metric() {
        let mut evaluator = PrintEvaluator::default();
        evaluator.set_predictions(score_predictions(vec![1]));
        let result = evaluator.evaluate().unwrap();
        assert_eq!(
            result.get("dummy_metric"),
            Some(&serde_json::Value::from(1.0))
        );
    }

    #[test]
    fn test_score_threshold_all_above() {
        let mut evaluator = ScoreThresholdEvaluator::default();
        evaluator.set_predictions(score_predictions(vec![95, 99]));
        let result = evaluator.evaluate().unwrap();
        assert_eq!(
            result.get("all_above_90"),
            Some(&serde_json::Value::from(true))
        );
    }

    #[test]
    fn test_score_threshold_some_below() {
        let mut evaluator = ScoreThresholdEvaluator::default();
        evaluator.set_predictions(score_predictions(vec![95, 70]));
        let result = evaluator.evaluate().unwrap();
        assert_eq!(
            result.get("all_above_90"),
            Some(&serde_json::Value::from(false))
        );
    }

    #[test]
    fn test_score_threshold_without_predictions() {
        let evaluator = ScoreThresholdEvaluator::default();
        let result = evaluator.evaluate().unwrap();
        assert_eq!(
            result.get("all_above_90"),
            Some(&serde_json::Value::from(false))
        );
    }

    #[test]
    fn test_score_threshold_non_tabular_predictions() {
        let mut evaluator = ScoreThresholdEvaluator::default();
        evaluator.set_predictions(Value::Sequence(vec![Cell::Int(99)]));
        let result = evaluator.evaluate().unwrap();
        assert_eq!(
            result.get("all_above_90"),
            Some(&serde_json::Value::from(false))
        );
    }
}
