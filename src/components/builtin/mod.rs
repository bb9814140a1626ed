//! Components shipped with the crate.
//!
//! These are the example implementations the default registry exposes under
//! the `builtin.*` containers: a CSV dataloader, small column-level
//! preprocessors, counting/aggregating models, and two evaluators.

mod dataloaders;
mod evaluators;
mod models;
mod preprocessors;

pub use dataloaders::{make_csv_dataloader, CsvDataloader};
pub use evaluators::{
    make_print_evaluator, make_score_threshold_evaluator, PrintEvaluator, ScoreThresholdEvaluator,
};
pub use models::{
    make_grade_count_model, make_mean_score_model, make_row_count_model, make_sum_score_model,
    GradeCountModel, MeanScoreModel, RowCountModel, SumScoreModel,
};
pub use preprocessors::{
    make_double_score, make_score_to_letter, make_uppercase_name, DoubleScorePreprocessor,
    ScoreToLetterPreprocessor, UppercaseNamePreprocessor,
};
