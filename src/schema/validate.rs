//! Structural validation of tabular data against a declared schema.
//!
//! Validation collects every violation instead of stopping at the first,
//! so one pass reports all missing columns and type mismatches.

use std::fmt;

use serde::Serialize;

use crate::data::{Cell, Dtype, Frame};
use crate::error::SchemaError;
use crate::schema::{ColumnType, NestedType, Primitive, SchemaDoc, Shape};

/// One structural violation found while checking data against a schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Violation {
    /// A declared column is absent from the data.
    MissingColumn { column: String },
    /// A primitive column's aggregate dtype differs from the declaration.
    ColumnTypeMismatch {
        column: String,
        expected: Primitive,
        actual: Dtype,
    },
    /// A row of a declared list column is not a list, or holds elements of
    /// the wrong type.
    ElementTypeMismatch {
        column: String,
        row: usize,
        message: String,
    },
    /// A row of a declared dict column is not a dict, or holds values of
    /// the wrong type.
    ValueTypeMismatch {
        column: String,
        row: usize,
        message: String,
    },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::MissingColumn { column } => write!(f, "Missing column: {}", column),
            Violation::ColumnTypeMismatch {
                column,
                expected,
                actual,
            } => write!(
                f,
                "Column {} is not of type {} (found {})",
                column, expected, actual
            ),
            Violation::ElementTypeMismatch {
                column,
                row,
                message,
            } => write!(f, "Row {} column {} {}", row, column, message),
            Violation::ValueTypeMismatch {
                column,
                row,
                message,
            } => write!(f, "Row {} column {} {}", row, column, message),
        }
    }
}

/// The outcome of validating one subject: zero or more violations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationReport {
    /// Name of the validated subject.
    pub subject: String,
    /// All violations found, in column-declaration order.
    pub violations: Vec<Violation>,
}

impl ValidationReport {
    /// Creates an empty report for a subject.
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            violations: Vec::new(),
        }
    }

    /// Records a violation.
    pub fn push(&mut self, violation: Violation) {
        self.violations.push(violation);
    }

    /// True when no violations were found.
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "subject '{}': {} violation(s)",
            self.subject,
            self.violations.len()
        )?;
        for violation in &self.violations {
            write!(f, "; {}", violation)?;
        }
        Ok(())
    }
}

/// Checks a tabular value against the declared shape of `subject`.
///
/// Only `dataframe` shapes can be validated against tabular data. Extra
/// columns in the data are permitted; every declared column is checked.
///
/// # Errors
/// - [`SchemaError::UnknownSubject`] when the document has no entry for
///   `subject`.
/// - [`SchemaError::UnsupportedValidation`] when the subject's shape is not
///   a dataframe.
pub fn validate(
    frame: &Frame,
    doc: &SchemaDoc,
    subject: &str,
) -> Result<ValidationReport, SchemaError> {
    let shape = doc
        .get(subject)
        .ok_or_else(|| SchemaError::UnknownSubject(subject.to_string()))?;
    let Shape::Dataframe { columns } = shape else {
        return Err(SchemaError::UnsupportedValidation(
            shape.type_name().to_string(),
        ));
    };

    let mut report = ValidationReport::new(subject);
    for (name, declared) in columns {
        let Some(column) = frame.column(name) else {
            report.push(Violation::MissingColumn {
                column: name.clone(),
            });
            continue;
        };

        match declared {
            ColumnType::Nested(NestedType::List { items }) => {
                check_list_column(name, column.cells(), *items, &mut report);
            }
            ColumnType::Nested(NestedType::Dict { values }) => {
                check_dict_column(name, column.cells(), *values, &mut report);
            }
            ColumnType::Primitive(primitive) => {
                check_primitive_column(name, column.dtype(), *primitive, &mut report);
            }
        }
    }
    Ok(report)
}

/// Every row must hold a list; non-empty lists must hold only `items`-typed
/// elements. One violation per offending row.
fn check_list_column(name: &str, cells: &[Cell], items: Primitive, report: &mut ValidationReport) {
    for (row, cell) in cells.iter().enumerate() {
        match cell {
            Cell::List(elements) => {
                if !elements.iter().all(|e| cell_matches(e, items)) {
                    report.push(Violation::ElementTypeMismatch {
                        column: name.to_string(),
                        row,
                        message: format!("list elements are not of type {}", items),
                    });
                }
            }
            _ => report.push(Violation::ElementTypeMismatch {
                column: name.to_string(),
                row,
                message: "is not a list".to_string(),
            }),
        }
    }
}

/// Every row must hold a dict; non-empty dicts must hold only
/// `values`-typed values. One violation per offending row.
fn check_dict_column(name: &str, cells: &[Cell], values: Primitive, report: &mut ValidationReport) {
    for (row, cell) in cells.iter().enumerate() {
        match cell {
            Cell::Map(entries) => {
                if !entries.values().all(|v| cell_matches(v, values)) {
                    report.push(Violation::ValueTypeMismatch {
                        column: name.to_string(),
                        row,
                        message: format!("dict values are not of type {}", values),
                    });
                }
            }
            _ => report.push(Violation::ValueTypeMismatch {
                column: name.to_string(),
                row,
                message: "is not a dict".to_string(),
            }),
        }
    }
}

/// Primitive declarations are checked at column-dtype granularity, not per
/// cell. `bool` and `Any` declarations are not dtype-checked.
fn check_primitive_column(
    name: &str,
    dtype: Dtype,
    expected: Primitive,
    report: &mut ValidationReport,
) {
    let matches = match expected {
        Primitive::Int => dtype == Dtype::Int,
        Primitive::Float => dtype == Dtype::Float,
        Primitive::Str => dtype == Dtype::Str,
        Primitive::Bool | Primitive::Any => true,
    };
    if !matches {
        report.push(Violation::ColumnTypeMismatch {
            column: name.to_string(),
            expected,
            actual: dtype,
        });
    }
}

fn cell_matches(cell: &Cell, expected: Primitive) -> bool {
    match expected {
        Primitive::Int => matches!(cell, Cell::Int(_)),
        Primitive::Float => matches!(cell, Cell::Float(_)),
        Primitive::Str => matches!(cell, Cell::Str(_)),
        Primitive::Bool => matches!(cell, Cell::Bool(_)),
        Primitive::Any => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Value;
    use crate::schema::infer;
    use std::collections::BTreeMap;

    fn create_test_frame() -> Frame {
        let mut frame = Frame::new();
        frame
            .push_column("name", vec![Cell::from("ann"), Cell::from("bo")])
            .unwrap();
        frame
            .push_column("score", vec![Cell::Int(95), Cell::Int(70)])
            .unwrap();
        frame
            .push_column(
                "tags",
                vec![
                    Cell::List(vec![Cell::Int(1), Cell::Int(2), Cell::Int(3)]),
                    Cell::List(vec![]),
                ],
            )
            .unwrap();
        frame
    }

    fn schema_for(frame: &Frame, subject: &str) -> SchemaDoc {
        infer(&Value::Frame(frame.clone()), subject).unwrap()
    }

    #[test]
    fn test_inference_round_trip_is_clean() {
        let frame = create_test_frame();
        let doc = schema_for(&frame, "T");
        let report = validate(&frame, &doc, "T").unwrap();
        assert!(report.is_clean(), "unexpected violations: {}", report);
    }

    #[test]
    fn test_missing_column_detected_exactly_once() {
        let frame = create_test_frame();
        let doc = schema_for(&frame, "T");

        let mut stripped = Frame::new();
        stripped
            .push_column("name", vec![Cell::from("ann"), Cell::from("bo")])
            .unwrap();
        stripped
            .push_column(
                "tags",
                vec![Cell::List(vec![Cell::Int(1)]), Cell::List(vec![])],
            )
            .unwrap();

        let report = validate(&stripped, &doc, "T").unwrap();
        assert_eq!(
            report.violations,
            vec![Violation::MissingColumn {
                column: "score".to_string()
            }]
        );
    }

    #[test]
    fn test_collects_all_violations() {
        let frame = create_test_frame();
        let doc = schema_for(&frame, "T");

        // Empty frame: every declared column missing.
        let report = validate(&Frame::new(), &doc, "T").unwrap();
        assert_eq!(report.violations.len(), 3);
        assert!(report
            .violations
            .iter()
            .all(|v| matches!(v, Violation::MissingColumn { .. })));
    }

    #[test]
    fn test_nested_list_element_mismatch() {
        let frame = create_test_frame();
        let doc = schema_for(&frame, "T");

        let mut bad = Frame::new();
        bad.push_column("name", vec![Cell::from("ann")]).unwrap();
        bad.push_column("score", vec![Cell::Int(95)]).unwrap();
        bad.push_column("tags", vec![Cell::List(vec![Cell::from("a"), Cell::from("b")])])
            .unwrap();

        let report = validate(&bad, &doc, "T").unwrap();
        assert_eq!(report.violations.len(), 1);
        assert!(matches!(
            report.violations[0],
            Violation::ElementTypeMismatch { row: 0, .. }
        ));
    }

    #[test]
    fn test_non_list_row_in_list_column() {
        let frame = create_test_frame();
        let doc = schema_for(&frame, "T");

        let mut bad = Frame::new();
        bad.push_column("name", vec![Cell::from("ann")]).unwrap();
        bad.push_column("score", vec![Cell::Int(95)]).unwrap();
        bad.push_column("tags", vec![Cell::Int(7)]).unwrap();

        let report = validate(&bad, &doc, "T").unwrap();
        assert_eq!(report.violations.len(), 1);
        let text = report.violations[0].to_string();
        assert!(text.contains("is not a list"), "got: {}", text);
    }

    #[test]
    fn test_empty_list_rows_pass() {
        let doc = schema_for(&create_test_frame(), "T");

        let mut frame = Frame::new();
        frame.push_column("name", vec![Cell::from("x")]).unwrap();
        frame.push_column("score", vec![Cell::Int(1)]).unwrap();
        frame.push_column("tags", vec![Cell::List(vec![])]).unwrap();

        let report = validate(&frame, &doc, "T").unwrap();
        assert!(report.is_clean());
    }

    #[test]
    fn test_dict_value_mismatch() {
        let mut entries = BTreeMap::new();
        entries.insert("a".to_string(), Cell::Int(1));
        let mut frame = Frame::new();
        frame
            .push_column("meta", vec![Cell::Map(entries)])
            .unwrap();
        let doc = schema_for(&frame, "T");

        let mut bad_entries = BTreeMap::new();
        bad_entries.insert("a".to_string(), Cell::from("one"));
        let mut bad = Frame::new();
        bad.push_column("meta", vec![Cell::Map(bad_entries)]).unwrap();

        let report = validate(&bad, &doc, "T").unwrap();
        assert_eq!(report.violations.len(), 1);
        assert!(matches!(
            report.violations[0],
            Violation::ValueTypeMismatch { row: 0, .. }
        ));
    }

    #[test]
    fn test_column_dtype_mismatch() {
        let frame = create_test_frame();
        let doc = schema_for(&frame, "T");

        let mut bad = Frame::new();
        bad.push_column("name", vec![Cell::from("ann")]).unwrap();
        bad.push_column("score", vec![Cell::from("ninety")]).unwrap();
        bad.push_column("tags", vec![Cell::List(vec![])]).unwrap();

        let report = validate(&bad, &doc, "T").unwrap();
        assert_eq!(
            report.violations,
            vec![Violation::ColumnTypeMismatch {
                column: "score".to_string(),
                expected: Primitive::Int,
                actual: Dtype::Str,
            }]
        );
    }

    #[test]
    fn test_extra_columns_permitted() {
        let frame = create_test_frame();
        let doc = schema_for(&frame, "T");

        let mut wider = frame.clone();
        wider
            .push_column("extra", vec![Cell::Int(0), Cell::Int(0)])
            .unwrap();
        let report = validate(&wider, &doc, "T").unwrap();
        assert!(report.is_clean());
    }

    #[test]
    fn test_unknown_subject() {
        let doc = schema_for(&create_test_frame(), "T");
        let result = validate(&create_test_frame(), &doc, "Other");
        assert!(matches!(result, Err(SchemaError::UnknownSubject(_))));
    }

    #[test]
    fn test_non_dataframe_schema_unsupported() {
        let doc = SchemaDoc::single(
            "S",
            Shape::List {
                items: Primitive::Any,
            },
        );
        let result = validate(&create_test_frame(), &doc, "S");
        assert!(matches!(result, Err(SchemaError::UnsupportedValidation(_))));
    }

    #[test]
    fn test_any_column_never_mismatches() {
        let mut columns = BTreeMap::new();
        columns.insert("x".to_string(), ColumnType::Primitive(Primitive::Any));
        let doc = SchemaDoc::single("S", Shape::Dataframe { columns });

        let mut frame = Frame::new();
        frame
            .push_column("x", vec![Cell::from("a"), Cell::Int(1)])
            .unwrap();
        let report = validate(&frame, &doc, "S").unwrap();
        assert!(report.is_clean());
    }
}
