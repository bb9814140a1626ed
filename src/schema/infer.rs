//! Single-sample schema inference.

use std::collections::BTreeMap;

use crate::data::{Cell, Column, Dtype, Value};
use crate::error::SchemaError;
use crate::schema::{ColumnType, NestedType, Primitive, SchemaDoc, Shape};

/// Derives a structural schema from one realized sample value.
///
/// Inference looks at a single representative per column or sequence (the
/// first non-null element); it does not union over the whole sample, so a
/// heterogeneous column reports the first element's shape.
///
/// # Errors
/// Returns [`SchemaError::UnsupportedShape`] for values with no structural
/// representation (e.g. a bare null scalar).
pub fn infer(sample: &Value, name: &str) -> Result<SchemaDoc, SchemaError> {
    let shape = infer_shape(sample)?;
    Ok(SchemaDoc::single(name, shape))
}

fn infer_shape(sample: &Value) -> Result<Shape, SchemaError> {
    match sample {
        Value::Frame(frame) => {
            let columns: BTreeMap<String, ColumnType> = frame
                .columns()
                .iter()
                .map(|column| (column.name().to_string(), infer_column(column)))
                .collect();
            Ok(Shape::Dataframe { columns })
        }
        Value::Mapping(map) => {
            let values = map
                .keys()
                .map(|key| (key.clone(), Primitive::Any))
                .collect();
            Ok(Shape::Dict { values })
        }
        Value::Sequence(_) => Ok(Shape::List {
            items: Primitive::Any,
        }),
        Value::Scalar(cell) => match cell {
            Cell::Int(_) => Ok(Shape::Int),
            Cell::Float(_) => Ok(Shape::Float),
            Cell::Bool(_) => Ok(Shape::Bool),
            Cell::Str(_) => Ok(Shape::Str),
            other => Err(SchemaError::UnsupportedShape(other.type_name().to_string())),
        },
    }
}

/// Infers a column's declared type from its first non-null cell.
fn infer_column(column: &Column) -> ColumnType {
    match column.first_non_null() {
        Some(Cell::List(items)) => ColumnType::Nested(NestedType::List {
            items: items.first().map_or(Primitive::Any, primitive_of),
        }),
        Some(Cell::Map(entries)) => ColumnType::Nested(NestedType::Dict {
            values: entries.values().next().map_or(Primitive::Any, primitive_of),
        }),
        _ => ColumnType::Primitive(match column.dtype() {
            Dtype::Int => Primitive::Int,
            Dtype::Float => Primitive::Float,
            Dtype::Bool => Primitive::Bool,
            _ => Primitive::Str,
        }),
    }
}

/// Primitive tag for a representative element; `Any` for nested elements.
fn primitive_of(cell: &Cell) -> Primitive {
    match cell {
        Cell::Int(_) => Primitive::Int,
        Cell::Float(_) => Primitive::Float,
        Cell::Bool(_) => Primitive::Bool,
        Cell::Str(_) => Primitive::Str,
        _ => Primitive::Any,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Frame;

    fn frame_with(name: &str, cells: Vec<Cell>) -> Value {
        let mut frame = Frame::new();
        frame.push_column(name, cells).unwrap();
        Value::Frame(frame)
    }

    fn inferred_column(value: &Value) -> ColumnType {
        let doc = infer(value, "T").unwrap();
        match doc.get("T").unwrap() {
            Shape::Dataframe { columns } => *columns.values().next().unwrap(),
            other => panic!("expected dataframe shape, got {}", other.type_name()),
        }
    }

    #[test]
    fn test_primitive_columns() {
        let value = frame_with("score", vec![Cell::Int(95), Cell::Int(70)]);
        assert_eq!(
            inferred_column(&value),
            ColumnType::Primitive(Primitive::Int)
        );

        let value = frame_with("ratio", vec![Cell::Float(0.5)]);
        assert_eq!(
            inferred_column(&value),
            ColumnType::Primitive(Primitive::Float)
        );

        let value = frame_with("flag", vec![Cell::Bool(true)]);
        assert_eq!(
            inferred_column(&value),
            ColumnType::Primitive(Primitive::Bool)
        );
    }

    #[test]
    fn test_mixed_column_falls_back_to_str() {
        let value = frame_with("x", vec![Cell::Int(1), Cell::from("two")]);
        assert_eq!(
            inferred_column(&value),
            ColumnType::Primitive(Primitive::Str)
        );
    }

    #[test]
    fn test_list_column_uses_first_element() {
        let value = frame_with(
            "tags",
            vec![Cell::List(vec![Cell::Int(1), Cell::Int(2), Cell::Int(3)])],
        );
        assert_eq!(
            inferred_column(&value),
            ColumnType::Nested(NestedType::List {
                items: Primitive::Int
            })
        );
    }

    #[test]
    fn test_empty_list_column_is_any() {
        let value = frame_with("tags", vec![Cell::List(vec![])]);
        assert_eq!(
            inferred_column(&value),
            ColumnType::Nested(NestedType::List {
                items: Primitive::Any
            })
        );
    }

    #[test]
    fn test_dict_column_uses_first_value() {
        let mut entries = BTreeMap::new();
        entries.insert("a".to_string(), Cell::Float(1.0));
        let value = frame_with("meta", vec![Cell::Map(entries)]);
        assert_eq!(
            inferred_column(&value),
            ColumnType::Nested(NestedType::Dict {
                values: Primitive::Float
            })
        );
    }

    #[test]
    fn test_null_leading_column_uses_first_non_null() {
        let value = frame_with("tags", vec![Cell::Null, Cell::List(vec![Cell::from("x")])]);
        assert_eq!(
            inferred_column(&value),
            ColumnType::Nested(NestedType::List {
                items: Primitive::Str
            })
        );
    }

    #[test]
    fn test_mapping_infers_any_values() {
        let mut map = BTreeMap::new();
        map.insert("count".to_string(), Cell::Int(3));
        map.insert("label".to_string(), Cell::from("x"));
        let doc = infer(&Value::Mapping(map), "M").unwrap();
        match doc.get("M").unwrap() {
            Shape::Dict { values } => {
                assert_eq!(values.get("count"), Some(&Primitive::Any));
                assert_eq!(values.get("label"), Some(&Primitive::Any));
            }
            other => panic!("expected dict shape, got {}", other.type_name()),
        }
    }

    #[test]
    fn test_sequence_infers_any_items() {
        let doc = infer(&Value::Sequence(vec![Cell::Int(1)]), "S").unwrap();
        assert_eq!(
            doc.get("S"),
            Some(&Shape::List {
                items: Primitive::Any
            })
        );
    }

    #[test]
    fn test_scalar_keeps_exact_type() {
        let doc = infer(&Value::Scalar(Cell::Float(2.5)), "V").unwrap();
        assert_eq!(doc.get("V"), Some(&Shape::Float));
    }

    #[test]
    fn test_null_scalar_unsupported() {
        let result = infer(&Value::Scalar(Cell::Null), "V");
        assert!(matches!(result, Err(SchemaError::UnsupportedShape(_))));
    }
}
