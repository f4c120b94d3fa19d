//! Row → RecordBatch conversion for projected results.

use crate::error::{PplxError, PplxResult};
use crate::sql::executor::schema::OutputSchema;
use crate::value::{ExprValue, Row, ScalarValue};
use arrow::array::{
    ArrayRef, BooleanBuilder, Float64Builder, Int32Builder, Int64Builder, NullArray,
    StringBuilder,
};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use std::sync::Arc;

/// Convert projected rows into an Arrow `RecordBatch` shaped by `schema`.
///
/// `Null` and `Missing` become Arrow nulls. Nested values (arrays, tuples)
/// and values not matching the declared column type are rejected.
pub fn rows_to_record_batch(schema: &OutputSchema, rows: &[Row]) -> PplxResult<RecordBatch> {
    let arrow_schema = Arc::new(schema.to_arrow());
    let columns: Vec<ArrayRef> = schema
        .columns()
        .iter()
        .map(|c| build_column(&c.name, &c.data_type, rows))
        .collect::<PplxResult<_>>()?;
    if columns.is_empty() {
        return Ok(RecordBatch::new_empty(arrow_schema));
    }
    Ok(RecordBatch::try_new(arrow_schema, columns)?)
}

fn cell<'a>(row: &'a Row, name: &str) -> PplxResult<&'a ExprValue> {
    match row {
        ExprValue::Tuple(t) => Ok(t.get(name)),
        other => Err(PplxError::TypeMismatch {
            expected: "STRUCT".to_string(),
            actual: other.type_name().to_string(),
        }),
    }
}

fn mismatch(expected: &str, actual: &ExprValue) -> PplxError {
    PplxError::TypeMismatch {
        expected: expected.to_string(),
        actual: actual.type_name().to_string(),
    }
}

/// Build a single column array from row data.
fn build_column(name: &str, data_type: &DataType, rows: &[Row]) -> PplxResult<ArrayRef> {
    match data_type {
        DataType::Int32 => {
            let mut builder = Int32Builder::with_capacity(rows.len());
            for row in rows {
                match cell(row, name)? {
                    ExprValue::Scalar(ScalarValue::Int32(v)) => builder.append_value(*v),
                    v if v.is_null_or_missing() => builder.append_null(),
                    other => return Err(mismatch("INTEGER", other)),
                }
            }
            Ok(Arc::new(builder.finish()))
        }
        DataType::Int64 => {
            let mut builder = Int64Builder::with_capacity(rows.len());
            for row in rows {
                match cell(row, name)? {
                    ExprValue::Scalar(ScalarValue::Int64(v)) => builder.append_value(*v),
                    ExprValue::Scalar(ScalarValue::Int32(v)) => builder.append_value(i64::from(*v)),
                    v if v.is_null_or_missing() => builder.append_null(),
                    other => return Err(mismatch("LONG", other)),
                }
            }
            Ok(Arc::new(builder.finish()))
        }
        DataType::Float64 => {
            let mut builder = Float64Builder::with_capacity(rows.len());
            for row in rows {
                match cell(row, name)? {
                    ExprValue::Scalar(ScalarValue::Float64(v)) => builder.append_value(*v),
                    v if v.is_null_or_missing() => builder.append_null(),
                    other => return Err(mismatch("DOUBLE", other)),
                }
            }
            Ok(Arc::new(builder.finish()))
        }
        DataType::Utf8 => {
            let mut builder = StringBuilder::with_capacity(rows.len(), 256);
            for row in rows {
                match cell(row, name)? {
                    ExprValue::Scalar(ScalarValue::Utf8(v)) => builder.append_value(v),
                    v if v.is_null_or_missing() => builder.append_null(),
                    other => return Err(mismatch("STRING", other)),
                }
            }
            Ok(Arc::new(builder.finish()))
        }
        DataType::Boolean => {
            let mut builder = BooleanBuilder::with_capacity(rows.len());
            for row in rows {
                match cell(row, name)? {
                    ExprValue::Scalar(ScalarValue::Boolean(v)) => builder.append_value(*v),
                    v if v.is_null_or_missing() => builder.append_null(),
                    other => return Err(mismatch("BOOLEAN", other)),
                }
            }
            Ok(Arc::new(builder.finish()))
        }
        // Undeclared type: only representable when every cell is empty
        DataType::Null => {
            for row in rows {
                let v = cell(row, name)?;
                if !v.is_null_or_missing() {
                    return Err(mismatch("NULL", v));
                }
            }
            Ok(Arc::new(NullArray::new(rows.len())))
        }
        dt => Err(PplxError::TypeMismatch {
            expected: "Int32|Int64|Float64|Utf8|Boolean".to_string(),
            actual: format!("{dt:?}"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::executor::schema::Column;
    use arrow::array::{Array, Int64Array, StringArray};

    fn schema() -> OutputSchema {
        OutputSchema::new(vec![
            Column {
                name: "id".to_string(),
                alias: None,
                data_type: DataType::Int64,
            },
            Column {
                name: "tags".to_string(),
                alias: None,
                data_type: DataType::Utf8,
            },
        ])
    }

    #[test]
    fn converts_scalar_rows() {
        let rows = vec![
            ExprValue::tuple([("id", ExprValue::long(1)), ("tags", ExprValue::string("a"))])
                .unwrap(),
            ExprValue::tuple([("id", ExprValue::long(4)), ("tags", ExprValue::Missing)]).unwrap(),
        ];
        let batch = rows_to_record_batch(&schema(), &rows).unwrap();
        assert_eq!(batch.num_rows(), 2);

        let ids = batch
            .column(0)
            .as_any()
            .downcast_ref::<Int64Array>()
            .unwrap();
        assert_eq!(ids.value(1), 4);

        let tags = batch
            .column(1)
            .as_any()
            .downcast_ref::<StringArray>()
            .unwrap();
        assert_eq!(tags.value(0), "a");
        assert!(tags.is_null(1));
    }

    #[test]
    fn rejects_nested_values() {
        let rows = vec![ExprValue::tuple([
            ("id", ExprValue::long(1)),
            ("tags", ExprValue::array([ExprValue::string("a")])),
        ])
        .unwrap()];
        let err = rows_to_record_batch(&schema(), &rows).unwrap_err();
        assert!(err.to_string().contains("expected STRING, got ARRAY"));
    }

    #[test]
    fn empty_rows_give_empty_batch() {
        let batch = rows_to_record_batch(&schema(), &[]).unwrap();
        assert_eq!(batch.num_rows(), 0);
        assert_eq!(batch.num_columns(), 2);
    }
}
