//! Row Value Model — `ExprValue`
//!
//! 행(row)은 `Tuple` variant의 `ExprValue`이며, 연산자 트리를 따라 흐르는 단위입니다.
//!
//! `Null` and `Missing` are distinct: `Missing` means the field is not present
//! in the source document, `Null` means it is present with no value.

mod json;
mod scalar;
mod tuple;

pub use scalar::ScalarValue;
pub use tuple::ExprTuple;

use std::fmt;

/// A row is a tuple-valued `ExprValue`.
pub type Row = ExprValue;

/// Tagged value flowing through the operator tree.
#[derive(Debug, Clone, PartialEq)]
pub enum ExprValue {
    Null,
    Missing,
    Scalar(ScalarValue),
    Array(Vec<ExprValue>),
    Tuple(ExprTuple),
}

impl ExprValue {
    pub fn int(v: i32) -> Self {
        ExprValue::Scalar(ScalarValue::Int32(v))
    }

    pub fn long(v: i64) -> Self {
        ExprValue::Scalar(ScalarValue::Int64(v))
    }

    pub fn double(v: f64) -> Self {
        ExprValue::Scalar(ScalarValue::Float64(v))
    }

    pub fn string(v: impl Into<String>) -> Self {
        ExprValue::Scalar(ScalarValue::Utf8(v.into()))
    }

    pub fn boolean(v: bool) -> Self {
        ExprValue::Scalar(ScalarValue::Boolean(v))
    }

    pub fn array(values: impl IntoIterator<Item = ExprValue>) -> Self {
        ExprValue::Array(values.into_iter().collect())
    }

    /// Build a tuple value, rejecting duplicate or empty field names.
    pub fn tuple<K: Into<String>>(
        fields: impl IntoIterator<Item = (K, ExprValue)>,
    ) -> crate::error::PplxResult<Self> {
        let tuple = ExprTuple::try_from_fields(fields.into_iter().map(|(k, v)| (k.into(), v)))?;
        Ok(ExprValue::Tuple(tuple))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, ExprValue::Null)
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, ExprValue::Missing)
    }

    pub fn is_null_or_missing(&self) -> bool {
        matches!(self, ExprValue::Null | ExprValue::Missing)
    }

    pub fn as_tuple(&self) -> Option<&ExprTuple> {
        match self {
            ExprValue::Tuple(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[ExprValue]> {
        match self {
            ExprValue::Array(values) => Some(values),
            _ => None,
        }
    }

    pub fn as_scalar(&self) -> Option<&ScalarValue> {
        match self {
            ExprValue::Scalar(s) => Some(s),
            _ => None,
        }
    }

    /// Engine-level type name (`NULL`, `MISSING`, `LONG`, `ARRAY`, `STRUCT`, ...).
    pub fn type_name(&self) -> &'static str {
        match self {
            ExprValue::Null => "NULL",
            ExprValue::Missing => "MISSING",
            ExprValue::Scalar(s) => s.type_name(),
            ExprValue::Array(_) => "ARRAY",
            ExprValue::Tuple(_) => "STRUCT",
        }
    }
}

impl From<ScalarValue> for ExprValue {
    fn from(v: ScalarValue) -> Self {
        ExprValue::Scalar(v)
    }
}

impl From<ExprTuple> for ExprValue {
    fn from(t: ExprTuple) -> Self {
        ExprValue::Tuple(t)
    }
}

impl fmt::Display for ExprValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExprValue::Null => f.write_str("null"),
            ExprValue::Missing => f.write_str("missing"),
            ExprValue::Scalar(s) => fmt::Display::fmt(s, f),
            ExprValue::Array(values) => {
                f.write_str("[")?;
                for (i, v) in values.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    fmt::Display::fmt(v, f)?;
                }
                f.write_str("]")
            }
            ExprValue::Tuple(t) => fmt::Display::fmt(t, f),
        }
    }
}
