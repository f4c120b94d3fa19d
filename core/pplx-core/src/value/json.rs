//! JSON bridge for search documents and result rows.

use super::{ExprTuple, ExprValue, ScalarValue};
use serde_json::{Map, Number, Value as JsonValue};

impl ExprValue {
    /// Convert a JSON document into the row model.
    ///
    /// Integers that fit in `i64` become `Int64`, other numbers `Float64`.
    /// Objects become tuples; JSON guarantees unique keys after parsing.
    pub fn from_json(value: JsonValue) -> ExprValue {
        match value {
            JsonValue::Null => ExprValue::Null,
            JsonValue::Bool(b) => ExprValue::boolean(b),
            JsonValue::Number(n) => match n.as_i64() {
                Some(i) => ExprValue::long(i),
                None => ExprValue::double(n.as_f64().unwrap_or(f64::NAN)),
            },
            JsonValue::String(s) => ExprValue::string(s),
            JsonValue::Array(values) => {
                ExprValue::Array(values.into_iter().map(ExprValue::from_json).collect())
            }
            JsonValue::Object(map) => ExprValue::Tuple(
                map.into_iter()
                    .map(|(k, v)| (k, ExprValue::from_json(v)))
                    .collect::<ExprTuple>(),
            ),
        }
    }

    /// Convert back to JSON. `Missing` fields are omitted from objects;
    /// anywhere else they render as `null`.
    pub fn to_json(&self) -> JsonValue {
        match self {
            ExprValue::Null | ExprValue::Missing => JsonValue::Null,
            ExprValue::Scalar(s) => match s {
                ScalarValue::Int32(v) => JsonValue::from(*v),
                ScalarValue::Int64(v) => JsonValue::from(*v),
                ScalarValue::Float64(v) => Number::from_f64(*v)
                    .map(JsonValue::Number)
                    .unwrap_or(JsonValue::Null),
                ScalarValue::Utf8(v) => JsonValue::String(v.clone()),
                ScalarValue::Boolean(v) => JsonValue::Bool(*v),
            },
            ExprValue::Array(values) => {
                JsonValue::Array(values.iter().map(ExprValue::to_json).collect())
            }
            ExprValue::Tuple(t) => {
                let mut map = Map::with_capacity(t.len());
                for (k, v) in t.iter().filter(|(_, v)| !v.is_missing()) {
                    map.insert(k.to_string(), v.to_json());
                }
                JsonValue::Object(map)
            }
        }
    }
}
