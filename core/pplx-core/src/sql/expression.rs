//! Field references: resolved bindings handed down by the logical layer.

use crate::value::{ExprValue, Row};
use arrow::datatypes::DataType;
use std::fmt;

/// Resolves one value out of a row.
///
/// The binding layer guarantees a compatible field exists, but physical
/// execution must still cope with absence: resolvers return `Missing`
/// instead of failing.
pub trait FieldResolver: Send + Sync + fmt::Debug {
    /// Name of the referenced field, as it appears in tuples.
    fn name(&self) -> &str;

    /// Value of the field in `row`, `Missing` if absent.
    fn resolve(&self, row: &Row) -> ExprValue;
}

/// Reference to a top-level tuple field by exact, case-sensitive name.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceExpression {
    name: String,
    /// Declared type from the binding layer; `None` when unknown.
    declared_type: Option<DataType>,
}

impl ReferenceExpression {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declared_type: None,
        }
    }

    pub fn with_type(mut self, data_type: DataType) -> Self {
        self.declared_type = Some(data_type);
        self
    }

    pub fn declared_type(&self) -> Option<&DataType> {
        self.declared_type.as_ref()
    }
}

impl FieldResolver for ReferenceExpression {
    fn name(&self) -> &str {
        &self.name
    }

    fn resolve(&self, row: &Row) -> ExprValue {
        match row {
            ExprValue::Tuple(t) => t.get(&self.name).clone(),
            _ => ExprValue::Missing,
        }
    }
}

impl fmt::Display for ReferenceExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
