//! Output schema of the terminal projection stage.

use arrow::datatypes::{DataType, Field, Schema};
use serde::Serialize;

/// One output column: name, optional alias, declared type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    pub name: String,
    pub alias: Option<String>,
    #[serde(serialize_with = "serialize_data_type")]
    pub data_type: DataType,
}

impl Column {
    /// Alias if set, otherwise the field name.
    pub fn output_name(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }
}

/// Ordered column list describing emitted rows.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct OutputSchema {
    columns: Vec<Column>,
}

impl OutputSchema {
    pub fn new(columns: Vec<Column>) -> Self {
        Self { columns }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Nullable Arrow schema with the same column order.
    pub fn to_arrow(&self) -> Schema {
        Schema::new(
            self.columns
                .iter()
                .map(|c| Field::new(c.output_name(), c.data_type.clone(), true))
                .collect::<Vec<_>>(),
        )
    }
}

fn serialize_data_type<S: serde::Serializer>(dt: &DataType, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&dt.to_string())
}
