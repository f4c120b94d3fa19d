//! Project Operator — terminal field selection

use crate::error::{PplxError, PplxResult};
use crate::sql::executor::operators::{Children, ChildrenMut, PhysicalOperator, PlanNode};
use crate::sql::executor::schema::{Column, OutputSchema};
use crate::sql::expression::{FieldResolver, ReferenceExpression};
use crate::value::{ExprTuple, ExprValue, Row};
use ahash::AHashSet;
use arrow::datatypes::DataType;

/// Projection 연산자 (최종 출력 컬럼 선택)
///
/// Absent fields are emitted as `Missing`, so every output row has exactly
/// the projected columns.
pub struct ProjectOperator {
    input: Box<dyn PhysicalOperator>,
    projections: Vec<ReferenceExpression>,
}

impl ProjectOperator {
    /// Fails with `InvalidArgument` on an empty list or duplicate names.
    pub fn new(
        input: Box<dyn PhysicalOperator>,
        projections: Vec<ReferenceExpression>,
    ) -> PplxResult<Self> {
        if projections.is_empty() {
            return Err(PplxError::InvalidArgument(
                "ProjectOperator needs at least one field".to_string(),
            ));
        }
        let mut seen = AHashSet::with_capacity(projections.len());
        for expr in &projections {
            if expr.name().is_empty() || !seen.insert(expr.name()) {
                return Err(PplxError::InvalidArgument(format!(
                    "invalid or duplicate projected field '{}'",
                    expr.name()
                )));
            }
        }
        Ok(Self { input, projections })
    }

    pub fn output_names(&self) -> impl Iterator<Item = &str> {
        self.projections.iter().map(|p| p.name())
    }

    fn project(&self, row: &Row) -> PplxResult<Row> {
        let fields = self
            .projections
            .iter()
            .map(|p| (p.name().to_string(), p.resolve(row)));
        Ok(ExprValue::Tuple(ExprTuple::try_from_fields(fields)?))
    }
}

impl PhysicalOperator for ProjectOperator {
    fn name(&self) -> &'static str {
        "ProjectOperator"
    }

    fn has_next(&mut self) -> PplxResult<bool> {
        self.input.has_next()
    }

    fn next(&mut self) -> PplxResult<Row> {
        let row = self.input.next()?;
        self.project(&row)
    }

    fn children(&self) -> Children<'_> {
        let mut children = Children::new();
        children.push(self.input.as_ref());
        children
    }

    fn children_mut(&mut self) -> ChildrenMut<'_> {
        let mut children = ChildrenMut::new();
        children.push(self.input.as_mut());
        children
    }

    fn node(&self) -> PlanNode<'_> {
        PlanNode::Project(self)
    }

    /// Declared types come from the binding layer; unknown types map to `Null`.
    fn schema(&self) -> PplxResult<OutputSchema> {
        let columns = self
            .projections
            .iter()
            .map(|p| Column {
                name: p.name().to_string(),
                alias: None,
                data_type: p.declared_type().cloned().unwrap_or(DataType::Null),
            })
            .collect();
        Ok(OutputSchema::new(columns))
    }
}
