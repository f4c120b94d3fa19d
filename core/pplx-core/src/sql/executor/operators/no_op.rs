//! NoOp Operator — statically empty result

use crate::error::{PplxError, PplxResult};
use crate::sql::executor::operators::{Children, ChildrenMut, PhysicalOperator, PlanNode};
use crate::value::Row;

/// 빈 결과 연산자 — 행을 생성하지 않음
#[derive(Debug, Default)]
pub struct NoOpOperator;

impl NoOpOperator {
    pub fn new() -> Self {
        Self
    }
}

impl PhysicalOperator for NoOpOperator {
    fn name(&self) -> &'static str {
        "NoOpOperator"
    }

    fn has_next(&mut self) -> PplxResult<bool> {
        Ok(false)
    }

    fn next(&mut self) -> PplxResult<Row> {
        Err(PplxError::ExhaustedIterator)
    }

    fn children(&self) -> Children<'_> {
        Children::new()
    }

    fn children_mut(&mut self) -> ChildrenMut<'_> {
        ChildrenMut::new()
    }

    fn node(&self) -> PlanNode<'_> {
        PlanNode::NoOp(self)
    }
}
