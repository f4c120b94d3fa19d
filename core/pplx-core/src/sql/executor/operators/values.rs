//! Values Operator — literal row source

use crate::error::{PplxError, PplxResult};
use crate::sql::executor::operators::{Children, ChildrenMut, PhysicalOperator, PlanNode};
use crate::value::Row;
use std::collections::VecDeque;

/// 고정 행 목록을 순차적으로 반환하는 리프 연산자
#[derive(Debug)]
pub struct ValuesOperator {
    rows: VecDeque<Row>,
}

impl ValuesOperator {
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows: rows.into() }
    }

    /// Rows not yet emitted.
    pub fn remaining(&self) -> usize {
        self.rows.len()
    }
}

impl PhysicalOperator for ValuesOperator {
    fn name(&self) -> &'static str {
        "ValuesOperator"
    }

    fn has_next(&mut self) -> PplxResult<bool> {
        Ok(!self.rows.is_empty())
    }

    fn next(&mut self) -> PplxResult<Row> {
        self.rows.pop_front().ok_or(PplxError::ExhaustedIterator)
    }

    fn children(&self) -> Children<'_> {
        Children::new()
    }

    fn children_mut(&mut self) -> ChildrenMut<'_> {
        ChildrenMut::new()
    }

    fn node(&self) -> PlanNode<'_> {
        PlanNode::Values(self)
    }
}
