//! SplitScan Operator — rows of every bound split, in binding order

use crate::error::{PplxError, PplxResult};
use crate::logging::EXEC_TARGET;
use crate::sql::executor::operators::{Children, ChildrenMut, PhysicalOperator, PlanNode};
use crate::storage::{RowSource, RowStream, Split};
use crate::value::Row;
use std::sync::Arc;

/// 스플릿 스캔 연산자 — `add_split`으로 바인딩된 스플릿을 순서대로 스캔
pub struct SplitScanOperator {
    source: Arc<dyn RowSource>,
    /// Splits bound so far, in arrival order
    splits: Vec<Split>,
    /// Index of the next split to open
    next_split: usize,
    current: Option<RowStream>,
    /// Row pulled by `has_next()` but not yet returned
    lookahead: Option<Row>,
}

impl SplitScanOperator {
    pub fn new(source: Arc<dyn RowSource>) -> Self {
        Self {
            source,
            splits: Vec::new(),
            next_split: 0,
            current: None,
            lookahead: None,
        }
    }

    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    pub fn split_count(&self) -> usize {
        self.splits.len()
    }

    /// Open the stream of the next unscanned split. `false` when none is left.
    fn advance_split(&mut self) -> PplxResult<bool> {
        let Some(split) = self.splits.get(self.next_split) else {
            return Ok(false);
        };
        tracing::trace!(
            target: EXEC_TARGET,
            source = self.source.name(),
            split = split.split_id(),
            "scan split"
        );
        self.current = Some(self.source.scan(split)?);
        self.next_split += 1;
        Ok(true)
    }
}

impl PhysicalOperator for SplitScanOperator {
    fn name(&self) -> &'static str {
        "SplitScanOperator"
    }

    fn has_next(&mut self) -> PplxResult<bool> {
        loop {
            if self.lookahead.is_some() {
                return Ok(true);
            }
            if let Some(stream) = self.current.as_mut() {
                if let Some(row) = stream.next() {
                    self.lookahead = Some(row);
                    continue;
                }
                self.current = None;
            }
            if !self.advance_split()? {
                return Ok(false);
            }
        }
    }

    fn next(&mut self) -> PplxResult<Row> {
        if !self.has_next()? {
            return Err(PplxError::ExhaustedIterator);
        }
        self.lookahead.take().ok_or(PplxError::ExhaustedIterator)
    }

    fn children(&self) -> Children<'_> {
        Children::new()
    }

    fn children_mut(&mut self) -> ChildrenMut<'_> {
        ChildrenMut::new()
    }

    fn node(&self) -> PlanNode<'_> {
        PlanNode::SplitScan(self)
    }

    /// Opens the first bound split so source errors surface before iteration.
    fn open(&mut self) -> PplxResult<()> {
        tracing::trace!(target: EXEC_TARGET, operator = self.name(), "open");
        if self.current.is_none() && self.lookahead.is_none() {
            self.advance_split()?;
        }
        Ok(())
    }

    fn close(&mut self) {
        tracing::trace!(target: EXEC_TARGET, operator = self.name(), "close");
        self.current = None;
        self.lookahead = None;
        self.next_split = self.splits.len();
    }

    fn add_split(&mut self, split: &Split) {
        tracing::trace!(
            target: EXEC_TARGET,
            operator = self.name(),
            split = split.split_id(),
            "add split"
        );
        self.splits.push(split.clone());
    }
}
