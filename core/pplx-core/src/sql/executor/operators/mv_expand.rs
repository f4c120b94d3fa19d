//! MvExpand Operator — multi-value field expansion
//!
//! Turns one input row into one output row per element of the target field.
//!
//! | target value          | output                                      |
//! |-----------------------|---------------------------------------------|
//! | `Missing` / `Null`    | row dropped                                 |
//! | empty array           | row dropped                                 |
//! | array `[v1..vn]`      | `n` rows, target replaced by `vi`, in order |
//! | anything else         | the input row, unchanged                    |
//!
//! At most one input row is expanded at a time, so memory is bounded by the
//! cardinality of a single field value.

use crate::error::{PplxError, PplxResult};
use crate::logging::EXEC_TARGET;
use crate::sql::executor::metrics::ExpansionMetrics;
use crate::sql::executor::operators::{Children, ChildrenMut, PhysicalOperator, PlanNode};
use crate::sql::expression::FieldResolver;
use crate::value::{ExprTuple, ExprValue, Row};
use std::collections::VecDeque;

/// mvexpand 연산자 — 다중 값 필드를 행 단위로 전개
pub struct MvExpandOperator {
    input: Box<dyn PhysicalOperator>,
    field: Box<dyn FieldResolver>,
    /// Rows staged from the current input row, emitted front to back
    pending: VecDeque<Row>,
    metrics: Option<ExpansionMetrics>,
    /// Set by `close()`; no further input is pulled
    closed: bool,
}

impl MvExpandOperator {
    /// Fails with `InvalidArgument` if the field reference has an empty name.
    pub fn new(
        input: Box<dyn PhysicalOperator>,
        field: impl FieldResolver + 'static,
    ) -> PplxResult<Self> {
        if field.name().is_empty() {
            return Err(PplxError::InvalidArgument(
                "MvExpandOperator field reference cannot be empty".to_string(),
            ));
        }
        Ok(Self {
            input,
            field: Box::new(field),
            pending: VecDeque::new(),
            metrics: None,
            closed: false,
        })
    }

    /// Build from optionally-bound parts, as handed over by a planner.
    ///
    /// Both the input and the field reference are mandatory.
    pub fn from_parts<F: FieldResolver + 'static>(
        input: Option<Box<dyn PhysicalOperator>>,
        field: Option<F>,
    ) -> PplxResult<Self> {
        let input = input.ok_or_else(|| {
            PplxError::InvalidArgument("MvExpandOperator input cannot be null".to_string())
        })?;
        let field = field.ok_or_else(|| {
            PplxError::InvalidArgument("MvExpandOperator field cannot be null".to_string())
        })?;
        Self::new(input, field)
    }

    /// Report reconstruction failures into `metrics`.
    pub fn with_metrics(mut self, metrics: ExpansionMetrics) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn field_name(&self) -> &str {
        self.field.name()
    }

    /// Apply the expansion policy to one input row, staging its outputs.
    fn stage(&mut self, row: Row) {
        let value = self.field.resolve(&row);
        match value {
            ExprValue::Null | ExprValue::Missing => {}
            ExprValue::Array(elements) => {
                if elements.is_empty() {
                    return;
                }
                let ExprValue::Tuple(tuple) = &row else {
                    self.record_failure(&PplxError::RowReconstruction(format!(
                        "cannot expand '{}' on a non-tuple row of type {}",
                        self.field.name(),
                        row.type_name()
                    )));
                    return;
                };
                match self.rebuild(tuple, elements) {
                    Ok(rows) => self.pending.extend(rows),
                    Err(err) => self.record_failure(&err),
                }
            }
            _ => self.pending.push_back(row),
        }
    }

    /// One copy of `tuple` per element, with only the target entry replaced.
    ///
    /// All-or-nothing: a failure on any element discards the whole row.
    fn rebuild(&self, tuple: &ExprTuple, elements: Vec<ExprValue>) -> PplxResult<Vec<Row>> {
        let name = self.field.name();
        elements
            .into_iter()
            .map(|element| tuple.with_field(name, element).map(ExprValue::Tuple))
            .collect()
    }

    fn record_failure(&self, err: &PplxError) {
        tracing::debug!(
            target: EXEC_TARGET,
            field = self.field.name(),
            error = %err,
            "mvexpand skipped row"
        );
        if let Some(metrics) = &self.metrics {
            metrics.record_reconstruction_failure(err);
        }
    }
}

impl PhysicalOperator for MvExpandOperator {
    fn name(&self) -> &'static str {
        "MvExpandOperator"
    }

    fn has_next(&mut self) -> PplxResult<bool> {
        if self.closed {
            return Ok(false);
        }
        while self.pending.is_empty() {
            if !self.input.has_next()? {
                return Ok(false);
            }
            let row = self.input.next()?;
            self.stage(row);
        }
        Ok(true)
    }

    fn next(&mut self) -> PplxResult<Row> {
        if !self.has_next()? {
            return Err(PplxError::ExhaustedIterator);
        }
        self.pending.pop_front().ok_or(PplxError::ExhaustedIterator)
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
        PlanNode::MvExpand(self)
    }

    fn open(&mut self) -> PplxResult<()> {
        tracing::trace!(target: EXEC_TARGET, operator = self.name(), "open");
        self.closed = false;
        self.input.open()
    }

    fn close(&mut self) {
        tracing::trace!(target: EXEC_TARGET, operator = self.name(), "close");
        self.closed = true;
        self.pending.clear();
        self.input.close();
    }

    /// Keeps an explicitly attached handle; otherwise adopts `metrics`.
    fn attach_metrics(&mut self, metrics: &ExpansionMetrics) {
        if self.metrics.is_none() {
            self.metrics = Some(metrics.clone());
        }
        self.input.attach_metrics(metrics);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::executor::operators::{NoOpOperator, ValuesOperator};
    use crate::sql::expression::ReferenceExpression;

    fn row(fields: Vec<(&str, ExprValue)>) -> Row {
        ExprValue::tuple(fields).unwrap()
    }

    fn strings(values: &[&str]) -> ExprValue {
        ExprValue::array(values.iter().map(|v| ExprValue::string(*v)))
    }

    fn expand(rows: Vec<Row>, field: &str) -> Vec<Row> {
        let mut op = MvExpandOperator::new(
            Box::new(ValuesOperator::new(rows)),
            ReferenceExpression::new(field),
        )
        .unwrap();
        op.open().unwrap();
        let mut out = Vec::new();
        while op.has_next().unwrap() {
            out.push(op.next().unwrap());
        }
        op.close();
        out
    }

    #[test]
    fn test_mixed_input_scenario() {
        let input = vec![
            row(vec![("id", ExprValue::long(1)), ("tags", strings(&["a", "b"]))]),
            row(vec![("id", ExprValue::long(2)), ("tags", strings(&[]))]),
            row(vec![("id", ExprValue::long(3))]),
            row(vec![("id", ExprValue::long(4)), ("tags", ExprValue::string("x"))]),
        ];

        let out = expand(input, "tags");
        assert_eq!(
            out,
            vec![
                row(vec![("id", ExprValue::long(1)), ("tags", ExprValue::string("a"))]),
                row(vec![("id", ExprValue::long(1)), ("tags", ExprValue::string("b"))]),
                row(vec![("id", ExprValue::long(4)), ("tags", ExprValue::string("x"))]),
            ]
        );
    }

    #[test]
    fn test_null_sibling_preserved() {
        let input = vec![row(vec![
            ("id", ExprValue::long(5)),
            ("tags", strings(&["a"])),
            ("note", ExprValue::Null),
        ])];

        let out = expand(input, "tags");
        assert_eq!(out.len(), 1);
        let t = out[0].as_tuple().unwrap();
        assert_eq!(t.len(), 3);
        assert_eq!(t.get("tags"), &ExprValue::string("a"));
        assert_eq!(t.get("note"), &ExprValue::Null);
    }

    #[test]
    fn test_missing_sibling_preserved() {
        let input = vec![row(vec![
            ("tags", strings(&["a", "b"])),
            ("ghost", ExprValue::Missing),
        ])];

        let out = expand(input, "tags");
        assert_eq!(out.len(), 2);
        for r in &out {
            let t = r.as_tuple().unwrap();
            assert_eq!(t.len(), 2);
            assert!(t.contains("ghost"));
            assert_eq!(t.get("ghost"), &ExprValue::Missing);
        }
    }

    #[test]
    fn test_null_target_dropped() {
        let input = vec![row(vec![("id", ExprValue::long(1)), ("tags", ExprValue::Null)])];
        assert!(expand(input, "tags").is_empty());
    }

    #[test]
    fn test_explicit_missing_target_dropped() {
        let input = vec![row(vec![("id", ExprValue::long(1)), ("tags", ExprValue::Missing)])];
        assert!(expand(input, "tags").is_empty());
    }

    #[test]
    fn test_single_element_is_unwrapped() {
        let input = vec![row(vec![("tags", strings(&["only"]))])];
        let out = expand(input, "tags");
        assert_eq!(out, vec![row(vec![("tags", ExprValue::string("only"))])]);
    }

    #[test]
    fn test_nested_arrays_expand_one_level() {
        let inner = strings(&["a", "b"]);
        let input = vec![row(vec![(
            "tags",
            ExprValue::array([inner.clone(), ExprValue::string("c")]),
        )])];
        let out = expand(input, "tags");
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].as_tuple().unwrap().get("tags"), &inner);
        assert_eq!(
            out[1].as_tuple().unwrap().get("tags"),
            &ExprValue::string("c")
        );
    }

    #[test]
    fn test_null_element_emitted_as_is() {
        let input = vec![row(vec![(
            "tags",
            ExprValue::array([ExprValue::Null, ExprValue::string("a")]),
        )])];
        let out = expand(input, "tags");
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].as_tuple().unwrap().get("tags"), &ExprValue::Null);
    }

    #[test]
    fn test_tuple_target_passes_through() {
        let nested = row(vec![("k", ExprValue::long(1))]);
        let input = vec![row(vec![("tags", nested.clone())])];
        let out = expand(input.clone(), "tags");
        assert_eq!(out, input);
    }

    #[test]
    fn test_has_next_is_idempotent() {
        let input = vec![row(vec![("tags", strings(&["a", "b"]))])];
        let mut op = MvExpandOperator::new(
            Box::new(ValuesOperator::new(input)),
            ReferenceExpression::new("tags"),
        )
        .unwrap();
        op.open().unwrap();

        assert!(op.has_next().unwrap());
        assert!(op.has_next().unwrap());
        assert_eq!(
            op.next().unwrap().as_tuple().unwrap().get("tags"),
            &ExprValue::string("a")
        );
        assert!(op.has_next().unwrap());
        assert_eq!(
            op.next().unwrap().as_tuple().unwrap().get("tags"),
            &ExprValue::string("b")
        );
        assert!(!op.has_next().unwrap());
        assert!(!op.has_next().unwrap());
    }

    #[test]
    fn test_next_past_end_fails() {
        let mut op = MvExpandOperator::new(
            Box::new(NoOpOperator::new()),
            ReferenceExpression::new("tags"),
        )
        .unwrap();
        assert!(matches!(op.next(), Err(PplxError::ExhaustedIterator)));
    }

    #[test]
    fn test_malformed_row_skipped_and_counted() {
        let malformed: ExprTuple = vec![
            ("id".to_string(), ExprValue::long(1)),
            ("id".to_string(), ExprValue::long(1)),
            ("tags".to_string(), strings(&["a", "b"])),
        ]
        .into_iter()
        .collect();
        let input = vec![
            ExprValue::Tuple(malformed),
            row(vec![("id", ExprValue::long(2)), ("tags", strings(&["c"]))]),
        ];

        let metrics = ExpansionMetrics::new();
        let mut op = MvExpandOperator::new(
            Box::new(ValuesOperator::new(input)),
            ReferenceExpression::new("tags"),
        )
        .unwrap()
        .with_metrics(metrics.clone());

        op.open().unwrap();
        let mut out = Vec::new();
        while op.has_next().unwrap() {
            out.push(op.next().unwrap());
        }
        op.close();

        assert_eq!(
            out,
            vec![row(vec![("id", ExprValue::long(2)), ("tags", ExprValue::string("c"))])]
        );
        let stats = metrics.snapshot();
        assert_eq!(stats.reconstruction_failures, 1);
        assert!(stats.last_failure.unwrap().contains("duplicate field 'id'"));
    }

    #[test]
    fn test_construction_requires_parts() {
        let err = MvExpandOperator::from_parts::<ReferenceExpression>(
            None,
            Some(ReferenceExpression::new("tags")),
        )
        .err()
        .unwrap();
        assert!(matches!(err, PplxError::InvalidArgument(_)));
        assert!(err.to_string().contains("input cannot be null"));

        let err = MvExpandOperator::from_parts::<ReferenceExpression>(
            Some(Box::new(NoOpOperator::new())),
            None,
        )
        .err()
        .unwrap();
        assert!(err.to_string().contains("field cannot be null"));

        let err = MvExpandOperator::new(Box::new(NoOpOperator::new()), ReferenceExpression::new(""))
            .err()
            .unwrap();
        assert!(matches!(err, PplxError::InvalidArgument(_)));
    }

    #[test]
    fn test_close_mid_iteration_discards_pending() {
        let input = vec![row(vec![("tags", strings(&["a", "b", "c"]))])];
        let mut op = MvExpandOperator::new(
            Box::new(ValuesOperator::new(input)),
            ReferenceExpression::new("tags"),
        )
        .unwrap();
        op.open().unwrap();
        assert!(op.has_next().unwrap());
        op.next().unwrap();
        op.close();
        assert!(op.pending.is_empty());
    }

    #[test]
    fn test_no_rows_after_close() {
        let input = vec![
            row(vec![("tags", strings(&["a"]))]),
            row(vec![("tags", strings(&["b"]))]),
        ];
        let mut op = MvExpandOperator::new(
            Box::new(ValuesOperator::new(input)),
            ReferenceExpression::new("tags"),
        )
        .unwrap();
        op.open().unwrap();
        op.next().unwrap();
        op.close();

        assert!(!op.has_next().unwrap());
        assert!(op.next().unwrap_err().is_exhausted());
    }

    /// Hands back a list for any row, tuple or not.
    #[derive(Debug)]
    struct ConstantList;

    impl FieldResolver for ConstantList {
        fn name(&self) -> &str {
            "tags"
        }

        fn resolve(&self, _row: &Row) -> ExprValue {
            strings(&["a", "b"])
        }
    }

    #[test]
    fn test_non_tuple_row_with_list_is_counted() {
        let metrics = ExpansionMetrics::new();
        let mut op = MvExpandOperator::new(
            Box::new(ValuesOperator::new(vec![ExprValue::long(7)])),
            ConstantList,
        )
        .unwrap()
        .with_metrics(metrics.clone());

        op.open().unwrap();
        assert!(!op.has_next().unwrap());
        op.close();

        let stats = metrics.snapshot();
        assert_eq!(stats.reconstruction_failures, 1);
        assert!(stats.last_failure.unwrap().contains("non-tuple row of type LONG"));
    }

    #[test]
    fn test_attach_metrics_keeps_explicit_handle() {
        let explicit = ExpansionMetrics::new();
        let broadcast = ExpansionMetrics::new();
        let inner = MvExpandOperator::new(
            Box::new(ValuesOperator::new(vec![ExprValue::long(1)])),
            ConstantList,
        )
        .unwrap();
        let mut outer = MvExpandOperator::new(Box::new(inner), ReferenceExpression::new("tags"))
            .unwrap()
            .with_metrics(explicit.clone());

        outer.attach_metrics(&broadcast);
        outer.open().unwrap();
        while outer.has_next().unwrap() {
            outer.next().unwrap();
        }
        outer.close();

        assert_eq!(explicit.reconstruction_failures(), 0);
        assert_eq!(broadcast.reconstruction_failures(), 1);
    }
}
