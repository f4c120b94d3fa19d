//! Physical Operator Trait — Volcano Execution Model

use crate::error::{PplxError, PplxResult};
use crate::logging::EXEC_TARGET;
use crate::sql::executor::operators::{
    MvExpandOperator, NoOpOperator, ProjectOperator, SplitScanOperator, ValuesOperator,
};
use crate::sql::executor::metrics::ExpansionMetrics;
use crate::sql::executor::schema::OutputSchema;
use crate::storage::Split;
use crate::value::Row;
use smallvec::SmallVec;

/// Child list returned by [`PhysicalOperator::children`]; inline up to two.
pub type Children<'a> = SmallVec<[&'a dyn PhysicalOperator; 2]>;

/// Mutable child list used for lifecycle propagation.
pub type ChildrenMut<'a> = SmallVec<[&'a mut dyn PhysicalOperator; 2]>;

/// 물리 연산자 트레이트 — Volcano 실행 모델 (Pull 기반, 행 단위)
///
/// # Lifecycle
///
/// 1. `add_split()`: zero or more times, broadcast to every descendant
/// 2. `open()`: once, before the first pull
/// 3. `has_next()` / `next()`: until `has_next()` returns `false`
/// 4. `close()`: once; also safe without `open()` and safe to repeat
///
/// The default lifecycle methods propagate to [`children_mut`] in order.
/// Operators that own a resource override them and still propagate.
///
/// [`children_mut`]: PhysicalOperator::children_mut
pub trait PhysicalOperator: Send {
    /// 연산자 이름 (explain, 오류 메시지용)
    fn name(&self) -> &'static str;

    /// Whether a following `next()` would yield a row.
    ///
    /// Idempotent: repeated calls without `next()` return the same answer
    /// and do not advance the operator.
    fn has_next(&mut self) -> PplxResult<bool>;

    /// 다음 행 반환. Fails with `ExhaustedIterator` when `has_next()` is false.
    fn next(&mut self) -> PplxResult<Row>;

    /// Input operators, in order. Never contains an absent entry.
    fn children(&self) -> Children<'_>;

    fn children_mut(&mut self) -> ChildrenMut<'_>;

    /// Typed view of this node for visitor dispatch.
    fn node(&self) -> PlanNode<'_>;

    fn open(&mut self) -> PplxResult<()> {
        tracing::trace!(target: EXEC_TARGET, operator = self.name(), "open");
        for child in self.children_mut() {
            child.open()?;
        }
        Ok(())
    }

    fn close(&mut self) {
        tracing::trace!(target: EXEC_TARGET, operator = self.name(), "close");
        for child in self.children_mut() {
            child.close();
        }
    }

    fn add_split(&mut self, split: &Split) {
        for child in self.children_mut() {
            child.add_split(split);
        }
    }

    /// Broadcast a metrics handle to every descendant that records failures.
    fn attach_metrics(&mut self, metrics: &ExpansionMetrics) {
        for child in self.children_mut() {
            child.attach_metrics(metrics);
        }
    }

    /// 출력 스키마. Only the terminal projecting operator has one.
    fn schema(&self) -> PplxResult<OutputSchema> {
        Err(PplxError::not_applicable(self.name()))
    }
}

/// Closed set of operator kinds known to the visitors.
///
/// Operators outside this set report themselves as `Other` and reach
/// [`PhysicalPlanVisitor::visit_node`].
pub enum PlanNode<'a> {
    MvExpand(&'a MvExpandOperator),
    NoOp(&'a NoOpOperator),
    Project(&'a ProjectOperator),
    Values(&'a ValuesOperator),
    SplitScan(&'a SplitScanOperator),
    Other(&'a dyn PhysicalOperator),
}

/// Visitor over physical plans. Every specific case falls back to
/// `visit_node` unless overridden.
pub trait PhysicalPlanVisitor<C> {
    type Output;

    fn visit_node(&mut self, node: &dyn PhysicalOperator, context: &mut C) -> Self::Output;

    fn visit_mv_expand(&mut self, node: &MvExpandOperator, context: &mut C) -> Self::Output {
        self.visit_node(node, context)
    }

    fn visit_no_op(&mut self, node: &NoOpOperator, context: &mut C) -> Self::Output {
        self.visit_node(node, context)
    }

    fn visit_project(&mut self, node: &ProjectOperator, context: &mut C) -> Self::Output {
        self.visit_node(node, context)
    }

    fn visit_values(&mut self, node: &ValuesOperator, context: &mut C) -> Self::Output {
        self.visit_node(node, context)
    }

    fn visit_split_scan(&mut self, node: &SplitScanOperator, context: &mut C) -> Self::Output {
        self.visit_node(node, context)
    }
}

impl<'a> dyn PhysicalOperator + 'a {
    /// Double dispatch into `visitor` based on the concrete operator kind.
    pub fn accept<C, V>(&self, visitor: &mut V, context: &mut C) -> V::Output
    where
        V: PhysicalPlanVisitor<C> + ?Sized,
    {
        match self.node() {
            PlanNode::MvExpand(node) => visitor.visit_mv_expand(node, context),
            PlanNode::NoOp(node) => visitor.visit_no_op(node, context),
            PlanNode::Project(node) => visitor.visit_project(node, context),
            PlanNode::Values(node) => visitor.visit_values(node, context),
            PlanNode::SplitScan(node) => visitor.visit_split_scan(node, context),
            PlanNode::Other(node) => visitor.visit_node(node, context),
        }
    }
}

/// Renders an indented operator tree, one operator per line.
#[derive(Debug, Default)]
pub struct ExplainVisitor;

impl ExplainVisitor {
    pub fn explain(plan: &dyn PhysicalOperator) -> String {
        let mut depth = 0usize;
        plan.accept(&mut ExplainVisitor, &mut depth)
    }

    fn render(&mut self, node: &dyn PhysicalOperator, label: String, depth: &mut usize) -> String {
        let mut out = format!("{}{}\n", "  ".repeat(*depth), label);
        *depth += 1;
        for child in node.children() {
            out.push_str(&child.accept(self, depth));
        }
        *depth -= 1;
        out
    }
}

impl PhysicalPlanVisitor<usize> for ExplainVisitor {
    type Output = String;

    fn visit_node(&mut self, node: &dyn PhysicalOperator, depth: &mut usize) -> String {
        self.render(node, node.name().to_string(), depth)
    }

    fn visit_mv_expand(&mut self, node: &MvExpandOperator, depth: &mut usize) -> String {
        self.render(node, format!("MvExpand(field={})", node.field_name()), depth)
    }

    fn visit_project(&mut self, node: &ProjectOperator, depth: &mut usize) -> String {
        let fields: Vec<&str> = node.output_names().collect();
        self.render(node, format!("Project(fields=[{}])", fields.join(", ")), depth)
    }

    fn visit_values(&mut self, node: &ValuesOperator, depth: &mut usize) -> String {
        self.render(node, format!("Values(rows={})", node.remaining()), depth)
    }

    fn visit_split_scan(&mut self, node: &SplitScanOperator, depth: &mut usize) -> String {
        self.render(
            node,
            format!(
                "SplitScan(source={}, splits={})",
                node.source_name(),
                node.split_count()
            ),
            depth,
        )
    }
}
