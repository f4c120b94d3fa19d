//! SQL/PPL Query Executor Module

use crate::error::PplxResult;
use crate::value::Row;

pub mod batch;
pub mod metrics;
pub mod operators;
pub mod parallel_split;
pub mod schema;

pub use batch::rows_to_record_batch;
pub use metrics::{ExpansionMetrics, ExpansionStats};
pub use operators::{
    ExplainVisitor, MvExpandOperator, NoOpOperator, PhysicalOperator, PhysicalPlanVisitor,
    PlanNode, ProjectOperator, SplitScanOperator, ValuesOperator,
};
pub use parallel_split::ParallelSplitExecutor;
pub use schema::{Column, OutputSchema};

/// Drive `plan` to completion: open, drain, close.
///
/// `close()` runs even when opening or draining fails.
pub fn execute(plan: &mut dyn PhysicalOperator) -> PplxResult<Vec<Row>> {
    let result = drain(plan);
    plan.close();
    result
}

fn drain(plan: &mut dyn PhysicalOperator) -> PplxResult<Vec<Row>> {
    plan.open()?;
    let mut rows = Vec::new();
    while plan.has_next()? {
        rows.push(plan.next()?);
    }
    Ok(rows)
}
