//! Physical Operators Module

mod mv_expand;
mod no_op;
mod physical_operator;
mod project;
mod split_scan;
mod values;

pub use mv_expand::MvExpandOperator;
pub use no_op::NoOpOperator;
pub use physical_operator::{
    Children, ChildrenMut, ExplainVisitor, PhysicalOperator, PhysicalPlanVisitor, PlanNode,
};
pub use project::ProjectOperator;
pub use split_scan::SplitScanOperator;
pub use values::ValuesOperator;
