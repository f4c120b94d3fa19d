// SQL/PPL 실행 모듈 진입점
pub mod executor;
pub mod expression;

pub use executor::{
    Column, ExpansionMetrics, ExpansionStats, ExplainVisitor, MvExpandOperator, NoOpOperator,
    OutputSchema, ParallelSplitExecutor, PhysicalOperator, PhysicalPlanVisitor, PlanNode,
    ProjectOperator, SplitScanOperator, ValuesOperator, execute, rows_to_record_batch,
};
pub use expression::{FieldResolver, ReferenceExpression};
