//! Parallel Split Executor — one operator tree per split
//!
//! 스플릿마다 독립적인 연산자 트리를 만들어 Rayon 스레드 풀에서 실행하고,
//! 결과는 스플릿 순서대로 이어 붙여 결정적인 출력 순서를 유지합니다.

use crate::config::ExecutionConfig;
use crate::error::{PplxError, PplxResult};
use crate::sql::executor::execute;
use crate::sql::executor::metrics::ExpansionMetrics;
use crate::sql::executor::operators::PhysicalOperator;
use crate::storage::Split;
use crate::value::Row;
use rayon::prelude::*;
use std::sync::Arc;

/// 병렬 스플릿 실행기
pub struct ParallelSplitExecutor {
    config: ExecutionConfig,
    /// 사용할 스레드 풀 (None이면 글로벌)
    thread_pool: Option<Arc<rayon::ThreadPool>>,
    metrics: Option<ExpansionMetrics>,
}

impl ParallelSplitExecutor {
    pub fn new(config: ExecutionConfig) -> PplxResult<Self> {
        let thread_pool = if config.parallelism > 0 {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(config.parallelism)
                .thread_name(|i| format!("pplx-split-{i}"))
                .build()
                .map_err(|e| PplxError::Config(format!("thread pool: {e}")))?;
            Some(Arc::new(pool))
        } else {
            None
        };
        let metrics = config.collect_metrics.then(ExpansionMetrics::new);
        Ok(Self {
            config,
            thread_pool,
            metrics,
        })
    }

    /// 커스텀 스레드 풀 설정
    pub fn with_thread_pool(mut self, pool: Arc<rayon::ThreadPool>) -> Self {
        self.thread_pool = Some(pool);
        self
    }

    /// Metrics handle shared by every tree this executor runs, if enabled.
    pub fn metrics(&self) -> Option<ExpansionMetrics> {
        self.metrics.clone()
    }

    pub fn config(&self) -> &ExecutionConfig {
        &self.config
    }

    /// Build a tree per split with `plan_factory`, bind the split, drain it.
    ///
    /// When metrics are enabled the shared handle is attached to every
    /// expansion operator that does not already carry one.
    ///
    /// Outputs are concatenated in split order. The first failing split
    /// (in split order) determines the returned error.
    pub fn execute<F>(&self, splits: &[Split], plan_factory: F) -> PplxResult<Vec<Row>>
    where
        F: Fn(&Split) -> PplxResult<Box<dyn PhysicalOperator>> + Sync,
    {
        let run = |split: &Split| -> PplxResult<Vec<Row>> {
            let mut plan = plan_factory(split)?;
            plan.add_split(split);
            if let Some(metrics) = &self.metrics {
                plan.attach_metrics(metrics);
            }
            execute(plan.as_mut())
        };

        let results: Vec<PplxResult<Vec<Row>>> = if splits.len() < self.config.parallel_threshold {
            splits.iter().map(run).collect()
        } else {
            self.run_parallel(splits, run)
        };

        let mut rows = Vec::new();
        for result in results {
            rows.extend(result?);
        }
        Ok(rows)
    }

    fn run_parallel<T, F>(&self, splits: &[Split], f: F) -> Vec<T>
    where
        T: Send,
        F: Fn(&Split) -> T + Sync,
    {
        match &self.thread_pool {
            Some(pool) => pool.install(|| splits.par_iter().map(&f).collect()),
            None => splits.par_iter().map(&f).collect(),
        }
    }
}
