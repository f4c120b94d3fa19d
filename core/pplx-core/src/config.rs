//! Execution configuration
//!
//! Builder defaults, JSON loading and `PPLX_*` environment overrides.

use crate::error::{PplxError, PplxResult};
use serde::{Deserialize, Serialize};
use std::env;

/// 실행 설정
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutionConfig {
    /// Worker threads for multi-split execution (0 = rayon global pool)
    pub parallelism: usize,
    /// Minimum number of splits before fanning out in parallel
    pub parallel_threshold: usize,
    /// Attach `ExpansionMetrics` to expansion operators
    pub collect_metrics: bool,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            parallelism: num_cpus::get(),
            parallel_threshold: 2,
            collect_metrics: false,
        }
    }
}

impl ExecutionConfig {
    pub const ENV_PARALLELISM: &'static str = "PPLX_PARALLELISM";
    pub const ENV_PARALLEL_THRESHOLD: &'static str = "PPLX_PARALLEL_THRESHOLD";
    pub const ENV_COLLECT_METRICS: &'static str = "PPLX_COLLECT_METRICS";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_parallelism(mut self, parallelism: usize) -> Self {
        self.parallelism = parallelism;
        self
    }

    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    pub fn with_metrics(mut self, enabled: bool) -> Self {
        self.collect_metrics = enabled;
        self
    }

    /// Parse from JSON; absent keys keep their defaults.
    pub fn from_json(json: &str) -> PplxResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Defaults overridden by `PPLX_*` environment variables.
    pub fn load_from_env() -> PplxResult<Self> {
        Self::default().apply_env()
    }

    /// Override fields from `PPLX_*` environment variables that are set.
    pub fn apply_env(mut self) -> PplxResult<Self> {
        if let Some(v) = read_env(Self::ENV_PARALLELISM) {
            self.parallelism = parse_usize(Self::ENV_PARALLELISM, &v)?;
        }
        if let Some(v) = read_env(Self::ENV_PARALLEL_THRESHOLD) {
            self.parallel_threshold = parse_usize(Self::ENV_PARALLEL_THRESHOLD, &v)?;
        }
        if let Some(v) = read_env(Self::ENV_COLLECT_METRICS) {
            self.collect_metrics = v.to_lowercase() == "true" || v == "1";
        }
        Ok(self)
    }
}

fn read_env(name: &str) -> Option<String> {
    env::var(name).ok()
}

fn parse_usize(name: &str, value: &str) -> PplxResult<usize> {
    value
        .trim()
        .parse()
        .map_err(|_| PplxError::Config(format!("{name}: expected a non-negative integer, got '{value}'")))
}
