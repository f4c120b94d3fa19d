//! Expansion metrics: counters for recovered row failures.
//!
//! Touched only when a row is skipped, never on the success path.

use crate::error::PplxError;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
struct Counters {
    reconstruction_failures: AtomicU64,
    last_failure: Mutex<Option<String>>,
}

/// Shared handle; clones report into the same counters.
#[derive(Debug, Clone, Default)]
pub struct ExpansionMetrics {
    inner: Arc<Counters>,
}

/// Point-in-time copy of [`ExpansionMetrics`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpansionStats {
    pub reconstruction_failures: u64,
    pub last_failure: Option<String>,
}

impl ExpansionMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_reconstruction_failure(&self, err: &PplxError) {
        self.inner
            .reconstruction_failures
            .fetch_add(1, Ordering::Relaxed);
        *self.inner.last_failure.lock() = Some(err.to_string());
    }

    pub fn reconstruction_failures(&self) -> u64 {
        self.inner.reconstruction_failures.load(Ordering::Relaxed)
    }

    pub fn snapshot(&self) -> ExpansionStats {
        ExpansionStats {
            reconstruction_failures: self.reconstruction_failures(),
            last_failure: self.inner.last_failure.lock().clone(),
        }
    }

    pub fn reset(&self) {
        self.inner
            .reconstruction_failures
            .store(0, Ordering::Relaxed);
        *self.inner.last_failure.lock() = None;
    }
}
