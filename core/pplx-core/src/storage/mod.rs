//! Storage module: the scan-side interface seen by physical operators.
//!
//! Leaf operators depend only on the [`RowSource`] trait; the concrete
//! backends (search index, files, ...) live outside this crate.

mod split;

pub use split::Split;

use crate::error::{PplxError, PplxResult};
use crate::value::Row;
use ahash::AHashMap;

/// Boxed row stream produced for one split.
pub type RowStream = Box<dyn Iterator<Item = Row> + Send>;

/// Row producer behind scan operators.
///
/// # Contract
///
/// - `scan`: Returns the rows of one split, lazily. Unknown splits are an error.
/// - The same split may be scanned more than once; results must be identical.
pub trait RowSource: Send + Sync {
    /// Human-readable name used by explain output.
    fn name(&self) -> &str;

    /// Open a row stream for `split`.
    fn scan(&self, split: &Split) -> PplxResult<RowStream>;
}

/// In-memory row source keyed by split id.
#[derive(Debug, Default)]
pub struct InMemoryRowSource {
    name: String,
    splits: AHashMap<String, Vec<Row>>,
}

impl InMemoryRowSource {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            splits: AHashMap::new(),
        }
    }

    /// Register the rows of one split.
    pub fn with_split(mut self, split_id: impl Into<String>, rows: Vec<Row>) -> Self {
        self.splits.insert(split_id.into(), rows);
        self
    }

    /// Register rows given as JSON documents.
    pub fn with_json_split(
        self,
        split_id: impl Into<String>,
        documents: Vec<serde_json::Value>,
    ) -> Self {
        let rows = documents.into_iter().map(Row::from_json).collect();
        self.with_split(split_id, rows)
    }
}

impl RowSource for InMemoryRowSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn scan(&self, split: &Split) -> PplxResult<RowStream> {
        let rows = self
            .splits
            .get(split.split_id())
            .ok_or_else(|| PplxError::Execution {
                message: format!("unknown split '{}'", split.split_id()),
                context: format!("source '{}'", self.name),
            })?;
        Ok(Box::new(rows.clone().into_iter()))
    }
}
