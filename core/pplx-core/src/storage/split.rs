//! Split: immutable partition handle handed to scan operators.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// A slice of the underlying data source.
///
/// Splits are shared value handles: cloning is cheap and nothing in the
/// operator tree may mutate one. Only scan operators look inside.
#[derive(Clone)]
pub struct Split {
    id: Arc<str>,
    payload: Option<Arc<dyn Any + Send + Sync>>,
}

impl Split {
    pub fn new(id: impl Into<Arc<str>>) -> Self {
        Self {
            id: id.into(),
            payload: None,
        }
    }

    /// Attach a source-specific payload (index shard, file range, ...).
    pub fn with_payload<T: Any + Send + Sync>(mut self, payload: T) -> Self {
        self.payload = Some(Arc::new(payload));
        self
    }

    pub fn split_id(&self) -> &str {
        &self.id
    }

    pub fn payload<T: Any>(&self) -> Option<&T> {
        self.payload.as_deref().and_then(|p| p.downcast_ref::<T>())
    }
}

impl fmt::Debug for Split {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Split")
            .field("id", &self.id)
            .field("has_payload", &self.payload.is_some())
            .finish()
    }
}

impl PartialEq for Split {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}
