use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

use uuid::Uuid;

use crate::domain::DocumentId;

/// Cancellation requests keyed by document id. A request is only honored at
/// the next stage boundary: a stage in flight always runs to completion or
/// failure first, so no half-written entity set can result.
#[derive(Clone, Default)]
pub struct CancellationRegistry {
    inner: Arc<Mutex<HashSet<Uuid>>>,
}

impl CancellationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn set(&self) -> MutexGuard<'_, HashSet<Uuid>> {
        // Poisoning cannot leave the set in a partial state.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn request(&self, id: DocumentId) {
        self.set().insert(id.as_uuid());
    }

    /// Consumes a pending request for this document, returning whether one
    /// existed.
    pub fn take(&self, id: DocumentId) -> bool {
        self.set().remove(&id.as_uuid())
    }

    pub fn is_requested(&self, id: DocumentId) -> bool {
        self.set().contains(&id.as_uuid())
    }
}
