//! In-memory snapshot storage.

use std::collections::HashMap;

use parking_lot::RwLock;

use super::{SnapshotMeta, SnapshotRef, SnapshotStore};
use crate::error::BoxError;

/// A [`SnapshotStore`] keyed by [`SnapshotRef::identifier`].
///
/// Intended for tests and examples. Loads hand out clones.
#[derive(Debug)]
pub struct MemoryStore<T> {
    records: RwLock<HashMap<String, (T, SnapshotMeta)>>,
}

impl<T> MemoryStore<T> {
    /// An empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
        }
    }

    /// Number of stored snapshots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// Returns `true` when nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

impl<T> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn key(reference: &SnapshotRef) -> Result<String, BoxError> {
    reference
        .identifier()
        .map_err(|err| BoxError::from(err.to_string()))
}

impl<T: Clone + Send + Sync> SnapshotStore<T> for MemoryStore<T> {
    fn load(&self, reference: &SnapshotRef) -> Result<Option<(T, SnapshotMeta)>, BoxError> {
        let id = key(reference)?;
        Ok(self.records.read().get(&id).cloned())
    }

    fn save(
        &self,
        reference: &SnapshotRef,
        snapshot: T,
        meta: SnapshotMeta,
    ) -> Result<SnapshotMeta, BoxError> {
        let id = key(reference)?;
        self.records.write().insert(id, (snapshot, meta.clone()));
        Ok(meta)
    }
}
