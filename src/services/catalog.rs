//! Catalog store: the last known listing plus the loading flag.

use crate::models::object::ObjectRecord;
use parking_lot::Mutex;
use std::sync::Arc;

/// Snapshot of the catalog as last reported by the remote.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CatalogState {
    /// Objects in server order; not sorted locally.
    pub objects: Arc<[ObjectRecord]>,
    /// True only while a listing request is outstanding.
    pub is_loading: bool,
}

/// Owns the catalog snapshot. Only the operation controller writes to it.
///
/// Each successful listing replaces the snapshot wholesale; a failed one
/// leaves the previous snapshot in place.
#[derive(Debug, Default)]
pub struct CatalogStore {
    state: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    snapshot: CatalogState,
    /// Listing requests issued but not yet answered.
    pending: usize,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn begin_refresh(&self) {
        let mut inner = self.state.lock();
        inner.pending += 1;
        inner.snapshot.is_loading = true;
    }

    /// Swap in a new listing. Whichever response lands last wins.
    pub(crate) fn replace(&self, objects: Vec<ObjectRecord>) {
        self.state.lock().snapshot.objects = objects.into();
    }

    /// Mark one listing request as answered, successful or not.
    pub(crate) fn finish_refresh(&self) {
        let mut inner = self.state.lock();
        inner.pending = inner.pending.saturating_sub(1);
        inner.snapshot.is_loading = inner.pending > 0;
    }

    pub fn snapshot(&self) -> CatalogState {
        self.state.lock().snapshot.clone()
    }

    pub fn objects(&self) -> Arc<[ObjectRecord]> {
        self.state.lock().snapshot.objects.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.lock().snapshot.is_loading
    }

    pub fn len(&self) -> usize {
        self.state.lock().snapshot.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, key: &str) -> bool {
        self.state
            .lock()
            .snapshot
            .objects
            .iter()
            .any(|obj| obj.key == key)
    }

    /// Clone of the record for `key`, if present in the current snapshot.
    pub fn find(&self, key: &str) -> Option<ObjectRecord> {
        self.state
            .lock()
            .snapshot
            .objects
            .iter()
            .find(|obj| obj.key == key)
            .cloned()
    }
}
