use crate::workflows::attendance::domain::{AttendanceSnapshot, SchoolId};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Session-scoped store of computed snapshots keyed by school id.
///
/// Entries are never replaced: the first snapshot built for an id is the one
/// every later caller sees.
#[derive(Debug, Default)]
pub struct SnapshotCache {
    entries: Mutex<HashMap<SchoolId, Arc<AttendanceSnapshot>>>,
}

impl SnapshotCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &SchoolId) -> Option<Arc<AttendanceSnapshot>> {
        self.lock().get(id).cloned()
    }

    /// Returns the cached snapshot for `id`, building and storing it first if
    /// absent. The lock is held while building so concurrent callers for the
    /// same id cannot produce two different snapshots.
    pub fn get_or_insert_with<F>(&self, id: &SchoolId, build: F) -> (Arc<AttendanceSnapshot>, bool)
    where
        F: FnOnce() -> AttendanceSnapshot,
    {
        let mut entries = self.lock();
        if let Some(existing) = entries.get(id) {
            return (Arc::clone(existing), true);
        }

        let snapshot = Arc::new(build());
        entries.insert(id.clone(), Arc::clone(&snapshot));
        (snapshot, false)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<SchoolId, Arc<AttendanceSnapshot>>> {
        // Entries are inserted whole, so a poisoned map is still consistent.
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
