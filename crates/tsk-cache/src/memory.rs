use std::collections::BTreeMap;

use parking_lot::Mutex;
use tsk_core::enums::TaskStatus;

use crate::StatusCache;

/// Process-local cache, used when `cache.enabled = false` and in tests.
#[derive(Debug, Default)]
pub struct MemoryStatusCache {
    entries: Mutex<BTreeMap<String, TaskStatus>>,
}

impl MemoryStatusCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populated cache.
    #[must_use]
    pub fn with_entries<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, TaskStatus)>,
        K: Into<String>,
    {
        Self {
            entries: Mutex::new(entries.into_iter().map(|(k, v)| (k.into(), v)).collect()),
        }
    }
}

impl StatusCache for MemoryStatusCache {
    fn read_all(&self) -> BTreeMap<String, TaskStatus> {
        self.entries.lock().clone()
    }

    fn write_one(&self, id: &str, status: TaskStatus) {
        self.entries.lock().insert(id.to_string(), status);
    }

    fn remove_one(&self, id: &str) {
        self.entries.lock().remove(id);
    }

    fn get(&self, id: &str) -> Option<TaskStatus> {
        self.entries.lock().get(id).copied()
    }
}
