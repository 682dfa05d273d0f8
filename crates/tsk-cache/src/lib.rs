//! # tsk-cache
//!
//! Local id → status mapping persisted across sessions.
//!
//! The cache is a fallback source of display status for tasks whose server
//! record does not report one. Reads never fail and writes never surface
//! errors: a missing or corrupt store reads as empty, and persistence
//! failures are logged as warnings.

mod file;
mod memory;

use std::collections::BTreeMap;

use tsk_core::enums::TaskStatus;

pub use file::FileStatusCache;
pub use memory::MemoryStatusCache;

/// Durable id → status mapping.
pub trait StatusCache: Send + Sync {
    /// Every stored entry. Empty when nothing is stored or the store is unreadable.
    fn read_all(&self) -> BTreeMap<String, TaskStatus>;

    /// Upsert one entry and persist.
    fn write_one(&self, id: &str, status: TaskStatus);

    /// Remove one entry if present and persist.
    fn remove_one(&self, id: &str);

    fn get(&self, id: &str) -> Option<TaskStatus> {
        self.read_all().remove(id)
    }
}
