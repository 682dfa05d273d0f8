//! Display status resolution.
//!
//! Status has two sources of truth: the server's `status` field and the local
//! status cache. This is the only place that decides between them.

use std::collections::BTreeMap;

use tsk_core::entities::{Task, TaskRecord};
use tsk_core::enums::TaskStatus;

/// Server status if reported, else the cached status, else the status
/// implied by the completion flag.
#[must_use]
pub fn display_status(
    reported: Option<TaskStatus>,
    cached: Option<TaskStatus>,
    is_completed: bool,
) -> TaskStatus {
    reported
        .or(cached)
        .unwrap_or_else(|| TaskStatus::from_completion(is_completed))
}

/// Convert a fetched record using a snapshot of the cache.
#[must_use]
pub fn resolve_record(record: TaskRecord, cached: &BTreeMap<String, TaskStatus>) -> Task {
    let status = display_status(
        record.status,
        cached.get(&record.id).copied(),
        record.reported_completion(),
    );
    record.into_task(status)
}
