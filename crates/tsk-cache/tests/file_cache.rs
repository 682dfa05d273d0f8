//! `FileStatusCache` persistence across instances.

use std::fs;

use pretty_assertions::assert_eq;
use tsk_cache::{FileStatusCache, StatusCache};
use tsk_core::enums::TaskStatus;

#[test]
fn entries_survive_reopening() {
    let tmp = tempfile::TempDir::new().unwrap();
    let path = tmp.path().join("nested").join("kanban-task-statuses.json");

    let cache = FileStatusCache::new(&path);
    cache.write_one("t1", TaskStatus::ToDo);
    cache.write_one("t2", TaskStatus::Review);
    cache.write_one("t1", TaskStatus::Done);

    let reopened = FileStatusCache::new(&path);
    assert_eq!(reopened.get("t1"), Some(TaskStatus::Done));
    assert_eq!(reopened.get("t2"), Some(TaskStatus::Review));

    reopened.remove_one("t2");
    assert_eq!(cache.read_all().len(), 1);
}

#[test]
fn stored_format_is_a_flat_object() {
    let tmp = tempfile::TempDir::new().unwrap();
    let path = tmp.path().join("statuses.json");
    FileStatusCache::new(&path).write_one("t1", TaskStatus::InProgress);

    let raw: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(raw, serde_json::json!({"t1": "IN_PROGRESS"}));
}

#[test]
fn corrupt_file_reads_empty_and_is_replaced_on_write() {
    let tmp = tempfile::TempDir::new().unwrap();
    let path = tmp.path().join("statuses.json");
    fs::write(&path, "{{{ definitely not json").unwrap();

    let cache = FileStatusCache::new(&path);
    assert!(cache.read_all().is_empty());

    cache.write_one("t9", TaskStatus::Done);
    assert_eq!(cache.get("t9"), Some(TaskStatus::Done));
}

#[test]
fn unwritable_location_is_swallowed() {
    let tmp = tempfile::TempDir::new().unwrap();
    let blocker = tmp.path().join("file");
    fs::write(&blocker, "x").unwrap();

    // Parent "directory" is a regular file, so every write fails.
    let cache = FileStatusCache::new(blocker.join("statuses.json"));
    cache.write_one("t1", TaskStatus::Done);
    cache.remove_one("t1");
    assert!(cache.read_all().is_empty());
}
