//! JSON-file status cache.
//!
//! The file holds one JSON object, `{"<task id>": "<STATUS>"}`. Every write
//! rewrites the whole mapping through a sibling temp file and a rename.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use tsk_core::enums::TaskStatus;

use crate::StatusCache;

#[derive(Debug)]
pub struct FileStatusCache {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process.
    write_lock: Mutex<()>,
}

impl FileStatusCache {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> BTreeMap<String, TaskStatus> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return BTreeMap::new(),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "status cache unreadable");
                return BTreeMap::new();
            }
        };
        parse_entries(&raw).unwrap_or_else(|| {
            tracing::warn!(path = %self.path.display(), "status cache corrupt; ignoring");
            BTreeMap::new()
        })
    }

    fn persist(&self, entries: &BTreeMap<String, TaskStatus>) {
        if let Err(e) = self.write_atomic(entries) {
            tracing::warn!(path = %self.path.display(), error = %e, "status cache write failed");
        }
    }

    fn write_atomic(&self, entries: &BTreeMap<String, TaskStatus>) -> io::Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let body = serde_json::to_string_pretty(entries).map_err(io::Error::other)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, body)?;
        fs::rename(&tmp, &self.path)
    }

    fn modify(&self, apply: impl FnOnce(&mut BTreeMap<String, TaskStatus>) -> bool) {
        let _guard = self.write_lock.lock();
        let mut entries = self.load();
        if apply(&mut entries) {
            self.persist(&entries);
        }
    }
}

/// Parse the stored object, skipping entries whose status is not recognised.
/// Returns `None` when the payload is not a JSON object.
fn parse_entries(raw: &str) -> Option<BTreeMap<String, TaskStatus>> {
    if raw.trim().is_empty() {
        return Some(BTreeMap::new());
    }
    let serde_json::Value::Object(map) = serde_json::from_str(raw).ok()? else {
        return None;
    };
    Some(
        map.into_iter()
            .filter_map(|(id, value)| {
                let status = value.as_str()?.parse::<TaskStatus>().ok()?;
                Some((id, status))
            })
            .collect(),
    )
}

impl StatusCache for FileStatusCache {
    fn read_all(&self) -> BTreeMap<String, TaskStatus> {
        self.load()
    }

    fn write_one(&self, id: &str, status: TaskStatus) {
        self.modify(|entries| entries.insert(id.to_string(), status) != Some(status));
    }

    fn remove_one(&self, id: &str) {
        self.modify(|entries| entries.remove(id).is_some());
    }
}
