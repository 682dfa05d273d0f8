//! The ordered in-memory task collection.
//!
//! Every change bumps the collection generation, and every entry carries the
//! generation at which it was last written (its revision). An in-flight
//! mutation remembers the revision it stamped and only reconciles or rolls
//! back if the entry still carries it; otherwise a later operation has
//! superseded it and the entry is left alone.

use std::collections::HashSet;

use tsk_core::entities::Task;

#[derive(Debug, Clone)]
struct Entry {
    task: Task,
    revision: u64,
}

/// An entry taken out of the collection by a delete, kept for rollback.
#[derive(Debug, Clone)]
pub struct Removal {
    index: usize,
    /// Id of the entry that preceded the removed one.
    after: Option<String>,
    entry: Entry,
    snapshot: Vec<Entry>,
    generation: u64,
}

impl Removal {
    pub const fn task(&self) -> &Task {
        &self.entry.task
    }
}

/// How a confirmed create landed in the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settled {
    /// The placeholder was swapped for the server task in place.
    Replaced,
    /// The server id was already present (a fetch got there first) and was
    /// refreshed; the placeholder, if any, was dropped.
    Refreshed,
    /// Neither placeholder nor server id was present; inserted at the front.
    Inserted,
}

#[derive(Debug, Default)]
pub struct TaskCollection {
    entries: Vec<Entry>,
    generation: u64,
}

impl TaskCollection {
    fn bump(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.entries.iter().position(|entry| entry.task.id == id)
    }

    #[must_use]
    pub fn tasks(&self) -> Vec<Task> {
        self.entries.iter().map(|entry| entry.task.clone()).collect()
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Task> {
        self.entries
            .iter()
            .find(|entry| entry.task.id == id)
            .map(|entry| &entry.task)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    /// Replace everything. Duplicate ids keep their first occurrence.
    pub fn replace_all(&mut self, tasks: Vec<Task>) {
        let revision = self.bump();
        let mut seen = HashSet::new();
        self.entries = tasks
            .into_iter()
            .filter(|task| seen.insert(task.id.clone()))
            .map(|task| Entry { task, revision })
            .collect();
    }

    /// Insert at the front, returning the stamped revision.
    pub fn prepend(&mut self, task: Task) -> u64 {
        let revision = self.bump();
        if let Some(index) = self.position(&task.id) {
            self.entries.remove(index);
        }
        self.entries.insert(0, Entry { task, revision });
        revision
    }

    /// Mutate an entry in place, returning its prior value and the revision
    /// stamped on it.
    pub fn apply(&mut self, id: &str, change: impl FnOnce(&mut Task)) -> Option<(Task, u64)> {
        let index = self.position(id)?;
        let revision = self.bump();
        let entry = &mut self.entries[index];
        let before = entry.task.clone();
        change(&mut entry.task);
        entry.revision = revision;
        Some((before, revision))
    }

    /// Mutate an entry only if it still carries `revision`.
    pub fn apply_if_current(
        &mut self,
        id: &str,
        revision: u64,
        change: impl FnOnce(&mut Task),
    ) -> bool {
        let Some(index) = self.position(id) else {
            return false;
        };
        if self.entries[index].revision != revision {
            return false;
        }
        let next = self.bump();
        let entry = &mut self.entries[index];
        change(&mut entry.task);
        entry.revision = next;
        true
    }

    /// Remove an entry only if it still carries `revision`.
    pub fn remove_if_current(&mut self, id: &str, revision: u64) -> bool {
        match self.position(id) {
            Some(index) if self.entries[index].revision == revision => {
                self.entries.remove(index);
                self.bump();
                true
            }
            _ => false,
        }
    }

    /// Remove an entry unconditionally.
    pub fn remove(&mut self, id: &str) -> Option<Removal> {
        let index = self.position(id)?;
        let snapshot = self.entries.clone();
        let after = index
            .checked_sub(1)
            .map(|prev| self.entries[prev].task.id.clone());
        let entry = self.entries.remove(index);
        let generation = self.bump();
        Some(Removal {
            index,
            after,
            entry,
            snapshot,
            generation,
        })
    }

    /// Undo a [`remove`](Self::remove). Restores the full pre-removal
    /// collection if nothing changed since. Otherwise re-inserts the removed
    /// entry behind its old predecessor (or at its old index if that is gone)
    /// unless its id has reappeared. Returns whether the entry is back.
    pub fn restore(&mut self, removal: Removal) -> bool {
        if self.generation == removal.generation {
            self.entries = removal.snapshot;
            self.bump();
            return true;
        }
        if self.contains(&removal.entry.task.id) {
            return false;
        }
        let index = match &removal.after {
            None => 0,
            Some(prev) => self
                .position(prev)
                .map_or(removal.index.min(self.entries.len()), |prev| prev + 1),
        };
        let revision = self.bump();
        self.entries.insert(
            index,
            Entry {
                task: removal.entry.task,
                revision,
            },
        );
        true
    }

    /// Land a confirmed create, keeping exactly one entry for the server id
    /// and none for the placeholder.
    pub fn settle_created(&mut self, temp_id: &str, task: Task) -> Settled {
        let revision = self.bump();
        let placeholder = self.position(temp_id);
        let existing = self.position(&task.id);
        match (placeholder, existing) {
            (Some(index), None) => {
                self.entries[index] = Entry { task, revision };
                Settled::Replaced
            }
            (placeholder, Some(index)) => {
                self.entries[index] = Entry { task, revision };
                if let Some(placeholder) = placeholder {
                    self.entries.remove(placeholder);
                }
                Settled::Refreshed
            }
            (None, None) => {
                self.entries.insert(0, Entry { task, revision });
                Settled::Inserted
            }
        }
    }
}
