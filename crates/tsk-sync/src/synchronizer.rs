//! Optimistic task state synchronizer.
//!
//! Holds the in-memory task collection for one scope and applies every
//! mutation locally before the remote call, then reconciles with the server
//! response or rolls back. The state lock is never held across an await, so
//! operations on one synchronizer may interleave freely.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use chrono::Utc;
use parking_lot::Mutex;
use tsk_cache::StatusCache;
use tsk_client::{StoreError, TaskStore};
use tsk_core::entities::{Task, TaskCreate, TaskRecord, TaskUpdate};
use tsk_core::enums::TaskStatus;
use tsk_core::ids;
use tsk_core::responses::TaskSummary;
use tsk_core::scope::Scope;

use crate::board;
use crate::collection::TaskCollection;
use crate::error::SyncError;
use crate::resolve::resolve_record;
use crate::summary::summarize;

#[derive(Debug, Default)]
struct SyncState {
    collection: TaskCollection,
    fetches_in_flight: usize,
    last_error: Option<String>,
    scope: Scope,
    /// Placeholders deleted while their create was still in flight.
    cancelled: HashSet<String>,
}

impl SyncState {
    fn record_failure(&mut self, error: &SyncError) {
        if !error.is_precondition() {
            self.last_error = Some(error.to_string());
        }
    }
}

pub struct TaskSynchronizer {
    store: Arc<dyn TaskStore>,
    cache: Arc<dyn StatusCache>,
    state: Mutex<SyncState>,
}

fn ensure_confirmed(id: &str) -> Result<(), SyncError> {
    if ids::is_temporary(id) {
        return Err(SyncError::NotConfirmed { id: id.to_string() });
    }
    Ok(())
}

fn not_found(id: &str) -> SyncError {
    SyncError::NotFound { id: id.to_string() }
}

impl TaskSynchronizer {
    #[must_use]
    pub fn new(store: Arc<dyn TaskStore>, cache: Arc<dyn StatusCache>, scope: Scope) -> Self {
        Self {
            store,
            cache,
            state: Mutex::new(SyncState {
                scope,
                ..SyncState::default()
            }),
        }
    }

    // ── Read-only state ──────────────────────────────────────────────

    /// Snapshot of the collection in display order.
    #[must_use]
    pub fn tasks(&self) -> Vec<Task> {
        self.state.lock().collection.tasks()
    }

    #[must_use]
    pub fn task(&self, id: &str) -> Option<Task> {
        self.state.lock().collection.get(id).cloned()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.state.lock().fetches_in_flight > 0
    }

    /// Message of the most recent transport or server failure. Cleared by a
    /// successful fetch.
    #[must_use]
    pub fn last_error(&self) -> Option<String> {
        self.state.lock().last_error.clone()
    }

    #[must_use]
    pub fn scope(&self) -> Scope {
        self.state.lock().scope.clone()
    }

    #[must_use]
    pub fn summary(&self, recent_limit: usize) -> TaskSummary {
        summarize(&self.tasks(), recent_limit)
    }

    fn record_failure(&self, error: SyncError) -> SyncError {
        self.state.lock().record_failure(&error);
        error
    }

    // ── Fetch ────────────────────────────────────────────────────────

    /// Replace the collection with the server's task set.
    ///
    /// An explicit `scope` becomes the remembered scope. Failures leave the
    /// collection untouched and are reported through [`last_error`](Self::last_error).
    pub async fn fetch_all(&self, scope: Option<Scope>) {
        let scope = {
            let mut state = self.state.lock();
            if let Some(scope) = scope {
                state.scope = scope;
            }
            state.fetches_in_flight += 1;
            state.scope.clone()
        };

        let result = self.store.try_list(&scope).await;
        let cached = if result.is_ok() {
            self.cache.read_all()
        } else {
            BTreeMap::new()
        };

        let mut state = self.state.lock();
        state.fetches_in_flight = state.fetches_in_flight.saturating_sub(1);
        match result {
            Ok(_) if state.scope != scope => {
                tracing::debug!(%scope, current = %state.scope, "discarding fetch for stale scope");
            }
            Ok(records) => {
                let tasks: Vec<Task> = records
                    .into_iter()
                    .map(|record| resolve_record(record, &cached))
                    .collect();
                tracing::debug!(%scope, count = tasks.len(), "fetched tasks");
                state.collection.replace_all(tasks);
                state.last_error = None;
            }
            Err(error) => {
                let error = SyncError::from(error);
                tracing::warn!(%scope, %error, "task fetch failed; keeping current collection");
                state.last_error = Some(error.to_string());
            }
        }
    }

    // ── Create ───────────────────────────────────────────────────────

    /// Create a task in the remembered scope.
    ///
    /// A placeholder with a temporary id is shown at the front of the
    /// collection until the server answers.
    ///
    /// # Errors
    ///
    /// Precondition failures (`Validation`, `NotAuthenticated`) happen before
    /// the placeholder is shown. A store failure removes the placeholder.
    /// `Cancelled` is returned when the placeholder was deleted before the
    /// server confirmed it; the confirmed task is then deleted remotely.
    pub async fn create(&self, input: TaskCreate) -> Result<Task, SyncError> {
        input.validate()?;
        self.store.ensure_identity()?;

        let temp_id = ids::temp_id();
        let (scope, revision) = {
            let mut state = self.state.lock();
            let placeholder = Task::placeholder(temp_id.clone(), &input, Utc::now());
            (state.scope.clone(), state.collection.prepend(placeholder))
        };
        tracing::debug!(%temp_id, %scope, "placeholder added");

        let result = self.store.create(&input, &scope).await;

        let confirmed_id = {
            let mut state = self.state.lock();
            if !state.cancelled.remove(&temp_id) {
                return self.settle_create(&mut state, &scope, &temp_id, revision, &input, result);
            }
            result.ok().map(|record| record.id)
        };

        if let Some(id) = confirmed_id {
            tracing::info!(%temp_id, %id, "create was cancelled locally; deleting confirmed task");
            if let Err(error) = self.store.delete(&scope, &id).await {
                tracing::warn!(%id, %error, "compensating delete failed");
            }
        }
        Err(SyncError::Cancelled { temp_id })
    }

    fn settle_create(
        &self,
        state: &mut SyncState,
        scope: &Scope,
        temp_id: &str,
        revision: u64,
        input: &TaskCreate,
        result: Result<TaskRecord, StoreError>,
    ) -> Result<Task, SyncError> {
        match result {
            Ok(record) => {
                let status = record.status.or(input.status).unwrap_or_else(|| {
                    TaskStatus::from_completion(record.reported_completion())
                });
                let task = record.into_task(status);
                self.cache.write_one(&task.id, status);
                if state.scope != *scope {
                    if !state.collection.remove_if_current(temp_id, revision) {
                        tracing::debug!(%temp_id, "placeholder already gone");
                    }
                    tracing::debug!(
                        %temp_id,
                        id = %task.id,
                        %scope,
                        current = %state.scope,
                        "task created outside the current scope; not inserted"
                    );
                    return Ok(task);
                }
                let settled = state.collection.settle_created(temp_id, task.clone());
                tracing::info!(%temp_id, id = %task.id, ?settled, "task created");
                Ok(task)
            }
            Err(error) => {
                if !state.collection.remove_if_current(temp_id, revision) {
                    tracing::debug!(%temp_id, "placeholder already gone");
                }
                let error = SyncError::from(error);
                state.record_failure(&error);
                Err(error)
            }
        }
    }

    // ── Toggle ───────────────────────────────────────────────────────

    /// Flip completion. Status follows: `DONE` when completed, `TO_DO`
    /// otherwise. The target status is cached before the remote call and is
    /// not rolled back from the cache on failure.
    ///
    /// # Errors
    ///
    /// `NotConfirmed`, `NotAuthenticated` and `NotFound` before any change;
    /// store failures after the entry was reverted.
    pub async fn toggle_complete(&self, id: &str) -> Result<Task, SyncError> {
        ensure_confirmed(id)?;
        self.store.ensure_identity()?;

        let (before, revision) = self
            .state
            .lock()
            .collection
            .apply(id, |task| {
                task.is_completed = !task.is_completed;
                task.status = TaskStatus::from_completion(task.is_completed);
            })
            .ok_or_else(|| not_found(id))?;
        let target = TaskStatus::from_completion(!before.is_completed);
        self.cache.write_one(id, target);

        match self.store.toggle_complete(&before.scope(), id).await {
            Ok(record) => {
                let task = record.into_task(target);
                let current = self
                    .state
                    .lock()
                    .collection
                    .apply_if_current(id, revision, |entry| *entry = task.clone());
                if !current {
                    tracing::debug!(id, "toggle superseded; not reconciling");
                }
                tracing::info!(id, status = %target, "completion toggled");
                Ok(task)
            }
            Err(error) => {
                let mut state = self.state.lock();
                let current = state.collection.apply_if_current(id, revision, |entry| {
                    entry.is_completed = before.is_completed;
                    entry.status = before.status;
                });
                if !current {
                    tracing::debug!(id, "toggle superseded; not rolling back");
                }
                let error = SyncError::from(error);
                state.record_failure(&error);
                Err(error)
            }
        }
    }

    // ── Update ───────────────────────────────────────────────────────

    /// Shallow-merge `patch` into a task.
    ///
    /// # Errors
    ///
    /// `Validation`, `NotConfirmed`, `NotAuthenticated` and `NotFound` before
    /// any change; store failures after the entry was restored.
    pub async fn update(&self, id: &str, patch: TaskUpdate) -> Result<Task, SyncError> {
        patch.validate()?;
        ensure_confirmed(id)?;
        self.store.ensure_identity()?;

        let (before, revision) = self
            .state
            .lock()
            .collection
            .apply(id, |task| patch.apply_to(task))
            .ok_or_else(|| not_found(id))?;

        match self.store.update(&before.scope(), id, &patch).await {
            Ok(record) => {
                let status = record.status.or(patch.status).unwrap_or(before.status);
                let task = record.into_task(status);
                if patch.status.is_some() {
                    self.cache.write_one(id, status);
                }
                let current = self
                    .state
                    .lock()
                    .collection
                    .apply_if_current(id, revision, |entry| *entry = task.clone());
                if !current {
                    tracing::debug!(id, "update superseded; not reconciling");
                }
                tracing::info!(id, "task updated");
                Ok(task)
            }
            Err(error) => {
                let mut state = self.state.lock();
                if !state
                    .collection
                    .apply_if_current(id, revision, |entry| *entry = before)
                {
                    tracing::debug!(id, "update superseded; not rolling back");
                }
                let error = SyncError::from(error);
                state.record_failure(&error);
                Err(error)
            }
        }
    }

    // ── Delete ───────────────────────────────────────────────────────

    /// Delete a task.
    ///
    /// Deleting a placeholder only removes it locally and cancels the
    /// pending create.
    ///
    /// # Errors
    ///
    /// `NotAuthenticated` and `NotFound` before any change; store failures
    /// after the entry was restored.
    pub async fn delete(&self, id: &str) -> Result<(), SyncError> {
        if ids::is_temporary(id) {
            return self.cancel_pending(id);
        }
        self.store.ensure_identity()?;

        let removal = self
            .state
            .lock()
            .collection
            .remove(id)
            .ok_or_else(|| not_found(id))?;
        let scope = removal.task().scope();

        match self.store.delete(&scope, id).await {
            Ok(()) => {
                self.cache.remove_one(id);
                tracing::info!(id, "task deleted");
                Ok(())
            }
            Err(error) => {
                let mut state = self.state.lock();
                if !state.collection.restore(removal) {
                    tracing::debug!(id, "task reappeared; not restoring");
                }
                let error = SyncError::from(error);
                state.record_failure(&error);
                Err(error)
            }
        }
    }

    fn cancel_pending(&self, temp_id: &str) -> Result<(), SyncError> {
        let mut state = self.state.lock();
        state
            .collection
            .remove(temp_id)
            .ok_or_else(|| not_found(temp_id))?;
        state.cancelled.insert(temp_id.to_string());
        tracing::debug!(temp_id, "placeholder deleted; pending create cancelled");
        Ok(())
    }

    // ── Board ────────────────────────────────────────────────────────

    /// Move a task to another board column and refresh its entry.
    ///
    /// # Errors
    ///
    /// `NotConfirmed` and `NotFound` before any change; status patch
    /// failures for workspace tasks.
    pub async fn move_task(&self, id: &str, status: TaskStatus) -> Result<Task, SyncError> {
        ensure_confirmed(id)?;
        let task = self.task(id).ok_or_else(|| not_found(id))?;

        let moved = board::move_task(self.store.as_ref(), self.cache.as_ref(), &task, status)
            .await
            .map_err(|error| self.record_failure(error))?;

        if self
            .state
            .lock()
            .collection
            .apply(id, |entry| *entry = moved.clone())
            .is_none()
        {
            tracing::debug!(id, "moved task no longer in collection");
        }
        Ok(moved)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tsk_cache::MemoryStatusCache;
    use tsk_core::entities::TaskUpdateBuilder;
    use tsk_core::enums::TaskPriority;

    use super::*;
    use crate::test_support::{MockStore, record_from, task};

    struct Harness {
        store: Arc<MockStore>,
        cache: Arc<MemoryStatusCache>,
        sync: TaskSynchronizer,
    }

    fn harness_with(store: MockStore, cache: MemoryStatusCache) -> Harness {
        let store = Arc::new(store);
        let cache = Arc::new(cache);
        let sync = TaskSynchronizer::new(store.clone(), cache.clone(), Scope::Personal);
        Harness { store, cache, sync }
    }

    fn harness() -> Harness {
        harness_with(MockStore::new(), MemoryStatusCache::new())
    }

    async fn loaded(tasks: Vec<Task>) -> Harness {
        let h = harness();
        for task in tasks {
            h.store.seed(task);
        }
        h.sync.fetch_all(None).await;
        h
    }

    fn ids(sync: &TaskSynchronizer) -> Vec<String> {
        sync.tasks().into_iter().map(|t| t.id).collect()
    }

    fn assert_unique_confirmed(sync: &TaskSynchronizer) {
        let ids = ids(sync);
        let unique: HashSet<_> = ids.iter().collect();
        assert_eq!(unique.len(), ids.len(), "duplicate ids in {ids:?}");
        assert!(
            ids.iter().all(|id| !ids::is_temporary(id)),
            "placeholder left in {ids:?}"
        );
    }

    // ── fetch_all ──

    #[tokio::test]
    async fn fetch_resolves_status_precedence() {
        let h = harness_with(
            MockStore::new(),
            MemoryStatusCache::with_entries([
                ("x", TaskStatus::Done),
                ("y", TaskStatus::Done),
            ]),
        );
        h.store.seed_record(record_from(&task("x", "cached"), None));
        h.store
            .seed_record(record_from(&task("y", "reported"), Some(TaskStatus::InProgress)));
        let mut done = task("z", "legacy done");
        done.is_completed = true;
        h.store.seed_record(record_from(&done, None));
        h.store.seed_record(record_from(&task("w", "legacy open"), None));

        h.sync.fetch_all(None).await;

        let status = |id: &str| h.sync.task(id).unwrap().status;
        assert_eq!(status("x"), TaskStatus::Done);
        assert_eq!(status("y"), TaskStatus::InProgress);
        assert_eq!(status("z"), TaskStatus::Done);
        assert_eq!(status("w"), TaskStatus::ToDo);
        assert!(!h.sync.is_loading());
        assert_eq!(h.sync.last_error(), None);
    }

    #[tokio::test]
    async fn fetch_failure_keeps_collection_and_sets_error() {
        let h = loaded(vec![task("t1", "keep me")]).await;
        h.store.fail("list");

        h.sync.fetch_all(None).await;

        assert_eq!(ids(&h.sync), vec!["t1"]);
        assert!(h.sync.last_error().unwrap().contains("list failed"));
        assert!(!h.sync.is_loading());

        h.store.recover("list");
        h.sync.fetch_all(None).await;
        assert_eq!(h.sync.last_error(), None);
    }

    #[tokio::test]
    async fn fetch_keeps_first_duplicate() {
        let h = harness();
        h.store.seed(task("t1", "first"));
        h.store.seed(task("t1", "second"));

        h.sync.fetch_all(None).await;

        assert_eq!(h.sync.tasks().len(), 1);
        assert_eq!(h.sync.task("t1").unwrap().title, "first");
    }

    #[tokio::test]
    async fn explicit_scope_is_remembered() {
        let h = harness();
        let mut ws_task = task("w1", "workspace task");
        ws_task.workspace_id = Some("ws-1".into());
        h.store.seed(ws_task);
        h.store.seed(task("p1", "personal task"));

        h.sync.fetch_all(Some(Scope::Workspace("ws-1".into()))).await;
        assert_eq!(ids(&h.sync), vec!["w1"]);
        assert_eq!(h.sync.scope(), Scope::Workspace("ws-1".into()));

        h.sync.fetch_all(None).await;
        assert_eq!(h.store.calls().last().unwrap(), "list workspace:ws-1");
    }

    #[tokio::test]
    async fn loading_flag_is_set_during_fetch() {
        let h = harness();
        let gate = h.store.gate("list");

        tokio::join!(h.sync.fetch_all(None), async {
            assert!(h.sync.is_loading());
            gate.notify_one();
        });

        assert!(!h.sync.is_loading());
    }

    // ── create ──

    #[tokio::test]
    async fn create_shows_placeholder_then_server_task() {
        let h = harness();
        let gate = h.store.gate("create");

        let (created, ()) = tokio::join!(h.sync.create(TaskCreate::new("Write docs")), async {
            let tasks = h.sync.tasks();
            assert_eq!(tasks.len(), 1);
            let placeholder = &tasks[0];
            assert!(placeholder.is_temporary());
            assert_eq!(placeholder.status, TaskStatus::ToDo);
            assert_eq!(placeholder.priority, TaskPriority::Medium);
            assert!(!placeholder.is_completed);
            assert_eq!(placeholder.workspace_id, None);
            gate.notify_one();
        });

        let created = created.unwrap();
        assert_eq!(created.id, "t1");
        assert_eq!(ids(&h.sync), vec!["t1"]);
        assert_eq!(h.cache.get("t1"), Some(TaskStatus::ToDo));
    }

    #[tokio::test]
    async fn create_uses_input_status_and_priority() {
        let h = harness();
        let mut input = TaskCreate::new("Ship it");
        input.status = Some(TaskStatus::Review);
        input.priority = Some(TaskPriority::Urgent);

        let created = h.sync.create(input).await.unwrap();

        assert_eq!(created.status, TaskStatus::Review);
        assert_eq!(created.priority, TaskPriority::Urgent);
        assert_eq!(h.cache.get(&created.id), Some(TaskStatus::Review));
    }

    #[tokio::test]
    async fn create_in_workspace_scope() {
        let h = harness();
        h.sync.fetch_all(Some(Scope::Workspace("ws-1".into()))).await;

        let created = h.sync.create(TaskCreate::new("Team task")).await.unwrap();

        assert_eq!(created.workspace_id.as_deref(), Some("ws-1"));
        assert_eq!(h.store.calls().last().unwrap(), "create workspace:ws-1 Team task");
    }

    #[tokio::test]
    async fn create_failure_removes_placeholder() {
        let h = loaded(vec![task("a", "existing")]).await;
        h.store.fail("create");

        let err = h.sync.create(TaskCreate::new("Doomed")).await.unwrap_err();

        assert!(matches!(err, SyncError::Store(_)));
        assert_eq!(ids(&h.sync), vec!["a"]);
        assert!(h.sync.last_error().is_some());
        assert!(h.cache.read_all().is_empty());
    }

    #[tokio::test]
    async fn create_rejects_blank_title_without_side_effects() {
        let h = harness();
        let err = h.sync.create(TaskCreate::new("   ")).await.unwrap_err();

        assert!(matches!(err, SyncError::Validation(_)));
        assert!(h.sync.tasks().is_empty());
        assert!(h.store.calls().is_empty());
        assert_eq!(h.sync.last_error(), None);
    }

    #[tokio::test]
    async fn create_without_identity_fails_before_placeholder() {
        let h = harness_with(MockStore::anonymous(), MemoryStatusCache::new());
        let err = h.sync.create(TaskCreate::new("x")).await.unwrap_err();

        assert!(matches!(err, SyncError::NotAuthenticated));
        assert!(h.sync.tasks().is_empty());
    }

    #[tokio::test]
    async fn delete_placeholder_before_confirmation_cancels_create() {
        let h = harness();
        let gate = h.store.gate("create");

        let (created, ()) = tokio::join!(h.sync.create(TaskCreate::new("Oops")), async {
            let temp_id = h.sync.tasks()[0].id.clone();
            h.sync.delete(&temp_id).await.unwrap();
            assert!(h.sync.tasks().is_empty());
            gate.notify_one();
        });

        assert!(matches!(created, Err(SyncError::Cancelled { .. })));
        assert!(h.sync.tasks().is_empty());
        assert!(h.cache.read_all().is_empty());
        assert!(h.store.stored_ids().is_empty(), "server copy was deleted");
        assert_eq!(h.store.calls(), vec!["create personal Oops", "delete personal t1"]);
    }

    #[tokio::test]
    async fn fetch_during_create_does_not_duplicate() {
        let h = harness();
        let gate = h.store.gate("create");

        let (created, ()) = tokio::join!(h.sync.create(TaskCreate::new("Racy")), async {
            // The server already has the task by the time the fetch lands.
            h.store.seed(task("t1", "Racy"));
            h.sync.fetch_all(None).await;
            gate.notify_one();
        });

        assert_eq!(created.unwrap().id, "t1");
        assert_eq!(ids(&h.sync), vec!["t1"]);
        assert_unique_confirmed(&h.sync);
    }

    #[tokio::test]
    async fn create_confirmed_after_scope_switch_stays_out_of_collection() {
        let h = harness();
        let mut shared = task("w1", "Workspace task");
        shared.workspace_id = Some("ws-1".into());
        h.store.seed(shared);
        let gate = h.store.gate("create");

        let (created, ()) = tokio::join!(h.sync.create(TaskCreate::new("Personal")), async {
            h.sync
                .fetch_all(Some(Scope::Workspace("ws-1".into())))
                .await;
            gate.notify_one();
        });

        let created = created.unwrap();
        assert_eq!(created.workspace_id, None);
        assert_eq!(h.sync.scope(), Scope::Workspace("ws-1".into()));
        assert_eq!(ids(&h.sync), vec!["w1"]);
        assert_eq!(h.cache.get(&created.id), Some(TaskStatus::ToDo));
        assert_eq!(h.store.calls()[0], "create personal Personal");
    }

    #[tokio::test]
    async fn create_after_scope_switch_drops_placeholder() {
        let h = harness();
        let create_gate = h.store.gate("create");
        let list_gate = h.store.gate("list");

        let (created, (), ()) = tokio::join!(
            h.sync.create(TaskCreate::new("Personal")),
            h.sync.fetch_all(Some(Scope::Workspace("ws-1".into()))),
            async {
                // The switch is pending: the placeholder is still shown
                // when the create lands.
                create_gate.notify_one();
                while h.sync.tasks().iter().any(Task::is_temporary) {
                    tokio::task::yield_now().await;
                }
                assert!(h.sync.tasks().is_empty());
                list_gate.notify_one();
            }
        );

        assert_eq!(created.unwrap().workspace_id, None);
        assert!(h.sync.tasks().is_empty());
        assert_unique_confirmed(&h.sync);
    }

    // ── toggle_complete ──

    #[tokio::test]
    async fn toggle_applies_optimistically_and_caches_first() {
        let h = loaded(vec![task("t1", "Write docs")]).await;
        let gate = h.store.gate("toggle_complete");

        let (toggled, ()) = tokio::join!(h.sync.toggle_complete("t1"), async {
            let task = h.sync.task("t1").unwrap();
            assert!(task.is_completed);
            assert_eq!(task.status, TaskStatus::Done);
            assert_eq!(h.cache.get("t1"), Some(TaskStatus::Done));
            gate.notify_one();
        });

        let toggled = toggled.unwrap();
        assert!(toggled.is_completed);
        assert_eq!(toggled.status, TaskStatus::Done);
        assert_eq!(h.sync.task("t1").unwrap(), toggled);
    }

    #[tokio::test]
    async fn toggle_twice_restores_original() {
        let h = loaded(vec![task("t1", "Write docs")]).await;
        let original = h.sync.task("t1").unwrap();

        h.sync.toggle_complete("t1").await.unwrap();
        h.sync.toggle_complete("t1").await.unwrap();

        let task = h.sync.task("t1").unwrap();
        assert_eq!(task.is_completed, original.is_completed);
        assert_eq!(task.status, original.status);
        assert_eq!(h.cache.get("t1"), Some(TaskStatus::ToDo));
    }

    #[tokio::test]
    async fn toggle_failure_reverts_fields_but_not_cache() {
        let mut in_review = task("t1", "Write docs");
        in_review.status = TaskStatus::Review;
        let h = loaded(vec![in_review]).await;
        h.store.fail("toggle_complete");

        let err = h.sync.toggle_complete("t1").await.unwrap_err();

        assert!(matches!(err, SyncError::Store(_)));
        let task = h.sync.task("t1").unwrap();
        assert!(!task.is_completed);
        assert_eq!(task.status, TaskStatus::Review);
        assert_eq!(h.cache.get("t1"), Some(TaskStatus::Done));
        assert!(h.sync.last_error().is_some());
    }

    #[tokio::test]
    async fn toggle_preconditions() {
        let h = loaded(vec![task("t1", "x")]).await;

        let err = h.sync.toggle_complete("missing").await.unwrap_err();
        assert!(matches!(err, SyncError::NotFound { .. }));

        let err = h.sync.toggle_complete("temp-abc").await.unwrap_err();
        assert!(matches!(err, SyncError::NotConfirmed { .. }));

        assert_eq!(h.store.calls(), vec!["list personal"]);
    }

    #[tokio::test]
    async fn superseded_toggle_does_not_clobber_later_update() {
        let h = loaded(vec![task("t1", "Original")]).await;
        let gate = h.store.gate("toggle_complete");
        h.store.fail("toggle_complete");

        let (toggled, updated) = tokio::join!(h.sync.toggle_complete("t1"), async {
            let patch = TaskUpdateBuilder::new().title("Renamed").build();
            let updated = h.sync.update("t1", patch).await;
            gate.notify_one();
            updated
        });

        assert!(toggled.is_err());
        updated.unwrap();
        let task = h.sync.task("t1").unwrap();
        assert_eq!(task.title, "Renamed");
    }

    // ── update ──

    #[tokio::test]
    async fn update_replaces_entry_with_server_task() {
        let h = loaded(vec![task("t1", "Original")]).await;
        let patch = TaskUpdateBuilder::new()
            .title("Renamed")
            .status(TaskStatus::InProgress)
            .build();

        let updated = h.sync.update("t1", patch).await.unwrap();

        assert_eq!(updated.title, "Renamed");
        assert_eq!(updated.status, TaskStatus::InProgress);
        assert_eq!(h.sync.task("t1").unwrap(), updated);
        assert_eq!(h.cache.get("t1"), Some(TaskStatus::InProgress));
    }

    #[tokio::test]
    async fn update_without_status_leaves_cache() {
        let h = loaded(vec![task("t1", "Original")]).await;
        // Another client moved the task; this one has not refetched.
        h.store
            .update_status(&Scope::Personal, "t1", TaskStatus::Review)
            .await
            .unwrap();
        let patch = TaskUpdateBuilder::new().priority(TaskPriority::High).build();

        let updated = h.sync.update("t1", patch).await.unwrap();

        assert_eq!(updated.priority, TaskPriority::High);
        assert_eq!(updated.status, TaskStatus::Review);
        assert_eq!(h.cache.get("t1"), None);
    }

    #[tokio::test]
    async fn update_resending_status_refreshes_stale_cache() {
        let h = loaded(vec![task("t1", "Original")]).await;
        h.store.fail("toggle_complete");
        h.sync.toggle_complete("t1").await.unwrap_err();
        assert_eq!(h.cache.get("t1"), Some(TaskStatus::Done));

        let patch = TaskUpdateBuilder::new().status(TaskStatus::ToDo).build();
        h.sync.update("t1", patch).await.unwrap();

        assert_eq!(h.sync.task("t1").unwrap().status, TaskStatus::ToDo);
        assert_eq!(h.cache.get("t1"), Some(TaskStatus::ToDo));
    }

    #[tokio::test]
    async fn failed_update_restores_exact_snapshot() {
        let h = loaded(vec![task("t1", "Original")]).await;
        let before = h.sync.task("t1").unwrap();
        h.store.fail("update");
        let patch = TaskUpdateBuilder::new()
            .title("Renamed")
            .description(Some("new".into()))
            .build();

        let err = h.sync.update("t1", patch).await.unwrap_err();

        assert!(matches!(err, SyncError::Store(_)));
        assert_eq!(h.sync.task("t1").unwrap(), before);
    }

    #[tokio::test]
    async fn update_preconditions() {
        let h = loaded(vec![task("t1", "x")]).await;

        let err = h
            .sync
            .update("t1", TaskUpdate::default())
            .await
            .unwrap_err();
        assert!(matches!(err, SyncError::Validation(_)));

        let patch = TaskUpdateBuilder::new().title("y").build();
        let err = h.sync.update("nope", patch.clone()).await.unwrap_err();
        assert!(matches!(err, SyncError::NotFound { .. }));
        let err = h.sync.update("temp-1", patch).await.unwrap_err();
        assert!(matches!(err, SyncError::NotConfirmed { .. }));
    }

    // ── delete ──

    #[tokio::test]
    async fn delete_removes_from_collection_and_cache() {
        let h = loaded(vec![task("t1", "x"), task("t2", "y")]).await;
        h.cache.write_one("t1", TaskStatus::Done);

        h.sync.delete("t1").await.unwrap();

        assert_eq!(ids(&h.sync), vec!["t2"]);
        assert_eq!(h.cache.get("t1"), None);
    }

    #[tokio::test]
    async fn failed_delete_restores_position() {
        let h = loaded(vec![task("a", "a"), task("b", "b"), task("c", "c")]).await;
        h.cache.write_one("b", TaskStatus::Review);
        h.store.fail("delete");

        let err = h.sync.delete("b").await.unwrap_err();

        assert!(matches!(err, SyncError::Store(_)));
        assert_eq!(ids(&h.sync), vec!["a", "b", "c"]);
        assert_eq!(h.cache.get("b"), Some(TaskStatus::Review));
    }

    #[tokio::test]
    async fn failed_delete_keeps_concurrent_create() {
        let h = loaded(vec![task("a", "a"), task("b", "b")]).await;
        h.store.fail("delete");
        let gate = h.store.gate("delete");

        let (deleted, created) = tokio::join!(h.sync.delete("b"), async {
            let created = h.sync.create(TaskCreate::new("new")).await;
            gate.notify_one();
            created
        });

        assert!(deleted.is_err());
        let created = created.unwrap();
        assert_eq!(ids(&h.sync), vec![created.id, "a".into(), "b".into()]);
        assert_unique_confirmed(&h.sync);
    }

    #[tokio::test]
    async fn delete_unknown_id_is_not_found() {
        let h = loaded(vec![task("a", "a")]).await;
        let err = h.sync.delete("zzz").await.unwrap_err();
        assert!(matches!(err, SyncError::NotFound { .. }));
        let err = h.sync.delete("temp-zzz").await.unwrap_err();
        assert!(matches!(err, SyncError::NotFound { .. }));
    }

    // ── board / summary ──

    #[tokio::test]
    async fn move_personal_task_updates_entry_and_cache() {
        let h = loaded(vec![task("t1", "x")]).await;

        let moved = h.sync.move_task("t1", TaskStatus::Review).await.unwrap();

        assert_eq!(moved.status, TaskStatus::Review);
        assert_eq!(h.sync.task("t1").unwrap().status, TaskStatus::Review);
        assert_eq!(h.cache.get("t1"), Some(TaskStatus::Review));
        assert_eq!(h.store.calls(), vec!["list personal"]);
    }

    #[tokio::test]
    async fn summary_reflects_collection() {
        let mut done = task("b", "done");
        done.status = TaskStatus::Done;
        done.is_completed = true;
        let h = loaded(vec![task("a", "open"), done]).await;

        let summary = h.sync.summary(5);
        assert_eq!(summary.total, 2);
        assert_eq!(summary.completed, 1);
        assert_eq!(summary.to_do, 1);
    }

    // ── invariants ──

    #[tokio::test]
    async fn mixed_operations_leave_one_entry_per_id() {
        let h = loaded(vec![task("a", "a")]).await;

        let created = h.sync.create(TaskCreate::new("b")).await.unwrap();
        h.sync.toggle_complete(&created.id).await.unwrap();
        h.sync
            .update("a", TaskUpdateBuilder::new().title("a2").build())
            .await
            .unwrap();
        h.sync.fetch_all(None).await;
        h.sync.create(TaskCreate::new("c")).await.unwrap();
        h.sync.delete("a").await.unwrap();

        assert_unique_confirmed(&h.sync);
        assert_eq!(h.sync.tasks().len(), 2);
        let get = h.store.get(&Scope::Personal, &created.id).await.unwrap();
        assert!(get.reported_completion());
    }
}
