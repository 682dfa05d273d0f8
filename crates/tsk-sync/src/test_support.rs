//! Scriptable in-memory [`TaskStore`] for unit tests.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use tokio::sync::Notify;
use tsk_client::{StoreError, TaskStore};
use tsk_core::entities::{Task, TaskCreate, TaskRecord, TaskUpdate};
use tsk_core::enums::TaskStatus;
use tsk_core::identity::Identity;
use tsk_core::scope::Scope;

#[derive(Default)]
pub struct MockStore {
    records: Mutex<Vec<TaskRecord>>,
    failing: Mutex<HashSet<&'static str>>,
    gates: Mutex<HashMap<&'static str, Arc<Notify>>>,
    calls: Mutex<Vec<String>>,
    anonymous: AtomicBool,
    next_id: AtomicUsize,
}

/// Wire record for a task, with the given reported status.
pub fn record_from(task: &Task, status: Option<TaskStatus>) -> TaskRecord {
    TaskRecord {
        id: task.id.clone(),
        title: task.title.clone(),
        description: task.description.clone(),
        priority: task.priority,
        status,
        is_completed: Some(task.is_completed),
        workspace_id: task.workspace_id.clone(),
        project_id: task.project_id.clone(),
        created_by: Some(task.created_by.clone()),
        user_id: None,
        assigned_to: task.assigned_to.clone(),
        created_at: task.created_at,
        updated_at: task.updated_at,
        completed_at: task.completed_at,
    }
}

/// A confirmed personal task.
pub fn task(id: &str, title: &str) -> Task {
    let mut task = Task::placeholder(id.to_string(), &TaskCreate::new(title), Utc::now());
    task.created_by = "user-1".into();
    task
}

fn not_found(id: &str) -> StoreError {
    StoreError::Api {
        status: 404,
        message: format!("task {id} not found"),
    }
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn anonymous() -> Self {
        let store = Self::default();
        store.anonymous.store(true, Ordering::SeqCst);
        store
    }

    /// Seed a task whose record reports its status.
    pub fn seed(&self, task: Task) {
        let status = task.status;
        self.seed_record(record_from(&task, Some(status)));
    }

    pub fn seed_record(&self, record: TaskRecord) {
        self.records.lock().push(record);
    }

    /// Make every call to `op` fail with a 500.
    pub fn fail(&self, op: &'static str) {
        self.failing.lock().insert(op);
    }

    pub fn recover(&self, op: &'static str) {
        self.failing.lock().remove(op);
    }

    /// Hold the next call to `op` until the returned gate is notified.
    pub fn gate(&self, op: &'static str) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.gates.lock().insert(op, Arc::clone(&gate));
        gate
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    pub fn stored_ids(&self) -> Vec<String> {
        self.records.lock().iter().map(|r| r.id.clone()).collect()
    }

    async fn enter(&self, op: &'static str, call: String) -> Result<(), StoreError> {
        self.ensure_identity()?;
        self.calls.lock().push(call);
        let gate = self.gates.lock().remove(op);
        if let Some(gate) = gate {
            gate.notified().await;
        }
        if self.failing.lock().contains(op) {
            return Err(StoreError::Api {
                status: 500,
                message: format!("{op} failed"),
            });
        }
        Ok(())
    }

    fn with_record(
        &self,
        id: &str,
        change: impl FnOnce(&mut TaskRecord),
    ) -> Result<TaskRecord, StoreError> {
        let mut records = self.records.lock();
        let record = records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| not_found(id))?;
        change(record);
        record.updated_at = Utc::now();
        Ok(record.clone())
    }
}

#[async_trait]
impl TaskStore for MockStore {
    fn ensure_identity(&self) -> Result<Identity, StoreError> {
        if self.anonymous.load(Ordering::SeqCst) {
            return Err(StoreError::NotAuthenticated);
        }
        Ok(Identity::new("user-1", "tok"))
    }

    async fn try_list(&self, scope: &Scope) -> Result<Vec<TaskRecord>, StoreError> {
        self.enter("list", format!("list {scope}")).await?;
        Ok(self
            .records
            .lock()
            .iter()
            .filter(|r| Scope::from_workspace_id(r.workspace_id.as_deref()) == *scope)
            .cloned()
            .collect())
    }

    async fn create(&self, input: &TaskCreate, scope: &Scope) -> Result<TaskRecord, StoreError> {
        self.enter("create", format!("create {scope} {}", input.title))
            .await?;
        let id = format!("t{}", self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        let now = Utc::now();
        let record = TaskRecord {
            id,
            title: input.title.clone(),
            description: input.description.clone(),
            priority: input.priority.unwrap_or_default(),
            status: input.status,
            is_completed: Some(false),
            workspace_id: scope.workspace_id().map(str::to_string),
            project_id: input.project_id.clone(),
            created_by: Some("user-1".into()),
            user_id: None,
            assigned_to: input.assigned_to.clone(),
            created_at: now,
            updated_at: now,
            completed_at: None,
        };
        self.records.lock().push(record.clone());
        Ok(record)
    }

    async fn get(&self, scope: &Scope, id: &str) -> Result<TaskRecord, StoreError> {
        self.enter("get", format!("get {scope} {id}")).await?;
        self.records
            .lock()
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    async fn update(
        &self,
        scope: &Scope,
        id: &str,
        patch: &TaskUpdate,
    ) -> Result<TaskRecord, StoreError> {
        self.enter("update", format!("update {scope} {id}")).await?;
        self.with_record(id, |record| {
            if let Some(title) = &patch.title {
                record.title.clone_from(title);
            }
            if let Some(description) = &patch.description {
                record.description.clone_from(description);
            }
            if let Some(priority) = patch.priority {
                record.priority = priority;
            }
            if let Some(status) = patch.status {
                record.status = Some(status);
            }
        })
    }

    async fn toggle_complete(&self, scope: &Scope, id: &str) -> Result<TaskRecord, StoreError> {
        self.enter("toggle_complete", format!("toggle_complete {scope} {id}"))
            .await?;
        self.with_record(id, |record| {
            record.is_completed = Some(!record.reported_completion());
        })
    }

    async fn update_status(
        &self,
        scope: &Scope,
        id: &str,
        status: TaskStatus,
    ) -> Result<TaskRecord, StoreError> {
        self.enter("update_status", format!("update_status {scope} {id}"))
            .await?;
        self.with_record(id, |record| record.status = Some(status))
    }

    async fn delete(&self, scope: &Scope, id: &str) -> Result<(), StoreError> {
        self.enter("delete", format!("delete {scope} {id}")).await?;
        let mut records = self.records.lock();
        let index = records
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| not_found(id))?;
        records.remove(index);
        Ok(())
    }
}
