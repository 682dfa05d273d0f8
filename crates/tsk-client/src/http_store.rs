//! `reqwest`-backed [`TaskStore`].

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Method;
use serde::Serialize;
use tsk_auth::IdentityProvider;
use tsk_config::ApiConfig;
use tsk_core::entities::{TaskCreate, TaskRecord, TaskUpdate};
use tsk_core::enums::TaskStatus;
use tsk_core::identity::Identity;
use tsk_core::scope::Scope;

use crate::error::StoreError;
use crate::http::{check_response, decode};
use crate::store::TaskStore;

#[derive(Serialize)]
struct StatusPatch {
    status: TaskStatus,
}

/// HTTP client for the task API.
pub struct HttpTaskStore {
    http: reqwest::Client,
    base_url: String,
    identity: Arc<dyn IdentityProvider>,
}

impl HttpTaskStore {
    /// Build a store from API settings and an identity source.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Http`] if the underlying `reqwest::Client`
    /// fails to build.
    pub fn new(
        config: &ApiConfig,
        identity: Arc<dyn IdentityProvider>,
    ) -> Result<Self, StoreError> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            base_url: config.trimmed_base_url().to_string(),
            identity,
        })
    }

    /// Collection URL for a scope: `/api/{user_id}/tasks` or
    /// `/api/workspaces/{ws}/tasks`.
    fn tasks_url(&self, scope: &Scope, identity: &Identity) -> String {
        match scope {
            Scope::Personal => format!(
                "{}/api/{}/tasks",
                self.base_url,
                urlencoding::encode(&identity.user_id)
            ),
            Scope::Workspace(workspace_id) => format!(
                "{}/api/workspaces/{}/tasks",
                self.base_url,
                urlencoding::encode(workspace_id)
            ),
        }
    }

    fn task_url(&self, scope: &Scope, identity: &Identity, id: &str) -> String {
        format!(
            "{}/{}",
            self.tasks_url(scope, identity),
            urlencoding::encode(id)
        )
    }

    fn request(&self, method: Method, url: &str, identity: &Identity) -> reqwest::RequestBuilder {
        tracing::debug!(%method, url, "task api request");
        self.http
            .request(method, url)
            .bearer_auth(&identity.token)
    }
}

#[async_trait]
impl TaskStore for HttpTaskStore {
    fn ensure_identity(&self) -> Result<Identity, StoreError> {
        self.identity.resolve().ok_or(StoreError::NotAuthenticated)
    }

    async fn try_list(&self, scope: &Scope) -> Result<Vec<TaskRecord>, StoreError> {
        let identity = self.ensure_identity()?;
        let url = self.tasks_url(scope, &identity);
        let resp = check_response(self.request(Method::GET, &url, &identity).send().await?).await?;
        decode(resp).await
    }

    async fn create(&self, input: &TaskCreate, scope: &Scope) -> Result<TaskRecord, StoreError> {
        let identity = self.ensure_identity()?;
        let url = self.tasks_url(scope, &identity);
        let resp = check_response(
            self.request(Method::POST, &url, &identity)
                .json(input)
                .send()
                .await?,
        )
        .await?;
        decode(resp).await
    }

    async fn get(&self, scope: &Scope, id: &str) -> Result<TaskRecord, StoreError> {
        let identity = self.ensure_identity()?;
        let url = self.task_url(scope, &identity, id);
        let resp = check_response(self.request(Method::GET, &url, &identity).send().await?).await?;
        decode(resp).await
    }

    async fn update(
        &self,
        scope: &Scope,
        id: &str,
        patch: &TaskUpdate,
    ) -> Result<TaskRecord, StoreError> {
        let identity = self.ensure_identity()?;
        let url = self.task_url(scope, &identity, id);
        let resp = check_response(
            self.request(Method::PUT, &url, &identity)
                .json(patch)
                .send()
                .await?,
        )
        .await?;
        decode(resp).await
    }

    async fn toggle_complete(&self, scope: &Scope, id: &str) -> Result<TaskRecord, StoreError> {
        let identity = self.ensure_identity()?;
        let url = format!("{}/complete", self.task_url(scope, &identity, id));
        let resp =
            check_response(self.request(Method::PATCH, &url, &identity).send().await?).await?;
        decode(resp).await
    }

    async fn update_status(
        &self,
        scope: &Scope,
        id: &str,
        status: TaskStatus,
    ) -> Result<TaskRecord, StoreError> {
        let identity = self.ensure_identity()?;
        let url = format!("{}/status", self.task_url(scope, &identity, id));
        let resp = check_response(
            self.request(Method::PATCH, &url, &identity)
                .json(&StatusPatch { status })
                .send()
                .await?,
        )
        .await?;
        decode(resp).await
    }

    async fn delete(&self, scope: &Scope, id: &str) -> Result<(), StoreError> {
        let identity = self.ensure_identity()?;
        let url = self.task_url(scope, &identity, id);
        check_response(self.request(Method::DELETE, &url, &identity).send().await?).await?;
        Ok(())
    }
}
