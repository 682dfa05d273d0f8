use std::sync::Arc;

use anyhow::Context;
use tsk_auth::{CachedIdentity, IdentityProvider, StaticIdentity, StoredIdentity};
use tsk_cache::{FileStatusCache, MemoryStatusCache, StatusCache};
use tsk_client::HttpTaskStore;
use tsk_config::TskConfig;
use tsk_core::scope::Scope;
use tsk_sync::TaskSynchronizer;

use crate::cli::GlobalFlags;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub config: TskConfig,
    pub sync: TaskSynchronizer,
}

impl AppContext {
    /// Build the synchronizer and load the task list for the active scope.
    ///
    /// # Errors
    ///
    /// Fails if the HTTP client cannot be built or the initial fetch fails
    /// (including when no credentials are available).
    pub async fn init(config: TskConfig, flags: &GlobalFlags) -> anyhow::Result<Self> {
        let store = HttpTaskStore::new(&config.api, identity_provider(&config))
            .context("failed to build task API client")?;
        let scope = resolve_scope(&config, flags);
        let sync = TaskSynchronizer::new(Arc::new(store), status_cache(&config), scope.clone());

        sync.fetch_all(Some(scope.clone())).await;
        if let Some(error) = sync.last_error() {
            anyhow::bail!("failed to load {scope} tasks: {error}");
        }
        tracing::debug!(%scope, count = sync.tasks().len(), "tasks loaded");

        Ok(Self { config, sync })
    }
}

/// Credentials from config win; otherwise whatever `tsk auth login` stored.
#[must_use]
fn identity_provider(config: &TskConfig) -> Arc<dyn IdentityProvider> {
    match config.auth.identity() {
        Some(identity) => Arc::new(StaticIdentity::new(identity)),
        None => Arc::new(CachedIdentity::new(StoredIdentity)),
    }
}

fn status_cache(config: &TskConfig) -> Arc<dyn StatusCache> {
    if !config.cache.enabled {
        return Arc::new(MemoryStatusCache::new());
    }
    match config.cache.resolved_path() {
        Some(path) => Arc::new(FileStatusCache::new(path)),
        None => {
            tracing::warn!("no data directory for the status cache; statuses will not persist");
            Arc::new(MemoryStatusCache::new())
        }
    }
}

fn resolve_scope(config: &TskConfig, flags: &GlobalFlags) -> Scope {
    flags
        .workspace
        .as_deref()
        .map_or_else(|| config.general.scope(), |ws| Scope::from_workspace_id(Some(ws)))
}
