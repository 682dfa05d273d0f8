use std::fs;
use std::path::{Path, PathBuf};

use tsk_core::identity::Identity;

use crate::error::AuthError;

const DEFAULT_KEYRING_SERVICE: &str = "tasksync-cli";
const KEYRING_USER: &str = "identity";
const CREDENTIALS_FILE_NAME: &str = "credentials";

pub const TOKEN_ENV: &str = "TASKSYNC_AUTH__TOKEN";
pub const USER_ID_ENV: &str = "TASKSYNC_AUTH__USER_ID";

/// Where the active credentials were found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    Keyring,
    Env,
    File,
}

impl CredentialSource {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Keyring => "keyring",
            Self::Env => "env",
            Self::File => "file",
        }
    }
}

/// Returns the keyring service name.
///
/// Defaults to `"tasksync-cli"`. Override via `TASKSYNC_KEYRING_SERVICE` for
/// testing to avoid touching real credentials.
fn keyring_service() -> String {
    std::env::var("TASKSYNC_KEYRING_SERVICE")
        .unwrap_or_else(|_| DEFAULT_KEYRING_SERVICE.to_string())
}

/// Store an identity in the OS keychain. Falls back to file if keyring unavailable.
///
/// # Errors
///
/// Returns `AuthError::TokenStoreError` if both keyring and file storage fail.
pub fn store(identity: &Identity) -> Result<(), AuthError> {
    let payload = encode(identity)?;
    match keyring::Entry::new(&keyring_service(), KEYRING_USER) {
        Ok(entry) => match entry.set_password(&payload) {
            Ok(()) => Ok(()),
            Err(error) => {
                tracing::warn!(%error, "keyring store failed; falling back to file");
                store_file(&credentials_path()?, identity)
            }
        },
        Err(error) => {
            tracing::warn!(%error, "keyring unavailable; falling back to file");
            store_file(&credentials_path()?, identity)
        }
    }
}

/// Load an identity. Priority: keyring → `TASKSYNC_AUTH__*` env → file
/// (`~/.tasksync/credentials`).
#[must_use]
pub fn load() -> Option<Identity> {
    load_with_source().map(|(identity, _)| identity)
}

/// Detect which tier the current identity came from (for status display).
#[must_use]
pub fn detect_source() -> Option<CredentialSource> {
    load_with_source().map(|(_, source)| source)
}

/// Delete stored credentials from keyring and file.
///
/// # Errors
///
/// Returns `AuthError::TokenStoreError` if the credentials file cannot be removed.
pub fn delete() -> Result<(), AuthError> {
    if let Ok(entry) = keyring::Entry::new(&keyring_service(), KEYRING_USER) {
        let _ = entry.delete_credential();
    }
    delete_file(&credentials_path()?)
}

fn load_with_source() -> Option<(Identity, CredentialSource)> {
    if let Ok(entry) = keyring::Entry::new(&keyring_service(), KEYRING_USER)
        && let Ok(payload) = entry.get_password()
        && let Some(identity) = decode(&payload)
    {
        return Some((identity, CredentialSource::Keyring));
    }

    if let Some(identity) = load_env() {
        return Some((identity, CredentialSource::Env));
    }

    let path = credentials_path().ok()?;
    load_file(&path).map(|identity| (identity, CredentialSource::File))
}

fn load_env() -> Option<Identity> {
    let token = std::env::var(TOKEN_ENV).ok()?;
    let user_id = std::env::var(USER_ID_ENV).ok()?;
    Some(Identity::new(user_id, token)).filter(Identity::is_complete)
}

fn encode(identity: &Identity) -> Result<String, AuthError> {
    serde_json::to_string(identity)
        .map_err(|e| AuthError::TokenStoreError(format!("encode credentials: {e}")))
}

fn decode(payload: &str) -> Option<Identity> {
    serde_json::from_str::<Identity>(payload)
        .ok()
        .filter(Identity::is_complete)
}

// --- File helpers ---

fn credentials_path() -> Result<PathBuf, AuthError> {
    dirs::home_dir()
        .map(|h| h.join(".tasksync").join(CREDENTIALS_FILE_NAME))
        .ok_or_else(|| {
            AuthError::TokenStoreError("home directory not found, cannot store credentials".into())
        })
}

fn store_file(path: &Path, identity: &Identity) -> Result<(), AuthError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| AuthError::TokenStoreError(format!("mkdir {}: {e}", parent.display())))?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Err(e) = fs::set_permissions(parent, fs::Permissions::from_mode(0o700)) {
                tracing::warn!("failed to chmod 0700 {}: {e}", parent.display());
            }
        }
    }
    fs::write(path, encode(identity)?)
        .map_err(|e| AuthError::TokenStoreError(format!("write {}: {e}", path.display())))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600))
            .map_err(|e| AuthError::TokenStoreError(format!("chmod {}: {e}", path.display())))?;
    }

    Ok(())
}

fn load_file(path: &Path) -> Option<Identity> {
    fs::read_to_string(path).ok().as_deref().and_then(decode)
}

fn delete_file(path: &Path) -> Result<(), AuthError> {
    if path.exists() {
        fs::remove_file(path).map_err(|e| {
            AuthError::TokenStoreError(format!("failed to delete {}: {e}", path.display()))
        })?;
    }
    Ok(())
}
