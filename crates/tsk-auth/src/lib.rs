//! # tsk-auth
//!
//! Caller identity for the task API.
//!
//! Provides the [`IdentityProvider`] seam injected into the HTTP task store,
//! and a tiered credential store (OS keychain via `keyring`, environment
//! variables, `~/.tasksync/credentials` file) backing `tsk auth login`.

pub mod error;
pub mod provider;
pub mod token_store;

pub use error::AuthError;
pub use provider::{CachedIdentity, IdentityProvider, StaticIdentity, StoredIdentity};

use tsk_core::identity::Identity;

/// Persist credentials after validating them.
///
/// # Errors
///
/// Returns `AuthError::InvalidCredentials` if either field is blank, or
/// `AuthError::TokenStoreError` if neither the keyring nor the file could be
/// written.
pub fn login(identity: &Identity) -> Result<(), AuthError> {
    if !identity.is_complete() {
        return Err(AuthError::InvalidCredentials(
            "both user ID and token are required".into(),
        ));
    }
    token_store::store(identity)
}

/// Clear stored credentials.
///
/// # Errors
///
/// Returns `AuthError::TokenStoreError` if the credentials file cannot be removed.
pub fn logout() -> Result<(), AuthError> {
    token_store::delete()
}
