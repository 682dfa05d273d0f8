//! Identity providers.
//!
//! The HTTP task store asks its provider for an identity before every
//! request; `None` short-circuits the request with `NotAuthenticated`
//! before anything touches the network.

use parking_lot::Mutex;
use tsk_core::identity::Identity;

/// Source of the caller identity for task API requests.
pub trait IdentityProvider: Send + Sync {
    /// Current identity, or `None` if the caller is not authenticated.
    fn resolve(&self) -> Option<Identity>;
}

/// A fixed identity, typically from configuration or tests.
#[derive(Debug, Clone, Default)]
pub struct StaticIdentity(Option<Identity>);

impl StaticIdentity {
    #[must_use]
    pub const fn new(identity: Identity) -> Self {
        Self(Some(identity))
    }

    /// A provider that never resolves an identity.
    #[must_use]
    pub const fn anonymous() -> Self {
        Self(None)
    }
}

impl IdentityProvider for StaticIdentity {
    fn resolve(&self) -> Option<Identity> {
        self.0.clone().filter(Identity::is_complete)
    }
}

/// Reads credentials saved by `tsk auth login` on every call, so a login
/// or logout in another process is picked up. Wrap it in
/// [`CachedIdentity`] to read them once per process.
#[derive(Debug, Clone, Copy, Default)]
pub struct StoredIdentity;

impl IdentityProvider for StoredIdentity {
    fn resolve(&self) -> Option<Identity> {
        crate::token_store::load()
    }
}

/// Memoizes the first identity the inner provider resolves.
///
/// A miss is not remembered, so a later `resolve` retries the inner
/// provider. Wrap [`StoredIdentity`] with this to avoid a keyring or file
/// read on every request.
#[derive(Debug, Default)]
pub struct CachedIdentity<P> {
    inner: P,
    resolved: Mutex<Option<Identity>>,
}

impl<P: IdentityProvider> CachedIdentity<P> {
    #[must_use]
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            resolved: Mutex::new(None),
        }
    }
}

impl<P: IdentityProvider> IdentityProvider for CachedIdentity<P> {
    fn resolve(&self) -> Option<Identity> {
        let mut resolved = self.resolved.lock();
        if resolved.is_none() {
            *resolved = self.inner.resolve();
        }
        resolved.clone()
    }
}
