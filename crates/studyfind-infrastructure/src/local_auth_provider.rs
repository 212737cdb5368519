//! Process-local AuthProvider implementation.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, RwLock};

use studyfind_core::auth::{AuthListener, AuthProvider, SessionIdentity, SubscriptionId, UserId};

type SharedListener = Arc<dyn Fn(Option<SessionIdentity>) + Send + Sync>;

/// Auth provider whose identity is set explicitly by the host.
///
/// Used by the terminal shell (`login` / `logout`) and by tests to drive
/// session changes. Listeners are invoked synchronously on the calling
/// thread, after the internal locks have been released.
pub struct LocalAuthProvider {
    identity: RwLock<Option<SessionIdentity>>,
    listeners: Mutex<BTreeMap<u64, SharedListener>>,
    next_id: AtomicU64,
}

impl Default for LocalAuthProvider {
    fn default() -> Self {
        Self {
            identity: RwLock::new(None),
            listeners: Mutex::new(BTreeMap::new()),
            next_id: AtomicU64::new(1),
        }
    }
}

impl LocalAuthProvider {
    /// A provider with nobody signed in.
    pub fn new() -> Self {
        Self::default()
    }

    /// A provider already signed in as `uid`.
    pub fn signed_in(uid: UserId) -> Self {
        let provider = Self::default();
        *provider.write_identity() = Some(SessionIdentity::new(uid));
        provider
    }

    /// Signs in as `uid`, replacing any current user.
    pub fn sign_in(&self, uid: UserId) {
        tracing::info!("Signed in as {}", uid);
        self.set(Some(SessionIdentity::new(uid)));
    }

    pub fn sign_out(&self) {
        tracing::info!("Signed out");
        self.set(None);
    }

    /// Re-sends the current identity to every listener.
    ///
    /// Mirrors providers that repeat a notification, e.g. on token refresh.
    pub fn refresh(&self) {
        let identity = self.current_identity();
        self.notify(identity);
    }

    /// Number of live subscriptions.
    pub fn listener_count(&self) -> usize {
        self.lock_listeners().len()
    }

    fn set(&self, identity: Option<SessionIdentity>) {
        *self.write_identity() = identity.clone();
        self.notify(identity);
    }

    fn notify(&self, identity: Option<SessionIdentity>) {
        let listeners: Vec<SharedListener> = self.lock_listeners().values().cloned().collect();
        for listener in listeners {
            listener(identity.clone());
        }
    }

    fn write_identity(&self) -> std::sync::RwLockWriteGuard<'_, Option<SessionIdentity>> {
        self.identity
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn lock_listeners(&self) -> MutexGuard<'_, BTreeMap<u64, SharedListener>> {
        self.listeners
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl AuthProvider for LocalAuthProvider {
    fn current_identity(&self) -> Option<SessionIdentity> {
        self.identity
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn subscribe(&self, listener: AuthListener) -> SubscriptionId {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let listener: SharedListener = Arc::from(listener);
        self.lock_listeners().insert(id, listener.clone());

        listener(self.current_identity());
        tracing::debug!("Auth listener {} subscribed", id);
        SubscriptionId(id)
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        if self.lock_listeners().remove(&id.0).is_some() {
            tracing::debug!("Auth listener {} unsubscribed", id.0);
        }
    }
}
