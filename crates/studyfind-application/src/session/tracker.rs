use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use studyfind_core::auth::{AuthProvider, SessionIdentity, SubscriptionId, UserId};
use tokio::sync::watch;

/// Holds the current session identity for the screens.
///
/// Mounting subscribes to the provider once; the subscription is released
/// exactly once, either by [`SessionTracker::unmount`] or on drop.
///
/// Identity is published through a `watch` channel. Re-notifications that
/// carry the same identity do not wake watchers, so consumers only see real
/// transitions (none → user, user → none, user A → user B).
pub struct SessionTracker {
    provider: Arc<dyn AuthProvider>,
    sender: Arc<watch::Sender<Option<SessionIdentity>>>,
    /// 0 once unsubscribed.
    subscription: AtomicU64,
}

impl SessionTracker {
    pub fn mount(provider: Arc<dyn AuthProvider>) -> Self {
        let (sender, _) = watch::channel(None);
        let sender = Arc::new(sender);

        let publisher = sender.clone();
        let id = provider.subscribe(Box::new(move |identity: Option<SessionIdentity>| {
            let changed = publisher.send_if_modified(|current| {
                if *current == identity {
                    false
                } else {
                    *current = identity.clone();
                    true
                }
            });
            if changed {
                tracing::info!(
                    "Session changed: {}",
                    identity
                        .as_ref()
                        .map(|i| i.uid.as_str())
                        .unwrap_or("<none>")
                );
            }
        }));

        tracing::debug!("Session tracker mounted (subscription {})", id.0);
        Self {
            provider,
            sender,
            subscription: AtomicU64::new(id.0),
        }
    }

    /// Snapshot of the current identity.
    pub fn current(&self) -> Option<SessionIdentity> {
        self.sender.borrow().clone()
    }

    pub fn uid(&self) -> Option<UserId> {
        self.sender.borrow().as_ref().map(|i| i.uid.clone())
    }

    /// A receiver that is woken on every identity transition.
    pub fn watch(&self) -> watch::Receiver<Option<SessionIdentity>> {
        self.sender.subscribe()
    }

    pub fn is_mounted(&self) -> bool {
        self.subscription.load(Ordering::SeqCst) != 0
    }

    /// Releases the provider subscription. Later calls do nothing.
    pub fn unmount(&self) {
        let id = self.subscription.swap(0, Ordering::SeqCst);
        if id != 0 {
            self.provider.unsubscribe(SubscriptionId(id));
            tracing::debug!("Session tracker unmounted (subscription {})", id);
        }
    }
}

impl Drop for SessionTracker {
    fn drop(&mut self) {
        self.unmount();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::CountingAuthProvider;
    use studyfind_infrastructure::LocalAuthProvider;

    fn uid(s: &str) -> UserId {
        UserId::new(s).unwrap()
    }

    #[test]
    fn test_mount_picks_up_current_identity() {
        let provider = Arc::new(LocalAuthProvider::signed_in(uid("u1")));
        let tracker = SessionTracker::mount(provider);

        assert_eq!(tracker.uid(), Some(uid("u1")));
        assert!(tracker.is_mounted());
    }

    #[test]
    fn test_follows_sign_in_and_out() {
        let provider = Arc::new(LocalAuthProvider::new());
        let tracker = SessionTracker::mount(provider.clone());
        assert!(tracker.current().is_none());

        provider.sign_in(uid("u1"));
        assert_eq!(tracker.uid(), Some(uid("u1")));

        provider.sign_in(uid("u2"));
        assert_eq!(tracker.uid(), Some(uid("u2")));

        provider.sign_out();
        assert!(tracker.current().is_none());
    }

    #[test]
    fn test_same_identity_does_not_wake_watchers() {
        let provider = Arc::new(LocalAuthProvider::signed_in(uid("u1")));
        let tracker = SessionTracker::mount(provider.clone());
        let mut rx = tracker.watch();

        provider.refresh();
        assert!(!rx.has_changed().unwrap());

        provider.sign_in(uid("u2"));
        assert!(rx.has_changed().unwrap());
        assert_eq!(
            rx.borrow_and_update().as_ref().map(|i| i.uid.clone()),
            Some(uid("u2"))
        );
    }

    #[test]
    fn test_unmount_unsubscribes_exactly_once() {
        let provider = Arc::new(CountingAuthProvider::default());
        let tracker = SessionTracker::mount(provider.clone());

        tracker.unmount();
        tracker.unmount();
        drop(tracker);

        assert_eq!(provider.subscribe_calls(), 1);
        assert_eq!(provider.unsubscribe_calls(), 1);
    }

    #[test]
    fn test_drop_unsubscribes() {
        let provider = Arc::new(LocalAuthProvider::new());
        let tracker = SessionTracker::mount(provider.clone());
        assert_eq!(provider.listener_count(), 1);

        drop(tracker);
        assert_eq!(provider.listener_count(), 0);
    }

    #[test]
    fn test_unmounted_tracker_ignores_provider() {
        let provider = Arc::new(LocalAuthProvider::new());
        let tracker = SessionTracker::mount(provider.clone());
        tracker.unmount();

        provider.sign_in(uid("u1"));
        assert!(tracker.current().is_none());
        assert!(!tracker.is_mounted());
    }
}
