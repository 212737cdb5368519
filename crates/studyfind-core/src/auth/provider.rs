//! Authentication provider boundary.

use super::model::SessionIdentity;

/// Callback invoked with the new identity on every auth state notification.
pub type AuthListener = Box<dyn Fn(Option<SessionIdentity>) + Send + Sync>;

/// Handle returned by [`AuthProvider::subscribe`].
///
/// Ids start at 1; zero is never handed out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

/// An external authentication provider delivering identity-change
/// notifications.
///
/// Implementations must invoke a freshly subscribed listener once with the
/// current identity, then again on every sign-in, sign-out or user switch.
/// Re-notification with an unchanged identity is allowed; consumers are
/// expected to deduplicate.
pub trait AuthProvider: Send + Sync {
    /// Returns the identity the provider currently holds.
    fn current_identity(&self) -> Option<SessionIdentity>;

    /// Registers a listener for identity changes.
    fn subscribe(&self, listener: AuthListener) -> SubscriptionId;

    /// Removes a previously registered listener. Unknown ids are ignored.
    fn unsubscribe(&self, id: SubscriptionId);
}
