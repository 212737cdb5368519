/// Handle for an installed back-navigation intercept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InterceptId(pub u64);

/// Whether a screen swallowed the platform back gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackGestureOutcome {
    /// The screen handled it; the shell must not pop.
    Consumed,
    /// No intercept is active; the shell performs its default navigation.
    PassThrough,
}

/// The platform's hardware/gesture back handler.
///
/// While an intercept is installed the shell routes back gestures to the
/// owning screen's `on_back_gesture` instead of popping the screen.
pub trait BackNavigation: Send + Sync {
    fn install_intercept(&self) -> InterceptId;
    fn remove_intercept(&self, id: InterceptId);
}
