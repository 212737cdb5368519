//! Shell-side collaborators handed to every screen controller.

use std::sync::Arc;

use studyfind_core::ui::{BackNavigation, ConfirmationDialog, Navigator, Notifier};

/// The boundaries a screen talks to. Cloning shares the same shell.
#[derive(Clone)]
pub struct ScreenPorts {
    pub navigator: Arc<dyn Navigator>,
    pub dialog: Arc<dyn ConfirmationDialog>,
    pub notifier: Arc<dyn Notifier>,
    pub back: Arc<dyn BackNavigation>,
}
