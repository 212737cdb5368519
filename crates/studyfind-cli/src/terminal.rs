//! The terminal's side of the screen boundaries.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

use colored::Colorize;
use studyfind_core::ui::{
    BackNavigation, ConfirmationDialog, ConfirmationRequest, InterceptId, NavigationDirective,
    Navigator, Notice, NoticeSeverity, Notifier,
};

#[derive(Default)]
struct Inbox {
    directives: VecDeque<NavigationDirective>,
    dialog: Option<ConfirmationRequest>,
    next_intercept: u64,
    intercepts: Vec<InterceptId>,
}

/// Collects directives and dialogs for the shell loop, prints notices.
///
/// Directives are queued rather than acted on immediately because they are
/// emitted from inside controller calls; the shell drains them once the
/// call has returned.
#[derive(Default)]
pub struct TerminalPorts {
    inbox: Mutex<Inbox>,
}

impl TerminalPorts {
    pub fn next_directive(&self) -> Option<NavigationDirective> {
        self.lock().directives.pop_front()
    }

    /// Takes the open question, if any.
    pub fn take_dialog(&self) -> Option<ConfirmationRequest> {
        self.lock().dialog.take()
    }

    pub fn has_dialog(&self) -> bool {
        self.lock().dialog.is_some()
    }

    pub fn intercepting(&self) -> bool {
        !self.lock().intercepts.is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, Inbox> {
        self.inbox
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Navigator for TerminalPorts {
    fn navigate(&self, directive: NavigationDirective) {
        tracing::debug!("Navigation: {:?}", directive);
        self.lock().directives.push_back(directive);
    }
}

impl ConfirmationDialog for TerminalPorts {
    fn present(&self, request: ConfirmationRequest) {
        println!(
            "{} {}",
            format!("[{}]", request.title).bright_yellow().bold(),
            request.message.bright_yellow()
        );
        println!(
            "{}",
            format!(
                "  yes = {}, no = {}",
                request.proceed_label, request.cancel_label
            )
            .bright_black()
        );
        self.lock().dialog = Some(request);
    }
}

impl Notifier for TerminalPorts {
    fn notify(&self, notice: Notice) {
        let message = notice.message();
        match notice.severity() {
            NoticeSeverity::Info => println!("{}", message.bright_green()),
            NoticeSeverity::Warning => println!("{}", message.yellow()),
            NoticeSeverity::Error => eprintln!("{}", message.red()),
        }
    }
}

impl BackNavigation for TerminalPorts {
    fn install_intercept(&self) -> InterceptId {
        let mut inbox = self.lock();
        inbox.next_intercept += 1;
        let id = InterceptId(inbox.next_intercept);
        inbox.intercepts.push(id);
        id
    }

    fn remove_intercept(&self, id: InterceptId) {
        self.lock().intercepts.retain(|i| *i != id);
    }
}
