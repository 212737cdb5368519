use std::sync::Arc;

use studyfind_core::auth::SessionIdentity;
use studyfind_core::config::DialogTexts;
use studyfind_core::todo::{DraftTodo, TodoRepository};
use studyfind_core::ui::{
    BackGestureOutcome, BackNavigation, ConfirmationDialog, ConfirmationOutcome,
    ConfirmationRequest, InterceptId, NavigationDirective, Navigator, Notice, Notifier,
};
use tokio::sync::{RwLock, watch};

use super::view::{CreationGate, CreationPhase, CreationView};
use crate::ports::ScreenPorts;

struct CreationState {
    mounted: bool,
    /// Bumped on every mount so a save from an earlier visit is ignored.
    epoch: u64,
    phase: CreationPhase,
    draft: DraftTodo,
    gate: Option<CreationGate>,
    saving: bool,
    intercept: Option<InterceptId>,
    last_error: Option<String>,
}

impl CreationState {
    fn new() -> Self {
        Self {
            mounted: false,
            epoch: 0,
            phase: CreationPhase::Editing,
            draft: DraftTodo::new(),
            gate: None,
            saving: false,
            intercept: None,
            last_error: None,
        }
    }

    fn accepts_edits(&self) -> bool {
        self.mounted && self.phase == CreationPhase::Editing && !self.saving
    }
}

/// Controller of the to-do creation screen.
///
/// Both leaving paths are gated: saving asks for confirmation before the
/// draft is validated and stored, and discarding (explicit cancel or the
/// platform back gesture) asks before the draft is dropped. The back
/// intercept is installed on mount and removed as soon as the screen stops
/// editing.
pub struct TodoCreationController {
    repository: Arc<dyn TodoRepository>,
    navigator: Arc<dyn Navigator>,
    dialog: Arc<dyn ConfirmationDialog>,
    notifier: Arc<dyn Notifier>,
    back: Arc<dyn BackNavigation>,
    save_request: ConfirmationRequest,
    discard_request: ConfirmationRequest,
    session: watch::Receiver<Option<SessionIdentity>>,
    state: RwLock<CreationState>,
}

impl TodoCreationController {
    pub fn new(
        repository: Arc<dyn TodoRepository>,
        ports: &ScreenPorts,
        dialogs: &DialogTexts,
        session: watch::Receiver<Option<SessionIdentity>>,
    ) -> Self {
        Self {
            repository,
            navigator: ports.navigator.clone(),
            dialog: ports.dialog.clone(),
            notifier: ports.notifier.clone(),
            back: ports.back.clone(),
            save_request: dialogs.save.clone(),
            discard_request: dialogs.discard.clone(),
            session,
            state: RwLock::new(CreationState::new()),
        }
    }

    /// Enters `Editing` with an empty draft and installs the back intercept.
    pub async fn mount(&self) {
        let intercept = self.back.install_intercept();
        let previous = {
            let mut state = self.state.write().await;
            let previous = state.intercept.take();
            let epoch = state.epoch + 1;
            *state = CreationState::new();
            state.mounted = true;
            state.epoch = epoch;
            state.intercept = Some(intercept);
            previous
        };
        if let Some(previous) = previous {
            self.back.remove_intercept(previous);
        }
        tracing::debug!("Creation screen mounted");
    }

    pub async fn unmount(&self) {
        let intercept = {
            let mut state = self.state.write().await;
            state.mounted = false;
            state.gate = None;
            state.saving = false;
            state.intercept.take()
        };
        if let Some(intercept) = intercept {
            self.back.remove_intercept(intercept);
        }
        tracing::debug!("Creation screen unmounted");
    }

    /// Replaces the draft title. Returns `false` when edits are not accepted.
    pub async fn set_title(&self, title: impl Into<String>) -> bool {
        let mut state = self.state.write().await;
        if !state.accepts_edits() {
            return false;
        }
        state.draft.title = title.into();
        true
    }

    /// Replaces the draft detail. Returns `false` when edits are not accepted.
    pub async fn set_detail(&self, detail: impl Into<String>) -> bool {
        let mut state = self.state.write().await;
        if !state.accepts_edits() {
            return false;
        }
        state.draft.detail = detail.into();
        true
    }

    /// Opens the save confirmation.
    pub async fn request_save(&self) -> bool {
        self.open_gate(CreationGate::Save).await
    }

    /// Opens the discard confirmation.
    pub async fn request_discard(&self) -> bool {
        self.open_gate(CreationGate::Discard).await
    }

    /// Handles the platform back gesture.
    ///
    /// While the intercept is installed the gesture never pops the screen by
    /// itself: it opens the discard gate, or is swallowed if a gate is
    /// already open or a save is running.
    pub async fn on_back_gesture(&self) -> BackGestureOutcome {
        {
            let state = self.state.read().await;
            if state.intercept.is_none() {
                return BackGestureOutcome::PassThrough;
            }
            if state.gate.is_some() || state.saving {
                tracing::debug!("Back gesture swallowed");
                return BackGestureOutcome::Consumed;
            }
        }

        self.open_gate(CreationGate::Discard).await;
        BackGestureOutcome::Consumed
    }

    /// Answers the open gate. Cancelling keeps the draft untouched.
    pub async fn resolve_confirmation(&self, outcome: ConfirmationOutcome) {
        let gate = {
            let mut state = self.state.write().await;
            match state.gate.take() {
                Some(gate) => gate,
                None => {
                    tracing::debug!("No creation gate open");
                    return;
                }
            }
        };

        if !outcome.is_proceed() {
            tracing::debug!("{:?} cancelled, back to editing", gate);
            return;
        }

        match gate {
            CreationGate::Save => self.save().await,
            CreationGate::Discard => self.discard().await,
        }
    }

    pub async fn view(&self) -> CreationView {
        let state = self.state.read().await;
        CreationView {
            phase: state.phase,
            draft: state.draft.clone(),
            gate: state.gate,
            saving: state.saving,
            intercepting_back: state.intercept.is_some(),
            last_error: state.last_error.clone(),
        }
    }

    async fn open_gate(&self, gate: CreationGate) -> bool {
        {
            let mut state = self.state.write().await;
            if !state.accepts_edits() || state.gate.is_some() {
                return false;
            }
            state.gate = Some(gate);
        }

        let request = match gate {
            CreationGate::Save => self.save_request.clone(),
            CreationGate::Discard => self.discard_request.clone(),
        };
        self.dialog.present(request);
        true
    }

    async fn discard(&self) {
        let intercept = {
            let mut state = self.state.write().await;
            if !state.mounted || state.phase != CreationPhase::Editing {
                return;
            }
            state.phase = CreationPhase::Discarded;
            state.intercept.take()
        };
        if let Some(intercept) = intercept {
            self.back.remove_intercept(intercept);
        }

        tracing::info!("Draft discarded");
        self.navigator
            .navigate(NavigationDirective::ReturnToPreviousScreen);
    }

    async fn save(&self) {
        let prepared = {
            let mut state = self.state.write().await;
            if !state.accepts_edits() {
                return;
            }
            let validated = state.draft.validate();
            match &validated {
                Ok(_) => state.saving = true,
                Err(err) => state.last_error = Some(err.to_string()),
            }
            let epoch = state.epoch;
            validated.map(|todo| (todo, epoch))
        };

        let (todo, epoch) = match prepared {
            Ok(prepared) => prepared,
            Err(err) => {
                tracing::debug!("Draft rejected: {}", err);
                if let Some(notice) = Notice::from_error(&err) {
                    self.notifier.notify(notice);
                }
                return;
            }
        };

        let uid = self.session.borrow().as_ref().map(|i| i.uid.clone());
        let result = self
            .repository
            .create(uid.as_ref(), todo.title(), todo.detail())
            .await;

        let outcome = {
            let mut state = self.state.write().await;
            if !state.mounted || state.epoch != epoch {
                tracing::debug!("Discarding save result: screen unmounted");
                return;
            }
            state.saving = false;
            match result {
                Ok(id) => {
                    state.phase = CreationPhase::Confirmed;
                    state.last_error = None;
                    Ok((id, state.intercept.take()))
                }
                Err(err) => {
                    state.last_error = Some(err.to_string());
                    Err(err)
                }
            }
        };

        match outcome {
            Ok((id, intercept)) => {
                if let Some(intercept) = intercept {
                    self.back.remove_intercept(intercept);
                }
                tracing::info!("Saved todo {}", id);
                self.notifier.notify(Notice::Saved);
                self.navigator
                    .navigate(NavigationDirective::ReturnToListScreen);
            }
            Err(err) => {
                tracing::warn!("Failed to save todo: {}", err);
                if let Some(notice) = Notice::from_error(&err) {
                    self.notifier.notify(notice);
                }
            }
        }
    }
}
