use std::collections::HashSet;
use std::sync::Arc;

use studyfind_core::auth::{SessionIdentity, UserId};
use studyfind_core::todo::{TodoId, TodoRecord, TodoRepository};
use studyfind_core::ui::{
    ConfirmationDialog, ConfirmationOutcome, ConfirmationRequest, NavigationDirective, Navigator,
    Notice, Notifier,
};
use tokio::sync::{RwLock, watch};

use super::view::{ListStatus, ListView};
use crate::ports::ScreenPorts;

struct ListState {
    mounted: bool,
    session: Option<UserId>,
    status: ListStatus,
    items: Vec<TodoRecord>,
    /// Bumped on every fetch and every reset; a result is applied only if
    /// its generation is still current.
    generation: u64,
    refreshing: bool,
    pending_delete: Option<TodoId>,
    deleting: HashSet<TodoId>,
    last_error: Option<String>,
}

impl ListState {
    fn new() -> Self {
        Self {
            mounted: false,
            session: None,
            status: ListStatus::Loading,
            items: Vec::new(),
            generation: 0,
            refreshing: false,
            pending_delete: None,
            deleting: HashSet::new(),
            last_error: None,
        }
    }

    fn reset_projection(&mut self) {
        self.status = ListStatus::Loading;
        self.items.clear();
        self.generation += 1;
        self.refreshing = false;
        self.pending_delete = None;
        self.last_error = None;
    }
}

/// Controller of the to-do list screen.
///
/// Owns the in-memory projection of the signed-in user's collection and
/// re-reads it on mount, on focus and on session transitions. Deletion goes
/// through a confirmation gate and is always followed by a fresh `list`;
/// records are never removed from the projection locally.
///
/// # Thread Safety
///
/// State lives behind a `tokio::sync::RwLock` that is never held across a
/// repository call, so the screen keeps accepting input while a request is
/// outstanding.
pub struct TodoListController {
    repository: Arc<dyn TodoRepository>,
    navigator: Arc<dyn Navigator>,
    dialog: Arc<dyn ConfirmationDialog>,
    notifier: Arc<dyn Notifier>,
    delete_request: ConfirmationRequest,
    state: RwLock<ListState>,
    /// `true` after unmount; stops `follow_session`.
    unmounted: watch::Sender<bool>,
}

impl TodoListController {
    pub fn new(
        repository: Arc<dyn TodoRepository>,
        ports: &ScreenPorts,
        delete_request: ConfirmationRequest,
    ) -> Self {
        let (unmounted, _) = watch::channel(false);
        Self {
            repository,
            navigator: ports.navigator.clone(),
            dialog: ports.dialog.clone(),
            notifier: ports.notifier.clone(),
            delete_request,
            state: RwLock::new(ListState::new()),
            unmounted,
        }
    }

    /// Shows the screen for `identity` and fetches if someone is signed in.
    pub async fn mount(&self, identity: Option<SessionIdentity>) {
        {
            let mut state = self.state.write().await;
            let uid = identity.map(|i| i.uid);
            if state.session != uid {
                state.reset_projection();
                state.session = uid;
            }
            state.mounted = true;
        }
        self.unmounted.send_replace(false);
        tracing::debug!("Todo list mounted");
        self.refresh().await;
    }

    /// Leaves the screen. Outstanding results are dropped when they land.
    pub async fn unmount(&self) {
        {
            let mut state = self.state.write().await;
            state.mounted = false;
            state.generation += 1;
            state.refreshing = false;
            state.pending_delete = None;
        }
        self.unmounted.send_replace(true);
        tracing::debug!("Todo list unmounted");
    }

    /// The screen became top-most again.
    pub async fn on_focus(&self) {
        self.refresh().await;
    }

    /// Applies an identity notification.
    ///
    /// Repeats of the current identity are ignored. Any real transition
    /// clears the projection; a transition to a present identity refetches.
    pub async fn on_session_changed(&self, identity: Option<SessionIdentity>) {
        let uid = identity.map(|i| i.uid);
        let signed_in = {
            let mut state = self.state.write().await;
            if state.session == uid {
                return;
            }
            state.reset_projection();
            state.session = uid;
            state.session.is_some()
        };

        if signed_in {
            self.refresh().await;
        }
    }

    /// Drives [`Self::on_session_changed`] from a tracker's watch channel
    /// until the screen unmounts or the tracker goes away.
    pub async fn follow_session(
        self: Arc<Self>,
        mut session: watch::Receiver<Option<SessionIdentity>>,
    ) {
        let mut unmounted = self.unmounted.subscribe();
        loop {
            if *unmounted.borrow_and_update() {
                break;
            }

            let identity = session.borrow_and_update().clone();
            self.on_session_changed(identity).await;

            tokio::select! {
                changed = session.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
                _ = unmounted.changed() => {}
            }
        }
        tracing::debug!("Stopped following session");
    }

    pub fn open_creation(&self) {
        self.navigator
            .navigate(NavigationDirective::OpenCreationScreen);
    }

    /// Opens the delete confirmation for `id`.
    ///
    /// Returns `false` without opening anything when the screen is not
    /// mounted, nobody is signed in, another gate is open, or a delete of
    /// the same record is still in flight.
    pub async fn request_delete(&self, id: TodoId) -> bool {
        {
            let mut state = self.state.write().await;
            if !state.mounted || state.session.is_none() {
                return false;
            }
            if state.pending_delete.is_some() {
                tracing::debug!("Delete gate already open, ignoring request for {}", id);
                return false;
            }
            if state.deleting.contains(&id) {
                tracing::debug!("Delete of {} already in flight", id);
                return false;
            }
            state.pending_delete = Some(id);
        }

        self.dialog.present(self.delete_request.clone());
        true
    }

    /// Answers the open delete gate.
    ///
    /// On proceed the record is deleted and the list is re-read whether or
    /// not the delete succeeded.
    pub async fn resolve_confirmation(&self, outcome: ConfirmationOutcome) {
        let (uid, id) = {
            let mut state = self.state.write().await;
            let Some(id) = state.pending_delete.take() else {
                tracing::debug!("No delete gate open");
                return;
            };
            if !outcome.is_proceed() {
                tracing::debug!("Delete of {} cancelled", id);
                return;
            }
            let Some(uid) = state.session.clone() else {
                return;
            };
            state.deleting.insert(id.clone());
            (uid, id)
        };

        let result = self.repository.delete(Some(&uid), &id).await;

        let mounted = {
            let mut state = self.state.write().await;
            state.deleting.remove(&id);
            match &result {
                Err(err) if !err.is_not_found() => state.last_error = Some(err.to_string()),
                _ => {}
            }
            state.mounted
        };
        if !mounted {
            tracing::debug!("Discarding delete result for {}: screen unmounted", id);
            return;
        }

        match result {
            Ok(()) => self.notifier.notify(Notice::Deleted),
            Err(err) if err.is_not_found() => {
                tracing::info!("Todo {} was already gone", id);
                self.notifier.notify(Notice::Deleted);
            }
            Err(err) => {
                tracing::warn!("Failed to delete todo {}: {}", id, err);
                if let Some(notice) = Notice::from_error(&err) {
                    self.notifier.notify(notice);
                }
            }
        }

        self.refresh().await;
    }

    pub async fn view(&self) -> ListView {
        let state = self.state.read().await;
        ListView {
            status: state.status,
            items: state.items.clone(),
            refreshing: state.refreshing,
            pending_delete: state.pending_delete.clone(),
            last_error: state.last_error.clone(),
        }
    }

    async fn refresh(&self) {
        let (uid, generation) = {
            let mut state = self.state.write().await;
            if !state.mounted {
                tracing::debug!("Todo list not mounted, skipping fetch");
                return;
            }
            let Some(uid) = state.session.clone() else {
                tracing::debug!("No session, skipping fetch");
                return;
            };
            state.generation += 1;
            state.refreshing = true;
            (uid, state.generation)
        };

        let result = self.repository.list(Some(&uid)).await;

        let notice = {
            let mut state = self.state.write().await;
            if !state.mounted || state.generation != generation {
                tracing::debug!("Discarding stale todo list (generation {})", generation);
                return;
            }
            state.refreshing = false;

            match result {
                Ok(items) => {
                    state.status = if items.is_empty() {
                        ListStatus::Empty
                    } else {
                        ListStatus::Populated
                    };
                    tracing::info!("Loaded {} todos for {}", items.len(), uid);
                    state.items = items;
                    state.last_error = None;
                    None
                }
                Err(err) => {
                    tracing::warn!("Failed to load todos for {}: {}", uid, err);
                    state.status = ListStatus::Error;
                    state.last_error = Some(err.to_string());
                    Notice::from_error(&err)
                }
            }
        };

        if let Some(notice) = notice {
            self.notifier.notify(notice);
        }
    }
}
