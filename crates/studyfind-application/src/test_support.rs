//! Recording doubles for the shell boundaries and the repository.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

use studyfind_core::auth::{AuthListener, AuthProvider, SessionIdentity, SubscriptionId, UserId};
use studyfind_core::error::{Result, StudyError};
use studyfind_core::todo::{TodoId, TodoRecord, TodoRepository};
use studyfind_core::ui::{
    BackNavigation, ConfirmationDialog, ConfirmationRequest, InterceptId, NavigationDirective,
    Navigator, Notice, Notifier,
};
use studyfind_infrastructure::{DocumentTodoRepository, MemoryDocumentStore};

use crate::ports::ScreenPorts;

#[derive(Default)]
pub(crate) struct RecordingNavigator {
    directives: Mutex<Vec<NavigationDirective>>,
}

impl RecordingNavigator {
    pub fn directives(&self) -> Vec<NavigationDirective> {
        self.directives.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, directive: NavigationDirective) {
        self.directives.lock().unwrap().push(directive);
    }
}

#[derive(Default)]
pub(crate) struct RecordingDialog {
    requests: Mutex<Vec<ConfirmationRequest>>,
}

impl RecordingDialog {
    pub fn requests(&self) -> Vec<ConfirmationRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl ConfirmationDialog for RecordingDialog {
    fn present(&self, request: ConfirmationRequest) {
        self.requests.lock().unwrap().push(request);
    }
}

#[derive(Default)]
pub(crate) struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.notices.lock().unwrap().push(notice);
    }
}

#[derive(Default)]
pub(crate) struct RecordingBack {
    next: AtomicU64,
    installed: Mutex<Vec<InterceptId>>,
}

impl RecordingBack {
    /// Intercepts currently installed.
    pub fn installed(&self) -> Vec<InterceptId> {
        self.installed.lock().unwrap().clone()
    }
}

impl BackNavigation for RecordingBack {
    fn install_intercept(&self) -> InterceptId {
        let id = InterceptId(self.next.fetch_add(1, Ordering::SeqCst) + 1);
        self.installed.lock().unwrap().push(id);
        id
    }

    fn remove_intercept(&self, id: InterceptId) {
        self.installed.lock().unwrap().retain(|i| *i != id);
    }
}

/// All four recorders plus the `ScreenPorts` view of them.
pub(crate) struct Shell {
    pub navigator: Arc<RecordingNavigator>,
    pub dialog: Arc<RecordingDialog>,
    pub notifier: Arc<RecordingNotifier>,
    pub back: Arc<RecordingBack>,
}

impl Shell {
    pub fn new() -> Self {
        Self {
            navigator: Arc::new(RecordingNavigator::default()),
            dialog: Arc::new(RecordingDialog::default()),
            notifier: Arc::new(RecordingNotifier::default()),
            back: Arc::new(RecordingBack::default()),
        }
    }

    pub fn ports(&self) -> ScreenPorts {
        ScreenPorts {
            navigator: self.navigator.clone(),
            dialog: self.dialog.clone(),
            notifier: self.notifier.clone(),
            back: self.back.clone(),
        }
    }
}

/// Provider that only counts subscribe/unsubscribe calls.
#[derive(Default)]
pub(crate) struct CountingAuthProvider {
    subscribes: AtomicUsize,
    unsubscribes: AtomicUsize,
}

impl CountingAuthProvider {
    pub fn subscribe_calls(&self) -> usize {
        self.subscribes.load(Ordering::SeqCst)
    }

    pub fn unsubscribe_calls(&self) -> usize {
        self.unsubscribes.load(Ordering::SeqCst)
    }
}

impl AuthProvider for CountingAuthProvider {
    fn current_identity(&self) -> Option<SessionIdentity> {
        None
    }

    fn subscribe(&self, listener: AuthListener) -> SubscriptionId {
        listener(None);
        let n = self.subscribes.fetch_add(1, Ordering::SeqCst) + 1;
        SubscriptionId(n as u64)
    }

    fn unsubscribe(&self, _id: SubscriptionId) {
        self.unsubscribes.fetch_add(1, Ordering::SeqCst);
    }
}

/// A real repository over the in-memory store, instrumented for tests.
///
/// Counts calls, can fail the next call of a kind, and can hold the next
/// `list` until released.
pub(crate) struct InstrumentedRepository {
    pub store: Arc<MemoryDocumentStore>,
    inner: DocumentTodoRepository,
    list_calls: AtomicUsize,
    create_calls: AtomicUsize,
    delete_calls: AtomicUsize,
    fail_next_list: AtomicBool,
    fail_next_write: AtomicBool,
    held_list: Mutex<Option<Arc<Notify>>>,
}

impl InstrumentedRepository {
    pub fn new() -> Arc<Self> {
        let store = Arc::new(MemoryDocumentStore::new());
        Arc::new(Self {
            inner: DocumentTodoRepository::new(store.clone()),
            store,
            list_calls: AtomicUsize::new(0),
            create_calls: AtomicUsize::new(0),
            delete_calls: AtomicUsize::new(0),
            fail_next_list: AtomicBool::new(false),
            fail_next_write: AtomicBool::new(false),
            held_list: Mutex::new(None),
        })
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    pub fn delete_calls(&self) -> usize {
        self.delete_calls.load(Ordering::SeqCst)
    }

    pub fn fail_next_list(&self) {
        self.fail_next_list.store(true, Ordering::SeqCst);
    }

    pub fn fail_next_write(&self) {
        self.fail_next_write.store(true, Ordering::SeqCst);
    }

    /// The next `list` waits until the returned handle is notified.
    pub fn hold_next_list(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.held_list.lock().unwrap() = Some(gate.clone());
        gate
    }

    /// Seeds a record directly, bypassing call counters.
    pub async fn seed(&self, uid: &UserId, title: &str, detail: &str) -> TodoId {
        self.inner.create(Some(uid), title, detail).await.unwrap()
    }
}

#[async_trait]
impl TodoRepository for InstrumentedRepository {
    async fn list(&self, uid: Option<&UserId>) -> Result<Vec<TodoRecord>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        let held = self.held_list.lock().unwrap().take();
        if let Some(gate) = held {
            gate.notified().await;
        }
        if self.fail_next_list.swap(false, Ordering::SeqCst) {
            return Err(StudyError::fetch("offline"));
        }
        self.inner.list(uid).await
    }

    async fn create(&self, uid: Option<&UserId>, title: &str, detail: &str) -> Result<TodoId> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_next_write.swap(false, Ordering::SeqCst) {
            return Err(StudyError::write("offline"));
        }
        self.inner.create(uid, title, detail).await
    }

    async fn delete(&self, uid: Option<&UserId>, id: &TodoId) -> Result<()> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_next_write.swap(false, Ordering::SeqCst) {
            return Err(StudyError::write("offline"));
        }
        self.inner.delete(uid, id).await
    }
}

pub(crate) fn identity(uid: &str) -> Option<SessionIdentity> {
    Some(SessionIdentity::new(UserId::new(uid).unwrap()))
}
