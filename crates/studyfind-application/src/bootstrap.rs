//! Service wiring: configuration → document store → repository → screens.

use std::sync::Arc;

use studyfind_core::auth::AuthProvider;
use studyfind_core::config::{AppConfig, StoreBackend};
use studyfind_core::error::{Result, StudyError};
use studyfind_core::store::DocumentStore;
use studyfind_core::todo::TodoRepository;
use studyfind_infrastructure::{
    ConfigService, DocumentTodoRepository, MemoryDocumentStore, RestDocumentStore,
    TomlDocumentStore,
};

use crate::ports::ScreenPorts;
use crate::session::SessionTracker;
use crate::todo_creation::TodoCreationController;
use crate::todo_list::TodoListController;

/// Long-lived services shared by every screen.
///
/// Store and auth handles are passed down explicitly; nothing here is
/// global.
pub struct AppServices {
    config: AppConfig,
    auth: Arc<dyn AuthProvider>,
    repository: Arc<dyn TodoRepository>,
}

impl AppServices {
    /// Opens the configured store and builds the repository over it.
    pub fn build(config: AppConfig, auth: Arc<dyn AuthProvider>) -> Result<Self> {
        let store = open_store(&config)?;
        Ok(Self::with_store(config, auth, store))
    }

    /// Wires the services over an already opened store.
    pub fn with_store(
        config: AppConfig,
        auth: Arc<dyn AuthProvider>,
        store: Arc<dyn DocumentStore>,
    ) -> Self {
        Self {
            config,
            auth,
            repository: Arc::new(DocumentTodoRepository::new(store)),
        }
    }

    pub fn repository(&self) -> Arc<dyn TodoRepository> {
        self.repository.clone()
    }

    /// Subscribes a new tracker to the auth provider.
    pub fn session_tracker(&self) -> SessionTracker {
        SessionTracker::mount(self.auth.clone())
    }

    pub fn list_controller(&self, ports: &ScreenPorts) -> Arc<TodoListController> {
        Arc::new(TodoListController::new(
            self.repository.clone(),
            ports,
            self.config.dialogs.delete.clone(),
        ))
    }

    pub fn creation_controller(
        &self,
        ports: &ScreenPorts,
        session: &SessionTracker,
    ) -> Arc<TodoCreationController> {
        Arc::new(TodoCreationController::new(
            self.repository.clone(),
            ports,
            &self.config.dialogs,
            session.watch(),
        ))
    }
}

/// Opens the document store selected by `[store] backend`.
pub fn open_store(config: &AppConfig) -> Result<Arc<dyn DocumentStore>> {
    let store: Arc<dyn DocumentStore> = match config.store.backend {
        StoreBackend::Memory => {
            tracing::warn!("Using the in-memory store; to-dos are lost on exit");
            Arc::new(MemoryDocumentStore::new())
        }
        StoreBackend::File => {
            let dir = ConfigService::data_dir(config)?;
            tracing::info!("Using the file store at {}", dir.display());
            Arc::new(TomlDocumentStore::new(dir))
        }
        StoreBackend::Rest => {
            let rest = config.store.rest.as_ref().ok_or_else(|| {
                StudyError::config("store.backend = \"rest\" requires a [store.rest] section")
            })?;
            tracing::info!("Using the REST store at {}", rest.endpoint);
            Arc::new(RestDocumentStore::new(rest)?)
        }
    };
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::Shell;
    use studyfind_core::auth::UserId;
    use studyfind_core::config::RestStoreConfig;
    use studyfind_infrastructure::LocalAuthProvider;
    use tempfile::TempDir;

    #[test]
    fn test_rest_backend_requires_section() {
        let mut config = AppConfig::default();
        config.store.backend = StoreBackend::Rest;

        let err = open_store(&config).err().unwrap();
        assert!(err.is_config());
    }

    #[test]
    fn test_rest_backend_opens() {
        let mut config = AppConfig::default();
        config.store.backend = StoreBackend::Rest;
        config.store.rest = Some(RestStoreConfig {
            endpoint: "http://localhost:8080/v1".to_string(),
            project_id: "demo".to_string(),
            database: "(default)".to_string(),
            id_token: None,
            timeout_secs: 5,
        });

        assert!(open_store(&config).is_ok());
    }

    #[tokio::test]
    async fn test_file_backend_persists_across_builds() {
        let dir = TempDir::new().unwrap();
        let mut config = AppConfig::default();
        config.store.data_dir = Some(dir.path().to_path_buf());
        let uid = UserId::new("u1").unwrap();
        let auth = Arc::new(LocalAuthProvider::signed_in(uid.clone()));

        let first = AppServices::build(config.clone(), auth.clone()).unwrap();
        first
            .repository()
            .create(Some(&uid), "Read", "Ch.1")
            .await
            .unwrap();

        let second = AppServices::build(config, auth).unwrap();
        let records = second.repository().list(Some(&uid)).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "Read");
    }

    #[tokio::test]
    async fn test_screens_share_session() {
        let uid = UserId::new("u1").unwrap();
        let auth = Arc::new(LocalAuthProvider::signed_in(uid));
        let mut config = AppConfig::default();
        config.store.backend = StoreBackend::Memory;
        let services = AppServices::build(config, auth.clone()).unwrap();
        let shell = Shell::new();

        let tracker = services.session_tracker();
        let list = services.list_controller(&shell.ports());
        let creation = services.creation_controller(&shell.ports(), &tracker);

        list.mount(tracker.current()).await;
        creation.mount().await;
        creation.set_title("Read").await;
        creation.set_detail("Ch.1").await;
        creation.request_save().await;
        creation
            .resolve_confirmation(studyfind_core::ui::ConfirmationOutcome::Proceed)
            .await;
        list.on_focus().await;

        assert_eq!(list.view().await.items.len(), 1);
        assert_eq!(auth.listener_count(), 1);
    }
}
