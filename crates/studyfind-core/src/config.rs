//! Application configuration model.
//!
//! Loaded from `config.toml` by the infrastructure `ConfigService`. Every
//! section has defaults, so an empty file is a valid configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::ui::ConfirmationRequest;

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub dialogs: DialogTexts,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum StoreBackend {
    /// Process-local, lost on exit.
    Memory,
    /// TOML files under `data_dir`.
    #[default]
    File,
    /// Firestore-compatible REST endpoint.
    Rest,
}

impl std::str::FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "file" => Ok(Self::File),
            "rest" => Ok(Self::Rest),
            other => Err(format!("unknown store backend '{other}'")),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: StoreBackend,
    /// Base directory of the file backend. Defaults to the platform data dir.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rest: Option<RestStoreConfig>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct RestStoreConfig {
    #[serde(default = "default_rest_endpoint")]
    pub endpoint: String,
    pub project_id: String,
    #[serde(default = "default_database")]
    pub database: String,
    /// Bearer token sent with every request, if the rules require auth.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_token: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_rest_endpoint() -> String {
    "https://firestore.googleapis.com/v1".to_string()
}

fn default_database() -> String {
    "(default)".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Directory of the rolling log files. Defaults to `<config dir>/logs`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            directory: None,
        }
    }
}

/// Wording of the three confirmation gates.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct DialogTexts {
    #[serde(default = "default_delete_dialog")]
    pub delete: ConfirmationRequest,
    #[serde(default = "default_save_dialog")]
    pub save: ConfirmationRequest,
    #[serde(default = "default_discard_dialog")]
    pub discard: ConfirmationRequest,
}

impl Default for DialogTexts {
    fn default() -> Self {
        Self {
            delete: default_delete_dialog(),
            save: default_save_dialog(),
            discard: default_discard_dialog(),
        }
    }
}

fn yes_no(title: &str, message: &str) -> ConfirmationRequest {
    ConfirmationRequest {
        title: title.to_string(),
        message: message.to_string(),
        proceed_label: "Yes".to_string(),
        cancel_label: "No".to_string(),
    }
}

fn default_delete_dialog() -> ConfirmationRequest {
    yes_no("Delete", "Do you want to delete this to-do?")
}

fn default_save_dialog() -> ConfirmationRequest {
    yes_no("Finish writing", "Do you want to save this to-do?")
}

fn default_discard_dialog() -> ConfirmationRequest {
    yes_no(
        "Stop writing",
        "Discard this to-do and really go back?",
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_is_default() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.store.backend, StoreBackend::File);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.dialogs.delete.proceed_label, "Yes");
    }

    #[test]
    fn test_rest_section_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [store]
            backend = "rest"

            [store.rest]
            project_id = "studyfind-dev"
            "#,
        )
        .unwrap();

        assert_eq!(config.store.backend, StoreBackend::Rest);
        let rest = config.store.rest.unwrap();
        assert_eq!(rest.project_id, "studyfind-dev");
        assert_eq!(rest.database, "(default)");
        assert_eq!(rest.endpoint, "https://firestore.googleapis.com/v1");
        assert_eq!(rest.timeout_secs, 30);
    }

    #[test]
    fn test_partial_dialog_override() {
        let config: AppConfig = toml::from_str(
            r#"
            [dialogs.delete]
            title = "삭제"
            message = "할 일 목록을 삭제하시겠습니까?"
            proceed_label = "예"
            cancel_label = "아니오"
            "#,
        )
        .unwrap();

        assert_eq!(config.dialogs.delete.title, "삭제");
        assert_eq!(config.dialogs.save, DialogTexts::default().save);
    }

    #[test]
    fn test_backend_from_str() {
        assert_eq!("Memory".parse::<StoreBackend>(), Ok(StoreBackend::Memory));
        assert!("sqlite".parse::<StoreBackend>().is_err());
    }
}
