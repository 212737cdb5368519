use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;

use studyfind_application::AppServices;
use studyfind_core::auth::UserId;
use studyfind_core::config::StoreBackend;
use studyfind_infrastructure::{ConfigService, LocalAuthProvider};

mod commands;
mod helper;
mod logging;
mod render;
mod shell;
mod terminal;

#[derive(Parser)]
#[command(name = "studyfind")]
#[command(about = "Studyfind - your study to-do list in the terminal", long_about = None)]
struct Cli {
    /// Configuration file (default: ~/.config/studyfind/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Store backend, overriding the configuration (memory, file, rest)
    #[arg(long)]
    store: Option<StoreBackend>,

    /// Sign in as this user at start
    #[arg(long)]
    user: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_service = match cli.config {
        Some(path) => ConfigService::with_path(path),
        None => ConfigService::new()?,
    };
    let mut config = config_service.load()?;
    if let Some(backend) = cli.store {
        config.store.backend = backend;
    }

    let _log_guard = logging::init(&config)?;
    tracing::info!(
        "Starting studyfind (config: {}, store: {:?})",
        config_service.path().display(),
        config.store.backend
    );

    let auth = Arc::new(match cli.user {
        Some(uid) => LocalAuthProvider::signed_in(UserId::new(uid)?),
        None => LocalAuthProvider::new(),
    });
    let services = AppServices::build(config, auth.clone())?;

    shell::Shell::new(&services, auth).run().await
}
