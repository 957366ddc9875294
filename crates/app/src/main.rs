//! API Bridge - Main Entry Point
//!
//! Wires the file-backed adapters into the endpoint service and runs one
//! subcommand.

mod cli;
mod commands;
mod console;

use std::process::ExitCode;
use std::sync::Arc;

use bridge_application::ports::EndpointStore;
use bridge_application::{EndpointExecutor, EndpointService, ExecutorPorts};
use bridge_infrastructure::{
    DailyJsonLog, FsVault, JsonSettingsStore, ProcessClipboard, ReqwestHttpClient, SystemClock,
};
use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::Cli;
use crate::console::{ConsoleEditor, ConsoleNotifier, ConsolePrompt};

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let store = Arc::new(JsonSettingsStore::new(cli.settings_path()));
    let settings = store.load().await?;
    init_tracing(cli.debug || settings.debug_mode);

    let mut vault = FsVault::new(&cli.vault);
    if let Some(active) = &cli.active {
        vault = vault.with_active_document(active.as_str());
    }
    tracing::debug!(
        vault = %cli.vault.display(),
        settings = %store.path().display(),
        endpoints = settings.endpoints.len(),
        "starting"
    );

    let executor = EndpointExecutor::new(ExecutorPorts {
        http: Arc::new(ReqwestHttpClient::new()?),
        prompt: Arc::new(ConsolePrompt::new()),
        notifier: Arc::new(ConsoleNotifier),
        workspace: Arc::new(vault.clone()),
        editor: Arc::new(ConsoleEditor::new(vault.clone())),
        clipboard: Arc::new(ProcessClipboard::new()),
        log: Arc::new(DailyJsonLog::in_vault(vault.root())),
        clock: Arc::new(SystemClock::new()),
    });
    let service = EndpointService::new(store, executor);

    commands::dispatch(cli.command, &service).await
}

/// Logs go to stderr; `RUST_LOG` overrides the default level.
fn init_tracing(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
