//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "api-bridge", version)]
#[command(about = "Run templated HTTP endpoints against a notes vault", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Vault directory
    #[arg(long, env = "API_BRIDGE_VAULT", default_value = ".", global = true)]
    pub vault: PathBuf,

    /// Settings file (defaults to <vault>/.api-bridge/settings.json)
    #[arg(long, env = "API_BRIDGE_SETTINGS", global = true)]
    pub settings: Option<PathBuf>,

    /// Active document, relative to the vault
    #[arg(long, global = true)]
    pub active: Option<String>,

    /// Debug logging
    #[arg(long, global = true)]
    pub debug: bool,
}

impl Cli {
    /// Returns the settings file path.
    pub fn settings_path(&self) -> PathBuf {
        self.settings
            .clone()
            .unwrap_or_else(|| self.vault.join(".api-bridge").join("settings.json"))
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List endpoints
    #[command(alias = "ls")]
    List,

    /// Print one endpoint as JSON
    Show { id: String },

    /// Run one endpoint
    Run { id: String },

    /// Fire a workspace event and run every subscribed endpoint
    Fire {
        event: EventArg,

        /// Selected text for the selection event
        #[arg(long, default_value = "")]
        selection: String,
    },

    /// Validate one endpoint, or all of them
    Validate { id: Option<String> },

    /// Import endpoints from a JSON array file
    Import {
        file: PathBuf,

        /// Replace the whole collection instead of appending
        #[arg(long)]
        replace: bool,
    },

    /// Print all endpoints as JSON
    Export,

    /// List the run commands of manual endpoints
    Commands,

    /// Manage tokens
    Token {
        #[command(subcommand)]
        action: TokenAction,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventArg {
    Open,
    Save,
    Selection,
}

#[derive(Subcommand, Debug)]
pub enum TokenAction {
    /// List token names
    List,
    /// Store a token
    Set { name: String, value: String },
    /// Remove a token
    Remove { name: String },
}
