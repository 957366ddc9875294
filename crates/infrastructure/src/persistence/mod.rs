//! File-backed adapters: settings, execution log and vault.

mod daily_log;
mod file_system;
mod settings_store;
mod vault;

pub use daily_log::DailyJsonLog;
pub use file_system::{FileSystemError, TokioFileSystem};
pub use settings_store::JsonSettingsStore;
pub use vault::FsVault;
