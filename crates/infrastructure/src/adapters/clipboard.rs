//! System clipboard through the platform's copy command.
//!
//! - macOS: `pbcopy`
//! - Linux: `xclip`, falling back to `xsel`
//! - Windows: `clip`

use std::process::Stdio;

use async_trait::async_trait;
use bridge_application::ports::{Clipboard, SinkError};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Clipboard that pipes text into an external copy command.
#[derive(Debug, Clone, Default)]
pub struct ProcessClipboard {
    commands: Vec<(String, Vec<String>)>,
}

impl ProcessClipboard {
    /// Creates a clipboard using the platform's copy commands.
    #[must_use]
    pub fn new() -> Self {
        Self {
            commands: platform_commands(),
        }
    }

    /// Creates a clipboard that tries `commands` in order.
    #[must_use]
    pub const fn with_commands(commands: Vec<(String, Vec<String>)>) -> Self {
        Self { commands }
    }

    async fn pipe_into(program: &str, args: &[String], text: &str) -> Result<(), SinkError> {
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| SinkError::Clipboard(format!("failed to spawn {program}: {e}")))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(text.as_bytes())
                .await
                .map_err(|e| SinkError::Clipboard(format!("failed to write to {program}: {e}")))?;
        }

        let status = child
            .wait()
            .await
            .map_err(|e| SinkError::Clipboard(format!("failed to wait for {program}: {e}")))?;

        if status.success() {
            Ok(())
        } else {
            Err(SinkError::Clipboard(format!("{program} exited with {status}")))
        }
    }
}

#[async_trait]
impl Clipboard for ProcessClipboard {
    async fn write_text(&self, text: &str) -> Result<(), SinkError> {
        let mut last_error = SinkError::Clipboard("not supported on this platform".to_string());
        for (program, args) in &self.commands {
            match Self::pipe_into(program, args, text).await {
                Ok(()) => return Ok(()),
                Err(error) => {
                    tracing::debug!(%program, %error, "clipboard command failed");
                    last_error = error;
                }
            }
        }
        Err(last_error)
    }
}

fn platform_commands() -> Vec<(String, Vec<String>)> {
    let command = |program: &str, args: &[&str]| -> (String, Vec<String>) {
        (
            program.to_string(),
            args.iter().map(|arg| (*arg).to_string()).collect(),
        )
    };

    if cfg!(target_os = "macos") {
        vec![command("pbcopy", &[])]
    } else if cfg!(target_os = "windows") {
        vec![command("clip", &[])]
    } else if cfg!(target_os = "linux") {
        vec![
            command("xclip", &["-selection", "clipboard"]),
            command("xsel", &["--clipboard", "--input"]),
        ]
    } else {
        Vec::new()
    }
}
