//! Terminal implementations of the interaction ports.
//!
//! Prompts and notices go to stderr so stdout carries only responses.

use std::io::Write;

use async_trait::async_trait;
use bridge_application::ports::{InputPrompt, NoteEditor, NoticeKind, Notifier, SinkError};
use bridge_infrastructure::FsVault;
use tokio::io::{AsyncBufReadExt, BufReader, Stdin};
use tokio::sync::Mutex;

/// Reads `{{input}}` from stdin, one line per prompt; end of input cancels.
#[derive(Debug)]
pub struct ConsolePrompt {
    reader: Mutex<BufReader<Stdin>>,
}

impl ConsolePrompt {
    pub fn new() -> Self {
        Self {
            reader: Mutex::new(BufReader::new(tokio::io::stdin())),
        }
    }
}

impl Default for ConsolePrompt {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl InputPrompt for ConsolePrompt {
    async fn prompt_for_text(&self, prompt: &str) -> Option<String> {
        show_prompt(&mut std::io::stderr(), prompt);

        let mut line = String::new();
        let mut reader = self.reader.lock().await;
        match reader.read_line(&mut line).await {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim_end_matches(['\n', '\r']).to_string()),
        }
    }
}

/// Writes `prompt` followed by a space and flushes so it shows before input.
fn show_prompt(out: &mut impl Write, prompt: &str) {
    if let Err(error) = write!(out, "{prompt} ").and_then(|()| out.flush()) {
        tracing::debug!(%error, "failed to show prompt");
    }
}

/// Prints notices to stderr.
#[derive(Debug, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, kind: NoticeKind, message: &str) {
        eprintln!("[{kind}] {message}");
    }
}

/// Treats stdout as the focused editor; new notes go to the vault.
#[derive(Debug, Clone)]
pub struct ConsoleEditor {
    vault: FsVault,
}

impl ConsoleEditor {
    pub const fn new(vault: FsVault) -> Self {
        Self { vault }
    }
}

#[async_trait]
impl NoteEditor for ConsoleEditor {
    async fn replace_selection(&self, text: &str) -> Result<bool, SinkError> {
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{text}").map_err(|e| SinkError::Editor(e.to_string()))?;
        Ok(true)
    }

    async fn create_note(&self, name: &str, content: &str) -> Result<String, SinkError> {
        let path = self.vault.create_note(name, content).await?;
        eprintln!("Created note {path}");
        Ok(path)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("closed"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Err(std::io::Error::other("closed"))
        }
    }

    #[test]
    fn test_show_prompt_writes_prompt_and_space() {
        let mut out = Vec::new();
        show_prompt(&mut out, "Enter value:");
        assert_eq!(String::from_utf8(out).unwrap(), "Enter value: ");
    }

    #[test]
    fn test_show_prompt_tolerates_closed_stream() {
        show_prompt(&mut Broken, "Enter value:");
    }
}
