//! Hand-written port stubs shared by the unit tests.

#![allow(clippy::unwrap_used, missing_docs)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bridge_domain::{LogEntry, Settings};
use chrono::{DateTime, TimeZone, Utc};

use crate::executor::{EndpointExecutor, ExecutorPorts};
use crate::ports::{
    ActiveDocument, Clipboard, Clock, EndpointStore, ExecutionLog, HttpClient, HttpClientError,
    HttpRequest, HttpResponse, InputPrompt, LogError, NoteEditor, NoticeKind, Notifier,
    SettingsMutation, SinkError, StoreError, WorkspaceContext,
};

pub struct StubHttp {
    reply: Mutex<Result<HttpResponse, HttpClientError>>,
    calls: AtomicUsize,
    requests: Mutex<Vec<HttpRequest>>,
}

impl StubHttp {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl HttpClient for StubHttp {
    async fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, HttpClientError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());
        self.reply.lock().unwrap().clone()
    }
}

pub struct ScriptedPrompt {
    answer: Mutex<Option<String>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedPrompt {
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl InputPrompt for ScriptedPrompt {
    async fn prompt_for_text(&self, prompt: &str) -> Option<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.answer.lock().unwrap().clone()
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<(NoticeKind, String)>>,
}

impl RecordingNotifier {
    pub fn notices(&self) -> Vec<(NoticeKind, String)> {
        self.notices.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, kind: NoticeKind, message: &str) {
        self.notices.lock().unwrap().push((kind, message.to_string()));
    }
}

pub struct StaticWorkspace {
    active: Option<ActiveDocument>,
}

impl WorkspaceContext for StaticWorkspace {
    fn active_document(&self) -> Option<ActiveDocument> {
        self.active.clone()
    }

    fn vault_name(&self) -> String {
        "Vault".to_string()
    }
}

#[derive(Default)]
pub struct RecordingEditor {
    focused: bool,
    replaced: Mutex<Vec<String>>,
    notes: Mutex<Vec<(String, String)>>,
}

impl RecordingEditor {
    pub fn replaced(&self) -> Vec<String> {
        self.replaced.lock().unwrap().clone()
    }

    pub fn notes(&self) -> Vec<(String, String)> {
        self.notes.lock().unwrap().clone()
    }
}

#[async_trait]
impl NoteEditor for RecordingEditor {
    async fn replace_selection(&self, text: &str) -> Result<bool, SinkError> {
        if !self.focused {
            return Ok(false);
        }
        self.replaced.lock().unwrap().push(text.to_string());
        Ok(true)
    }

    async fn create_note(&self, name: &str, content: &str) -> Result<String, SinkError> {
        self.notes
            .lock()
            .unwrap()
            .push((name.to_string(), content.to_string()));
        Ok(name.to_string())
    }
}

#[derive(Default)]
pub struct RecordingClipboard {
    fail: bool,
    contents: Mutex<Option<String>>,
}

impl RecordingClipboard {
    pub fn contents(&self) -> Option<String> {
        self.contents.lock().unwrap().clone()
    }
}

#[async_trait]
impl Clipboard for RecordingClipboard {
    async fn write_text(&self, text: &str) -> Result<(), SinkError> {
        if self.fail {
            return Err(SinkError::Clipboard("denied".to_string()));
        }
        *self.contents.lock().unwrap() = Some(text.to_string());
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryLog {
    fail: bool,
    entries: Mutex<Vec<LogEntry>>,
}

impl MemoryLog {
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().unwrap().clone()
    }
}

#[async_trait]
impl ExecutionLog for MemoryLog {
    async fn append(&self, entry: &LogEntry) -> Result<String, LogError> {
        if self.fail {
            return Err(LogError::Io("disk full".to_string()));
        }
        self.entries.lock().unwrap().push(entry.clone());
        Ok(entry.file_name())
    }
}

pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Settings held in memory; a failing mutation leaves them untouched.
#[derive(Default)]
pub struct MemoryStore {
    settings: Mutex<Settings>,
}

impl MemoryStore {
    pub fn with_settings(settings: Settings) -> Self {
        Self {
            settings: Mutex::new(settings),
        }
    }
}

#[async_trait]
impl EndpointStore for MemoryStore {
    async fn load(&self) -> Result<Settings, StoreError> {
        Ok(self.settings.lock().unwrap().clone())
    }

    async fn mutate(&self, mutation: SettingsMutation<'_>) -> Result<(), StoreError> {
        let mut guard = self.settings.lock().unwrap();
        let mut draft = guard.clone();
        mutation(&mut draft)?;
        *guard = draft;
        Ok(())
    }
}

/// Every stub, wired into one executor.
pub struct Harness {
    pub http: Arc<StubHttp>,
    pub prompt: Arc<ScriptedPrompt>,
    pub notifier: Arc<RecordingNotifier>,
    pub workspace: Arc<StaticWorkspace>,
    pub editor: Arc<RecordingEditor>,
    pub clipboard: Arc<RecordingClipboard>,
    pub log: Arc<MemoryLog>,
    pub clock: Arc<FixedClock>,
}

impl Harness {
    pub fn new() -> Self {
        Self {
            http: Arc::new(StubHttp {
                reply: Mutex::new(Ok(HttpResponse::new(200, "OK", "ok"))),
                calls: AtomicUsize::new(0),
                requests: Mutex::new(Vec::new()),
            }),
            prompt: Arc::new(ScriptedPrompt {
                answer: Mutex::new(Some("value".to_string())),
                prompts: Mutex::new(Vec::new()),
            }),
            notifier: Arc::new(RecordingNotifier::default()),
            workspace: Arc::new(StaticWorkspace { active: None }),
            editor: Arc::new(RecordingEditor::default()),
            clipboard: Arc::new(RecordingClipboard::default()),
            log: Arc::new(MemoryLog::default()),
            clock: Arc::new(FixedClock(
                Utc.with_ymd_and_hms(2024, 3, 9, 8, 5, 1).unwrap(),
            )),
        }
    }

    pub fn with_response(self, status: u16, status_text: &str, body: &str) -> Self {
        *self.http.reply.lock().unwrap() = Ok(HttpResponse::new(status, status_text, body));
        self
    }

    pub fn with_transport_error(self, error: HttpClientError) -> Self {
        *self.http.reply.lock().unwrap() = Err(error);
        self
    }

    pub fn with_prompt_answer(self, answer: Option<String>) -> Self {
        *self.prompt.answer.lock().unwrap() = answer;
        self
    }

    pub fn with_active_document(mut self, path: &str) -> Self {
        self.workspace = Arc::new(StaticWorkspace {
            active: Some(ActiveDocument::from_path(path)),
        });
        self
    }

    pub fn with_focused_editor(mut self) -> Self {
        self.editor = Arc::new(RecordingEditor {
            focused: true,
            ..RecordingEditor::default()
        });
        self
    }

    pub fn with_failing_clipboard(mut self) -> Self {
        self.clipboard = Arc::new(RecordingClipboard {
            fail: true,
            ..RecordingClipboard::default()
        });
        self
    }

    pub fn with_failing_log(mut self) -> Self {
        self.log = Arc::new(MemoryLog {
            fail: true,
            ..MemoryLog::default()
        });
        self
    }

    pub fn executor(&self) -> EndpointExecutor {
        EndpointExecutor::new(ExecutorPorts {
            http: self.http.clone(),
            prompt: self.prompt.clone(),
            notifier: self.notifier.clone(),
            workspace: self.workspace.clone(),
            editor: self.editor.clone(),
            clipboard: self.clipboard.clone(),
            log: self.log.clone(),
            clock: self.clock.clone(),
        })
    }
}
