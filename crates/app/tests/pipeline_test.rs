//! Integration tests for the file-backed endpoint pipeline.
//!
//! These tests run the endpoint service against the real settings store,
//! daily log and vault adapters in a temporary directory. Only the HTTP
//! transport and the user-facing ports are stubbed.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bridge_application::ports::{
    Clipboard, Clock, EndpointStore, HttpClient, HttpClientError, HttpRequest, HttpResponse,
    InputPrompt, NoticeKind, Notifier, SinkError,
};
use bridge_application::{
    EndpointExecutor, EndpointService, ExecutorPorts, TriggerDispatcher, TriggerEvent,
};
use bridge_domain::{BodyTemplate, EndpointRecord, HttpMethod, ResponseSink, TriggerKind};
use bridge_infrastructure::{DailyJsonLog, FsVault, JsonSettingsStore};
use chrono::{DateTime, TimeZone, Utc};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use tempfile::tempdir;

#[derive(Default)]
struct EchoHttp {
    requests: Mutex<Vec<HttpRequest>>,
}

#[async_trait]
impl HttpClient for EchoHttp {
    async fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, HttpClientError> {
        self.requests.lock().unwrap().push(request.clone());
        Ok(HttpResponse::new(
            200,
            "OK",
            format!("echo {}", request.body.clone().unwrap_or_default()),
        ))
    }
}

struct FixedPrompt(Option<String>);

#[async_trait]
impl InputPrompt for FixedPrompt {
    async fn prompt_for_text(&self, _prompt: &str) -> Option<String> {
        self.0.clone()
    }
}

#[derive(Default)]
struct Notices(Mutex<Vec<String>>);

impl Notifier for Notices {
    fn notify(&self, kind: NoticeKind, message: &str) {
        self.0.lock().unwrap().push(format!("{kind}: {message}"));
    }
}

struct NoClipboard;

#[async_trait]
impl Clipboard for NoClipboard {
    async fn write_text(&self, _text: &str) -> Result<(), SinkError> {
        Err(SinkError::Clipboard("headless".into()))
    }
}

struct Noon;

impl Clock for Noon {
    fn now(&self) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }
}

struct Fixture {
    service: EndpointService,
    http: Arc<EchoHttp>,
    notices: Arc<Notices>,
}

fn fixture(vault_root: &Path, answer: Option<&str>) -> Fixture {
    let vault = FsVault::new(vault_root).with_active_document("daily/Today.md");
    let http = Arc::new(EchoHttp::default());
    let notices = Arc::new(Notices::default());
    let executor = EndpointExecutor::new(ExecutorPorts {
        http: http.clone(),
        prompt: Arc::new(FixedPrompt(answer.map(str::to_string))),
        notifier: notices.clone(),
        workspace: Arc::new(vault.clone()),
        editor: Arc::new(vault.clone()),
        clipboard: Arc::new(NoClipboard),
        log: Arc::new(DailyJsonLog::in_vault(vault.root())),
        clock: Arc::new(Noon),
    });
    let store = JsonSettingsStore::new(vault_root.join(".api-bridge/settings.json"));
    Fixture {
        service: EndpointService::new(Arc::new(store), executor),
        http,
        notices,
    }
}

fn read_json(path: &Path) -> Value {
    serde_json::from_slice(&std::fs::read(path).expect("file should exist")).unwrap()
}

#[tokio::test]
async fn test_post_to_new_note_is_logged() {
    let dir = tempdir().unwrap();
    let fx = fixture(dir.path(), Some("hello"));

    let endpoint = EndpointRecord::new("capture", "Capture", HttpMethod::Post, "https://api.test/{{title}}")
        .with_header("X-Token", "{{token}}")
        .with_body(BodyTemplate::object(json!({"text": "{{input}}", "file": "{{filepath}}"})))
        .with_sink(ResponseSink::NewNote);
    fx.service.create_endpoint(endpoint).await.unwrap();
    fx.service.set_token("default", "t0k").await.unwrap();

    let result = fx.service.execute_by_id("capture").await;
    assert!(result.success, "{result:?}");

    let sent = fx.http.requests.lock().unwrap()[0].clone();
    assert_eq!(sent.url, "https://api.test/Today");
    assert_eq!(sent.headers["X-Token"], "t0k");
    assert_eq!(
        sent.body.as_deref(),
        Some(r#"{"text":"hello","file":"daily/Today.md"}"#)
    );

    let note = dir.path().join("API Response - 2024-06-01T12-00-00.md");
    assert_eq!(
        std::fs::read_to_string(note).unwrap(),
        r#"echo {"text":"hello","file":"daily/Today.md"}"#
    );
    assert_eq!(
        *fx.notices.0.lock().unwrap(),
        vec!["success: Response saved to new note: API Response - 2024-06-01T12-00-00.md".to_string()]
    );

    let log = read_json(&dir.path().join(".api-bridge-logs/2024-06-01.json"));
    let entries = log.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["id"], "capture");
    assert_eq!(entries[0]["request"]["url"], "https://api.test/Today");
    assert_eq!(entries[0]["timestamp"], "2024-06-01T12:00:00Z");

    let settings = read_json(&dir.path().join(".api-bridge/settings.json"));
    assert_eq!(settings["tokens"]["default"], "t0k");
    assert_eq!(settings["endpoints"][0]["bodyTemplate"]["type"], "object");
}

#[tokio::test]
async fn test_cancelled_run_leaves_no_trace() {
    let dir = tempdir().unwrap();
    let fx = fixture(dir.path(), None);

    fx.service
        .create_endpoint(EndpointRecord::new(
            "search",
            "Search",
            HttpMethod::Get,
            "https://api.test/?q={{input}}",
        ))
        .await
        .unwrap();

    let result = fx.service.execute_by_id("search").await;
    assert_eq!(result.error.as_deref(), Some("Execution cancelled by user"));
    assert!(fx.http.requests.lock().unwrap().is_empty());
    assert!(!dir.path().join(".api-bridge-logs").exists());
}

#[tokio::test]
async fn test_clipboard_failure_is_notified_and_run_still_succeeds() {
    let dir = tempdir().unwrap();
    let fx = fixture(dir.path(), None);

    fx.service
        .create_endpoint(
            EndpointRecord::new("copy", "Copy", HttpMethod::Get, "https://api.test")
                .with_sink(ResponseSink::Clipboard),
        )
        .await
        .unwrap();

    assert!(fx.service.execute_by_id("copy").await.success);
    assert_eq!(
        *fx.notices.0.lock().unwrap(),
        vec!["error: Failed to handle response: Clipboard unavailable: headless".to_string()]
    );
    assert!(dir.path().join(".api-bridge-logs/2024-06-01.json").exists());
}

#[tokio::test]
async fn test_imported_endpoints_fire_on_save() {
    let dir = tempdir().unwrap();
    let fx = fixture(dir.path(), None);

    let report = fx
        .service
        .import_json(
            &json!([
                {"id": "sync", "name": "Sync", "url": "https://api.test/sync", "method": "PUT",
                 "trigger": ["onNoteSave"], "bodyTemplate": "{{vault}}"},
                {"id": "broken", "name": "Broken", "url": "nope", "trigger": ["onNoteSave"]},
                {"id": "open", "name": "Open", "url": "https://api.test/open",
                 "trigger": ["onNoteOpen"]}
            ])
            .to_string(),
        )
        .await
        .unwrap();
    assert_eq!(report.imported, 2);
    assert_eq!(report.errors, vec!["Endpoint \"Broken\": Invalid URL format".to_string()]);

    let dispatcher = TriggerDispatcher::new(fx.service.clone());
    let results = dispatcher.dispatch(&TriggerEvent::NoteSaved).await.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].0, "sync");

    let vault_name = dir.path().canonicalize().unwrap();
    let vault_name = vault_name.file_name().unwrap().to_string_lossy();
    assert_eq!(
        fx.http.requests.lock().unwrap()[0].body.as_deref(),
        Some(vault_name.as_ref())
    );

    let reopened = JsonSettingsStore::new(dir.path().join(".api-bridge/settings.json"));
    let stored = reopened.list().await.unwrap();
    assert_eq!(stored.len(), 2);
    assert!(stored[0].has_trigger(&TriggerKind::OnNoteSave));
}
