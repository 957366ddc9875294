//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the application core and the host.
//! Each port is a trait implemented by adapters in the infrastructure layer
//! or by the embedding application.

mod clock;
mod endpoint_store;
mod execution_log;
mod http_client;
mod interaction;
mod workspace;

pub use clock::Clock;
pub use endpoint_store::{EndpointStore, SettingsMutation, StoreError};
pub use execution_log::{ExecutionLog, LogError};
pub use http_client::{HttpClient, HttpClientError, HttpRequest, HttpResponse};
pub use interaction::{InputPrompt, NoticeKind, Notifier};
pub use workspace::{ActiveDocument, Clipboard, NoteEditor, SinkError, WorkspaceContext};
